use std::collections::VecDeque;

use log::info;

/// User-facing notification channel.
pub trait Notifier {
    fn notify(&mut self, message: &str);
}

/// Blocking alerts for the terminal: the oldest undismissed alert is shown
/// over the board until the user presses a key.
#[derive(Debug, Default)]
pub struct AlertNotifier {
    alerts: VecDeque<String>,
}

impl AlertNotifier {
    pub fn current(&self) -> Option<&str> {
        self.alerts.front().map(String::as_str)
    }

    pub fn dismiss(&mut self) {
        self.alerts.pop_front();
    }
}

impl Notifier for AlertNotifier {
    fn notify(&mut self, message: &str) {
        info!("alert: {message}");
        self.alerts.push_back(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alerts_are_shown_in_order_until_dismissed() {
        let mut notifier = AlertNotifier::default();
        assert_eq!(notifier.current(), None);

        notifier.notify("first");
        notifier.notify("second");
        assert_eq!(notifier.current(), Some("first"));

        notifier.dismiss();
        assert_eq!(notifier.current(), Some("second"));

        notifier.dismiss();
        notifier.dismiss();
        assert_eq!(notifier.current(), None);
    }
}
