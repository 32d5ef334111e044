use std::error::Error;
use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::cursor::Show;
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use log::{debug, error, info};
use todo_board_shared::TaskId;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tui::{backend::CrosstermBackend, Terminal};

use crate::api::TaskService;
use crate::board::{Outcome, Request, TaskBoard};
use crate::notify::AlertNotifier;
use crate::ui::{self, Focus, ViewState};

const EVENT_POLL: Duration = Duration::from_millis(50);

/// Owns the board and dispatches its requests onto the tokio runtime.
/// Must be constructed inside a runtime context.
pub struct App<S> {
    board: TaskBoard<AlertNotifier>,
    view: ViewState,
    service: S,
    outcomes_tx: UnboundedSender<Outcome>,
    outcomes_rx: UnboundedReceiver<Outcome>,
    should_quit: bool,
}

impl<S: TaskService + Clone + 'static> App<S> {
    pub fn new(service: S) -> Self {
        let (outcomes_tx, outcomes_rx) = mpsc::unbounded_channel();
        let app = Self {
            board: TaskBoard::new(AlertNotifier::default()),
            view: ViewState::default(),
            service,
            outcomes_tx,
            outcomes_rx,
            should_quit: false,
        };
        app.dispatch(Request::List);
        app
    }

    pub fn board(&self) -> &TaskBoard<AlertNotifier> {
        &self.board
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn dispatch(&self, request: Request) {
        debug!("dispatching {request:?}");
        let service = self.service.clone();
        let outcomes = self.outcomes_tx.clone();
        tokio::spawn(async move {
            let outcome = request.send(&service).await;
            if outcomes.send(outcome).is_err() {
                debug!("board closed before a response arrived");
            }
        });
    }

    /// Applies every outcome that has arrived since the last call.
    pub fn drain_outcomes(&mut self) {
        while let Ok(outcome) = self.outcomes_rx.try_recv() {
            self.apply(outcome);
        }
    }

    fn apply(&mut self, outcome: Outcome) {
        self.board.apply(outcome);
        let len = self.board.tasks().len();
        self.view.selected = self.view.selected.min(len.saturating_sub(1));
    }

    fn submit(&mut self) {
        if let Some(request) = self.board.begin_create() {
            self.dispatch(request);
        }
    }

    fn selected_id(&self) -> Option<TaskId> {
        self.board
            .tasks()
            .get(self.view.selected)
            .map(|task| task.id.clone())
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.board.notifier().current().is_some() {
            self.board.notifier_mut().dismiss();
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match key.code {
            KeyCode::Tab => {
                self.view.focus = self.view.focus.next();
                return;
            }
            KeyCode::BackTab => {
                self.view.focus = self.view.focus.prev();
                return;
            }
            _ => {}
        }

        match self.view.focus {
            Focus::Field(field) => match key.code {
                KeyCode::Char(c) if is_plain(key.modifiers) => {
                    self.board.draft_mut().field_mut(field).push(c)
                }
                KeyCode::Backspace => {
                    self.board.draft_mut().field_mut(field).pop();
                }
                KeyCode::Enter => self.submit(),
                KeyCode::Down => self.view.focus = self.view.focus.next(),
                KeyCode::Up => self.view.focus = self.view.focus.prev(),
                _ => {}
            },
            Focus::Submit => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => self.submit(),
                KeyCode::Up => self.view.focus = self.view.focus.prev(),
                _ => {}
            },
            Focus::List => match key.code {
                KeyCode::Up => self.view.selected = self.view.selected.saturating_sub(1),
                KeyCode::Down => {
                    let last = self.board.tasks().len().saturating_sub(1);
                    self.view.selected = (self.view.selected + 1).min(last);
                }
                KeyCode::Enter | KeyCode::Char(' ') => {
                    if let Some(request) = self
                        .selected_id()
                        .and_then(|id| self.board.begin_toggle(&id))
                    {
                        self.dispatch(request);
                    }
                }
                KeyCode::Char('d') | KeyCode::Delete => {
                    if let Some(id) = self.selected_id() {
                        self.dispatch(self.board.begin_delete(&id));
                    }
                }
                KeyCode::Char('q') => self.should_quit = true,
                _ => {}
            },
        }
    }
}

fn is_plain(modifiers: KeyModifiers) -> bool {
    modifiers.is_empty() || modifiers == KeyModifiers::SHIFT
}

/// Runs its closure when dropped, so cleanup happens on early returns and
/// panics alike.
struct RestoreOnDrop<F: FnMut()>(F);

impl<F: FnMut()> Drop for RestoreOnDrop<F> {
    fn drop(&mut self) {
        (self.0)()
    }
}

fn restore_terminal() {
    if let Err(err) = disable_raw_mode() {
        error!("failed to leave raw mode: {err}");
    }
    let mut stdout = io::stdout();
    if let Err(err) = execute!(stdout, LeaveAlternateScreen, Show) {
        error!("failed to restore the screen: {err}");
    }
}

fn enter_terminal() -> io::Result<RestoreOnDrop<fn()>> {
    enable_raw_mode()?;
    let guard = RestoreOnDrop(restore_terminal as fn());
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Ok(guard)
}

/// Runs the board on the current terminal until the user quits.
pub fn run<S: TaskService + Clone + 'static>(app: App<S>) -> Result<(), Box<dyn Error>> {
    let _restore = enter_terminal()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    event_loop(&mut terminal, app)
}

fn event_loop<S: TaskService + Clone + 'static>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App<S>,
) -> Result<(), Box<dyn Error>> {
    terminal.clear()?;

    while !app.should_quit() {
        app.drain_outcomes();
        terminal.draw(|f| ui::draw(f, app.board(), app.view()))?;

        if event::poll(EVENT_POLL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }
    }

    info!("quitting");
    Ok(())
}
