use tui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use todo_board_shared::Task;

use crate::board::{DraftField, TaskBoard};
use crate::notify::AlertNotifier;

pub const TITLE: &str = "Todo Application";
pub const FORM_TITLE: &str = "Hi, what is your to-do task today?";
pub const LIST_TITLE: &str = "Your Todos";
pub const EMPTY_STATE: &str = "No todos yet. Add one to get started!";

const INPUTS: [(DraftField, &str, &str); 3] = [
    (DraftField::Task, "Task *", "Enter your task..."),
    (DraftField::Goal, "What is your goal?", "Enter your goal..."),
    (DraftField::BreakHours, "Break Hours", "e.g., 2 hours, 30 minutes"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Field(DraftField),
    Submit,
    List,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Field(DraftField::Task) => Focus::Field(DraftField::Goal),
            Focus::Field(DraftField::Goal) => Focus::Field(DraftField::BreakHours),
            Focus::Field(DraftField::BreakHours) => Focus::Submit,
            Focus::Submit => Focus::List,
            Focus::List => Focus::Field(DraftField::Task),
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Field(DraftField::Task) => Focus::List,
            Focus::Field(DraftField::Goal) => Focus::Field(DraftField::Task),
            Focus::Field(DraftField::BreakHours) => Focus::Field(DraftField::Goal),
            Focus::Submit => Focus::Field(DraftField::BreakHours),
            Focus::List => Focus::Submit,
        }
    }
}

/// Presentation-only state: what has keyboard focus and which row is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    pub focus: Focus,
    pub selected: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            focus: Focus::Field(DraftField::Task),
            selected: 0,
        }
    }
}

pub fn submit_label(submitting: bool) -> &'static str {
    if submitting {
        "Adding..."
    } else {
        "Add Todo"
    }
}

pub fn toggle_label(completed: bool) -> &'static str {
    if completed {
        "✓ Done"
    } else {
        "Mark Done"
    }
}

/// Creation time in the local timezone, or the raw text if it does not parse.
pub fn created_label(task: &Task) -> String {
    task.created_at_local()
        .map(|stamp| stamp.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| task.created_at.clone())
}

fn focused_border(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    }
}

pub fn draw<B: Backend>(f: &mut Frame<B>, board: &TaskBoard<AlertNotifier>, view: &ViewState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Length(3), Constraint::Min(0)].as_ref())
        .split(f.size());

    let title = Paragraph::new(Span::styled(
        TITLE,
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    ))
    .block(Block::default().borders(Borders::ALL))
    .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)].as_ref())
        .split(chunks[1]);

    draw_form(f, board, view, body[0]);
    draw_list(f, board, view, body[1]);

    if let Some(message) = board.notifier().current() {
        draw_alert(f, message);
    }
}

fn draw_form<B: Backend>(
    f: &mut Frame<B>,
    board: &TaskBoard<AlertNotifier>,
    view: &ViewState,
    area: Rect,
) {
    let block = Block::default().borders(Borders::ALL).title(FORM_TITLE);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
            ]
            .as_ref(),
        )
        .split(inner);

    for (row, (field, label, placeholder)) in rows.iter().zip(INPUTS) {
        let value = board.draft().field(field);
        let focused = view.focus == Focus::Field(field);
        let content = if value.is_empty() {
            Span::styled(placeholder, Style::default().fg(Color::DarkGray))
        } else {
            Span::raw(value)
        };

        let input = Paragraph::new(content).block(
            Block::default()
                .borders(Borders::ALL)
                .title(label)
                .border_style(focused_border(focused)),
        );
        f.render_widget(input, *row);

        if focused && board.notifier().current().is_none() {
            let max_x = row.x + row.width.saturating_sub(2);
            let offset = u16::try_from(value.chars().count()).unwrap_or(u16::MAX);
            f.set_cursor(row.x.saturating_add(1).saturating_add(offset).min(max_x), row.y + 1);
        }
    }

    let submitting = board.is_submitting();
    let button_style = if submitting {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    };
    let button = Paragraph::new(Span::styled(submit_label(submitting), button_style))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(focused_border(view.focus == Focus::Submit)),
        );
    f.render_widget(button, rows[3]);

    let help = Paragraph::new(vec![
        Spans::from("Tab/Shift-Tab: move focus   Enter: add todo"),
        Spans::from("List: ↑/↓ select   Enter/Space: toggle   d: delete   q: quit"),
    ])
    .style(Style::default().fg(Color::DarkGray))
    .wrap(Wrap { trim: true });
    f.render_widget(help, rows[4]);
}

fn task_item(task: &Task) -> ListItem<'static> {
    let title_style = if task.completed {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };

    let mut lines = vec![Spans::from(Span::styled(task.task.clone(), title_style))];
    if task.has_goal() {
        lines.push(Spans::from(format!("Goal: {}", task.goal)));
    }
    if task.has_break_hours() {
        lines.push(Spans::from(format!("Break Hours: {}", task.break_hours)));
    }
    lines.push(Spans::from(Span::styled(
        format!("Created: {}", created_label(task)),
        Style::default().fg(Color::DarkGray),
    )));

    let toggle_style = if task.completed {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::LightBlue)
    };
    lines.push(Spans::from(vec![
        Span::styled(format!("[{}]", toggle_label(task.completed)), toggle_style),
        Span::raw(" "),
        Span::styled("[Delete]", Style::default().fg(Color::Red)),
    ]));
    lines.push(Spans::from(""));

    ListItem::new(Text::from(lines))
}

fn draw_list<B: Backend>(
    f: &mut Frame<B>,
    board: &TaskBoard<AlertNotifier>,
    view: &ViewState,
    area: Rect,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(LIST_TITLE)
        .border_style(focused_border(view.focus == Focus::List));

    if board.tasks().is_empty() {
        let empty = Paragraph::new(Span::styled(
            EMPTY_STATE,
            Style::default().fg(Color::DarkGray),
        ))
        .alignment(Alignment::Center)
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = board.tasks().iter().map(task_item).collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::Rgb(40, 40, 40)))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if view.focus == Focus::List {
        state.select(Some(view.selected.min(board.tasks().len() - 1)));
    }
    f.render_stateful_widget(list, area, &mut state);
}

fn centered(width_percent: u16, height: u16, area: Rect) -> Rect {
    let width = u16::try_from(u32::from(area.width) * u32::from(width_percent.min(100)) / 100)
        .unwrap_or(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn draw_alert<B: Backend>(f: &mut Frame<B>, message: &str) {
    let area = centered(50, 7, f.size());
    let alert = Paragraph::new(vec![
        Spans::from(message.to_string()),
        Spans::from(""),
        Spans::from(Span::styled(
            "Press any key to continue",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Alert")
            .border_style(Style::default().fg(Color::Red)),
    );

    f.render_widget(Clear, area);
    f.render_widget(alert, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Outcome;
    use crate::notify::Notifier;
    use crate::testing::task;
    use tui::{backend::TestBackend, Terminal};

    fn render(board: &TaskBoard<AlertNotifier>, view: &ViewState) -> String {
        let backend = TestBackend::new(120, 48);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(f, board, view)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(&buffer.get(x, y).symbol);
            }
            text.push('\n');
        }
        text
    }

    fn loaded(tasks: Vec<Task>) -> TaskBoard<AlertNotifier> {
        let mut board = TaskBoard::new(AlertNotifier::default());
        board.apply(Outcome::Loaded(Ok(tasks)));
        board
    }

    #[test]
    fn empty_collection_shows_empty_state() {
        let screen = render(&loaded(Vec::new()), &ViewState::default());

        assert!(screen.contains(TITLE));
        assert!(screen.contains(FORM_TITLE));
        assert!(screen.contains(LIST_TITLE));
        assert!(screen.contains(EMPTY_STATE));
        assert!(screen.contains("Task *"));
        assert!(screen.contains("What is your goal?"));
        assert!(screen.contains("Break Hours"));
        assert!(screen.contains("Add Todo"));
    }

    #[test]
    fn one_row_per_task_in_order() {
        let board = loaded(vec![
            task("1", "Alpha task"),
            task("2", "Bravo task"),
            task("3", "Charlie task"),
        ]);
        let screen = render(&board, &ViewState::default());

        assert!(!screen.contains(EMPTY_STATE));
        assert_eq!(screen.matches("Created: ").count(), 3);
        assert_eq!(screen.matches("[Delete]").count(), 3);

        let alpha = screen.find("Alpha task").unwrap();
        let bravo = screen.find("Bravo task").unwrap();
        let charlie = screen.find("Charlie task").unwrap();
        assert!(alpha < bravo && bravo < charlie);
    }

    #[test]
    fn optional_annotations_render_only_when_present() {
        let mut annotated = task("1", "Annotated");
        annotated.goal = "ship it".into();
        annotated.break_hours = "2 hours".into();
        annotated.completed = true;
        let screen = render(&loaded(vec![annotated, task("2", "Plain")]), &ViewState::default());

        assert_eq!(screen.matches("Goal: ").count(), 1);
        assert!(screen.contains("Goal: ship it"));
        assert_eq!(screen.matches("Break Hours: ").count(), 1);
        assert!(screen.contains("Break Hours: 2 hours"));
        assert!(screen.contains("[✓ Done]"));
        assert!(screen.contains("[Mark Done]"));
    }

    #[test]
    fn submit_label_tracks_submitting() {
        let mut board = loaded(Vec::new());
        board.draft_mut().task = "Buy milk".into();
        assert!(board.begin_create().is_some());

        let screen = render(&board, &ViewState::default());
        assert!(screen.contains("Adding..."));
        assert!(screen.contains("Buy milk"));
        assert!(!screen.contains("Add Todo"));
    }

    #[test]
    fn alert_is_drawn_over_the_board() {
        let mut board = loaded(Vec::new());
        board.notifier_mut().notify("Please enter a task!");

        let screen = render(&board, &ViewState::default());
        assert!(screen.contains("Please enter a task!"));
        assert!(screen.contains("Press any key to continue"));
    }

    #[test]
    fn unparseable_timestamp_is_shown_verbatim() {
        let mut odd = task("1", "Odd");
        odd.created_at = "sometime".into();
        assert_eq!(created_label(&odd), "sometime");
    }

    #[test]
    fn centered_popup_fits_very_wide_terminals() {
        let area = Rect {
            x: 0,
            y: 0,
            width: 4000,
            height: 60,
        };
        let popup = centered(50, 7, area);

        assert_eq!(popup.width, 2000);
        assert_eq!(popup.height, 7);
        assert_eq!(popup.x, 1000);
        assert_eq!(popup.y, 26);
    }

    #[test]
    fn focus_cycles_through_form_and_list() {
        let mut focus = Focus::Field(DraftField::Task);
        let mut seen = Vec::new();
        for _ in 0..5 {
            seen.push(focus);
            focus = focus.next();
        }
        assert_eq!(focus, Focus::Field(DraftField::Task));
        assert!(seen.contains(&Focus::Submit));
        assert!(seen.contains(&Focus::List));

        for expected in seen.iter().rev() {
            focus = focus.prev();
            assert_eq!(&focus, expected);
        }
    }
}
