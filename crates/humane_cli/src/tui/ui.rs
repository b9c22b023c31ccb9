//! Explorer rendering.

use super::app::{ExplorerApp, TableModel, View};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table, TableState};
use ratatui::Frame;

const APP_TITLE: &str = "Humane Tracker";
const APP_SUBTITLE: &str = "Habit Backup Explorer";

const HELP_TEXT: &str = "\
Navigation
  j / Down     Move down
  k / Up       Move up
  g            Go to top
  G            Go to bottom

Selection
  Enter / l    Select / Enter
  h / Esc      Go back

General
  ?            Show this help
  q            Quit

Screens
  Categories -> Habits -> Entries
  Navigate with h/l or Enter/Esc";

pub fn render(frame: &mut Frame, app: &ExplorerApp<'_>) {
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(APP_TITLE, Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" - "),
            Span::raw(APP_SUBTITLE),
        ])),
        header,
    );

    match app.table() {
        Some(table) => render_table(frame, body, &table, app.cursor()),
        None => render_help(frame, body),
    }

    frame.render_widget(
        Paragraph::new(footer_hint(app.view())).style(Style::default().fg(Color::DarkGray)),
        footer,
    );
}

fn render_table(frame: &mut Frame, area: Rect, model: &TableModel, cursor: usize) {
    let header =
        Row::new(model.headers.to_vec()).style(Style::default().add_modifier(Modifier::BOLD));
    let rows = model.rows.iter().enumerate().map(|(position, row)| {
        let stripe = if position % 2 == 1 {
            Style::default().bg(Color::Rgb(30, 30, 30))
        } else {
            Style::default()
        };
        Row::new(row.cells.to_vec()).style(stripe)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(50),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(
                model.title.clone(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
    )
    .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = TableState::default().with_selected(Some(cursor));
    frame.render_stateful_widget(table, area, &mut state);
}

fn render_help(frame: &mut Frame, area: Rect) {
    let help = Paragraph::new(HELP_TEXT).block(
        Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(
                "Keybindings",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
    );
    frame.render_widget(help, area);
}

fn footer_hint(view: &View) -> &'static str {
    match view {
        View::Categories => "Enter Select  ? Help  q Quit",
        View::Habits { .. } => "Enter Select  h Back  ? Help  q Quit",
        View::Entries { .. } => "h Back  g/G Top/Bottom  ? Help  q Quit",
        View::Help => "Esc Back",
    }
}

#[cfg(test)]
mod tests {
    use super::render;
    use crate::tui::app::ExplorerApp;
    use humane_core::{Habit, HabitData, Snapshot};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn categories_view_renders_title_and_rows() {
        let data = HabitData::new(Snapshot::new(
            vec![Habit::new("a", "Run").with_category("fitness").with_target(3)],
            Vec::new(),
        ));
        let app = ExplorerApp::new(&data);
        let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();
        terminal.draw(|frame| render(frame, &app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Humane Tracker"));
        assert!(text.contains("Categories"));
        assert!(text.contains("Fitness"));
    }
}
