//! Explorer navigation state.
//!
//! # Responsibility
//! - Keep the stack of open views and one cursor per view.
//! - Turn key presses into navigation and build the rows each view shows.
//!
//! # Invariants
//! - The categories view is the fixed root; only views above it are popped.
//! - A cursor never points past the last row of its view.

use crossterm::event::KeyCode;
use humane_core::HabitData;

/// One screen of the explorer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Categories,
    Habits { category: String },
    Entries { habit_id: String },
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Down,
    Up,
    Top,
    Bottom,
    Select,
    Back,
    Help,
    Quit,
}

/// Table row; `key` identifies what selecting the row opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub key: Option<String>,
    pub cells: [String; 3],
}

/// Everything a table view needs to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableModel {
    pub title: String,
    pub headers: [&'static str; 3],
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone)]
struct Screen {
    view: View,
    cursor: usize,
}

pub struct ExplorerApp<'a> {
    data: &'a HabitData,
    root: Screen,
    /// Views opened on top of the root, innermost last.
    stack: Vec<Screen>,
    should_quit: bool,
}

impl<'a> ExplorerApp<'a> {
    pub fn new(data: &'a HabitData) -> Self {
        Self {
            data,
            root: Screen {
                view: View::Categories,
                cursor: 0,
            },
            stack: Vec::new(),
            should_quit: false,
        }
    }

    pub fn view(&self) -> &View {
        &self.current().view
    }

    pub fn cursor(&self) -> usize {
        self.current().cursor
    }

    /// Number of open views, root included.
    pub fn depth(&self) -> usize {
        self.stack.len() + 1
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Maps a key to an action for the current view.
    pub fn action_for(&self, code: KeyCode) -> Option<Action> {
        if *self.view() == View::Help {
            return match code {
                KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => Some(Action::Back),
                _ => None,
            };
        }

        let is_root = self.depth() == 1;
        let can_select = !matches!(self.view(), View::Entries { .. });
        match code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::Down),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::Up),
            KeyCode::Char('g') | KeyCode::Home => Some(Action::Top),
            KeyCode::Char('G') | KeyCode::End => Some(Action::Bottom),
            KeyCode::Enter | KeyCode::Char('l') if can_select => Some(Action::Select),
            KeyCode::Char('h') | KeyCode::Esc if !is_root => Some(Action::Back),
            KeyCode::Char('?') => Some(Action::Help),
            KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        }
    }

    /// Handles one key press.
    pub fn handle_key(&mut self, code: KeyCode) {
        if let Some(action) = self.action_for(code) {
            self.apply(action);
        }
    }

    pub fn apply(&mut self, action: Action) {
        let row_count = self.table().map_or(0, |table| table.rows.len());
        match action {
            Action::Down => {
                let screen = self.current_mut();
                if screen.cursor + 1 < row_count {
                    screen.cursor += 1;
                }
            }
            Action::Up => {
                let screen = self.current_mut();
                screen.cursor = screen.cursor.saturating_sub(1);
            }
            Action::Top => self.current_mut().cursor = 0,
            Action::Bottom => self.current_mut().cursor = row_count.saturating_sub(1),
            Action::Select => {
                if let Some(view) = self.selected_target() {
                    self.push(view);
                }
            }
            Action::Back => {
                self.stack.pop();
            }
            Action::Help => self.push(View::Help),
            Action::Quit => self.should_quit = true,
        }
    }

    /// Rows of the current view; `None` for the help view.
    pub fn table(&self) -> Option<TableModel> {
        match self.view() {
            View::Categories => Some(self.categories_table()),
            View::Habits { category } => Some(self.habits_table(category)),
            View::Entries { habit_id } => Some(self.entries_table(habit_id)),
            View::Help => None,
        }
    }

    fn categories_table(&self) -> TableModel {
        let rows = self
            .data
            .category_stats()
            .into_iter()
            .map(|stat| TableRow {
                cells: [
                    capitalize(&stat.category),
                    stat.habit_count.to_string(),
                    stat.total_target.to_string(),
                ],
                key: Some(stat.category),
            })
            .collect();
        TableModel {
            title: "Categories".to_string(),
            headers: ["Category", "Habits", "Weekly Target"],
            rows,
        }
    }

    fn habits_table(&self, category: &str) -> TableModel {
        let mut habits = self.data.habits_in_category(category);
        habits.sort_by(|left, right| left.name().cmp(right.name()));
        let rows = habits
            .into_iter()
            .map(|habit| TableRow {
                key: Some(habit.id.clone()),
                cells: [
                    habit.name().to_string(),
                    habit.target_per_week().to_string(),
                    self.data.entry_count(&habit.id).to_string(),
                ],
            })
            .collect();
        TableModel {
            title: format!("Habits: {}", capitalize(category)),
            headers: ["Name", "Target/Week", "Entries"],
            rows,
        }
    }

    fn entries_table(&self, habit_id: &str) -> TableModel {
        let mut entries = self.data.entries_for_habit(habit_id);
        entries.sort_by(|left, right| right.date().cmp(left.date()));
        let mut rows: Vec<TableRow> = entries
            .into_iter()
            .map(|entry| TableRow {
                key: None,
                cells: [
                    entry.day().to_string(),
                    entry.value().to_string(),
                    entry.created_day().to_string(),
                ],
            })
            .collect();
        if rows.is_empty() {
            rows.push(TableRow {
                key: None,
                cells: ["No entries".to_string(), "-".to_string(), "-".to_string()],
            });
        }
        TableModel {
            title: format!("Entries: {}", self.data.habit_name(habit_id)),
            headers: ["Date", "Value", "Created At"],
            rows,
        }
    }

    fn selected_target(&self) -> Option<View> {
        let table = self.table()?;
        let key = table.rows.get(self.cursor())?.key.clone()?;
        match self.view() {
            View::Categories => Some(View::Habits { category: key }),
            View::Habits { .. } => Some(View::Entries { habit_id: key }),
            View::Entries { .. } | View::Help => None,
        }
    }

    fn push(&mut self, view: View) {
        self.stack.push(Screen { view, cursor: 0 });
    }

    fn current(&self) -> &Screen {
        self.stack.last().unwrap_or(&self.root)
    }

    fn current_mut(&mut self) -> &mut Screen {
        match self.stack.last_mut() {
            Some(screen) => screen,
            None => &mut self.root,
        }
    }
}

/// Upper-cases the first character and lower-cases the rest.
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
