// File: ./src/tui/state.rs
// Manages the application state for the TUI.
use crate::controller::{LogView, ViewController, ViewModel};
use crate::model::{Category, CategoryFilter};
use crate::snapshot::Snapshot;
use ratatui::widgets::ListState;
use rust_i18n::t;
use strum::{EnumIter, IntoEnumIterator};

#[derive(Debug, PartialEq, Eq, Clone, Copy, EnumIter)]
pub enum Tab {
    Logs,
    Banners,
    Standards,
}

impl Tab {
    pub fn title(&self) -> String {
        match self {
            Tab::Logs => t!("tab_logs").to_string(),
            Tab::Banners => t!("tab_banners").to_string(),
            Tab::Standards => t!("tab_standards").to_string(),
        }
    }

    pub fn next(self) -> Self {
        let tabs: Vec<Tab> = Tab::iter().collect();
        let i = tabs.iter().position(|t| *t == self).unwrap_or(0);
        tabs[(i + 1) % tabs.len()]
    }

    fn index(self) -> usize {
        Tab::iter().position(|t| t == self).unwrap_or(0)
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum InputMode {
    Normal,
    Searching,
    /// A popup is shown; the next key only dismisses it.
    Acknowledging,
}

pub struct AppState {
    pub controller: ViewController,

    // UI State
    pub tab: Tab,
    pub mode: InputMode,
    pub list_states: [ListState; 3],
    pub message: String,
    pub ack_message: Option<String>,
    pub loading: bool,

    // Input Buffer
    pub input_buffer: String,
    pub cursor_position: usize,
}

impl AppState {
    pub fn new(categories: Vec<Category>) -> Self {
        Self {
            controller: ViewController::new(Snapshot::empty(categories)),
            tab: Tab::Logs,
            mode: InputMode::Normal,
            list_states: Default::default(),
            message: t!("status_loading").to_string(),
            ack_message: None,
            loading: true,
            input_buffer: String::new(),
            cursor_position: 0,
        }
    }

    pub fn view(&self) -> &ViewModel {
        self.controller.view()
    }

    /// Installs a freshly loaded snapshot. The filter survives a reload.
    pub fn apply_snapshot(&mut self, snapshot: Snapshot) {
        self.controller.replace_snapshot(snapshot);
        self.loading = false;
        self.clamp_selections();
    }

    pub fn list_state(&mut self) -> &mut ListState {
        &mut self.list_states[self.tab.index()]
    }

    pub fn len_of(&self, tab: Tab) -> usize {
        let view = self.view();
        match tab {
            Tab::Logs => match &view.logs {
                LogView::Records(records) => records.len(),
                LogView::Unavailable => 0,
            },
            Tab::Banners => view.banners.len(),
            Tab::Standards => view.standards.len(),
        }
    }

    /// Link of the selected entry: the item URL, or the report of a log record.
    pub fn selected_link(&self) -> Option<String> {
        let i = self.list_states[self.tab.index()].selected()?;
        let view = self.view();
        match self.tab {
            Tab::Logs => match &view.logs {
                LogView::Records(records) => records.get(i)?.report.clone(),
                LogView::Unavailable => None,
            },
            Tab::Banners => view.banners.get(i).map(|it| it.url.clone()),
            Tab::Standards => view.standards.get(i).map(|it| it.url.clone()),
        }
    }

    pub fn next_tab(&mut self) {
        self.tab = self.tab.next();
    }

    pub fn next(&mut self) {
        let len = self.len_of(self.tab);
        if len == 0 {
            return;
        }
        let i = match self.list_state().selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.list_state().select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.len_of(self.tab);
        if len == 0 {
            return;
        }
        let i = match self.list_state().selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.list_state().select(Some(i));
    }

    /// Keeps every selection inside its (possibly shrunk) list.
    fn clamp_selections(&mut self) {
        for tab in Tab::iter() {
            let len = self.len_of(tab);
            let state = &mut self.list_states[tab.index()];
            state.select(match state.selected() {
                _ if len == 0 => None,
                Some(i) => Some(i.min(len - 1)),
                None => Some(0),
            });
        }
    }

    // --- Filter ---

    pub fn cycle_category(&mut self, forward: bool) {
        self.controller.cycle_category(forward);
        self.clamp_selections();
    }

    /// `0` selects all categories, `n` the n-th configured one.
    pub fn select_category_index(&mut self, n: usize) {
        let filter = match n {
            0 => CategoryFilter::All,
            n => match self.view().categories.get(n - 1) {
                Some(tag) => CategoryFilter::Only(tag.clone()),
                None => return,
            },
        };
        self.controller.set_category(filter);
        self.clamp_selections();
    }

    pub fn begin_search(&mut self) {
        self.mode = InputMode::Searching;
        self.input_buffer = self.controller.filter().query.clone();
        self.cursor_position = self.input_buffer.chars().count();
    }

    /// Keeps the typed query and leaves search mode.
    pub fn commit_search(&mut self) {
        self.mode = InputMode::Normal;
    }

    pub fn cancel_search(&mut self) {
        self.reset_input();
        self.apply_query();
        self.mode = InputMode::Normal;
    }

    fn apply_query(&mut self) {
        let query = self.input_buffer.clone();
        self.controller.set_query(&query);
        self.clamp_selections();
    }

    // --- Input Buffer ---

    pub fn move_cursor_left(&mut self) {
        let cursor_moved_left = self.cursor_position.saturating_sub(1);
        self.cursor_position = self.clamp_cursor(cursor_moved_left);
    }

    pub fn move_cursor_right(&mut self) {
        let cursor_moved_right = self.cursor_position.saturating_add(1);
        self.cursor_position = self.clamp_cursor(cursor_moved_right);
    }

    pub fn enter_char(&mut self, new_char: char) {
        let byte_index = self
            .input_buffer
            .char_indices()
            .map(|(i, _)| i)
            .nth(self.cursor_position)
            .unwrap_or(self.input_buffer.len());

        self.input_buffer.insert(byte_index, new_char);
        self.move_cursor_right();
        self.apply_query();
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position != 0 {
            let current_index = self.cursor_position;
            let before = self.input_buffer.chars().take(current_index - 1);
            let after = self.input_buffer.chars().skip(current_index);
            self.input_buffer = before.chain(after).collect();
            self.move_cursor_left();
            self.apply_query();
        }
    }

    pub fn reset_input(&mut self) {
        self.input_buffer.clear();
        self.cursor_position = 0;
    }

    fn clamp_cursor(&self, new_cursor_pos: usize) -> usize {
        new_cursor_pos.clamp(0, self.input_buffer.chars().count())
    }

    // --- Notices ---

    pub fn acknowledge(&mut self, message: String) {
        self.ack_message = Some(message);
        self.mode = InputMode::Acknowledging;
    }

    pub fn dismiss_acknowledgement(&mut self) {
        self.ack_message = None;
        self.mode = InputMode::Normal;
    }
}
