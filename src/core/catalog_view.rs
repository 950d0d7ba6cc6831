//! Character grid state: keyboard cursor plus the one card (if any) that is
//! expanded into its detail panel.

use crate::catalog::CharacterId;
use crate::core::route::Route;

#[derive(Debug, Clone)]
pub struct CatalogView {
    ids: Vec<CharacterId>,
    columns: usize,
    cursor: usize,
    expanded: Option<CharacterId>,
}

impl CatalogView {
    pub fn new(ids: Vec<CharacterId>, columns: usize) -> Self {
        Self {
            ids,
            columns: columns.max(1),
            cursor: 0,
            expanded: None,
        }
    }

    pub fn expanded(&self) -> Option<CharacterId> {
        self.expanded
    }

    pub fn is_expanded(&self, id: CharacterId) -> bool {
        self.expanded == Some(id)
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn cursor_id(&self) -> Option<CharacterId> {
        self.ids.get(self.cursor).copied()
    }

    /// Expand `id`. Selecting the card that is already expanded collapses it.
    pub fn select(&mut self, id: CharacterId) {
        if self.expanded == Some(id) {
            self.expanded = None;
        } else {
            self.expanded = Some(id);
            if let Some(pos) = self.ids.iter().position(|candidate| *candidate == id) {
                self.cursor = pos;
            }
        }
    }

    pub fn select_cursor(&mut self) {
        if let Some(id) = self.cursor_id() {
            self.select(id);
        }
    }

    pub fn collapse(&mut self) {
        self.expanded = None;
    }

    /// Route to the chat screen for `id`. The id is not checked here; the chat
    /// session rejects ids the catalog does not contain.
    pub fn proceed_to_chat(&self, id: CharacterId) -> Route {
        Route::chat(id)
    }

    pub fn move_left(&mut self) {
        if !self.ids.is_empty() {
            self.cursor = if self.cursor == 0 {
                self.ids.len() - 1
            } else {
                self.cursor - 1
            };
        }
    }

    pub fn move_right(&mut self) {
        if !self.ids.is_empty() {
            self.cursor = (self.cursor + 1) % self.ids.len();
        }
    }

    pub fn move_up(&mut self) {
        if self.cursor >= self.columns {
            self.cursor -= self.columns;
        }
    }

    pub fn move_down(&mut self) {
        if self.cursor + self.columns < self.ids.len() {
            self.cursor += self.columns;
        }
    }
}
