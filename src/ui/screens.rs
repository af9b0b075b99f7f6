use crate::models::{Book, Member};

/// Snapshot of the catalog shown by the main screen. The rows are cloned out
/// of the library (optionally narrowed by an active search) so rendering
/// never borrows the aggregate while a transaction might be mutating it.
pub(crate) struct CatalogScreen {
    pub(crate) rows: Vec<Book>,
    /// The committed search query, kept for the header and so refreshes can
    /// re-apply it after a mutation.
    pub(crate) filter: Option<String>,
    pub(crate) selected: usize,
}

impl CatalogScreen {
    pub(crate) fn new(rows: Vec<Book>) -> Self {
        Self {
            rows,
            filter: None,
            selected: 0,
        }
    }

    /// Replace the rows after a mutation or a filter change.
    pub(crate) fn set_rows(&mut self, rows: Vec<Book>) {
        self.rows = rows;
        self.ensure_in_bounds();
    }

    pub(crate) fn current_book(&self) -> Option<&Book> {
        self.rows.get(self.selected)
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        if self.rows.is_empty() {
            return;
        }
        let len = self.rows.len() as isize;
        let mut new = self.selected as isize + offset;
        if new < 0 {
            new = 0;
        }
        if new >= len {
            new = len - 1;
        }
        self.selected = new as usize;
    }

    pub(crate) fn select_first(&mut self) {
        if !self.rows.is_empty() {
            self.selected = 0;
        }
    }

    pub(crate) fn select_last(&mut self) {
        if !self.rows.is_empty() {
            self.selected = self.rows.len() - 1;
        }
    }

    pub(crate) fn ensure_in_bounds(&mut self) {
        if self.rows.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.rows.len() {
            self.selected = self.rows.len() - 1;
        }
    }
}

/// Snapshot of the member registry shown by the members screen.
pub(crate) struct MemberScreen {
    pub(crate) rows: Vec<Member>,
    pub(crate) selected: usize,
}

impl MemberScreen {
    pub(crate) fn new(rows: Vec<Member>) -> Self {
        Self { rows, selected: 0 }
    }

    pub(crate) fn set_rows(&mut self, rows: Vec<Member>) {
        self.rows = rows;
        self.ensure_in_bounds();
    }

    pub(crate) fn current_member(&self) -> Option<&Member> {
        self.rows.get(self.selected)
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        if self.rows.is_empty() {
            return;
        }
        let len = self.rows.len() as isize;
        let mut new = self.selected as isize + offset;
        if new < 0 {
            new = 0;
        }
        if new >= len {
            new = len - 1;
        }
        self.selected = new as usize;
    }

    pub(crate) fn select_first(&mut self) {
        if !self.rows.is_empty() {
            self.selected = 0;
        }
    }

    pub(crate) fn select_last(&mut self) {
        if !self.rows.is_empty() {
            self.selected = self.rows.len() - 1;
        }
    }

    pub(crate) fn ensure_in_bounds(&mut self) {
        if self.rows.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.rows.len() {
            self.selected = self.rows.len() - 1;
        }
    }
}
