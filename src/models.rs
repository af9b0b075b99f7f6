//! Domain models shared by the lending core, the persistence layer, and the
//! TUI. The intent is that these types stay light-weight data holders so other
//! layers can focus on presentation and persistence logic; every mutation that
//! touches the loan bookkeeping goes through `Library` instead of these types
//! directly.

use std::fmt;

use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
/// A catalogued book. The ISBN acts as the stable identifier; title, author,
/// and year are fixed at creation time and never edited afterwards.
pub struct Book {
    /// Unique identifier used by every lookup and by the loan lists.
    pub isbn: String,
    /// Title displayed in lists and matched by keyword search.
    pub title: String,
    /// Author field used both for display and for keyword search.
    pub author: String,
    /// Publication year kept as raw text. The original data accepts anything
    /// here, so we preserve whatever the user typed instead of forcing a
    /// number.
    pub year: String,
    /// Whether the book is currently on the shelf. Kept in sync with
    /// `due_date` by the borrow/return transactions: `available == false`
    /// exactly when `due_date` is set.
    pub available: bool,
    /// Due date of the active loan, present only while the book is out.
    pub due_date: Option<DateTime<Utc>>,
}

impl Book {
    /// Create a book that is on the shelf and not due back from anyone.
    pub fn new(
        isbn: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        year: impl Into<String>,
    ) -> Self {
        Self {
            isbn: isbn.into(),
            title: title.into(),
            author: author.into(),
            year: year.into(),
            available: true,
            due_date: None,
        }
    }

    /// Mark the book as lent out until `due`. Called only from the borrow
    /// transaction so the availability flag and due date change together.
    pub(crate) fn check_out(&mut self, due: DateTime<Utc>) {
        self.available = false;
        self.due_date = Some(due);
    }

    /// Put the book back on the shelf, clearing the due date.
    pub(crate) fn put_back(&mut self) {
        self.available = true;
        self.due_date = None;
    }

    /// Short status text used by lists and search results.
    pub fn status_label(&self) -> String {
        match self.due_date {
            Some(due) => format!("Due on {}", due.format("%Y-%m-%d")),
            None => "Available".to_string(),
        }
    }
}

impl fmt::Display for Book {
    /// Render the `Title | Author | ISBN: x | status` line the search results
    /// show. Display is implemented so the type plays nicely with widgets that
    /// consume strings implicitly.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | ISBN: {} | {}",
            self.title,
            self.author,
            self.isbn,
            self.status_label()
        )
    }
}

#[derive(Debug, Clone)]
/// A registered library member together with the ISBNs currently lent to
/// them. The list is ordered by borrow time and never contains duplicates.
pub struct Member {
    /// Unique identifier handed out at registration.
    pub member_id: String,
    /// Display name.
    pub name: String,
    /// ISBNs of the books this member currently has out, oldest first. Grows
    /// and shrinks only through the borrow/return transactions on `Library`.
    pub borrowed_isbns: Vec<String>,
}

impl Member {
    /// Create a member with no active loans.
    pub fn new(member_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            member_id: member_id.into(),
            name: name.into(),
            borrowed_isbns: Vec::new(),
        }
    }

    /// Number of books the member currently has out.
    pub fn loan_count(&self) -> usize {
        self.borrowed_isbns.len()
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (ID: {}) | Borrowed: {}",
            self.name,
            self.member_id,
            self.loan_count()
        )
    }
}
