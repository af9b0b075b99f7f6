//! The lending core: one `Library` aggregate owning the book catalog and the
//! member registry, plus the borrow/return transactions that tie them
//! together. Both halves of each transaction live inside a single method here
//! so the cross-entity bookkeeping (availability flag, due date, member loan
//! list) can never be half-applied: every check runs before the first
//! mutation.

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

use crate::models::{Book, Member};

/// Maximum number of books a member may have out at the same time.
pub const MAX_BORROW: usize = 5;

/// Length of a loan. The due date is the sole record of the loan's timing;
/// overdue status is derived from it lazily when the book comes back.
pub const LOAN_PERIOD_DAYS: i64 = 14;

/// Everything that can go wrong inside the lending core. All variants are
/// recoverable by the caller picking different input; a failed call leaves
/// the library exactly as it was.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LendingError {
    /// An add/register used an identifier that is already taken.
    #[error("'{0}' already exists")]
    DuplicateKey(String),
    /// The member id does not match any registered member.
    #[error("member '{0}' not found")]
    MemberNotFound(String),
    /// The ISBN does not match any catalogued book.
    #[error("book '{0}' not found")]
    BookNotFound(String),
    /// The member already has `MAX_BORROW` books out.
    #[error("borrow limit reached (max {MAX_BORROW} books)")]
    BorrowLimitReached,
    /// The book is currently lent to someone.
    #[error("book '{0}' is not available")]
    BookUnavailable(String),
    /// A return named a book the member does not have out.
    #[error("book '{0}' is not borrowed by this member")]
    NotBorrowedByMember(String),
}

/// Shortcut for results produced by the lending core.
pub type LendingResult<T> = Result<T, LendingError>;

/// Counts reported by the statistics view. Computed with a full scan on
/// demand; nothing keeps an incremental tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LibraryStats {
    pub total_books: usize,
    pub available_books: usize,
}

/// The whole lending state: catalog plus membership registry. Books and
/// members are kept in insertion order, which is also the order search
/// results and the UI lists use. There is deliberately no way to delete
/// either kind of record.
#[derive(Debug, Default)]
pub struct Library {
    books: Vec<Book>,
    members: Vec<Member>,
}

impl Library {
    /// Create an empty library. Startup normally goes through
    /// `store::load_library` instead, which feeds `from_parts`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a library from already-validated collections, used by the
    /// persistence layer after reading the data files.
    pub(crate) fn from_parts(books: Vec<Book>, members: Vec<Member>) -> Self {
        Self { books, members }
    }

    /// Catalog contents in insertion order.
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// Registered members in insertion order.
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Look up a single book by exact ISBN.
    pub fn book(&self, isbn: &str) -> Option<&Book> {
        self.books.iter().find(|book| book.isbn == isbn)
    }

    /// Look up a single member by exact id.
    pub fn member(&self, member_id: &str) -> Option<&Member> {
        self.members.iter().find(|member| member.member_id == member_id)
    }

    /// Add a book to the catalog. New books always arrive available and with
    /// no due date, regardless of what the caller put in those fields.
    pub fn add_book(&mut self, mut book: Book) -> LendingResult<()> {
        if self.book(&book.isbn).is_some() {
            return Err(LendingError::DuplicateKey(book.isbn));
        }
        book.available = true;
        book.due_date = None;
        self.books.push(book);
        Ok(())
    }

    /// Register a member. New members always start with an empty loan list.
    pub fn register_member(&mut self, mut member: Member) -> LendingResult<()> {
        if self.member(&member.member_id).is_some() {
            return Err(LendingError::DuplicateKey(member.member_id));
        }
        member.borrowed_isbns.clear();
        self.members.push(member);
        Ok(())
    }

    /// Keyword search over the catalog: case-insensitive substring match on
    /// title and author, exact match on ISBN. Results come back in catalog
    /// order; finding nothing is an empty list, not an error.
    pub fn find_books(&self, keyword: &str) -> Vec<&Book> {
        let needle = keyword.to_lowercase();
        self.books
            .iter()
            .filter(|book| {
                book.title.to_lowercase().contains(&needle)
                    || book.author.to_lowercase().contains(&needle)
                    || book.isbn == keyword
            })
            .collect()
    }

    /// Count the catalog and its available portion.
    pub fn statistics(&self) -> LibraryStats {
        LibraryStats {
            total_books: self.books.len(),
            available_books: self.books.iter().filter(|book| book.available).count(),
        }
    }

    /// Lend a book to a member, due back in `LOAN_PERIOD_DAYS`. Returns the
    /// due date so the caller can show it.
    pub fn borrow_book(&mut self, member_id: &str, isbn: &str) -> LendingResult<DateTime<Utc>> {
        self.borrow_book_at(Utc::now(), member_id, isbn)
    }

    /// Borrow with an explicit clock. The checks run in a fixed order so the
    /// reported error is reproducible: member existence, book existence,
    /// borrow limit, availability. Only once all of them pass do the member
    /// list and the book change, together.
    pub(crate) fn borrow_book_at(
        &mut self,
        now: DateTime<Utc>,
        member_id: &str,
        isbn: &str,
    ) -> LendingResult<DateTime<Utc>> {
        let member_idx = self
            .member_index(member_id)
            .ok_or_else(|| LendingError::MemberNotFound(member_id.to_string()))?;
        let book_idx = self
            .book_index(isbn)
            .ok_or_else(|| LendingError::BookNotFound(isbn.to_string()))?;

        if self.members[member_idx].borrowed_isbns.len() >= MAX_BORROW {
            return Err(LendingError::BorrowLimitReached);
        }
        if !self.books[book_idx].available {
            return Err(LendingError::BookUnavailable(isbn.to_string()));
        }

        let due = now + Duration::days(LOAN_PERIOD_DAYS);
        self.members[member_idx].borrowed_isbns.push(isbn.to_string());
        self.books[book_idx].check_out(due);
        Ok(due)
    }

    /// Take a book back from a member, reporting how many whole days overdue
    /// it was (zero when returned on time). Nothing is recorded about the
    /// overdue count; it is purely informational.
    pub fn return_book(&mut self, member_id: &str, isbn: &str) -> LendingResult<i64> {
        self.return_book_at(Utc::now(), member_id, isbn)
    }

    /// Return with an explicit clock. Checks mirror `borrow_book_at`: member
    /// existence, book existence, then membership of the loan list.
    pub(crate) fn return_book_at(
        &mut self,
        now: DateTime<Utc>,
        member_id: &str,
        isbn: &str,
    ) -> LendingResult<i64> {
        let member_idx = self
            .member_index(member_id)
            .ok_or_else(|| LendingError::MemberNotFound(member_id.to_string()))?;
        let book_idx = self
            .book_index(isbn)
            .ok_or_else(|| LendingError::BookNotFound(isbn.to_string()))?;

        let loan_idx = self.members[member_idx]
            .borrowed_isbns
            .iter()
            .position(|borrowed| borrowed == isbn)
            .ok_or_else(|| LendingError::NotBorrowedByMember(isbn.to_string()))?;

        let overdue_days = match self.books[book_idx].due_date {
            Some(due) if now > due => (now - due).num_days().max(0),
            _ => 0,
        };

        self.members[member_idx].borrowed_isbns.remove(loan_idx);
        self.books[book_idx].put_back();
        Ok(overdue_days)
    }

    fn book_index(&self, isbn: &str) -> Option<usize> {
        self.books.iter().position(|book| book.isbn == isbn)
    }

    fn member_index(&self, member_id: &str) -> Option<usize> {
        self.members.iter().position(|member| member.member_id == member_id)
    }
}

#[cfg(test)]
mod tests;
