//! Reading and writing the two data files. Loading tolerates a fresh
//! installation (no directory, no files) by starting from an empty library;
//! saving always rewrites both files wholesale, so calling it repeatedly is
//! harmless.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::library::Library;
use crate::models::{Book, Member};

use super::paths::data_dir;
use super::records::{BookRecord, MemberRecord};

/// File holding the catalog, keyed by ISBN.
const BOOKS_FILE_NAME: &str = "books.json";
/// File holding the member registry, keyed by member id.
const MEMBERS_FILE_NAME: &str = "members.json";

/// Load the library from the per-user data directory.
pub fn load_library() -> Result<Library> {
    load_library_from(&data_dir()?)
}

/// Save the library to the per-user data directory.
pub fn save_library(library: &Library) -> Result<()> {
    save_library_to(&data_dir()?, library)
}

/// Load both registries from `dir`. Missing files mean the tool has not been
/// run before and yield an empty registry rather than an error.
pub fn load_library_from(dir: &Path) -> Result<Library> {
    let books = read_books(&dir.join(BOOKS_FILE_NAME))?;
    let members = read_members(&dir.join(MEMBERS_FILE_NAME))?;
    Ok(Library::from_parts(books, members))
}

/// Serialize both registries in full, overwriting whatever was there.
pub fn save_library_to(dir: &Path, library: &Library) -> Result<()> {
    fs::create_dir_all(dir).context("failed to create data directory")?;

    let books: BTreeMap<&str, BookRecord> = library
        .books()
        .iter()
        .map(|book| (book.isbn.as_str(), BookRecord::from_book(book)))
        .collect();
    let payload =
        serde_json::to_string_pretty(&books).context("failed to serialize the catalog")?;
    fs::write(dir.join(BOOKS_FILE_NAME), payload).context("failed to write books file")?;

    let members: BTreeMap<&str, MemberRecord> = library
        .members()
        .iter()
        .map(|member| (member.member_id.as_str(), MemberRecord::from_member(member)))
        .collect();
    let payload =
        serde_json::to_string_pretty(&members).context("failed to serialize the member registry")?;
    fs::write(dir.join(MEMBERS_FILE_NAME), payload).context("failed to write members file")?;

    Ok(())
}

fn read_books(path: &Path) -> Result<Vec<Book>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let raw = fs::read_to_string(path).context("failed to read books file")?;
    let records: BTreeMap<String, BookRecord> =
        serde_json::from_str(&raw).context("failed to parse books file")?;
    Ok(records
        .into_iter()
        .map(|(isbn, record)| record.into_book(isbn))
        .collect())
}

fn read_members(path: &Path) -> Result<Vec<Member>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let raw = fs::read_to_string(path).context("failed to read members file")?;
    let records: BTreeMap<String, MemberRecord> =
        serde_json::from_str(&raw).context("failed to parse members file")?;
    Ok(records
        .into_iter()
        .map(|(member_id, record)| record.into_member(member_id))
        .collect())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use chrono::{TimeZone, Utc};
    use tempfile::tempdir;

    use crate::library::Library;
    use crate::models::{Book, Member};

    use super::{load_library_from, save_library_to, BOOKS_FILE_NAME, MEMBERS_FILE_NAME};

    #[test]
    fn loading_a_fresh_directory_yields_an_empty_library() {
        let dir = tempdir().unwrap();
        let library = load_library_from(dir.path()).unwrap();
        assert!(library.books().is_empty());
        assert!(library.members().is_empty());
    }

    #[test]
    fn save_then_load_round_trips_loan_state() {
        let dir = tempdir().unwrap();
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();

        let mut library = Library::new();
        library
            .add_book(Book::new("111", "Systems Programming", "John Smith", "1999"))
            .unwrap();
        library
            .add_book(Book::new("222", "The Smithy", "Jane Doe", "2018"))
            .unwrap();
        library.register_member(Member::new("M1", "Alice")).unwrap();
        let due = library.borrow_book_at(now, "M1", "111").unwrap();

        save_library_to(dir.path(), &library).unwrap();
        let loaded = load_library_from(dir.path()).unwrap();

        let book = loaded.book("111").unwrap();
        assert!(!book.available);
        assert_eq!(book.due_date, Some(due));
        assert_eq!(book.year, "1999");
        assert!(loaded.book("222").unwrap().available);
        assert_eq!(loaded.member("M1").unwrap().borrowed_isbns, vec!["111"]);
    }

    #[test]
    fn saving_twice_overwrites_instead_of_appending() {
        let dir = tempdir().unwrap();
        let mut library = Library::new();
        library
            .add_book(Book::new("111", "Once", "Someone", "2000"))
            .unwrap();
        save_library_to(dir.path(), &library).unwrap();
        save_library_to(dir.path(), &library).unwrap();

        let loaded = load_library_from(dir.path()).unwrap();
        assert_eq!(loaded.books().len(), 1);
    }

    #[test]
    fn missing_due_date_field_loads_as_none() {
        let dir = tempdir().unwrap();
        // A hand-written file in the historical shape: no due_date key at
        // all, and the year stored as a bare number.
        fs::write(
            dir.path().join(BOOKS_FILE_NAME),
            r#"{ "111": { "title": "Old", "author": "Anon", "year": 1987, "available": true } }"#,
        )
        .unwrap();
        fs::write(
            dir.path().join(MEMBERS_FILE_NAME),
            r#"{ "M1": { "name": "Alice", "borrowed_books": [] } }"#,
        )
        .unwrap();

        let loaded = load_library_from(dir.path()).unwrap();
        let book = loaded.book("111").unwrap();
        assert!(book.available);
        assert!(book.due_date.is_none());
        assert_eq!(book.year, "1987");
        assert_eq!(loaded.member("M1").unwrap().name, "Alice");
    }

    #[test]
    fn null_due_date_loads_as_none() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(BOOKS_FILE_NAME),
            r#"{ "111": { "title": "Old", "author": "Anon", "year": "1987", "available": true, "due_date": null } }"#,
        )
        .unwrap();

        let loaded = load_library_from(dir.path()).unwrap();
        assert!(loaded.book("111").unwrap().due_date.is_none());
    }
}
