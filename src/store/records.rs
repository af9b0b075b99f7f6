//! Serialized shapes of the two data files. The on-disk field names are kept
//! stable (`due_date`, `borrowed_books`) so files written by earlier versions
//! of the tool keep loading; the identifier of each record is the JSON object
//! key rather than a field of the value.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::{Book, Member};

/// One entry of `books.json`, keyed by ISBN.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct BookRecord {
    pub(crate) title: String,
    pub(crate) author: String,
    #[serde(deserialize_with = "year_as_text")]
    pub(crate) year: String,
    pub(crate) available: bool,
    /// Absent (or null) for books on the shelf. `default` makes a missing
    /// field deserialize to `None` instead of failing the whole load.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) due_date: Option<DateTime<Utc>>,
}

impl BookRecord {
    pub(crate) fn from_book(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            year: book.year.clone(),
            available: book.available,
            due_date: book.due_date,
        }
    }

    pub(crate) fn into_book(self, isbn: String) -> Book {
        Book {
            isbn,
            title: self.title,
            author: self.author,
            year: self.year,
            available: self.available,
            due_date: self.due_date,
        }
    }
}

/// One entry of `members.json`, keyed by member id.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct MemberRecord {
    pub(crate) name: String,
    /// ISBNs currently out to this member, in borrow order. The field name
    /// matches the historical file format.
    pub(crate) borrowed_books: Vec<String>,
}

impl MemberRecord {
    pub(crate) fn from_member(member: &Member) -> Self {
        Self {
            name: member.name.clone(),
            borrowed_books: member.borrowed_isbns.clone(),
        }
    }

    pub(crate) fn into_member(self, member_id: String) -> Member {
        Member {
            member_id,
            name: self.name,
            borrowed_isbns: self.borrowed_books,
        }
    }
}

/// Accept the year both as a JSON string and as a bare number. Older files
/// store whatever the user typed, which sometimes was written as a number.
fn year_as_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    })
}
