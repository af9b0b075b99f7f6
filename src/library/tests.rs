use chrono::{Duration, TimeZone, Utc};

use crate::library::{LendingError, Library, LOAN_PERIOD_DAYS, MAX_BORROW};
use crate::models::{Book, Member};

/// Helper to build a library with one book and one member.
fn setup_library() -> Library {
    let mut library = Library::new();
    library
        .add_book(Book::new("111", "Systems Programming", "John Smith", "1999"))
        .unwrap();
    library
        .register_member(Member::new("M1", "Alice"))
        .unwrap();
    library
}

/// A fixed, timezone-stable clock for the time-dependent tests.
fn fixed_now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

#[test]
fn add_book_rejects_duplicate_isbn() {
    let mut library = setup_library();
    let result = library.add_book(Book::new("111", "Other", "Other", "2000"));
    assert_eq!(result, Err(LendingError::DuplicateKey("111".to_string())));
    // The catalog keeps the original entry untouched.
    assert_eq!(library.books().len(), 1);
    assert_eq!(library.book("111").unwrap().title, "Systems Programming");
}

#[test]
fn register_member_rejects_duplicate_id() {
    let mut library = setup_library();
    let result = library.register_member(Member::new("M1", "Impostor"));
    assert_eq!(result, Err(LendingError::DuplicateKey("M1".to_string())));
    assert_eq!(library.members().len(), 1);
    assert_eq!(library.member("M1").unwrap().name, "Alice");
}

#[test]
fn new_books_are_always_available() {
    let mut library = Library::new();
    let mut book = Book::new("222", "Tampered", "Nobody", "2020");
    // Even if the caller pre-filled loan state, add_book resets it.
    book.available = false;
    book.due_date = Some(fixed_now());
    library.add_book(book).unwrap();

    let stored = library.book("222").unwrap();
    assert!(stored.available);
    assert!(stored.due_date.is_none());
}

#[test]
fn borrow_sets_due_date_and_loan_list_together() {
    let mut library = setup_library();
    let due = library.borrow_book_at(fixed_now(), "M1", "111").unwrap();

    assert_eq!(due, fixed_now() + Duration::days(LOAN_PERIOD_DAYS));
    let book = library.book("111").unwrap();
    assert!(!book.available);
    assert_eq!(book.due_date, Some(due));
    assert_eq!(library.member("M1").unwrap().borrowed_isbns, vec!["111"]);
}

#[test]
fn borrow_error_precedence_member_before_book() {
    // Neither the member nor the book exists; the member check must win.
    let mut library = Library::new();
    let result = library.borrow_book("ghost", "111");
    assert_eq!(
        result,
        Err(LendingError::MemberNotFound("ghost".to_string()))
    );
}

#[test]
fn borrow_error_precedence_book_before_limit() {
    let mut library = setup_library();
    // Fill the member up to the limit, then ask for a missing book. The
    // missing book must be reported before the limit.
    for idx in 0..MAX_BORROW {
        let isbn = format!("f{idx}");
        library
            .add_book(Book::new(isbn.clone(), "Filler", "Anon", "2001"))
            .unwrap();
        library.borrow_book("M1", &isbn).unwrap();
    }
    let result = library.borrow_book("M1", "missing");
    assert_eq!(
        result,
        Err(LendingError::BookNotFound("missing".to_string()))
    );
}

#[test]
fn borrow_error_precedence_limit_before_availability() {
    let mut library = setup_library();
    library.register_member(Member::new("M2", "Bob")).unwrap();
    // M2 takes the target book so it is unavailable.
    library.borrow_book("M2", "111").unwrap();
    // M1 reaches the limit with other books.
    for idx in 0..MAX_BORROW {
        let isbn = format!("f{idx}");
        library
            .add_book(Book::new(isbn.clone(), "Filler", "Anon", "2001"))
            .unwrap();
        library.borrow_book("M1", &isbn).unwrap();
    }
    // Both the limit and the availability check would fail; the limit wins.
    let result = library.borrow_book("M1", "111");
    assert_eq!(result, Err(LendingError::BorrowLimitReached));
}

#[test]
fn borrowing_an_unavailable_book_fails_and_changes_nothing() {
    let mut library = setup_library();
    library.register_member(Member::new("M2", "Bob")).unwrap();
    library.borrow_book("M1", "111").unwrap();

    let result = library.borrow_book("M2", "111");
    assert_eq!(
        result,
        Err(LendingError::BookUnavailable("111".to_string()))
    );
    // The loan still belongs to M1 and M2's list stayed empty.
    assert_eq!(library.member("M1").unwrap().borrowed_isbns, vec!["111"]);
    assert!(library.member("M2").unwrap().borrowed_isbns.is_empty());
    assert!(!library.book("111").unwrap().available);
}

#[test]
fn borrow_limit_clears_after_a_return() {
    let mut library = setup_library();
    for idx in 0..MAX_BORROW {
        let isbn = format!("f{idx}");
        library
            .add_book(Book::new(isbn.clone(), "Filler", "Anon", "2001"))
            .unwrap();
        library.borrow_book("M1", &isbn).unwrap();
    }

    // The sixth borrow trips the limit.
    assert_eq!(
        library.borrow_book("M1", "111"),
        Err(LendingError::BorrowLimitReached)
    );

    // Returning any one book frees a slot immediately.
    library.return_book("M1", "f0").unwrap();
    assert!(library.borrow_book("M1", "111").is_ok());
    assert_eq!(library.member("M1").unwrap().loan_count(), MAX_BORROW);
}

#[test]
fn return_reports_zero_when_on_time() {
    let mut library = setup_library();
    let now = fixed_now();
    library.borrow_book_at(now, "M1", "111").unwrap();

    // Well before the due date.
    let overdue = library
        .return_book_at(now + Duration::days(3), "M1", "111")
        .unwrap();
    assert_eq!(overdue, 0);
}

#[test]
fn return_reports_zero_exactly_on_the_due_date() {
    let mut library = setup_library();
    let now = fixed_now();
    let due = library.borrow_book_at(now, "M1", "111").unwrap();

    let overdue = library.return_book_at(due, "M1", "111").unwrap();
    assert_eq!(overdue, 0);
}

#[test]
fn return_reports_whole_overdue_days() {
    let mut library = setup_library();
    let now = fixed_now();
    library.borrow_book_at(now, "M1", "111").unwrap();

    // 20 days after a 14-day loan is 6 days late.
    let overdue = library
        .return_book_at(now + Duration::days(20), "M1", "111")
        .unwrap();
    assert_eq!(overdue, 6);
}

#[test]
fn return_floors_partial_days() {
    let mut library = setup_library();
    let now = fixed_now();
    library.borrow_book_at(now, "M1", "111").unwrap();

    // 15 days and 6 hours late counts as one whole day past a 14-day loan.
    let returned_at = now + Duration::days(LOAN_PERIOD_DAYS + 1) + Duration::hours(6);
    let overdue = library.return_book_at(returned_at, "M1", "111").unwrap();
    assert_eq!(overdue, 1);
}

#[test]
fn return_rejects_books_the_member_does_not_have() {
    let mut library = setup_library();
    library.register_member(Member::new("M2", "Bob")).unwrap();
    library.borrow_book("M1", "111").unwrap();

    // M2 exists and the book exists, but the loan belongs to M1.
    let result = library.return_book("M2", "111");
    assert_eq!(
        result,
        Err(LendingError::NotBorrowedByMember("111".to_string()))
    );
    assert!(!library.book("111").unwrap().available);
    assert_eq!(library.member("M1").unwrap().borrowed_isbns, vec!["111"]);
}

#[test]
fn availability_and_due_date_stay_in_lockstep() {
    let mut library = setup_library();
    library
        .add_book(Book::new("222", "Another", "Jane Doe", "2005"))
        .unwrap();
    library.register_member(Member::new("M2", "Bob")).unwrap();

    // An arbitrary borrow/return sequence, including failed calls.
    library.borrow_book("M1", "111").unwrap();
    library.borrow_book("M2", "222").unwrap();
    let _ = library.borrow_book("M1", "222");
    library.return_book("M2", "222").unwrap();
    let _ = library.return_book("M2", "222");
    library.borrow_book("M1", "222").unwrap();

    for book in library.books() {
        assert_eq!(
            book.available,
            book.due_date.is_none(),
            "book {} violates the availability/due-date invariant",
            book.isbn
        );
    }
}

#[test]
fn find_books_matches_title_author_and_exact_isbn() {
    let mut library = Library::new();
    library
        .add_book(Book::new("111", "Rust in Practice", "John Smith", "2021"))
        .unwrap();
    library
        .add_book(Book::new("222", "The Smithy", "Jane Doe", "2018"))
        .unwrap();

    // Case-insensitive on author and title.
    let by_author: Vec<_> = library
        .find_books("smith")
        .into_iter()
        .map(|book| book.isbn.clone())
        .collect();
    assert_eq!(by_author, vec!["111", "222"]);

    // Exact match on ISBN, no substring behavior.
    let by_isbn = library.find_books("222");
    assert_eq!(by_isbn.len(), 1);
    assert_eq!(by_isbn[0].title, "The Smithy");
    assert!(library.find_books("22").is_empty());

    // No match is an empty list, not an error.
    assert!(library.find_books("zebra").is_empty());
}

#[test]
fn find_books_keeps_insertion_order() {
    let mut library = Library::new();
    for (isbn, title) in [("c3", "Alpha"), ("a1", "Alpha"), ("b2", "Alpha")] {
        library
            .add_book(Book::new(isbn, title, "Someone", "2010"))
            .unwrap();
    }
    let isbns: Vec<_> = library
        .find_books("alpha")
        .into_iter()
        .map(|book| book.isbn.clone())
        .collect();
    assert_eq!(isbns, vec!["c3", "a1", "b2"]);
}

#[test]
fn end_to_end_borrow_and_return_cycle() {
    let mut library = Library::new();
    library
        .add_book(Book::new("111", "Systems Programming", "John Smith", "1999"))
        .unwrap();
    library
        .register_member(Member::new("M1", "Alice"))
        .unwrap();

    library.borrow_book("M1", "111").unwrap();
    let stats = library.statistics();
    assert_eq!((stats.total_books, stats.available_books), (1, 0));

    let overdue = library.return_book("M1", "111").unwrap();
    assert_eq!(overdue, 0);
    let stats = library.statistics();
    assert_eq!((stats.total_books, stats.available_books), (1, 1));
    assert!(library.member("M1").unwrap().borrowed_isbns.is_empty());
}
