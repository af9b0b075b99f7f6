//! Core library surface for the Library Lending Manager TUI application.
//!
//! The public modules exposed here provide an intentionally small API so the
//! `bin` target as well as potential external tooling can reuse the same
//! pieces: the lending core, the flat-file persistence layer, and the
//! interactive front end.
pub mod library;
pub mod models;
pub mod store;
pub mod ui;

/// The lending core: the owned aggregate, its error taxonomy, and the lending
/// limits.
pub use library::{LendingError, LendingResult, Library, LibraryStats, LOAN_PERIOD_DAYS, MAX_BORROW};

/// The two primary domain types that other layers manipulate.
pub use models::{Book, Member};

/// Convenience re-exports for the persistence layer. These functions are
/// typically used by `main.rs` to hydrate the library at startup and write it
/// back on exit.
pub use store::{load_library, save_library};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
