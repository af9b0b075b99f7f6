//! Flat-file persistence split across logical submodules. The catalog and the
//! member registry live in two independent JSON files that are rewritten in
//! full on every save.

mod files;
mod paths;
mod records;

pub use files::{load_library, load_library_from, save_library, save_library_to};
