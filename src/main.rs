//! Binary entry point that glues the flat-file-backed lending core to the
//! TUI: load the persisted registries, hand the library to the application
//! state, and drive the Ratatui event loop until the user exits.
use library_lending_manager::{load_library, run_app, App};

/// Load persisted data and launch the event loop.
///
/// Returning a `Result` bubbles up fatal initialization problems (for example
/// an unreadable data directory) to the terminal instead of crashing
/// silently.
fn main() -> anyhow::Result<()> {
    let library = load_library()?;

    let mut app = App::new(library);
    run_app(&mut app)
}
