//! Interactive terminal surface. The UI only collects field values and
//! renders outcomes; every action maps to exactly one operation on the
//! lending core.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
