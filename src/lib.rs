pub mod api;
pub mod cli;
pub mod logging;
pub mod search;
pub mod term;
pub mod tui;
