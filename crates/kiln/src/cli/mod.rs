// File: src/cli/mod.rs
// Purpose: Terminal helpers for command line tools

pub mod output;
pub mod progress_bar;

pub use output::{Output, StdoutOutput};
pub use progress_bar::ProgressBar;
