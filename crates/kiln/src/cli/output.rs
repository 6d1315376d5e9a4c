// File: src/cli/output.rs
// Purpose: Terminal output sink used by CLI helpers

use std::io::{self, Write};

/// Where CLI helpers write to
pub trait Output {
    fn write(&mut self, text: &str) -> io::Result<()>;

    /// Clears the current line and the `lines - 1` lines above it
    fn clear_lines(&mut self, lines: usize) -> io::Result<()>;
}

/// Writes to stdout, flushing after every write so partial lines show up
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutOutput;

impl StdoutOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Output for StdoutOutput {
    fn write(&mut self, text: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()
    }

    fn clear_lines(&mut self, lines: usize) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        for line in 0..lines {
            if line > 0 {
                // cursor to the start of the previous line
                stdout.write_all(b"\x1b[F")?;
            }
            stdout.write_all(b"\r\x1b[K")?;
        }
        stdout.flush()
    }
}
