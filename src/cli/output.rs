//! Colored terminal output for upload runs

use std::io::{self, Write};
use termcolor::{Buffer, BufferWriter, Color, ColorChoice, ColorSpec, WriteColor};

/// Output manager for consistent colored terminal output.
///
/// Stdout write failures are logged instead of aborting the run.
#[derive(Debug)]
pub struct OutputManager {
    bufwtr: BufferWriter,
}

impl OutputManager {
    /// Create a new output manager writing to stdout
    pub fn new() -> Self {
        Self {
            bufwtr: BufferWriter::stdout(ColorChoice::Auto),
        }
    }

    fn emit(&self, fill: impl FnOnce(&mut Buffer) -> io::Result<()>) {
        let mut buffer = self.bufwtr.buffer();
        warn_on_failure(fill(&mut buffer).and_then(|()| self.bufwtr.print(&buffer)));
    }

    fn marked(&self, mark: &str, color: Color, message: &str) {
        self.emit(|buffer| {
            buffer.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
            write!(buffer, "{mark}")?;
            buffer.reset()?;
            writeln!(buffer, " {message}")
        });
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        self.marked("✓", Color::Green, message);
    }

    /// Print a progress message
    pub fn progress(&self, message: &str) {
        self.marked("⋯", Color::Magenta, message);
    }

    /// Print a warning message
    pub fn warn(&self, message: &str) {
        self.marked("⚠", Color::Yellow, message);
    }

    /// Print indented text (for sub-items)
    pub fn indent(&self, message: &str) {
        self.emit(|buffer| writeln!(buffer, "    {message}"));
    }

    /// Print an error message to stderr
    pub fn error(&self, message: &str) {
        let bufwtr = BufferWriter::stderr(ColorChoice::Auto);
        let mut buffer = bufwtr.buffer();

        if buffer.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true)).is_err()
            || write!(&mut buffer, "✗").is_err()
            || buffer.reset().is_err()
            || writeln!(&mut buffer, " {message}").is_err()
            || bufwtr.print(&buffer).is_err()
        {
            // Stderr failed - fallback to stdout as last resort
            println!("[STDERR ERROR] ✗ {message}");
        }
    }

    /// Print indented text to stderr (for sub-items of an error)
    pub fn error_indent(&self, message: &str) {
        eprintln!("    {message}");
    }
}

/// Log a failed stdout write; returns whether the write succeeded
fn warn_on_failure(result: io::Result<()>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            log::warn!("Failed to write to stdout: {e}");
            false
        }
    }
}
