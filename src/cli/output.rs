//! Operator-facing terminal output.
//!
//! Diagnostics go through `log`; this is for the section headers, warnings and
//! final report a person running the driver reads. Writing to the terminal is
//! best-effort: a closed stdout never fails a run whose work already succeeded.

use std::io::{self, IsTerminal, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Colored output to stdout, warnings to stderr.
#[derive(Debug, Clone)]
pub struct OutputManager {
    quiet: bool,
    stdout_color: ColorChoice,
    stderr_color: ColorChoice,
}

fn color_choice(is_terminal: bool) -> ColorChoice {
    if is_terminal {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

impl OutputManager {
    /// Output manager; `quiet` suppresses everything but warnings.
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            stdout_color: color_choice(io::stdout().is_terminal()),
            stderr_color: color_choice(io::stderr().is_terminal()),
        }
    }

    fn write_line(stream: &mut StandardStream, spec: &ColorSpec, prefix: &str, message: &str) -> io::Result<()> {
        stream.set_color(spec)?;
        write!(stream, "{prefix}")?;
        stream.reset()?;
        writeln!(stream, "{message}")?;
        stream.flush()
    }

    fn stdout(&self, spec: &ColorSpec, prefix: &str, message: &str) {
        if self.quiet {
            return;
        }
        let mut stream = StandardStream::stdout(self.stdout_color);
        if let Err(e) = Self::write_line(&mut stream, spec, prefix, message) {
            log::debug!("Failed to write to stdout: {e}");
        }
    }

    /// Print a section header.
    pub fn section(&self, title: &str) {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Cyan)).set_bold(true);
        self.stdout(&spec, "==> ", title);
    }

    /// Print an indented detail line.
    pub fn indent(&self, message: &str) {
        self.stdout(&ColorSpec::new(), "    ", message);
    }

    /// Print a success line.
    pub fn success(&self, message: &str) {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Green)).set_bold(true);
        self.stdout(&spec, "==> ", message);
    }

    /// Print a warning to stderr, even when quiet.
    pub fn warn(&self, message: &str) {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Yellow)).set_bold(true);
        let mut stream = StandardStream::stderr(self.stderr_color);
        if let Err(e) = Self::write_line(&mut stream, &spec, "warning: ", message) {
            log::debug!("Failed to write to stderr: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_only_on_terminals() {
        assert_eq!(color_choice(true), ColorChoice::Auto);
        assert_eq!(color_choice(false), ColorChoice::Never);
    }

    #[test]
    fn quiet_output_never_fails() {
        let output = OutputManager::new(true);
        output.section("Generating installer");
        output.success("Generated package file: setup.exe");
        output.indent("size: 9 bytes");
    }
}
