use std::{fmt::Display, io::Write};

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Cargo-style status output on stderr: a right-aligned coloured label
/// followed by the message.
pub struct Shell {
    err: StandardStream,
}

impl Shell {
    pub fn new(choice: ColorChoice) -> Self {
        Shell {
            err: StandardStream::stderr(choice),
        }
    }

    pub fn status(&mut self, status: impl Display, message: impl Display) -> std::io::Result<()> {
        self.status_with_color(status, message, Color::Green)
    }

    pub fn status_with_color(
        &mut self,
        status: impl Display,
        message: impl Display,
        color: Color,
    ) -> std::io::Result<()> {
        self.print(&status, &message, color, true)
    }

    pub fn warn(&mut self, message: impl Display) -> std::io::Result<()> {
        self.print(&"warning", &message, Color::Yellow, false)
    }

    pub fn error(&mut self, message: impl Display) -> std::io::Result<()> {
        self.print(&"error", &message, Color::Red, false)
    }

    pub fn note(&mut self, message: impl Display) -> std::io::Result<()> {
        self.print(&"note", &message, Color::Cyan, false)
    }

    fn print(
        &mut self,
        status: &dyn Display,
        message: &dyn Display,
        color: Color,
        justified: bool,
    ) -> std::io::Result<()> {
        self.err
            .set_color(ColorSpec::new().set_bold(true).set_fg(Some(color)))?;
        if justified {
            write!(self.err, "{:>12}", status)?;
        } else {
            write!(self.err, "{}", status)?;
            self.err.set_color(ColorSpec::new().set_bold(true))?;
            write!(self.err, ":")?;
        }
        self.err.reset()?;
        writeln!(self.err, " {}", message)
    }
}
