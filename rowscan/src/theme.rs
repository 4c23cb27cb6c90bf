//! Terminal styling shared by help text and status lines.

use colored::{Color, Colorize, control::ShouldColorize};
use once_cell::sync::Lazy;

/// Whether the environment allows colored output (`NO_COLOR`, `CLICOLOR`, tty).
pub static COLOR_SUPPORT: Lazy<bool> = Lazy::new(|| ShouldColorize::from_env().should_colorize());

/// Kind of status line printed by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Error,
    Warning,
    Info,
    Detail,
}

impl Status {
    pub fn icon(self) -> &'static str {
        match self {
            Status::Success => "✓",
            Status::Error => "✗",
            Status::Warning => "⚠",
            Status::Info => "ℹ",
            Status::Detail => "→",
        }
    }

    pub fn color(self) -> Color {
        match self {
            Status::Success => Color::Green,
            Status::Error => Color::Red,
            Status::Warning => Color::Yellow,
            Status::Info => Color::Blue,
            Status::Detail => Color::BrightBlack,
        }
    }

    /// `icon message`, colored unless `plain`.
    pub fn line(self, message: &str, plain: bool) -> String {
        if plain {
            format!("{} {message}", self.icon())
        } else {
            format!("{} {}", self.icon().color(self.color()), message.color(self.color()))
        }
    }
}

/// Colors of the help screen and its appendix.
pub mod help {
    use colored::Color;

    pub const USAGE: Color = Color::BrightBlue;
    pub const HEADER: Color = Color::Cyan;
    pub const LITERAL: Color = Color::Magenta;
    pub const PLACEHOLDER: Color = Color::BrightBlack;
    pub const ENV_KEY: Color = Color::BrightCyan;
}
