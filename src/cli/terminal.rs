//! Colouring of verdicts for the terminal.

use owo_colors::{colors::css, OwoColorize};

/// Detects whether stdout renders colours.
pub fn supports_color() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

/// Applies `style` to `text` only when `enabled`.
fn paint(text: &str, enabled: bool, style: impl FnOnce(&str) -> String) -> String {
    if enabled {
        style(text)
    } else {
        text.to_string()
    }
}

/// Extension trait for colouring verdicts.
pub trait Colorize {
    /// Accepted declarations (green).
    fn success(&self) -> String;
    /// Rejections (red).
    fn failure(&self) -> String;
    /// Skipped files (amber).
    fn warning(&self) -> String;
    /// Secondary detail.
    fn dim(&self) -> String;
}

impl Colorize for str {
    fn success(&self) -> String {
        paint(self, supports_color(), |s| s.fg::<css::Green>().to_string())
    }

    fn failure(&self) -> String {
        paint(self, supports_color(), |s| s.fg::<css::Red>().to_string())
    }

    fn warning(&self) -> String {
        paint(self, supports_color(), |s| s.fg::<css::Orange>().to_string())
    }

    fn dim(&self) -> String {
        paint(self, supports_color(), |s| s.dimmed().to_string())
    }
}

impl Colorize for String {
    fn success(&self) -> String {
        self.as_str().success()
    }

    fn failure(&self) -> String {
        self.as_str().failure()
    }

    fn warning(&self) -> String {
        self.as_str().warning()
    }

    fn dim(&self) -> String {
        self.as_str().dim()
    }
}
