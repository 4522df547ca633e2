//! ANSI color codes for terminal output.
//!
//! Semantic slots rather than hues:
//! - `name`: rule names and class names
//! - `literal`: terminal text and matched input
//! - `dim`: attribute codes, indices, structure
//! - `error` / `warning`: diagnostic severities

/// ANSI palette for CLI output.
///
/// Only standard 16-color codes, so it reads in both light and dark themes.
#[derive(Clone, Copy, Debug)]
pub struct Colors {
    pub name: &'static str,
    pub literal: &'static str,
    pub dim: &'static str,
    pub error: &'static str,
    pub warning: &'static str,
    pub reset: &'static str,
}

impl Default for Colors {
    fn default() -> Self {
        Self::OFF
    }
}

impl Colors {
    pub const ON: Self = Self {
        name: "\x1b[34m",
        literal: "\x1b[32m",
        dim: "\x1b[2m",
        error: "\x1b[1;31m",
        warning: "\x1b[1;33m",
        reset: "\x1b[0m",
    };

    pub const OFF: Self = Self {
        name: "",
        literal: "",
        dim: "",
        error: "",
        warning: "",
        reset: "",
    };

    pub fn new(enabled: bool) -> Self {
        if enabled { Self::ON } else { Self::OFF }
    }

    pub fn is_enabled(&self) -> bool {
        !self.reset.is_empty()
    }
}
