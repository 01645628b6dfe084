//! Display mode definitions.

use std::fmt;

/// The active visual pattern or alert category.
///
/// `Fire` and `Panic` are alert modes: they are forced from outside and are
/// never rotated away automatically. The other three form the demo cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayMode {
    /// Fire alert - red flash.
    Fire,
    /// Panic alert - yellow flash.
    Panic,
    /// 64-bit Fibonacci counter.
    Fibonacci,
    /// WOPR random static.
    Wopr,
    /// Conway's Game of Life.
    Life,
}

impl DisplayMode {
    /// Every mode, in ordinal order.
    pub const ALL: [DisplayMode; 5] = [
        DisplayMode::Fire,
        DisplayMode::Panic,
        DisplayMode::Fibonacci,
        DisplayMode::Wopr,
        DisplayMode::Life,
    ];

    /// Whether this is an alert mode (Fire or Panic).
    pub fn is_alert(self) -> bool {
        matches!(self, DisplayMode::Fire | DisplayMode::Panic)
    }

    /// The next mode in the demo rotation, or `None` for alert modes.
    pub fn next_demo(self) -> Option<DisplayMode> {
        match self {
            DisplayMode::Fibonacci => Some(DisplayMode::Wopr),
            DisplayMode::Wopr => Some(DisplayMode::Life),
            DisplayMode::Life => Some(DisplayMode::Fibonacci),
            DisplayMode::Fire | DisplayMode::Panic => None,
        }
    }

    /// Position of the mode in [`DisplayMode::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DisplayMode::Fire => "fire",
            DisplayMode::Panic => "panic",
            DisplayMode::Fibonacci => "fibonacci",
            DisplayMode::Wopr => "wopr",
            DisplayMode::Life => "life",
        };
        f.write_str(name)
    }
}
