//! Full-screen alert flash.

use super::Pattern;
use crate::color::Color;
use crate::error::MatrixError;
use crate::surface::DisplaySurface;

/// Blinks the whole grid: one frame filled with the color, the next blank.
#[derive(Debug, Clone)]
pub struct Flash {
    color: Color,
    lit: bool,
}

impl Flash {
    /// Create a flash in the given 2-bit color.
    ///
    /// # Errors
    /// Returns [`MatrixError::InvalidColor`] if `color` > 3.
    pub fn new(color: u8) -> Result<Self, MatrixError> {
        Ok(Self::with_color(Color::try_from(color)?))
    }

    /// Create a flash in an already validated color.
    pub fn with_color(color: Color) -> Self {
        Self { color, lit: false }
    }

    /// Change the flash color. The current color is kept on error.
    ///
    /// # Errors
    /// Returns [`MatrixError::InvalidColor`] if `color` > 3.
    pub fn set_color(&mut self, color: u8) -> Result<(), MatrixError> {
        self.color = Color::try_from(color)?;
        Ok(())
    }

    /// The flash color.
    pub fn color(&self) -> Color {
        self.color
    }
}

impl Pattern for Flash {
    fn name(&self) -> &'static str {
        "flash"
    }

    fn reset(&mut self) {
        self.lit = false;
    }

    fn update(&mut self, surface: &mut dyn DisplaySurface) -> Result<(), MatrixError> {
        let color = if self.lit { Color::Off } else { self.color };
        surface.fill(color)?;
        self.lit = !self.lit;
        Ok(())
    }
}
