//! Fibonacci series shown as a 64-bit image.

use super::Pattern;
use crate::color::Color;
use crate::error::MatrixError;
use crate::surface::{DisplaySurface, GRID_SIZE};

/// Largest Fibonacci number that fits in a signed 64-bit integer.
pub const LARGEST_64_BIT_FIBONACCI: u64 = 7_540_113_804_746_346_429;

const SEED: (u64, u64) = (1, 2);

/// Displays successive Fibonacci numbers, one byte per column.
///
/// Bit `y` of byte `x` lights cell (x, y).
#[derive(Debug, Clone)]
pub struct Fibonacci {
    previous: u64,
    current: u64,
}

impl Fibonacci {
    /// Create a generator at the start of the series (1, 1, 2).
    pub fn new() -> Self {
        let (previous, current) = SEED;
        Self { previous, current }
    }

    /// The value the next update will display.
    pub fn value(&self) -> u64 {
        self.current
    }

    fn advance(&mut self) {
        match self.previous.checked_add(self.current) {
            Some(next) if next <= LARGEST_64_BIT_FIBONACCI => {
                self.previous = self.current;
                self.current = next;
            }
            _ => *self = Self::new(),
        }
    }
}

impl Default for Fibonacci {
    fn default() -> Self {
        Self::new()
    }
}

impl Pattern for Fibonacci {
    fn name(&self) -> &'static str {
        "fibonacci"
    }

    fn reset(&mut self) {
        *self = Self::new();
    }

    fn update(&mut self, surface: &mut dyn DisplaySurface) -> Result<(), MatrixError> {
        surface.fill(Color::Off)?;
        for y in 0..GRID_SIZE {
            for x in 0..GRID_SIZE {
                let byte = self.current >> (8 * u32::from(x));
                if byte & (1 << y) != 0 {
                    surface.set(x, y, Color::Red)?;
                }
            }
        }
        self.advance();
        Ok(())
    }
}
