//! Idle scanner.

use super::Pattern;
use crate::color::Color;
use crate::error::MatrixError;
use crate::surface::{DisplaySurface, GRID_SIZE};

/// A single red cell scanning the grid, one cell per frame.
///
/// `y` advances fastest; after (7,7) the cursor wraps to (0,0).
#[derive(Debug, Clone, Default)]
pub struct Idle {
    x: u8,
    y: u8,
}

impl Idle {
    /// Create a scanner at (0,0).
    pub fn new() -> Self {
        Self::default()
    }

    /// The cell the next update will light.
    pub fn cursor(&self) -> (u8, u8) {
        (self.x, self.y)
    }
}

impl Pattern for Idle {
    fn name(&self) -> &'static str {
        "idle"
    }

    fn reset(&mut self) {
        self.x = 0;
        self.y = 0;
    }

    fn update(&mut self, surface: &mut dyn DisplaySurface) -> Result<(), MatrixError> {
        surface.fill(Color::Off)?;
        surface.set(self.x, self.y, Color::Red)?;
        self.y += 1;
        if self.y >= GRID_SIZE {
            self.y = 0;
            self.x = (self.x + 1) % GRID_SIZE;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockSurface;

    #[test]
    fn test_idle_visits_every_cell_once_then_wraps() {
        let mock = MockSurface::new();
        let mut surface = mock.clone();
        let mut idle = Idle::new();
        let mut visited = Vec::new();

        for _ in 0..64 {
            idle.update(&mut surface).unwrap();
            let lit = mock.state().lit_positions();
            assert_eq!(lit.len(), 1);
            visited.push(lit[0]);
        }

        let expected: Vec<(u8, u8)> = (0..8u8)
            .flat_map(|x| (0..8u8).map(move |y| (x, y)))
            .collect();
        assert_eq!(visited, expected);

        idle.update(&mut surface).unwrap();
        assert_eq!(mock.state().lit_positions(), vec![(0, 0)]);
        assert_eq!(mock.cell(0, 0), Color::Red);
    }

    #[test]
    fn test_idle_reset_returns_to_origin() {
        let mut surface = MockSurface::new();
        let mut idle = Idle::new();
        for _ in 0..10 {
            idle.update(&mut surface).unwrap();
        }
        assert_eq!(idle.cursor(), (1, 2));

        idle.reset();
        assert_eq!(idle.cursor(), (0, 0));
    }
}
