//! WOPR static, after the War Games computer.

use super::Pattern;
use crate::color::Color;
use crate::error::MatrixError;
use crate::surface::{CELL_COUNT, DisplaySurface, GRID_SIZE};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Random static: 64 random cells per frame in random colors.
///
/// Red is remapped to green, so the frame leans green/yellow. Cells may be
/// hit more than once, so a frame is never a full-coverage fill.
#[derive(Debug, Clone)]
pub struct Wopr {
    rng: StdRng,
}

impl Wopr {
    /// Create a generator seeded from the OS.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a generator with a fixed seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn random_color(&mut self) -> Color {
        match self.rng.gen_range(0..=3u8) {
            0 => Color::Off,
            3 => Color::Yellow,
            _ => Color::Green,
        }
    }
}

impl Default for Wopr {
    fn default() -> Self {
        Self::new()
    }
}

impl Pattern for Wopr {
    fn name(&self) -> &'static str {
        "wopr"
    }

    fn reset(&mut self) {}

    fn update(&mut self, surface: &mut dyn DisplaySurface) -> Result<(), MatrixError> {
        surface.fill(Color::Off)?;
        for _ in 0..CELL_COUNT {
            let x = self.rng.gen_range(0..GRID_SIZE);
            let y = self.rng.gen_range(0..GRID_SIZE);
            let color = self.random_color();
            surface.set(x, y, color)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockSurface;

    #[test]
    fn test_wopr_writes_64_random_cells_without_red() {
        let mock = MockSurface::new();
        let mut surface = mock.clone();
        let mut wopr = Wopr::with_seed(7);

        for _ in 0..20 {
            let before = mock.state().operations;
            wopr.update(&mut surface).unwrap();
            let state = mock.state();

            assert_eq!(state.operations - before, 1 + CELL_COUNT);
            assert!(state.cells.iter().flatten().all(|c| *c != Color::Red));
            assert!(state.lit_cells() < CELL_COUNT);
        }
    }

    #[test]
    fn test_wopr_is_deterministic_with_seed() {
        let first = MockSurface::new();
        let second = MockSurface::new();

        Wopr::with_seed(42).update(&mut first.clone()).unwrap();
        Wopr::with_seed(42).update(&mut second.clone()).unwrap();

        assert_eq!(first.state().cells, second.state().cells);
    }
}
