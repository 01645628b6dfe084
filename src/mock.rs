//! Mock surface for testing.

use crate::color::Color;
use crate::error::MatrixError;
use crate::surface::{DisplaySurface, GRID_SIZE};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

const SIZE: usize = GRID_SIZE as usize;

/// Recorded contents of a [`MockSurface`].
#[derive(Debug, Clone, PartialEq)]
pub struct MockState {
    /// Cells indexed `[x][y]`.
    pub cells: [[Color; SIZE]; SIZE],
    /// Last brightness written.
    pub brightness: f32,
    /// Attempted fill/set/brightness/flush calls, failed ones included.
    pub operations: usize,
    /// Successful flushes.
    pub frames: usize,
    /// Calls to `reinitialize`.
    pub reinitializations: usize,
    /// Remaining operations that will fail.
    pub pending_faults: usize,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            cells: [[Color::Off; SIZE]; SIZE],
            brightness: 1.0,
            operations: 0,
            frames: 0,
            reinitializations: 0,
            pending_faults: 0,
        }
    }
}

impl MockState {
    /// Number of cells that are not [`Color::Off`].
    pub fn lit_cells(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|c| **c != Color::Off)
            .count()
    }

    /// Coordinates of lit cells, `x` major.
    pub fn lit_positions(&self) -> Vec<(u8, u8)> {
        let mut out = Vec::new();
        for (x, column) in self.cells.iter().enumerate() {
            for (y, cell) in column.iter().enumerate() {
                if *cell != Color::Off {
                    out.push((x as u8, y as u8));
                }
            }
        }
        out
    }
}

/// An in-memory display surface for testing.
///
/// Clones share the same state, so a test can hand one clone to the engine
/// and inspect the frame through another. Faults can be injected with
/// [`MockSurface::fail_next`].
///
/// # Example
///
/// ```
/// use diyha_matrix_core::{Color, DisplaySurface, MockSurface};
///
/// let mut mock = MockSurface::new();
/// mock.set(1, 2, Color::Red).unwrap();
/// assert_eq!(mock.state().cells[1][2], Color::Red);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockSurface {
    state: Arc<Mutex<MockState>>,
}

impl MockSurface {
    /// Create a new blank mock surface at full brightness.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `count` write operations fail with a hardware fault.
    pub fn fail_next(&self, count: usize) {
        self.lock().pending_faults = count;
    }

    /// Get a copy of the recorded state.
    pub fn state(&self) -> MockState {
        self.lock().clone()
    }

    /// Color of one cell.
    pub fn cell(&self, x: u8, y: u8) -> Color {
        self.lock().cells[x as usize][y as usize]
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin_operation(&self) -> Result<MutexGuard<'_, MockState>, MatrixError> {
        let mut state = self.lock();
        state.operations += 1;
        if state.pending_faults > 0 {
            state.pending_faults -= 1;
            return Err(MatrixError::HardwareFault("injected i2c failure".into()));
        }
        Ok(state)
    }
}

impl DisplaySurface for MockSurface {
    fn fill(&mut self, color: Color) -> Result<(), MatrixError> {
        let mut state = self.begin_operation()?;
        state.cells = [[color; SIZE]; SIZE];
        Ok(())
    }

    fn set(&mut self, x: u8, y: u8, color: Color) -> Result<(), MatrixError> {
        let mut state = self.begin_operation()?;
        if x >= GRID_SIZE || y >= GRID_SIZE {
            return Err(MatrixError::HardwareFault(format!(
                "pixel ({x}, {y}) out of range"
            )));
        }
        state.cells[x as usize][y as usize] = color;
        Ok(())
    }

    fn set_brightness(&mut self, level: f32) -> Result<(), MatrixError> {
        let mut state = self.begin_operation()?;
        state.brightness = level.clamp(0.0, 1.0);
        Ok(())
    }

    fn reinitialize(&mut self) -> Result<(), MatrixError> {
        self.lock().reinitializations += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), MatrixError> {
        let mut state = self.begin_operation()?;
        state.frames += 1;
        Ok(())
    }
}
