//! Display surface abstraction.

use crate::color::Color;
use crate::error::MatrixError;

/// Width and height of the matrix, in cells.
pub const GRID_SIZE: u8 = 8;

/// Number of cells on the matrix.
pub const CELL_COUNT: usize = (GRID_SIZE as usize) * (GRID_SIZE as usize);

/// Trait for the addressable 8x8 grid over the physical display.
///
/// The render loop is generic over this trait, so hardware backends and the
/// [`MockSurface`](crate::MockSurface) are interchangeable. Any error returned
/// here is treated as a hardware fault by the engine.
pub trait DisplaySurface: Send {
    /// Set every cell to `color`.
    fn fill(&mut self, color: Color) -> Result<(), MatrixError>;

    /// Set the cell at column `x`, row `y`.
    fn set(&mut self, x: u8, y: u8, color: Color) -> Result<(), MatrixError>;

    /// Set the global brightness (0.0-1.0).
    fn set_brightness(&mut self, level: f32) -> Result<(), MatrixError>;

    /// Re-initialize the hardware after a fault.
    fn reinitialize(&mut self) -> Result<(), MatrixError>;

    /// Push a completed frame to the hardware.
    ///
    /// Backends that write through on every call can keep the default.
    fn flush(&mut self) -> Result<(), MatrixError> {
        Ok(())
    }
}

impl<S: DisplaySurface + ?Sized> DisplaySurface for Box<S> {
    fn fill(&mut self, color: Color) -> Result<(), MatrixError> {
        (**self).fill(color)
    }

    fn set(&mut self, x: u8, y: u8, color: Color) -> Result<(), MatrixError> {
        (**self).set(x, y, color)
    }

    fn set_brightness(&mut self, level: f32) -> Result<(), MatrixError> {
        (**self).set_brightness(level)
    }

    fn reinitialize(&mut self) -> Result<(), MatrixError> {
        (**self).reinitialize()
    }

    fn flush(&mut self) -> Result<(), MatrixError> {
        (**self).flush()
    }
}
