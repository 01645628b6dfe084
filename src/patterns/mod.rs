//! Pixel pattern generators.
//!
//! Each generator keeps just enough state to resume from its own last frame.
//! The engine owns the surface and hands it to whichever generator is active.

mod fibonacci;
mod flash;
mod idle;
mod life;
mod wopr;

pub use fibonacci::{Fibonacci, LARGEST_64_BIT_FIBONACCI};
pub use flash::Flash;
pub use idle::Idle;
pub use life::{Life, LifeGrid};
pub use wopr::Wopr;

use crate::error::MatrixError;
use crate::surface::DisplaySurface;

/// Trait for pattern generators.
pub trait Pattern: Send {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Return to the deterministic starting frame.
    fn reset(&mut self);

    /// Advance one frame and write it to `surface`.
    fn update(&mut self, surface: &mut dyn DisplaySurface) -> Result<(), MatrixError>;
}
