//! Mode/state controller and render loop for an 8x8 bi-color LED matrix.
//!
//! The display cycles through an idle scanner, three auto-rotating demo
//! patterns (Fibonacci, WOPR, Life) and two alert flashes (Fire, Panic),
//! driven by system commands arriving over pub/sub.
//!
//! # Architecture
//!
//! - [`ModeController`] - machine state and display mode, with demo rotation
//!   and a one-level restore
//! - [`DisplayEngine`] - the render loop; owns the [`DisplaySurface`] and the
//!   pattern generators, recovers from hardware faults up to a ceiling
//! - [`EngineHandle`] - the thread-safe command side of the engine
//! - [`Dispatcher`] / [`TopicRouter`] - decode `(topic, payload)` events into
//!   [`Command`]s and apply them
//!
//! # Example
//!
//! ```
//! use diyha_matrix_core::{
//!     DisplayEngine, DisplayMode, Dispatcher, EngineConfig, MockSurface, TopicRouter,
//! };
//!
//! let mock = MockSurface::new();
//! let mut engine = DisplayEngine::new(mock.clone(), EngineConfig::immediate());
//! let dispatcher = Dispatcher::new(TopicRouter::new("diy"), engine.handle());
//!
//! dispatcher.handle("diy/system/fire", b"ON");
//! engine.step()?;
//! assert_eq!(mock.state().lit_cells(), 64);
//!
//! dispatcher.handle("diy/system/fire", b"OFF");
//! assert_eq!(engine.controller().get_mode(), DisplayMode::Fibonacci);
//! # Ok::<(), diyha_matrix_core::MatrixError>(())
//! ```
//!
//! # Testing
//!
//! Use [`MockSurface`] to run the engine without hardware. It records every
//! write and can inject faults.

#![warn(missing_docs)]

mod color;
mod command;
mod config;
mod controller;
mod engine;
mod error;
mod mock;
mod modes;
pub mod patterns;
mod state;
mod surface;

// Re-export public API
pub use color::Color;
pub use command::{Command, Dispatcher, PAYLOAD_ON, SUBSCRIPTION_QOS, TopicRouter};
pub use config::EngineConfig;
pub use controller::{DEFAULT_ROTATION, ModeController};
pub use engine::{DisplayEngine, EngineHandle};
pub use error::MatrixError;
pub use mock::{MockState, MockSurface};
pub use modes::DisplayMode;
pub use patterns::Pattern;
pub use state::{ControllerSnapshot, MachineState};
pub use surface::{CELL_COUNT, DisplaySurface, GRID_SIZE};
