//! Render loop configuration.

use crate::controller::DEFAULT_ROTATION;
use crate::modes::DisplayMode;
use crate::state::MachineState;

use std::time::Duration;

/// Timing and fault policy for the [`DisplayEngine`](crate::DisplayEngine).
///
/// [`EngineConfig::default`] carries the production timings;
/// [`EngineConfig::immediate`] removes every delay so the loop can be stepped
/// in tests.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Sleep before each frame, indexed by [`DisplayMode::index`].
    pub pacing: [Duration; 5],
    /// Extra sleep before each idle frame.
    pub idle_delay: Duration,
    /// Sleep before re-initializing the surface after a fault.
    pub fault_backoff: Duration,
    /// Fault count at which the render loop stops for good.
    pub max_faults: u32,
    /// Brightness while idle.
    pub dim_brightness: f32,
    /// Brightness in every other state.
    pub full_brightness: f32,
    /// How long each demo mode runs before rotating.
    pub rotation: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let fast = Duration::from_millis(200);
        Self {
            pacing: [fast, fast, fast, fast, Duration::from_millis(500)],
            idle_delay: Duration::from_millis(500),
            fault_backoff: Duration::from_secs(1),
            max_faults: 10,
            dim_brightness: 0.1,
            full_brightness: 1.0,
            rotation: DEFAULT_ROTATION,
        }
    }
}

impl EngineConfig {
    /// Production policy with every sleep set to zero.
    pub fn immediate() -> Self {
        Self {
            pacing: [Duration::ZERO; 5],
            idle_delay: Duration::ZERO,
            fault_backoff: Duration::ZERO,
            ..Self::default()
        }
    }

    /// Pacing interval for `mode`.
    pub fn pacing_for(&self, mode: DisplayMode) -> Duration {
        self.pacing[mode.index()]
    }

    /// Override the pacing interval for one mode.
    #[must_use]
    pub fn with_pacing(mut self, mode: DisplayMode, interval: Duration) -> Self {
        self.pacing[mode.index()] = interval;
        self
    }

    /// Override the fault ceiling.
    #[must_use]
    pub fn with_max_faults(mut self, max_faults: u32) -> Self {
        self.max_faults = max_faults;
        self
    }

    /// Override the demo rotation interval.
    #[must_use]
    pub fn with_rotation(mut self, rotation: Duration) -> Self {
        self.rotation = rotation;
        self
    }

    /// Brightness to use in `state`.
    pub fn brightness_for(&self, state: MachineState) -> f32 {
        match state {
            MachineState::Idle => self.dim_brightness,
            MachineState::Demo | MachineState::Security => self.full_brightness,
        }
    }
}
