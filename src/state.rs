//! Machine state and controller snapshot.

use std::time::Instant;

use crate::modes::DisplayMode;

/// The machine-level operating posture.
///
/// Gates brightness and whether demo modes render. Alert modes ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MachineState {
    /// Dimmed, showing the idle scanner.
    Idle,
    /// Running the active demo mode.
    Demo,
    /// Screen blanked.
    Security,
}

/// A snapshot of the mode controller's fields.
///
/// Use [`ModeController::snapshot`](crate::ModeController::snapshot) to obtain one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerSnapshot {
    /// The current machine state.
    pub machine_state: MachineState,
    /// The mode being rendered.
    pub current_mode: DisplayMode,
    /// The mode that was active before the last change (for restoration).
    pub last_mode: DisplayMode,
    /// When the current mode was entered.
    pub mode_start_time: Instant,
}

impl ControllerSnapshot {
    /// Initial state: demo running Fibonacci, with Life as the restore target.
    pub fn initial(now: Instant) -> Self {
        Self {
            machine_state: MachineState::Demo,
            current_mode: DisplayMode::Fibonacci,
            last_mode: DisplayMode::Life,
            mode_start_time: now,
        }
    }
}
