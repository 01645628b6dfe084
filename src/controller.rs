//! Mode/state controller.

use crate::modes::DisplayMode;
use crate::state::{ControllerSnapshot, MachineState};

use log::{debug, info};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// How long a demo mode runs before rotating to the next one.
pub const DEFAULT_ROTATION: Duration = Duration::from_secs(60);

/// The mode/state controller.
///
/// Tracks the machine state and the display mode, rotates through the demo
/// modes over time, and supports a one-level restore of the previous mode.
/// It is shared between the render loop and the command path, so every field
/// lives behind one lock.
///
/// # Example
///
/// ```
/// use diyha_matrix_core::{DisplayMode, ModeController};
///
/// let controller = ModeController::default();
/// controller.set_mode(DisplayMode::Fire);
/// controller.restore_mode();
/// assert_eq!(controller.get_mode(), DisplayMode::Fibonacci);
/// ```
#[derive(Debug)]
pub struct ModeController {
    inner: Mutex<ControllerSnapshot>,
    rotation: Duration,
}

impl ModeController {
    /// Create a controller that rotates demo modes every `rotation`.
    pub fn new(rotation: Duration) -> Self {
        Self {
            inner: Mutex::new(ControllerSnapshot::initial(Instant::now())),
            rotation,
        }
    }

    fn lock(&self) -> MutexGuard<'_, ControllerSnapshot> {
        // The snapshot is plain Copy data, so a poisoned lock still holds a valid value.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Get a copy of all controller fields.
    pub fn snapshot(&self) -> ControllerSnapshot {
        *self.lock()
    }

    /// The demo rotation interval.
    pub fn rotation(&self) -> Duration {
        self.rotation
    }

    /// Set the machine state.
    pub fn set_state(&self, state: MachineState) {
        self.lock().machine_state = state;
        debug!("machine state set to {:?}", state);
    }

    /// Get the machine state.
    pub fn get_state(&self) -> MachineState {
        self.lock().machine_state
    }

    /// Switch to `mode`, remembering the current one for [`restore_mode`](Self::restore_mode).
    pub fn set_mode(&self, mode: DisplayMode) {
        let mut inner = self.lock();
        inner.last_mode = inner.current_mode;
        inner.current_mode = mode;
        inner.mode_start_time = Instant::now();
        debug!("mode {} -> {}", inner.last_mode, mode);
    }

    /// Switch to `mode` unless a Fire or Panic alert is showing.
    ///
    /// The check and the switch happen under one lock, so an alert set
    /// concurrently is never overwritten. Returns `true` if the mode changed.
    pub fn set_mode_unless_alert(&self, mode: DisplayMode) -> bool {
        let mut inner = self.lock();
        if inner.current_mode.is_alert() {
            debug!(
                "ignoring mode {} while {} alert is active",
                mode, inner.current_mode
            );
            return false;
        }
        inner.last_mode = inner.current_mode;
        inner.current_mode = mode;
        inner.mode_start_time = Instant::now();
        debug!("mode {} -> {}", inner.last_mode, mode);
        true
    }

    /// Return to the mode that was active before the last change.
    ///
    /// Only one level is kept: a second consecutive call leaves the mode as is.
    pub fn restore_mode(&self) {
        let mut inner = self.lock();
        inner.current_mode = inner.last_mode;
        inner.mode_start_time = Instant::now();
        debug!("mode restored to {}", inner.current_mode);
    }

    /// Get the current display mode.
    pub fn get_mode(&self) -> DisplayMode {
        self.lock().current_mode
    }

    /// Rotate to the next demo mode once the current one has run long enough.
    ///
    /// Alert modes are never rotated. Returns `true` if the mode advanced.
    pub fn evaluate(&self, now: Instant) -> bool {
        let mut inner = self.lock();
        let elapsed = now.saturating_duration_since(inner.mode_start_time);
        if elapsed <= self.rotation {
            return false;
        }
        let Some(next) = inner.current_mode.next_demo() else {
            return false;
        };
        inner.last_mode = inner.current_mode;
        inner.current_mode = next;
        inner.mode_start_time = now;
        info!("demo rotated {} -> {}", inner.last_mode, next);
        true
    }
}

impl Default for ModeController {
    fn default() -> Self {
        Self::new(DEFAULT_ROTATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let controller = ModeController::default();
        let snapshot = controller.snapshot();
        assert_eq!(snapshot.machine_state, MachineState::Demo);
        assert_eq!(snapshot.current_mode, DisplayMode::Fibonacci);
        assert_eq!(snapshot.last_mode, DisplayMode::Life);
    }

    #[test]
    fn test_set_state_only_writes_state() {
        let controller = ModeController::default();
        let before = controller.snapshot();

        controller.set_state(MachineState::Security);
        let after = controller.snapshot();

        assert_eq!(after.machine_state, MachineState::Security);
        assert_eq!(after.current_mode, before.current_mode);
        assert_eq!(after.last_mode, before.last_mode);
        assert_eq!(after.mode_start_time, before.mode_start_time);
    }

    #[test]
    fn test_restore_returns_to_mode_before_last_set() {
        let controller = ModeController::default();
        let sequence = [
            DisplayMode::Wopr,
            DisplayMode::Fire,
            DisplayMode::Life,
            DisplayMode::Panic,
            DisplayMode::Life,
        ];

        for mode in sequence {
            let before = controller.get_mode();
            controller.set_mode(mode);
            assert_eq!(controller.get_mode(), mode);

            controller.restore_mode();
            assert_eq!(controller.get_mode(), before);

            // Single-level: restoring again changes nothing.
            controller.restore_mode();
            assert_eq!(controller.get_mode(), before);

            controller.set_mode(mode);
        }
    }

    #[test]
    fn test_set_mode_unless_alert() {
        let controller = ModeController::default();

        assert!(controller.set_mode_unless_alert(DisplayMode::Wopr));
        assert_eq!(controller.get_mode(), DisplayMode::Wopr);

        for alert in [DisplayMode::Fire, DisplayMode::Panic] {
            controller.set_mode(alert);
            let before = controller.snapshot();
            assert!(!controller.set_mode_unless_alert(DisplayMode::Life));
            assert_eq!(controller.snapshot(), before);
        }
    }

    #[test]
    fn test_alert_is_never_overwritten_by_concurrent_demo_switch() {
        use std::sync::{Arc, Barrier};
        use std::thread;

        for _ in 0..200 {
            let controller = Arc::new(ModeController::default());
            let barrier = Arc::new(Barrier::new(2));

            let demo = {
                let controller = Arc::clone(&controller);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    for _ in 0..100 {
                        controller.set_mode_unless_alert(DisplayMode::Wopr);
                    }
                })
            };
            barrier.wait();
            controller.set_mode(DisplayMode::Fire);
            demo.join().unwrap();

            assert_eq!(controller.get_mode(), DisplayMode::Fire);
        }
    }

    #[test]
    fn test_evaluate_before_interval_keeps_mode() {
        let controller = ModeController::default();
        let start = controller.snapshot().mode_start_time;

        assert!(!controller.evaluate(start + Duration::from_secs(59)));
        assert!(!controller.evaluate(start + DEFAULT_ROTATION));
        assert_eq!(controller.get_mode(), DisplayMode::Fibonacci);
    }

    #[test]
    fn test_evaluate_after_interval_advances_one_step() {
        let controller = ModeController::default();
        let expected = [DisplayMode::Wopr, DisplayMode::Life, DisplayMode::Fibonacci];

        for mode in expected {
            let snapshot = controller.snapshot();
            let now = snapshot.mode_start_time + Duration::from_secs(61);

            assert!(controller.evaluate(now));
            let after = controller.snapshot();
            assert_eq!(after.current_mode, mode);
            assert_eq!(after.last_mode, snapshot.current_mode);
            assert_eq!(after.mode_start_time, now);

            // The timer restarted, so an immediate re-evaluation is a no-op.
            assert!(!controller.evaluate(now));
        }
    }

    #[test]
    fn test_evaluate_never_rotates_alert_modes() {
        let controller = ModeController::default();
        for alert in [DisplayMode::Fire, DisplayMode::Panic] {
            controller.set_mode(alert);
            let start = controller.snapshot().mode_start_time;
            assert!(!controller.evaluate(start + Duration::from_secs(3600)));
            assert_eq!(controller.get_mode(), alert);
        }
    }

    #[test]
    fn test_custom_rotation_interval() {
        let controller = ModeController::new(Duration::from_millis(10));
        let start = controller.snapshot().mode_start_time;
        assert!(controller.evaluate(start + Duration::from_millis(11)));
        assert_eq!(controller.get_mode(), DisplayMode::Wopr);
    }
}
