//! Display engine: the render loop and its command surface.
//!
//! The [`DisplayEngine`] owns the surface and every pattern generator and is
//! the only thing that ever touches the surface. Command handlers talk to it
//! through a cloneable [`EngineHandle`], which mutates the shared
//! [`ModeController`] and queues brightness changes for the next tick.

use crate::color::Color;
use crate::config::EngineConfig;
use crate::controller::ModeController;
use crate::error::MatrixError;
use crate::modes::DisplayMode;
use crate::patterns::{Fibonacci, Flash, Idle, Life, Pattern, Wopr};
use crate::state::{ControllerSnapshot, MachineState};
use crate::surface::DisplaySurface;

use log::{debug, error, info, trace, warn};
use std::convert::Infallible;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::Instant;

/// Requests queued by the command path for the render loop.
#[derive(Debug, Clone, Copy)]
enum SurfaceRequest {
    Brightness(f32),
}

// =============================================================================
// Engine Handle
// =============================================================================

/// Cloneable command surface of a [`DisplayEngine`].
///
/// Safe to use from any thread. It never writes pixels; it only requests
/// mode/state transitions. Once the render loop has stopped, calls still
/// update the controller but nothing is drawn any more.
#[derive(Debug, Clone)]
pub struct EngineHandle {
    controller: Arc<ModeController>,
    requests: Sender<SurfaceRequest>,
    config: EngineConfig,
}

impl EngineHandle {
    /// Switch the display mode.
    ///
    /// Without `override_alert`, the request is silently dropped while a
    /// Fire or Panic alert is showing.
    pub fn set_mode(&self, mode: DisplayMode, override_alert: bool) {
        if override_alert {
            self.controller.set_mode(mode);
        } else {
            self.controller.set_mode_unless_alert(mode);
        }
    }

    /// Return to the previous mode, usually after an alert.
    pub fn restore_mode(&self) {
        self.controller.restore_mode();
    }

    /// Set the machine state and queue the matching brightness.
    pub fn set_state(&self, state: MachineState) {
        self.controller.set_state(state);
        let level = self.config.brightness_for(state);
        if self
            .requests
            .send(SurfaceRequest::Brightness(level))
            .is_err()
        {
            debug!("render loop gone, brightness {} not applied", level);
        }
    }

    /// Get the machine state.
    pub fn get_state(&self) -> MachineState {
        self.controller.get_state()
    }

    /// Get the display mode.
    pub fn get_mode(&self) -> DisplayMode {
        self.controller.get_mode()
    }

    /// Get a copy of all controller fields.
    pub fn snapshot(&self) -> ControllerSnapshot {
        self.controller.snapshot()
    }
}

// =============================================================================
// Display Engine
// =============================================================================

/// The render loop.
///
/// Each tick reads the controller, sleeps the mode's pacing interval and
/// draws one frame. Surface errors are counted; below the ceiling the engine
/// backs off and re-initializes the surface, at the ceiling it stops for good.
/// The count never resets, so the ceiling applies over the life of the loop.
///
/// # Example
///
/// ```
/// use diyha_matrix_core::{DisplayEngine, DisplayMode, EngineConfig, MockSurface};
///
/// let mock = MockSurface::new();
/// let mut engine = DisplayEngine::new(mock.clone(), EngineConfig::immediate());
/// let handle = engine.handle();
///
/// handle.set_mode(DisplayMode::Fire, true);
/// engine.step().unwrap();
/// assert_eq!(mock.state().lit_cells(), 64);
/// ```
pub struct DisplayEngine<S: DisplaySurface> {
    surface: S,
    controller: Arc<ModeController>,
    config: EngineConfig,
    idle: Idle,
    fire: Flash,
    panic: Flash,
    fibonacci: Fibonacci,
    wopr: Wopr,
    life: Life,
    requests: Receiver<SurfaceRequest>,
    sender: Sender<SurfaceRequest>,
    pending_brightness: Option<f32>,
    faults: u32,
}

impl<S: DisplaySurface> DisplayEngine<S> {
    /// Create an engine drawing on `surface`.
    ///
    /// The controller starts in the demo state showing Fibonacci.
    pub fn new(surface: S, config: EngineConfig) -> Self {
        let (sender, requests) = mpsc::channel();
        Self {
            surface,
            controller: Arc::new(ModeController::new(config.rotation)),
            config,
            idle: Idle::new(),
            fire: Flash::with_color(Color::Red),
            panic: Flash::with_color(Color::Yellow),
            fibonacci: Fibonacci::new(),
            wopr: Wopr::new(),
            life: Life::new(),
            requests,
            sender,
            pending_brightness: None,
            faults: 0,
        }
    }

    /// Use fixed seeds for the random patterns.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.wopr = Wopr::with_seed(seed);
        self.life = Life::with_seed(seed);
        self
    }

    /// Get a command handle for this engine.
    pub fn handle(&self) -> EngineHandle {
        EngineHandle {
            controller: Arc::clone(&self.controller),
            requests: self.sender.clone(),
            config: self.config.clone(),
        }
    }

    /// The shared mode controller.
    pub fn controller(&self) -> &Arc<ModeController> {
        &self.controller
    }

    /// Faults seen so far.
    pub fn fault_count(&self) -> u32 {
        self.faults
    }

    /// Whether the fault ceiling has been reached.
    pub fn is_stopped(&self) -> bool {
        self.faults >= self.config.max_faults
    }

    /// Return to the demo state showing Fibonacci, with every pattern reset.
    pub fn reset(&mut self) {
        self.controller.set_state(MachineState::Demo);
        self.controller.set_mode(DisplayMode::Fibonacci);
        while self.requests.try_recv().is_ok() {}
        self.pending_brightness = Some(self.config.full_brightness);
        for pattern in self.patterns_mut() {
            pattern.reset();
        }
        info!("display engine reset");
    }

    fn patterns_mut(&mut self) -> [&mut dyn Pattern; 6] {
        [
            &mut self.idle,
            &mut self.fire,
            &mut self.panic,
            &mut self.fibonacci,
            &mut self.wopr,
            &mut self.life,
        ]
    }

    fn apply_requests(&mut self) -> Result<(), MatrixError> {
        while let Ok(request) = self.requests.try_recv() {
            match request {
                SurfaceRequest::Brightness(level) => self.pending_brightness = Some(level),
            }
        }
        if let Some(level) = self.pending_brightness {
            self.surface.set_brightness(level)?;
            self.pending_brightness = None;
        }
        Ok(())
    }

    fn render_demo(&mut self, mode: DisplayMode) -> Result<(), MatrixError> {
        match self.controller.get_state() {
            MachineState::Security => self.surface.fill(Color::Off),
            MachineState::Idle => {
                thread::sleep(self.config.idle_delay);
                self.surface.set_brightness(self.config.dim_brightness)?;
                self.idle.update(&mut self.surface)
            }
            MachineState::Demo => {
                let pattern: &mut dyn Pattern = match mode {
                    DisplayMode::Fire => &mut self.fire,
                    DisplayMode::Panic => &mut self.panic,
                    DisplayMode::Fibonacci => &mut self.fibonacci,
                    DisplayMode::Wopr => &mut self.wopr,
                    DisplayMode::Life => &mut self.life,
                };
                pattern.update(&mut self.surface)?;
                self.controller.evaluate(Instant::now());
                Ok(())
            }
        }
    }

    /// Draw one frame, without fault handling.
    ///
    /// Alerts render regardless of the machine state.
    pub fn tick(&mut self) -> Result<(), MatrixError> {
        self.apply_requests()?;
        let mode = self.controller.get_mode();
        thread::sleep(self.config.pacing_for(mode));
        trace!("tick: mode={}", mode);

        match mode {
            DisplayMode::Fire => self.fire.update(&mut self.surface)?,
            DisplayMode::Panic => self.panic.update(&mut self.surface)?,
            DisplayMode::Fibonacci | DisplayMode::Wopr | DisplayMode::Life => {
                self.render_demo(mode)?
            }
        }
        self.surface.flush()
    }

    /// Draw one frame, recovering from surface faults.
    ///
    /// # Errors
    /// Returns [`MatrixError::FaultLimit`] once the fault ceiling is reached.
    /// After that the surface is never touched again.
    pub fn step(&mut self) -> Result<(), MatrixError> {
        if self.is_stopped() {
            // Nothing applies queued requests any more; don't let them pile up.
            while self.requests.try_recv().is_ok() {}
            return Err(MatrixError::FaultLimit {
                faults: self.faults,
            });
        }
        match self.tick() {
            Ok(()) => Ok(()),
            Err(err) => self.recover(err),
        }
    }

    fn recover(&mut self, err: MatrixError) -> Result<(), MatrixError> {
        self.faults += 1;
        if self.is_stopped() {
            error!(
                "display fault {}/{}: {}; stopping render loop",
                self.faults, self.config.max_faults, err
            );
            return Err(MatrixError::FaultLimit {
                faults: self.faults,
            });
        }

        warn!(
            "display fault {}/{}: {}",
            self.faults, self.config.max_faults, err
        );
        thread::sleep(self.config.fault_backoff);
        if let Err(e) = self.surface.reinitialize() {
            warn!("surface re-initialization failed: {}", e);
        }
        Ok(())
    }

    /// Run the render loop until the fault ceiling stops it.
    ///
    /// Never returns `Ok`.
    pub fn run(&mut self) -> Result<Infallible, MatrixError> {
        info!("render loop started in mode {}", self.controller.get_mode());
        loop {
            self.step()?;
        }
    }
}

impl<S: DisplaySurface + 'static> DisplayEngine<S> {
    /// Run the render loop on a background thread named `display`.
    ///
    /// The thread's result is the error that stopped the loop.
    pub fn spawn(mut self) -> Result<JoinHandle<MatrixError>, MatrixError> {
        let handle = thread::Builder::new()
            .name("display".into())
            .spawn(move || match self.run() {
                Ok(never) => match never {},
                Err(err) => {
                    error!("render loop stopped: {}", err);
                    err
                }
            })?;
        Ok(handle)
    }
}
