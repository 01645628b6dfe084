//! Inbound command decoding and dispatch.
//!
//! The messaging collaborator hands over raw `(topic, payload)` pairs. They
//! are decoded once into a [`Command`] by the [`TopicRouter`] and then applied
//! to the engine by the [`Dispatcher`].

use crate::engine::EngineHandle;
use crate::error::MatrixError;
use crate::modes::DisplayMode;
use crate::state::MachineState;

use log::{info, warn};

/// Payload that switches a topic on. Anything else switches it off.
pub const PAYLOAD_ON: &[u8] = b"ON";

/// QoS level used for every subscription.
pub const SUBSCRIPTION_QOS: u8 = 1;

/// A decoded system command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `system/fire`: show or clear the fire alert.
    Fire(bool),
    /// `system/panic`: show or clear the panic alert.
    Panic(bool),
    /// `system/demo`: run the demo, or drop to idle.
    Demo(bool),
    /// `system/security`: blank the screen, or return to the demo.
    Security(bool),
    /// `system/silent`: go idle, or return to the demo.
    Silent(bool),
}

impl Command {
    /// Topic suffixes, one per command kind.
    pub const TOPICS: [&'static str; 5] = [
        "system/fire",
        "system/panic",
        "system/demo",
        "system/security",
        "system/silent",
    ];

    /// Build a command from a topic suffix and an on/off flag.
    pub fn from_topic(topic: &str, on: bool) -> Option<Self> {
        let command = match topic {
            "system/fire" => Command::Fire(on),
            "system/panic" => Command::Panic(on),
            "system/demo" => Command::Demo(on),
            "system/security" => Command::Security(on),
            "system/silent" => Command::Silent(on),
            _ => return None,
        };
        Some(command)
    }
}

/// Maps full topic names to [`Command`]s.
///
/// Deployments usually put the system topics under a prefix such as `diy/`;
/// the router strips it before matching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicRouter {
    prefix: String,
}

impl TopicRouter {
    /// A router for topics under `prefix`. An empty prefix matches bare topics.
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into().trim_end_matches('/').to_string();
        Self { prefix }
    }

    fn full_topic(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}/{}", self.prefix, suffix)
        }
    }

    /// Topics to subscribe to, with their QoS.
    ///
    /// Call this on every (re)connect; brokers drop subscriptions with the
    /// session.
    pub fn subscriptions(&self) -> Vec<(String, u8)> {
        Command::TOPICS
            .iter()
            .map(|suffix| (self.full_topic(suffix), SUBSCRIPTION_QOS))
            .collect()
    }

    /// Decode one inbound event.
    ///
    /// # Errors
    /// Returns [`MatrixError::UnroutableTopic`] for topics outside the table.
    pub fn decode(&self, topic: &str, payload: &[u8]) -> Result<Command, MatrixError> {
        let suffix = if self.prefix.is_empty() {
            Some(topic)
        } else {
            topic
                .strip_prefix(self.prefix.as_str())
                .and_then(|rest| rest.strip_prefix('/'))
        };
        suffix
            .and_then(|suffix| Command::from_topic(suffix, payload == PAYLOAD_ON))
            .ok_or_else(|| MatrixError::UnroutableTopic(topic.to_string()))
    }
}

/// Applies decoded commands to a display engine.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    router: TopicRouter,
    engine: EngineHandle,
}

impl Dispatcher {
    /// Create a dispatcher feeding `engine`.
    pub fn new(router: TopicRouter, engine: EngineHandle) -> Self {
        Self { router, engine }
    }

    /// The router used for decoding.
    pub fn router(&self) -> &TopicRouter {
        &self.router
    }

    /// Decode and apply one inbound event.
    ///
    /// Unroutable topics are logged and dropped. Returns the applied command.
    pub fn handle(&self, topic: &str, payload: &[u8]) -> Option<Command> {
        info!("{} {}", topic, String::from_utf8_lossy(payload));
        match self.router.decode(topic, payload) {
            Ok(command) => {
                self.apply(command);
                Some(command)
            }
            Err(err) => {
                warn!("dropping message: {}", err);
                None
            }
        }
    }

    /// Apply a decoded command.
    pub fn apply(&self, command: Command) {
        match command {
            Command::Fire(true) => self.engine.set_mode(DisplayMode::Fire, true),
            Command::Panic(true) => self.engine.set_mode(DisplayMode::Panic, true),
            Command::Fire(false) | Command::Panic(false) => {
                self.engine.set_mode(DisplayMode::Fibonacci, true)
            }
            Command::Demo(true) => self.engine.set_state(MachineState::Demo),
            Command::Demo(false) => self.engine.set_state(MachineState::Idle),
            Command::Security(true) => self.engine.set_state(MachineState::Security),
            Command::Security(false) => self.engine.set_state(MachineState::Demo),
            Command::Silent(true) => self.engine.set_state(MachineState::Idle),
            Command::Silent(false) => self.engine.set_state(MachineState::Demo),
        }
    }
}
