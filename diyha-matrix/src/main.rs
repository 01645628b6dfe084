//! LED matrix display responding to home automation system commands.
//!
//! Command events are read from standard input, one per line, as
//! `<topic> <payload>` (for example `diy/system/fire ON`). The topic prefix
//! comes from `MATRIX_TOPIC_PREFIX` (default `diy`); log verbosity from
//! `RUST_LOG`. Frames are drawn on the terminal.

mod console;

use console::ConsoleSurface;
use diyha_matrix_core::{DisplayEngine, Dispatcher, EngineConfig, MatrixError, TopicRouter};
use log::{error, info, warn};
use std::io::{self, BufRead};

const DEFAULT_PREFIX: &str = "diy";

/// Split an input line into topic and payload. The payload may be empty.
fn parse_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    Some(line.split_once(char::is_whitespace).map_or((line, ""), |(topic, payload)| {
        (topic, payload.trim())
    }))
}

fn main() -> Result<(), MatrixError> {
    env_logger::init();
    info!("Application started");

    let prefix = std::env::var("MATRIX_TOPIC_PREFIX").unwrap_or_else(|_| DEFAULT_PREFIX.into());
    let router = TopicRouter::new(prefix);

    let engine = DisplayEngine::new(ConsoleSurface::new(io::stdout()), EngineConfig::default());
    let dispatcher = Dispatcher::new(router, engine.handle());
    let display = engine.spawn()?;

    // Standard input has no reconnects, so one subscription pass is enough.
    for (topic, qos) in dispatcher.router().subscriptions() {
        info!("subscribed to {} (qos {})", topic, qos);
    }

    for line in io::stdin().lock().lines() {
        let line = line?;
        if let Some((topic, payload)) = parse_line(&line) {
            dispatcher.handle(topic, payload.as_bytes());
        }
        if display.is_finished() {
            warn!("display stopped; commands have no visible effect until restart");
        }
    }

    info!("command input closed, waiting on display");
    match display.join() {
        Ok(err) => {
            error!("display stopped: {}", err);
            Err(err)
        }
        Err(_) => Err(MatrixError::HardwareFault("display thread panicked".into())),
    }
}
