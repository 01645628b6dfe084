//! Error types for the LED matrix display.

/// Errors that can occur while driving the LED matrix.
#[derive(Debug, thiserror::Error)]
pub enum MatrixError {
    /// A color value was outside the 2-bit range.
    #[error("Invalid color {0} (expected 0-3)")]
    InvalidColor(u8),

    /// Writing to or reading from the display surface failed.
    #[error("Hardware fault: {0}")]
    HardwareFault(String),

    /// An inbound command arrived on a topic with no route.
    #[error("No route for topic '{0}'")]
    UnroutableTopic(String),

    /// The render thread could not be started.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The render loop hit its fault ceiling and stopped for good.
    #[error("Render loop stopped after {faults} hardware faults")]
    FaultLimit {
        /// Number of faults seen when the loop stopped.
        faults: u32,
    },
}
