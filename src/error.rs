//! Error handling for the NAS LCD status display.

/// A specialized `Result` type for display operations.
pub type Result<T> = std::result::Result<T, DisplayError>;

/// The main error type for the status display.
#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid display configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Writing to or initializing the display failed
    #[error("Transport error: {0}")]
    Transport(String),

    /// A metrics query failed
    #[error("Metrics error: {0}")]
    Metrics(String),

    /// I2C bus error (only available with i2c feature)
    #[cfg(feature = "i2c")]
    #[error("I2C error: {0}")]
    I2c(#[from] rppal::i2c::Error),
}

impl DisplayError {
    /// Create a new configuration error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new transport error
    pub fn transport_error(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a new metrics error
    pub fn metrics_error(msg: impl Into<String>) -> Self {
        Self::Metrics(msg.into())
    }
}
