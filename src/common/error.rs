//! Error types for infotree

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    // === I/O Errors ===
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Startup Errors ===
    #[error("Failed to resolve {host}: {reason}")]
    Resolve { host: String, reason: String },

    #[error("Invalid seed on line {line}: {reason}")]
    InvalidSeed { line: usize, reason: String },

    // === Network Errors ===
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Authentication rejected by {node}: {reason}")]
    Auth { node: String, reason: String },

    #[error("Server error from {node}: {reason}")]
    Server { node: String, reason: String },

    #[error("Operation timeout: {0}")]
    Timeout(String),

    // === Config Errors ===
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),
}

impl Error {
    /// Did this error come from talking to a single node?
    ///
    /// Only these are eligible to be rendered inline when the walk runs with
    /// the `inline` failure policy; everything else always aborts.
    pub fn is_node_failure(&self) -> bool {
        matches!(
            self,
            Error::Io(_)
                | Error::ConnectionFailed(_)
                | Error::Protocol(_)
                | Error::Auth { .. }
                | Error::Server { .. }
                | Error::Timeout(_)
        )
    }
}
