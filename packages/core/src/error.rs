use std::error::Error;
use std::fmt;

/// Process-level errors.
///
/// Per-symbol failures live in [`crate::relay::error`]; these are the
/// conditions that stop the service before or outside the relay loop.
#[derive(Debug)]
pub enum AppError {
    Config(String),
    Network(String),
    Server(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(msg) => write!(f, "Config error: {}", msg),
            AppError::Network(msg) => write!(f, "Network error: {}", msg),
            AppError::Server(msg) => write!(f, "Server error: {}", msg),
        }
    }
}

impl Error for AppError {}
