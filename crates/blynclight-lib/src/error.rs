//! Unified error type for the blynclight-lib crate.
//!
//! [`BlyncError`] wraps module-specific errors (`DeviceError`, `CommandError`)
//! and domain-specific error kinds (`Config`, `Color`).
//! `From` impls allow `?` to propagate across module boundaries.

use std::fmt;

use crate::control::CommandError;
use crate::vendor::DeviceError;

/// Unified error type for blynclight-lib operations.
#[derive(Debug)]
pub enum BlyncError {
    /// Vendor-layer lifecycle error (enumeration, open, capacity).
    Device(DeviceError),
    /// A device command was rejected or failed.
    Command(CommandError),
    /// Standard I/O error (config persistence).
    Io(std::io::Error),
    /// Configuration validation error.
    Config(String),
    /// Color parsing error.
    Color(String),
}

impl fmt::Display for BlyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlyncError::Device(e) => write!(f, "{e}"),
            BlyncError::Command(e) => write!(f, "{e}"),
            BlyncError::Io(e) => write!(f, "I/O error: {e}"),
            BlyncError::Config(e) => write!(f, "Config error: {e}"),
            BlyncError::Color(e) => write!(f, "Color error: {e}"),
        }
    }
}

impl std::error::Error for BlyncError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BlyncError::Device(e) => Some(e),
            BlyncError::Command(e) => Some(e),
            BlyncError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DeviceError> for BlyncError {
    fn from(e: DeviceError) -> Self {
        BlyncError::Device(e)
    }
}

impl From<CommandError> for BlyncError {
    fn from(e: CommandError) -> Self {
        BlyncError::Command(e)
    }
}

impl From<std::io::Error> for BlyncError {
    fn from(e: std::io::Error) -> Self {
        BlyncError::Io(e)
    }
}

/// Crate-level Result alias using [`BlyncError`].
pub type Result<T> = std::result::Result<T, BlyncError>;
