//! Blynclight — one uniform control surface over the Embrava status-light SDKs.

pub mod color;
pub mod config;
pub mod control;
pub mod error;
pub mod models;
pub mod protocol;
pub mod table;
pub mod vendor;

pub use control::{CommandError, CommandResult, Controller, Outcome};
pub use error::BlyncError;
pub use vendor::{Polarity, VendorSdk};
