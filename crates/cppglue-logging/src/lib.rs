//! cppglue-logging - Tracing setup for the cppglue command line
//!
//! This crate provides:
//! - [`LogLevel`] parsed from flags and configuration files
//! - [`init_logging`] to install a stderr `fmt` subscriber
//! - [`ReloadHandle`] to change the level after startup

mod level;
mod reload;
mod subscriber;

pub use level::LogLevel;
pub use reload::ReloadHandle;
pub use subscriber::init_logging;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{LogLevel, ReloadHandle, init_logging};
}
