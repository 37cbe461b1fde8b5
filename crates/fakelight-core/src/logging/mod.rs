//! Logging utilities.
//!
//! The core only ever talks to the `log` facade. Hosts that do not install
//! their own logger can call [`init_logging`] once at startup.

mod init;

pub use init::{init_logging, LoggingConfig};
