//! # User Interface
//!
//! Timestamped, colored terminal output.

pub mod log;

pub use log::{banner, debug, error, header, info, success, summary, warn, Log};
