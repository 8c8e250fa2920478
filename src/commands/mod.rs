//! # Command Implementations
//!
//! Each submodule handles one CLI command (build, embed, thresholds).

pub mod build;
pub mod embed;
pub mod thresholds;
