//! # Lexis Library
//!
//! Difficulty score rescaling with labeled threshold bands, and a resumable,
//! rate-limited batch pipeline that embeds a vocabulary list into an
//! append-only JSONL log.

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod embedder;
pub mod error;
pub mod processing;
pub mod storage;
pub mod ui;

pub use error::{LexisError, Result};
