//! Unified logging system

use chrono::Local;
use colored::*;
use std::sync::atomic::{AtomicBool, Ordering};

static VERBOSE: AtomicBool = AtomicBool::new(false);

pub struct Log;

impl Log {
	pub fn set_verbose(enabled: bool) {
		VERBOSE.store(enabled, Ordering::Relaxed);
	}

	pub fn is_verbose() -> bool {
		VERBOSE.load(Ordering::Relaxed)
	}
}

fn stamp() -> ColoredString {
	Local::now().format("%H:%M:%S").to_string().dimmed()
}

pub fn info(msg: &str) {
	println!("[{}] {} {}", stamp(), "ℹ".bright_blue().bold(), msg.bright_white());
}

pub fn success(msg: &str) {
	println!("[{}] {} {}", stamp(), "✓".bright_green().bold(), msg.bright_white());
}

pub fn warn(msg: &str) {
	println!("[{}] {} {}", stamp(), "⚠".bright_yellow().bold(), msg.bright_white());
}

pub fn error(msg: &str) {
	eprintln!("[{}] {} {}", stamp(), "✗".bright_red().bold(), msg.bright_white());
}

pub fn debug(msg: &str) {
	if Log::is_verbose() {
		println!("[{}] {} {}", stamp(), "⚙".bright_black().bold(), msg.dimmed());
	}
}

pub fn header(text: &str) {
	println!();
	println!("{}", format!("─── {} ───", text).bright_blue().bold());
}

/// Banner printed once at the start of a command.
pub fn banner() {
	header(&format!("lexis v{}", env!("CARGO_PKG_VERSION")));
}

/// End-of-run statistics; zero rows are left out.
pub fn summary(rows: &[(&str, usize)], duration_secs: f32) {
	header("Summary");
	for (label, count) in rows.iter().filter(|(_, count)| *count > 0) {
		println!("  {} {}", format!("{}:", label).bright_blue(), count);
	}
	println!("  {} {:.2}s", "Duration:".bright_blue(), duration_secs);
	println!();
}
