use clap::{builder::Styles, Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use crate::config;
use crate::core::record::SortKey;

fn parse_alpha(s: &str) -> Result<f64, String> {
	let val: f64 = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
	if !val.is_finite() || val < 0.0 {
		Err(format!("alpha must be >= 0, got {}", val))
	} else {
		Ok(val)
	}
}

fn parse_batch(s: &str) -> Result<usize, String> {
	match s.parse::<usize>() {
		Ok(0) => Err("batch size must be at least 1".to_string()),
		Ok(val) => Ok(val),
		Err(_) => Err(format!("'{}' is not a valid batch size", s)),
	}
}

fn parse_seconds(s: &str) -> Result<f64, String> {
	let val: f64 = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
	if !val.is_finite() || val < 0.0 {
		Err(format!("seconds must be >= 0, got {}", val))
	} else {
		Ok(val)
	}
}

fn styles() -> Styles {
	Styles::styled()
		.header(anstyle::Style::new().bold().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Blue))))
		.usage(anstyle::Style::new().bold().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Blue))))
		.literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Blue))))
		.placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))))
		.valid(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Blue))))
		.invalid(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))))
}

#[derive(Parser, Debug)]
#[command(
	name = "lexis",
	author,
	version,
	about = "Vocabulary difficulty scaling and embedding generation",
	styles = styles(),
	disable_help_subcommand = true,
	after_help = format!(
		"{title}
  {lexis} {build}       {build_args}   {build_desc}
  {lexis} {embed}       {embed_args}           {embed_desc}
  {lexis} {thresholds}  {thresholds_args}                {thresholds_desc}",
		title = "Examples:".bright_blue().bold(),
		lexis = "lexis".bright_blue(),
		build = "build".yellow(),
		build_args = "--scale-difficulty -a 0.5",
		build_desc = "Rescale scores and write assets".dimmed(),
		embed = "embed".yellow(),
		embed_args = "--resume --batch 100",
		embed_desc = "Continue an interrupted run".dimmed(),
		thresholds = "thresholds".yellow(),
		thresholds_args = "--score 4200",
		thresholds_desc = "Show the band for a score".dimmed(),
	),
)]
pub struct Cli {
	/// Enable verbose debug output
	#[arg(short = 'v', long = "verbose", global = true)]
	pub verbose: bool,

	#[command(subcommand)]
	pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
	/// Build SQLite/JSON assets from the CSV master list
	Build {
		/// Master CSV file
		#[arg(long = "csv", default_value = config::DEFAULT_CSV)]
		csv: PathBuf,

		/// Output SQLite file
		#[arg(long = "db", default_value = config::DEFAULT_DB)]
		db: PathBuf,

		/// Output JSON file
		#[arg(long = "json", default_value = config::DEFAULT_JSON)]
		json: PathBuf,

		/// Skip writing JSON output
		#[arg(long = "no-json")]
		no_json: bool,

		/// Skip writing SQLite output
		#[arg(long = "no-db")]
		no_db: bool,

		/// Sort rows by this column before emitting
		#[arg(long = "sort-by", value_enum)]
		sort_by: Option<SortKey>,

		/// Renumber ids sequentially after sorting
		#[arg(long = "renumber")]
		renumber: bool,

		/// Remap difficulty_score into the target band and recompute thresholds
		#[arg(long = "scale-difficulty")]
		scale_difficulty: bool,

		/// Minimum value for the remapped difficulty score
		#[arg(long = "difficulty-min", default_value_t = config::DEFAULT_TARGET_MIN)]
		difficulty_min: i64,

		/// Maximum value for the remapped difficulty score
		#[arg(long = "difficulty-max", default_value_t = config::DEFAULT_TARGET_MAX)]
		difficulty_max: i64,

		/// Nudge scores toward the center (0 = linear, higher = more emphasis)
		#[arg(short = 'a', long = "difficulty-scale-alpha", default_value_t = config::DEFAULT_ALPHA, value_parser = parse_alpha)]
		alpha: f64,

		/// Band table as JSON ([{"label", "start", "end"}]); defaults to the built-in levels
		#[arg(long = "levels", value_name = "PATH")]
		levels: Option<PathBuf>,

		/// Where scaled threshold ranges are written when scaling is enabled
		#[arg(long = "thresholds-json", default_value = config::DEFAULT_THRESHOLDS)]
		thresholds_json: PathBuf,
	},

	/// Generate embeddings for every word into an append-only JSONL log
	Embed {
		/// Vocabulary JSON
		#[arg(long = "vocab", default_value = config::DEFAULT_JSON)]
		vocab: PathBuf,

		/// JSONL output path
		#[arg(long = "out", default_value = config::DEFAULT_EMBEDDINGS)]
		out: PathBuf,

		/// Number of words per embeddings request
		#[arg(short = 'b', long = "batch", default_value_t = config::DEFAULT_BATCH_SIZE, value_parser = parse_batch)]
		batch: usize,

		/// Embedding model
		#[arg(long = "model", env = config::MODEL_ENV, default_value = config::DEFAULT_MODEL)]
		model: String,

		/// Base URL of the OpenAI-compatible API
		#[arg(long = "base-url", env = config::BASE_URL_ENV, default_value = config::DEFAULT_BASE_URL)]
		base_url: String,

		/// API key (read from the environment)
		#[arg(long = "api-key", env = config::API_KEY_ENV, hide_env_values = true)]
		api_key: Option<String>,

		/// Seconds to wait between requests
		#[arg(long = "sleep", default_value_t = config::DEFAULT_PACING_SECS, value_parser = parse_seconds)]
		sleep: f64,

		/// Skip words that already exist in the output file
		#[arg(short = 'r', long = "resume")]
		resume: bool,

		/// Extra prompt text appended to each word
		#[arg(long = "prompt", default_value = "")]
		prompt: String,

		/// Give up on a batch after this many retries
		#[arg(long = "max-retries", default_value_t = config::DEFAULT_MAX_RETRIES)]
		max_retries: u32,

		/// Retry failing batches until they succeed
		#[arg(long = "retry-forever", conflicts_with = "max_retries")]
		retry_forever: bool,

		/// Max seconds to wait for each request
		#[arg(long = "timeout", default_value_t = config::DEFAULT_TIMEOUT_SECS)]
		timeout: u64,
	},

	/// Show scaled threshold bands, optionally classifying a score
	Thresholds {
		/// Thresholds JSON written by `build --scale-difficulty`
		#[arg(long = "file", default_value = config::DEFAULT_THRESHOLDS)]
		file: PathBuf,

		/// Scaled score to place in a band
		#[arg(short = 's', long = "score")]
		score: Option<i64>,
	},

	/// Show help for a subcommand
	Help {
		/// Subcommand name
		subcommand: Option<String>,
	},
}
