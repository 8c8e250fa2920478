//! Lexis - vocabulary difficulty scaling and embedding generation

use anyhow::Result;
use clap::{CommandFactory, Parser};

use lexis::cli::{Cli, Command};
use lexis::commands::build::{self, BuildArgs, ScalingArgs};
use lexis::commands::embed::{self, EmbedArgs};
use lexis::commands::thresholds;
use lexis::ui;

fn main() {
	if let Err(e) = run() {
		ui::error(&format!("{:#}", e));
		std::process::exit(1);
	}
}

fn run() -> Result<()> {
	let cli = Cli::parse();
	ui::Log::set_verbose(cli.verbose);

	match cli.command {
		Command::Build {
			csv,
			db,
			json,
			no_json,
			no_db,
			sort_by,
			renumber,
			scale_difficulty,
			difficulty_min,
			difficulty_max,
			alpha,
			levels,
			thresholds_json,
		} => {
			ui::banner();
			let scaling = scale_difficulty.then(|| ScalingArgs {
				target_min: difficulty_min,
				target_max: difficulty_max,
				alpha,
				levels,
				thresholds_json,
			});
			build::run(BuildArgs {
				csv,
				db: build::output_target(&db, no_db),
				json: build::output_target(&json, no_json),
				sort_by,
				renumber,
				scaling,
			})?;
			Ok(())
		}
		Command::Embed {
			vocab,
			out,
			batch,
			model,
			base_url,
			api_key,
			sleep,
			resume,
			prompt,
			max_retries,
			retry_forever,
			timeout,
		} => {
			ui::banner();
			embed::run(EmbedArgs {
				vocab,
				out,
				batch,
				model,
				base_url,
				api_key,
				sleep,
				resume,
				prompt,
				max_retries: (!retry_forever).then_some(max_retries),
				timeout,
			})?;
			Ok(())
		}
		Command::Thresholds { file, score } => thresholds::run(&file, score),
		Command::Help { subcommand } => {
			let mut cmd = Cli::command();
			match subcommand {
				Some(sub) => match cmd.find_subcommand_mut(&sub) {
					Some(sub_cmd) => sub_cmd.print_help()?,
					None => {
						ui::error(&format!("Unknown subcommand: {}", sub));
						cmd.print_help()?;
					}
				},
				None => cmd.print_help()?,
			}
			Ok(())
		}
	}
}
