mod compile;
mod show;

use clap::Parser;
use color_print::*;

#[derive(clap::Parser)]
#[command(version, about, long_about = None, args_conflicts_with_subcommands = true, subcommand_negates_reqs = true, disable_help_subcommand = true, flatten_help = true)]
struct Cli {
	#[command(subcommand)]
	command: Option<Command>,

	#[clap(flatten)]
	args: compile::Args,
}

#[derive(clap::Subcommand, Clone)]
enum Command {
	#[command(hide = true)]
	Compile(compile::Args),
	/// Show the effective settings
	Config(show::Args),
}

/// Log to stderr when `MINJS_LOG` is set, e.g. `MINJS_LOG=minjs=debug`.
fn init_tracing() {
	use tracing_subscriber::{fmt, prelude::*, EnvFilter};

	if let Ok(filter) = EnvFilter::try_from_env("MINJS_LOG") {
		tracing_subscriber::registry()
			.with(fmt::layer().with_writer(std::io::stderr).with_target(true).with_level(true))
			.with(filter)
			.init();
	}
}

#[tokio::main]
async fn main() {
	init_tracing();

	let cli = Cli::parse();
	let command = cli.command.unwrap_or_else(|| Command::Compile(cli.args));

	let result = match command {
		Command::Compile(args) => compile::run(args).await,
		Command::Config(args) => show::run(args).await,
	};

	if let Err(err) = result {
		ceprintln!("<r!><s>Error:</></> {}", err);

		let code = err
			.downcast_ref::<minjs::Error>()
			.map_or(1, minjs::Error::exit_code);

		std::process::exit(code);
	}
}
