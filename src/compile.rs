use minjs::settings::Settings;
use minjs::types::*;
use minjs::{CompilerInvoker, ConfigBuilder, Configuration, ToolSpec};
use std::path::PathBuf;
use anyhow::Result;
use color_print::*;

#[derive(clap::Args, Clone, Debug)]
pub struct Args {
	/// Source files to compile, in bundle order
	#[arg(required = true)]
	files: Vec<String>,

	/// Directory source file names are relative to
	#[arg(short, long, value_name = "DIR")]
	source_dir: Option<String>,

	/// Directory the output file name is relative to
	#[arg(short, long, value_name = "DIR")]
	target_dir: Option<String>,

	/// Output file [default: compiled.min.js]
	#[arg(short, long, value_name = "FILE")]
	output: Option<String>,

	/// Language dialect of the sources
	#[arg(short, long, value_enum)]
	language_in: Option<LanguageIn>,

	/// Optimization level
	#[arg(short, long, value_enum)]
	compilation_level: Option<CompilationLevel>,

	/// Pretty print the output and append a debug report to it
	#[arg(short, long, overrides_with = "no_debug")]
	debug: bool,

	/// Turn debug output off even when the settings file enables it
	#[arg(long, overrides_with = "debug")]
	no_debug: bool,

	/// Program used to run the compiler archive
	#[arg(long, value_name = "PROGRAM")]
	runtime: Option<String>,

	/// Path to the compiler archive
	#[arg(long, value_name = "PATH")]
	compiler_jar: Option<PathBuf>,

	/// Settings file to use instead of the default one
	#[arg(long, value_name = "PATH")]
	config: Option<PathBuf>,
}

impl Args {
	fn configure(&self, settings: &Settings) -> minjs::Result<Configuration> {
		let mut builder = ConfigBuilder::new();

		builder
			.source_base_dir(self.source_dir.as_deref().unwrap_or(&settings.source_dir))?
			.target_base_dir(self.target_dir.as_deref().unwrap_or(&settings.target_dir))?
			.language_in(self.language_in.unwrap_or(settings.language_in))
			.compilation_level(self.compilation_level.unwrap_or(settings.compilation_level))
			.debug(!self.no_debug && (self.debug || settings.debug))
			.set_source_files(&self.files, true)?;

		if let Some(output) = self.output.as_deref().or(settings.output.as_deref()) {
			builder.target_file(output);
		}

		builder.build()
	}

	fn tool(&self, settings: &Settings) -> ToolSpec {
		ToolSpec {
			runtime: self.runtime.clone().unwrap_or_else(|| settings.runtime.clone()),
			compiler_jar: self.compiler_jar.clone().unwrap_or_else(|| settings.compiler_jar.clone()),
		}
	}
}

pub async fn run(args: Args) -> Result<()> {
	let settings = Settings::load(args.config.as_deref()).await?;
	let config = args.configure(&settings)?;
	let invoker = CompilerInvoker::new(args.tool(&settings));

	let result = invoker.compile(&config).await?;

	if !result.output.is_empty() {
		eprint!("{}", result.output);
	}

	if !result.success() {
		ceprintln!("<r!>Compiler exited with status <s>{}</>.", result.exit_code);
		std::process::exit(result.exit_code); // pass the tool's status through
	}

	cprintln!(
		"<g!>Compiled <s>{}</> source file(s) into <s>{}</>.",
		config.source_files().len(),
		config.target_file(),
	);

	Ok(())
}
