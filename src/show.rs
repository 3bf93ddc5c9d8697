use minjs::settings::{self, Settings};
use std::path::PathBuf;
use anyhow::Result;
use color_print::*;
use colored_json::to_colored_json_auto;

#[derive(clap::Args, Clone, Debug)]
pub struct Args {
	/// Output format
	#[arg(short, long, value_enum, default_value_t = ShowFormat::default())]
	format: ShowFormat,

	/// Settings file to use instead of the default one
	#[arg(long, value_name = "PATH")]
	config: Option<PathBuf>,
}

#[derive(Copy, Clone, Default, Debug, clap::ValueEnum, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ShowFormat {
	#[default]
	Flat,
	TOML,
	JSON,
}

fn format(settings: &Settings, format: ShowFormat) -> Result<String> {
	match format {
		ShowFormat::Flat => {
			Ok([
				cformat!("<b!>runtime:</> {}", settings.runtime),
				cformat!("<b!>compiler_jar:</> {}", settings.compiler_jar.display()),
				cformat!("<b!>language_in:</> {}", settings.language_in),
				cformat!("<b!>compilation_level:</> {}", settings.compilation_level),
				cformat!("<b!>debug:</> {}", settings.debug),
				cformat!("<b!>source_dir:</> {}", settings.source_dir),
				cformat!("<b!>target_dir:</> {}", settings.target_dir),
				cformat!("<b!>output:</> {}", settings.output.as_deref().unwrap_or_default()),
			].join("\n") + "\n")
		}
		ShowFormat::TOML => {
			toml::to_string(settings).map_err(|e| e.into())
		}
		ShowFormat::JSON => {
			serde_json::to_value(settings)
				.map(|v| to_colored_json_auto(&v).unwrap_or_default() + "\n")
				.map_err(|e| e.into())
		}
	}
}

pub async fn run(args: Args) -> Result<()> {
	let path = args.config.clone().or_else(settings::default_path);
	let settings = Settings::load(args.config.as_deref()).await?;

	if let Some(path) = path {
		ceprintln!("<k!># {}", path.display());
	}

	print!("{}", format(&settings, args.format)?);
	Ok(())
}
