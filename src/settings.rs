use crate::error::{Error, Result};
use crate::types::*;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};

const APP_DIR: &str = "minjs";
const SETTINGS_FILE: &str = "config.toml";

/// Persistent defaults, read from a TOML file. Command-line options take precedence.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
	/// Program that runs the compiler archive, looked up on `PATH`
	pub runtime: String,
	pub compiler_jar: PathBuf,
	pub language_in: LanguageIn,
	pub compilation_level: CompilationLevel,
	pub debug: bool,
	pub source_dir: String,
	pub target_dir: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub output: Option<String>,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			runtime: "java".into(),
			compiler_jar: PathBuf::from("compiler.jar"),
			language_in: LanguageIn::default(),
			compilation_level: CompilationLevel::default(),
			debug: false,
			source_dir: Default::default(),
			target_dir: Default::default(),
			output: None,
		}
	}
}

impl Settings {
	/// Load settings from `path`, or from the user config directory when no path is given.
	/// Only an explicitly requested file has to exist.
	pub async fn load(path: Option<&Path>) -> Result<Self> {
		match path {
			Some(path) => Self::read(path).await,
			None => match default_path() {
				Some(path) if tokio::fs::try_exists(&path).await.unwrap_or(false) => Self::read(&path).await,
				_ => Ok(Self::default()),
			},
		}
	}

	async fn read(path: &Path) -> Result<Self> {
		let settings_error = |reason: String| Error::Settings {
			path: path.to_path_buf(),
			reason,
		};

		let text = tokio::fs::read_to_string(path)
			.await
			.map_err(|e| settings_error(e.to_string()))?;

		let settings = toml::from_str(&text).map_err(|e| settings_error(e.message().to_string()))?;
		tracing::debug!(path = %path.display(), "loaded settings");

		Ok(settings)
	}
}

pub fn default_path() -> Option<PathBuf> {
	dirs::config_dir().map(|dir| dir.join(APP_DIR).join(SETTINGS_FILE))
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;
	use tempfile::TempDir;

	#[tokio::test]
	async fn reads_partial_file_over_defaults() {
		let dir = TempDir::new().unwrap();
		let path = dir.path().join("config.toml");
		tokio::fs::write(&path, "compiler_jar = \"/opt/closure/compiler.jar\"\nlanguage_in = \"ECMASCRIPT5\"\ndebug = true\n").await.unwrap();

		let settings = Settings::load(Some(&path)).await.unwrap();

		assert_eq!(settings, Settings {
			compiler_jar: PathBuf::from("/opt/closure/compiler.jar"),
			language_in: LanguageIn::Ecmascript5,
			debug: true,
			..Settings::default()
		});
	}

	#[tokio::test]
	async fn rejects_unknown_level() {
		let dir = TempDir::new().unwrap();
		let path = dir.path().join("config.toml");
		tokio::fs::write(&path, "compilation_level = \"EXTREME\"\n").await.unwrap();

		let err = Settings::load(Some(&path)).await.unwrap_err();
		assert!(matches!(err, Error::Settings { .. }));
	}

	#[tokio::test]
	async fn explicit_file_must_exist() {
		let dir = TempDir::new().unwrap();
		let err = Settings::load(Some(&dir.path().join("nope.toml"))).await.unwrap_err();
		assert!(matches!(err, Error::Settings { .. }));
	}
}
