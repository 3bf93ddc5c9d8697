use std::io;
use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// Invalid or missing path, or a target that would overwrite one of its sources.
	#[error("invalid configuration for \"{path}\": {reason}")]
	Configuration {
		path: String,
		reason: &'static str,
	},

	#[error("{what} not found: {name}")]
	ToolNotFound {
		what: &'static str,
		name: String,
	},

	#[error("invalid value \"{value}\" for {option} (expected one of: {expected})")]
	InvalidOption {
		option: &'static str,
		value: String,
		expected: String,
	},

	#[error("unable to load settings from {}: {reason}", path.display())]
	Settings {
		path: PathBuf,
		reason: String,
	},

	#[error("I/O error: {0}")]
	Io(#[from] io::Error),
}

impl Error {
	pub(crate) fn configuration(path: impl Into<String>, reason: &'static str) -> Self {
		Self::Configuration {
			path: path.into(),
			reason,
		}
	}

	/// Process exit status the CLI reports for this error.
	pub fn exit_code(&self) -> i32 {
		match self {
			Self::ToolNotFound { .. } => 127, // command not found
			_ => 1, // general error
		}
	}
}
