use crate::error::{Error, Result};
use crate::types::*;
use std::path::{Path, MAIN_SEPARATOR};
use std::str::FromStr;
use serde::Serialize;
use strum::VariantNames;

pub const DEFAULT_TARGET_FILE: &str = "compiled.min.js";

/// A validated compiler configuration. Only [`ConfigBuilder::build`] creates one,
/// so the target never overwrites a source and at least one source is present.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Configuration {
	source_base_dir: String,
	target_base_dir: String,
	debug: bool,
	language_in: LanguageIn,
	compilation_level: CompilationLevel,
	source_files: Vec<String>,
	target_file: String,
}

impl Configuration {
	pub fn builder() -> ConfigBuilder {
		ConfigBuilder::new()
	}

	pub fn source_base_dir(&self) -> &str {
		&self.source_base_dir
	}

	pub fn target_base_dir(&self) -> &str {
		&self.target_base_dir
	}

	pub fn debug(&self) -> bool {
		self.debug
	}

	pub fn language_in(&self) -> LanguageIn {
		self.language_in
	}

	pub fn compilation_level(&self) -> CompilationLevel {
		self.compilation_level
	}

	pub fn source_files(&self) -> &[String] {
		&self.source_files
	}

	pub fn target_file(&self) -> &str {
		&self.target_file
	}
}

/// Collects compiler settings. Path setters check the filesystem at call time;
/// nothing is re-checked when the configuration is built.
#[derive(Clone, Debug)]
pub struct ConfigBuilder {
	source_base_dir: String,
	target_base_dir: String,
	debug: bool,
	language_in: LanguageIn,
	compilation_level: CompilationLevel,
	source_files: Vec<String>,
	target_file: String,
}

impl Default for ConfigBuilder {
	fn default() -> Self {
		Self {
			source_base_dir: Default::default(),
			target_base_dir: Default::default(),
			debug: false,
			language_in: LanguageIn::default(),
			compilation_level: CompilationLevel::default(),
			source_files: Vec::new(),
			target_file: DEFAULT_TARGET_FILE.into(),
		}
	}
}

impl ConfigBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Set the directory source file names are resolved against. An empty path clears it.
	pub fn source_base_dir(&mut self, path: &str) -> Result<&mut Self> {
		self.source_base_dir = normalize_base_dir(path)?;
		Ok(self)
	}

	/// Set the directory the target file name is resolved against. An empty path clears it.
	pub fn target_base_dir(&mut self, path: &str) -> Result<&mut Self> {
		self.target_base_dir = normalize_base_dir(path)?;
		Ok(self)
	}

	pub fn add_source_file(&mut self, name: &str) -> Result<&mut Self> {
		let path = self.resolve_source(name);

		if self.source_files.contains(&path) {
			return Ok(self);
		}

		if !Path::new(&path).exists() {
			return Err(Error::configuration(path, "source file does not exist"));
		}

		self.source_files.push(path);
		Ok(self)
	}

	/// Add every name in order, optionally clearing the current list first.
	/// Either all names are accepted or the list is left as it was.
	pub fn set_source_files<I, S>(&mut self, names: I, reset: bool) -> Result<&mut Self>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut staged = self.clone();

		if reset {
			staged.source_files.clear();
		}

		for name in names {
			staged.add_source_file(name.as_ref())?;
		}

		self.source_files = staged.source_files;
		Ok(self)
	}

	/// Remove a source file if present. Unknown names are ignored.
	pub fn remove_source_file(&mut self, name: &str) -> &mut Self {
		let path = self.resolve_source(name);

		if let Some(index) = self.source_files.iter().position(|file| *file == path) {
			self.source_files.remove(index);
		}

		self
	}

	/// Set the output file. It does not need to exist yet.
	pub fn target_file(&mut self, name: &str) -> &mut Self {
		self.target_file = format!("{}{}", self.target_base_dir, name);
		self
	}

	pub fn language_in(&mut self, value: LanguageIn) -> &mut Self {
		self.language_in = value;
		self
	}

	pub fn parse_language_in(&mut self, value: &str) -> Result<&mut Self> {
		let value = parse_option::<LanguageIn>("language_in", value)?;
		Ok(self.language_in(value))
	}

	pub fn compilation_level(&mut self, value: CompilationLevel) -> &mut Self {
		self.compilation_level = value;
		self
	}

	pub fn parse_compilation_level(&mut self, value: &str) -> Result<&mut Self> {
		let value = parse_option::<CompilationLevel>("compilation_level", value)?;
		Ok(self.compilation_level(value))
	}

	pub fn debug(&mut self, value: bool) -> &mut Self {
		self.debug = value;
		self
	}

	pub fn source_files(&self) -> &[String] {
		&self.source_files
	}

	/// Freeze into a [`Configuration`].
	///
	/// A bare target file name picks up the target base dir here, so the order of
	/// `target_file` and `target_base_dir` calls does not matter. The overwrite
	/// check runs against the resolved name.
	pub fn build(&self) -> Result<Configuration> {
		let target_file = if has_dir_component(&self.target_file) || self.target_base_dir.is_empty() {
			self.target_file.clone()
		} else {
			format!("{}{}", self.target_base_dir, self.target_file)
		};

		if self.source_files.contains(&target_file) {
			return Err(Error::configuration(target_file, "target file would overwrite a source file"));
		}

		if self.source_files.is_empty() {
			return Err(Error::configuration(self.source_base_dir.clone(), "no source files were added"));
		}

		Ok(Configuration {
			source_base_dir: self.source_base_dir.clone(),
			target_base_dir: self.target_base_dir.clone(),
			debug: self.debug,
			language_in: self.language_in,
			compilation_level: self.compilation_level,
			source_files: self.source_files.clone(),
			target_file,
		})
	}

	fn resolve_source(&self, name: &str) -> String {
		format!("{}{}", self.source_base_dir, name)
	}
}

fn normalize_base_dir(path: &str) -> Result<String> {
	if path.is_empty() {
		return Ok(String::new());
	}

	if !Path::new(path).exists() {
		return Err(Error::configuration(path, "directory does not exist"));
	}

	let trimmed = path.trim_end_matches(is_separator);
	Ok(format!("{}{}", trimmed, MAIN_SEPARATOR))
}

fn is_separator(c: char) -> bool {
	c == '/' || c == MAIN_SEPARATOR
}

fn has_dir_component(path: &str) -> bool {
	Path::new(path)
		.parent()
		.is_some_and(|parent| !parent.as_os_str().is_empty())
}

fn parse_option<T: FromStr + VariantNames>(option: &'static str, value: &str) -> Result<T> {
	T::from_str(value).map_err(|_| Error::InvalidOption {
		option,
		value: value.into(),
		expected: T::VARIANTS.join(", "),
	})
}
