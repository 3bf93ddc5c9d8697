use crate::config::Configuration;
use crate::error::{Error, Result};
use crate::types::InvocationResult;
use std::fmt::Write as _;
use tokio::io::AsyncWriteExt;

/// Diagnostic comment block appended to a compiled file.
///
/// The raw size comes from concatenating the sources into a transient `.raw.js` file
/// next to the target, which is removed once measured.
pub struct DebugReporter<'a> {
	config: &'a Configuration,
	command: String,
	result: &'a InvocationResult,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SizeComparison {
	pub raw: u64,
	pub compiled: u64,
}

impl SizeComparison {
	/// Share of the raw size removed by compilation, in percent.
	pub fn saved_percent(&self) -> f64 {
		if self.raw == 0 {
			return 0.0;
		}

		(self.raw as f64 - self.compiled as f64) * 100.0 / self.raw as f64
	}
}

impl<'a> DebugReporter<'a> {
	pub fn new(config: &'a Configuration, command: String, result: &'a InvocationResult) -> Self {
		Self {
			config,
			command,
			result,
		}
	}

	pub async fn append(&self) -> Result<()> {
		let target = self.config.target_file();
		let compiled = tokio::fs::read(target).await?;
		let sizes = SizeComparison {
			raw: self.raw_size().await?,
			compiled: compiled.len() as u64,
		};

		let mut block = String::new();

		if !compiled.is_empty() && !compiled.ends_with(b"\n") {
			block.push('\n');
		}

		block.push_str(&self.render(sizes));

		let mut file = tokio::fs::OpenOptions::new().append(true).open(target).await?;
		file.write_all(block.as_bytes()).await?;
		file.flush().await?;

		tracing::debug!(output_file = target, saved_percent = sizes.saved_percent(), "debug report appended");
		Ok(())
	}

	async fn raw_size(&self) -> Result<u64> {
		let raw_path = raw_file_name(self.config.target_file());

		if self.config.source_files().contains(&raw_path) {
			return Err(Error::configuration(raw_path, "raw concatenation would overwrite a source file"));
		}

		let measured = async {
			let mut raw = tokio::fs::File::create(&raw_path).await?;

			for source in self.config.source_files() {
				let mut input = tokio::fs::File::open(source).await?;
				tokio::io::copy(&mut input, &mut raw).await?;
			}

			raw.flush().await?;
			drop(raw);

			Ok::<_, Error>(tokio::fs::metadata(&raw_path).await?.len())
		}.await;

		// removed on every path, including a source vanishing since it was added
		if let Err(err) = tokio::fs::remove_file(&raw_path).await {
			if err.kind() != std::io::ErrorKind::NotFound {
				tracing::warn!(error = %err, raw_file = %raw_path, "raw concatenation left behind");
			}
		}

		measured
	}

	pub fn render(&self, sizes: SizeComparison) -> String {
		let config = self.config;
		let mut lines = vec![
			"minjs debug report".to_string(),
			String::new(),
			format!("files ({}):", config.source_files().len()),
		];

		lines.extend(config.source_files().iter().map(|file| format!("  {}", file)));
		lines.extend([
			String::new(),
			format!("raw size:      {} bytes", sizes.raw),
			format!("compiled size: {} bytes", sizes.compiled),
			format!("saved:         {:.2}%", sizes.saved_percent()),
			String::new(),
			format!("command: {}", self.command),
			format!("output:  {}", self.result.last_line()),
			String::new(),
			format!("language_in:       {}", config.language_in()),
			format!("compilation_level: {}", config.compilation_level()),
		]);

		let mut block = String::from("/*\n");

		for line in lines {
			let line = line.replace("*/", "* /");
			let _ = writeln!(block, " *{}{}", if line.is_empty() { "" } else { " " }, line);
		}

		block.push_str(" */\n");
		block
	}
}

/// `app.min.js` becomes `app.raw.js`; other names get `.raw.js` in place of `.js` or appended.
pub fn raw_file_name(target: &str) -> String {
	if let Some(stem) = target.strip_suffix(".min.js") {
		format!("{}.raw.js", stem)
	} else if let Some(stem) = target.strip_suffix(".js") {
		format!("{}.raw.js", stem)
	} else {
		format!("{}.raw.js", target)
	}
}
