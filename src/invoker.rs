use crate::config::Configuration;
use crate::error::Result;
use crate::report::DebugReporter;
use crate::tool::{Executable, ToolLocator, ToolSpec};
use crate::types::*;
use std::io::{self, Read};
use std::process::Stdio;
use tokio::process::Command;

const DEBUG_FLAGS: &[&str] = &[
	"--debug",
	"--formatting=PRETTY_PRINT",
	"--formatting=PRINT_INPUT_DELIMITER",
];

/// Runs the external compiler for a [`Configuration`].
#[derive(Debug)]
pub struct CompilerInvoker {
	locator: ToolLocator,
}

impl CompilerInvoker {
	pub fn new(tool: ToolSpec) -> Self {
		Self {
			locator: ToolLocator::new(tool),
		}
	}

	/// Locate the compiler now instead of on the first [`compile`](Self::compile).
	pub fn resolve_tool(&self) -> Result<&Executable> {
		self.locator.resolve()
	}

	/// Compiler flags for `config`, in the order they are passed.
	pub fn arguments(config: &Configuration) -> Vec<String> {
		let mut args = vec![
			format!("--compilation_level={}", config.compilation_level()),
			format!("--language_in={}", config.language_in()),
		];

		args.extend(config.source_files().iter().map(|file| format!("--js={}", file)));
		args.push(format!("--js_output_file={}", config.target_file()));

		if config.debug() {
			args.extend(DEBUG_FLAGS.iter().map(|flag| flag.to_string()));
		}

		args
	}

	/// Run the compiler and wait for it to exit.
	///
	/// The tool's exit code is returned as is; only failing to locate or start it is an error.
	/// With debug enabled a report is appended to the target file afterwards, and any problem
	/// doing so is logged without affecting the result.
	pub async fn compile(&self, config: &Configuration) -> Result<InvocationResult> {
		let executable = self.resolve_tool()?;
		let args = Self::arguments(config);

		let mut command_line: Vec<String> = vec![executable.runtime.display().to_string()];
		command_line.extend(executable.prefix_args());
		command_line.extend(args.iter().cloned());

		tracing::info!(sources = config.source_files().len(), output_file = config.target_file(), "compiling");
		tracing::debug!(command = %render_command(&command_line), "spawning compiler");

		// stdout and stderr share one pipe so the output keeps the order the tool wrote it in
		let (mut reader, writer) = io::pipe()?;
		let mut command = Command::new(&executable.runtime);
		command
			.args(executable.prefix_args())
			.args(&args)
			.stdin(Stdio::null())
			.stdout(writer.try_clone()?)
			.stderr(writer);

		let mut child = command.spawn()?;
		// the builder holds the write ends; reading only reaches EOF once they are closed
		drop(command);

		let reading = tokio::task::spawn_blocking(move || {
			let mut bytes = Vec::new();
			reader.read_to_end(&mut bytes).map(|_| bytes)
		});

		let status = child.wait().await?;
		let bytes = reading.await.map_err(io::Error::other)??;

		let result = InvocationResult {
			// killed by a signal
			exit_code: status.code().unwrap_or(-1),
			output: String::from_utf8_lossy(&bytes).into_owned(),
		};

		tracing::info!(exit_code = result.exit_code, "compiler finished");

		if config.debug() {
			let reporter = DebugReporter::new(config, render_command(&command_line), &result);

			if let Err(err) = reporter.append().await {
				tracing::warn!(error = %err, output_file = config.target_file(), "debug report skipped");
			}
		}

		Ok(result)
	}
}

/// Join arguments into one line, quoting the ones a shell would split.
pub fn render_command(args: &[String]) -> String {
	args.iter()
		.map(|arg| {
			if arg.is_empty() || arg.contains(|c: char| c.is_whitespace() || matches!(c, '\'' | '"' | '\\' | '$' | '`')) {
				format!("'{}'", arg.replace('\'', r"'\''"))
			} else {
				arg.clone()
			}
		})
		.collect::<Vec<_>>()
		.join(" ")
}
