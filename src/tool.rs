use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// How to launch the compiler: a runtime program and the archive it runs.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ToolSpec {
	pub runtime: String,
	pub compiler_jar: PathBuf,
}

/// A launchable compiler, with the runtime resolved to an absolute path.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Executable {
	pub runtime: PathBuf,
	pub compiler_jar: PathBuf,
}

impl Executable {
	/// Arguments that precede the compiler's own flags.
	pub fn prefix_args(&self) -> [String; 2] {
		["-jar".into(), self.compiler_jar.display().to_string()]
	}
}

/// Resolves a [`ToolSpec`] the first time it is needed and reuses the result.
#[derive(Debug)]
pub struct ToolLocator {
	spec: ToolSpec,
	resolved: OnceLock<Executable>,
}

impl ToolLocator {
	pub fn new(spec: ToolSpec) -> Self {
		Self {
			spec,
			resolved: OnceLock::new(),
		}
	}

	pub fn resolve(&self) -> Result<&Executable> {
		if let Some(executable) = self.resolved.get() {
			return Ok(executable);
		}

		let executable = locate(&self.spec)?;
		tracing::debug!(runtime = %executable.runtime.display(), jar = %executable.compiler_jar.display(), "resolved compiler");

		Ok(self.resolved.get_or_init(|| executable))
	}
}

fn locate(spec: &ToolSpec) -> Result<Executable> {
	let runtime = which::which(&spec.runtime).map_err(|_| Error::ToolNotFound {
		what: "runtime",
		name: spec.runtime.clone(),
	})?;

	if !Path::new(&spec.compiler_jar).is_file() {
		return Err(Error::ToolNotFound {
			what: "compiler archive",
			name: spec.compiler_jar.display().to_string(),
		});
	}

	Ok(Executable {
		runtime,
		compiler_jar: spec.compiler_jar.clone(),
	})
}

#[cfg(all(test, unix))]
mod tests {
	use super::*;
	use std::fs;
	use std::os::unix::fs::PermissionsExt;
	use tempfile::TempDir;

	fn fake_runtime(dir: &Path) -> PathBuf {
		let path = dir.join("fake-java");
		fs::write(&path, "#!/bin/sh\nexit 0\n").unwrap();
		fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
		path
	}

	#[test]
	fn missing_runtime_is_tool_not_found() {
		let locator = ToolLocator::new(ToolSpec {
			runtime: "minjs-no-such-runtime".into(),
			compiler_jar: "compiler.jar".into(),
		});

		let err = locator.resolve().unwrap_err();
		assert!(matches!(err, Error::ToolNotFound { what: "runtime", .. }));
		assert_eq!(err.exit_code(), 127);
	}

	#[test]
	fn missing_archive_is_tool_not_found() {
		let dir = TempDir::new().unwrap();
		let locator = ToolLocator::new(ToolSpec {
			runtime: fake_runtime(dir.path()).display().to_string(),
			compiler_jar: dir.path().join("missing.jar"),
		});

		assert!(matches!(locator.resolve(), Err(Error::ToolNotFound { what: "compiler archive", .. })));
	}

	#[test]
	fn resolves_once() {
		let dir = TempDir::new().unwrap();
		let runtime = fake_runtime(dir.path());
		let jar = dir.path().join("compiler.jar");
		fs::write(&jar, "").unwrap();

		let locator = ToolLocator::new(ToolSpec {
			runtime: runtime.display().to_string(),
			compiler_jar: jar.clone(),
		});

		let first = locator.resolve().unwrap().clone();
		assert_eq!(first.runtime, runtime);
		assert_eq!(first.prefix_args(), ["-jar".to_string(), jar.display().to_string()]);

		// later environment changes are not observed
		fs::remove_file(&runtime).unwrap();
		assert_eq!(locator.resolve().unwrap(), &first);
	}
}
