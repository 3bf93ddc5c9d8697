use serde::{Deserialize, Serialize};

/// Input dialect the compiler parses sources as.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize, clap::ValueEnum, strum::Display, strum::EnumString, strum::VariantNames)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[clap(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LanguageIn {
	#[default]
	#[serde(rename = "ECMASCRIPT3")]
	#[strum(serialize = "ECMASCRIPT3")]
	#[value(name = "ECMASCRIPT3")]
	Ecmascript3,
	#[serde(rename = "ECMASCRIPT5")]
	#[strum(serialize = "ECMASCRIPT5")]
	#[value(name = "ECMASCRIPT5")]
	Ecmascript5,
	#[serde(rename = "ECMASCRIPT5_STRICT")]
	#[strum(serialize = "ECMASCRIPT5_STRICT")]
	#[value(name = "ECMASCRIPT5_STRICT")]
	Ecmascript5Strict,
}

/// How aggressively the compiler optimizes.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize, clap::ValueEnum, strum::Display, strum::EnumString, strum::VariantNames)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[clap(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompilationLevel {
	#[default]
	WhitespaceOnly,
	SimpleOptimizations,
	AdvancedOptimizations,
}

/// Outcome of a single compiler run.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct InvocationResult {
	pub exit_code: i32,
	pub output: String,
}

impl InvocationResult {
	pub fn success(&self) -> bool {
		self.exit_code == 0
	}

	/// Last non-empty line of the captured output.
	pub fn last_line(&self) -> &str {
		self.output
			.lines()
			.rev()
			.map(str::trim_end)
			.find(|line| !line.is_empty())
			.unwrap_or_default()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::str::FromStr;
	use strum::VariantNames;

	#[test]
	fn language_names_match_compiler_flags() {
		assert_eq!(LanguageIn::VARIANTS, &["ECMASCRIPT3", "ECMASCRIPT5", "ECMASCRIPT5_STRICT"]);
		assert_eq!(LanguageIn::Ecmascript5Strict.to_string(), "ECMASCRIPT5_STRICT");
		assert_eq!(LanguageIn::from_str("ECMASCRIPT5"), Ok(LanguageIn::Ecmascript5));
		assert!(LanguageIn::from_str("ES6").is_err());
		assert_eq!(LanguageIn::default(), LanguageIn::Ecmascript3);
	}

	#[test]
	fn level_names_match_compiler_flags() {
		assert_eq!(CompilationLevel::VARIANTS, &["WHITESPACE_ONLY", "SIMPLE_OPTIMIZATIONS", "ADVANCED_OPTIMIZATIONS"]);
		assert_eq!(CompilationLevel::from_str("ADVANCED_OPTIMIZATIONS"), Ok(CompilationLevel::AdvancedOptimizations));
		assert_eq!(CompilationLevel::default().to_string(), "WHITESPACE_ONLY");
	}

	#[test]
	fn settings_values_deserialize_from_flag_names() {
		#[derive(Deserialize)]
		struct Row {
			language_in: LanguageIn,
			compilation_level: CompilationLevel,
		}

		let row: Row = toml::from_str("language_in = \"ECMASCRIPT5_STRICT\"\ncompilation_level = \"SIMPLE_OPTIMIZATIONS\"").unwrap();
		assert_eq!(row.language_in, LanguageIn::Ecmascript5Strict);
		assert_eq!(row.compilation_level, CompilationLevel::SimpleOptimizations);
	}

	#[test]
	fn last_line_skips_trailing_blank_lines() {
		let result = InvocationResult {
			exit_code: 0,
			output: "first\n0 error(s), 2 warning(s)\n\n".into(),
		};

		assert_eq!(result.last_line(), "0 error(s), 2 warning(s)");
		assert_eq!(InvocationResult::default().last_line(), "");
	}
}
