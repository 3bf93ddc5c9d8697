//! Configure and run an external JavaScript minifying compiler.
//!
//! A [`ConfigBuilder`] collects and validates the compiler options, [`CompilerInvoker`]
//! runs the compiler for the resulting [`Configuration`], and in debug mode a
//! [`DebugReporter`](report::DebugReporter) appends size and command diagnostics to the output.

pub mod types;
pub mod error;
pub mod config;
pub mod settings;
pub mod tool;
pub mod invoker;
pub mod report;

pub use config::{ConfigBuilder, Configuration};
pub use error::{Error, Result};
pub use invoker::CompilerInvoker;
pub use tool::ToolSpec;
