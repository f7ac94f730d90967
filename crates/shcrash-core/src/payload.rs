// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Assembly of the exception payload for a failed script invocation.

use std::path::{Component, Path, PathBuf};

use tracing::{debug, warn};

use crate::declare::parse_declarations;
use crate::event::{format_message, ExceptionPayload, Frame};
use crate::source::{FileContext, SourceContextExtractor, DEFAULT_CONTEXT_LINES};

/// Everything collected about one failed command.
///
/// Optional fields holding an empty string are treated as absent, since the
/// shell hook passes every flag whether or not it has a value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
	/// Path of the failing script, as the shell saw it.
	pub script: String,
	/// The failing command.
	pub command: String,
	/// 1-indexed failing line.
	pub lineno: u32,
	pub function: Option<String>,
	/// Working directory used to resolve `script`.
	pub pwd: Option<PathBuf>,
	/// Raw `declare -p` output.
	pub declares: Option<String>,
	/// Newline separated `KEY=VALUE` entries.
	pub env: Option<String>,
	pub stderr: Option<String>,
	pub cmdline_args: Option<String>,
}

impl Invocation {
	pub fn new(script: impl Into<String>, command: impl Into<String>, lineno: u32) -> Self {
		Self {
			script: script.into(),
			command: command.into(),
			lineno,
			..Default::default()
		}
	}

	pub fn function(&self) -> Option<&str> {
		non_empty(self.function.as_deref())
	}

	pub fn pwd(&self) -> Option<&Path> {
		self.pwd.as_deref().filter(|p| !p.as_os_str().is_empty())
	}

	pub fn declares(&self) -> Option<&str> {
		non_empty(self.declares.as_deref())
	}

	pub fn env(&self) -> Option<&str> {
		non_empty(self.env.as_deref())
	}

	pub fn stderr(&self) -> Option<&str> {
		non_empty(self.stderr.as_deref())
	}

	pub fn cmdline_args(&self) -> Option<&str> {
		non_empty(self.cmdline_args.as_deref())
	}
}

fn non_empty(value: Option<&str>) -> Option<&str> {
	value.filter(|v| !v.is_empty())
}

/// Builds the frame and exception payload for an [`Invocation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExceptionBuilder {
	context_lines: usize,
}

impl Default for ExceptionBuilder {
	fn default() -> Self {
		Self {
			context_lines: DEFAULT_CONTEXT_LINES,
		}
	}
}

impl ExceptionBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets how many lines of source to keep on each side of the failure.
	pub fn context_lines(mut self, context_lines: usize) -> Self {
		self.context_lines = context_lines;
		self
	}

	/// Build the single frame for `invocation`.
	///
	/// Source context and variables are attached only when a working
	/// directory was given and the script could be read. An unreadable script
	/// is logged and the base frame is returned; this never fails.
	pub fn build_frame(&self, invocation: &Invocation) -> Frame {
		let mut frame = Frame::new(
			invocation.script.as_str(),
			invocation.function(),
			invocation.lineno,
			invocation.command.as_str(),
		);

		let Some(pwd) = invocation.pwd() else {
			debug!("no working directory, skipping source context");
			return frame;
		};

		let abs_path = resolve_script_path(pwd, Path::new(&invocation.script));
		let extractor = SourceContextExtractor::new(self.context_lines);

		match extractor.process(&abs_path, invocation.lineno as usize) {
			Ok(context) => {
				enrich_frame(&mut frame, &abs_path, context);
				if let Some(declares) = invocation.declares() {
					frame.vars = parse_declarations(declares);
				}
			}
			Err(e) => {
				warn!(path = %abs_path.display(), error = %e, "Could not process file");
			}
		}

		frame
	}

	/// Wrap `frame` into the payload for `invocation`.
	pub fn build_payload(&self, frame: Frame, invocation: &Invocation) -> ExceptionPayload {
		ExceptionPayload::single(
			frame,
			invocation.script.as_str(),
			format_message(invocation.function(), invocation.lineno),
		)
	}

	/// Build the frame and wrap it in one go.
	pub fn build(&self, invocation: &Invocation) -> ExceptionPayload {
		let frame = self.build_frame(invocation);
		self.build_payload(frame, invocation)
	}
}

fn enrich_frame(frame: &mut Frame, abs_path: &Path, context: FileContext) {
	if let Some(name) = abs_path.file_name() {
		frame.filename = name.to_string_lossy().into_owned();
	}
	frame.abs_path = Some(abs_path.to_string_lossy().into_owned());
	frame.pre_context = Some(context.pre_context);
	frame.context_line = context.context;
	frame.post_context = Some(context.post_context);
}

/// Resolve `script` against `pwd` into a normalised absolute path.
///
/// An absolute `script` ignores `pwd`. A relative result is anchored at the
/// process working directory. `.` and `..` are folded lexically; symlinks are
/// not followed.
pub fn resolve_script_path(pwd: &Path, script: &Path) -> PathBuf {
	let joined = pwd.join(script);
	let absolute = if joined.is_absolute() {
		joined
	} else {
		match std::env::current_dir() {
			Ok(cwd) => cwd.join(joined),
			Err(_) => joined,
		}
	};
	normalize_lexically(&absolute)
}

fn normalize_lexically(path: &Path) -> PathBuf {
	let mut normalized = PathBuf::new();
	for component in path.components() {
		match component {
			Component::CurDir => {}
			Component::ParentDir => {
				normalized.pop();
			}
			other => normalized.push(other.as_os_str()),
		}
	}
	normalized
}
