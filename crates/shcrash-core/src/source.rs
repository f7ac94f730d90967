// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Source context extraction around a failing line.

use std::cmp::Ordering;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::error::{CoreError, Result};

/// Number of lines kept on each side of the failing line by default.
pub const DEFAULT_CONTEXT_LINES: usize = 10;

/// Lines surrounding a failing line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileContext {
	/// Lines before the failing line, oldest first.
	pub pre_context: Vec<String>,
	/// The failing line, absent when the file is shorter than the target.
	pub context: Option<String>,
	/// Lines after the failing line, nearest first.
	pub post_context: Vec<String>,
}

/// Reads a bounded window of lines around a 1-indexed target line.
///
/// With `n` context lines the window is `[max(target - n, 1), target + n]`.
/// Reading stops at the end of the window, so large files are never scanned
/// past it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceContextExtractor {
	context_lines: usize,
}

impl Default for SourceContextExtractor {
	fn default() -> Self {
		Self::new(DEFAULT_CONTEXT_LINES)
	}
}

impl SourceContextExtractor {
	pub fn new(context_lines: usize) -> Self {
		Self { context_lines }
	}

	/// Extract the window from the file at `path`.
	///
	/// The file handle is dropped before returning on every path.
	pub fn process(&self, path: &Path, target_line: usize) -> Result<FileContext> {
		let unreadable = |source: io::Error| CoreError::SourceUnreadable {
			path: path.to_path_buf(),
			source,
		};

		let file = File::open(path).map_err(unreadable)?;
		let context = self
			.from_reader(BufReader::new(file), target_line)
			.map_err(unreadable)?;

		debug!(
			path = %path.display(),
			target_line,
			pre = context.pre_context.len(),
			post = context.post_context.len(),
			found = context.context.is_some(),
			"extracted source context"
		);

		Ok(context)
	}

	/// Extract the window from any buffered reader.
	///
	/// At most `target_line + context_lines` lines are requested from
	/// `reader`. Invalid UTF-8 is replaced rather than treated as an error.
	pub fn from_reader<R: BufRead>(
		&self,
		mut reader: R,
		target_line: usize,
	) -> io::Result<FileContext> {
		let start = target_line.saturating_sub(self.context_lines).max(1);
		let stop = target_line.saturating_add(self.context_lines);

		let mut context = FileContext::default();
		let mut buf = Vec::new();

		for index in 1..=stop {
			buf.clear();
			if reader.read_until(b'\n', &mut buf)? == 0 {
				break;
			}
			if index < start {
				continue;
			}

			let line = decode_line(&buf);
			match index.cmp(&target_line) {
				Ordering::Less => context.pre_context.push(line),
				Ordering::Equal => context.context = Some(line),
				Ordering::Greater => context.post_context.push(line),
			}
		}

		Ok(context)
	}
}

fn decode_line(raw: &[u8]) -> String {
	let line = raw.strip_suffix(b"\n").unwrap_or(raw);
	let line = line.strip_suffix(b"\r").unwrap_or(line);
	String::from_utf8_lossy(line).into_owned()
}
