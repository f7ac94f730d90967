// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for crash report assembly.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while assembling a crash report.
#[derive(Debug, Error)]
pub enum CoreError {
	/// The failing script could not be opened or read.
	#[error("could not read source file {}: {source}", .path.display())]
	SourceUnreadable {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// An environment entry had no `=` separator.
	///
	/// Only the 1-based line number is kept so environment values never end
	/// up in logs.
	#[error("malformed environment entry on line {line}: expected KEY=VALUE")]
	MalformedEnvironment { line: usize },
}

/// Result type for crash report assembly.
pub type Result<T> = std::result::Result<T, CoreError>;
