// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Exception payload types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Namespace reported as the exception module.
pub const BUILTINS_MODULE: &str = "builtins";

/// Function name used when the failure happened outside any function.
pub const DEFAULT_FUNCTION: &str = "main";

/// A single stack frame describing where the script failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
	/// Script path as given, or its base name once the source was read.
	pub filename: String,
	pub function: String,
	pub lineno: u32,
	/// The failing command.
	pub module: String,
	/// Local (non-exported) shell variables.
	#[serde(default)]
	pub vars: BTreeMap<String, String>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub abs_path: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub pre_context: Option<Vec<String>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub context_line: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub post_context: Option<Vec<String>>,
}

impl Frame {
	/// Build a frame with no source enrichment and no variables.
	pub fn new(
		filename: impl Into<String>,
		function: Option<&str>,
		lineno: u32,
		module: impl Into<String>,
	) -> Self {
		Self {
			filename: filename.into(),
			function: function.unwrap_or(DEFAULT_FUNCTION).to_string(),
			lineno,
			module: module.into(),
			vars: BTreeMap::new(),
			abs_path: None,
			pre_context: None,
			context_line: None,
			post_context: None,
		}
	}

	/// Whether source context was attached to this frame.
	pub fn is_enriched(&self) -> bool {
		self.abs_path.is_some()
	}
}

/// Stack trace containing the frames of one exception.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stacktrace {
	pub frames: Vec<Frame>,
}

/// One exception entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExceptionValue {
	pub module: String,
	pub stacktrace: Stacktrace,
	/// The script path.
	#[serde(rename = "type")]
	pub exception_type: String,
	/// Human readable message.
	pub value: String,
}

/// Exception data attached to a report, `{"values": [...]}` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExceptionPayload {
	pub values: Vec<ExceptionValue>,
}

impl ExceptionPayload {
	/// Wrap `frame` as the only frame of the only exception.
	pub fn single(frame: Frame, exception_type: impl Into<String>, value: impl Into<String>) -> Self {
		Self {
			values: vec![ExceptionValue {
				module: BUILTINS_MODULE.to_string(),
				stacktrace: Stacktrace {
					frames: vec![frame],
				},
				exception_type: exception_type.into(),
				value: value.into(),
			}],
		}
	}

	pub fn primary(&self) -> Option<&ExceptionValue> {
		self.values.first()
	}
}

/// Format the exception message for a failure at `lineno`.
pub fn format_message(function: Option<&str>, lineno: u32) -> String {
	match function {
		Some(function) => format!("error in '{function}' on line {lineno}"),
		None => format!("error on line {lineno}"),
	}
}
