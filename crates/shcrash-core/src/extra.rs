// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Extra metadata sent alongside the exception.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{CoreError, Result};

/// Environment and stderr captured with a failure.
///
/// Each key is only present when its input was non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraInfo {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub environment: Option<BTreeMap<String, String>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub stderr: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub cmdline_args: Option<String>,
}

impl ExtraInfo {
	/// Build from a newline separated `KEY=VALUE` block and captured stderr.
	///
	/// Every entry is split on its first `=`; an entry without one fails the
	/// whole build with [`CoreError::MalformedEnvironment`].
	pub fn build(env: Option<&str>, stderr: Option<&str>) -> Result<Self> {
		let environment = match env.filter(|e| !e.is_empty()) {
			Some(env) => Some(parse_environment(env)?),
			None => None,
		};

		Ok(Self {
			environment,
			stderr: stderr.filter(|s| !s.is_empty()).map(str::to_string),
			cmdline_args: None,
		})
	}

	/// Attach the arguments the script was started with.
	pub fn with_cmdline_args(mut self, args: Option<&str>) -> Self {
		self.cmdline_args = args.filter(|a| !a.is_empty()).map(str::to_string);
		self
	}

	pub fn is_empty(&self) -> bool {
		self.environment.is_none() && self.stderr.is_none() && self.cmdline_args.is_none()
	}
}

fn parse_environment(env: &str) -> Result<BTreeMap<String, String>> {
	env.split('\n')
		.enumerate()
		.map(|(index, entry)| {
			entry
				.split_once('=')
				.map(|(key, value)| (key.to_string(), value.to_string()))
				.ok_or(CoreError::MalformedEnvironment { line: index + 1 })
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_build_parses_environment_and_stderr() {
		let extra = ExtraInfo::build(Some("A=1\nB=2"), Some("grep: no match")).unwrap();

		let env = extra.environment.unwrap();
		assert_eq!(env.len(), 2);
		assert_eq!(env["A"], "1");
		assert_eq!(env["B"], "2");
		assert_eq!(extra.stderr.as_deref(), Some("grep: no match"));
	}

	#[test]
	fn test_value_keeps_equals_signs() {
		let extra = ExtraInfo::build(Some("OPTS=--a=1 --b=2\nEMPTY="), None).unwrap();
		let env = extra.environment.unwrap();
		assert_eq!(env["OPTS"], "--a=1 --b=2");
		assert_eq!(env["EMPTY"], "");
	}

	#[test]
	fn test_absent_inputs_produce_empty_extra() {
		let extra = ExtraInfo::build(None, None).unwrap();
		assert!(extra.is_empty());
		assert_eq!(serde_json::to_value(&extra).unwrap(), json!({}));
	}

	#[test]
	fn test_empty_strings_are_absent() {
		let extra = ExtraInfo::build(Some(""), Some("")).unwrap();
		assert!(extra.environment.is_none());
		assert!(extra.stderr.is_none());
	}

	#[test]
	fn test_stderr_only() {
		let extra = ExtraInfo::build(None, Some("boom")).unwrap();
		assert_eq!(
			serde_json::to_value(&extra).unwrap(),
			json!({ "stderr": "boom" })
		);
	}

	#[test]
	fn test_entry_without_separator_is_malformed() {
		let err = ExtraInfo::build(Some("A=1\nbroken\nC=3"), None).unwrap_err();
		assert!(matches!(err, CoreError::MalformedEnvironment { line: 2 }));
	}

	#[test]
	fn test_trailing_newline_is_malformed() {
		let err = ExtraInfo::build(Some("A=1\n"), None).unwrap_err();
		assert!(matches!(err, CoreError::MalformedEnvironment { line: 2 }));
	}

	#[test]
	fn test_duplicate_key_last_wins() {
		let extra = ExtraInfo::build(Some("A=1\nA=2"), None).unwrap();
		assert_eq!(extra.environment.unwrap()["A"], "2");
	}

	#[test]
	fn test_with_cmdline_args() {
		let extra = ExtraInfo::build(None, None)
			.unwrap()
			.with_cmdline_args(Some("--verbose build"));

		assert!(!extra.is_empty());
		assert_eq!(
			serde_json::to_value(&extra).unwrap(),
			json!({ "cmdline_args": "--verbose build" })
		);

		let cleared = extra.with_cmdline_args(Some(""));
		assert!(cleared.cmdline_args.is_none());
	}
}
