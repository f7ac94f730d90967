// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Partial configuration layer for merging from multiple sources.

use serde::Deserialize;

/// Partial configuration; every field is optional so layers can be merged.
///
/// ```toml
/// [logging]
/// level = "debug"
/// format = "json"
///
/// [report]
/// environment = "ci"
/// context_lines = 5
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigLayer {
	#[serde(default)]
	pub logging: Option<LoggingLayer>,
	#[serde(default)]
	pub report: Option<ReportLayer>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingLayer {
	#[serde(default)]
	pub level: Option<String>,
	#[serde(default)]
	pub format: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportLayer {
	#[serde(default)]
	pub environment: Option<String>,
	#[serde(default)]
	pub release: Option<String>,
	#[serde(default)]
	pub server_name: Option<String>,
	#[serde(default)]
	pub context_lines: Option<usize>,
	#[serde(default)]
	pub request_timeout_secs: Option<u64>,
	#[serde(default)]
	pub max_attempts: Option<u32>,
}

impl ConfigLayer {
	/// Merge another layer into this one. `other` takes precedence.
	pub fn merge(&mut self, other: ConfigLayer) {
		merge_option(&mut self.logging, other.logging, LoggingLayer::merge);
		merge_option(&mut self.report, other.report, ReportLayer::merge);
	}

	pub fn logging_mut(&mut self) -> &mut LoggingLayer {
		self.logging.get_or_insert_with(LoggingLayer::default)
	}

	pub fn report_mut(&mut self) -> &mut ReportLayer {
		self.report.get_or_insert_with(ReportLayer::default)
	}
}

fn merge_option<T, F>(target: &mut Option<T>, source: Option<T>, merge_fn: F)
where
	F: FnOnce(&mut T, T),
{
	match (target.as_mut(), source) {
		(Some(t), Some(s)) => merge_fn(t, s),
		(None, Some(s)) => *target = Some(s),
		_ => {}
	}
}

fn overwrite<T>(target: &mut Option<T>, source: Option<T>) {
	if source.is_some() {
		*target = source;
	}
}

impl LoggingLayer {
	fn merge(&mut self, other: LoggingLayer) {
		overwrite(&mut self.level, other.level);
		overwrite(&mut self.format, other.format);
	}
}

impl ReportLayer {
	fn merge(&mut self, other: ReportLayer) {
		overwrite(&mut self.environment, other.environment);
		overwrite(&mut self.release, other.release);
		overwrite(&mut self.server_name, other.server_name);
		overwrite(&mut self.context_lines, other.context_lines);
		overwrite(&mut self.request_timeout_secs, other.request_timeout_secs);
		overwrite(&mut self.max_attempts, other.max_attempts);
	}
}
