// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration validation rules.

use crate::runtime::{ReportConfig, ShcrashConfig};
use crate::ConfigError;

pub const MAX_CONTEXT_LINES: usize = 1000;

/// Reset each out-of-range field to its default.
///
/// Returns one [`ConfigError::InvalidValue`] per field that was reset. Every
/// other field, including explicit command line overrides, is kept.
pub fn reset_invalid_fields(config: &mut ShcrashConfig) -> Vec<ConfigError> {
	let defaults = ReportConfig::default();
	let report = &mut config.report;
	let mut rejected = Vec::new();

	if report.context_lines > MAX_CONTEXT_LINES {
		rejected.push(ConfigError::invalid_value(
			"report.context_lines",
			format!("{} is above the limit of {MAX_CONTEXT_LINES}", report.context_lines),
		));
		report.context_lines = defaults.context_lines;
	}
	if report.max_attempts == 0 {
		rejected.push(ConfigError::invalid_value(
			"report.max_attempts",
			"must be at least 1",
		));
		report.max_attempts = defaults.max_attempts;
	}
	if report.request_timeout.is_zero() {
		rejected.push(ConfigError::invalid_value(
			"report.request_timeout_secs",
			"must be at least 1",
		));
		report.request_timeout = defaults.request_timeout;
	}

	rejected
}
