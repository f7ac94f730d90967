// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Runtime configuration with resolved defaults.

use std::fmt;
use std::time::Duration;

use crate::layer::{ConfigLayer, LoggingLayer, ReportLayer};

pub const DEFAULT_CONTEXT_LINES: usize = 10;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// The final configuration for the reporter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShcrashConfig {
	pub logging: LoggingConfig,
	pub report: ReportConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoggingConfig {
	pub level: LogLevel,
	pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
	Error,
	#[default]
	Warn,
	Info,
	Debug,
	Trace,
}

impl LogLevel {
	pub fn as_str(&self) -> &'static str {
		match self {
			LogLevel::Error => "error",
			LogLevel::Warn => "warn",
			LogLevel::Info => "info",
			LogLevel::Debug => "debug",
			LogLevel::Trace => "trace",
		}
	}
}

impl fmt::Display for LogLevel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
	Pretty,
	Json,
	#[default]
	Compact,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
	pub environment: Option<String>,
	pub release: Option<String>,
	pub server_name: Option<String>,
	pub context_lines: usize,
	pub request_timeout: Duration,
	pub max_attempts: u32,
}

impl Default for ReportConfig {
	fn default() -> Self {
		Self {
			environment: None,
			release: None,
			server_name: None,
			context_lines: DEFAULT_CONTEXT_LINES,
			request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
			max_attempts: DEFAULT_MAX_ATTEMPTS,
		}
	}
}

impl ShcrashConfig {
	/// Build runtime config from a merged layer.
	pub fn from_layer(layer: ConfigLayer) -> Self {
		Self {
			logging: build_logging_config(layer.logging),
			report: build_report_config(layer.report),
		}
	}
}

fn build_logging_config(layer: Option<LoggingLayer>) -> LoggingConfig {
	let layer = layer.unwrap_or_default();
	LoggingConfig {
		level: parse_log_level(layer.level.as_deref()),
		format: parse_log_format(layer.format.as_deref()),
	}
}

fn parse_log_level(s: Option<&str>) -> LogLevel {
	match s.map(str::to_ascii_lowercase).as_deref() {
		Some("error") => LogLevel::Error,
		Some("warn") | Some("warning") => LogLevel::Warn,
		Some("info") => LogLevel::Info,
		Some("debug") => LogLevel::Debug,
		Some("trace") => LogLevel::Trace,
		_ => LogLevel::default(),
	}
}

fn parse_log_format(s: Option<&str>) -> LogFormat {
	match s.map(str::to_ascii_lowercase).as_deref() {
		Some("json") => LogFormat::Json,
		Some("pretty") => LogFormat::Pretty,
		Some("compact") => LogFormat::Compact,
		_ => LogFormat::default(),
	}
}

fn build_report_config(layer: Option<ReportLayer>) -> ReportConfig {
	let layer = layer.unwrap_or_default();
	ReportConfig {
		environment: layer.environment.filter(|s| !s.is_empty()),
		release: layer.release.filter(|s| !s.is_empty()),
		server_name: layer.server_name.filter(|s| !s.is_empty()),
		context_lines: layer.context_lines.unwrap_or(DEFAULT_CONTEXT_LINES),
		request_timeout: Duration::from_secs(
			layer
				.request_timeout_secs
				.unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
		),
		max_attempts: layer.max_attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS),
	}
}
