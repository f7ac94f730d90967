// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: files, environment, CLI, defaults.

use std::path::PathBuf;

use tracing::{debug, trace};

use crate::layer::ConfigLayer;
use crate::paths::{PathsConfig, SYSTEM_CONFIG_FILE};
use crate::ConfigError;

/// Source precedence levels (higher overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	SystemFile = 20,
	UserFile = 30,
	Environment = 50,
	Cli = 60,
}

pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;

	fn precedence(&self) -> Precedence;

	fn load(&self) -> Result<ConfigLayer, ConfigError>;
}

/// Built-in defaults; applied when the runtime config is built.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		Ok(ConfigLayer::default())
	}
}

/// TOML file source. A missing file yields an empty layer.
pub struct FileSource {
	path: PathBuf,
	precedence: Precedence,
	name: &'static str,
}

impl FileSource {
	/// `/etc/shcrash/config.toml`
	pub fn system() -> Self {
		Self::custom(
			PathBuf::from(SYSTEM_CONFIG_FILE),
			Precedence::SystemFile,
			"system-config",
		)
	}

	/// `$XDG_CONFIG_HOME/shcrash/config.toml`
	pub fn user(paths: &PathsConfig) -> Self {
		Self::custom(
			paths.user_config_file.clone(),
			Precedence::UserFile,
			"user-config",
		)
	}

	pub fn custom(path: PathBuf, precedence: Precedence, name: &'static str) -> Self {
		Self {
			path,
			precedence,
			name,
		}
	}
}

impl ConfigSource for FileSource {
	fn name(&self) -> &'static str {
		self.name
	}

	fn precedence(&self) -> Precedence {
		self.precedence
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), source = self.name, "config file not found, skipping");
			return Ok(ConfigLayer::default());
		}

		let content = std::fs::read_to_string(&self.path).map_err(|source| ConfigError::Io {
			path: self.path.clone(),
			source,
		})?;
		let layer = toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
			path: self.path.clone(),
			source,
		})?;

		trace!(source = self.name, "parsed config layer");
		Ok(layer)
	}
}

/// `SHCRASH_*` environment variables.
///
/// Non-UTF-8 variables are ignored, as are blank values and numbers that do
/// not parse.
pub struct EnvSource {
	vars: Vec<(String, String)>,
}

impl EnvSource {
	/// Snapshot of the current process environment.
	pub fn process() -> Self {
		let vars = std::env::vars_os()
			.filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
			.collect();
		Self { vars }
	}

	pub fn from_vars<I, K, V>(vars: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		Self {
			vars: vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
		}
	}
}

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		let mut layer = ConfigLayer::default();

		for (key, value) in &self.vars {
			if !key.starts_with("SHCRASH_") {
				continue;
			}
			let value = value.trim();
			if value.is_empty() {
				continue;
			}

			trace!(key = %key, "processing env var");

			match key.as_str() {
				"SHCRASH_LOG_LEVEL" => layer.logging_mut().level = Some(value.to_string()),
				"SHCRASH_LOG_FORMAT" => layer.logging_mut().format = Some(value.to_string()),
				"SHCRASH_ENVIRONMENT" => layer.report_mut().environment = Some(value.to_string()),
				"SHCRASH_RELEASE" => layer.report_mut().release = Some(value.to_string()),
				"SHCRASH_SERVER_NAME" => layer.report_mut().server_name = Some(value.to_string()),
				"SHCRASH_CONTEXT_LINES" => match value.parse() {
					Ok(n) => layer.report_mut().context_lines = Some(n),
					Err(_) => debug!(key = %key, "ignoring non-numeric value"),
				},
				"SHCRASH_MAX_ATTEMPTS" => match value.parse() {
					Ok(n) => layer.report_mut().max_attempts = Some(n),
					Err(_) => debug!(key = %key, "ignoring non-numeric value"),
				},
				_ => {}
			}
		}

		Ok(layer)
	}
}

/// Overrides taken from command line flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
	pub log_level: Option<String>,
	pub log_format: Option<String>,
	pub environment: Option<String>,
	pub release: Option<String>,
	pub config_file: Option<PathBuf>,
}

pub struct CliSource {
	overrides: CliOverrides,
}

impl CliSource {
	pub fn new(overrides: CliOverrides) -> Self {
		Self { overrides }
	}
}

impl ConfigSource for CliSource {
	fn name(&self) -> &'static str {
		"cli"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Cli
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		let mut layer = ConfigLayer::default();

		if let Some(level) = &self.overrides.log_level {
			layer.logging_mut().level = Some(level.clone());
		}
		if let Some(format) = &self.overrides.log_format {
			layer.logging_mut().format = Some(format.clone());
		}
		if let Some(environment) = &self.overrides.environment {
			layer.report_mut().environment = Some(environment.clone());
		}
		if let Some(release) = &self.overrides.release {
			layer.report_mut().release = Some(release.clone());
		}

		Ok(layer)
	}
}
