// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Layered configuration for the shcrash reporter.
//!
//! Precedence, lowest first: built-in defaults, `/etc/shcrash/config.toml`,
//! `$XDG_CONFIG_HOME/shcrash/config.toml`, `SHCRASH_*` environment
//! variables, command line flags. The DSN is a credential and is never read
//! from here.

pub mod error;
pub mod layer;
pub mod paths;
pub mod registry;
pub mod runtime;
pub mod sources;
pub mod validation;

pub use error::ConfigError;
pub use layer::ConfigLayer;
pub use paths::PathsConfig;
pub use registry::{ConfigRegistry, LoadedConfig};
pub use runtime::{LogFormat, LogLevel, LoggingConfig, ReportConfig, ShcrashConfig};
pub use sources::{CliOverrides, ConfigSource, Precedence};

/// Load configuration from every source, with `cli` on top.
///
/// An explicit `cli.config_file` replaces the user file. Out-of-range values
/// fall back to their defaults and are listed in [`LoadedConfig::rejected`].
pub fn load_config_with_cli(cli: CliOverrides) -> LoadedConfig {
	let mut registry = ConfigRegistry::new();

	registry.register(Box::new(sources::DefaultsSource));
	registry.register(Box::new(sources::FileSource::system()));
	match (&cli.config_file, paths::resolve_xdg_paths()) {
		(Some(path), _) => registry.register(Box::new(sources::FileSource::custom(
			path.clone(),
			Precedence::UserFile,
			"cli-config",
		))),
		(None, Ok(paths)) => registry.register(Box::new(sources::FileSource::user(&paths))),
		(None, Err(e)) => tracing::debug!(error = %e, "no user config directory"),
	}
	registry.register(Box::new(sources::EnvSource::process()));
	registry.register(Box::new(sources::CliSource::new(cli)));

	registry.load()
}
