// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! XDG Base Directory compliant path resolution.

use std::path::PathBuf;

use crate::ConfigError;

pub const SYSTEM_CONFIG_FILE: &str = "/etc/shcrash/config.toml";

/// Per-user config file location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathsConfig {
	/// `$XDG_CONFIG_HOME/shcrash/config.toml`
	pub user_config_file: PathBuf,
}

/// Resolve paths from `XDG_CONFIG_HOME`, falling back to `~/.config`.
pub fn resolve_xdg_paths() -> Result<PathsConfig, ConfigError> {
	let config_home = match std::env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
		Some(dir) => PathBuf::from(dir),
		None => dirs::home_dir()
			.ok_or(ConfigError::HomeDirNotFound)?
			.join(".config"),
	};

	tracing::debug!(config_home = %config_home.display(), "resolved XDG paths");

	Ok(paths_in(config_home))
}

/// Paths for a given config home directory.
pub fn paths_in(config_home: PathBuf) -> PathsConfig {
	PathsConfig {
		user_config_file: config_home.join("shcrash/config.toml"),
	}
}
