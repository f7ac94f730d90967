// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Loading secrets with the `VAR` / `VAR_FILE` convention.

use std::path::PathBuf;
use std::{env, fs};

use thiserror::Error;

use crate::SecretString;

#[derive(Debug, Error)]
pub enum SecretEnvError {
	#[error("failed to read secret file at {}: {source}", .path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("secret file path in {var} is empty")]
	EmptyPath { var: String },
}

/// Load `var` from the process environment.
///
/// `{var}_FILE` takes precedence and names a file holding the secret; one
/// trailing newline is stripped from its content. An empty `{var}` counts as
/// unset.
pub fn load_secret_env(var: &str) -> Result<Option<SecretString>, SecretEnvError> {
	load_secret_with(var, |name| env::var(name).ok())
}

/// Same as [`load_secret_env`] with a custom variable lookup.
pub fn load_secret_with<F>(var: &str, lookup: F) -> Result<Option<SecretString>, SecretEnvError>
where
	F: Fn(&str) -> Option<String>,
{
	let file_var = format!("{var}_FILE");

	if let Some(path) = lookup(&file_var) {
		if path.is_empty() {
			return Err(SecretEnvError::EmptyPath { var: file_var });
		}

		let path = PathBuf::from(path);
		let content = fs::read_to_string(&path).map_err(|source| SecretEnvError::Io {
			path: path.clone(),
			source,
		})?;
		let value = content.strip_suffix('\n').unwrap_or(&content);
		if value.is_empty() {
			return Ok(None);
		}
		return Ok(Some(SecretString::new(value.to_string())));
	}

	Ok(lookup(var).filter(|v| !v.is_empty()).map(SecretString::new))
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashMap;
	use std::io::Write;
	use tempfile::NamedTempFile;

	fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
		let vars: HashMap<String, String> = vars
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect();
		move |name| vars.get(name).cloned()
	}

	#[test]
	fn returns_none_when_unset() {
		let secret = load_secret_with("SENTRY_DSN", lookup_from(&[])).unwrap();
		assert!(secret.is_none());
	}

	#[test]
	fn empty_value_counts_as_unset() {
		let secret = load_secret_with("SENTRY_DSN", lookup_from(&[("SENTRY_DSN", "")])).unwrap();
		assert!(secret.is_none());
	}

	#[test]
	fn reads_direct_value() {
		let secret = load_secret_with(
			"SENTRY_DSN",
			lookup_from(&[("SENTRY_DSN", "https://k@example.com/1")]),
		)
		.unwrap()
		.unwrap();
		assert_eq!(secret.expose(), "https://k@example.com/1");
	}

	#[test]
	fn file_takes_precedence_and_strips_one_newline() {
		let mut file = NamedTempFile::new().unwrap();
		write!(file, "https://from-file@example.com/2\n").unwrap();
		let path = file.path().to_string_lossy().into_owned();

		let secret = load_secret_with(
			"SENTRY_DSN",
			lookup_from(&[
				("SENTRY_DSN", "https://direct@example.com/1"),
				("SENTRY_DSN_FILE", &path),
			]),
		)
		.unwrap()
		.unwrap();
		assert_eq!(secret.expose(), "https://from-file@example.com/2");
	}

	#[test]
	fn empty_file_path_is_an_error() {
		let err = load_secret_with("SENTRY_DSN", lookup_from(&[("SENTRY_DSN_FILE", "")])).unwrap_err();
		assert!(matches!(err, SecretEnvError::EmptyPath { var } if var == "SENTRY_DSN_FILE"));
	}

	#[test]
	fn missing_file_is_an_io_error() {
		let dir = tempfile::tempdir().unwrap();
		let missing = dir.path().join("dsn");
		let missing = missing.to_string_lossy().into_owned();

		let err = load_secret_with("SENTRY_DSN", lookup_from(&[("SENTRY_DSN_FILE", &missing)])).unwrap_err();
		assert!(matches!(err, SecretEnvError::Io { .. }));
	}
}
