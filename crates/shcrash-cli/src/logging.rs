// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::io::IsTerminal;

use shcrash_cli_config::{LogFormat, LoggingConfig};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Overrides the configured filter with a full `EnvFilter` directive.
pub const LOG_ENV_VAR: &str = "SHCRASH_LOG";

/// Install the global subscriber. Output always goes to stderr so the
/// failing script's stdout is left alone.
pub fn init_tracing(logging: &LoggingConfig) {
	let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
		.unwrap_or_else(|_| EnvFilter::new(format!("shcrash={}", logging.level)));
	let ansi = std::io::stderr().is_terminal();

	match logging.format {
		LogFormat::Json => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().json().with_writer(std::io::stderr))
				.init();
		}
		LogFormat::Compact => {
			tracing_subscriber::registry()
				.with(filter)
				.with(
					fmt::layer()
						.compact()
						.with_ansi(ansi)
						.with_writer(std::io::stderr),
				)
				.init();
		}
		LogFormat::Pretty => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().pretty().with_ansi(ansi).with_writer(std::io::stderr))
				.init();
		}
	}
}
