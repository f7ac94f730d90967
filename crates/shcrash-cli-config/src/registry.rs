// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration registry: manages sources and merges layers.

use tracing::debug;

use crate::layer::ConfigLayer;
use crate::runtime::ShcrashConfig;
use crate::sources::ConfigSource;
use crate::validation::reset_invalid_fields;
use crate::ConfigError;

/// Result of [`ConfigRegistry::load`].
#[derive(Debug)]
pub struct LoadedConfig {
	pub config: ShcrashConfig,
	/// Fields that were out of range and fell back to their defaults.
	pub rejected: Vec<ConfigError>,
}

#[derive(Default)]
pub struct ConfigRegistry {
	sources: Vec<Box<dyn ConfigSource>>,
}

impl ConfigRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn register(&mut self, source: Box<dyn ConfigSource>) {
		debug!(source = source.name(), precedence = ?source.precedence(), "registering config source");
		self.sources.push(source);
	}

	pub fn source_count(&self) -> usize {
		self.sources.len()
	}

	/// Merge all sources from lowest to highest precedence and validate.
	///
	/// A source that fails to load is skipped. An out-of-range field is reset
	/// to its default and reported in [`LoadedConfig::rejected`]; the rest of
	/// the merged configuration is kept.
	pub fn load(&self) -> LoadedConfig {
		let mut sorted: Vec<_> = self.sources.iter().collect();
		sorted.sort_by_key(|s| s.precedence());

		let mut merged = ConfigLayer::default();
		for source in sorted {
			match source.load() {
				Ok(layer) => {
					debug!(source = source.name(), "merging config layer");
					merged.merge(layer);
				}
				Err(e) => {
					debug!(source = source.name(), error = %e, "failed to load source, skipping");
				}
			}
		}

		let mut config = ShcrashConfig::from_layer(merged);
		let rejected = reset_invalid_fields(&mut config);

		debug!(
			log_level = %config.logging.level,
			context_lines = config.report.context_lines,
			max_attempts = config.report.max_attempts,
			rejected = rejected.len(),
			"configuration loaded"
		);

		LoadedConfig { config, rejected }
	}
}
