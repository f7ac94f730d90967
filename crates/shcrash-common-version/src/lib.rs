// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Build metadata baked into the shcrash binaries.
//!
//! Used for the `User-Agent` of report uploads, the `sdk` block of every
//! event, `shcrash --version` and the startup debug line.

use std::fmt;

#[cfg(feature = "serde")]
use serde::Serialize;

shadow_rs::shadow!(build);

/// Crate version, e.g. "0.1.0".
pub const VERSION: &str = build::PKG_VERSION;

/// Target platform as `{os}-{arch}`, set by the build script.
pub const PLATFORM: &str = env!("SHCRASH_PLATFORM");

/// Name the reporter identifies itself with inside events.
pub const SDK_NAME: &str = "shcrash.bash";

const UNKNOWN_SHA: &str = "unknown";

#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildInfo {
	pub version: &'static str,
	/// Short commit hash, "unknown" outside a git checkout.
	pub git_sha: &'static str,
	pub build_timestamp: &'static str,
	pub platform: &'static str,
}

impl BuildInfo {
	#[allow(clippy::const_is_empty)]
	pub const fn current() -> Self {
		let git_sha = if build::SHORT_COMMIT.is_empty() {
			UNKNOWN_SHA
		} else {
			build::SHORT_COMMIT
		};
		Self {
			version: VERSION,
			git_sha,
			build_timestamp: build::BUILD_TIME,
			platform: PLATFORM,
		}
	}
}

/// `0.1.0 (abc1234, linux-x86_64)`
impl fmt::Display for BuildInfo {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} ({}, {})", self.version, self.git_sha, self.platform)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_current_build_info() {
		let info = BuildInfo::current();
		assert_eq!(info.version, VERSION);
		assert_eq!(info.platform, PLATFORM);
		assert!(!info.git_sha.is_empty());
	}

	#[test]
	fn test_platform_is_os_dash_arch() {
		let (os, arch) = PLATFORM.split_once('-').unwrap();
		assert!(!os.is_empty());
		assert!(!arch.is_empty());
	}

	#[test]
	fn test_display_line() {
		let info = BuildInfo {
			version: "1.2.3",
			git_sha: "abc1234",
			build_timestamp: "2025-01-01 00:00:00",
			platform: "linux-x86_64",
		};
		assert_eq!(info.to_string(), "1.2.3 (abc1234, linux-x86_64)");
	}
}
