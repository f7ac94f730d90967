// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! HTTP client construction with a consistent User-Agent header.

use reqwest::{Client, ClientBuilder};
use shcrash_common_version::BuildInfo;
use std::time::Duration;

/// Client builder carrying the shcrash User-Agent.
///
/// Callers finish with `.build()?` so TLS backend failures surface as errors.
pub fn builder() -> ClientBuilder {
	Client::builder().user_agent(user_agent())
}

/// Client builder with both connect and total request timeouts set.
pub fn builder_with_timeout(timeout: Duration) -> ClientBuilder {
	builder().connect_timeout(timeout).timeout(timeout)
}

/// Format: `shcrash/{platform}/{git_sha}`, e.g. `shcrash/linux-x86_64/abc1234`.
pub fn user_agent() -> String {
	let info = BuildInfo::current();
	format!("shcrash/{}/{}", info.platform, info.git_sha)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn user_agent_has_correct_format() {
		let ua = user_agent();
		let parts: Vec<&str> = ua.split('/').collect();
		assert_eq!(parts.len(), 3);
		assert_eq!(parts[0], "shcrash");
		assert!(parts[1].contains('-'));
	}

	#[test]
	fn builder_with_timeout_builds() {
		let client = builder_with_timeout(Duration::from_secs(2)).build();
		assert!(client.is_ok());
	}
}
