// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Retry with exponential backoff.

use reqwest::StatusCode;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Statuses worth another attempt.
pub const RETRYABLE_STATUSES: [StatusCode; 6] = [
	StatusCode::TOO_MANY_REQUESTS,
	StatusCode::REQUEST_TIMEOUT,
	StatusCode::INTERNAL_SERVER_ERROR,
	StatusCode::BAD_GATEWAY,
	StatusCode::SERVICE_UNAVAILABLE,
	StatusCode::GATEWAY_TIMEOUT,
];

pub fn is_retryable_status(status: StatusCode) -> bool {
	RETRYABLE_STATUSES.contains(&status)
}

#[derive(Debug, Clone)]
pub struct RetryConfig {
	/// Total attempts including the first. Zero behaves like one.
	pub max_attempts: u32,
	pub base_delay: Duration,
	pub max_delay: Duration,
	pub backoff_factor: f64,
	pub jitter: bool,
}

impl Default for RetryConfig {
	fn default() -> Self {
		Self {
			max_attempts: 3,
			base_delay: Duration::from_millis(200),
			max_delay: Duration::from_secs(5),
			backoff_factor: 2.0,
			jitter: true,
		}
	}
}

impl RetryConfig {
	pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
		self.max_attempts = max_attempts;
		self
	}

	/// Delay before the retry following the 0-based `attempt`.
	///
	/// Jitter scales the capped delay by a factor in `[0.5, 1.5)`.
	pub fn delay_for(&self, attempt: u32) -> Duration {
		let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
		let exponential = self.base_delay.as_secs_f64() * self.backoff_factor.powi(exponent);
		let capped = exponential.min(self.max_delay.as_secs_f64());

		let delay = if self.jitter {
			capped * (0.5 + fastrand::f64())
		} else {
			capped
		};

		Duration::from_secs_f64(delay)
	}
}

pub trait RetryableError {
	fn is_retryable(&self) -> bool;
}

impl RetryableError for reqwest::Error {
	fn is_retryable(&self) -> bool {
		if self.is_timeout() || self.is_connect() {
			return true;
		}
		self.status().is_some_and(is_retryable_status)
	}
}

/// Run `f` until it succeeds, fails with a non-retryable error, or the
/// attempts run out. The last error is returned.
pub async fn retry<F, Fut, T, E>(cfg: &RetryConfig, mut f: F) -> Result<T, E>
where
	F: FnMut() -> Fut,
	Fut: Future<Output = Result<T, E>>,
	E: RetryableError + std::fmt::Display,
{
	let max_attempts = cfg.max_attempts.max(1);
	let mut attempt = 1;

	loop {
		let err = match f().await {
			Ok(value) => return Ok(value),
			Err(err) => err,
		};

		if !err.is_retryable() {
			warn!(error = %err, attempt, "non-retryable error encountered");
			return Err(err);
		}

		if attempt >= max_attempts {
			warn!(error = %err, attempt, max_attempts, "max retry attempts exhausted");
			return Err(err);
		}

		let delay = cfg.delay_for(attempt - 1);
		warn!(
			error = %err,
			attempt,
			max_attempts,
			delay_ms = delay.as_millis() as u64,
			"retrying after error"
		);
		tokio::time::sleep(delay).await;
		attempt += 1;
	}
}
