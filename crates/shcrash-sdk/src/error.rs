// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the reporting SDK.

use reqwest::StatusCode;
use shcrash_common_http::{is_retryable_status, RetryableError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SdkError>;

#[derive(Debug, Error)]
pub enum SdkError {
	/// The DSN could not be parsed. Never carries the DSN itself.
	#[error("invalid DSN: {0}")]
	InvalidDsn(&'static str),

	#[error("HTTP request failed: {0}")]
	RequestFailed(#[from] reqwest::Error),

	#[error("server error (status {status}): {message}")]
	ServerError { status: u16, message: String },

	#[error("rate limited, retry after {retry_after_secs:?} seconds")]
	RateLimited { retry_after_secs: Option<u64> },

	#[error("serialization error: {0}")]
	Serialization(#[from] serde_json::Error),
}

impl RetryableError for SdkError {
	/// Rate limiting is final: a single crash report is not worth waiting out
	/// the server's backoff.
	fn is_retryable(&self) -> bool {
		match self {
			SdkError::RequestFailed(e) => e.is_retryable(),
			SdkError::ServerError { status, .. } => StatusCode::from_u16(*status)
				.map(is_retryable_status)
				.unwrap_or(false),
			SdkError::InvalidDsn(_) | SdkError::RateLimited { .. } | SdkError::Serialization(_) => {
				false
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_server_errors_retry_by_status() {
		let unavailable = SdkError::ServerError {
			status: 503,
			message: String::new(),
		};
		let bad_request = SdkError::ServerError {
			status: 400,
			message: String::new(),
		};
		assert!(unavailable.is_retryable());
		assert!(!bad_request.is_retryable());
	}

	#[test]
	fn test_rate_limited_is_final() {
		let err = SdkError::RateLimited {
			retry_after_secs: Some(30),
		};
		assert!(!err.is_retryable());
	}

	#[test]
	fn test_invalid_dsn_is_final() {
		assert!(!SdkError::InvalidDsn("missing public key").is_retryable());
	}
}
