// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Event delivery.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::RETRY_AFTER;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use shcrash_common_http::RetryConfig;
use tracing::{debug, info};

use crate::dsn::Dsn;
use crate::error::{Result, SdkError};
use crate::event::ReportEvent;

const AUTH_HEADER: &str = "X-Sentry-Auth";

/// Acknowledgement of a delivered event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendReceipt {
	pub event_id: String,
}

/// Delivers a single event.
#[async_trait]
pub trait Transport: Send + Sync {
	async fn send(&self, event: &ReportEvent) -> Result<SendReceipt>;
}

#[derive(Debug, Deserialize)]
struct StoreResponse {
	id: String,
}

/// Posts events as JSON to the store endpoint of a [`Dsn`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
	dsn: Dsn,
	client: Client,
	retry: RetryConfig,
}

impl HttpTransport {
	pub fn new(dsn: Dsn, timeout: Duration, retry: RetryConfig) -> Result<Self> {
		let client = shcrash_common_http::builder_with_timeout(timeout).build()?;
		Ok(Self { dsn, client, retry })
	}

	async fn send_once(&self, url: &str, event: &ReportEvent) -> Result<SendReceipt> {
		let auth = self.dsn.auth_header(
			&event.sdk.client_string(),
			event.timestamp.timestamp(),
		);

		let response = self
			.client
			.post(url)
			.header(AUTH_HEADER, auth)
			.json(event)
			.send()
			.await?;

		let status = response.status();
		if status == StatusCode::TOO_MANY_REQUESTS {
			let retry_after_secs = response
				.headers()
				.get(RETRY_AFTER)
				.and_then(|v| v.to_str().ok())
				.and_then(|s| s.trim().parse().ok());
			return Err(SdkError::RateLimited { retry_after_secs });
		}

		if !status.is_success() {
			let message = response.text().await.unwrap_or_default();
			return Err(SdkError::ServerError {
				status: status.as_u16(),
				message,
			});
		}

		let event_id = match response.json::<StoreResponse>().await {
			Ok(body) => body.id,
			Err(e) => {
				debug!(error = %e, "store response carried no event id");
				event.event_id.clone()
			}
		};

		Ok(SendReceipt { event_id })
	}
}

#[async_trait]
impl Transport for HttpTransport {
	async fn send(&self, event: &ReportEvent) -> Result<SendReceipt> {
		let url = self.dsn.store_url();
		debug!(url = %url, event_id = %event.event_id, "sending crash report");

		let receipt = shcrash_common_http::retry(&self.retry, || self.send_once(&url, event)).await?;

		info!(event_id = %receipt.event_id, "crash report delivered");
		Ok(receipt)
	}
}
