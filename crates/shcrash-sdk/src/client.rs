// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Client that turns an assembled payload into one delivered event.

use shcrash_core::{ExceptionPayload, ExtraInfo};
use tracing::info;

use crate::error::Result;
use crate::event::ReportEvent;
use crate::transport::{SendReceipt, Transport};

pub const DEFAULT_LOGGER: &str = "shcrash";

/// Summary message for a failure in `script`.
pub fn summary_message(script: &str) -> String {
	format!("shcrash captured error in {script}")
}

/// Builder for [`ReportClient`].
#[derive(Debug, Clone)]
pub struct ReportClientBuilder {
	logger: String,
	release: Option<String>,
	environment: Option<String>,
	server_name: Option<String>,
}

impl Default for ReportClientBuilder {
	fn default() -> Self {
		Self {
			logger: DEFAULT_LOGGER.to_string(),
			release: None,
			environment: None,
			server_name: None,
		}
	}
}

impl ReportClientBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn logger(mut self, logger: impl Into<String>) -> Self {
		self.logger = logger.into();
		self
	}

	/// Release identifier, e.g. a version or commit SHA.
	pub fn release(mut self, release: impl Into<String>) -> Self {
		self.release = Some(release.into());
		self
	}

	pub fn environment(mut self, environment: impl Into<String>) -> Self {
		self.environment = Some(environment.into());
		self
	}

	pub fn server_name(mut self, server_name: impl Into<String>) -> Self {
		self.server_name = Some(server_name.into());
		self
	}

	pub fn build<T: Transport>(self, transport: T) -> ReportClient<T> {
		ReportClient {
			transport,
			logger: self.logger,
			release: self.release,
			environment: self.environment,
			server_name: self.server_name,
		}
	}
}

/// Sends shell crash reports through a [`Transport`].
///
/// ```ignore
/// let client = ReportClientBuilder::new()
///     .environment("production")
///     .build(HttpTransport::new(dsn, timeout, RetryConfig::default())?);
/// let receipt = client
///     .capture_shell_error(summary_message("deploy.sh"), payload, extra)
///     .await?;
/// ```
#[derive(Debug)]
pub struct ReportClient<T> {
	transport: T,
	logger: String,
	release: Option<String>,
	environment: Option<String>,
	server_name: Option<String>,
}

impl<T: Transport> ReportClient<T> {
	pub fn transport(&self) -> &T {
		&self.transport
	}

	/// Build the event without sending it.
	pub fn event(
		&self,
		message: impl Into<String>,
		exception: ExceptionPayload,
		extra: ExtraInfo,
	) -> ReportEvent {
		let mut event = ReportEvent::new(self.logger.as_str(), message, exception, extra);
		event.release = self.release.clone();
		event.environment = self.environment.clone();
		event.server_name = self.server_name.clone();
		event
	}

	pub async fn send(&self, event: &ReportEvent) -> Result<SendReceipt> {
		self.transport.send(event).await
	}

	/// Build one event and send it.
	pub async fn capture_shell_error(
		&self,
		message: impl Into<String>,
		exception: ExceptionPayload,
		extra: ExtraInfo,
	) -> Result<SendReceipt> {
		let event = self.event(message, exception, extra);
		info!(
			event_id = %event.event_id,
			script = event.exception.primary().map(|e| e.exception_type.as_str()).unwrap_or_default(),
			"capturing shell error"
		);
		self.send(&event).await
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::SdkError;
	use async_trait::async_trait;
	use shcrash_core::Frame;
	use std::sync::Mutex;

	#[derive(Default)]
	struct RecordingTransport {
		events: Mutex<Vec<ReportEvent>>,
		fail: bool,
	}

	#[async_trait]
	impl Transport for RecordingTransport {
		async fn send(&self, event: &ReportEvent) -> Result<SendReceipt> {
			self.events.lock().unwrap().push(event.clone());
			if self.fail {
				return Err(SdkError::ServerError {
					status: 500,
					message: "boom".to_string(),
				});
			}
			Ok(SendReceipt {
				event_id: event.event_id.clone(),
			})
		}
	}

	fn payload() -> ExceptionPayload {
		ExceptionPayload::single(
			Frame::new("deploy.sh", None, 12, "make"),
			"deploy.sh",
			"error on line 12",
		)
	}

	#[test]
	fn test_summary_message() {
		assert_eq!(
			summary_message("/opt/jobs/nightly.sh"),
			"shcrash captured error in /opt/jobs/nightly.sh"
		);
	}

	#[tokio::test]
	async fn test_capture_sends_exactly_one_event() {
		let client = ReportClientBuilder::new()
			.release("1.4.0")
			.environment("ci")
			.server_name("runner-3")
			.build(RecordingTransport::default());

		let extra = ExtraInfo::build(Some("PATH=/bin"), Some("make: *** Error 2")).unwrap();
		let receipt = client
			.capture_shell_error(summary_message("deploy.sh"), payload(), extra.clone())
			.await
			.unwrap();

		let events = client.transport().events.lock().unwrap();
		assert_eq!(events.len(), 1);
		let event = &events[0];
		assert_eq!(receipt.event_id, event.event_id);
		assert_eq!(event.message, "shcrash captured error in deploy.sh");
		assert_eq!(event.logger, DEFAULT_LOGGER);
		assert_eq!(event.release.as_deref(), Some("1.4.0"));
		assert_eq!(event.environment.as_deref(), Some("ci"));
		assert_eq!(event.server_name.as_deref(), Some("runner-3"));
		assert_eq!(event.exception, payload());
		assert_eq!(event.extra, extra);
	}

	#[tokio::test]
	async fn test_transport_error_is_returned() {
		let client = ReportClientBuilder::new().build(RecordingTransport {
			fail: true,
			..Default::default()
		});

		let err = client
			.capture_shell_error("msg", payload(), ExtraInfo::default())
			.await
			.unwrap_err();

		assert!(matches!(err, SdkError::ServerError { status: 500, .. }));
		assert_eq!(client.transport().events.lock().unwrap().len(), 1);
	}

	#[test]
	fn test_event_uses_custom_logger() {
		let client = ReportClientBuilder::new()
			.logger("ci-hooks")
			.build(RecordingTransport::default());
		let event = client.event("msg", payload(), ExtraInfo::default());
		assert_eq!(event.logger, "ci-hooks");
		assert!(event.release.is_none());
	}
}
