// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use anyhow::{Context, Result};
use shcrash_cli_config::ReportConfig;
use shcrash_core::{ExceptionBuilder, ExceptionPayload, ExtraInfo, Invocation};
use shcrash_sdk::{
	summary_message, Dsn, HttpTransport, ReportClient, ReportClientBuilder, RetryConfig,
	Transport,
};
use tracing::error;

/// Collect the extra metadata for `invocation`.
///
/// A malformed environment block is logged and dropped; stderr and the
/// command line arguments are still reported.
pub fn extra_info(invocation: &Invocation) -> ExtraInfo {
	let extra = match ExtraInfo::build(invocation.env(), invocation.stderr()) {
		Ok(extra) => extra,
		Err(e) => {
			error!(error = %e, "discarding malformed environment");
			ExtraInfo {
				stderr: invocation.stderr().map(str::to_string),
				..ExtraInfo::default()
			}
		}
	};
	extra.with_cmdline_args(invocation.cmdline_args())
}

pub fn build_client<T: Transport>(config: &ReportConfig, transport: T) -> ReportClient<T> {
	let mut builder = ReportClientBuilder::new();
	if let Some(environment) = &config.environment {
		builder = builder.environment(environment.as_str());
	}
	if let Some(release) = &config.release {
		builder = builder.release(release.as_str());
	}
	if let Some(server_name) = &config.server_name {
		builder = builder.server_name(server_name.as_str());
	}
	builder.build(transport)
}

/// Message, exception and extra data for one failed command.
#[derive(Debug, Clone)]
pub struct ReportParts {
	pub message: String,
	pub exception: ExceptionPayload,
	pub extra: ExtraInfo,
}

pub fn assemble(config: &ReportConfig, invocation: &Invocation) -> ReportParts {
	ReportParts {
		message: summary_message(&invocation.script),
		exception: ExceptionBuilder::new()
			.context_lines(config.context_lines)
			.build(invocation),
		extra: extra_info(invocation),
	}
}

pub fn http_transport(dsn: Dsn, config: &ReportConfig) -> Result<HttpTransport> {
	let retry = RetryConfig::default().with_max_attempts(config.max_attempts);
	HttpTransport::new(dsn, config.request_timeout, retry).context("failed to create HTTP transport")
}

/// Build and deliver one report.
///
/// Delivery failures are logged rather than returned: the failing script has
/// already failed and must not see a second error from its reporter.
pub async fn report<T: Transport>(
	client: &ReportClient<T>,
	config: &ReportConfig,
	invocation: &Invocation,
	dry_run: bool,
) -> Result<()> {
	let ReportParts {
		message,
		exception,
		extra,
	} = assemble(config, invocation);

	if dry_run {
		let event = client.event(message, exception, extra);
		println!("{}", serde_json::to_string_pretty(&event)?);
		return Ok(());
	}

	if let Err(e) = client.capture_shell_error(message, exception, extra).await {
		error!(error = %e, "failed to deliver crash report");
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use async_trait::async_trait;
	use shcrash_sdk::{ReportEvent, SdkError, SendReceipt};
	use std::sync::Mutex;

	#[derive(Default)]
	struct Recorder {
		events: Mutex<Vec<ReportEvent>>,
		fail: bool,
	}

	#[async_trait]
	impl Transport for Recorder {
		async fn send(&self, event: &ReportEvent) -> shcrash_sdk::Result<SendReceipt> {
			self.events.lock().unwrap().push(event.clone());
			if self.fail {
				return Err(SdkError::ServerError {
					status: 500,
					message: "down".to_string(),
				});
			}
			Ok(SendReceipt {
				event_id: event.event_id.clone(),
			})
		}
	}

	fn invocation() -> Invocation {
		Invocation {
			env: Some("HOME=/root\nCI=true".to_string()),
			stderr: Some("make: *** [all] Error 2".to_string()),
			cmdline_args: Some("--target release".to_string()),
			..Invocation::new("build.sh", "make all", 12)
		}
	}

	#[test]
	fn test_extra_info_collects_everything() {
		let extra = extra_info(&invocation());

		let env = extra.environment.unwrap();
		assert_eq!(env["CI"], "true");
		assert_eq!(extra.stderr.as_deref(), Some("make: *** [all] Error 2"));
		assert_eq!(extra.cmdline_args.as_deref(), Some("--target release"));
	}

	#[test]
	fn test_malformed_environment_keeps_stderr() {
		let invocation = Invocation {
			env: Some("HOME=/root\ngarbage".to_string()),
			..invocation()
		};

		let extra = extra_info(&invocation);

		assert!(extra.environment.is_none());
		assert_eq!(extra.stderr.as_deref(), Some("make: *** [all] Error 2"));
		assert_eq!(extra.cmdline_args.as_deref(), Some("--target release"));
	}

	#[test]
	fn test_assembled_event_applies_config() {
		let config = ReportConfig {
			environment: Some("ci".to_string()),
			release: Some("1.2.3".to_string()),
			..ReportConfig::default()
		};
		let client = build_client(&config, Recorder::default());

		let parts = assemble(&config, &invocation());
		let event = client.event(parts.message, parts.exception, parts.extra);

		assert_eq!(event.message, "shcrash captured error in build.sh");
		assert_eq!(event.environment.as_deref(), Some("ci"));
		assert_eq!(event.release.as_deref(), Some("1.2.3"));
		assert!(event.server_name.is_none());
		let exception = event.exception.primary().unwrap();
		assert_eq!(exception.value, "error on line 12");
		assert_eq!(exception.stacktrace.frames[0].module, "make all");
	}

	#[tokio::test]
	async fn test_report_sends_once() {
		let config = ReportConfig::default();
		let client = build_client(&config, Recorder::default());

		report(&client, &config, &invocation(), false).await.unwrap();

		let events = client.transport().events.lock().unwrap();
		assert_eq!(events.len(), 1);
		assert_eq!(events[0].message, "shcrash captured error in build.sh");
		assert_eq!(events[0].extra.cmdline_args.as_deref(), Some("--target release"));
	}

	#[tokio::test]
	async fn test_report_swallows_delivery_failure() {
		let config = ReportConfig::default();
		let client = build_client(
			&config,
			Recorder {
				fail: true,
				..Recorder::default()
			},
		);

		assert!(report(&client, &config, &invocation(), false).await.is_ok());
		assert_eq!(client.transport().events.lock().unwrap().len(), 1);
	}

	#[tokio::test]
	async fn test_dry_run_does_not_send() {
		let config = ReportConfig::default();
		let client = build_client(&config, Recorder::default());

		report(&client, &config, &invocation(), true).await.unwrap();

		assert!(client.transport().events.lock().unwrap().is_empty());
	}
}
