// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The event document posted to the store endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shcrash_common_version::{BuildInfo, SDK_NAME};
use shcrash_core::{ExceptionPayload, ExtraInfo};
use uuid::Uuid;

pub const EVENT_LEVEL: &str = "error";
pub const EVENT_PLATFORM: &str = "other";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdkInfo {
	pub name: String,
	pub version: String,
}

impl SdkInfo {
	pub fn current() -> Self {
		Self {
			name: SDK_NAME.to_string(),
			version: BuildInfo::current().version.to_string(),
		}
	}

	/// `name/version`, as used in the auth header.
	pub fn client_string(&self) -> String {
		format!("{}/{}", self.name, self.version)
	}
}

/// One crash report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEvent {
	/// 32 lowercase hex characters.
	pub event_id: String,
	pub timestamp: DateTime<Utc>,
	pub level: String,
	pub platform: String,
	pub logger: String,
	pub message: String,
	pub exception: ExceptionPayload,
	pub extra: ExtraInfo,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub release: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub environment: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub server_name: Option<String>,
	pub sdk: SdkInfo,
}

impl ReportEvent {
	/// New event with a fresh id and the current time.
	pub fn new(
		logger: impl Into<String>,
		message: impl Into<String>,
		exception: ExceptionPayload,
		extra: ExtraInfo,
	) -> Self {
		Self {
			event_id: Uuid::new_v4().simple().to_string(),
			timestamp: Utc::now(),
			level: EVENT_LEVEL.to_string(),
			platform: EVENT_PLATFORM.to_string(),
			logger: logger.into(),
			message: message.into(),
			exception,
			extra,
			release: None,
			environment: None,
			server_name: None,
			sdk: SdkInfo::current(),
		}
	}
}
