// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Reporting SDK for shell crash reports.
//!
//! Wraps the payloads assembled by `shcrash-core` into a [`ReportEvent`] and
//! delivers it through a [`Transport`]. [`HttpTransport`] posts to the store
//! endpoint derived from a [`Dsn`].
//!
//! ```ignore
//! let dsn: Dsn = "https://key@errors.example.com/42".parse()?;
//! let transport = HttpTransport::new(dsn, Duration::from_secs(10), RetryConfig::default())?;
//! let client = ReportClientBuilder::new().environment("ci").build(transport);
//! client.capture_shell_error(summary_message("deploy.sh"), payload, extra).await?;
//! ```

pub mod client;
pub mod dsn;
pub mod error;
pub mod event;
pub mod transport;

pub use client::{summary_message, ReportClient, ReportClientBuilder, DEFAULT_LOGGER};
pub use dsn::Dsn;
pub use error::{Result, SdkError};
pub use event::{ReportEvent, SdkInfo, EVENT_LEVEL, EVENT_PLATFORM};
pub use transport::{HttpTransport, SendReceipt, Transport};

pub use shcrash_common_http::RetryConfig;
