// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! HTTP utilities for shcrash.
//!
//! - An HTTP client builder carrying the shcrash `User-Agent`
//! - Retry with exponential backoff for transient delivery failures

mod client;
mod retry;

pub use client::{builder, builder_with_timeout, user_agent};
pub use retry::{is_retryable_status, retry, RetryConfig, RetryableError, RETRYABLE_STATUSES};
