// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core types for shell crash reports.
//!
//! This crate turns the introspection a failing shell script can hand over
//! (script path, failing line, function, a `declare -p` dump, captured stderr
//! and the environment) into a single-frame exception payload plus a sibling
//! bundle of extra metadata. It performs no I/O beyond reading the failing
//! script for source context, and sends nothing anywhere; see `shcrash-sdk`
//! for delivery.
//!
//! # Overview
//!
//! - [`parse_declarations`] classifies `declare -p` lines and keeps the
//!   non-exported, assigned ones
//! - [`SourceContextExtractor`] reads a bounded window of lines around the
//!   failing line
//! - [`ExceptionBuilder`] assembles the [`Frame`] and [`ExceptionPayload`]
//! - [`ExtraInfo::build`] parses the environment block and carries stderr

pub mod declare;
pub mod error;
pub mod event;
pub mod extra;
pub mod payload;
pub mod source;

pub use declare::{classify, parse_declarations, strip_outer_quotes, DeclarationLine};
pub use error::{CoreError, Result};
pub use event::{
	format_message, ExceptionPayload, ExceptionValue, Frame, Stacktrace, BUILTINS_MODULE,
	DEFAULT_FUNCTION,
};
pub use extra::ExtraInfo;
pub use payload::{resolve_script_path, ExceptionBuilder, Invocation};
pub use source::{FileContext, SourceContextExtractor, DEFAULT_CONTEXT_LINES};
