// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

mod args;
mod logging;
mod report;

use anyhow::{bail, Context, Result};
use clap::Parser;
use shcrash_cli_config::load_config_with_cli;
use shcrash_common_secret::load_secret_env;
use shcrash_common_version::BuildInfo;
use shcrash_sdk::Dsn;
use tracing::{debug, warn};

use crate::args::Args;

const DSN_ENV_VAR: &str = "SENTRY_DSN";

/// Read and parse the DSN. `SENTRY_DSN_FILE` wins over `SENTRY_DSN`.
fn load_dsn() -> Result<Dsn> {
	let secret = load_secret_env(DSN_ENV_VAR)
		.with_context(|| format!("failed to read {DSN_ENV_VAR}"))?;
	let Some(secret) = secret else {
		bail!("Missing {DSN_ENV_VAR}");
	};
	secret
		.expose()
		.parse::<Dsn>()
		.with_context(|| format!("failed to parse {DSN_ENV_VAR}"))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
	// Checked before argument parsing so a hook without a DSN fails fast.
	let dsn = load_dsn()?;
	let args = Args::parse();

	let loaded = load_config_with_cli(args.cli_overrides());
	let config = loaded.config;
	logging::init_tracing(&config.logging);
	for e in &loaded.rejected {
		warn!(error = %e, "ignoring invalid configuration value");
	}

	debug!(build = %BuildInfo::current(), dsn = ?dsn, "starting shcrash");

	let invocation = args.invocation();
	let transport = report::http_transport(dsn, &config.report)?;
	let client = report::build_client(&config.report, transport);

	report::report(&client, &config.report, &invocation, args.dry_run).await
}
