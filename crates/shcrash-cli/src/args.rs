// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::path::PathBuf;

use clap::Parser;
use shcrash_cli_config::CliOverrides;
use shcrash_core::Invocation;

/// Report a failed shell command to an error-tracking service.
///
/// Normally invoked by the `shcrash-bash` ERR trap rather than by hand. The
/// DSN is read from SENTRY_DSN or SENTRY_DSN_FILE.
#[derive(Parser, Debug)]
#[command(name = "shcrash", version = shcrash_common_version::VERSION)]
pub struct Args {
	/// Path of the failing script
	pub script: String,

	/// The command that failed
	#[arg(allow_hyphen_values = true)]
	pub command: String,

	/// Line number of the failing command
	#[arg(value_parser = clap::value_parser!(u32).range(1..))]
	pub lineno: u32,

	/// Script environment as newline separated KEY=VALUE entries
	#[arg(long, allow_hyphen_values = true)]
	pub env: Option<String>,

	/// Arguments the script was started with
	#[arg(long, allow_hyphen_values = true)]
	pub cmdline_args: Option<String>,

	/// Captured standard error of the script
	#[arg(long, allow_hyphen_values = true)]
	pub stderr: Option<String>,

	/// Working directory the script path is relative to
	#[arg(long)]
	pub pwd: Option<PathBuf>,

	/// Function the failure happened in
	#[arg(long, allow_hyphen_values = true)]
	pub function: Option<String>,

	/// Output of `declare -p`
	#[arg(long, allow_hyphen_values = true)]
	pub declares: Option<String>,

	/// Log level (error, warn, info, debug, trace)
	#[arg(long)]
	pub log_level: Option<String>,

	/// Log format (compact, pretty, json)
	#[arg(long)]
	pub log_format: Option<String>,

	/// Environment name attached to the report
	#[arg(long)]
	pub environment: Option<String>,

	/// Release attached to the report
	#[arg(long)]
	pub release: Option<String>,

	/// Config file to use instead of the user config
	#[arg(long)]
	pub config: Option<PathBuf>,

	/// Print the event as JSON instead of sending it
	#[arg(long)]
	pub dry_run: bool,
}

impl Args {
	pub fn cli_overrides(&self) -> CliOverrides {
		CliOverrides {
			log_level: self.log_level.clone(),
			log_format: self.log_format.clone(),
			environment: self.environment.clone(),
			release: self.release.clone(),
			config_file: self.config.clone(),
		}
	}

	pub fn invocation(&self) -> Invocation {
		Invocation {
			script: self.script.clone(),
			command: self.command.clone(),
			lineno: self.lineno,
			function: self.function.clone(),
			pwd: self.pwd.clone(),
			declares: self.declares.clone(),
			env: self.env.clone(),
			stderr: self.stderr.clone(),
			cmdline_args: self.cmdline_args.clone(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use clap::CommandFactory;

	#[test]
	fn test_args_definition_is_valid() {
		Args::command().debug_assert();
	}

	#[test]
	fn test_positionals_and_flags() {
		let args = Args::try_parse_from([
			"shcrash",
			"--pwd",
			"/srv/app",
			"--function",
			"deploy",
			"--env",
			"A=1\nB=2",
			"deploy.sh",
			"rsync -a --delete src dst",
			"17",
		])
		.unwrap();

		let invocation = args.invocation();
		assert_eq!(invocation.script, "deploy.sh");
		assert_eq!(invocation.command, "rsync -a --delete src dst");
		assert_eq!(invocation.lineno, 17);
		assert_eq!(invocation.function(), Some("deploy"));
		assert_eq!(invocation.env(), Some("A=1\nB=2"));
		assert!(!args.dry_run);
	}

	#[test]
	fn test_hyphen_leading_values_are_accepted() {
		let args = Args::try_parse_from([
			"shcrash",
			"--stderr",
			"-bash: nope: command not found",
			"--",
			"run.sh",
			"-x",
			"3",
		])
		.unwrap();
		assert_eq!(args.stderr.as_deref(), Some("-bash: nope: command not found"));
		assert_eq!(args.command, "-x");
	}

	#[test]
	fn test_lineno_must_be_positive() {
		assert!(Args::try_parse_from(["shcrash", "run.sh", "false", "0"]).is_err());
		assert!(Args::try_parse_from(["shcrash", "run.sh", "false", "x"]).is_err());
	}

	#[test]
	fn test_overrides_from_flags() {
		let args = Args::try_parse_from([
			"shcrash",
			"--log-level",
			"debug",
			"--environment",
			"ci",
			"--dry-run",
			"run.sh",
			"false",
			"1",
		])
		.unwrap();

		let overrides = args.cli_overrides();
		assert_eq!(overrides.log_level.as_deref(), Some("debug"));
		assert_eq!(overrides.environment.as_deref(), Some("ci"));
		assert!(args.dry_run);
	}
}
