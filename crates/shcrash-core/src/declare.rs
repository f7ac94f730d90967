// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Parsing of `declare -p` dumps into local variables.
//!
//! Every line is classified on its own. A declaration line looks like
//! `declare -<a><b> NAME=VALUE` where `<b>` is never `x`: exported variables
//! belong to the environment, which is reported separately. Arrays and
//! associative arrays are kept as the literal the shell printed, e.g.
//! `([0]="a" [1]="b")`. Values spanning several lines are not reassembled;
//! their continuation lines simply fail to classify.

use std::collections::BTreeMap;

const DECLARE_KEYWORD: &str = "declare ";
const EXPORT_FLAG: char = 'x';

/// Classification of a single line of `declare -p` output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationLine<'a> {
	/// `declare -x NAME=VALUE`
	Exported,
	/// A non-exported declaration carrying a value.
	Assigned { name: &'a str, value: &'a str },
	/// A non-exported declaration without `=`, i.e. declared but unset.
	Unassigned { name: &'a str },
	/// Not a declaration this parser understands.
	NonMatching,
}

/// Classify one line of `declare -p` output.
///
/// The flag token must be exactly two characters. Lines whose value is empty
/// or starts with whitespace do not match.
pub fn classify(line: &str) -> DeclarationLine<'_> {
	let Some(rest) = line.trim_start().strip_prefix(DECLARE_KEYWORD) else {
		return DeclarationLine::NonMatching;
	};
	let Some((flags, declaration)) = rest.split_once(' ') else {
		return DeclarationLine::NonMatching;
	};

	let mut chars = flags.chars();
	let (Some(_), Some(attribute), None) = (chars.next(), chars.next(), chars.next()) else {
		return DeclarationLine::NonMatching;
	};
	if attribute == EXPORT_FLAG {
		return DeclarationLine::Exported;
	}

	match declaration.split_once('=') {
		Some((name, value)) if !name.is_empty() && starts_with_non_whitespace(value) => {
			DeclarationLine::Assigned { name, value }
		}
		Some(_) => DeclarationLine::NonMatching,
		None if !declaration.is_empty() => DeclarationLine::Unassigned { name: declaration },
		None => DeclarationLine::NonMatching,
	}
}

fn starts_with_non_whitespace(value: &str) -> bool {
	value.chars().next().is_some_and(|c| !c.is_whitespace())
}

/// Remove one pair of surrounding double quotes, if both are present.
///
/// Escaped quotes inside the value are left alone: `"grep \"ok\""` becomes
/// `grep \"ok\"`.
pub fn strip_outer_quotes(value: &str) -> &str {
	if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
		&value[1..value.len() - 1]
	} else {
		value
	}
}

/// Parse a `declare -p` dump into a name to value mapping.
///
/// Only [`DeclarationLine::Assigned`] lines contribute. When a name is
/// declared more than once the last declaration wins.
pub fn parse_declarations(dump: &str) -> BTreeMap<String, String> {
	dump
		.lines()
		.filter_map(|line| match classify(line) {
			DeclarationLine::Assigned { name, value } => {
				Some((name.to_string(), strip_outer_quotes(value).to_string()))
			}
			_ => None,
		})
		.collect()
}
