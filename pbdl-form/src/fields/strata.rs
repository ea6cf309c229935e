// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (C) 2025 Michael Büsch <m@bues.ch>

use crate::{check::Checked, fields::LookupOutcome, refdata::ApiResponse, state::StrataInput};

pub const ENV_TYPES: &[&str] = &["terr", "marine", "carbonate", "silicic", "unknown"];

#[rustfmt::skip]
pub const ENV_ZONES: &[&str] = &[
    "lacust", "fluvial", "karst", "terrother", "marginal", "reef", "stshallow", "stdeep",
    "offshore", "slope", "marindet",
];

/// The stratum name that needs an existence check, if any.
///
/// Names without any letter are ignored.
pub fn stratum_key(raw: &str) -> Option<String> {
    let name = raw.trim();
    if name.bytes().any(|c| c.is_ascii_alphabetic()) {
        Some(name.to_string())
    } else {
        None
    }
}

pub fn check_stratum(raw: &str, lookup: Option<&LookupOutcome>) -> Checked<String> {
    let Some(name) = stratum_key(raw) else {
        return Checked::new(raw, String::new());
    };
    let mut ret = Checked::new(raw, name);
    match lookup {
        Some(LookupOutcome::Invalid(msg)) => ret.error(msg.as_str()),
        Some(LookupOutcome::Failed(reason)) => {
            ret.error(format!("Unable to validate stratum name: {reason}"));
        }
        Some(LookupOutcome::Valid) | None => (),
    }
    ret
}

/// Interpret the response of a `strata/list.json?limit=0&rowcount&name=` check.
pub fn stratum_outcome<T>(resp: &ApiResponse<T>) -> LookupOutcome {
    match resp.records_found {
        Some(n) if n > 0 => LookupOutcome::Valid,
        _ => LookupOutcome::Invalid("no matching strata were found in the database".to_string()),
    }
}

/// Build the `envtype` value from the environment check-lists.
pub fn check_environment(input: &StrataInput) -> Checked<String> {
    let mut ret = Checked::new(
        format!("{} {}", input.env_types.join(","), input.env_zones.join(",")),
        String::new(),
    );

    let mut parts = Vec::new();
    for code in input.env_types.iter().map(|c| c.trim()) {
        if ENV_TYPES.contains(&code) {
            parts.push(code.to_string());
        } else {
            ret.error(format!("Unknown environment code '{code}'"));
        }
    }
    for code in input.env_zones.iter().map(|c| c.trim()) {
        if !ENV_ZONES.contains(&code) {
            ret.error(format!("Unknown environment code '{code}'"));
        } else if input.subtract {
            parts.push(format!("^{code}"));
        } else {
            parts.push(code.to_string());
        }
    }

    if !parts.is_empty() {
        let prefix = if input.exclude { "!" } else { "" };
        ret.value = format!("{prefix}{}", parts.join(","));
    }
    ret
}


// vim: ts=4 sw=4 expandtab
