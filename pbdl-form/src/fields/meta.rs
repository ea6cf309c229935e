// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (C) 2025 Michael Büsch <m@bues.ch>

use crate::{
    check::Checked,
    names::{NameMatch, NameTable},
    state::{DateKind, MetaSubInput, PersonKind},
};
use regex::Regex;
use std::sync::LazyLock;

static RE_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+[mshdMY]|\d\d\d\d(-\d\d(-\d\d)?)?)$").expect("RE_DATE")
});

/// Normalized metadata subsection values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetaSubParams {
    pub date: Option<(DateKind, String)>,
    /// Person filter with the names joined by `,`.
    pub person: Option<(PersonKind, String)>,
    /// The person names as shown in the form, joined by `", "`.
    pub display_names: String,
}

/// Resolve a comma separated name list against the contributor table.
///
/// Returns the parameter value and the display value.
/// A leading `!` excludes the listed persons and is kept in both.
fn resolve_names(raw: &str, names: &NameTable, errors: &mut Vec<String>) -> (String, String) {
    let raw = raw.trim();
    let (exclude, list) = match raw.strip_prefix('!') {
        Some(rest) => ("!", rest.trim_start()),
        None => ("", raw),
    };

    let mut rebuilt = Vec::new();
    for name in list.split(',').map(|n| n.trim()).filter(|n| !n.is_empty()) {
        match names.resolve(name) {
            NameMatch::Found(canonical) => rebuilt.push(canonical),
            NameMatch::Unknown => {
                errors.push(format!("Unknown name '{name}'"));
                rebuilt.push(name.to_string());
            }
            NameMatch::Ambiguous(candidates) => {
                errors.push(format!(
                    "Ambiguous name '{name}' matches: {}",
                    candidates.join(", ")
                ));
                rebuilt.push(name.to_string());
            }
        }
    }
    (
        format!("{exclude}{}", rebuilt.join(",")),
        format!("{exclude}{}", rebuilt.join(", ")),
    )
}

pub fn check_meta_sub(input: &MetaSubInput, names: &NameTable) -> Checked<MetaSubParams> {
    let mut ret = Checked::new(
        format!("{} {}", input.date, input.names),
        MetaSubParams::default(),
    );

    let date = input.date.trim();
    if !date.is_empty() {
        if !RE_DATE.is_match(date) {
            ret.error(format!("Bad value '{date}'"));
        }
        ret.value.date = Some((input.date_kind, date.to_string()));
    }

    if !input.names.trim().is_empty() {
        let mut errors = Vec::new();
        let (value, display) = resolve_names(&input.names, names, &mut errors);
        ret.errors.extend(errors);
        ret.value.person = Some((input.person_kind, value));
        ret.value.display_names = display;
    }
    ret
}

/// The collection name filter.
pub fn check_coll_re(raw: &str) -> Checked<String> {
    Checked::new(raw, raw.trim().to_string())
}


// vim: ts=4 sw=4 expandtab
