// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (C) 2025 Michael Büsch <m@bues.ch>

use crate::{check::Checked, record::RecordType, state::FormState};

/// Reference types in check-list order.
pub const REF_TYPES: &[&str] = &["auth", "class", "ops", "occs", "specs", "colls"];

/// Record type specific options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordParams {
    /// Reference type selection.
    pub select: Option<String>,
    pub op_type: Option<String>,
    pub private: bool,
}

/// Join the selected reference types in check-list order and
/// replace well known combinations by their short names.
pub fn collapse_ref_types(selected: &[String], errors: &mut Vec<String>) -> String {
    for code in selected.iter().map(|c| c.trim()) {
        if !REF_TYPES.contains(&code) {
            errors.push(format!("Unknown reference type '{code}'"));
        }
    }
    let joined = REF_TYPES
        .iter()
        .filter(|t| selected.iter().any(|s| s.trim() == **t))
        .copied()
        .collect::<Vec<_>>()
        .join(",");
    match joined.as_str() {
        "auth,class" => "taxonomy".to_string(),
        "auth,class,ops" => "auth,ops".to_string(),
        "auth,class,ops,occs,colls" | "auth,ops,occs,colls" => "all".to_string(),
        _ => joined,
    }
}

/// Check the options that do not belong to a form section.
pub fn check_records(state: &FormState) -> Checked<RecordParams> {
    let mut ret = Checked::new(state.ref_types.join(","), RecordParams::default());

    if !state.record_type.supports(state.format) {
        ret.error("The RIS format is only available for reference records");
    }

    if state.record_type.has_ref_types() {
        let mut errors = Vec::new();
        let select = collapse_ref_types(&state.ref_types, &mut errors);
        ret.errors.extend(errors);
        if !select.is_empty() {
            ret.value.select = Some(select);
        }
    } else if state.record_type == RecordType::Ops {
        ret.value.op_type = state
            .op_type
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
    }

    ret.value.private = state.private && state.contributor;
    ret
}


// vim: ts=4 sw=4 expandtab
