// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (C) 2025 Michael Büsch <m@bues.ch>

use crate::{
    check::Checked,
    fields::LookupOutcome,
    refdata::ApiResponse,
    state::TaxonomyInput,
};

/// Normalized taxonomy section values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaxonParams {
    pub base_name: String,
    pub reso: String,
    pub ident: String,
    pub pres: String,
    pub div_count: String,
    pub rank: String,
    pub status: String,
    pub variants: bool,
    pub accepted_only: bool,
}

fn clean_part(part: &str) -> String {
    part.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize a taxon name list.
///
/// Names are separated by `,` or `;`. Within a name `^` starts an
/// excluded subtaxon. The result uses `", "` between names and
/// `" ^"` before exclusions, and ends in a letter or `:`.
pub fn normalize_taxon_name(raw: &str) -> String {
    let mut segments = Vec::new();
    for segment in raw.split([',', ';']) {
        let mut parts = segment.split('^');
        let base = parts.next().map(clean_part).unwrap_or_default();
        let mut rendered = base;
        for excl in parts.map(clean_part).filter(|p| !p.is_empty()) {
            if !rendered.is_empty() {
                rendered.push(' ');
            }
            rendered.push('^');
            rendered.push_str(&excl);
        }
        if !rendered.is_empty() {
            segments.push(rendered);
        }
    }
    let joined = segments.join(", ");
    joined
        .trim_end_matches(|c: char| !c.is_ascii_alphabetic() && c != ':')
        .to_string()
}

/// Validate the taxonomy section.
///
/// `lookup` is the result of the name check for the normalized name.
/// `None` means the check is still pending, so the name is used unvalidated.
pub fn check_taxon(input: &TaxonomyInput, lookup: Option<&LookupOutcome>) -> Checked<TaxonParams> {
    let base_name = normalize_taxon_name(&input.base_name);

    let (status, variants) = if input.accepted_only {
        ("accepted".to_string(), false)
    } else {
        (input.status.trim().to_string(), input.variants)
    };

    let mut ret = Checked::new(
        &input.base_name,
        TaxonParams {
            base_name,
            reso: input.reso.trim().to_string(),
            ident: input.ident.trim().to_string(),
            pres: input.pres.trim().to_string(),
            div_count: input.div_count.trim().to_string(),
            rank: input.rank.trim().to_string(),
            status,
            variants,
            accepted_only: input.accepted_only,
        },
    );

    if !ret.value.base_name.is_empty() {
        match lookup {
            Some(LookupOutcome::Invalid(msg)) => ret.error(msg.as_str()),
            Some(LookupOutcome::Failed(reason)) => {
                ret.error(format!("Unable to validate taxon name: {reason}"))
            }
            Some(LookupOutcome::Valid) | None => (),
        }
    }
    ret
}

/// Interpret the response of a `taxa/list.json?name=` check.
pub fn taxon_outcome<T>(resp: &ApiResponse<T>) -> LookupOutcome {
    if let Some(warnings) = &resp.warnings {
        let msg = warnings.join("; ");
        if msg.is_empty() {
            LookupOutcome::Invalid("Warnings occurred".to_string())
        } else {
            LookupOutcome::Invalid(msg)
        }
    } else if let Some(errors) = &resp.errors {
        let msg = errors.join("; ");
        if msg.is_empty() {
            LookupOutcome::Invalid("Errors occurred".to_string())
        } else {
            LookupOutcome::Invalid(msg)
        }
    } else {
        LookupOutcome::Valid
    }
}


// vim: ts=4 sw=4 expandtab
