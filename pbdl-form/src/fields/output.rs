// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (C) 2025 Michael Büsch <m@bues.ch>

use crate::{
    check::Checked,
    record::{FULL_BLOCK, RecordType},
    state::{OutputInput, SELECT_NONE, SortDir},
};
use regex::Regex;
use std::sync::LazyLock;

static RE_LIMIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+)(\s*,\s*(\d+))?\s*$").expect("RE_LIMIT"));

/// Normalized output options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputParams {
    /// Selected block codes, with `full` expanded.
    pub blocks: Vec<String>,
    pub order: Option<String>,
    pub offset: Option<String>,
    pub limit: Option<String>,
}

fn push_unique(list: &mut Vec<String>, code: &str) {
    if !list.iter().any(|c| c == code) {
        list.push(code.to_string());
    }
}

fn expand_blocks(blocks: &[String], record_type: RecordType, errors: &mut Vec<String>) -> Vec<String> {
    let desc = record_type.desc();
    let mut ret = Vec::new();
    for code in blocks.iter().map(|c| c.trim()).filter(|c| !c.is_empty()) {
        match desc.block(code) {
            Some(blk) if blk.code == FULL_BLOCK => {
                for code in desc.full_blocks() {
                    push_unique(&mut ret, code);
                }
            }
            Some(blk) => push_unique(&mut ret, blk.code),
            None => errors.push(format!("Unknown output block '{code}'")),
        }
    }
    ret
}

/// Compose the `order` value.
///
/// `authpub` and `pubauth` sort by two keys and default to descending.
fn compose_order(
    key: &str,
    dir: Option<SortDir>,
    record_type: RecordType,
    errors: &mut Vec<String>,
) -> Option<String> {
    let key = key.trim();
    if key.is_empty() || key == SELECT_NONE {
        return None;
    }
    let desc = record_type.desc();
    if !desc.has_order_key(key) {
        errors.push(format!("Unknown sort order '{key}' for {}", desc.label));
        return None;
    }
    let composite_dir = dir.unwrap_or(SortDir::Desc).as_str();
    Some(match key {
        "authpub" => format!("author,pubyr.{composite_dir}"),
        "pubauth" => format!("pubyr.{composite_dir},author"),
        key => match dir {
            Some(dir) => format!("{key}.{}", dir.as_str()),
            None => key.to_string(),
        },
    })
}

/// Parse `N` or `OFFSET, N`.
pub fn parse_limit(raw: &str) -> Result<(Option<String>, Option<String>), String> {
    if raw.trim().is_empty() {
        return Ok((None, None));
    }
    let caps = RE_LIMIT
        .captures(raw)
        .ok_or_else(|| format!("Invalid limit '{raw}'"))?;
    Ok(match caps.get(3) {
        Some(limit) => (Some(caps[1].to_string()), Some(limit.as_str().to_string())),
        None => (None, Some(caps[1].to_string())),
    })
}

pub fn check_output(input: &OutputInput, record_type: RecordType) -> Checked<OutputParams> {
    let mut errors = Vec::new();
    let blocks = expand_blocks(&input.blocks, record_type, &mut errors);
    let order = compose_order(&input.order, input.direction, record_type, &mut errors);
    let (offset, limit) = match parse_limit(&input.limit) {
        Ok(v) => v,
        Err(e) => {
            errors.push(e);
            (None, None)
        }
    };

    let mut ret = Checked::new(
        &input.limit,
        OutputParams {
            blocks,
            order,
            offset,
            limit,
        },
    );
    ret.errors = errors;
    ret
}


// vim: ts=4 sw=4 expandtab
