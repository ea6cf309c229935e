// -*- coding: utf-8 -*-
// Copyright (C) 2025 Michael Büsch <m@bues.ch>
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Split `data` at the first occurrence of the ASCII byte `delim`.
///
/// Returns `None` if `delim` does not occur in `data`.
pub fn split_delim(data: &str, delim: u8) -> Option<(&str, &str)> {
    debug_assert!(delim.is_ascii());
    memchr::memchr(delim, data.as_bytes()).map(|i| (&data[..i], &data[i + 1..]))
}

/// Returns everything after the first `;` or `,` in `data`,
/// or all of `data` if it contains neither.
///
/// Used for multi-name text fields, where only the item currently
/// being typed matters.
pub fn split_off_first_item(data: &str) -> &str {
    match memchr::memchr2(b';', b',', data.as_bytes()) {
        Some(i) => &data[i + 1..],
        None => data,
    }
}

/// Split a user supplied list on whitespace and commas.
/// Empty items are skipped.
pub fn split_list(data: &str) -> impl Iterator<Item = &str> {
    data.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
}


// vim: ts=4 sw=4 expandtab
