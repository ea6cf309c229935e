// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (C) 2025 Michael Büsch <m@bues.ch>

//! Contributor name table for the metadata person filters.

use regex::Regex;
use std::{collections::HashSet, sync::LazyLock};

static RE_LAST_FIRST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+),\s+(.+)").expect("RE_LAST_FIRST"));
static RE_FIRST_LAST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+)\s+(.+)").expect("RE_FIRST_LAST"));
static RE_INITIAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\w)\w*[.]\s*(.*)").expect("RE_INITIAL"));

#[derive(Debug, Clone)]
struct Entry {
    /// Canonical `F. Last` form.
    canonical: String,
    /// Lower case surname.
    surname: String,
    /// Lower case first initial. Empty for single word names.
    initial: String,
}

/// Result of resolving one name against the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameMatch {
    /// The name is known. Contains the canonical form.
    Found(String),
    Unknown,
    /// More than one entry matches. Contains all canonical candidates.
    Ambiguous(Vec<String>),
}

/// Canonical contributor names and their match keys.
#[derive(Debug, Clone, Default)]
pub struct NameTable {
    entries: Vec<Entry>,
    valid: HashSet<String>,
}

impl NameTable {
    /// Build the table from `Last, First` or `First Last` names.
    pub fn new<S: AsRef<str>>(names: &[S]) -> Self {
        let mut this = Self::default();
        for name in names {
            this.add(name.as_ref().trim());
        }
        this
    }

    fn add(&mut self, name: &str) {
        let (last, first) = if let Some(caps) = RE_LAST_FIRST.captures(name) {
            (caps[1].to_string(), caps[2].to_string())
        } else if let Some(caps) = RE_FIRST_LAST.captures(name) {
            (caps[2].to_string(), caps[1].to_string())
        } else if !name.is_empty() {
            (name.to_string(), String::new())
        } else {
            return;
        };

        let initial: String = first.chars().take(1).collect();
        let canonical = if initial.is_empty() {
            last.clone()
        } else {
            format!("{initial}. {last}")
        };
        self.valid.insert(canonical.clone());
        self.entries.push(Entry {
            canonical,
            surname: last.to_lowercase(),
            initial: initial.to_lowercase(),
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve one name.
    ///
    /// An exact canonical name is taken as is.
    /// Otherwise the text is matched as a surname prefix,
    /// optionally preceded by an initial (`J. Smi`).
    pub fn resolve(&self, name: &str) -> NameMatch {
        if self.valid.contains(name) {
            return NameMatch::Found(name.to_string());
        }

        let (initial, check) = match RE_INITIAL.captures(name) {
            Some(caps) => (caps[1].to_lowercase(), caps[2].to_lowercase()),
            None => (String::new(), name.to_lowercase()),
        };
        let matches: Vec<&Entry> = self
            .entries
            .iter()
            .filter(|e| e.surname.starts_with(&check))
            .filter(|e| initial.is_empty() || initial == e.initial)
            .collect();

        match matches.as_slice() {
            [] => NameMatch::Unknown,
            [one] => NameMatch::Found(one.canonical.clone()),
            many => NameMatch::Ambiguous(many.iter().map(|e| e.canonical.clone()).collect()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn table() -> NameTable {
        NameTable::new(&[
            "Smith, John",
            "Kate Smith",
            "Alroy, John",
            "Mary Ann Uhen",
            "Plato",
        ])
    }

    #[test]
    fn test_canonical() {
        let t = table();
        assert_eq!(t.len(), 5);
        assert_eq!(t.resolve("J. Smith"), NameMatch::Found("J. Smith".to_string()));
        assert_eq!(t.resolve("K. Smith"), NameMatch::Found("K. Smith".to_string()));
        assert_eq!(t.resolve("M. Uhen"), NameMatch::Found("M. Uhen".to_string()));
        assert_eq!(t.resolve("Plato"), NameMatch::Found("Plato".to_string()));
    }

    #[test]
    fn test_prefix() {
        let t = table();
        assert_eq!(t.resolve("alr"), NameMatch::Found("J. Alroy".to_string()));
        assert_eq!(t.resolve("K. Smi"), NameMatch::Found("K. Smith".to_string()));
        assert_eq!(t.resolve("Kate. smith"), NameMatch::Found("K. Smith".to_string()));
        assert_eq!(t.resolve("Jones"), NameMatch::Unknown);
        assert_eq!(t.resolve("X. Smith"), NameMatch::Unknown);
        assert_eq!(
            t.resolve("Smith"),
            NameMatch::Ambiguous(vec!["J. Smith".to_string(), "K. Smith".to_string()])
        );
    }

    #[test]
    fn test_empty() {
        let t = NameTable::new::<&str>(&[]);
        assert!(t.is_empty());
        assert_eq!(t.resolve("Smith"), NameMatch::Unknown);
    }
}

// vim: ts=4 sw=4 expandtab
