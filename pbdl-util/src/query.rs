// -*- coding: utf-8 -*-
// Copyright (C) 2025 Michael Büsch <m@bues.ch>
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::{
    borrow::Cow,
    fmt::{Display, Formatter},
};

/// Separators of the data service parameter syntax.
const KEEP: &[char] = &[',', '^', '!', ':'];

/// Percent-encode `value` for use in a query string.
///
/// Separator characters used by the data service (`,` `^` `!` `:`)
/// are kept as they are, so the result stays readable.
pub fn escape_value(value: &str) -> Cow<'_, str> {
    if let Cow::Borrowed(_) = urlencoding::encode(value) {
        return Cow::Borrowed(value);
    }
    let mut ret = String::with_capacity(value.len() + 8);
    for part in value.split_inclusive(KEEP) {
        let text = part.trim_end_matches(KEEP);
        ret.push_str(&urlencoding::encode(text));
        ret.push_str(&part[text.len()..]);
    }
    Cow::Owned(ret)
}

/// An ordered query string.
///
/// Components are either `name=value` pairs or bare flags (`name`).
/// The order of insertion is preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    comps: Vec<(String, Option<String>)>,
}

impl Query {
    pub fn new() -> Self {
        Default::default()
    }

    /// Append a `name=value` component.
    pub fn push(&mut self, name: &str, value: impl Into<String>) {
        debug_assert!(!name.is_empty());
        self.comps.push((name.to_string(), Some(value.into())));
    }

    /// Append a bare flag component.
    pub fn push_flag(&mut self, name: &str) {
        debug_assert!(!name.is_empty());
        self.comps.push((name.to_string(), None));
    }

    /// Append all components of `other`.
    pub fn append(&mut self, other: Query) {
        self.comps.extend(other.comps);
    }

    /// Returns the value of the first component named `name`.
    /// Flags have no value and yield `None`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.comps
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, v)| v.as_deref())
    }

    /// Returns true, if a component (pair or flag) named `name` exists.
    pub fn contains(&self, name: &str) -> bool {
        self.comps.iter().any(|(n, _)| n == name)
    }

    pub fn len(&self) -> usize {
        self.comps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comps.is_empty()
    }

    /// Returns the components as unescaped `name=value` / `name` strings.
    pub fn to_strings(&self) -> Vec<String> {
        self.comps
            .iter()
            .map(|(n, v)| match v {
                Some(v) => format!("{n}={v}"),
                None => n.clone(),
            })
            .collect()
    }
}

impl Display for Query {
    /// Format the escaped, `&` separated query string.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (i, (name, value)) in self.comps.iter().enumerate() {
            if i > 0 {
                write!(f, "&")?;
            }
            write!(f, "{name}")?;
            if let Some(value) = value {
                write!(f, "={}", escape_value(value))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_query() {
        let mut q = Query::new();
        assert!(q.is_empty());
        assert_eq!(q.to_string(), "");

        q.push("base_name", "Canis");
        q.push_flag("recent");
        q.push("cc", "!NOA,^US");
        assert_eq!(q.len(), 3);
        assert_eq!(q.get("base_name"), Some("Canis"));
        assert_eq!(q.get("recent"), None);
        assert!(q.contains("recent"));
        assert!(!q.contains("interval"));
        assert_eq!(q.to_strings(), ["base_name=Canis", "recent", "cc=!NOA,^US"]);
        assert_eq!(q.to_string(), "base_name=Canis&recent&cc=!NOA,^US");

        let mut r = Query::new();
        r.push("limit", "10");
        q.append(r);
        assert_eq!(q.to_string(), "base_name=Canis&recent&cc=!NOA,^US&limit=10");
    }

    #[test]
    fn test_escape() {
        assert!(matches!(escape_value("Canis_lupus"), Cow::Borrowed(_)));
        assert_eq!(escape_value("Canis ^lupus"), "Canis%20^lupus");
        assert_eq!(escape_value("!NOA,^US:x"), "!NOA,^US:x");
        assert_eq!(escape_value("pubyr.desc,author"), "pubyr.desc,author");
        assert_eq!(escape_value("Canis, ^Felis"), "Canis,%20^Felis");
        assert_eq!(escape_value("a&b#c%d+e"), "a%26b%23c%25d%2Be");
        assert_eq!(escape_value("Zürich"), "Z%C3%BCrich");
        assert_eq!(escape_value("a/b;c"), "a%2Fb%3Bc");
    }
}

// vim: ts=4 sw=4 expandtab
