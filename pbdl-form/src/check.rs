// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (C) 2025 Michael Büsch <m@bues.ch>

/// A validated field group.
///
/// `errors` block URL generation while the group takes part in the query.
/// `notes` are informational only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Checked<T> {
    pub raw: String,
    pub value: T,
    pub errors: Vec<String>,
    pub notes: Vec<String>,
}

impl<T> Checked<T> {
    pub fn new(raw: impl Into<String>, value: T) -> Self {
        Self {
            raw: raw.into(),
            value,
            errors: vec![],
            notes: vec![],
        }
    }

    pub fn error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    pub fn note(&mut self, msg: impl Into<String>) {
        self.notes.push(msg.into());
    }

    pub fn is_blocking(&self) -> bool {
        !self.errors.is_empty()
    }
}


// vim: ts=4 sw=4 expandtab
