// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (C) 2025 Michael Büsch <m@bues.ch>

use crate::{
    check::Checked,
    state::{IdKind, SpecimenInput},
};
use pbdl_util::{split_delim, split_list};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecimenParams {
    pub kind: IdKind,
    pub ids: Vec<String>,
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|c| c.is_ascii_digit())
}

fn valid_id(id: &str, kind: IdKind) -> bool {
    match split_delim(id, b':') {
        Some((prefix, num)) => prefix.eq_ignore_ascii_case(kind.prefix()) && is_digits(num),
        None => is_digits(id),
    }
}

/// Validate a list of record identifiers of one kind.
pub fn check_specimen(input: &SpecimenInput) -> Checked<SpecimenParams> {
    let mut ret = Checked::new(
        &input.ids,
        SpecimenParams {
            kind: input.kind,
            ids: vec![],
        },
    );
    for id in split_list(&input.ids) {
        if valid_id(id, input.kind) {
            ret.value.ids.push(id.to_string());
        } else {
            ret.error(format!("Invalid identifier '{id}'"));
        }
    }
    ret
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_ids() {
        let mut i = SpecimenInput {
            kind: IdKind::Coll,
            ids: "12, col:34 COL:5".to_string(),
        };
        let c = check_specimen(&i);
        assert!(!c.is_blocking());
        assert_eq!(c.value.ids, ["12", "col:34", "COL:5"]);

        i.ids = "occ:1 x7 col:".to_string();
        let c = check_specimen(&i);
        assert_eq!(
            c.errors,
            ["Invalid identifier 'occ:1'", "Invalid identifier 'x7'", "Invalid identifier 'col:'"]
        );

        i.kind = IdKind::Spec;
        i.ids = "spm:99".to_string();
        assert_eq!(check_specimen(&i).value.ids, ["spm:99"]);

        i.ids = "  ".to_string();
        let c = check_specimen(&i);
        assert!(c.value.ids.is_empty());
        assert!(!c.is_blocking());
    }
}

// vim: ts=4 sw=4 expandtab
