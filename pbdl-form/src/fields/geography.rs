// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (C) 2025 Michael Büsch <m@bues.ch>

use crate::{
    check::Checked,
    refdata::ReferenceData,
    state::{LocationInput, SELECT_MULTI, SELECT_MULTI_ALT, SELECT_NONE},
};
use pbdl_util::split_list;

/// Normalized country/continent and plate selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationParams {
    pub cc: String,
    pub plate: String,
}

fn is_unselected(value: &str) -> bool {
    value.is_empty() || value == SELECT_NONE
}

fn continent_list(input: &LocationInput, refdata: &ReferenceData, errors: &mut Vec<String>) -> String {
    let select = input.continent.trim();
    let codes: Vec<&str> = if is_unselected(select) {
        vec![]
    } else if select == SELECT_MULTI || select == SELECT_MULTI_ALT {
        input.continents.iter().map(|c| c.trim()).filter(|c| !c.is_empty()).collect()
    } else {
        vec![select]
    };
    let mut list = Vec::with_capacity(codes.len());
    for code in codes {
        if refdata.is_continent(code) {
            list.push(code);
        } else {
            errors.push(format!("Unknown continent code '{code}'"));
        }
    }
    list.join(",")
}

fn country_list(input: &LocationInput, refdata: &ReferenceData, errors: &mut Vec<String>) -> String {
    let select = input.country.trim();
    if is_unselected(select) {
        return String::new();
    }
    if select != SELECT_MULTI {
        if !refdata.is_country(select) {
            errors.push(format!("Unknown country code '{select}'"));
            return String::new();
        }
        return if input.subtract {
            format!("^{select}")
        } else {
            select.to_string()
        };
    }

    let mut list = Vec::new();
    for token in split_list(&input.countries) {
        let canonical = token.to_uppercase();
        let key = canonical.strip_prefix('^').unwrap_or(&canonical);
        if key.is_empty() {
            continue;
        }
        if refdata.is_country(key) || refdata.is_continent(key) {
            if input.subtract {
                list.push(format!("^{key}"));
            } else {
                list.push(canonical.clone());
            }
        } else {
            errors.push(format!("Unknown country code '{key}'"));
        }
    }
    list.join(",")
}

fn plate_list(input: &LocationInput, errors: &mut Vec<String>) -> String {
    let plates = input.plates.trim();
    let (exclude, plates) = match plates.strip_prefix('^') {
        Some(rest) => ("^", rest),
        None => ("", plates),
    };
    let mut list = Vec::new();
    for value in split_list(plates) {
        if value.bytes().all(|c| c.is_ascii_digit()) {
            list.push(value);
        } else {
            errors.push(format!("Invalid plate number '{value}'"));
        }
    }
    if list.is_empty() {
        String::new()
    } else {
        format!("{exclude}{}{}", input.plate_model.prefix(), list.join(","))
    }
}

/// Validate the continent, country and plate selection.
///
/// The `cc` value is the continents followed by the countries,
/// separated by a comma if both are present, and prefixed
/// with `!` if the selection is excluded.
pub fn check_location(input: &LocationInput, refdata: &ReferenceData) -> Checked<LocationParams> {
    let mut errors = Vec::new();
    let continents = continent_list(input, refdata, &mut errors);
    let countries = country_list(input, refdata, &mut errors);
    let plate = plate_list(input, &mut errors);

    let cc = if continents.is_empty() && countries.is_empty() {
        String::new()
    } else {
        let prefix = if input.exclude { "!" } else { "" };
        let sep = if !continents.is_empty() && !countries.is_empty() {
            ","
        } else {
            ""
        };
        format!("{prefix}{continents}{sep}{countries}")
    };

    let mut ret = Checked::new(&input.countries, LocationParams { cc, plate });
    ret.errors = errors;
    ret
}


// vim: ts=4 sw=4 expandtab
