// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (C) 2025 Michael Büsch <m@bues.ch>

use anyhow::{self as ah, Context as _};
use pbdl_form::{
    FormInputs, FormState, LocationInput, MetadataInput, OutputInput, SectionVisibility,
    SpecimenInput, StrataInput, TaxonomyInput, TimeInput,
};
use serde::Deserialize;
use std::path::Path;

/// A form described in a TOML file.
///
/// ```toml
/// [form]
/// record_type = "occs"
/// format = "csv"
///
/// [sections]
/// time = true
///
/// [taxonomy]
/// base_name = "Canis"
///
/// [time]
/// early = "Pleistocene"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormFile {
    form: FormState,
    sections: SectionVisibility,
    taxonomy: TaxonomyInput,
    time: TimeInput,
    location: LocationInput,
    strata: StrataInput,
    specimen: SpecimenInput,
    metadata: MetadataInput,
    output: OutputInput,
}

impl FormFile {
    pub fn new_parse_file(path: &Path) -> ah::Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("Read form file {}", path.display()))?;
        Self::new_parse_str(&data)
    }

    pub fn new_parse_str(data: &str) -> ah::Result<Self> {
        toml::from_str(data).context("Parse form file")
    }

    pub fn into_parts(self) -> (FormState, FormInputs) {
        let mut state = self.form;
        state.sections = self.sections;
        let inputs = FormInputs {
            taxonomy: self.taxonomy,
            time: self.time,
            location: self.location,
            strata: self.strata,
            specimen: self.specimen,
            metadata: self.metadata,
            output: self.output,
        };
        (state, inputs)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pbdl_form::{OutputFormat, RecordType, Section, TimeRule};

    #[test]
    fn test_parse() {
        let (state, inputs) = FormFile::new_parse_str(
            r#"
            [form]
            record_type = "taxa"
            format = "json"
            mode = "advanced"
            ref_types = [ "auth", "ops" ]

            [sections]
            time = true
            location = true

            [taxonomy]
            base_name = "Canis"

            [time]
            early = "Pleistocene"
            rule = "overlap"

            [location]
            country = "**"
            countries = "US CA"
            "#,
        )
        .unwrap()
        .into_parts();

        assert_eq!(state.record_type, RecordType::Taxa);
        assert_eq!(state.format, OutputFormat::Json);
        assert!(state.advanced());
        assert_eq!(state.ref_types, ["auth", "ops"]);
        assert!(state.is_visible(Section::Taxonomy));
        assert!(state.is_visible(Section::Time));
        assert!(!state.is_visible(Section::Output));
        assert_eq!(inputs.taxonomy.base_name, "Canis");
        assert_eq!(inputs.time.rule, TimeRule::Overlap);
        assert_eq!(inputs.location.countries, "US CA");
    }

    #[test]
    fn test_defaults() {
        let (state, inputs) = FormFile::new_parse_str("").unwrap().into_parts();
        assert_eq!(state, FormState::default());
        assert_eq!(inputs, FormInputs::default());
    }

    #[test]
    fn test_unknown_section() {
        assert!(FormFile::new_parse_str("[bogus]\nx = 1").is_err());
    }

    #[test]
    fn test_unknown_key() {
        assert!(FormFile::new_parse_str("[form]\nrecord_typ = \"taxa\"").is_err());
        assert!(FormFile::new_parse_str("[form]\ncontributor = true").is_err());
        assert!(FormFile::new_parse_str("[sections]\ntaxa = true").is_err());
        assert!(FormFile::new_parse_str("[taxonomy]\nbasename = \"Canis\"").is_err());
        assert!(FormFile::new_parse_str("[metadata.occs]\ndate = \"2020\"").is_err());
        assert!(FormFile::new_parse_str("[output]\nlimits = \"10\"").is_err());
        assert!(FormFile::new_parse_str("[form]\nrecord_type = \"taxa\"").is_ok());
    }
}

// vim: ts=4 sw=4 expandtab
