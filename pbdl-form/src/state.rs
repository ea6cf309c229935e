// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (C) 2025 Michael Büsch <m@bues.ch>

//! Form state and the raw values of all form fields.

use crate::record::{FormMode, MetaSub, OutputFormat, RecordType};
use serde::Deserialize;

/// Form sections that can be shown or hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Taxonomy,
    Time,
    Location,
    /// Stratigraphy and environment.
    Strata,
    Specimen,
    Metadata,
    Output,
}

/// Visibility of the form sections.
///
/// Only visible sections contribute to the query.
/// Hiding a section keeps its field values.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SectionVisibility {
    pub taxonomy: bool,
    pub time: bool,
    pub location: bool,
    pub strata: bool,
    pub specimen: bool,
    pub metadata: bool,
    pub output: bool,
}

impl Default for SectionVisibility {
    fn default() -> Self {
        Self {
            taxonomy: true,
            time: false,
            location: false,
            strata: false,
            specimen: false,
            metadata: false,
            output: false,
        }
    }
}

impl SectionVisibility {
    pub fn is_visible(&self, section: Section) -> bool {
        match section {
            Section::Taxonomy => self.taxonomy,
            Section::Time => self.time,
            Section::Location => self.location,
            Section::Strata => self.strata,
            Section::Specimen => self.specimen,
            Section::Metadata => self.metadata,
            Section::Output => self.output,
        }
    }

    pub fn set(&mut self, section: Section, visible: bool) {
        let flag = match section {
            Section::Taxonomy => &mut self.taxonomy,
            Section::Time => &mut self.time,
            Section::Location => &mut self.location,
            Section::Strata => &mut self.strata,
            Section::Specimen => &mut self.specimen,
            Section::Metadata => &mut self.metadata,
            Section::Output => &mut self.output,
        };
        *flag = visible;
    }
}

fn default_true() -> bool {
    true
}

fn default_ref_types() -> Vec<String> {
    vec!["auth".to_string(), "class".to_string()]
}

/// The non-field part of the form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormState {
    #[serde(default)]
    pub record_type: RecordType,
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default)]
    pub mode: FormMode,
    /// Include private records. Only honored for contributors.
    #[serde(default)]
    pub private: bool,
    /// The user is an authenticated contributor.
    #[serde(skip)]
    pub contributor: bool,
    /// Prepend `datainfo&rowcount` to the query.
    #[serde(default = "default_true")]
    pub output_metadata: bool,
    /// The user acknowledged downloading all records.
    #[serde(default)]
    pub all_records: bool,
    #[serde(skip)]
    pub sections: SectionVisibility,
    /// Reference types for reference record queries.
    #[serde(default = "default_ref_types")]
    pub ref_types: Vec<String>,
    /// Opinion type for opinion record queries.
    #[serde(default)]
    pub op_type: Option<String>,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            record_type: Default::default(),
            format: Default::default(),
            mode: Default::default(),
            private: false,
            contributor: false,
            output_metadata: true,
            all_records: false,
            sections: Default::default(),
            ref_types: default_ref_types(),
            op_type: None,
        }
    }
}

impl FormState {
    pub fn advanced(&self) -> bool {
        self.mode == FormMode::Advanced
    }

    pub fn is_visible(&self, section: Section) -> bool {
        self.sections.is_visible(section)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TaxonomyInput {
    pub base_name: String,
    /// Taxonomic resolution. Empty for none.
    pub reso: String,
    pub ident: String,
    pub pres: String,
    /// Diversity counting level. Empty for the default.
    pub div_count: String,
    pub rank: String,
    pub status: String,
    pub variants: bool,
    pub accepted_only: bool,
}

impl Default for TaxonomyInput {
    fn default() -> Self {
        Self {
            base_name: String::new(),
            reso: String::new(),
            ident: "latest".to_string(),
            pres: "all".to_string(),
            div_count: String::new(),
            rank: "--".to_string(),
            status: "all".to_string(),
            variants: false,
            accepted_only: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRule {
    #[default]
    Major,
    Contain,
    Overlap,
    Buffer,
}

impl TimeRule {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Major => "major",
            Self::Contain => "contain",
            Self::Overlap => "overlap",
            Self::Buffer => "buffer",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimeInput {
    /// Maximum age or interval.
    pub early: String,
    /// Minimum age or interval.
    pub late: String,
    pub rule: TimeRule,
    pub buffer: String,
    /// Diversity time resolution.
    pub div_reso: String,
    /// Diversity: extend ranges to the recent.
    pub div_recent: bool,
}

impl Default for TimeInput {
    fn default() -> Self {
        Self {
            early: String::new(),
            late: String::new(),
            rule: TimeRule::Major,
            buffer: String::new(),
            div_reso: "stage".to_string(),
            div_recent: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlateModel {
    #[default]
    Default,
    GPlates,
    Scotese,
}

impl PlateModel {
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Default => "",
            Self::GPlates => "G",
            Self::Scotese => "S",
        }
    }
}

/// Continent select: none.
pub const SELECT_NONE: &str = "--";
/// Continent and country select: multiple.
pub const SELECT_MULTI: &str = "**";
/// Continent select: multiple, alternative spelling.
pub const SELECT_MULTI_ALT: &str = "^^";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LocationInput {
    pub continent: String,
    /// Check-list used if `continent` selects multiple.
    pub continents: Vec<String>,
    pub country: String,
    /// Free text used if `country` selects multiple.
    pub countries: String,
    pub exclude: bool,
    /// Subtract the countries from the continents.
    pub subtract: bool,
    pub plates: String,
    pub plate_model: PlateModel,
    pub latmin: String,
    pub latmax: String,
    pub lngmin: String,
    pub lngmax: String,
}

impl Default for LocationInput {
    fn default() -> Self {
        Self {
            continent: SELECT_NONE.to_string(),
            continents: vec![],
            country: SELECT_NONE.to_string(),
            countries: String::new(),
            exclude: false,
            subtract: false,
            plates: String::new(),
            plate_model: PlateModel::Default,
            latmin: String::new(),
            latmax: String::new(),
            lngmin: String::new(),
            lngmax: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StrataInput {
    pub strat: String,
    pub env_types: Vec<String>,
    pub env_zones: Vec<String>,
    pub exclude: bool,
    pub subtract: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdKind {
    #[default]
    Occ,
    Coll,
    Spec,
}

impl IdKind {
    pub fn param(self) -> &'static str {
        match self {
            Self::Occ => "occ_id",
            Self::Coll => "coll_id",
            Self::Spec => "spec_id",
        }
    }

    /// Prefix of extended identifiers, as in `col:1234`.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Occ => "occ",
            Self::Coll => "col",
            Self::Spec => "spm",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpecimenInput {
    pub kind: IdKind,
    pub ids: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateKind {
    #[default]
    CreatedAfter,
    CreatedBefore,
    ModifiedAfter,
    ModifiedBefore,
}

impl DateKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CreatedAfter => "created_after",
            Self::CreatedBefore => "created_before",
            Self::ModifiedAfter => "modified_after",
            Self::ModifiedBefore => "modified_before",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonKind {
    #[default]
    AuthentBy,
    AuthorizedBy,
    EnteredBy,
    ModifiedBy,
    TouchedBy,
}

impl PersonKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AuthentBy => "authent_by",
            Self::AuthorizedBy => "authorized_by",
            Self::EnteredBy => "entered_by",
            Self::ModifiedBy => "modified_by",
            Self::TouchedBy => "touched_by",
        }
    }
}

/// Filter on the creation data of one kind of record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MetaSubInput {
    pub date_kind: DateKind,
    pub date: String,
    pub person_kind: PersonKind,
    pub names: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MetadataInput {
    /// Collection name pattern.
    pub coll_re: String,
    pub occs: MetaSubInput,
    pub colls: MetaSubInput,
    pub taxa: MetaSubInput,
    pub ops: MetaSubInput,
    pub refs: MetaSubInput,
}

impl MetadataInput {
    pub fn sub(&self, sub: MetaSub) -> &MetaSubInput {
        match sub {
            MetaSub::Occs => &self.occs,
            MetaSub::Colls => &self.colls,
            MetaSub::Taxa => &self.taxa,
            MetaSub::Ops => &self.ops,
            MetaSub::Refs => &self.refs,
        }
    }

    pub fn sub_mut(&mut self, sub: MetaSub) -> &mut MetaSubInput {
        match sub {
            MetaSub::Occs => &mut self.occs,
            MetaSub::Colls => &mut self.colls,
            MetaSub::Taxa => &mut self.taxa,
            MetaSub::Ops => &mut self.ops,
            MetaSub::Refs => &mut self.refs,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDir {
    Asc,
    Desc,
}

impl SortDir {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputInput {
    pub blocks: Vec<String>,
    /// Sort key. `--` for the default order.
    pub order: String,
    pub direction: Option<SortDir>,
    /// `N` or `OFFSET, N`.
    pub limit: String,
}

impl Default for OutputInput {
    fn default() -> Self {
        Self {
            blocks: vec![],
            order: SELECT_NONE.to_string(),
            direction: None,
            limit: String::new(),
        }
    }
}

/// Raw values of all form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormInputs {
    pub taxonomy: TaxonomyInput,
    pub time: TimeInput,
    pub location: LocationInput,
    pub strata: StrataInput,
    pub specimen: SpecimenInput,
    pub metadata: MetadataInput,
    pub output: OutputInput,
}


// vim: ts=4 sw=4 expandtab
