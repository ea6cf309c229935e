// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (C) 2025 Michael Büsch <m@bues.ch>

//! Field validators.
//!
//! Every validator turns the raw values of one field group into a
//! `Checked` record. Validators never fail. Problems are reported
//! as messages in the record.

pub mod coords;
pub mod geography;
pub mod meta;
pub mod options;
pub mod output;
pub mod specimen;
pub mod strata;
pub mod taxon;
pub mod time;

use crate::{
    cache::LookupCache,
    check::Checked,
    names::NameTable,
    record::MetaSub,
    refdata::ReferenceData,
    state::{FormInputs, FormState},
};

pub use self::{
    coords::CoordParams, geography::LocationParams, meta::MetaSubParams, options::RecordParams,
    output::OutputParams, specimen::SpecimenParams, taxon::TaxonParams, time::TimeParams,
};

/// Result of a name existence check against the data service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Valid,
    /// The service rejected the name. Contains the message to show.
    Invalid(String),
    /// The check could not be performed. Contains the reason.
    Failed(String),
}

/// Validated values of all field groups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatedParams {
    pub taxon: Checked<TaxonParams>,
    pub time: Checked<TimeParams>,
    pub location: Checked<LocationParams>,
    pub coords: Checked<CoordParams>,
    pub stratum: Checked<String>,
    pub environment: Checked<String>,
    pub specimen: Checked<SpecimenParams>,
    pub coll_re: Checked<String>,
    pub meta: [Checked<MetaSubParams>; 5],
    pub output: Checked<OutputParams>,
    pub records: Checked<RecordParams>,
}

impl ValidatedParams {
    pub fn meta(&self, sub: MetaSub) -> &Checked<MetaSubParams> {
        &self.meta[sub.index()]
    }
}

/// Everything the validators look values up in.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'a> {
    pub refdata: &'a ReferenceData,
    pub names: &'a NameTable,
    pub taxa: &'a LookupCache<LookupOutcome>,
    pub strata: &'a LookupCache<LookupOutcome>,
}

impl Validator<'_> {
    pub fn taxon(&self, inputs: &FormInputs) -> Checked<TaxonParams> {
        let key = taxon::normalize_taxon_name(&inputs.taxonomy.base_name);
        taxon::check_taxon(&inputs.taxonomy, self.taxa.get(&key))
    }

    pub fn time(&self, state: &FormState, inputs: &FormInputs) -> Checked<TimeParams> {
        time::check_time(&inputs.time, self.refdata, state.advanced())
    }

    pub fn location(&self, inputs: &FormInputs) -> Checked<LocationParams> {
        geography::check_location(&inputs.location, self.refdata)
    }

    pub fn coords(&self, inputs: &FormInputs) -> Checked<CoordParams> {
        coords::check_coords(&inputs.location)
    }

    pub fn stratum(&self, inputs: &FormInputs) -> Checked<String> {
        let lookup = strata::stratum_key(&inputs.strata.strat).and_then(|k| self.strata.get(&k));
        strata::check_stratum(&inputs.strata.strat, lookup)
    }

    pub fn environment(&self, inputs: &FormInputs) -> Checked<String> {
        strata::check_environment(&inputs.strata)
    }

    pub fn specimen(&self, inputs: &FormInputs) -> Checked<SpecimenParams> {
        specimen::check_specimen(&inputs.specimen)
    }

    pub fn coll_re(&self, inputs: &FormInputs) -> Checked<String> {
        meta::check_coll_re(&inputs.metadata.coll_re)
    }

    pub fn meta(&self, inputs: &FormInputs) -> [Checked<MetaSubParams>; 5] {
        MetaSub::ALL.map(|sub| meta::check_meta_sub(inputs.metadata.sub(sub), self.names))
    }

    pub fn output(&self, state: &FormState, inputs: &FormInputs) -> Checked<OutputParams> {
        output::check_output(&inputs.output, state.record_type)
    }

    pub fn records(&self, state: &FormState) -> Checked<RecordParams> {
        options::check_records(state)
    }

    /// Validate every field group.
    pub fn validate_all(&self, state: &FormState, inputs: &FormInputs) -> ValidatedParams {
        ValidatedParams {
            taxon: self.taxon(inputs),
            time: self.time(state, inputs),
            location: self.location(inputs),
            coords: self.coords(inputs),
            stratum: self.stratum(inputs),
            environment: self.environment(inputs),
            specimen: self.specimen(inputs),
            coll_re: self.coll_re(inputs),
            meta: self.meta(inputs),
            output: self.output(state, inputs),
            records: self.records(state),
        }
    }
}

// vim: ts=4 sw=4 expandtab
