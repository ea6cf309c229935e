// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (C) 2025 Michael Büsch <m@bues.ch>

#![forbid(unsafe_code)]

mod cache;
mod check;
mod compile;
mod names;
mod record;
mod refdata;
mod session;
mod state;

pub mod fields;

pub use crate::{
    cache::LookupCache,
    check::Checked,
    compile::{
        ALL_RECORDS, CompiledQuery, Field, Message, PLACEHOLDER_ERRORS, PLACEHOLDER_NO_PARAM,
        UrlOutput, compile,
    },
    fields::{LookupOutcome, ValidatedParams, Validator, time::IntervalSide},
    names::{NameMatch, NameTable},
    record::{FormMode, MetaSub, Operation, OutputFormat, RecordDesc, RecordType, TaxonFilter},
    refdata::{ApiId, ApiResponse, ConfigRecord, IntervalRecord, ReferenceData},
    session::{DEFAULT_CACHE_CAPACITY, Edit, FormSession, LookupKind, LookupRequest, Update},
    state::{
        DateKind, FormInputs, FormState, IdKind, LocationInput, MetaSubInput, MetadataInput,
        OutputInput, PersonKind, PlateModel, Section, SectionVisibility, SortDir, SpecimenInput,
        StrataInput, TaxonomyInput, TimeInput, TimeRule,
    },
};

// vim: ts=4 sw=4 expandtab
