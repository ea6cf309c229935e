// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (C) 2025 Michael Büsch <m@bues.ch>

//! The parameter compiler.
//!
//! `compile` turns the form state and the validated field values
//! into the download URL. It is pure: the same input always gives
//! the same output.

use crate::{
    check::Checked,
    fields::ValidatedParams,
    record::{MetaSub, Operation, OutputFormat, RecordType, TaxonFilter},
    state::{FormState, SELECT_NONE, Section, TimeRule},
};
use pbdl_util::Query;
use std::fmt::{Display, Formatter};

pub const PLACEHOLDER_ERRORS: &str = "Fix the parameter errors below to generate a download URL";
pub const PLACEHOLDER_NO_PARAM: &str =
    "Enter one or more parameters below to generate a download URL";

/// Marker parameter that selects all records.
pub const ALL_RECORDS: &str = "all_records";

/// Field group a message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Taxon,
    Time,
    Location,
    Coords,
    Stratum,
    Environment,
    Specimen,
    CollRe,
    Meta(MetaSub),
    Output,
    Records,
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Taxon => write!(f, "taxon"),
            Self::Time => write!(f, "time"),
            Self::Location => write!(f, "location"),
            Self::Coords => write!(f, "coordinates"),
            Self::Stratum => write!(f, "stratum"),
            Self::Environment => write!(f, "environment"),
            Self::Specimen => write!(f, "identifiers"),
            Self::CollRe => write!(f, "collection"),
            Self::Meta(sub) => write!(f, "metadata ({})", sub.prefix()),
            Self::Output => write!(f, "output"),
            Self::Records => write!(f, "record type"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub field: Field,
    pub text: String,
}

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.text)
    }
}

/// The observable result of a compile run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlOutput {
    Url(String),
    /// No significant filter and no acknowledgement to download everything.
    NeedsParameter,
    HasErrors,
}

impl UrlOutput {
    /// The URL or the placeholder message.
    pub fn text(&self) -> &str {
        match self {
            Self::Url(url) => url,
            Self::NeedsParameter => PLACEHOLDER_NO_PARAM,
            Self::HasErrors => PLACEHOLDER_ERRORS,
        }
    }
}

impl Display for UrlOutput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledQuery {
    pub operation: Operation,
    pub format: OutputFormat,
    pub params: Query,
    pub has_primary_selector: bool,
    /// The query selects all records and is not limited.
    pub requires_confirmation: bool,
    pub is_valid: bool,
    pub output: UrlOutput,
    pub errors: Vec<Message>,
    pub notes: Vec<Message>,
    /// Metadata subsections that apply to the operation. The first one is primary.
    pub meta_subsections: &'static [MetaSub],
}

impl CompiledQuery {
    pub fn url(&self) -> Option<&str> {
        match &self.output {
            UrlOutput::Url(url) => Some(url),
            _ => None,
        }
    }

    /// URL for a quick look at the result in a browser.
    ///
    /// CSV is requested as plain text, other formats get `textresult`.
    /// Unlimited queries are limited to 100 records.
    pub fn test_url(&self) -> Option<String> {
        let url = self.url()?;
        let mut url = if self.format == OutputFormat::Csv {
            let path = format!("{}.csv?", self.operation.path());
            url.replacen(&path, &format!("{}.txt?", self.operation.path()), 1)
        } else {
            format!("{url}&textresult")
        };
        if !self.params.contains("limit") && self.operation != Operation::OccsDiversity {
            url.push_str("&limit=100");
        }
        Some(url)
    }
}

/// What one form section adds to the query.
#[derive(Debug, Default)]
struct Contribution {
    params: Query,
    has_main: bool,
    occs_required: bool,
    taxon_required: bool,
    all_required: bool,
    errors: Vec<Message>,
    notes: Vec<Message>,
}

impl Contribution {
    fn messages<T>(&mut self, field: Field, checked: &Checked<T>) {
        for text in &checked.errors {
            self.errors.push(Message {
                field,
                text: text.clone(),
            });
        }
        for text in &checked.notes {
            self.notes.push(Message {
                field,
                text: text.clone(),
            });
        }
    }

    fn main(&mut self, name: &str, value: impl Into<String>) {
        self.params.push(name, value);
        self.has_main = true;
        self.occs_required = true;
    }

    fn merge(&mut self, other: Contribution) {
        self.params.append(other.params);
        self.has_main |= other.has_main;
        self.occs_required |= other.occs_required;
        self.taxon_required |= other.taxon_required;
        self.all_required |= other.all_required;
        self.errors.extend(other.errors);
        self.notes.extend(other.notes);
    }
}

fn taxonomy(state: &FormState, p: &ValidatedParams) -> Contribution {
    let mut c = Contribution::default();
    let t = &p.taxon.value;
    let advanced = state.advanced();

    if !t.base_name.is_empty() {
        c.params.push("base_name", &t.base_name);
        c.has_main = true;
        c.taxon_required = true;
    }
    c.messages(Field::Taxon, &p.taxon);

    match state.record_type.desc().taxon_filter {
        TaxonFilter::Resolution => {
            if !t.reso.is_empty() {
                c.params.push("taxon_reso", &t.reso);
            }
            if advanced && !t.ident.is_empty() && t.ident != "latest" {
                c.params.push("ident", &t.ident);
            }
        }
        TaxonFilter::DivCount => {
            if !t.div_count.is_empty() {
                c.params.push("count", &t.div_count);
            }
        }
        TaxonFilter::Range => {
            if !t.rank.is_empty() && t.rank != SELECT_NONE {
                c.params.push("rank", &t.rank);
            }
            if !t.status.is_empty() {
                c.params.push("taxon_status", &t.status);
            }
            if advanced && t.variants {
                c.params.push("variant", "all");
            }
        }
        TaxonFilter::NameOnly => (),
    }

    if advanced && !t.pres.is_empty() && t.pres != "all" {
        c.params.push("pres", &t.pres);
    }
    c
}

fn time(state: &FormState, p: &ValidatedParams) -> Contribution {
    let mut c = Contribution::default();
    let t = &p.time.value;
    let mut has_time = false;

    if !t.intervals.is_empty() {
        c.main("interval", t.intervals.join(","));
        has_time = true;
    } else {
        if let Some(max_ma) = &t.max_ma {
            c.main("max_ma", max_ma);
            has_time = true;
        }
        if let Some(min_ma) = &t.min_ma {
            c.main("min_ma", min_ma);
            has_time = true;
        }
    }
    c.messages(Field::Time, &p.time);

    if state.record_type == RecordType::Diversity {
        has_time = true;
        if let Some(reso) = &t.div_reso {
            c.params.push("time_reso", reso);
        }
        if t.div_recent {
            c.params.push_flag("recent");
        }
    }

    if state.advanced() && t.rule != TimeRule::Major && has_time {
        c.params.push("time_rule", t.rule.as_str());
        if t.rule == TimeRule::Buffer
            && let Some(buffer) = &t.buffer
        {
            c.params.push("time_buffer", buffer);
        }
    }
    c
}

fn location(p: &ValidatedParams) -> Contribution {
    let mut c = Contribution::default();
    let loc = &p.location.value;
    if !loc.cc.is_empty() {
        c.main("cc", &loc.cc);
    }
    if !loc.plate.is_empty() {
        c.main("plate", &loc.plate);
    }
    c.messages(Field::Location, &p.location);

    let coords = &p.coords.value;
    if !coords.is_empty() {
        for (name, value) in [
            ("lngmin", &coords.lngmin),
            ("lngmax", &coords.lngmax),
            ("latmin", &coords.latmin),
            ("latmax", &coords.latmax),
        ] {
            if !value.is_empty() {
                c.params.push(name, value);
            }
        }
        c.has_main = true;
        c.occs_required = true;
    }
    c.messages(Field::Coords, &p.coords);
    c
}

fn strata(p: &ValidatedParams) -> Contribution {
    let mut c = Contribution::default();
    if !p.stratum.value.is_empty() {
        c.main("strat", &p.stratum.value);
    }
    c.messages(Field::Stratum, &p.stratum);

    if !p.environment.value.is_empty() {
        c.params.push("envtype", &p.environment.value);
        c.occs_required = true;
    }
    c.messages(Field::Environment, &p.environment);
    c
}

fn specimen(p: &ValidatedParams) -> Contribution {
    let mut c = Contribution::default();
    let s = &p.specimen.value;
    if !s.ids.is_empty() {
        c.main(s.kind.param(), s.ids.join(","));
    }
    c.messages(Field::Specimen, &p.specimen);
    c
}

/// The collection filter and the metadata subsections of `subs`.
fn metadata(p: &ValidatedParams, subs: &[MetaSub]) -> Contribution {
    let mut c = Contribution::default();
    if !p.coll_re.value.is_empty() {
        c.main("coll_re", &p.coll_re.value);
    }
    c.messages(Field::CollRe, &p.coll_re);

    for &sub in subs {
        let checked = p.meta(sub);
        let m = &checked.value;
        let prefix = sub.prefix();
        let mut used = false;
        if let Some((kind, date)) = &m.date {
            c.params.push(&format!("{prefix}_{}", kind.as_str()), date);
            used = true;
        }
        if let Some((kind, names)) = &m.person {
            c.params.push(&format!("{prefix}_{}", kind.as_str()), names);
            used = true;
        }
        if used {
            c.all_required = true;
            if sub == MetaSub::Occs {
                c.occs_required = true;
            }
        }
        c.messages(Field::Meta(sub), checked);
    }
    c
}

fn record_options(p: &ValidatedParams) -> Contribution {
    let mut c = Contribution::default();
    let r = &p.records.value;
    if let Some(select) = &r.select {
        c.params.push("select", select);
    }
    if let Some(op_type) = &r.op_type {
        c.params.push("op_type", op_type);
    }
    if r.private {
        c.params.push_flag("private");
    }
    c.messages(Field::Records, &p.records);
    c
}

/// The `show` block list.
fn output_blocks(state: &FormState, p: &ValidatedParams, occs_required: bool) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut push = |code: &str| {
        if !blocks.iter().any(|b| b == code) {
            blocks.push(code.to_string());
        }
    };
    for code in &p.output.value.blocks {
        if code == "occapp" && !occs_required {
            push("app");
        } else {
            push(code.as_str());
        }
    }
    if state.is_visible(Section::Taxonomy)
        && state.record_type.accepted_only_block()
        && p.taxon.value.accepted_only
    {
        push("acconly");
    }
    blocks
}

fn output_options(state: &FormState, p: &ValidatedParams, occs_required: bool) -> Contribution {
    let mut c = Contribution::default();
    let o = &p.output.value;

    let blocks = output_blocks(state, p, occs_required);
    if !blocks.is_empty() {
        c.params.push("show", blocks.join(","));
    }
    if let Some(order) = &o.order {
        c.params.push("order", order);
    }
    if let Some(offset) = &o.offset {
        c.params.push("offset", offset);
    }
    if let Some(limit) = &o.limit {
        c.params.push("limit", limit);
    }
    c
}

/// Compile the download URL.
///
/// `base_url` must end in `/`.
pub fn compile(base_url: &str, state: &FormState, params: &ValidatedParams) -> CompiledQuery {
    let desc = state.record_type.desc();
    let mut acc = Contribution::default();

    if state.is_visible(Section::Taxonomy) {
        acc.merge(taxonomy(state, params));
    }
    if state.is_visible(Section::Time) {
        acc.merge(time(state, params));
    }
    if state.is_visible(Section::Location) {
        acc.merge(location(params));
    }
    if state.is_visible(Section::Strata) {
        acc.merge(strata(params));
    }
    if state.is_visible(Section::Specimen) {
        acc.merge(specimen(params));
    }

    // The applicable metadata subsections follow the operation.
    // Occurrence metadata only applies to operations that are already
    // occurrence scoped, so it cannot change the operation.
    let show_meta = state.is_visible(Section::Metadata);
    let provisional = desc.operation.rewrite(
        acc.occs_required || (show_meta && !params.coll_re.value.is_empty()),
        acc.taxon_required,
    );
    let meta_subsections = provisional.meta_subsections();
    if show_meta {
        acc.merge(metadata(params, meta_subsections));
    }

    acc.merge(record_options(params));

    let operation = desc.operation.rewrite(acc.occs_required, acc.taxon_required);
    debug_assert_eq!(operation.meta_subsections(), meta_subsections);

    let mut requires_confirmation = false;
    if !acc.has_main && acc.all_required {
        acc.params.push_flag(ALL_RECORDS);
        acc.has_main = true;
    } else if !acc.has_main && state.all_records {
        acc.params.push_flag(ALL_RECORDS);
        acc.has_main = true;
        requires_confirmation = true;
    }

    if state.is_visible(Section::Output) {
        acc.messages(Field::Output, &params.output);
    }

    let output = if !acc.errors.is_empty() {
        UrlOutput::HasErrors
    } else if !acc.has_main {
        UrlOutput::NeedsParameter
    } else {
        if state.is_visible(Section::Output) {
            let out = output_options(state, params, acc.occs_required);
            if out.params.contains("limit") {
                requires_confirmation = false;
            }
            acc.params.append(out.params);
        } else if state.is_visible(Section::Taxonomy)
            && state.record_type.accepted_only_block()
            && params.taxon.value.accepted_only
        {
            acc.params.push("show", "acconly");
        }

        let datainfo = if state.output_metadata {
            "datainfo&rowcount&"
        } else {
            ""
        };
        UrlOutput::Url(format!(
            "{base_url}{}.{}?{datainfo}{}",
            operation.path(),
            state.format.extension(),
            acc.params
        ))
    };

    let ret = CompiledQuery {
        operation,
        format: state.format,
        params: acc.params,
        has_primary_selector: acc.has_main,
        requires_confirmation: requires_confirmation && matches!(output, UrlOutput::Url(_)),
        is_valid: acc.errors.is_empty(),
        output,
        errors: acc.errors,
        notes: acc.notes,
        meta_subsections,
    };
    log::trace!("Compiled: {}", ret.output);
    ret
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        cache::LookupCache,
        fields::{LookupOutcome, Validator},
        names::NameTable,
        record::FormMode,
        refdata::ReferenceData,
        state::{FormInputs, SortDir},
    };

    const BASE: &str = "https://paleobiodb.org/data1.2/";

    fn refdata() -> ReferenceData {
        let mut rd = ReferenceData::new();
        rd.add_interval("Pleistocene", "int:12");
        rd.add_interval("Cretaceous", "int:15");
        rd.add_continent("NOA", "North America");
        rd.add_country("US", "United States");
        rd.add_country("CA", "Canada");
        rd
    }

    fn run(state: &FormState, inputs: &FormInputs) -> CompiledQuery {
        let rd = refdata();
        let names = NameTable::new(&["Smith, John", "Smith, Kate", "Alroy, John"]);
        let mut taxa = LookupCache::new(16);
        taxa.insert("Canis", LookupOutcome::Valid);
        taxa.insert("Nonesuch", LookupOutcome::Invalid("The name 'Nonesuch' is unknown".to_string()));
        let strata = LookupCache::new(16);
        let v = Validator {
            refdata: &rd,
            names: &names,
            taxa: &taxa,
            strata: &strata,
        };
        let params = v.validate_all(state, inputs);
        compile(BASE, state, &params)
    }

    fn state(record_type: RecordType) -> FormState {
        let mut state = FormState {
            record_type,
            ..Default::default()
        };
        state.sections.taxonomy = true;
        state.sections.time = true;
        state.sections.location = true;
        state
    }

    #[test]
    fn test_scenario_a() {
        let state = state(RecordType::Occs);
        let mut inputs = FormInputs::default();
        inputs.taxonomy.base_name = "Canis".to_string();
        inputs.time.early = "Pleistocene".to_string();

        let q = run(&state, &inputs);
        assert_eq!(q.operation, Operation::OccsList);
        assert!(q.has_primary_selector);
        assert!(q.is_valid);
        assert!(!q.requires_confirmation);
        assert_eq!(q.params.get("base_name"), Some("Canis"));
        assert_eq!(q.params.get("interval"), Some("Pleistocene"));
        assert_eq!(
            q.url(),
            Some(
                "https://paleobiodb.org/data1.2/occs/list.csv?datainfo&rowcount&\
                base_name=Canis&interval=Pleistocene"
            )
        );
        assert_eq!(q.meta_subsections, [MetaSub::Occs]);
    }

    #[test]
    fn test_scenario_b() {
        let state = state(RecordType::Taxa);
        let mut inputs = FormInputs::default();
        inputs.location.country = "US".to_string();

        let q = run(&state, &inputs);
        assert_eq!(q.operation, Operation::OccsTaxa);
        assert!(!q.params.contains("base_name"));
        assert_eq!(q.params.get("cc"), Some("US"));
        assert_eq!(q.params.get("taxon_status"), Some("all"));
        assert!(q.url().is_some());
    }

    #[test]
    fn test_scenario_c() {
        let state = state(RecordType::Occs);
        let mut inputs = FormInputs::default();
        inputs.taxonomy.base_name = "Canis".to_string();
        inputs.location.lngmin = "10".to_string();

        let q = run(&state, &inputs);
        assert!(!q.is_valid);
        assert_eq!(q.output, UrlOutput::HasErrors);
        assert_eq!(q.output.text(), PLACEHOLDER_ERRORS);
        assert_eq!(
            q.errors,
            [Message {
                field: Field::Coords,
                text: "you must specify both longitude values if you specify one of them"
                    .to_string(),
            }]
        );
        assert_eq!(q.url(), None);
    }

    #[test]
    fn test_scenario_d() {
        let mut state = state(RecordType::Occs);
        let inputs = FormInputs::default();

        let q = run(&state, &inputs);
        assert_eq!(q.output, UrlOutput::NeedsParameter);
        assert!(!q.has_primary_selector);

        state.all_records = true;
        let q = run(&state, &inputs);
        assert!(q.params.contains(ALL_RECORDS));
        assert!(q.requires_confirmation);
        assert!(q.has_primary_selector);
        assert_eq!(
            q.url(),
            Some("https://paleobiodb.org/data1.2/occs/list.csv?datainfo&rowcount&all_records")
        );
    }

    #[test]
    fn test_scenario_e() {
        let mut state = state(RecordType::Occs);
        state.sections.metadata = true;
        let mut inputs = FormInputs::default();
        inputs.taxonomy.base_name = "Canis".to_string();
        inputs.metadata.occs.names = "Smith".to_string();

        let q = run(&state, &inputs);
        assert!(!q.is_valid);
        assert_eq!(q.output, UrlOutput::HasErrors);
        assert_eq!(
            q.errors[0].text,
            "Ambiguous name 'Smith' matches: J. Smith, K. Smith"
        );
        assert_eq!(q.errors[0].field, Field::Meta(MetaSub::Occs));
    }

    #[test]
    fn test_hidden_sections() {
        let mut state = state(RecordType::Occs);
        let mut inputs = FormInputs::default();
        inputs.taxonomy.base_name = "Canis".to_string();
        inputs.location.lngmin = "10".to_string();
        state.sections.location = false;

        let q = run(&state, &inputs);
        assert!(q.is_valid);
        assert!(!q.params.contains("lngmin"));

        // Showing the section again brings the values back.
        state.sections.location = true;
        assert!(!run(&state, &inputs).is_valid);
    }

    #[test]
    fn test_no_selector_never_url() {
        let mut state = state(RecordType::Taxa);
        state.sections.output = true;
        let mut inputs = FormInputs::default();
        inputs.output.limit = "10".to_string();
        inputs.taxonomy.rank = "genus".to_string();
        inputs.taxonomy.reso = "family".to_string();

        for record_type in [RecordType::Taxa, RecordType::Occs, RecordType::Refs] {
            state.record_type = record_type;
            let q = run(&state, &inputs);
            assert_eq!(q.output, UrlOutput::NeedsParameter, "{record_type:?}");
            assert_eq!(q.url(), None);
        }
    }

    #[test]
    fn test_errors_never_url() {
        let state = state(RecordType::Occs);
        let mut inputs = FormInputs::default();
        inputs.taxonomy.base_name = "Nonesuch".to_string();
        inputs.time.early = "66".to_string();

        let q = run(&state, &inputs);
        assert_eq!(q.output, UrlOutput::HasErrors);
        assert_eq!(q.errors[0].text, "The name 'Nonesuch' is unknown");
        assert!(!q.output.text().contains("Nonesuch"));
    }

    #[test]
    fn test_idempotent() {
        let mut state = state(RecordType::Ops);
        state.sections.output = true;
        state.sections.metadata = true;
        let mut inputs = FormInputs::default();
        inputs.taxonomy.base_name = "Canis".to_string();
        inputs.metadata.ops.date = "2020".to_string();
        inputs.output.order = "authpub".to_string();

        let a = run(&state, &inputs);
        let b = run(&state, &inputs);
        assert_eq!(a, b);
        assert_eq!(a.output.text(), b.output.text());
        assert_eq!(a.operation, Operation::TaxaOpinions);
        assert_eq!(a.meta_subsections, [MetaSub::Ops, MetaSub::Taxa]);
    }

    #[test]
    fn test_rewrite_opinions() {
        let mut state = state(RecordType::Ops);
        let mut inputs = FormInputs::default();
        inputs.taxonomy.base_name = "Canis".to_string();
        assert_eq!(run(&state, &inputs).operation, Operation::TaxaOpinions);

        inputs.time.late = "66".to_string();
        assert_eq!(run(&state, &inputs).operation, Operation::OccsOpinions);

        state.sections.time = false;
        inputs.taxonomy.base_name.clear();
        state.all_records = true;
        assert_eq!(run(&state, &inputs).operation, Operation::OpinionsList);
    }

    #[test]
    fn test_metadata_all_required() {
        let mut state = state(RecordType::Taxa);
        state.sections.metadata = true;
        let mut inputs = FormInputs::default();
        inputs.metadata.taxa.date = "30d".to_string();
        // Not applicable to taxa/list, so ignored.
        inputs.metadata.refs.date = "x".to_string();

        let q = run(&state, &inputs);
        assert!(q.is_valid);
        assert!(!q.requires_confirmation);
        assert_eq!(q.operation, Operation::TaxaList);
        assert_eq!(
            q.params.to_strings(),
            ["taxon_status=all", "taxa_created_after=30d", "all_records"]
        );
    }

    #[test]
    fn test_collection_metadata() {
        let mut state = state(RecordType::Colls);
        state.sections.metadata = true;
        let mut inputs = FormInputs::default();
        inputs.metadata.coll_re = "Hell Creek".to_string();
        inputs.metadata.colls.person_kind = crate::state::PersonKind::EnteredBy;
        inputs.metadata.colls.names = "alroy".to_string();

        let q = run(&state, &inputs);
        assert_eq!(q.meta_subsections, [MetaSub::Colls, MetaSub::Occs]);
        assert_eq!(q.params.get("coll_re"), Some("Hell Creek"));
        assert_eq!(q.params.get("colls_entered_by"), Some("J. Alroy"));
        assert!(!q.params.contains(ALL_RECORDS));
        assert_eq!(
            q.url(),
            Some(
                "https://paleobiodb.org/data1.2/colls/list.csv?datainfo&rowcount&\
                coll_re=Hell%20Creek&colls_entered_by=J.%20Alroy"
            )
        );
    }

    #[test]
    fn test_output_pass() {
        let mut state = state(RecordType::Taxa);
        state.sections.output = true;
        state.format = OutputFormat::Json;
        state.output_metadata = false;
        let mut inputs = FormInputs::default();
        inputs.taxonomy.base_name = "Canis".to_string();
        inputs.output.blocks = vec!["occapp".to_string(), "app".to_string(), "attr".to_string()];
        inputs.output.order = "pubauth".to_string();
        inputs.output.direction = Some(SortDir::Asc);
        inputs.output.limit = "5, 10".to_string();

        let q = run(&state, &inputs);
        assert_eq!(
            q.url(),
            Some(
                "https://paleobiodb.org/data1.2/taxa/list.json?base_name=Canis&taxon_status=all&\
                show=app,attr&order=pubyr.asc,author&offset=5&limit=10"
            )
        );

        // With occurrence filters, the selected range stays.
        inputs.time.early = "Cretaceous".to_string();
        let q = run(&state, &inputs);
        assert_eq!(q.operation, Operation::OccsTaxa);
        assert_eq!(q.params.get("show"), Some("occapp,app,attr"));
    }

    #[test]
    fn test_output_errors() {
        let mut state = state(RecordType::Occs);
        let mut inputs = FormInputs::default();
        inputs.taxonomy.base_name = "Canis".to_string();
        inputs.output.limit = "lots".to_string();

        // Hidden output options do not count.
        assert!(run(&state, &inputs).is_valid);

        state.sections.output = true;
        let q = run(&state, &inputs);
        assert_eq!(q.output, UrlOutput::HasErrors);
        assert_eq!(q.errors[0].field, Field::Output);
    }

    #[test]
    fn test_limit_clears_confirmation() {
        let mut state = state(RecordType::Occs);
        state.all_records = true;
        state.sections.output = true;
        let mut inputs = FormInputs::default();
        inputs.output.limit = "100".to_string();

        let q = run(&state, &inputs);
        assert!(q.params.contains(ALL_RECORDS));
        assert!(!q.requires_confirmation);
    }

    #[test]
    fn test_accepted_only() {
        let mut state = state(RecordType::Occs);
        let mut inputs = FormInputs::default();
        inputs.taxonomy.base_name = "Canis".to_string();
        inputs.taxonomy.accepted_only = true;

        let q = run(&state, &inputs);
        assert_eq!(q.params.get("show"), Some("acconly"));

        state.sections.output = true;
        inputs.output.blocks = vec!["attr".to_string()];
        let q = run(&state, &inputs);
        assert_eq!(q.params.get("show"), Some("attr,acconly"));

        state.record_type = RecordType::Taxa;
        inputs.output.blocks.clear();
        let q = run(&state, &inputs);
        assert_eq!(q.params.get("taxon_status"), Some("accepted"));
        assert!(!q.params.contains("show"));
    }

    #[test]
    fn test_advanced_taxonomy() {
        let mut state = state(RecordType::Taxa);
        let mut inputs = FormInputs::default();
        inputs.taxonomy.base_name = "Canis".to_string();
        inputs.taxonomy.variants = true;
        inputs.taxonomy.pres = "regular".to_string();
        inputs.taxonomy.rank = "genus".to_string();

        let q = run(&state, &inputs);
        assert_eq!(
            q.params.to_strings(),
            ["base_name=Canis", "rank=genus", "taxon_status=all"]
        );

        state.mode = FormMode::Advanced;
        let q = run(&state, &inputs);
        assert_eq!(
            q.params.to_strings(),
            [
                "base_name=Canis",
                "rank=genus",
                "taxon_status=all",
                "variant=all",
                "pres=regular"
            ]
        );
    }

    #[test]
    fn test_taxon_filter_per_type() {
        let mut inputs = FormInputs::default();
        inputs.taxonomy.base_name = "Canis".to_string();
        inputs.taxonomy.reso = "family".to_string();
        inputs.taxonomy.ident = "all".to_string();
        inputs.taxonomy.pres = "regular".to_string();
        inputs.taxonomy.rank = "genus".to_string();
        inputs.taxonomy.variants = true;

        let mut state = state(RecordType::Specs);
        state.mode = FormMode::Advanced;
        let q = run(&state, &inputs);
        assert_eq!(q.operation, Operation::SpecsList);
        assert_eq!(q.params.to_strings(), ["base_name=Canis", "pres=regular"]);

        state.record_type = RecordType::Meas;
        let q = run(&state, &inputs);
        assert_eq!(q.operation, Operation::SpecsMeasurements);
        assert_eq!(q.params.to_strings(), ["base_name=Canis", "pres=regular"]);

        state.record_type = RecordType::ByRef;
        let q = run(&state, &inputs);
        assert_eq!(q.operation, Operation::TaxaByRef);
        assert_eq!(
            q.params.to_strings(),
            ["base_name=Canis", "pres=regular", "select=taxonomy"]
        );
        assert!(q.is_valid);

        state.record_type = RecordType::Occs;
        let q = run(&state, &inputs);
        assert_eq!(
            q.params.to_strings(),
            [
                "base_name=Canis",
                "taxon_reso=family",
                "ident=all",
                "pres=regular"
            ]
        );
    }

    #[test]
    fn test_diversity() {
        let mut state = state(RecordType::Diversity);
        state.mode = FormMode::Advanced;
        let mut inputs = FormInputs::default();
        inputs.taxonomy.base_name = "Canis".to_string();
        inputs.taxonomy.div_count = "family".to_string();
        inputs.time.div_reso = "epoch".to_string();
        inputs.time.div_recent = true;
        inputs.time.rule = TimeRule::Overlap;

        let q = run(&state, &inputs);
        assert_eq!(q.operation, Operation::OccsDiversity);
        assert_eq!(
            q.params.to_strings(),
            [
                "base_name=Canis",
                "count=family",
                "time_reso=epoch",
                "recent",
                "time_rule=overlap"
            ]
        );
        assert_eq!(q.test_url().as_deref().map(|u| u.ends_with("&limit=100")), Some(false));
    }

    #[test]
    fn test_time_rule() {
        let mut state = state(RecordType::Occs);
        state.mode = FormMode::Advanced;
        let mut inputs = FormInputs::default();
        inputs.time.early = "66".to_string();
        inputs.time.rule = TimeRule::Buffer;
        inputs.time.buffer = "5".to_string();

        let q = run(&state, &inputs);
        assert_eq!(
            q.params.to_strings(),
            ["max_ma=66", "time_rule=buffer", "time_buffer=5"]
        );

        inputs.time.early.clear();
        let q = run(&state, &inputs);
        assert!(!q.params.contains("time_rule"));
    }

    #[test]
    fn test_ris() {
        let mut state = state(RecordType::Taxa);
        state.format = OutputFormat::Ris;
        let mut inputs = FormInputs::default();
        inputs.taxonomy.base_name = "Canis".to_string();

        let q = run(&state, &inputs);
        assert_eq!(q.output, UrlOutput::HasErrors);
        assert_eq!(q.errors[0].field, Field::Records);

        state.record_type = RecordType::Refs;
        let q = run(&state, &inputs);
        assert_eq!(
            q.url(),
            Some(
                "https://paleobiodb.org/data1.2/taxa/refs.ris?datainfo&rowcount&\
                base_name=Canis&taxon_status=all&select=taxonomy"
            )
        );
    }

    #[test]
    fn test_test_url() {
        let state = state(RecordType::Occs);
        let mut inputs = FormInputs::default();
        inputs.taxonomy.base_name = "Canis".to_string();

        let q = run(&state, &inputs);
        assert_eq!(
            q.test_url().as_deref(),
            Some("https://paleobiodb.org/data1.2/occs/list.txt?datainfo&rowcount&base_name=Canis&limit=100")
        );

        let mut state = state.clone();
        state.format = OutputFormat::Tsv;
        state.sections.output = true;
        inputs.output.limit = "7".to_string();
        let q = run(&state, &inputs);
        assert_eq!(
            q.test_url().as_deref(),
            Some(
                "https://paleobiodb.org/data1.2/occs/list.tsv?datainfo&rowcount&\
                base_name=Canis&limit=7&textresult"
            )
        );

        inputs.taxonomy.base_name.clear();
        assert_eq!(run(&state, &inputs).test_url(), None);
    }

    #[test]
    fn test_location_params() {
        let mut state = state(RecordType::Occs);
        state.sections.strata = true;
        state.sections.specimen = true;
        let mut inputs = FormInputs::default();
        inputs.location.continent = "NOA".to_string();
        inputs.location.country = "CA".to_string();
        inputs.location.subtract = true;
        inputs.location.plates = "101".to_string();
        inputs.location.latmin = "10s".to_string();
        inputs.location.lngmin = "20w".to_string();
        inputs.location.lngmax = "20e".to_string();
        inputs.strata.env_types = vec!["marine".to_string()];
        inputs.specimen.ids = "5 6".to_string();

        let q = run(&state, &inputs);
        assert_eq!(
            q.params.to_strings(),
            [
                "cc=NOA,^CA",
                "plate=101",
                "lngmin=-20",
                "lngmax=20",
                "latmin=-10",
                "envtype=marine",
                "occ_id=5,6"
            ]
        );
    }
}

// vim: ts=4 sw=4 expandtab
