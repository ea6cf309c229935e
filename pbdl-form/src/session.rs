// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (C) 2025 Michael Büsch <m@bues.ch>

//! The form session.
//!
//! A `FormSession` holds one revision of the form. Every edit produces
//! the next revision and the newly compiled query. Name checks against
//! the data service are handed out as `LookupRequest`s. The caller
//! performs them and feeds the outcome back with `resolve_lookup`.

use crate::{
    cache::LookupCache,
    compile::{CompiledQuery, compile},
    fields::{
        LookupOutcome, ValidatedParams, Validator, strata::stratum_key, taxon::normalize_taxon_name,
        time::{IntervalSide, clear_on_select},
    },
    names::NameTable,
    record::{FormMode, MetaSub, OutputFormat, RecordType},
    refdata::ReferenceData,
    state::{
        FormInputs, FormState, LocationInput, MetadataInput, Section, SortDir, SpecimenInput,
        StrataInput, TaxonomyInput, TimeInput,
    },
};

pub const DEFAULT_CACHE_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupKind {
    Taxon,
    Stratum,
}

/// A name existence check the caller has to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub kind: LookupKind,
    /// The exact name to check. Also the cache key.
    pub key: String,
    /// The revision that requested the check.
    pub revision: u64,
}

impl LookupRequest {
    /// Request path relative to the data service base URL,
    /// including the fixed parameters.
    pub fn path(&self) -> &'static str {
        match self.kind {
            LookupKind::Taxon => "taxa/list.json",
            LookupKind::Stratum => "strata/list.json?limit=0&rowcount",
        }
    }

    /// The unencoded query parameters carrying the name.
    pub fn query(&self) -> [(&'static str, &str); 1] {
        [("name", &self.key)]
    }
}

/// A change to the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    RecordType(RecordType),
    Format(OutputFormat),
    Mode(FormMode),
    Private(bool),
    OutputMetadata(bool),
    AllRecords(bool),
    Section(Section, bool),
    Taxonomy(TaxonomyInput),
    TaxonName(String),
    AcceptedOnly(bool),
    TaxonStatus(String),
    TaxonVariants(bool),
    /// A new value in one of the two time fields.
    Interval(IntervalSide, String),
    Time(TimeInput),
    Location(LocationInput),
    Strata(StrataInput),
    Stratum(String),
    Specimen(SpecimenInput),
    Metadata(MetadataInput),
    OutputBlocks(Vec<String>),
    /// A new sort key. Resets the sort direction.
    OrderKey(String),
    OrderDir(Option<SortDir>),
    Limit(String),
    RefTypes(Vec<String>),
    OpType(Option<String>),
}

/// The result of an edit.
#[derive(Debug, Clone)]
pub struct Update {
    pub revision: u64,
    pub query: CompiledQuery,
    /// Name checks that have to be performed.
    pub lookups: Vec<LookupRequest>,
}

#[derive(Debug)]
pub struct FormSession {
    base_url: String,
    refdata: ReferenceData,
    names: NameTable,
    state: FormState,
    inputs: FormInputs,
    params: ValidatedParams,
    taxa: LookupCache<LookupOutcome>,
    strata: LookupCache<LookupOutcome>,
    revision: u64,
    /// Format to restore when switching to reference records.
    ref_format: OutputFormat,
    /// Format to restore when switching away from reference records.
    non_ref_format: OutputFormat,
    compiled: CompiledQuery,
}

impl FormSession {
    /// Create a session with the default form.
    ///
    /// `base_url` is the data service URL. A missing trailing `/` is added.
    pub fn new(base_url: &str, refdata: ReferenceData, names: NameTable) -> Self {
        let base_url = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let state = FormState::default();
        let inputs = FormInputs::default();
        let params = ValidatedParams::default();
        let compiled = compile(&base_url, &state, &params);
        let mut this = Self {
            base_url,
            refdata,
            names,
            non_ref_format: state.format,
            ref_format: state.format,
            state,
            inputs,
            params,
            taxa: LookupCache::new(DEFAULT_CACHE_CAPACITY),
            strata: LookupCache::new(DEFAULT_CACHE_CAPACITY),
            revision: 0,
            compiled,
        };
        this.revalidate_all();
        this.recompile();
        this
    }

    /// Mark the user as authenticated contributor.
    pub fn with_contributor(mut self, contributor: bool) -> Self {
        self.state.contributor = contributor;
        self.params.records = self.validator().records(&self.state);
        self.recompile();
        self
    }

    /// Set the number of lookup results kept per name kind.
    /// Clears the caches.
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.taxa = LookupCache::new(capacity);
        self.strata = LookupCache::new(capacity);
        self.revalidate_all();
        self.recompile();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn refdata(&self) -> &ReferenceData {
        &self.refdata
    }

    pub fn names(&self) -> &NameTable {
        &self.names
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn inputs(&self) -> &FormInputs {
        &self.inputs
    }

    pub fn params(&self) -> &ValidatedParams {
        &self.params
    }

    pub fn compiled(&self) -> &CompiledQuery {
        &self.compiled
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn validator(&self) -> Validator<'_> {
        Validator {
            refdata: &self.refdata,
            names: &self.names,
            taxa: &self.taxa,
            strata: &self.strata,
        }
    }

    fn revalidate_all(&mut self) {
        self.params = self.validator().validate_all(&self.state, &self.inputs);
        self.write_back_names();
    }

    /// Re-check the groups that depend on the non-field form state.
    fn revalidate_state(&mut self) {
        self.params.time = self.validator().time(&self.state, &self.inputs);
        self.params.output = self.validator().output(&self.state, &self.inputs);
        self.params.records = self.validator().records(&self.state);
    }

    fn revalidate_taxon(&mut self) {
        self.params.taxon = self.validator().taxon(&self.inputs);
    }

    fn revalidate_strata(&mut self) {
        self.params.stratum = self.validator().stratum(&self.inputs);
        self.params.environment = self.validator().environment(&self.inputs);
    }

    fn revalidate_location(&mut self) {
        self.params.location = self.validator().location(&self.inputs);
        self.params.coords = self.validator().coords(&self.inputs);
    }

    fn revalidate_metadata(&mut self) {
        self.params.coll_re = self.validator().coll_re(&self.inputs);
        self.params.meta = self.validator().meta(&self.inputs);
        self.write_back_names();
    }

    /// Show resolved person names in their canonical form.
    fn write_back_names(&mut self) {
        for sub in MetaSub::ALL {
            let checked = self.params.meta(sub);
            if checked.value.person.is_none() {
                continue;
            }
            let display = checked.value.display_names.clone();
            let input = self.inputs.metadata.sub_mut(sub);
            if input.names != display {
                input.names = display;
            }
        }
    }

    fn recompile(&mut self) {
        self.compiled = compile(&self.base_url, &self.state, &self.params);
    }

    fn taxon_key(&self) -> String {
        normalize_taxon_name(&self.inputs.taxonomy.base_name)
    }

    fn stratum_key(&self) -> Option<String> {
        stratum_key(&self.inputs.strata.strat)
    }

    fn taxon_lookup(&self, old_key: Option<&str>) -> Option<LookupRequest> {
        let key = self.taxon_key();
        if key.is_empty() || old_key == Some(key.as_str()) || self.taxa.get(&key).is_some() {
            return None;
        }
        Some(LookupRequest {
            kind: LookupKind::Taxon,
            key,
            revision: self.revision,
        })
    }

    fn stratum_lookup(&self, old_key: Option<&str>) -> Option<LookupRequest> {
        let key = self.stratum_key()?;
        if old_key == Some(key.as_str()) || self.strata.get(&key).is_some() {
            return None;
        }
        Some(LookupRequest {
            kind: LookupKind::Stratum,
            key,
            revision: self.revision,
        })
    }

    fn set_record_type(&mut self, record_type: RecordType) {
        let was_refs = self.state.record_type == RecordType::Refs;
        let is_refs = record_type == RecordType::Refs;
        if was_refs && !is_refs {
            self.ref_format = self.state.format;
            self.state.format = self.non_ref_format;
        } else if !was_refs && is_refs {
            self.non_ref_format = self.state.format;
            self.state.format = self.ref_format;
        }
        self.state.record_type = record_type;
    }

    fn finish(&mut self, lookups: Vec<LookupRequest>) -> Update {
        self.recompile();
        for req in &lookups {
            log::debug!("Lookup {:?} '{}' requested (rev {})", req.kind, req.key, req.revision);
        }
        Update {
            revision: self.revision,
            query: self.compiled.clone(),
            lookups,
        }
    }

    /// Apply an edit and compile the new revision.
    pub fn apply(&mut self, edit: Edit) -> Update {
        self.revision += 1;
        let old_taxon = self.taxon_key();
        let old_stratum = self.stratum_key();
        let mut lookups = Vec::new();

        match edit {
            Edit::RecordType(record_type) => {
                self.set_record_type(record_type);
                self.revalidate_state();
            }
            Edit::Format(format) => {
                self.state.format = format;
                self.revalidate_state();
            }
            Edit::Mode(mode) => {
                self.state.mode = mode;
                self.revalidate_state();
            }
            Edit::Private(private) => {
                self.state.private = private;
                self.revalidate_state();
            }
            Edit::OutputMetadata(on) => self.state.output_metadata = on,
            Edit::AllRecords(on) => self.state.all_records = on,
            Edit::Section(section, visible) => self.state.sections.set(section, visible),
            Edit::Taxonomy(taxonomy) => {
                self.inputs.taxonomy = taxonomy;
                self.revalidate_taxon();
            }
            Edit::TaxonName(name) => {
                self.inputs.taxonomy.base_name = name;
                self.revalidate_taxon();
            }
            Edit::AcceptedOnly(on) => {
                self.inputs.taxonomy.accepted_only = on;
                self.revalidate_taxon();
            }
            Edit::TaxonStatus(status) => {
                self.inputs.taxonomy.status = status;
                self.revalidate_taxon();
            }
            Edit::TaxonVariants(on) => {
                self.inputs.taxonomy.variants = on;
                self.revalidate_taxon();
            }
            Edit::Interval(side, value) => {
                match side {
                    IntervalSide::Early => self.inputs.time.early = value,
                    IntervalSide::Late => self.inputs.time.late = value,
                }
                clear_on_select(&mut self.inputs.time, side, &self.refdata);
                self.params.time = self.validator().time(&self.state, &self.inputs);
            }
            Edit::Time(time) => {
                self.inputs.time = time;
                self.params.time = self.validator().time(&self.state, &self.inputs);
            }
            Edit::Location(location) => {
                self.inputs.location = location;
                self.revalidate_location();
            }
            Edit::Strata(strata) => {
                self.inputs.strata = strata;
                self.revalidate_strata();
            }
            Edit::Stratum(name) => {
                self.inputs.strata.strat = name;
                self.revalidate_strata();
            }
            Edit::Specimen(specimen) => {
                self.inputs.specimen = specimen;
                self.params.specimen = self.validator().specimen(&self.inputs);
            }
            Edit::Metadata(metadata) => {
                self.inputs.metadata = metadata;
                self.revalidate_metadata();
            }
            Edit::OutputBlocks(blocks) => {
                self.inputs.output.blocks = blocks;
                self.params.output = self.validator().output(&self.state, &self.inputs);
            }
            Edit::OrderKey(key) => {
                self.inputs.output.order = key;
                self.inputs.output.direction = None;
                self.params.output = self.validator().output(&self.state, &self.inputs);
            }
            Edit::OrderDir(dir) => {
                self.inputs.output.direction = dir;
                self.params.output = self.validator().output(&self.state, &self.inputs);
            }
            Edit::Limit(limit) => {
                self.inputs.output.limit = limit;
                self.params.output = self.validator().output(&self.state, &self.inputs);
            }
            Edit::RefTypes(types) => {
                self.state.ref_types = types;
                self.params.records = self.validator().records(&self.state);
            }
            Edit::OpType(op_type) => {
                self.state.op_type = op_type;
                self.params.records = self.validator().records(&self.state);
            }
        }

        lookups.extend(self.taxon_lookup(Some(&old_taxon)));
        lookups.extend(self.stratum_lookup(old_stratum.as_deref()));
        self.finish(lookups)
    }

    /// Replace the whole form.
    ///
    /// The contributor flag of the session is kept.
    pub fn load(&mut self, state: FormState, inputs: FormInputs) -> Update {
        self.revision += 1;
        let contributor = self.state.contributor;
        self.state = state;
        self.state.contributor = contributor;
        if self.state.record_type == RecordType::Refs {
            self.ref_format = self.state.format;
        } else {
            self.non_ref_format = self.state.format;
        }
        self.inputs = inputs;
        self.revalidate_all();

        let mut lookups = Vec::new();
        lookups.extend(self.taxon_lookup(None));
        lookups.extend(self.stratum_lookup(None));
        self.finish(lookups)
    }

    /// Feed the result of a lookup.
    ///
    /// The outcome is always cached. It is applied only if the field
    /// still holds the looked up name. Returns `None` for stale results.
    pub fn resolve_lookup(&mut self, req: &LookupRequest, outcome: LookupOutcome) -> Option<Update> {
        log::debug!("Lookup {:?} '{}' resolved: {:?}", req.kind, req.key, outcome);
        let current = match req.kind {
            LookupKind::Taxon => {
                self.taxa.insert(&req.key, outcome);
                Some(self.taxon_key())
            }
            LookupKind::Stratum => {
                self.strata.insert(&req.key, outcome);
                self.stratum_key()
            }
        };
        if current.as_deref() != Some(req.key.as_str()) {
            log::debug!(
                "Stale lookup result for '{}' (rev {}, now rev {})",
                req.key,
                req.revision,
                self.revision
            );
            return None;
        }

        self.revision += 1;
        match req.kind {
            LookupKind::Taxon => self.revalidate_taxon(),
            LookupKind::Stratum => self.revalidate_strata(),
        }
        Some(self.finish(vec![]))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::compile::{PLACEHOLDER_ERRORS, UrlOutput};

    fn session() -> FormSession {
        let mut rd = ReferenceData::new();
        rd.add_interval("Jurassic", "int:18");
        rd.add_interval("Cretaceous", "int:15");
        rd.add_country("US", "United States");
        let names = NameTable::new(&["Alroy, John", "Smith, John", "Smith, Kate"]);
        FormSession::new("https://paleobiodb.org/data1.2", rd, names)
    }

    #[test]
    fn test_new() {
        let s = session();
        assert_eq!(s.base_url(), "https://paleobiodb.org/data1.2/");
        assert_eq!(s.revision(), 0);
        assert_eq!(s.compiled().output, UrlOutput::NeedsParameter);
        assert!(s.state().is_visible(Section::Taxonomy));
    }

    #[test]
    fn test_taxon_lookup() {
        let mut s = session();
        let up = s.apply(Edit::TaxonName("Canis ".to_string()));
        assert_eq!(up.revision, 1);
        assert_eq!(
            up.lookups,
            [LookupRequest {
                kind: LookupKind::Taxon,
                key: "Canis".to_string(),
                revision: 1,
            }]
        );
        assert_eq!(up.lookups[0].path(), "taxa/list.json");
        assert_eq!(up.lookups[0].query(), [("name", "Canis")]);
        // Pending names are used unvalidated.
        assert_eq!(
            up.query.url(),
            Some("https://paleobiodb.org/data1.2/occs/list.csv?datainfo&rowcount&base_name=Canis")
        );

        // The same name again does not ask twice.
        let up2 = s.apply(Edit::TaxonName("Canis".to_string()));
        assert!(up2.lookups.is_empty());

        let up = s
            .resolve_lookup(&up.lookups[0], LookupOutcome::Invalid("Unknown taxon 'Canis'".to_string()))
            .unwrap();
        assert_eq!(up.revision, 3);
        assert_eq!(up.query.output.text(), PLACEHOLDER_ERRORS);
        assert_eq!(up.query.errors[0].text, "Unknown taxon 'Canis'");
    }

    #[test]
    fn test_stale_lookup() {
        let mut s = session();
        let canis = s.apply(Edit::TaxonName("Canis".to_string())).lookups.remove(0);
        let felis = s.apply(Edit::TaxonName("Felis".to_string())).lookups.remove(0);

        assert!(s.resolve_lookup(&canis, LookupOutcome::Invalid("bad".to_string())).is_none());
        assert!(s.compiled().is_valid);

        let up = s.resolve_lookup(&felis, LookupOutcome::Valid).unwrap();
        assert!(up.query.is_valid);

        // The stale result was cached and applies on return.
        let up = s.apply(Edit::TaxonName("Canis".to_string()));
        assert!(up.lookups.is_empty());
        assert!(!up.query.is_valid);

        // Only identical keys hit the cache.
        let up = s.apply(Edit::TaxonName("canis".to_string()));
        assert_eq!(up.lookups.len(), 1);
    }

    #[test]
    fn test_lookup_failure() {
        let mut s = session();
        let req = s.apply(Edit::TaxonName("Canis".to_string())).lookups.remove(0);
        let up = s
            .resolve_lookup(&req, LookupOutcome::Failed("connection refused".to_string()))
            .unwrap();
        assert_eq!(
            up.query.errors[0].text,
            "Unable to validate taxon name: connection refused"
        );
    }

    #[test]
    fn test_stratum_lookup() {
        let mut s = session();
        s.apply(Edit::Section(Section::Strata, true));
        assert!(s.apply(Edit::Stratum("123".to_string())).lookups.is_empty());

        let up = s.apply(Edit::Stratum("Hell Creek".to_string()));
        let req = &up.lookups[0];
        assert_eq!(req.kind, LookupKind::Stratum);
        assert_eq!(req.path(), "strata/list.json?limit=0&rowcount");
        assert_eq!(req.query(), [("name", "Hell Creek")]);

        let up = s
            .resolve_lookup(
                req,
                LookupOutcome::Invalid("no matching strata were found in the database".to_string()),
            )
            .unwrap();
        assert!(!up.query.is_valid);
    }

    #[test]
    fn test_interval_clear() {
        let mut s = session();
        s.apply(Edit::Section(Section::Time, true));
        s.apply(Edit::Interval(IntervalSide::Early, "Jurassic".to_string()));
        let up = s.apply(Edit::Interval(IntervalSide::Late, "66".to_string()));
        assert_eq!(s.inputs().time.early, "");
        assert_eq!(up.query.params.to_strings(), ["min_ma=66"]);

        let up = s.apply(Edit::Interval(IntervalSide::Early, "Cretaceous".to_string()));
        assert_eq!(s.inputs().time.late, "");
        assert_eq!(up.query.params.to_strings(), ["interval=Cretaceous"]);
    }

    #[test]
    fn test_format_swap() {
        let mut s = session();
        s.apply(Edit::Format(OutputFormat::Tsv));
        s.apply(Edit::RecordType(RecordType::Refs));
        assert_eq!(s.state().format, OutputFormat::Csv);
        s.apply(Edit::Format(OutputFormat::Ris));

        s.apply(Edit::RecordType(RecordType::Taxa));
        assert_eq!(s.state().format, OutputFormat::Tsv);
        assert!(s.params().records.errors.is_empty());

        s.apply(Edit::RecordType(RecordType::Refs));
        assert_eq!(s.state().format, OutputFormat::Ris);

        // Switching between non-reference types keeps the format.
        s.apply(Edit::RecordType(RecordType::Occs));
        s.apply(Edit::RecordType(RecordType::Colls));
        assert_eq!(s.state().format, OutputFormat::Tsv);
    }

    #[test]
    fn test_order_key_resets_direction() {
        let mut s = session();
        s.apply(Edit::RecordType(RecordType::Taxa));
        s.apply(Edit::OrderKey("name".to_string()));
        s.apply(Edit::OrderDir(Some(SortDir::Asc)));
        assert_eq!(s.params().output.value.order.as_deref(), Some("name.asc"));

        s.apply(Edit::OrderKey("authpub".to_string()));
        assert_eq!(s.inputs().output.direction, None);
        assert_eq!(s.params().output.value.order.as_deref(), Some("author,pubyr.desc"));
    }

    #[test]
    fn test_metadata_write_back() {
        let mut s = session();
        let mut meta = MetadataInput::default();
        meta.occs.names = "alroy,  k. smith".to_string();
        s.apply(Edit::Section(Section::Metadata, true));
        s.apply(Edit::Metadata(meta));
        assert_eq!(s.inputs().metadata.occs.names, "J. Alroy, K. Smith");
        assert_eq!(
            s.params().meta(MetaSub::Occs).value.person.as_ref().map(|p| p.1.as_str()),
            Some("J. Alroy,K. Smith")
        );
        assert_eq!(
            s.compiled().params.to_strings(),
            ["occs_authent_by=J. Alroy,K. Smith", "all_records"]
        );
    }

    #[test]
    fn test_private() {
        let mut s = session();
        s.apply(Edit::Private(true));
        assert!(!s.params().records.value.private);

        let mut s = session().with_contributor(true);
        s.apply(Edit::TaxonName("Canis".to_string()));
        let up = s.apply(Edit::Private(true));
        assert!(up.query.params.contains("private"));
    }

    #[test]
    fn test_load() {
        let mut s = session().with_contributor(true).with_cache_capacity(4);
        let mut state = FormState::default();
        state.sections.set(Section::Location, true);
        let mut inputs = FormInputs::default();
        inputs.taxonomy.base_name = "Canis".to_string();
        inputs.location.country = "US".to_string();

        let up = s.load(state, inputs);
        assert!(s.state().contributor);
        assert_eq!(up.lookups.len(), 1);
        assert_eq!(up.query.params.get("cc"), Some("US"));
    }

    #[test]
    fn test_hidden_section_keeps_values() {
        let mut s = session();
        s.apply(Edit::Section(Section::Location, true));
        let mut loc = LocationInput::default();
        loc.country = "US".to_string();
        s.apply(Edit::Location(loc));
        let up = s.apply(Edit::Section(Section::Location, false));
        assert_eq!(up.query.output, UrlOutput::NeedsParameter);
        let up = s.apply(Edit::Section(Section::Location, true));
        assert_eq!(up.query.params.get("cc"), Some("US"));
    }
}

// vim: ts=4 sw=4 expandtab
