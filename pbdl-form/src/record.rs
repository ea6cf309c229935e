// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (C) 2025 Michael Büsch <m@bues.ch>

//! Record types and the static per-type descriptor table.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// The kind of record the user wants to download.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordType {
    #[default]
    Occs,
    Colls,
    Specs,
    Meas,
    Strata,
    Diversity,
    Taxa,
    Ops,
    Refs,
    ByRef,
}

/// Data service operations a compiled query can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    OccsList,
    CollsList,
    SpecsList,
    SpecsMeasurements,
    OccsStrata,
    OccsDiversity,
    TaxaList,
    OpinionsList,
    TaxaRefs,
    TaxaByRef,
    OccsTaxa,
    OccsRefs,
    OccsTaxaByRef,
    OccsOpinions,
    TaxaOpinions,
}

impl Operation {
    pub fn path(self) -> &'static str {
        match self {
            Self::OccsList => "occs/list",
            Self::CollsList => "colls/list",
            Self::SpecsList => "specs/list",
            Self::SpecsMeasurements => "specs/measurements",
            Self::OccsStrata => "occs/strata",
            Self::OccsDiversity => "occs/diversity",
            Self::TaxaList => "taxa/list",
            Self::OpinionsList => "opinions/list",
            Self::TaxaRefs => "taxa/refs",
            Self::TaxaByRef => "taxa/byref",
            Self::OccsTaxa => "occs/taxa",
            Self::OccsRefs => "occs/refs",
            Self::OccsTaxaByRef => "occs/taxabyref",
            Self::OccsOpinions => "occs/opinions",
            Self::TaxaOpinions => "taxa/opinions",
        }
    }

    /// The occurrence-scoped variant of this operation.
    /// The data service only offers these when occurrence level filters are used.
    pub fn for_occurrences(self) -> Self {
        match self {
            Self::TaxaList => Self::OccsTaxa,
            Self::TaxaRefs => Self::OccsRefs,
            Self::TaxaByRef => Self::OccsTaxaByRef,
            Self::OpinionsList => Self::OccsOpinions,
            other => other,
        }
    }

    /// The taxon-scoped variant of this operation.
    pub fn for_taxon(self) -> Self {
        match self {
            Self::OpinionsList => Self::TaxaOpinions,
            other => other,
        }
    }

    /// Rewrite the operation according to the filters in effect.
    pub fn rewrite(self, occs_required: bool, taxon_required: bool) -> Self {
        if occs_required {
            self.for_occurrences()
        } else if taxon_required {
            self.for_taxon()
        } else {
            self
        }
    }

    /// Metadata subsections that apply to this operation.
    /// The first entry is the primary one.
    pub fn meta_subsections(self) -> &'static [MetaSub] {
        use MetaSub::*;
        match self {
            Self::OccsList
            | Self::OccsDiversity
            | Self::OccsTaxa
            | Self::OccsStrata
            | Self::SpecsList
            | Self::SpecsMeasurements => &[Occs],
            Self::CollsList => &[Colls, Occs],
            Self::TaxaList => &[Taxa],
            Self::OpinionsList => &[Ops],
            Self::TaxaOpinions => &[Ops, Taxa],
            Self::OccsOpinions => &[Ops, Occs],
            Self::OccsRefs | Self::OccsTaxaByRef => &[Occs, Refs],
            Self::TaxaRefs | Self::TaxaByRef => &[Taxa, Refs],
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// Output file format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Tsv,
    Json,
    Ris,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Tsv => "tsv",
            Self::Json => "json",
            Self::Ris => "ris",
        }
    }
}

/// Simple or advanced form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormMode {
    #[default]
    Simple,
    Advanced,
}

/// Metadata subsections. Each one filters on the creation/modification
/// data of one kind of record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetaSub {
    Occs,
    Colls,
    Taxa,
    Ops,
    Refs,
}

impl MetaSub {
    pub const ALL: [MetaSub; 5] = [Self::Occs, Self::Colls, Self::Taxa, Self::Ops, Self::Refs];

    /// Query parameter prefix.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Occs => "occs",
            Self::Colls => "colls",
            Self::Taxa => "taxa",
            Self::Ops => "ops",
            Self::Refs => "refs",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Which taxonomy section controls apply to a record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaxonFilter {
    /// Taxonomic resolution and identification selection.
    Resolution,
    /// Diversity counting level.
    DivCount,
    /// Rank range, taxonomic status and name variants.
    Range,
    /// Base name and preservation only.
    NameOnly,
}

/// An output block checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub code: &'static str,
    /// Included by the `full` block.
    pub bold: bool,
}

const fn b(code: &'static str) -> Block {
    Block { code, bold: true }
}

const fn p(code: &'static str) -> Block {
    Block { code, bold: false }
}

/// The block that stands for all bold blocks of a record type.
pub const FULL_BLOCK: &str = "full";

#[rustfmt::skip]
const OCCS_BLOCKS: &[Block] = &[
    b("full"), b("attr"), b("class"), p("classext"), p("genus"), p("subgenus"),
    p("acconly"), p("ident"), p("img"), b("plant"), b("abund"), b("ecospace"),
    b("taphonomy"), p("etbasis"), b("pres"), b("coll"), b("coords"), b("loc"),
    b("paleoloc"), b("prot"), p("strat"), b("stratext"), p("lith"), b("lithext"),
    p("env"), b("geo"), b("methods"), p("resgroup"), p("ref"), b("refattr"),
    p("ent"), p("entname"), p("crmod"),
];

#[rustfmt::skip]
const COLLS_BLOCKS: &[Block] = &[
    b("full"), b("loc"), b("paleoloc"), b("prot"), p("strat"), b("stratext"),
    p("lith"), b("lithext"), b("geo"), b("methods"), p("resgroup"), p("ref"),
    b("refattr"), p("secref"), p("ent"), p("entname"), p("crmod"),
];

#[rustfmt::skip]
const SPECS_BLOCKS: &[Block] = &[
    b("full"), b("attr"), b("class"), p("classext"), p("genus"), p("subgenus"),
    b("plant"), b("abund"), b("coll"), b("coords"), b("loc"), b("paleoloc"),
    b("prot"), p("strat"), b("stratext"), p("lith"), b("lithext"), b("geo"),
    b("methods"), p("rem"), p("resgroup"), p("ref"), b("refattr"), p("ent"),
    p("entname"), p("crmod"),
];

#[rustfmt::skip]
const TAXA_BLOCKS: &[Block] = &[
    b("full"), b("attr"), b("common"), b("app"), p("occapp"), b("parent"),
    p("immparent"), b("size"), b("class"), p("classext"), b("subcounts"),
    b("ecospace"), b("taphonomy"), p("etbasis"), b("pres"), p("seq"), p("img"),
    p("ref"), b("refattr"), p("ent"), p("entname"), p("crmod"),
];

#[rustfmt::skip]
const OPS_BLOCKS: &[Block] = &[
    b("full"), b("basis"), p("ref"), b("refattr"), p("ent"), p("entname"), p("crmod"),
];

#[rustfmt::skip]
const STRATA_BLOCKS: &[Block] = &[p("coords"), p("gplates"), p("splates")];

#[rustfmt::skip]
const REFS_BLOCKS: &[Block] = &[
    p("counts"), p("formatted"), p("both"), p("comments"), p("ent"), p("entname"),
    p("crmod"),
];

#[rustfmt::skip]
const OCCS_ORDER: &[&str] = &[
    "earlyage", "lateage", "taxon", "formation", "plate", "created", "modified",
];

#[rustfmt::skip]
const TAXA_ORDER: &[&str] = &[
    "hierarchy", "name", "ref", "firstapp", "lastapp", "n_occs", "authpub", "pubauth",
    "created", "modified",
];

#[rustfmt::skip]
const OPS_ORDER: &[&str] = &[
    "hierarchy", "name", "ref", "authpub", "pubauth", "basis", "created", "modified",
];

#[rustfmt::skip]
const REFS_ORDER: &[&str] = &[
    "authpub", "pubauth", "reftitle", "pubtitle", "created", "modified",
];

/// Static description of a record type.
#[derive(Debug)]
pub struct RecordDesc {
    pub operation: Operation,
    pub taxon_filter: TaxonFilter,
    /// The "accepted names only" box applies.
    pub accepted_only: bool,
    pub blocks: &'static [Block],
    pub order_keys: &'static [&'static str],
    /// Label of the "select all records" box.
    pub label: &'static str,
}

const OCCS_DESC: RecordDesc = RecordDesc {
    operation: Operation::OccsList,
    taxon_filter: TaxonFilter::Resolution,
    accepted_only: true,
    blocks: OCCS_BLOCKS,
    order_keys: OCCS_ORDER,
    label: "occurrence records",
};

const COLLS_DESC: RecordDesc = RecordDesc {
    operation: Operation::CollsList,
    taxon_filter: TaxonFilter::Resolution,
    accepted_only: false,
    blocks: COLLS_BLOCKS,
    order_keys: OCCS_ORDER,
    label: "collection records",
};

const SPECS_DESC: RecordDesc = RecordDesc {
    operation: Operation::SpecsList,
    taxon_filter: TaxonFilter::NameOnly,
    accepted_only: true,
    blocks: SPECS_BLOCKS,
    order_keys: OCCS_ORDER,
    label: "specimen records",
};

const MEAS_DESC: RecordDesc = RecordDesc {
    operation: Operation::SpecsMeasurements,
    taxon_filter: TaxonFilter::NameOnly,
    accepted_only: false,
    blocks: &[],
    order_keys: OCCS_ORDER,
    label: "measurement records",
};

const STRATA_DESC: RecordDesc = RecordDesc {
    operation: Operation::OccsStrata,
    taxon_filter: TaxonFilter::Resolution,
    accepted_only: false,
    blocks: STRATA_BLOCKS,
    order_keys: &[],
    label: "stratum records",
};

const DIVERSITY_DESC: RecordDesc = RecordDesc {
    operation: Operation::OccsDiversity,
    taxon_filter: TaxonFilter::DivCount,
    accepted_only: false,
    blocks: &[],
    order_keys: &[],
    label: "occurrence records",
};

const TAXA_DESC: RecordDesc = RecordDesc {
    operation: Operation::TaxaList,
    taxon_filter: TaxonFilter::Range,
    accepted_only: true,
    blocks: TAXA_BLOCKS,
    order_keys: TAXA_ORDER,
    label: "taxonomic name records",
};

const OPS_DESC: RecordDesc = RecordDesc {
    operation: Operation::OpinionsList,
    taxon_filter: TaxonFilter::Range,
    accepted_only: true,
    blocks: OPS_BLOCKS,
    order_keys: OPS_ORDER,
    label: "taxonomic opinion records",
};

const REFS_DESC: RecordDesc = RecordDesc {
    operation: Operation::TaxaRefs,
    taxon_filter: TaxonFilter::Range,
    accepted_only: true,
    blocks: REFS_BLOCKS,
    order_keys: REFS_ORDER,
    label: "bibliographic reference records",
};

const BYREF_DESC: RecordDesc = RecordDesc {
    operation: Operation::TaxaByRef,
    taxon_filter: TaxonFilter::NameOnly,
    accepted_only: true,
    blocks: TAXA_BLOCKS,
    order_keys: REFS_ORDER,
    label: "taxonomic name records",
};

impl RecordType {
    pub fn desc(self) -> &'static RecordDesc {
        match self {
            Self::Occs => &OCCS_DESC,
            Self::Colls => &COLLS_DESC,
            Self::Specs => &SPECS_DESC,
            Self::Meas => &MEAS_DESC,
            Self::Strata => &STRATA_DESC,
            Self::Diversity => &DIVERSITY_DESC,
            Self::Taxa => &TAXA_DESC,
            Self::Ops => &OPS_DESC,
            Self::Refs => &REFS_DESC,
            Self::ByRef => &BYREF_DESC,
        }
    }

    /// Reference records are the only ones available as RIS.
    pub fn supports(self, format: OutputFormat) -> bool {
        format != OutputFormat::Ris || self == Self::Refs
    }

    /// Whether "accepted only" is expressed as the `acconly` output block.
    pub fn accepted_only_block(self) -> bool {
        matches!(self, Self::Occs | Self::Specs)
    }

    /// Whether the record type takes a reference type selection.
    pub fn has_ref_types(self) -> bool {
        matches!(self, Self::Refs | Self::ByRef)
    }
}

impl RecordDesc {
    pub fn block(&self, code: &str) -> Option<&'static Block> {
        self.blocks.iter().find(|blk| blk.code == code)
    }

    /// Codes of the blocks included by `full`.
    pub fn full_blocks(&self) -> impl Iterator<Item = &'static str> {
        self.blocks
            .iter()
            .filter(|blk| blk.bold && blk.code != FULL_BLOCK)
            .map(|blk| blk.code)
    }

    pub fn has_order_key(&self, key: &str) -> bool {
        self.order_keys.contains(&key)
    }
}


// vim: ts=4 sw=4 expandtab
