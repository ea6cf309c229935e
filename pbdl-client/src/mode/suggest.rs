// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (C) 2025 Michael Büsch <m@bues.ch>

use crate::client::PbdbClient;
use anyhow::{self as ah, Context as _};
use pbdl_form::LookupCache;
use pbdl_util::{split_delim, split_off_first_item};
use serde::Deserialize;
use std::fmt::{Display, Formatter};

/// Shortest text that is sent to the autocompleter.
const MIN_CHARS: usize = 3;

pub const DEFAULT_TYPES: &str = "int,str,txn,col,ref";

/// One record of `combined/auto.json`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct AutoRecord {
    /// Prefixed identifier, as in `txn:41055`.
    oid: String,
    nam: String,
    rnk: Option<String>,
    /// Higher taxon name.
    htn: Option<String>,
    eag: Option<f64>,
    lag: Option<f64>,
    cc2: Option<String>,
    /// Early and late interval of a collection.
    oei: Option<String>,
    oli: Option<String>,
    /// Taxonomic difference and accepted name.
    tdf: Option<String>,
    acn: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestKind {
    Interval,
    Stratum,
    Taxon,
    Collection,
    Reference,
}

impl SuggestKind {
    fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "int" => Some(Self::Interval),
            "str" => Some(Self::Stratum),
            "txn" => Some(Self::Taxon),
            "col" => Some(Self::Collection),
            "ref" => Some(Self::Reference),
            _ => None,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Interval => "Time Intervals",
            Self::Stratum => "Stratigraphic Units",
            Self::Taxon => "Taxa",
            Self::Collection => "Collections",
            Self::Reference => "References",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub kind: SuggestKind,
    pub id: String,
    pub name: String,
    pub detail: String,
}

impl Display for Suggestion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.detail.is_empty() {
            write!(f, "{} [{}]", self.name, self.id)
        } else {
            write!(f, "{} ({}) [{}]", self.name, self.detail, self.id)
        }
    }
}

fn strat_rank(rank: &str) -> &str {
    match rank {
        "member" => "Mbr",
        "formation" => "Fm",
        "group" => "Gp",
        other => other,
    }
}

fn opt(s: &Option<String>) -> &str {
    s.as_deref().unwrap_or("")
}

impl Suggestion {
    fn from_record(rec: &AutoRecord) -> Option<Self> {
        let (prefix, id) = split_delim(&rec.oid, b':')?;
        let kind = SuggestKind::from_prefix(prefix)?;
        let detail = match kind {
            SuggestKind::Interval => match (rec.eag, rec.lag) {
                (Some(eag), Some(lag)) => format!("{}-{} ma", eag.round(), lag.round()),
                _ => String::new(),
            },
            SuggestKind::Stratum => {
                format!("{} in {}", strat_rank(opt(&rec.rnk)), opt(&rec.cc2))
            }
            SuggestKind::Taxon => {
                let mut detail = format!("{} in {}", opt(&rec.rnk), opt(&rec.htn));
                if let Some(tdf) = &rec.tdf {
                    detail.push_str(&format!("; {tdf} {}", opt(&rec.acn)));
                }
                detail
            }
            SuggestKind::Collection => {
                let mut interval = opt(&rec.oei).to_string();
                if let Some(oli) = &rec.oli {
                    interval.push_str(&format!("-{oli}"));
                }
                format!("{interval} of {}", opt(&rec.cc2))
            }
            SuggestKind::Reference => String::new(),
        };
        Some(Self {
            kind,
            id: id.to_string(),
            name: rec.nam.clone(),
            detail,
        })
    }
}

/// The part of `text` that is completed.
///
/// In a list only the item after the first separator counts.
/// Returns `None` if that is too short.
pub fn search_text(text: &str) -> Option<&str> {
    let text = split_off_first_item(text).trim();
    if text.chars().count() < MIN_CHARS {
        None
    } else {
        Some(text)
    }
}

/// Group suggestions by kind, in order of first appearance.
pub fn group(suggestions: &[Suggestion]) -> Vec<(SuggestKind, Vec<&Suggestion>)> {
    let mut groups: Vec<(SuggestKind, Vec<&Suggestion>)> = Vec::new();
    for s in suggestions {
        match groups.iter_mut().find(|(kind, _)| *kind == s.kind) {
            Some((_, list)) => list.push(s),
            None => groups.push((s.kind, vec![s])),
        }
    }
    groups
}

pub async fn run_mode_suggest(
    client: &PbdbClient,
    texts: &[String],
    types: &str,
    cache_capacity: usize,
) -> ah::Result<()> {
    let mut cache: LookupCache<Vec<Suggestion>> = LookupCache::new(cache_capacity);

    for text in texts {
        let Some(search) = search_text(text) else {
            log::info!("'{text}' is too short for suggestions.");
            continue;
        };

        let suggestions = match cache.get(search) {
            Some(suggestions) => suggestions.clone(),
            None => {
                let resp = client
                    .auto_complete::<AutoRecord>(search, types)
                    .await
                    .context("Autocomplete")?;
                let suggestions: Vec<Suggestion> = resp
                    .records
                    .unwrap_or_default()
                    .iter()
                    .filter_map(Suggestion::from_record)
                    .collect();
                cache.insert(search, suggestions.clone());
                suggestions
            }
        };

        if suggestions.is_empty() {
            println!("No matching results for \"{search}\"");
            continue;
        }
        for (kind, list) in group(&suggestions) {
            println!("{}:", kind.title());
            for s in list {
                println!("    {s}");
            }
        }
    }
    Ok(())
}


// vim: ts=4 sw=4 expandtab
