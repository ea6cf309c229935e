// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (C) 2025 Michael Büsch <m@bues.ch>

//! Reference tables loaded from the data service at startup.

use anyhow::{self as ah, format_err as err};
use serde::Deserialize;
use std::{
    collections::HashMap,
    fmt::{Display, Formatter},
};

/// Continents that are listed after the regular ones.
const AUX_CONTINENTS: [&str; 3] = ["ATA", "OCE", "IOC"];

/// Identifier field of a data service record.
/// Depending on the vocabulary this is a number or a prefixed string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ApiId {
    Num(i64),
    Text(String),
}

impl Display for ApiId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Num(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Generic data service response body.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub records: Option<Vec<T>>,
    /// Present if the request produced warnings. May be empty.
    pub warnings: Option<Vec<String>>,
    /// Present if the request failed. May be empty.
    pub errors: Option<Vec<String>>,
    /// Present if `rowcount` was requested.
    pub records_found: Option<u64>,
}

/// Record of `config.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigRecord {
    pub cfg: String,
    pub cod: Option<ApiId>,
    pub nam: Option<String>,
}

/// Record of `intervals/list.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct IntervalRecord {
    pub oid: ApiId,
    pub nam: String,
}

/// Interval, continent and country tables.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    /// Lower case interval name to interval identifier.
    intervals: HashMap<String, String>,
    /// Continent code to name.
    continents: HashMap<String, String>,
    /// Continent codes in display order.
    continent_order: Vec<String>,
    /// Country code to name.
    countries: HashMap<String, String>,
}

impl ReferenceData {
    pub fn new() -> Self {
        Default::default()
    }

    /// Build the tables from the two startup responses.
    ///
    /// Both responses must carry records, otherwise the form is unusable.
    pub fn from_responses(
        config: ApiResponse<ConfigRecord>,
        intervals: ApiResponse<IntervalRecord>,
    ) -> ah::Result<Self> {
        let Some(config) = config.records else {
            return Err(err!(
                "config.json returned no records: {}",
                config.errors.unwrap_or_default().join("; ")
            ));
        };
        let Some(intervals) = intervals.records else {
            return Err(err!(
                "intervals/list.json returned no records: {}",
                intervals.errors.unwrap_or_default().join("; ")
            ));
        };

        let mut this = Self::new();
        let mut aux = Vec::new();
        for rec in config {
            let (Some(cod), Some(nam)) = (rec.cod, rec.nam) else {
                continue;
            };
            let cod = cod.to_string();
            match rec.cfg.as_str() {
                "con" if AUX_CONTINENTS.contains(&cod.as_str()) => aux.push((cod, nam)),
                "con" => this.add_continent(&cod, &nam),
                "cou" => this.add_country(&cod, &nam),
                _ => (),
            }
        }
        for (cod, nam) in aux {
            this.add_continent(&cod, &nam);
        }
        for rec in intervals {
            this.add_interval(&rec.nam, &rec.oid.to_string());
        }
        log::debug!(
            "Reference data: {} intervals, {} continents, {} countries",
            this.intervals.len(),
            this.continents.len(),
            this.countries.len()
        );
        Ok(this)
    }

    pub fn add_interval(&mut self, name: &str, id: &str) {
        self.intervals.insert(name.to_lowercase(), id.to_string());
    }

    pub fn add_continent(&mut self, code: &str, name: &str) {
        if self
            .continents
            .insert(code.to_string(), name.to_string())
            .is_none()
        {
            self.continent_order.push(code.to_string());
        }
    }

    pub fn add_country(&mut self, code: &str, name: &str) {
        self.countries.insert(code.to_string(), name.to_string());
    }

    /// Look up an interval name, case-insensitively.
    pub fn interval_id(&self, name: &str) -> Option<&str> {
        self.intervals.get(&name.to_lowercase()).map(|s| s.as_str())
    }

    pub fn is_interval(&self, name: &str) -> bool {
        self.interval_id(name).is_some()
    }

    pub fn is_continent(&self, code: &str) -> bool {
        self.continents.contains_key(code)
    }

    pub fn is_country(&self, code: &str) -> bool {
        self.countries.contains_key(code)
    }

    /// Continent codes and names in display order.
    pub fn continents(&self) -> impl Iterator<Item = (&str, &str)> {
        self.continent_order
            .iter()
            .filter_map(|c| self.continents.get(c).map(|n| (c.as_str(), n.as_str())))
    }
}


// vim: ts=4 sw=4 expandtab
