// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (C) 2025 Michael Büsch <m@bues.ch>

#![forbid(unsafe_code)]

use anyhow::{self as ah, Context as _, format_err as err};
use serde::Deserialize;
use std::{path::Path, time::Duration};
use url::Url;

/// Default location of the configuration file.
pub const DEFAULT_CONF_PATH: &str = "/etc/pbdl/pbdl.conf";

/// Default base URL of the data service.
pub const DEFAULT_BASE_URL: &str = "https://paleobiodb.org/data1.2/";

const DEFAULT_TIMEOUT_S: u64 = 30;
const MAX_TIMEOUT_S: u64 = 600;
const DEFAULT_CACHE_CAPACITY: usize = 256;
const MAX_CACHE_CAPACITY: usize = 65536;

#[derive(Debug, Clone, Deserialize)]
struct Server {
    #[serde(default = "default_base_url")]
    base_url: String,
    user_agent: Option<String>,
    timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for Server {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: None,
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct Session {
    #[serde(default)]
    contributor: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct Cache {
    capacity: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct Contributors {
    #[serde(default)]
    names: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    server: Server,
    #[serde(default)]
    session: Session,
    #[serde(default)]
    cache: Cache,
    #[serde(default)]
    contributors: Contributors,
}

impl Config {
    pub fn new_parse_file(path: &Path) -> ah::Result<Self> {
        let data = std::fs::read_to_string(path).context("Read configuration file")?;
        Self::new_parse_str(&data)
    }

    pub fn new_parse_str(data: &str) -> ah::Result<Self> {
        let this: Self = toml::from_str(data).context("Parse configuration file")?;
        this.check()?;
        Ok(this)
    }

    fn check(&self) -> ah::Result<()> {
        // Check [server] section.
        check_base_url(&self.server.base_url)
            .map_err(|e| err!("The value of 'base_url' under [server] is invalid: {e}"))?;
        if let Some(timeout) = self.server.timeout_secs
            && !(1..=MAX_TIMEOUT_S).contains(&timeout)
        {
            return Err(err!(
                "The value of 'timeout_secs' under [server] must be between 1 and {MAX_TIMEOUT_S}."
            ));
        }

        // Check [cache] section.
        if let Some(capacity) = self.cache.capacity
            && !(1..=MAX_CACHE_CAPACITY).contains(&capacity)
        {
            return Err(err!(
                "The value of 'capacity' under [cache] must be between 1 and {MAX_CACHE_CAPACITY}."
            ));
        }

        // Check [contributors] section.
        for (i, name) in self.contributors.names.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(err!("Entry {i} of 'names' under [contributors] is empty."));
            }
        }
        Ok(())
    }

    /// Override the data service base URL (e.g. from the command line).
    pub fn set_base_url(&mut self, base_url: &str) -> ah::Result<()> {
        check_base_url(base_url).context("Data service URL")?;
        self.server.base_url = base_url.to_string();
        Ok(())
    }

    /// The data service base URL, always ending in a slash.
    pub fn base_url(&self) -> String {
        let url = self.server.base_url.trim();
        if url.ends_with('/') {
            url.to_string()
        } else {
            format!("{url}/")
        }
    }

    pub fn user_agent(&self) -> String {
        self.server
            .user_agent
            .clone()
            .unwrap_or_else(|| format!("pbdl/{}", env!("CARGO_PKG_VERSION")))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.server.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_S))
    }

    /// Whether the user is an authenticated contributor.
    pub fn contributor(&self) -> bool {
        self.session.contributor
    }

    pub fn cache_capacity(&self) -> usize {
        self.cache.capacity.unwrap_or(DEFAULT_CACHE_CAPACITY)
    }

    /// The canonical contributor name list.
    pub fn contributor_names(&self) -> &[String] {
        &self.contributors.names
    }
}

fn check_base_url(url: &str) -> ah::Result<()> {
    let url = Url::parse(url.trim()).context("Parse URL")?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(err!("URL must start with http:// or https://"));
    }
    if url.cannot_be_a_base() || url.host_str().is_none_or(str::is_empty) {
        return Err(err!("URL has no host name"));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(err!("URL must not contain a query or fragment"));
    }
    Ok(())
}


// vim: ts=4 sw=4 expandtab
