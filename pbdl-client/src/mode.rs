// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (C) 2025 Michael Büsch <m@bues.ch>

pub mod download;
pub mod suggest;
pub mod url;

use crate::{client::PbdbClient, form::FormFile};
use anyhow::{self as ah, Context as _};
use pbdl_conf::Config;
use pbdl_form::{CompiledQuery, FormSession, NameTable};
use std::path::Path;

/// Load a form file into a new session and run all pending name checks.
pub async fn load_form(client: &PbdbClient, conf: &Config, path: &Path) -> ah::Result<FormSession> {
    let form = FormFile::new_parse_file(path)?;
    let refdata = client
        .reference_data()
        .await
        .context("Load reference data")?;
    let names = NameTable::new(conf.contributor_names());

    let mut session = FormSession::new(client.base_url(), refdata, names)
        .with_contributor(conf.contributor())
        .with_cache_capacity(conf.cache_capacity());

    let (state, inputs) = form.into_parts();
    let update = session.load(state, inputs);
    for req in &update.lookups {
        let outcome = client.lookup(req).await;
        if session.resolve_lookup(req, outcome).is_none() {
            log::debug!("Discarded lookup result for '{}'", req.key);
        }
    }
    Ok(session)
}

/// Print the field messages of a compiled query to stderr.
pub fn print_messages(query: &CompiledQuery) {
    for msg in &query.errors {
        eprintln!("Error: {msg}");
    }
    for msg in &query.notes {
        eprintln!("{msg}");
    }
}

// vim: ts=4 sw=4 expandtab
