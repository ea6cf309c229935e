// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (C) 2025 Michael Büsch <m@bues.ch>

use crate::{
    client::PbdbClient,
    mode::{load_form, print_messages},
};
use anyhow as ah;
use pbdl_conf::Config;
use pbdl_util::NoUrlError;
use std::path::Path;

pub async fn run_mode_url(client: &PbdbClient, conf: &Config, form: &Path) -> ah::Result<()> {
    let session = load_form(client, conf, form).await?;
    let query = session.compiled();
    print_messages(query);
    println!("{}", query.output);
    if query.requires_confirmation {
        log::info!("This URL selects all records of the data service.");
    }
    match query.url() {
        Some(_) => Ok(()),
        None => Err(NoUrlError.into()),
    }
}

// vim: ts=4 sw=4 expandtab
