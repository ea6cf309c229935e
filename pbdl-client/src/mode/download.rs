// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (C) 2025 Michael Büsch <m@bues.ch>

use crate::{
    client::PbdbClient,
    mode::{load_form, print_messages},
};
use anyhow::{self as ah, Context as _, format_err as err};
use pbdl_conf::Config;
use pbdl_util::NoUrlError;
use std::path::Path;
use tokio::io::{AsyncWriteExt as _, stdout};

pub async fn run_mode_download(
    client: &PbdbClient,
    conf: &Config,
    form: &Path,
    output: Option<&Path>,
    yes: bool,
) -> ah::Result<()> {
    let session = load_form(client, conf, form).await?;
    let query = session.compiled();
    print_messages(query);

    let Some(url) = query.url() else {
        eprintln!("{}", query.output);
        return Err(NoUrlError.into());
    };
    if query.requires_confirmation && !yes {
        log::info!("Refusing to download all records without confirmation.");
        return Err(err!(
            "The query selects all records of the data service. \
            Add a filter, set a limit or pass --yes to download anyway."
        ));
    }

    let data = client.download(url).await?;
    match output {
        Some(path) => {
            tokio::fs::write(path, &data)
                .await
                .with_context(|| format!("Write {}", path.display()))?;
            log::info!("Wrote {} bytes to {}", data.len(), path.display());
        }
        None => {
            let mut out = stdout();
            out.write_all(&data).await.context("Write to stdout")?;
            out.flush().await.context("Flush stdout")?;
        }
    }
    Ok(())
}

// vim: ts=4 sw=4 expandtab
