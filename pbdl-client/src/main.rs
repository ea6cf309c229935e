// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (C) 2025 Michael Büsch <m@bues.ch>

#![forbid(unsafe_code)]

mod client;
mod form;
mod mode;

use crate::{
    client::PbdbClient,
    mode::{
        download::run_mode_download,
        suggest::{DEFAULT_TYPES, run_mode_suggest},
        test::run_mode_test,
        url::run_mode_url,
    },
};
use anyhow::{self as ah, Context as _, format_err as err};
use clap::{Parser, Subcommand};
use pbdl_conf::{Config, DEFAULT_CONF_PATH};
use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};
use tokio::runtime;

#[derive(Parser, Debug, Clone)]
struct Opts {
    /// URL of the data service.
    ///
    /// The URL is in the form of:
    /// https://paleobiodb.org/data1.2/
    ///
    /// This overrides the base_url from the configuration file.
    server_url: Option<String>,

    /// Path to the configuration file.
    ///
    /// The built-in defaults are used, if the file does not exist.
    #[arg(long, short = 'C', id = "PATH", default_value = DEFAULT_CONF_PATH)]
    config: String,

    /// Show version information and exit.
    #[arg(long, short = 'v')]
    version: bool,

    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Subcommand, Debug, Clone)]
enum Mode {
    /// Print the download URL for a form file.
    ///
    /// If no URL can be generated, the reason and
    /// all parameter errors are printed instead.
    Url {
        /// The TOML form file.
        #[arg(id = "FORM")]
        form: PathBuf,
    },

    /// Print a test URL for a form file.
    ///
    /// The test URL shows the result as plain text in a browser
    /// and is limited to the first 100 records.
    Test {
        /// The TOML form file.
        #[arg(id = "FORM")]
        form: PathBuf,
    },

    /// Download the records selected by a form file.
    Download {
        /// The TOML form file.
        #[arg(id = "FORM")]
        form: PathBuf,

        /// Write the data to this file instead of stdout.
        #[arg(long, short = 'o', id = "FILE")]
        output: Option<PathBuf>,

        /// Download all records of the data service,
        /// if the form does not contain any filter.
        #[arg(long)]
        yes: bool,
    },

    /// Suggest names of taxa, intervals, strata, collections and references.
    ///
    /// In a list, only the text after the first ',' or ';' is completed.
    Suggest {
        /// The text to complete. At least three characters.
        #[arg(id = "TEXT", required = true)]
        text: Vec<String>,

        /// Comma separated record kinds: int, str, txn, col, ref.
        #[arg(long, short = 't', id = "TYPES", default_value = DEFAULT_TYPES)]
        types: String,
    },
}

fn load_config(opts: &Opts) -> ah::Result<Config> {
    let path = Path::new(&opts.config);
    let mut conf = if path.exists() {
        Config::new_parse_file(path).context("Parse configuration")?
    } else {
        log::debug!("{} not found. Using default configuration.", path.display());
        Config::default()
    };
    if let Some(server_url) = &opts.server_url {
        conf.set_base_url(server_url)?;
    }
    Ok(conf)
}

async fn async_main(opts: Arc<Opts>) -> ah::Result<()> {
    let Some(mode) = &opts.mode else {
        return Err(err!(
            "'pbdl' requires a subcommand but one was not provided. \
            Please run 'pbdl --help' for more information."
        ));
    };

    let conf = load_config(&opts)?;
    let client = PbdbClient::new(&conf).context("Create data service client")?;

    match mode {
        Mode::Url { form } => run_mode_url(&client, &conf, form).await,
        Mode::Test { form } => run_mode_test(&client, &conf, form).await,
        Mode::Download { form, output, yes } => {
            run_mode_download(&client, &conf, form, output.as_deref(), *yes).await
        }
        Mode::Suggest { text, types } => {
            run_mode_suggest(&client, text, types, conf.cache_capacity()).await
        }
    }
}

fn main() -> ah::Result<()> {
    env_logger::init_from_env(
        env_logger::Env::new()
            .filter_or("PBDL_LOG", "info")
            .write_style_or("PBDL_LOG_STYLE", "auto"),
    );

    let opts = Arc::new(Opts::parse());

    if opts.version {
        println!("pbdl version {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    const WORKER_THREADS: usize = 2;
    runtime::Builder::new_multi_thread()
        .thread_keep_alive(Duration::from_millis(5000))
        .max_blocking_threads(WORKER_THREADS * 2)
        .worker_threads(WORKER_THREADS)
        .enable_all()
        .build()
        .context("Tokio runtime builder")?
        .block_on(async_main(opts))
}

// vim: ts=4 sw=4 expandtab
