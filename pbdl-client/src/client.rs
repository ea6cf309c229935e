// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (C) 2025 Michael Büsch <m@bues.ch>

use anyhow::{self as ah, Context as _, format_err as err};
use pbdl_conf::Config;
use pbdl_form::{
    ApiResponse, ConfigRecord, IntervalRecord, LookupKind, LookupOutcome, LookupRequest,
    ReferenceData,
    fields::{strata::stratum_outcome, taxon::taxon_outcome},
};
use pbdl_util::InitError;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio::time::sleep;

const AUTO_PATH: &str = "combined/auto.json?show=countries";
const CONFIG_PATH: &str = "config.json?show=all&limit=all";
const INTERVALS_PATH: &str = "intervals/list.json?all_records&limit=all";
const RETRIES: usize = 3;

/// HTTP access to the data service.
pub struct PbdbClient {
    client: Client,
    base_url: String,
}

impl PbdbClient {
    pub fn new(conf: &Config) -> ah::Result<Self> {
        let client = Client::builder()
            .user_agent(conf.user_agent())
            .referer(false)
            .timeout(conf.timeout())
            .tcp_nodelay(true)
            .build()
            .context("Build HTTP client")?;
        Ok(Self {
            client,
            base_url: conf.base_url(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `url` with the additional `query` parameters and return the body.
    ///
    /// The data service reports bad parameters with status 400
    /// and a JSON body. That body is returned if `bad_request_body` is set.
    async fn get(
        &self,
        url: &str,
        query: &[(&str, &str)],
        bad_request_body: bool,
    ) -> ah::Result<Vec<u8>> {
        for _ in 0..RETRIES {
            log::debug!("GET {url} {query:?}");
            let mut req = self.client.get(url);
            if !query.is_empty() {
                req = req.query(query);
            }
            let resp = req
                .header("Cache-Control", "no-store")
                .send()
                .await
                .context("Data service send")?;

            match resp.status() {
                StatusCode::BAD_REQUEST if !bad_request_body => {
                    return Err(err!("Data service response: {}", StatusCode::BAD_REQUEST));
                }
                StatusCode::OK | StatusCode::BAD_REQUEST => {
                    let data = resp.bytes().await.context("Data service get body")?;
                    return Ok(data.to_vec());
                }
                StatusCode::BAD_GATEWAY
                | StatusCode::GATEWAY_TIMEOUT
                | StatusCode::SERVICE_UNAVAILABLE
                | StatusCode::TOO_MANY_REQUESTS => {
                    // Slow retry.
                    sleep(Duration::from_millis(500)).await;
                }
                status => {
                    return Err(err!("Data service response: {status}"));
                }
            }
        }
        Err(err!("Data service not available"))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> ah::Result<T> {
        let url = format!("{}{path}", self.base_url);
        let data = self.get(&url, query, true).await?;
        serde_json::from_slice(&data).with_context(|| format!("Decode response of {path}"))
    }

    /// Fetch the interval, continent and country tables.
    ///
    /// Both requests run concurrently. If either one fails, the form is unusable.
    pub async fn reference_data(&self) -> ah::Result<ReferenceData> {
        let (config, intervals) = tokio::try_join!(
            self.get_json::<ApiResponse<ConfigRecord>>(CONFIG_PATH, &[]),
            self.get_json::<ApiResponse<IntervalRecord>>(INTERVALS_PATH, &[]),
        )
        .context(InitError)?;
        let refdata = ReferenceData::from_responses(config, intervals).context(InitError)?;
        log::info!("Reference data loaded from {}", self.base_url);
        Ok(refdata)
    }

    /// Perform a name check.
    ///
    /// Transport and decoding problems become `LookupOutcome::Failed`.
    pub async fn lookup(&self, req: &LookupRequest) -> LookupOutcome {
        let resp = self
            .get_json::<ApiResponse<serde_json::Value>>(req.path(), &req.query())
            .await;
        match resp {
            Ok(resp) => match req.kind {
                LookupKind::Taxon => taxon_outcome(&resp),
                LookupKind::Stratum => stratum_outcome(&resp),
            },
            Err(e) => {
                log::warn!("Lookup of '{}' failed: {e:#}", req.key);
                LookupOutcome::Failed(format!("{e}"))
            }
        }
    }

    /// Autocomplete request.
    ///
    /// `types` is a comma separated list of record kinds, as in `txn,int`.
    pub async fn auto_complete<T: DeserializeOwned>(
        &self,
        name: &str,
        types: &str,
    ) -> ah::Result<ApiResponse<T>> {
        self.get_json(AUTO_PATH, &[("name", name), ("type", types)]).await
    }

    /// Fetch a complete URL.
    pub async fn download(&self, url: &str) -> ah::Result<Vec<u8>> {
        log::info!("Downloading {url}");
        self.get(url, &[], false).await.context("Download")
    }
}

// vim: ts=4 sw=4 expandtab
