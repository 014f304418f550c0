// Copyright 2026 jboss-status Contributors
// SPDX-License-Identifier: Apache-2.0

//! HTTP client wrapping reqwest.
//!
//! One GET per call, no retries. Any transport failure or non-2xx status is
//! a fetch error, which ends the run.

use std::time::Duration;

use async_trait::async_trait;

use super::StatusSource;
use crate::error::{Result, StatusError};

/// HTTP(S) client for status pages.
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    /// Create a client with the given per-request timeout.
    pub fn new(timeout_ms: u64) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(concat!("jboss-status/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl StatusSource for HttpClient {
    async fn fetch(&self, url: &str) -> Result<String> {
        let fail = |reason: String| StatusError::Fetch {
            url: url.to_string(),
            reason,
        };

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| fail(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(fail(format!("HTTP {status}")));
        }

        resp.text().await.map_err(|e| fail(e.to_string()))
    }
}
