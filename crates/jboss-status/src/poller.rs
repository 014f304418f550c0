// Copyright 2026 jboss-status Contributors
// SPDX-License-Identifier: Apache-2.0

//! The polling run loop.
//!
//! A [`Poller`] owns the accumulated [`ResultMapping`] for the whole run.
//! Each iteration visits every target in order (fetch, normalize, extract),
//! then sleeps. The first failure ends the run and hands back whatever had
//! been accumulated so the caller can still print it.

use std::io::Write;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info, trace};

use crate::acquisition::{normalize, StatusSource};
use crate::cli::output::timestamp;
use crate::config::PollConfig;
use crate::error::{Result, Stage, StatusError};
use crate::extraction::{extract_lines, PassStats};
use crate::mapping::ResultMapping;
use crate::report::Report;

/// A run that ended early.
#[derive(Debug)]
pub struct PollAbort {
    /// What went wrong.
    pub error: StatusError,
    /// URL being polled when it went wrong.
    pub url: String,
    /// Whether any poll had completed before the failure.
    pub had_results: bool,
    /// Everything accumulated up to the failure.
    pub mapping: ResultMapping,
}

impl PollAbort {
    pub fn stage(&self) -> Stage {
        self.error.stage()
    }
}

/// Drives polls against a [`StatusSource`] and accumulates the results.
pub struct Poller<S> {
    config: PollConfig,
    source: S,
    mapping: ResultMapping,
    completed_polls: usize,
}

impl<S: StatusSource> Poller<S> {
    pub fn new(config: PollConfig, source: S) -> Self {
        Self {
            config,
            source,
            mapping: ResultMapping::new(),
            completed_polls: 0,
        }
    }

    pub fn config(&self) -> &PollConfig {
        &self.config
    }

    pub fn mapping(&self) -> &ResultMapping {
        &self.mapping
    }

    /// Number of polls that made it through every stage.
    pub fn completed_polls(&self) -> usize {
        self.completed_polls
    }

    /// Fetch, normalize and extract one status page into the mapping.
    pub async fn poll_once(&mut self, url: &str) -> Result<PassStats> {
        let body = self.source.fetch(url).await?;
        if self.config.verbosity.dump_raw_pages() {
            trace!(url, body = %body, "raw status page");
        }

        let lines = normalize(&body)?;
        debug!(url, lines = lines.len(), "normalized status page");

        let stats = extract_lines(&mut self.mapping, &lines)?;
        self.completed_polls += 1;
        info!(
            url,
            servers = stats.new_servers,
            clients = stats.new_clients,
            domains = stats.new_domains,
            uris = stats.new_uris,
            "poll complete"
        );
        Ok(stats)
    }

    /// Poll every target until the configured run time has elapsed.
    ///
    /// Status lines and per-poll debug output go to `out`; failing to write
    /// them aborts the run like any other poll failure.
    pub async fn run<W: Write>(
        mut self,
        out: &mut W,
    ) -> std::result::Result<ResultMapping, PollAbort> {
        let urls = self.config.target_urls();
        let deadline = deadline_after(Instant::now(), self.config.run_duration());

        while Instant::now() < deadline {
            for url in &urls {
                let polled = self.poll_target(url, out).await;
                if let Err(error) = polled {
                    return Err(PollAbort {
                        error,
                        url: url.clone(),
                        had_results: self.completed_polls > 0,
                        mapping: self.mapping,
                    });
                }
            }
            tokio::time::sleep(self.config.delay()).await;
        }

        Ok(self.mapping)
    }

    async fn poll_target<W: Write>(&mut self, url: &str, out: &mut W) -> Result<()> {
        if !self.config.quiet {
            writeln!(out, "Processing: {url} at {}", timestamp())?;
        }

        self.poll_once(url).await?;

        if self.config.verbosity.report_each_poll() {
            write!(out, "{}", Report(&self.mapping))?;
        }
        if self.config.verbosity.dump_each_poll() {
            let json = serde_json::to_string_pretty(&self.mapping)
                .map_err(|e| StatusError::Output(e.into()))?;
            writeln!(out, "{json}")?;
        }
        Ok(())
    }
}

/// `start + run_for`, clamped to a far-future instant on overflow.
fn deadline_after(start: Instant, run_for: Duration) -> Instant {
    start
        .checked_add(run_for)
        .unwrap_or_else(|| start + FAR_FUTURE)
}

/// Roughly thirty years; longer than any process will run.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);
