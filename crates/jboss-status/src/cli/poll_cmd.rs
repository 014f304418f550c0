// Copyright 2026 jboss-status Contributors
// SPDX-License-Identifier: Apache-2.0

//! `jboss-status -t <targets>`: poll status pages and report the mapping.

use std::io::Write;

use anyhow::{Context, Result};
use tracing::{error, info};

use super::output;
use crate::acquisition::{HttpClient, StatusSource};
use crate::config::PollConfig;
use crate::poller::Poller;
use crate::report::Report;

/// Run the poll loop against live targets and print the final report.
pub async fn run(config: PollConfig, json: bool) -> Result<()> {
    let client = HttpClient::new(config.timeout_ms).context("building HTTP client")?;
    run_with(config, json, client, &mut std::io::stdout()).await
}

/// Run the poll loop over `source`, writing everything to `out`.
///
/// An aborted poll is reported on `out` and still counts as a finished
/// run; only failures outside the loop are returned as errors.
pub async fn run_with<S: StatusSource, W: Write>(
    config: PollConfig,
    json: bool,
    source: S,
    out: &mut W,
) -> Result<()> {
    output::write_start_banner(out)?;

    info!(
        targets = ?config.target_urls(),
        minutes = config.minutes,
        delay_secs = config.delay_secs,
        "starting poll loop"
    );

    match Poller::new(config, source).run(out).await {
        Ok(mapping) => {
            if json {
                serde_json::to_writer_pretty(&mut *out, &mapping)?;
                writeln!(out)?;
            } else {
                write!(out, "{}", Report(&mapping))?;
            }
            output::write_completed_banner(out)?;
        }
        Err(abort) => {
            error!(url = %abort.url, error = %abort.error, "poll loop aborted");
            output::write_abort(out, &abort)?;
        }
    }
    Ok(())
}
