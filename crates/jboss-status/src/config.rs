// Copyright 2026 jboss-status Contributors
// SPDX-License-Identifier: Apache-2.0

//! Run configuration for the poller.

use std::time::Duration;

/// Scheme used to reach the status pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Protocol {
    #[default]
    Https,
    Http,
}

impl Protocol {
    pub fn scheme(self) -> &'static str {
        match self {
            Protocol::Https => "https",
            Protocol::Http => "http",
        }
    }
}

/// Which status report to request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportMode {
    #[default]
    Normal,
    /// `?full=true`. The full page contains unclosed anchors and fails to
    /// normalize; it is kept selectable for servers that render it cleanly.
    Full,
}

impl ReportMode {
    pub fn path(self) -> &'static str {
        match self {
            ReportMode::Normal => "/status",
            ReportMode::Full => "/status?full=true",
        }
    }
}

/// Debug level selected with `-D`, `-DD` or `-DDD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Verbosity(pub u8);

impl Verbosity {
    /// Print the accumulated report after every poll.
    pub fn report_each_poll(self) -> bool {
        self.0 >= 1
    }

    /// Dump the mapping as JSON after every poll.
    pub fn dump_each_poll(self) -> bool {
        self.0 >= 2
    }

    /// Log raw page bodies.
    pub fn dump_raw_pages(self) -> bool {
        self.0 >= 3
    }

    /// Default `tracing` filter for this level; `RUST_LOG` overrides it.
    pub fn filter_directive(self) -> &'static str {
        match self.0 {
            0 => "jboss_status=warn",
            1 => "jboss_status=info",
            2 => "jboss_status=debug",
            _ => "jboss_status=trace",
        }
    }
}

/// Everything a run needs to know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollConfig {
    /// Hosts or IP addresses to poll, in order.
    pub targets: Vec<String>,
    /// Total run time in minutes.
    pub minutes: u64,
    /// Pause between iterations in seconds.
    pub delay_secs: u64,
    pub protocol: Protocol,
    pub mode: ReportMode,
    /// Suppress per-poll status lines.
    pub quiet: bool,
    pub verbosity: Verbosity,
    /// Per-request HTTP timeout.
    pub timeout_ms: u64,
}

pub const DEFAULT_MINUTES: u64 = 1;
pub const DEFAULT_DELAY_SECS: u64 = 2;
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

impl PollConfig {
    /// A config with default settings for the given targets.
    pub fn new(targets: Vec<String>) -> Self {
        Self {
            targets,
            minutes: DEFAULT_MINUTES,
            delay_secs: DEFAULT_DELAY_SECS,
            protocol: Protocol::default(),
            mode: ReportMode::default(),
            quiet: false,
            verbosity: Verbosity::default(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Status page URL for every target.
    pub fn target_urls(&self) -> Vec<String> {
        self.targets
            .iter()
            .map(|host| format!("{}://{host}{}", self.protocol.scheme(), self.mode.path()))
            .collect()
    }

    pub fn run_duration(&self) -> Duration {
        Duration::from_secs(self.minutes.saturating_mul(60))
    }

    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.delay_secs)
    }
}

/// Split a comma-separated target list, dropping empty entries.
pub fn parse_targets(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
