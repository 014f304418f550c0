// Copyright 2026 jboss-status Contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use clap::{ArgAction, CommandFactory, Parser};

use jboss_status::cli;
use jboss_status::config::{
    parse_targets, PollConfig, Protocol, ReportMode, Verbosity, DEFAULT_DELAY_SECS,
    DEFAULT_MINUTES, DEFAULT_TIMEOUT_MS,
};

#[derive(Parser)]
#[command(
    name = "jboss-status",
    about = "Poll JBoss status pages for client IPs, virtual hosts and requests",
    version,
    after_help = "Example: jboss-status -t lb1.example.com,10.1.1.20 -c 5 -d 10 -q"
)]
struct Cli {
    /// Debugging: -D prints results after every poll, -DD adds extraction
    /// details, -DDD adds raw page bodies
    #[arg(short = 'D', action = ArgAction::Count)]
    debug: u8,

    /// Target list: one host/IP or a comma separated list (no spaces)
    #[arg(short = 't', value_name = "TARGETS")]
    targets: Option<String>,

    /// Number of minutes to run
    #[arg(short = 'c', value_name = "MINUTES", default_value_t = DEFAULT_MINUTES)]
    minutes: u64,

    /// Seconds of delay between query runs
    #[arg(short = 'd', value_name = "SECONDS", default_value_t = DEFAULT_DELAY_SECS)]
    delay: u64,

    /// Use full status (currently broken: the page has unclosed anchor tags)
    #[arg(short = 'f')]
    full: bool,

    /// Use HTTP instead of HTTPS
    #[arg(short = 'p')]
    http: bool,

    /// Suppress per-poll status messages
    #[arg(short = 'q', long)]
    quiet: bool,

    /// Print the final results as JSON
    #[arg(long)]
    json: bool,

    /// Per-request timeout in milliseconds
    #[arg(long, value_name = "MS", default_value_t = DEFAULT_TIMEOUT_MS)]
    timeout: u64,
}

impl Cli {
    fn into_config(self, targets: Vec<String>) -> PollConfig {
        PollConfig {
            targets,
            minutes: self.minutes,
            delay_secs: self.delay,
            protocol: if self.http { Protocol::Http } else { Protocol::Https },
            mode: if self.full { ReportMode::Full } else { ReportMode::Normal },
            quiet: self.quiet,
            verbosity: Verbosity(self.debug),
            timeout_ms: self.timeout,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let targets = cli.targets.as_deref().map(parse_targets).unwrap_or_default();
    if targets.is_empty() {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    }

    let verbosity = Verbosity(cli.debug);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(verbosity.filter_directive()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let json = cli.json;
    let result = cli::poll_cmd::run(cli.into_config(targets), json).await;

    if let Err(e) = &result {
        eprintln!("  Error: {e:#}");
        std::process::exit(1);
    }

    result
}
