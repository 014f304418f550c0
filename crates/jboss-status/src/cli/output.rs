// Copyright 2026 jboss-status Contributors
// SPDX-License-Identifier: Apache-2.0

//! Console text shared by the poll command: banners, timestamps and the
//! diagnostic printed when a run aborts.

use std::io::{self, Write};

use chrono::Local;

use crate::poller::PollAbort;
use crate::report::Report;

/// Local time in C `asctime` layout, e.g. `Tue Jul 23 14:05:09 2013`.
pub fn timestamp() -> String {
    Local::now().format("%a %b %e %H:%M:%S %Y").to_string()
}

pub fn write_start_banner<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "Starting JBoss Status Queries at {}.", timestamp())?;
    writeln!(out, "Brought to you by InGuardians, Inc.")
}

pub fn write_completed_banner<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "\nJBoss Status Queries completed at {}.\n", timestamp())
}

/// Explain an aborted run and print whatever was gathered before it.
pub fn write_abort<W: Write>(out: &mut W, abort: &PollAbort) -> io::Result<()> {
    writeln!(out, "{}\n", abort.stage().headline())?;
    if abort.had_results {
        write!(out, "{}", Report(&abort.mapping))
    } else {
        writeln!(out, "Could not print results.\n")?;
        writeln!(out, "\nJBoss Status Queries failed at {}.\n", timestamp())
    }
}
