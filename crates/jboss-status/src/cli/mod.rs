// Copyright 2026 jboss-status Contributors
// SPDX-License-Identifier: Apache-2.0

//! Command implementations for the `jboss-status` binary.

pub mod output;
pub mod poll_cmd;
