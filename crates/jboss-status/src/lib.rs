// Copyright 2026 jboss-status Contributors
// SPDX-License-Identifier: Apache-2.0

//! jboss-status library: poll JBoss/mod_jk status pages and map
//! load-balanced servers to client IPs, virtual hosts and request URIs.
//!
//! The pipeline per poll is fetch ([`acquisition::StatusSource`]) →
//! normalize ([`acquisition::normalize`]) → extract
//! ([`extraction::extract_lines`]) into a long-lived
//! [`mapping::ResultMapping`] owned by a [`poller::Poller`].

pub mod acquisition;
pub mod cli;
pub mod config;
pub mod error;
pub mod extraction;
pub mod mapping;
pub mod poller;
pub mod report;

pub use error::{Result, StatusError};
pub use mapping::ResultMapping;
