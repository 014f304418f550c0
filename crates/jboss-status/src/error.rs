// Copyright 2026 jboss-status Contributors
// SPDX-License-Identifier: Apache-2.0

//! Error types for the status poller.

use thiserror::Error;

/// All errors a single poll can produce.
#[derive(Error, Debug)]
pub enum StatusError {
    /// The status page could not be retrieved.
    #[error("fetch failed for {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// The page was not well-formed markup after normalization.
    #[error("status page is not well-formed: {0}")]
    Parse(String),

    /// A line carried the encoded-slash marker but not the
    /// `proto-label%2Fip-port` layout.
    #[error("malformed server marker: {0:?}")]
    MalformedMarker(String),

    /// Status lines or per-poll output could not be written.
    #[error("writing output failed: {0}")]
    Output(#[from] std::io::Error),
}

impl StatusError {
    /// The pipeline stage this error aborted, as reported to the user.
    pub fn stage(&self) -> Stage {
        match self {
            StatusError::Fetch { .. } => Stage::Fetch,
            StatusError::Parse(_) => Stage::Normalize,
            StatusError::MalformedMarker(_) => Stage::Extract,
            StatusError::Output(_) => Stage::Output,
        }
    }
}

impl From<quick_xml::Error> for StatusError {
    fn from(e: quick_xml::Error) -> Self {
        StatusError::Parse(e.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for StatusError {
    fn from(e: quick_xml::events::attributes::AttrError) -> Self {
        StatusError::Parse(e.to_string())
    }
}

/// Stage of the fetch → normalize → extract pipeline, plus console output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetch,
    Normalize,
    Extract,
    Output,
}

impl Stage {
    /// Headline printed when a run aborts in this stage.
    pub fn headline(self) -> &'static str {
        match self {
            Stage::Fetch => "Grabbing URL failed. Check usage.",
            Stage::Normalize => "Parsing input from status page failed",
            Stage::Extract => "Processing data input failed",
            Stage::Output => "Writing results failed",
        }
    }
}

/// Result type alias for status poller operations.
pub type Result<T> = std::result::Result<T, StatusError>;
