// Copyright 2026 jboss-status Contributors
// SPDX-License-Identifier: Apache-2.0

//! Getting status pages and turning them into lines.

pub mod http_client;
pub mod normalizer;

use async_trait::async_trait;

use crate::error::Result;

pub use http_client::HttpClient;
pub use normalizer::normalize;

/// Something that can hand back the body of a status page.
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// Fetch the page at `url` as text.
    async fn fetch(&self, url: &str) -> Result<String>;
}
