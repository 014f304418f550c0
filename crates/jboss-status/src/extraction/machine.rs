// Copyright 2026 jboss-status Contributors
// SPDX-License-Identifier: Apache-2.0

//! Positional state machine that rebuilds server → client → domain → URI
//! associations from pretty-printed status page lines.
//!
//! The status page renders each request as a table row whose cells sit at a
//! fixed nesting depth. Once a client IP cell is seen, the virtual host is
//! always three lines further down and the request URI three lines after
//! that. The machine counts lines instead of interpreting tag names; the
//! named states make those offsets explicit.

use tracing::{debug, warn};

use super::classifier::{classify, tail_token, LineClass};
use crate::error::Result;
use crate::mapping::ResultMapping;

/// Position relative to the most recent client IP line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    /// Looking for a server marker or a client IP.
    AwaitMarkerOrIp,
    /// One line past the client IP.
    AwaitDomainOffset1,
    /// Two lines past the client IP.
    AwaitDomainOffset2,
    /// The next line is the virtual host.
    AwaitDomainOffset3,
    /// One line past the virtual host.
    AwaitUriOffset1,
    /// Two lines past the virtual host.
    AwaitUriOffset2,
    /// The next line is the request URI.
    AwaitUriOffset3,
}

impl WindowState {
    /// Lines consumed since the client IP line (0 outside a window).
    pub fn offset(self) -> u8 {
        match self {
            WindowState::AwaitMarkerOrIp => 0,
            WindowState::AwaitDomainOffset1 => 1,
            WindowState::AwaitDomainOffset2 => 2,
            WindowState::AwaitDomainOffset3 => 3,
            WindowState::AwaitUriOffset1 => 4,
            WindowState::AwaitUriOffset2 => 5,
            WindowState::AwaitUriOffset3 => 6,
        }
    }

    fn advance(self) -> Self {
        match self {
            WindowState::AwaitMarkerOrIp => WindowState::AwaitDomainOffset1,
            WindowState::AwaitDomainOffset1 => WindowState::AwaitDomainOffset2,
            WindowState::AwaitDomainOffset2 => WindowState::AwaitDomainOffset3,
            WindowState::AwaitDomainOffset3 => WindowState::AwaitUriOffset1,
            WindowState::AwaitUriOffset1 => WindowState::AwaitUriOffset2,
            WindowState::AwaitUriOffset2 => WindowState::AwaitUriOffset3,
            WindowState::AwaitUriOffset3 => WindowState::AwaitMarkerOrIp,
        }
    }
}

/// Counters describing what one pass added to the mapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassStats {
    pub lines: usize,
    pub new_servers: usize,
    pub new_clients: usize,
    pub new_domains: usize,
    pub new_uris: usize,
    /// Client IP lines seen before any server marker in the pass.
    pub orphan_ips: usize,
}

/// One pass over one status page.
///
/// Positional state and the current server/client/domain context live only
/// as long as the pass; the mapping it writes into outlives it.
pub struct Extractor<'m> {
    mapping: &'m mut ResultMapping,
    state: WindowState,
    current_server: Option<String>,
    current_client: Option<String>,
    current_domain: Option<String>,
    stats: PassStats,
}

impl<'m> Extractor<'m> {
    pub fn new(mapping: &'m mut ResultMapping) -> Self {
        Self {
            mapping,
            state: WindowState::AwaitMarkerOrIp,
            current_server: None,
            current_client: None,
            current_domain: None,
            stats: PassStats::default(),
        }
    }

    pub fn state(&self) -> WindowState {
        self.state
    }

    pub fn current_server(&self) -> Option<&str> {
        self.current_server.as_deref()
    }

    /// Consume one line.
    pub fn feed(&mut self, line: &str) -> Result<()> {
        self.stats.lines += 1;
        match self.state {
            WindowState::AwaitMarkerOrIp => self.scan(line),
            WindowState::AwaitDomainOffset3 => {
                self.record_domain(tail_token(line));
                self.state = self.state.advance();
                Ok(())
            }
            WindowState::AwaitUriOffset3 => {
                self.record_uri(tail_token(line));
                self.current_client = None;
                self.current_domain = None;
                self.state = WindowState::AwaitMarkerOrIp;
                Ok(())
            }
            _ => {
                self.state = self.state.advance();
                Ok(())
            }
        }
    }

    /// Finish the pass and report what it added.
    pub fn finish(self) -> PassStats {
        self.stats
    }

    fn scan(&mut self, line: &str) -> Result<()> {
        match classify(line)? {
            LineClass::Marker(marker) => {
                let key = marker.key();
                debug!(marker = tail_token(line), server = %key, ip = %marker.ip, "server marker");
                if self.mapping.register_server(&key, &marker.ip) {
                    self.stats.new_servers += 1;
                }
                self.current_server = Some(key);
            }
            LineClass::ClientIp(ip) => {
                let Some(server) = self.current_server.as_deref() else {
                    warn!(client = ip, "client IP before any server marker, skipping");
                    self.stats.orphan_ips += 1;
                    return Ok(());
                };
                debug!(client = ip, server, "client IP");
                if let Some(entry) = self.mapping.server_mut(server) {
                    if !entry.clients.contains_key(ip) {
                        self.stats.new_clients += 1;
                    }
                    entry.client_entry(ip);
                }
                self.current_client = Some(ip.to_string());
                self.state = WindowState::AwaitDomainOffset1;
            }
            LineClass::Other => {}
        }
        Ok(())
    }

    fn record_domain(&mut self, domain: &str) {
        debug!(domain, "virtual host");
        if let (Some(server), Some(client)) = (&self.current_server, &self.current_client) {
            if let Some(entry) = self.mapping.server_mut(server) {
                let client = entry.client_entry(client);
                if !client.domains.contains_key(domain) {
                    self.stats.new_domains += 1;
                }
                client.domain_entry(domain);
            }
        }
        self.current_domain = Some(domain.to_string());
    }

    fn record_uri(&mut self, uri: &str) {
        debug!(uri, "request URI");
        let (Some(server), Some(client), Some(domain)) =
            (&self.current_server, &self.current_client, &self.current_domain)
        else {
            return;
        };
        if let Some(entry) = self.mapping.server_mut(server) {
            if entry.client_entry(client).domain_entry(domain).push_unique(uri) {
                self.stats.new_uris += 1;
            }
        }
    }
}

/// Run one pass over `lines`, accumulating into `mapping`.
pub fn extract_lines<I, S>(mapping: &mut ResultMapping, lines: I) -> Result<PassStats>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut extractor = Extractor::new(mapping);
    for line in lines {
        extractor.feed(line.as_ref())?;
    }
    Ok(extractor.finish())
}
