// Copyright 2026 jboss-status Contributors
// SPDX-License-Identifier: Apache-2.0

//! The accumulated server → client → domain → URI mapping.
//!
//! Every level keeps first-insertion order, so reports list servers, clients
//! and domains in the order the status pages revealed them. The mapping is
//! only ever grown: entries are created at most once and URIs are appended
//! without duplicates.

use indexmap::IndexMap;
use serde::Serialize;

/// Everything learned from the status pages polled so far, keyed by the
/// composed server URL (`proto://label:port`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResultMapping {
    servers: IndexMap<String, ServerEntry>,
}

/// One backend server behind the load balancer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ServerEntry {
    /// Backend IP captured from the first marker line for this server.
    pub ip: String,
    /// Requesting client IPs seen while this server was current.
    pub clients: IndexMap<String, ClientEntry>,
}

/// Virtual hosts requested by one client IP.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ClientEntry {
    pub domains: IndexMap<String, DomainEntry>,
}

/// Ordered, duplicate-free request URIs for one virtual host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DomainEntry {
    pub uris: Vec<String>,
}

impl ResultMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }

    /// Number of distinct servers.
    pub fn len(&self) -> usize {
        self.servers.len()
    }

    /// Iterate servers in first-seen order.
    pub fn servers(&self) -> impl Iterator<Item = (&str, &ServerEntry)> {
        self.servers.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn server(&self, key: &str) -> Option<&ServerEntry> {
        self.servers.get(key)
    }

    pub fn server_mut(&mut self, key: &str) -> Option<&mut ServerEntry> {
        self.servers.get_mut(key)
    }

    /// Insert a server unless its key is already known.
    ///
    /// Returns `true` when a new entry was created. An existing entry keeps
    /// its original IP.
    pub fn register_server(&mut self, key: &str, ip: &str) -> bool {
        if self.servers.contains_key(key) {
            return false;
        }
        self.servers.insert(
            key.to_string(),
            ServerEntry {
                ip: ip.to_string(),
                clients: IndexMap::new(),
            },
        );
        true
    }

    /// URIs recorded for a `(server, client, domain)` triple.
    pub fn uris(&self, server: &str, client: &str, domain: &str) -> Option<&[String]> {
        self.servers
            .get(server)?
            .clients
            .get(client)?
            .domains
            .get(domain)
            .map(|d| d.uris.as_slice())
    }

    /// Total number of recorded URIs across every server.
    pub fn uri_count(&self) -> usize {
        self.servers
            .values()
            .flat_map(|s| s.clients.values())
            .flat_map(|c| c.domains.values())
            .map(|d| d.uris.len())
            .sum()
    }
}

impl ServerEntry {
    /// Get the entry for a client IP, creating an empty one if absent.
    pub fn client_entry(&mut self, client: &str) -> &mut ClientEntry {
        self.clients.entry(client.to_string()).or_default()
    }
}

impl ClientEntry {
    /// Get the entry for a domain, creating an empty URI list if absent.
    pub fn domain_entry(&mut self, domain: &str) -> &mut DomainEntry {
        self.domains.entry(domain.to_string()).or_default()
    }
}

impl DomainEntry {
    /// Append `uri` unless an identical string is already present.
    pub fn push_unique(&mut self, uri: &str) -> bool {
        if self.uris.iter().any(|u| u == uri) {
            return false;
        }
        self.uris.push(uri.to_string());
        true
    }
}
