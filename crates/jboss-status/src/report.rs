// Copyright 2026 jboss-status Contributors
// SPDX-License-Identifier: Apache-2.0

//! Human-readable rendering of the accumulated mapping.

use std::fmt;

use crate::mapping::ResultMapping;

/// Trailing note explaining the `?` placeholders.
pub const PLACEHOLDER_NOTE: &str = "NOTE: the question marks (?) are normal and expected data.";

/// Nested text report of a [`ResultMapping`].
pub struct Report<'a>(pub &'a ResultMapping);

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f)?;
        for (key, server) in self.0.servers() {
            writeln!(f, "Internal Call Server: {key} at IP Address: {}", server.ip)?;
            for (client, entry) in &server.clients {
                writeln!(f, "    Query from client: {client}")?;
                for (domain, uris) in &entry.domains {
                    writeln!(f, "        with the following virtual domain names: {domain}")?;
                    for uri in &uris.uris {
                        writeln!(f, "            for the following requests: {uri}")?;
                    }
                }
            }
        }
        writeln!(f, "{PLACEHOLDER_NOTE}")
    }
}

/// Render the report to a string.
pub fn render(mapping: &ResultMapping) -> String {
    Report(mapping).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_mapping_renders_only_note() {
        let out = render(&ResultMapping::new());
        assert_eq!(out, format!("\n\n{PLACEHOLDER_NOTE}\n"));
        assert!(!out.contains("Internal Call Server"));
    }

    #[test]
    fn test_nested_layout() {
        let mut mapping = ResultMapping::new();
        mapping.register_server("http://localhost:8080", "127.0.0.1");
        let domains = mapping
            .server_mut("http://localhost:8080")
            .unwrap()
            .client_entry("10.0.0.1");
        domains.domain_entry("www.example.com").push_unique("GET / HTTP/1.1");
        domains.domain_entry("www.example.com").push_unique("?");
        mapping.register_server("http://other:8080", "127.0.0.2");

        let expected = "\n\n\
Internal Call Server: http://localhost:8080 at IP Address: 127.0.0.1
    Query from client: 10.0.0.1
        with the following virtual domain names: www.example.com
            for the following requests: GET / HTTP/1.1
            for the following requests: ?
Internal Call Server: http://other:8080 at IP Address: 127.0.0.2
NOTE: the question marks (?) are normal and expected data.
";
        assert_eq!(render(&mapping), expected);
    }
}
