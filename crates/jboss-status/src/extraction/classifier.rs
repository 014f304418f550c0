// Copyright 2026 jboss-status Contributors
// SPDX-License-Identifier: Apache-2.0

//! Classify a single pretty-printed status page line.
//!
//! Only the tail token (text after the last tab) is inspected. A line is
//! either a server marker, a client IP, or something the state machine
//! merely counts.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Result, StatusError};

/// URL-encoded `/` separating the `proto-label` and `ip-port` halves of a
/// server marker.
pub const SLASH_ENCODED: &str = "%2F";

/// A backend server decoded from a marker such as
/// `ajp-node1%2F10.0.0.5-8009`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerMarker {
    pub protocol: String,
    pub label: String,
    pub ip: String,
    pub port: String,
}

impl ServerMarker {
    /// Identity key of the server: `proto://label:port`.
    pub fn key(&self) -> String {
        format!("{}://{}:{}", self.protocol, self.label, self.port)
    }
}

/// What a line means to the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass<'a> {
    /// A new backend server is being described.
    Marker(ServerMarker),
    /// A requesting client's IPv4 address.
    ClientIp(&'a str),
    /// Anything else.
    Other,
}

/// The text after the last tab, or the whole line if it has none.
pub fn tail_token(line: &str) -> &str {
    match line.rfind('\t') {
        Some(idx) => &line[idx + 1..],
        None => line,
    }
}

fn dotted_quad() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^(([0-9]|[1-9][0-9]|1[0-9]{2}|2[0-4][0-9]|25[0-5])\.){3}([0-9]|[1-9][0-9]|1[0-9]{2}|2[0-4][0-9]|25[0-5])$",
        )
        .expect("dotted quad regex is valid")
    })
}

/// Whether `token` is a strict IPv4 dotted quad (octets 0-255, no leading
/// zeros).
pub fn is_dotted_quad(token: &str) -> bool {
    dotted_quad().is_match(token)
}

/// Split on `-` into exactly two fields.
fn split_pair(s: &str) -> Option<(&str, &str)> {
    let mut parts = s.split('-');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(a), Some(b), None) => Some((a, b)),
        _ => None,
    }
}

/// Decode a marker token. The caller has already checked it contains
/// [`SLASH_ENCODED`].
pub fn parse_marker(token: &str) -> Result<ServerMarker> {
    let malformed = || StatusError::MalformedMarker(token.to_string());

    // Only the first two `%2F` segments count; anything after a second
    // separator is dropped.
    let mut segments = token.split(SLASH_ENCODED);
    let head = segments.next().ok_or_else(malformed)?;
    let tail = segments.next().ok_or_else(malformed)?;
    let (protocol, label) = split_pair(head).ok_or_else(malformed)?;
    let (ip, port) = split_pair(tail).ok_or_else(malformed)?;

    Ok(ServerMarker {
        protocol: protocol.to_string(),
        label: label.to_string(),
        ip: ip.to_string(),
        port: port.to_string(),
    })
}

/// Classify one line. The marker check takes precedence over the IP check.
pub fn classify(line: &str) -> Result<LineClass<'_>> {
    let token = tail_token(line);
    if token.contains(SLASH_ENCODED) {
        return parse_marker(token).map(LineClass::Marker);
    }
    if is_dotted_quad(token) {
        return Ok(LineClass::ClientIp(token));
    }
    Ok(LineClass::Other)
}
