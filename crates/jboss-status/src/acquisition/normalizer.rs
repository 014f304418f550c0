// Copyright 2026 jboss-status Contributors
// SPDX-License-Identifier: Apache-2.0

//! Turn a raw status page into tab-indented lines.
//!
//! The page is HTML, but after two textual fixups it is usually well-formed
//! XML. It is then re-rendered with one node per line and one tab per
//! nesting level, which gives the state machine its fixed line offsets.
//! Malformed markup (the full status page's unclosed anchors, for one) is
//! rejected rather than repaired.

use quick_xml::escape::{escape, partial_escape};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{Result, StatusError};

const XML_DECLARATION: &str = "<?xml version=\"1.0\" ?>";

/// Apply the textual fixups that make the status page parse as XML.
pub fn prepare(raw: &str) -> String {
    raw.replace("<br>", "<br />").replace(" nowrap", "")
}

/// Fix up, pretty-print and split a status page into lines.
pub fn normalize(raw: &str) -> Result<Vec<String>> {
    let pretty = pretty_print(&prepare(raw))?;
    Ok(pretty.split('\n').map(str::to_string).collect())
}

/// Re-render well-formed XML with one node per line.
pub fn pretty_print(xml: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut out = Printer::default();
    out.line(0, XML_DECLARATION);

    // Names of elements still open, outermost first.
    let mut open: Vec<String> = Vec::new();
    // Rendered start tag of the innermost element, held back until we know
    // whether it has children.
    let mut pending: Option<String> = None;
    let mut root_done = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                check_root(&open, root_done)?;
                flush(&mut out, &mut pending, open.len());
                pending = Some(render_start(&e)?);
                open.push(String::from_utf8_lossy(e.name().as_ref()).into_owned());
            }
            Event::End(e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                match open.pop() {
                    Some(expected) if expected == name => {}
                    Some(expected) => {
                        return Err(StatusError::Parse(format!(
                            "expected </{expected}>, found </{name}>"
                        )))
                    }
                    None => return Err(StatusError::Parse(format!("unmatched </{name}>"))),
                }
                let depth = open.len();
                match pending.take() {
                    Some(tag) => out.line(depth, &format!("<{tag}/>")),
                    None => out.line(depth, &format!("</{name}>")),
                }
                root_done = open.is_empty();
            }
            Event::Empty(e) => {
                check_root(&open, root_done)?;
                flush(&mut out, &mut pending, open.len());
                out.line(open.len(), &format!("<{}/>", render_start(&e)?));
                root_done = open.is_empty();
            }
            Event::Text(e) => {
                let text = e.unescape()?;
                let text = text.trim();
                if text.is_empty() {
                    continue;
                }
                if open.is_empty() {
                    return Err(StatusError::Parse(format!(
                        "text outside the document element: {text:?}"
                    )));
                }
                flush(&mut out, &mut pending, open.len());
                out.line(open.len(), &partial_escape(text));
            }
            Event::CData(e) => {
                flush(&mut out, &mut pending, open.len());
                let data = String::from_utf8_lossy(&e);
                out.line(open.len(), &format!("<![CDATA[{data}]]>"));
            }
            Event::Comment(e) => {
                flush(&mut out, &mut pending, open.len());
                let body = String::from_utf8_lossy(&e);
                out.line(open.len(), &format!("<!--{body}-->"));
            }
            Event::PI(e) => {
                flush(&mut out, &mut pending, open.len());
                let body = String::from_utf8_lossy(&e);
                out.line(open.len(), &format!("<?{body}?>"));
            }
            Event::DocType(e) => {
                let body = String::from_utf8_lossy(&e);
                out.line(0, &format!("<!DOCTYPE {}>", body.trim()));
            }
            Event::Decl(_) => {}
            Event::Eof => break,
        }
    }

    if let Some(name) = open.last() {
        return Err(StatusError::Parse(format!("unclosed element <{name}>")));
    }
    if !root_done {
        return Err(StatusError::Parse("no document element".to_string()));
    }
    Ok(out.finish())
}

fn check_root(open: &[String], root_done: bool) -> Result<()> {
    if open.is_empty() && root_done {
        return Err(StatusError::Parse(
            "junk after the document element".to_string(),
        ));
    }
    Ok(())
}

/// Write a held-back start tag; the element has children.
fn flush(out: &mut Printer, pending: &mut Option<String>, depth: usize) {
    if let Some(tag) = pending.take() {
        out.line(depth - 1, &format!("<{tag}>"));
    }
}

/// Name plus re-escaped, double-quoted attributes, without the brackets.
fn render_start(e: &BytesStart<'_>) -> Result<String> {
    let mut tag = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    for attr in e.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref());
        let value = attr.unescape_value()?;
        tag.push_str(&format!(" {key}=\"{}\"", escape(value.as_ref())));
    }
    Ok(tag)
}

#[derive(Default)]
struct Printer {
    buf: String,
}

impl Printer {
    fn line(&mut self, depth: usize, text: &str) {
        for _ in 0..depth {
            self.buf.push('\t');
        }
        self.buf.push_str(text);
        self.buf.push('\n');
    }

    fn finish(self) -> String {
        self.buf
    }
}
