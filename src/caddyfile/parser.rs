use thiserror::Error;

use crate::caddyfile::document::{Document, OpaqueSegment};
use crate::caddyfile::site::{self, SiteRecord};
use crate::caddyfile::{REVERSE_PROXY, UPSTREAM_HOST};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unbalanced braces at line {line}")]
    UnbalancedBraces { line: usize },
}

/// Parses configuration text into an ordered [`Document`].
///
/// Recognized site blocks become [`SiteRecord`]s; everything else is kept
/// verbatim as opaque segments. Unbalanced braces are the only fatal
/// condition, since block boundaries cannot be trusted past that point.
pub fn parse_caddyfile(input: &str) -> Result<Document, ParseError> {
    let mut doc = Document::new();
    let mut pending: Vec<&str> = Vec::new();
    let mut block: Vec<&str> = Vec::new();
    let mut depth: usize = 0;
    let mut block_start = 0;

    for (index, line) in input.lines().enumerate() {
        let number = index + 1;
        let trimmed = line.trim();

        // Comment lines never take part in block structure.
        if trimmed.starts_with('#') {
            if depth == 0 {
                pending.push(line);
            } else {
                block.push(line);
            }
            continue;
        }

        let opens = trimmed.matches('{').count();
        let closes = trimmed.matches('}').count();

        if depth == 0 {
            if closes > opens {
                return Err(ParseError::UnbalancedBraces { line: number });
            }
            if opens > closes {
                // A block opens here; everything gathered so far is
                // top-level pass-through text.
                flush_pending(&mut doc, &mut pending);
                block.push(line);
                depth = opens - closes;
                block_start = number;
            } else {
                pending.push(line);
            }
        } else {
            block.push(line);
            if depth + opens < closes {
                return Err(ParseError::UnbalancedBraces { line: number });
            }
            depth = depth + opens - closes;
            if depth == 0 {
                finish_block(&mut doc, &mut block);
            }
        }
    }

    if depth != 0 {
        return Err(ParseError::UnbalancedBraces { line: block_start });
    }
    flush_pending(&mut doc, &mut pending);

    Ok(doc)
}

// Turn gathered top-level lines into one opaque segment. Whitespace-only
// runs are separator formatting and carry no content; blank edges are owned
// by the writer.
fn flush_pending(doc: &mut Document, pending: &mut Vec<&str>) {
    let first = pending.iter().position(|l| !l.trim().is_empty());
    if let Some(first) = first {
        let last = pending
            .iter()
            .rposition(|l| !l.trim().is_empty())
            .unwrap_or(first);
        doc.push_opaque(OpaqueSegment::new(pending[first..=last].join("\n")));
    }
    pending.clear();
}

fn finish_block(doc: &mut Document, block: &mut Vec<&str>) {
    match recognize_site(block) {
        Some(site) => doc.push_site(site),
        None => doc.push_opaque(OpaqueSegment::new(block.join("\n"))),
    }
    block.clear();
}

// A block is a site mapping only when it has exactly the shape
//
//     <label> {
//         reverse_proxy localhost:<port>
//     }
//
// with a single valid host label and a numeric in-range port. Anything else
// (multiple labels, extra directives, comments in the body, nested blocks,
// other upstream hosts) stays opaque rather than being partially parsed.
fn recognize_site(lines: &[&str]) -> Option<SiteRecord> {
    let header = lines.first()?.trim();
    let label = header.strip_suffix('{')?.trim();
    if label.split_whitespace().count() != 1 || !site::is_host_label(label) {
        return None;
    }
    if lines.last()?.trim() != "}" {
        return None;
    }

    let body: Vec<&str> = lines[1..lines.len() - 1]
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect();
    if body.len() != 1 {
        return None;
    }

    let port = parse_upstream(body[0])?;
    Some(SiteRecord::new(label, port))
}

// "reverse_proxy localhost:<port>" with nothing extra.
fn parse_upstream(line: &str) -> Option<u16> {
    let mut parts = line.split_whitespace();
    if parts.next()? != REVERSE_PROXY {
        return None;
    }
    let target = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    let (host, port) = target.split_once(':')?;
    if host != UPSTREAM_HOST {
        return None;
    }
    site::parse_port(port)
}
