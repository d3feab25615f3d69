use thiserror::Error;

use crate::caddyfile::document::{Document, Node};
use crate::caddyfile::site::{SiteError, normalize_domain};
use crate::caddyfile::{REVERSE_PROXY, UPSTREAM_HOST};

const INDENT: &str = "    ";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("invalid site `{domain}`: {reason}")]
    InvalidSite { domain: String, reason: SiteError },
}

/// Serializes a [`Document`] back into configuration text.
///
/// Enabled site records are emitted in canonical form, disabled records are
/// omitted entirely, and opaque segments are reproduced verbatim at their
/// position. Consecutive chunks are separated by a single blank line
/// regardless of how the source was formatted.
///
/// Every record to be emitted is validated first; one invalid record fails
/// the whole build so the caller can fix it instead of persisting a
/// configuration the server would reject.
pub fn build_caddyfile(doc: &Document) -> Result<String, BuildError> {
    let mut chunks: Vec<String> = Vec::new();

    for node in doc.nodes() {
        match node {
            Node::Site(site) => {
                if !site.enabled {
                    continue;
                }
                site.validate().map_err(|reason| BuildError::InvalidSite {
                    domain: site.domain.clone(),
                    reason,
                })?;
                chunks.push(render_site(&site.domain, site.port));
            }
            Node::Opaque(segment) => chunks.push(segment.as_str().to_string()),
        }
    }

    if chunks.is_empty() {
        return Ok(String::new());
    }
    Ok(chunks.join("\n\n") + "\n")
}

fn render_site(domain: &str, port: u16) -> String {
    let domain = normalize_domain(domain);
    format!("{domain} {{\n{INDENT}{REVERSE_PROXY} {UPSTREAM_HOST}:{port}\n}}")
}
