use crate::caddyfile::site::{SiteRecord, normalize_domain};

/// Verbatim text the parser could not interpret as a site block.
///
/// Comments, global option blocks, snippets, imports, multi-host blocks and
/// malformed blocks all land here so the following build can reproduce them
/// untouched. Content is stored without surrounding blank lines; separation
/// between chunks belongs to the writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpaqueSegment {
    raw: String,
}

impl OpaqueSegment {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

/// One entry of a parsed configuration: either a recognized site mapping or
/// an opaque pass-through span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Site(SiteRecord),
    Opaque(OpaqueSegment),
}

/// Ordered sequence of sites and opaque segments.
///
/// Order is significant: it decides matching precedence in the server and is
/// preserved for readability. A Document is constructed fresh by every parse
/// and consumed by the following build; the caller owns it in between and is
/// free to insert, remove, reorder or mutate entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a document holding only site records, in the given order.
    pub fn from_sites(sites: impl IntoIterator<Item = SiteRecord>) -> Self {
        Self {
            nodes: sites.into_iter().map(Node::Site).collect(),
        }
    }

    pub fn push_site(&mut self, site: SiteRecord) {
        self.nodes.push(Node::Site(site));
    }

    pub fn push_opaque(&mut self, segment: OpaqueSegment) {
        self.nodes.push(Node::Opaque(segment));
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut Vec<Node> {
        &mut self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over the site records, skipping opaque segments.
    pub fn sites(&self) -> impl Iterator<Item = &SiteRecord> {
        self.nodes.iter().filter_map(|node| match node {
            Node::Site(site) => Some(site),
            Node::Opaque(_) => None,
        })
    }

    pub fn sites_mut(&mut self) -> impl Iterator<Item = &mut SiteRecord> {
        self.nodes.iter_mut().filter_map(|node| match node {
            Node::Site(site) => Some(site),
            Node::Opaque(_) => None,
        })
    }

    /// Number of opaque segments riding along in the document.
    pub fn opaque_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| matches!(node, Node::Opaque(_)))
            .count()
    }

    /// First record matching the domain, compared after normalization so
    /// `myapp` finds `myapp.test`.
    pub fn find_site(&self, domain: &str) -> Option<&SiteRecord> {
        let wanted = normalize_domain(domain);
        self.sites().find(|site| site.domain == wanted)
    }

    pub fn find_site_mut(&mut self, domain: &str) -> Option<&mut SiteRecord> {
        let wanted = normalize_domain(domain);
        self.sites_mut().find(|site| site.domain == wanted)
    }

    /// Removes the first record matching the (normalized) domain.
    ///
    /// Returns `false` when no record matches. Later duplicates are left in
    /// place; precedence in the server is first-match, so the surviving
    /// record is the one that was shadowed.
    pub fn remove_site(&mut self, domain: &str) -> bool {
        let wanted = normalize_domain(domain);
        let position = self.nodes.iter().position(|node| match node {
            Node::Site(site) => site.domain == wanted,
            Node::Opaque(_) => false,
        });
        match position {
            Some(index) => {
                self.nodes.remove(index);
                true
            }
            None => false,
        }
    }

    /// Domains that appear more than once, in first-appearance order.
    pub fn duplicate_domains(&self) -> Vec<String> {
        let mut seen: Vec<&str> = Vec::new();
        let mut duplicates: Vec<String> = Vec::new();
        for site in self.sites() {
            if seen.contains(&site.domain.as_str()) {
                if !duplicates.contains(&site.domain) {
                    duplicates.push(site.domain.clone());
                }
            } else {
                seen.push(&site.domain);
            }
        }
        duplicates
    }
}
