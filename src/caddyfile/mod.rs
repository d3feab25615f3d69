//! Caddyfile transform.
//!
//! This module is the semantic core of the tool: a parser/serializer pair
//! over the block-structured configuration text the Caddy server consumes.
//!
//! # Architecture
//!
//! - **`site`**: the site mapping model and the shared domain/port validator
//! - **`document`**: the ordered, caller-owned sequence of sites and opaque
//!   pass-through segments
//! - **`parser`**: text → [`Document`]
//! - **`writer`**: [`Document`] → text
//!
//! # Data flow
//!
//! ```text
//!        ┌──────────────┐
//!        │  file text   │
//!        └──────┬───────┘
//!               │ parse_caddyfile
//!               ▼
//!        ┌──────────────┐
//!        │   Document   │ ← caller inserts / removes / edits sites
//!        └──────┬───────┘
//!               │ build_caddyfile
//!               ▼
//!        ┌──────────────┐
//!        │  file text   │ → written out and reloaded by the server
//!        └──────────────┘
//! ```
//!
//! Both transforms are pure and stateless: each call works only on its
//! input and returns a fresh value, so they can run concurrently and
//! repeatedly without coordination. Text the parser does not recognize as a
//! site block rides along as [`OpaqueSegment`]s and is reproduced verbatim
//! by the writer, which keeps the round trip lossless for configuration the
//! tool does not understand.
//!
//! # Example
//!
//! ```
//! use steward::caddyfile::{build_caddyfile, parse_caddyfile};
//!
//! let text = "myapp.test {\n    reverse_proxy localhost:3000\n}\n";
//! let mut doc = parse_caddyfile(text).unwrap();
//!
//! doc.find_site_mut("myapp").unwrap().port = 4000;
//!
//! let out = build_caddyfile(&doc).unwrap();
//! assert!(out.contains("reverse_proxy localhost:4000"));
//! ```

pub mod document;
pub mod parser;
pub mod site;
pub mod writer;

pub use document::{Document, Node, OpaqueSegment};
pub use parser::{ParseError, parse_caddyfile};
pub use site::{SiteError, SiteRecord};
pub use writer::{BuildError, build_caddyfile};

// Wire contract shared by the parser and the writer; the server's own
// Caddyfile adapter consumes exactly this form.
pub(crate) const REVERSE_PROXY: &str = "reverse_proxy";
pub(crate) const UPSTREAM_HOST: &str = "localhost";
