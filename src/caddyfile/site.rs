use thiserror::Error;

/// Development suffix every managed domain ends with.
///
/// Bare labels are suffixed automatically, so `myapp` and `myapp.test` refer
/// to the same site.
pub const DEV_SUFFIX: &str = ".test";

/// Why a site record failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SiteError {
    /// The domain is empty or whitespace-only
    #[error("domain is empty")]
    EmptyDomain,
    /// The port is outside 1-65535
    #[error("port is out of range")]
    PortOutOfRange,
}

/// One reverse-proxy mapping: a `.test` domain served from a local port.
///
/// Records are owned by the caller between a parse and the following build;
/// the parser and the serializer never hold on to them across calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteRecord {
    /// Host label, normalized to end with [`DEV_SUFFIX`]
    pub domain: String,
    /// Local port the domain proxies to (1-65535)
    pub port: u16,
    /// Session-level flag; disabled records are omitted from built output
    pub enabled: bool,
}

impl SiteRecord {
    /// Creates an enabled record, normalizing the domain.
    ///
    /// # Example
    ///
    /// ```
    /// # use steward::caddyfile::site::SiteRecord;
    /// let site = SiteRecord::new("myapp", 3000);
    /// assert_eq!(site.domain, "myapp.test");
    /// assert!(site.enabled);
    /// ```
    pub fn new(domain: impl AsRef<str>, port: u16) -> Self {
        Self {
            domain: normalize_domain(domain.as_ref()),
            port,
            enabled: true,
        }
    }

    /// Checks the invariants a record must satisfy before it is written out.
    pub fn validate(&self) -> Result<(), SiteError> {
        if self.domain.trim().is_empty() {
            return Err(SiteError::EmptyDomain);
        }
        if self.port == 0 {
            return Err(SiteError::PortOutOfRange);
        }
        Ok(())
    }
}

/// Normalizes a domain label: trims whitespace and appends [`DEV_SUFFIX`]
/// unless the label already carries it. Idempotent. An empty input stays
/// empty rather than becoming a bare suffix.
///
/// # Example
///
/// ```
/// # use steward::caddyfile::site::normalize_domain;
/// assert_eq!(normalize_domain("myapp"), "myapp.test");
/// assert_eq!(normalize_domain("myapp.test"), "myapp.test");
/// ```
pub fn normalize_domain(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.ends_with(DEV_SUFFIX) {
        trimmed.to_string()
    } else {
        format!("{trimmed}{DEV_SUFFIX}")
    }
}

/// Whether a string is a plausible host label: dot-separated parts of
/// letters, digits and `-`, no empty part, no part starting or ending
/// with `-`.
pub fn is_host_label(s: &str) -> bool {
    if s.is_empty() {
        return false;
    }
    s.split('.').all(|part| {
        !part.is_empty()
            && part.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
            && !part.starts_with('-')
            && !part.ends_with('-')
    })
}

/// Parses a port from its text form.
///
/// Returns `None` for non-numeric input and for values outside 1-65535.
pub fn parse_port(s: &str) -> Option<u16> {
    match s.parse::<u32>() {
        Ok(n) if (1..=65535).contains(&n) => Some(n as u16),
        _ => None,
    }
}
