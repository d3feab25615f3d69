use steward::caddyfile::document::{Document, OpaqueSegment};
use steward::caddyfile::site::{SiteError, SiteRecord};
use steward::caddyfile::writer::{BuildError, build_caddyfile};

#[test]
fn test_build_single_site_canonical_form() {
    let doc = Document::from_sites([SiteRecord::new("foo.test", 3000)]);
    let text = build_caddyfile(&doc).unwrap();

    assert_eq!(text, "foo.test {\n    reverse_proxy localhost:3000\n}\n");
}

#[test]
fn test_build_normalizes_bare_domain() {
    let doc = Document::from_sites([SiteRecord::new("bar", 8080)]);
    let text = build_caddyfile(&doc).unwrap();

    assert_eq!(text, "bar.test {\n    reverse_proxy localhost:8080\n}\n");
}

#[test]
fn test_build_normalizes_domain_set_after_construction() {
    // Callers may write the field directly; the writer still normalizes.
    let mut site = SiteRecord::new("placeholder", 8080);
    site.domain = "bar".to_string();
    let text = build_caddyfile(&Document::from_sites([site])).unwrap();

    assert!(text.starts_with("bar.test {\n"));
}

#[test]
fn test_build_separates_blocks_with_one_blank_line() {
    let doc = Document::from_sites([
        SiteRecord::new("a.test", 3000),
        SiteRecord::new("b.test", 4000),
    ]);
    let text = build_caddyfile(&doc).unwrap();

    assert_eq!(
        text,
        "a.test {\n    reverse_proxy localhost:3000\n}\n\nb.test {\n    reverse_proxy localhost:4000\n}\n"
    );
}

#[test]
fn test_build_omits_disabled_site_entirely() {
    let mut site = SiteRecord::new("a.test", 80);
    site.enabled = false;
    let text = build_caddyfile(&Document::from_sites([site])).unwrap();

    assert_eq!(text, "");
}

#[test]
fn test_build_disabled_site_between_enabled_ones() {
    let mut off = SiteRecord::new("b.test", 4000);
    off.enabled = false;
    let doc = Document::from_sites([
        SiteRecord::new("a.test", 3000),
        off,
        SiteRecord::new("c.test", 5000),
    ]);
    let text = build_caddyfile(&doc).unwrap();

    assert!(!text.contains("b.test"));
    assert_eq!(
        text,
        "a.test {\n    reverse_proxy localhost:3000\n}\n\nc.test {\n    reverse_proxy localhost:5000\n}\n"
    );
}

#[test]
fn test_build_emits_opaque_segment_verbatim() {
    let mut doc = Document::new();
    doc.push_opaque(OpaqueSegment::new("# managed by steward"));
    doc.push_site(SiteRecord::new("a.test", 3000));
    let text = build_caddyfile(&doc).unwrap();

    assert_eq!(
        text,
        "# managed by steward\n\na.test {\n    reverse_proxy localhost:3000\n}\n"
    );
}

#[test]
fn test_build_empty_document_is_empty_text() {
    assert_eq!(build_caddyfile(&Document::new()).unwrap(), "");
}

#[test]
fn test_build_zero_port_fails() {
    let doc = Document::from_sites([SiteRecord::new("x.test", 0)]);
    let result = build_caddyfile(&doc);

    assert!(matches!(
        result,
        Err(BuildError::InvalidSite {
            reason: SiteError::PortOutOfRange,
            ..
        })
    ));
}

#[test]
fn test_build_empty_domain_fails() {
    let mut site = SiteRecord::new("x.test", 80);
    site.domain = String::new();
    let result = build_caddyfile(&Document::from_sites([site]));

    assert!(matches!(
        result,
        Err(BuildError::InvalidSite {
            reason: SiteError::EmptyDomain,
            ..
        })
    ));
}

#[test]
fn test_build_one_invalid_site_aborts_whole_build() {
    let doc = Document::from_sites([
        SiteRecord::new("good.test", 3000),
        SiteRecord::new("bad.test", 0),
    ]);

    assert!(build_caddyfile(&doc).is_err());
}

#[test]
fn test_build_skips_validation_of_disabled_records() {
    // A disabled record is not written, so it cannot block the save.
    let mut broken = SiteRecord::new("broken.test", 0);
    broken.enabled = false;
    let doc = Document::from_sites([SiteRecord::new("good.test", 3000), broken]);

    let text = build_caddyfile(&doc).unwrap();
    assert!(text.contains("good.test"));
}

#[test]
fn test_build_error_names_offending_domain() {
    let doc = Document::from_sites([SiteRecord::new("bad.test", 0)]);
    match build_caddyfile(&doc) {
        Err(BuildError::InvalidSite { domain, .. }) => assert_eq!(domain, "bad.test"),
        other => panic!("expected InvalidSite, got {other:?}"),
    }
}
