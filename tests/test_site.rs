use steward::caddyfile::site::{
    DEV_SUFFIX, SiteError, SiteRecord, is_host_label, normalize_domain, parse_port,
};

#[test]
fn test_normalize_appends_suffix() {
    assert_eq!(normalize_domain("myapp"), "myapp.test");
}

#[test]
fn test_normalize_keeps_existing_suffix() {
    assert_eq!(normalize_domain("myapp.test"), "myapp.test");
}

#[test]
fn test_normalize_is_idempotent() {
    for raw in ["myapp", "myapp.test", "a.b.c", "  padded  ", ""] {
        let once = normalize_domain(raw);
        assert_eq!(normalize_domain(&once), once);
    }
}

#[test]
fn test_normalize_trims_whitespace() {
    assert_eq!(normalize_domain("  myapp "), "myapp.test");
}

#[test]
fn test_normalize_keeps_empty_input_empty() {
    assert_eq!(normalize_domain(""), "");
    assert_eq!(normalize_domain("   "), "");
}

#[test]
fn test_dev_suffix_value() {
    assert_eq!(DEV_SUFFIX, ".test");
}

#[test]
fn test_new_record_is_enabled_and_normalized() {
    let site = SiteRecord::new("shop", 8080);

    assert_eq!(site.domain, "shop.test");
    assert_eq!(site.port, 8080);
    assert!(site.enabled);
}

#[test]
fn test_validate_accepts_well_formed_record() {
    assert!(SiteRecord::new("shop", 8080).validate().is_ok());
}

#[test]
fn test_validate_rejects_empty_domain() {
    let mut site = SiteRecord::new("shop", 8080);
    site.domain = "  ".to_string();

    assert_eq!(site.validate(), Err(SiteError::EmptyDomain));
}

#[test]
fn test_validate_rejects_zero_port() {
    let site = SiteRecord::new("shop", 0);

    assert_eq!(site.validate(), Err(SiteError::PortOutOfRange));
}

#[test]
fn test_parse_port_accepts_full_range() {
    assert_eq!(parse_port("1"), Some(1));
    assert_eq!(parse_port("3000"), Some(3000));
    assert_eq!(parse_port("65535"), Some(65535));
}

#[test]
fn test_parse_port_rejects_out_of_range() {
    assert_eq!(parse_port("0"), None);
    assert_eq!(parse_port("65536"), None);
    assert_eq!(parse_port("70000"), None);
}

#[test]
fn test_parse_port_rejects_non_numeric() {
    assert_eq!(parse_port(""), None);
    assert_eq!(parse_port("http"), None);
    assert_eq!(parse_port("80a"), None);
    assert_eq!(parse_port("-80"), None);
    assert_eq!(parse_port("80 "), None);
}

#[test]
fn test_host_label_accepts_plain_names() {
    assert!(is_host_label("myapp"));
    assert!(is_host_label("my-app.test"));
    assert!(is_host_label("a.b.c"));
    assert!(is_host_label("app2"));
}

#[test]
fn test_host_label_rejects_malformed_names() {
    assert!(!is_host_label(""));
    assert!(!is_host_label(".test"));
    assert!(!is_host_label("app..test"));
    assert!(!is_host_label("-app"));
    assert!(!is_host_label("app-.test"));
    assert!(!is_host_label("app:8080"));
    assert!(!is_host_label("http://app"));
    assert!(!is_host_label("app test"));
}
