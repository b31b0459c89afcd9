use carecompanion::infrastructure::observability::{
    REQUEST_ID_HEADER, TracingConfig, sanitize_for_log,
};

#[test]
fn given_blank_text_when_sanitizing_then_returns_empty_marker() {
    assert_eq!(sanitize_for_log(""), "[EMPTY]");
    assert_eq!(sanitize_for_log(" \n\t "), "[EMPTY]");
}

#[test]
fn given_short_text_when_sanitizing_then_returns_trimmed_text() {
    assert_eq!(
        sanitize_for_log("  Patient nimmt Aspirin 100mg.  "),
        "Patient nimmt Aspirin 100mg."
    );
}

#[test]
fn given_long_text_with_umlauts_when_sanitizing_then_cuts_on_char_boundary() {
    let text = "ü".repeat(250);

    let sanitized = sanitize_for_log(&text);

    assert!(sanitized.starts_with(&"ü".repeat(200)));
    assert!(sanitized.ends_with("... (250 chars total)"));
}

#[test]
fn given_credentials_when_sanitizing_then_redacts_them() {
    let sanitized = sanitize_for_log(
        "Authorization: Bearer abc123 key sk-abcdefghijkl url?api_key=xyz&password=hunter2",
    );

    assert!(!sanitized.contains("abc123"));
    assert!(!sanitized.contains("sk-abcdefghijkl"));
    assert!(!sanitized.contains("xyz"));
    assert!(!sanitized.contains("hunter2"));
    assert!(sanitized.contains("Bearer [REDACTED]"));
    assert!(sanitized.contains("api_key=[REDACTED]"));
}

#[test]
fn given_tracing_config_when_building_filter_then_includes_crate_directives() {
    let config = TracingConfig::new("test", true, "warn");

    assert_eq!(config.environment, "test");
    assert!(config.json_format);
    assert_eq!(
        config.filter_directive(),
        "warn,carecompanion=debug,tower_http=debug"
    );
}

#[test]
fn given_request_id_header_then_uses_conventional_name() {
    assert_eq!(REQUEST_ID_HEADER, "x-request-id");
}
