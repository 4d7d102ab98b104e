use lipsync::infrastructure::observability::TracingConfig;

#[test]
fn given_default_filter_when_inspected_then_targets_this_crate_and_http_layer() {
    assert!(TracingConfig::DEFAULT_FILTER.starts_with("info"));
    assert!(TracingConfig::DEFAULT_FILTER.contains("lipsync=debug"));
    assert!(TracingConfig::DEFAULT_FILTER.contains("tower_http=debug"));
}
