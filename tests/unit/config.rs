use super::*;

#[test]
fn defaults_match_the_live_widget() {
    let cfg = SiteConfig::default();
    assert_eq!(cfg.reveal.brush_radius, 100.0);
    assert_eq!(cfg.reveal.sample_stride, 12);
    assert_eq!(cfg.reveal.completion_threshold, 82);
    assert_eq!(cfg.reveal.particle_cap, 180);
    assert_eq!(cfg.process.stages, 3);
    assert!(cfg.validate().is_ok());
}

#[test]
fn partial_json_keeps_defaults_for_missing_fields() {
    let cfg = SiteConfig::from_json(r#"{ "reveal": { "brush_radius": 40 } }"#).unwrap();
    assert_eq!(cfg.reveal.brush_radius, 40.0);
    assert_eq!(cfg.reveal.stroke_spacing, 12.0);
    assert_eq!(cfg.notify_email, SiteConfig::default().notify_email);
}

#[test]
fn env_overrides_win_and_empty_values_are_ignored() {
    let mut cfg = SiteConfig::default();
    cfg.apply_env(|k| match k {
        ENV_API_KEY => Some("re_test".to_string()),
        ENV_BASE_URL => Some("   ".to_string()),
        _ => None,
    });
    assert_eq!(cfg.api_key.as_deref(), Some("re_test"));
    assert_eq!(cfg.base_url, SiteConfig::default().base_url);
}

#[test]
fn api_key_is_never_serialized() {
    let mut cfg = SiteConfig::default();
    cfg.api_key = Some("secret".into());
    let json = serde_json::to_string(&cfg).unwrap();
    assert!(!json.contains("secret"));
}

#[test]
fn invalid_settings_are_rejected() {
    let mut cfg = SiteConfig::default();
    cfg.reveal.sample_stride = 0;
    assert!(matches!(cfg.validate(), Err(Error::Config(_))));

    let mut cfg = SiteConfig::default();
    cfg.process.stages = 0;
    assert!(cfg.validate().is_err());
}

#[test]
fn malformed_json_is_a_config_error() {
    assert!(matches!(SiteConfig::from_json("{ nope"), Err(Error::Config(_))));
}
