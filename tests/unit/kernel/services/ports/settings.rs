use super::*;

#[test]
fn empty_object_deserializes_to_defaults() {
    let settings: Settings = serde_json::from_str("{}").unwrap();
    assert_eq!(settings.service, ServiceSettings::default());
    assert_eq!(settings.service.base_url, DEFAULT_SERVICE_URL);
    assert_eq!(settings.graph, GraphSettings::default());
    assert_eq!(settings.graph.label_zoom_threshold, LABEL_ZOOM_THRESHOLD);
}

#[test]
fn graph_settings_map_to_renderer_options() {
    let settings: GraphSettings =
        serde_json::from_str(r#"{"label_zoom_threshold": 3.5, "layout_iterations": 10}"#).unwrap();
    let options = settings.options();
    assert_eq!(options.label_zoom_threshold, 3.5);
    assert_eq!(options.layout_iterations, 10);
}

#[test]
fn theme_settings_omit_unset_colors() {
    let theme = ThemeSettings {
        focus_border: Some("red".to_string()),
        inactive_border: None,
        accent_fg: None,
        header_fg: None,
        muted_fg: None,
        selected_bg: None,
        important_node_fg: None,
        regular_node_fg: None,
    };
    let json = serde_json::to_string(&theme).unwrap();
    assert_eq!(json, r#"{"focus_border":"red"}"#);
}
