use super::*;

const ONE_IMPORTANT: &str = r#"{"nodes":[{"id":"1","label":"x","important":true}],"edges":[]}"#;
const MIXED: &str = r#"{
  "nodes": [
    {"id": "1", "label": "x", "important": true},
    {"id": "2", "label": "y", "important": false}
  ],
  "edges": [{"source": "1", "target": "2", "weight": 0.5}]
}"#;

fn instance(content: &str) -> GraphInstance {
    GraphInstance::new(GraphData::parse(content), GraphOptions::default())
}

#[test]
fn malformed_content_parses_to_empty_graph() {
    assert!(GraphData::parse("not json").is_empty());
    assert!(GraphData::parse("[1, 2, 3]").is_empty());
    assert!(GraphData::parse("").is_empty());
}

#[test]
fn missing_fields_default() {
    let data = GraphData::parse(r#"{"nodes":[{"id":"a","label":"A"}]}"#);
    assert_eq!(data.nodes.len(), 1);
    assert!(!data.nodes[0].important);
    assert!(data.edges.is_empty());
}

#[test]
fn edge_width_maps_unit_interval_linearly() {
    assert_eq!(edge_width(0.0), 0.5);
    assert_eq!(edge_width(1.0), 2.0);
    assert_eq!(edge_width(0.5), 1.25);
    assert_eq!(edge_width(-3.0), 0.5);
    assert_eq!(edge_width(7.0), 2.0);
    assert_eq!(edge_width(f64::NAN), 0.5);
}

#[test]
fn important_label_is_visible_at_any_zoom() {
    let mut graph = instance(ONE_IMPORTANT);
    for zoom in [MIN_ZOOM, 1.0, 2.0, 2.5, MAX_ZOOM] {
        graph.set_zoom(zoom);
        assert!(graph.label_visible(0), "hidden at zoom {zoom}");
    }
}

#[test]
fn regular_label_appears_only_above_threshold() {
    let mut graph = instance(MIXED);

    graph.set_zoom(1.0);
    assert!(!graph.label_visible(1));
    graph.set_zoom(2.0);
    assert!(!graph.label_visible(1), "threshold itself is exclusive");
    graph.set_zoom(2.5);
    assert!(graph.label_visible(1));
}

#[test]
fn node_sizes_follow_importance() {
    let graph = instance(MIXED);
    assert_eq!(graph.node_size(0), IMPORTANT_NODE_SIZE);
    assert_eq!(graph.node_size(1), REGULAR_NODE_SIZE);
    assert_eq!(graph.node_size(9), 0.0);
}

#[test]
fn zoom_is_clamped() {
    let mut graph = instance(MIXED);
    graph.set_zoom(100.0);
    assert_eq!(graph.zoom(), MAX_ZOOM);
    graph.set_zoom(0.0);
    assert_eq!(graph.zoom(), MIN_ZOOM);
    assert!(!graph.set_zoom(MIN_ZOOM));
}

#[test]
fn zoom_in_and_out_step_symmetrically() {
    let mut graph = instance(MIXED);
    assert!(graph.zoom_in());
    assert!(graph.zoom() > 1.0);
    assert!(graph.zoom_out());
    assert!((graph.zoom() - 1.0).abs() < 1e-9);
}

#[test]
fn dangling_edges_are_dropped() {
    let graph = instance(
        r#"{"nodes":[{"id":"1","label":"a"}],"edges":[{"source":"1","target":"404","weight":1}]}"#,
    );
    assert!(graph.edges().is_empty());
}

#[test]
fn placed_edges_carry_mapped_width() {
    let graph = instance(MIXED);
    assert_eq!(graph.edges().len(), 1);
    assert_eq!(graph.edges()[0].width, 1.25);
}

#[test]
fn single_node_sits_in_the_viewport_center() {
    let mut graph = instance(ONE_IMPORTANT);
    graph.set_viewport(400.0, 300.0);
    assert_eq!(graph.node_position(0), Some(Point::new(200.0, 150.0)));
}

#[test]
fn layout_is_deterministic_and_inside_the_viewport() {
    let a = instance(MIXED);
    let b = instance(MIXED);
    for i in 0..2 {
        let p = a.node_position(i).unwrap();
        assert_eq!(Some(p), b.node_position(i));
        assert!((0.0..=400.0).contains(&p.x) && (0.0..=300.0).contains(&p.y));
    }
    assert_ne!(a.node_position(0), a.node_position(1));
}

#[test]
fn clicking_a_node_emits_its_id() {
    let graph = instance(MIXED);
    let p = graph.node_position(1).unwrap();
    assert_eq!(
        graph.click(p.x, p.y),
        Some(GraphEvent::NodeClicked("2".to_string()))
    );
}

#[test]
fn clicking_empty_space_emits_nothing() {
    let graph = instance(MIXED);
    assert_eq!(graph.click(-500.0, -500.0), None);
    assert_eq!(instance("{}").click(200.0, 150.0), None);
}

#[test]
fn pan_moves_node_positions() {
    let mut graph = instance(ONE_IMPORTANT);
    let before = graph.node_position(0).unwrap();
    graph.pan_by(10.0, -5.0);
    let after = graph.node_position(0).unwrap();
    assert_eq!(after, Point::new(before.x + 10.0, before.y - 5.0));

    graph.reset_view();
    assert_eq!(graph.node_position(0), Some(before));
}

#[test]
fn sync_with_equal_data_keeps_the_instance() {
    let mut renderer = GraphRenderer::default();
    let data = GraphData::parse(MIXED);

    assert!(renderer.sync(&data));
    renderer.instance_mut().unwrap().set_zoom(3.0);

    assert!(!renderer.sync(&GraphData::parse(MIXED)));
    assert_eq!(renderer.builds(), 1);
    assert_eq!(renderer.instance().map(|i| i.zoom()), Some(3.0));
}

#[test]
fn sync_with_changed_data_rebuilds_and_keeps_viewport() {
    let mut renderer = GraphRenderer::default();
    renderer.sync(&GraphData::parse(MIXED));
    {
        let instance = renderer.instance_mut().unwrap();
        instance.set_viewport(800.0, 600.0);
        instance.set_zoom(3.0);
    }

    assert!(renderer.sync(&GraphData::parse(ONE_IMPORTANT)));
    let instance = renderer.instance().unwrap();
    assert_eq!(renderer.builds(), 2);
    assert_eq!(instance.nodes().len(), 1);
    assert_eq!(instance.zoom(), 1.0);
    assert_eq!(instance.viewport(), (800.0, 600.0));
}

#[test]
fn teardown_drops_the_instance() {
    let mut renderer = GraphRenderer::default();
    renderer.sync(&GraphData::parse(MIXED));
    renderer.teardown();
    assert!(renderer.instance().is_none());

    assert!(renderer.sync(&GraphData::parse(MIXED)));
    assert_eq!(renderer.builds(), 2);
}

#[test]
fn knowledge_graph_seed_builds() {
    let registry = crate::kernel::FileRegistry::default();
    let doc = registry.get("KnowledgeGraph.graph").unwrap();
    let graph = instance(&doc.content);
    assert_eq!(graph.nodes().len(), 20);
    assert_eq!(graph.edges().len(), 23);
}
