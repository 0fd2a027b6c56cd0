use super::*;
use crate::kernel::graph::{GraphData, GraphOptions};
use ratatui::backend::TestBackend;
use ratatui::Terminal;

const SINGLE_HUB: &str = r#"{"nodes":[{"id":"hub","label":"Hub","important":true}],"edges":[]}"#;
const HUB_AND_LEAF: &str = r#"{
  "nodes": [
    {"id": "hub", "label": "Hub", "important": true},
    {"id": "leaf", "label": "Leaf", "important": false}
  ],
  "edges": [{"source": "hub", "target": "leaf", "weight": 1.0}]
}"#;

fn instance(content: &str) -> GraphInstance {
    GraphInstance::new(GraphData::parse(content), GraphOptions::default())
}

fn draw(view: &mut GraphView, graph: &mut GraphInstance, area: Rect) -> String {
    let mut terminal = Terminal::new(TestBackend::new(area.width, area.height)).unwrap();
    let theme = UiTheme::default();
    terminal
        .draw(|frame| view.render(frame, area, graph, &theme))
        .unwrap();
    let buffer = terminal.backend().buffer();
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

#[test]
fn viewport_scales_with_cell_size() {
    assert_eq!(
        GraphView::viewport_for(Rect::new(5, 5, 20, 10)),
        (160.0, 160.0)
    );
}

#[test]
fn render_sets_viewport_and_draws_important_label() {
    let mut view = GraphView::new();
    let mut graph = instance(SINGLE_HUB);

    let text = draw(&mut view, &mut graph, Rect::new(0, 0, 20, 10));

    assert_eq!(graph.viewport(), (160.0, 160.0));
    assert_eq!(view.area(), Some(Rect::new(0, 0, 20, 10)));
    assert!(text.contains("Hub"), "{text}");
}

#[test]
fn regular_label_hidden_at_default_zoom() {
    let mut view = GraphView::new();
    let mut graph = instance(HUB_AND_LEAF);

    let text = draw(&mut view, &mut graph, Rect::new(0, 0, 40, 12));
    assert!(!text.contains("Leaf"), "{text}");
}

#[test]
fn hit_test_resolves_node_under_cell() {
    let mut view = GraphView::new();
    let mut graph = instance(SINGLE_HUB);
    assert_eq!(view.hit_test(&graph, 10, 5), None, "nothing rendered yet");

    draw(&mut view, &mut graph, Rect::new(0, 0, 20, 10));

    // The single node sits at the viewport center (80, 80).
    assert_eq!(view.hit_test(&graph, 10, 5), Some("hub".to_string()));
    assert_eq!(view.hit_test(&graph, 0, 0), None);
    assert_eq!(view.hit_test(&graph, 25, 5), None, "outside the panel");
}

#[test]
fn hit_test_follows_zoom_and_pan() {
    let mut view = GraphView::new();
    let mut graph = instance(SINGLE_HUB);
    draw(&mut view, &mut graph, Rect::new(0, 0, 20, 10));

    graph.pan_by(-64.0, 0.0);
    assert_eq!(view.hit_test(&graph, 10, 5), None);
    assert_eq!(view.hit_test(&graph, 2, 5), Some("hub".to_string()));

    graph.reset_view();
    graph.set_zoom(4.0);
    // Radius grows to 15 * 4 = 60 units, so a cell 5 columns away still hits.
    assert_eq!(view.hit_test(&graph, 15, 5), Some("hub".to_string()));
}
