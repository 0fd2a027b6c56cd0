//! Knowledge-graph view model.
//!
//! [`GraphRenderer`] owns at most one [`GraphInstance`]. Any structural change to the node/edge
//! input drops the instance and builds a fresh one (new layout, zoom reset); there is no
//! incremental diffing. The instance answers every question a frontend needs to draw and
//! interact with the graph: screen positions, node sizes, edge widths, which labels are shown at
//! the current zoom, and which node a click lands on.

mod data;
mod layout;

pub use data::{EdgeData, GraphData, NodeData};
pub use layout::Point;

pub const LABEL_ZOOM_THRESHOLD: f64 = 2.0;
pub const MIN_ZOOM: f64 = 0.25;
pub const MAX_ZOOM: f64 = 8.0;
pub const ZOOM_STEP: f64 = 1.25;
pub const IMPORTANT_NODE_SIZE: f64 = 30.0;
pub const REGULAR_NODE_SIZE: f64 = 10.0;
pub const EDGE_WIDTH_MIN: f64 = 0.5;
pub const EDGE_WIDTH_MAX: f64 = 2.0;
pub const VIEW_PADDING: f64 = 30.0;

/// Linear map of an edge weight from `[0, 1]` onto `[EDGE_WIDTH_MIN, EDGE_WIDTH_MAX]`.
pub fn edge_width(weight: f64) -> f64 {
    let w = if weight.is_finite() {
        weight.clamp(0.0, 1.0)
    } else {
        0.0
    };
    EDGE_WIDTH_MIN + w * (EDGE_WIDTH_MAX - EDGE_WIDTH_MIN)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphOptions {
    pub label_zoom_threshold: f64,
    pub layout_iterations: usize,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            label_zoom_threshold: LABEL_ZOOM_THRESHOLD,
            layout_iterations: 300,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphEvent {
    NodeClicked(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedEdge {
    pub source: usize,
    pub target: usize,
    pub weight: f64,
    pub width: f64,
}

#[derive(Debug, Clone)]
pub struct GraphInstance {
    data: GraphData,
    options: GraphOptions,
    positions: Vec<Point>,
    edges: Vec<PlacedEdge>,
    viewport: (f64, f64),
    zoom: f64,
    pan: (f64, f64),
}

impl GraphInstance {
    pub fn new(data: GraphData, options: GraphOptions) -> Self {
        let index_of = |id: &str| data.nodes.iter().position(|n| n.id == id);
        let edges: Vec<PlacedEdge> = data
            .edges
            .iter()
            .filter_map(|e| {
                let (Some(source), Some(target)) = (index_of(&e.source), index_of(&e.target))
                else {
                    tracing::debug!(source = %e.source, target = %e.target, "dropping dangling edge");
                    return None;
                };
                Some(PlacedEdge {
                    source,
                    target,
                    weight: e.weight,
                    width: edge_width(e.weight),
                })
            })
            .collect();

        let pairs: Vec<(usize, usize)> = edges.iter().map(|e| (e.source, e.target)).collect();
        let positions = layout::force_directed(data.nodes.len(), &pairs, options.layout_iterations);

        Self {
            data,
            options,
            positions,
            edges,
            viewport: (400.0, 300.0),
            zoom: 1.0,
            pan: (0.0, 0.0),
        }
    }

    pub fn data(&self) -> &GraphData {
        &self.data
    }

    pub fn nodes(&self) -> &[NodeData] {
        &self.data.nodes
    }

    pub fn edges(&self) -> &[PlacedEdge] {
        &self.edges
    }

    pub fn viewport(&self) -> (f64, f64) {
        self.viewport
    }

    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport = (width.max(1.0), height.max(1.0));
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn set_zoom(&mut self, zoom: f64) -> bool {
        let zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        if (zoom - self.zoom).abs() < f64::EPSILON {
            return false;
        }
        self.zoom = zoom;
        true
    }

    pub fn zoom_by(&mut self, factor: f64) -> bool {
        self.set_zoom(self.zoom * factor)
    }

    pub fn zoom_in(&mut self) -> bool {
        self.zoom_by(ZOOM_STEP)
    }

    pub fn zoom_out(&mut self) -> bool {
        self.zoom_by(1.0 / ZOOM_STEP)
    }

    pub fn pan(&self) -> (f64, f64) {
        self.pan
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan.0 += dx;
        self.pan.1 += dy;
    }

    pub fn reset_view(&mut self) {
        self.zoom = 1.0;
        self.pan = (0.0, 0.0);
    }

    /// Important nodes always show their label; the rest only above the zoom threshold.
    pub fn label_visible(&self, index: usize) -> bool {
        match self.data.nodes.get(index) {
            Some(node) => node.important || self.zoom > self.options.label_zoom_threshold,
            None => false,
        }
    }

    pub fn node_size(&self, index: usize) -> f64 {
        match self.data.nodes.get(index) {
            Some(node) if node.important => IMPORTANT_NODE_SIZE,
            Some(_) => REGULAR_NODE_SIZE,
            None => 0.0,
        }
    }

    /// Hit radius in viewport units at the current zoom.
    pub fn node_radius(&self, index: usize) -> f64 {
        self.node_size(index) / 2.0 * self.zoom
    }

    /// Position of node `index` in viewport units (origin top-left).
    pub fn node_position(&self, index: usize) -> Option<Point> {
        let p = self.positions.get(index)?;
        let (w, h) = self.viewport;
        let pad_x = VIEW_PADDING.min(w / 4.0);
        let pad_y = VIEW_PADDING.min(h / 4.0);
        let fitted_x = pad_x + p.x * (w - 2.0 * pad_x);
        let fitted_y = pad_y + p.y * (h - 2.0 * pad_y);
        let (cx, cy) = (w / 2.0, h / 2.0);
        Some(Point::new(
            cx + (fitted_x - cx) * self.zoom + self.pan.0,
            cy + (fitted_y - cy) * self.zoom + self.pan.1,
        ))
    }

    /// Resolves a click at viewport coordinates to the topmost node under it.
    pub fn click(&self, x: f64, y: f64) -> Option<GraphEvent> {
        self.click_within(x, y, 1.0)
    }

    /// Like [`click`](Self::click), but every node is at least `min_radius` units wide.
    pub fn click_within(&self, x: f64, y: f64, min_radius: f64) -> Option<GraphEvent> {
        let at = Point::new(x, y);
        (0..self.data.nodes.len())
            .rev()
            .find(|&i| {
                self.node_position(i)
                    .is_some_and(|p| p.distance(at) <= self.node_radius(i).max(min_radius))
            })
            .map(|i| GraphEvent::NodeClicked(self.data.nodes[i].id.clone()))
    }
}

#[derive(Debug, Default)]
pub struct GraphRenderer {
    options: GraphOptions,
    instance: Option<GraphInstance>,
    builds: u64,
}

impl GraphRenderer {
    pub fn new(options: GraphOptions) -> Self {
        Self {
            options,
            instance: None,
            builds: 0,
        }
    }

    /// Makes the current instance reflect `data`. Returns `true` when a new instance was built.
    pub fn sync(&mut self, data: &GraphData) -> bool {
        if self.instance.as_ref().is_some_and(|i| i.data() == data) {
            return false;
        }
        let viewport = self.instance.as_ref().map(|i| i.viewport());
        self.teardown();
        let mut instance = GraphInstance::new(data.clone(), self.options);
        if let Some((w, h)) = viewport {
            instance.set_viewport(w, h);
        }
        tracing::debug!(
            nodes = instance.nodes().len(),
            edges = instance.edges().len(),
            "graph instance built"
        );
        self.instance = Some(instance);
        self.builds += 1;
        true
    }

    pub fn teardown(&mut self) {
        self.instance = None;
    }

    pub fn instance(&self) -> Option<&GraphInstance> {
        self.instance.as_ref()
    }

    pub fn instance_mut(&mut self) -> Option<&mut GraphInstance> {
        self.instance.as_mut()
    }

    /// Number of instances constructed so far.
    pub fn builds(&self) -> u64 {
        self.builds
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/graph.rs"]
mod tests;
