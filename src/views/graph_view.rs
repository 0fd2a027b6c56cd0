//! Terminal drawing of a [`GraphInstance`] on a braille canvas.
//!
//! One terminal cell spans `CELL_WIDTH x CELL_HEIGHT` viewport units, so node sizes and edge
//! widths keep their proportions regardless of the panel size.

use crate::app::theme::UiTheme;
use crate::kernel::graph::{GraphEvent, GraphInstance};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Circle, Line as CanvasLine};
use ratatui::Frame;

pub const CELL_WIDTH: f64 = 8.0;
pub const CELL_HEIGHT: f64 = 16.0;

/// Edges at or above this width are drawn with the accent color.
const HEAVY_EDGE_WIDTH: f64 = 1.25;

#[derive(Debug, Default)]
pub struct GraphView {
    area: Option<Rect>,
}

impl GraphView {
    pub fn new() -> Self {
        Self { area: None }
    }

    pub fn area(&self) -> Option<Rect> {
        self.area
    }

    /// Viewport size in graph units for a panel of `area`.
    pub fn viewport_for(area: Rect) -> (f64, f64) {
        (
            area.width as f64 * CELL_WIDTH,
            area.height as f64 * CELL_HEIGHT,
        )
    }

    /// Maps a clicked cell to the node drawn there, if any.
    pub fn hit_test(&self, instance: &GraphInstance, x: u16, y: u16) -> Option<String> {
        let area = self.area?;
        if x < area.x || y < area.y || x >= area.x + area.width || y >= area.y + area.height {
            return None;
        }
        let ux = ((x - area.x) as f64 + 0.5) * CELL_WIDTH;
        let uy = ((y - area.y) as f64 + 0.5) * CELL_HEIGHT;
        match instance.click_within(ux, uy, CELL_HEIGHT / 2.0)? {
            GraphEvent::NodeClicked(id) => Some(id),
        }
    }

    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        instance: &mut GraphInstance,
        theme: &UiTheme,
    ) {
        self.area = Some(area);
        if area.width == 0 || area.height == 0 {
            return;
        }
        let (w, h) = Self::viewport_for(area);
        instance.set_viewport(w, h);

        let instance = &*instance;
        let canvas = Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([0.0, w])
            .y_bounds([0.0, h])
            .paint(|ctx| {
                for edge in instance.edges() {
                    let (Some(a), Some(b)) = (
                        instance.node_position(edge.source),
                        instance.node_position(edge.target),
                    ) else {
                        continue;
                    };
                    let color = if edge.width >= HEAVY_EDGE_WIDTH {
                        theme.accent_fg
                    } else {
                        theme.muted_fg
                    };
                    ctx.draw(&CanvasLine {
                        x1: a.x,
                        y1: h - a.y,
                        x2: b.x,
                        y2: h - b.y,
                        color,
                    });
                }
                ctx.layer();

                for (i, node) in instance.nodes().iter().enumerate() {
                    let Some(p) = instance.node_position(i) else {
                        continue;
                    };
                    let color = if node.important {
                        theme.important_node_fg
                    } else {
                        theme.regular_node_fg
                    };
                    ctx.draw(&Circle {
                        x: p.x,
                        y: h - p.y,
                        radius: instance.node_radius(i),
                        color,
                    });
                }
                ctx.layer();

                for (i, node) in instance.nodes().iter().enumerate() {
                    if !instance.label_visible(i) {
                        continue;
                    }
                    let Some(p) = instance.node_position(i) else {
                        continue;
                    };
                    let mut style = Style::default().fg(if node.important {
                        theme.important_node_fg
                    } else {
                        theme.regular_node_fg
                    });
                    if node.important {
                        style = style.add_modifier(Modifier::BOLD);
                    }
                    let x = p.x + instance.node_radius(i) + CELL_WIDTH / 2.0;
                    ctx.print(x, h - p.y, Line::from(Span::styled(node.label.clone(), style)));
                }
            });

        frame.render_widget(canvas, area);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/views/graph_view.rs"]
mod tests;
