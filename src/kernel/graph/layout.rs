//! Force-directed placement in the unit square.
//!
//! Fruchterman-Reingold with a linearly cooling temperature. Seeding is by node index on a
//! circle, so the same input always yields the same positions.

use std::f64::consts::TAU;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

const MIN_DISTANCE: f64 = 1e-4;

/// Returns one position per node in `[0, 1] x [0, 1]`.
///
/// `edges` are index pairs into the node list.
pub fn force_directed(node_count: usize, edges: &[(usize, usize)], iterations: usize) -> Vec<Point> {
    match node_count {
        0 => return Vec::new(),
        1 => return vec![Point::new(0.5, 0.5)],
        _ => {}
    }

    let n = node_count as f64;
    let k = (1.0 / n).sqrt();
    let mut pos: Vec<Point> = (0..node_count)
        .map(|i| {
            let angle = TAU * i as f64 / n;
            Point::new(0.5 + 0.4 * angle.cos(), 0.5 + 0.4 * angle.sin())
        })
        .collect();

    let iterations = iterations.max(1);
    let mut disp = vec![Point::new(0.0, 0.0); node_count];
    for step in 0..iterations {
        let temperature = 0.1 * (1.0 - step as f64 / iterations as f64);

        for d in disp.iter_mut() {
            *d = Point::new(0.0, 0.0);
        }

        for i in 0..node_count {
            for j in (i + 1)..node_count {
                let dx = pos[i].x - pos[j].x;
                let dy = pos[i].y - pos[j].y;
                let dist = (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE);
                let force = k * k / dist;
                let (fx, fy) = (dx / dist * force, dy / dist * force);
                disp[i].x += fx;
                disp[i].y += fy;
                disp[j].x -= fx;
                disp[j].y -= fy;
            }
        }

        for &(a, b) in edges {
            if a == b {
                continue;
            }
            let dx = pos[a].x - pos[b].x;
            let dy = pos[a].y - pos[b].y;
            let dist = (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE);
            let force = dist * dist / k;
            let (fx, fy) = (dx / dist * force, dy / dist * force);
            disp[a].x -= fx;
            disp[a].y -= fy;
            disp[b].x += fx;
            disp[b].y += fy;
        }

        for (p, d) in pos.iter_mut().zip(disp.iter()) {
            let len = (d.x * d.x + d.y * d.y).sqrt().max(MIN_DISTANCE);
            let capped = len.min(temperature);
            p.x = (p.x + d.x / len * capped).clamp(0.0, 1.0);
            p.y = (p.y + d.y / len * capped).clamp(0.0, 1.0);
        }
    }

    normalize(pos)
}

/// Stretches positions so their bounding box spans the unit square.
fn normalize(pos: Vec<Point>) -> Vec<Point> {
    let (mut min_x, mut min_y) = (f64::MAX, f64::MAX);
    let (mut max_x, mut max_y) = (f64::MIN, f64::MIN);
    for p in &pos {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    let w = max_x - min_x;
    let h = max_y - min_y;
    pos.into_iter()
        .map(|p| {
            let x = if w > MIN_DISTANCE { (p.x - min_x) / w } else { 0.5 };
            let y = if h > MIN_DISTANCE { (p.y - min_y) / h } else { 0.5 };
            Point::new(x, y)
        })
        .collect()
}
