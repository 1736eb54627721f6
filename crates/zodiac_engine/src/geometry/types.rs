use crate::constants::{DEFAULT_CENTER, DEFAULT_PADDING, DEFAULT_RADIUS};

use serde::{Deserialize, Serialize};

/// Map coordinate (px, y axis pointing down)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point at `distance` from `self` in direction `angle` [rad]
    #[inline]
    pub fn polar(self, distance: f64, angle: f64) -> Point {
        Point::new(
            self.x + distance * angle.cos(),
            self.y + distance * angle.sin(),
        )
    }

    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Layout parameters of the circular map
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapGeometry {
    pub center: Point,
    pub radius: f64,
    pub padding: f64,
}

impl Default for MapGeometry {
    fn default() -> Self {
        Self {
            center: Point::new(DEFAULT_CENTER.0, DEFAULT_CENTER.1),
            radius: DEFAULT_RADIUS,
            padding: DEFAULT_PADDING,
        }
    }
}

/// Pie slice with its apex at the map center
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wedge {
    pub center: Point,
    pub start_deg: f64,
    pub end_deg: f64,
    pub outer_radius: f64,
}

impl Wedge {
    pub fn start_point(&self) -> Point {
        self.center
            .polar(self.outer_radius, self.start_deg.to_radians())
    }

    pub fn end_point(&self) -> Point {
        self.center.polar(self.outer_radius, self.end_deg.to_radians())
    }

    /// SVG path data: line out, clockwise arc, line back to the apex
    pub fn to_svg_path(&self) -> String {
        let c = self.center;
        let s = self.start_point();
        let e = self.end_point();
        let r = self.outer_radius;
        format!(
            "M {:.2} {:.2} L {:.2} {:.2} A {:.2} {:.2} 0 0 1 {:.2} {:.2} L {:.2} {:.2} Z",
            c.x, c.y, s.x, s.y, r, r, e.x, e.y, c.x, c.y
        )
    }

    /// Apex followed by `segments + 1` points along the arc
    pub fn polygon(&self, segments: usize) -> Vec<Point> {
        let segments = segments.max(1);
        let step = (self.end_deg - self.start_deg) / segments as f64;
        std::iter::once(self.center)
            .chain((0..=segments).map(|i| {
                self.center
                    .polar(self.outer_radius, (self.start_deg + step * i as f64).to_radians())
            }))
            .collect()
    }
}

/// Straight line through the map center joining two opposite sectors
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Axis {
    pub from: Point,
    pub to: Point,
}
