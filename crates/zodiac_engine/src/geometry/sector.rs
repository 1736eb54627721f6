use std::f64::consts::{FRAC_PI_2, TAU};

use super::types::{Axis, MapGeometry, Point, Wedge};
use crate::constants::{SECTOR_COUNT, SECTOR_SPAN_DEG};

impl MapGeometry {
    pub fn new(center: Point, radius: f64, padding: f64) -> Self {
        Self {
            center,
            radius,
            padding,
        }
    }

    /// Anchor angle [rad] of sector `index`; index 0 points up, clockwise after that
    #[inline]
    pub fn sector_angle(index: usize) -> f64 {
        (index % SECTOR_COUNT) as f64 * TAU / SECTOR_COUNT as f64 - FRAC_PI_2
    }

    pub fn sector_anchor(&self, index: usize) -> Point {
        self.center.polar(self.radius, Self::sector_angle(index))
    }

    pub fn label_anchor(&self, index: usize) -> Point {
        self.center
            .polar(self.radius + self.padding / 2.0, Self::sector_angle(index))
    }

    /// Hit region of sector `index`.
    ///
    /// The slice is centred on `index * 30deg` with no quarter-turn offset, so it
    /// does not line up with [`MapGeometry::sector_anchor`]. Only rendering uses it;
    /// nearest-sector resolution goes through the anchors.
    pub fn sector_wedge(&self, index: usize) -> Wedge {
        let mid = (index % SECTOR_COUNT) as f64 * SECTOR_SPAN_DEG;
        Wedge {
            center: self.center,
            start_deg: mid - SECTOR_SPAN_DEG / 2.0,
            end_deg: mid + SECTOR_SPAN_DEG / 2.0,
            outer_radius: self.radius + self.padding,
        }
    }

    /// All twelve anchors in canonical order
    pub fn anchors(&self) -> impl Iterator<Item = Point> + '_ {
        (0..SECTOR_COUNT).map(|i| self.sector_anchor(i))
    }

    /// Dashed lines joining each sector to the one across the circle
    pub fn opposition_axes(&self) -> Vec<Axis> {
        (0..SECTOR_COUNT / 2)
            .map(|i| {
                let angle = (i as f64 * SECTOR_SPAN_DEG).to_radians();
                Axis {
                    from: self.center.polar(self.radius, angle),
                    to: self
                        .center
                        .polar(self.radius, angle + std::f64::consts::PI),
                }
            })
            .collect()
    }

    /// Radius of the decorative ring behind the wedges
    pub fn outer_extent(&self) -> f64 {
        self.radius + self.padding
    }
}
