use super::types::{MapGeometry, Point};
use crate::catalog::Sign;

/// Sign whose sector anchor is nearest to `point`.
///
/// Linear scan in canonical order with a strict `<`, so equidistant anchors
/// resolve to the lower index. Non-finite coordinates fall back to index 0.
pub fn resolve(geom: &MapGeometry, point: Point) -> Sign {
    let mut nearest = 0;
    let mut min_distance = f64::INFINITY;

    for (index, anchor) in geom.anchors().enumerate() {
        let distance = point.distance(anchor);
        if distance < min_distance {
            min_distance = distance;
            nearest = index;
        }
    }

    Sign::from_index(nearest)
}
