pub mod resolver;
pub mod sector;
pub mod types;

pub use resolver::resolve;
pub use types::{Axis, MapGeometry, Point, Wedge};
