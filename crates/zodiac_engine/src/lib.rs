pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod geometry;
pub mod highlight;
pub mod person;
pub mod persistence;
pub mod store;
pub mod visualization;

pub use catalog::{Element, Sign, ZodiacSign};
pub use config::Config;
pub use error::{Result, ZodiacError};
pub use events::{DragPayload, EventOutcome, UiEvent};
pub use geometry::{MapGeometry, Point, resolve};
pub use highlight::is_highlighted;
pub use person::{Person, Slot};
pub use persistence::{DirStore, MemoryStore, RosterStore};
pub use store::PlacementStore;
pub use visualization::{MapView, RenderOptions, export_png, render_svg, save_svg, write_svg};
