pub mod colors;
pub mod raster;
pub mod svg;

pub use raster::export_png;
pub use svg::{render_svg, save_svg, write_svg};

use crate::catalog::{self, Sign};
use crate::config::Config;
use crate::constants::DEFAULT_CANVAS_SIZE;
use crate::geometry::MapGeometry;
use crate::highlight::is_highlighted;
use crate::person::Person;
use crate::persistence::RosterStore;
use crate::store::PlacementStore;

use std::path::PathBuf;

/// Everything a renderer needs: layout, placed people and the selection
#[derive(Debug, Clone, Copy)]
pub struct MapView<'a> {
    pub geometry: &'a MapGeometry,
    pub placed: &'a [Person],
    pub selected: Option<&'a str>,
}

impl<'a> MapView<'a> {
    pub fn from_store<S: RosterStore>(store: &'a PlacementStore<S>) -> Self {
        Self {
            geometry: store.geometry(),
            placed: store.placed(),
            selected: store.selected_sign(),
        }
    }

    pub fn emphasis(&self, sign: Sign) -> Emphasis {
        match self.selected {
            Some(s) if s == sign.as_ref() => Emphasis::Selected,
            Some(s) if is_highlighted(Some(s), sign.as_ref()) => Emphasis::Opposite,
            _ => Emphasis::Plain,
        }
    }

    pub fn is_highlighted(&self, sign: Sign) -> bool {
        is_highlighted(self.selected, sign.as_ref())
    }

    /// Sectors in canonical order with their catalog entry
    pub fn sectors(&self) -> impl Iterator<Item = (usize, &'static catalog::ZodiacSign)> {
        catalog::all().map(|(sign, info)| (sign.index(), info))
    }
}

/// How strongly a sign is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    Selected,
    Opposite,
    Plain,
}

/// Canvas and label settings shared by the SVG and PNG renderers
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub canvas_size: u32,
    pub font_path: Option<PathBuf>,
    pub font_size: f32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            canvas_size: DEFAULT_CANVAS_SIZE,
            font_path: None,
            font_size: 28.0,
        }
    }
}

impl RenderOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            canvas_size: config.map.canvas_size,
            font_path: config.export.font_path.clone(),
            font_size: config.export.font_size,
        }
    }
}
