use super::colors::{Colors, sign_fill};
use super::{MapView, RenderOptions};
use crate::constants::{BACKGROUND_MARGIN, MARKER_HEIGHT, MARKER_WIDTH, SIGN_DISC_RADIUS};
use crate::error::{Result, ZodiacError};
use crate::geometry::Point;

use ab_glyph::{FontVec, PxScale};
use font_kit::{family_name::FamilyName, properties::Properties, source::SystemSource};
use image::{ImageBuffer, Rgb, RgbImage};
use imageproc::{
    drawing::{
        draw_filled_circle_mut, draw_filled_rect_mut, draw_hollow_circle_mut,
        draw_line_segment_mut, draw_polygon_mut, draw_text_mut, text_size,
    },
    point::Point as PixelPoint,
    rect::Rect,
};
use log::{info, warn};
use std::{fs, path::Path};

const WEDGE_SEGMENTS: usize = 24;
const DASH_PX: f64 = 6.0;

/// Families tried in order when no font file is configured
const SYSTEM_FONT_FAMILIES: [&str; 5] = [
    "Noto Sans CJK JP",
    "Hiragino Sans",
    "Yu Gothic",
    "Arial",
    "DejaVu Sans",
];

/// Drawing context for the PNG export
pub struct Renderer {
    pub image: RgbImage,
    pub width: u32,
    pub height: u32,
    pub font: Option<FontVec>,
}

impl Renderer {
    pub fn new(width: u32, height: u32, font: Option<FontVec>) -> Self {
        let image = ImageBuffer::from_pixel(width, height, Colors::WHITE);
        Self {
            image,
            width,
            height,
            font,
        }
    }

    /// Filled polygon. Fewer than three distinct pixels draw nothing.
    pub fn draw_polygon(&mut self, points: &[Point], color: Rgb<u8>) {
        let mut poly: Vec<PixelPoint<i32>> = Vec::with_capacity(points.len());
        for p in points {
            let px = PixelPoint::new(p.x.round() as i32, p.y.round() as i32);
            if poly.last() != Some(&px) {
                poly.push(px);
            }
        }
        // imageproc rejects closed polygons
        while poly.len() > 1 && poly.first() == poly.last() {
            poly.pop();
        }
        if poly.len() >= 3 {
            draw_polygon_mut(&mut self.image, &poly, color);
        }
    }

    pub fn draw_polygon_outline(&mut self, points: &[Point], color: Rgb<u8>) {
        for (i, from) in points.iter().enumerate() {
            let to = points[(i + 1) % points.len()];
            self.draw_line(*from, to, color);
        }
    }

    pub fn draw_line(&mut self, from: Point, to: Point, color: Rgb<u8>) {
        draw_line_segment_mut(
            &mut self.image,
            (from.x as f32, from.y as f32),
            (to.x as f32, to.y as f32),
            color,
        );
    }

    pub fn draw_dashed_line(&mut self, from: Point, to: Point, color: Rgb<u8>) {
        let length = from.distance(to);
        if length == 0.0 {
            return;
        }
        let (dx, dy) = ((to.x - from.x) / length, (to.y - from.y) / length);
        let mut t = 0.0;
        while t < length {
            let end = (t + DASH_PX).min(length);
            self.draw_line(
                Point::new(from.x + dx * t, from.y + dy * t),
                Point::new(from.x + dx * end, from.y + dy * end),
                color,
            );
            t += DASH_PX * 2.0;
        }
    }

    /// Whether a shape reaching `extent` px around `center` touches the canvas
    fn touches_canvas(&self, center: Point, extent: f64) -> bool {
        center.is_finite()
            && center.x + extent >= 0.0
            && center.y + extent >= 0.0
            && center.x - extent <= self.width as f64
            && center.y - extent <= self.height as f64
    }

    pub fn draw_circle(&mut self, center: Point, radius: f64, color: Rgb<u8>) {
        if !self.touches_canvas(center, radius) {
            return;
        }
        draw_filled_circle_mut(
            &mut self.image,
            (center.x.round() as i32, center.y.round() as i32),
            radius.round() as i32,
            color,
        );
    }

    pub fn draw_circle_outline(&mut self, center: Point, radius: f64, color: Rgb<u8>) {
        if !self.touches_canvas(center, radius) {
            return;
        }
        draw_hollow_circle_mut(
            &mut self.image,
            (center.x.round() as i32, center.y.round() as i32),
            radius.round() as i32,
            color,
        );
    }

    /// Filled rectangle centred on `center`, clipped to the canvas
    pub fn draw_rect_centered(&mut self, center: Point, width: f64, height: f64, color: Rgb<u8>) {
        let left = (center.x - width / 2.0).max(0.0);
        let top = (center.y - height / 2.0).max(0.0);
        let right = (center.x + width / 2.0).min(self.width as f64);
        let bottom = (center.y + height / 2.0).min(self.height as f64);
        if !(left < right && top < bottom) {
            return;
        }
        let rect = Rect::at(left.round() as i32, top.round() as i32).of_size(
            ((right - left).round() as u32).max(1),
            ((bottom - top).round() as u32).max(1),
        );
        draw_filled_rect_mut(&mut self.image, rect, color);
    }

    /// Text centred on `center`. Does nothing without a font.
    pub fn draw_text_centered(&mut self, center: Point, text: &str, font_size: f32, color: Rgb<u8>) {
        if !self.touches_canvas(center, 0.0) {
            return;
        }
        let Some(font) = &self.font else {
            return;
        };
        let scale = PxScale::from(font_size);
        let (w, h) = text_size(scale, font, text);
        draw_text_mut(
            &mut self.image,
            color,
            (center.x - w as f64 / 2.0).round() as i32,
            (center.y - h as f64 / 2.0).round() as i32,
            scale,
            font,
            text,
        );
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.image.save(path)?;
        Ok(())
    }
}

/// Reads a font file from `path`
pub fn load_font(path: &Path) -> Result<FontVec> {
    let bytes = fs::read(path).map_err(|e| {
        ZodiacError::Font(format!("Failed to read font '{}': {}", path.display(), e))
    })?;
    FontVec::try_from_vec(bytes)
        .map_err(|e| ZodiacError::Font(format!("Invalid font '{}': {}", path.display(), e)))
}

/// First installed family from [`SYSTEM_FONT_FAMILIES`], then any sans-serif
fn load_system_font() -> Option<FontVec> {
    let source = SystemSource::new();
    let families = SYSTEM_FONT_FAMILIES
        .iter()
        .map(|name| FamilyName::Title(name.to_string()))
        .chain(std::iter::once(FamilyName::SansSerif));

    for family in families {
        if let Ok(handle) = source.select_best_match(&[family], &Properties::new())
            && let Ok(font) = handle.load()
            && let Some(bytes) = font.copy_font_data()
            && let Ok(font) = FontVec::try_from_vec(bytes.to_vec())
        {
            return Some(font);
        }
    }
    None
}

/// Configured font file, otherwise a system font.
///
/// A configured file that cannot be loaded is an error. When no system font
/// is found either, labels are skipped.
pub fn resolve_font(opt: &RenderOptions) -> Result<Option<FontVec>> {
    if let Some(path) = &opt.font_path {
        return load_font(path).map(Some);
    }
    let font = load_system_font();
    if font.is_none() {
        warn!("No system font found, exporting the map without labels");
    }
    Ok(font)
}

/// Draws the map with the font from [`resolve_font`]
pub fn render_image(view: &MapView, opt: &RenderOptions) -> Result<Renderer> {
    let font = resolve_font(opt)?;
    let mut renderer = Renderer::new(opt.canvas_size, opt.canvas_size, font);
    draw_map(&mut renderer, view, opt);
    Ok(renderer)
}

/// Draws every layer of the map onto `renderer`
pub fn draw_map(renderer: &mut Renderer, view: &MapView, opt: &RenderOptions) {
    let geom = view.geometry;

    // background
    renderer.draw_circle_outline(
        geom.center,
        geom.outer_extent() + BACKGROUND_MARGIN,
        Colors::BACKGROUND_STROKE,
    );

    // sectors, filled only when highlighted
    for (index, info) in view.sectors() {
        let polygon = geom.sector_wedge(index).polygon(WEDGE_SEGMENTS);
        if view.is_highlighted(info.key) {
            renderer.draw_polygon(&polygon, Colors::SECTOR_HIGHLIGHT);
        }
        renderer.draw_polygon_outline(&polygon, Colors::SECTOR_STROKE);
    }

    // opposition axes
    for axis in geom.opposition_axes() {
        renderer.draw_dashed_line(axis.from, axis.to, Colors::AXIS);
    }

    // sign discs
    for (index, info) in view.sectors() {
        let pos = geom.sector_anchor(index);
        renderer.draw_circle(pos, SIGN_DISC_RADIUS, sign_fill(view.emphasis(info.key)));
        renderer.draw_text_centered(pos, info.name, opt.font_size * 0.7, Colors::WHITE);
    }

    // placed people
    for person in view.placed {
        let Some(pos) = person.position else {
            continue;
        };
        let color = if view.is_highlighted(person.sign) {
            Colors::MARKER_HIGHLIGHT
        } else {
            Colors::MARKER
        };
        renderer.draw_rect_centered(pos, MARKER_WIDTH, MARKER_HEIGHT, color);
        renderer.draw_text_centered(pos, &person.name, opt.font_size * 0.5, Colors::WHITE);
    }
}

/// Renders the map and writes it as PNG, creating parent directories
pub fn export_png<P: AsRef<Path>>(view: &MapView, opt: &RenderOptions, output_path: P) -> Result<()> {
    let output_path = output_path.as_ref();
    if let Some(parent) = output_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let renderer = render_image(view, opt)?;
    renderer.save(output_path)?;
    info!(
        "Map image ({}x{}) saved to: {}",
        renderer.width,
        renderer.height,
        output_path.display()
    );
    Ok(())
}
