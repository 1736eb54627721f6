use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use super::colors::*;
use super::{MapView, RenderOptions};
use crate::constants::{BACKGROUND_MARGIN, MARKER_HEIGHT, MARKER_WIDTH, SIGN_DISC_RADIUS};
use crate::error::Result;

use log::info;

/// Escapes text for SVG content and attributes
pub fn html_encode(text: &str) -> String {
    text.replace("&", "&amp;")
        .replace("<", "&lt;")
        .replace(">", "&gt;")
        .replace("\"", "&quot;")
        .replace("'", "&#x27;")
}

/// Writes the whole map as an SVG document
pub fn write_svg<W: Write>(w: &mut W, view: &MapView, opt: &RenderOptions) -> Result<()> {
    let size = opt.canvas_size;
    let geom = view.geometry;
    let c = geom.center;

    writeln!(
        w,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}">"#
    )?;

    // background
    writeln!(
        w,
        r#"<circle class="background" cx="{:.2}" cy="{:.2}" r="{:.2}" fill="{}" stroke="{}" stroke-width="2"/>"#,
        c.x,
        c.y,
        geom.outer_extent() + BACKGROUND_MARGIN,
        BACKGROUND_FILL,
        BACKGROUND_STROKE
    )?;

    // sectors
    w.write_all(b"<g class=\"sectors\">\n")?;
    for (index, info) in view.sectors() {
        let fill = if view.is_highlighted(info.key) {
            SECTOR_HIGHLIGHT
        } else {
            "none"
        };
        writeln!(
            w,
            r#"<path class="sector" data-sign="{}" d="{}" fill="{}" stroke="{}" stroke-opacity="0.2" stroke-width="1"/>"#,
            info.key,
            geom.sector_wedge(index).to_svg_path(),
            fill,
            SECTOR_STROKE
        )?;
    }
    w.write_all(b"</g>\n")?;

    // opposition axes
    w.write_all(b"<g class=\"axes\">\n")?;
    for axis in geom.opposition_axes() {
        writeln!(
            w,
            r#"<line class="axis" x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="1" stroke-dasharray="6"/>"#,
            axis.from.x, axis.from.y, axis.to.x, axis.to.y, AXIS_STROKE
        )?;
    }
    w.write_all(b"</g>\n")?;

    // sign discs with symbol and name
    w.write_all(b"<g class=\"signs\">\n")?;
    for (index, info) in view.sectors() {
        let pos = geom.sector_anchor(index);
        let (stroke, stroke_width) = sign_stroke(view.emphasis(info.key));
        writeln!(
            w,
            r#"<g class="sign" data-sign="{}" transform="translate({:.2}, {:.2})">"#,
            info.key, pos.x, pos.y
        )?;
        writeln!(
            w,
            r#"<circle r="{SIGN_DISC_RADIUS}" fill="{SIGN_FILL}" stroke="{stroke}" stroke-width="{stroke_width}"/>"#
        )?;
        writeln!(
            w,
            r#"<text text-anchor="middle" dy="-0.2em" font-size="36" font-weight="bold" fill="{LABEL_FILL}">{}</text>"#,
            info.symbol
        )?;
        writeln!(
            w,
            r#"<text text-anchor="middle" dy="1.5em" font-size="18" font-weight="bold" fill="{LABEL_FILL}">{}</text>"#,
            html_encode(info.name)
        )?;
        w.write_all(b"</g>\n")?;
    }
    w.write_all(b"</g>\n")?;

    // placed people
    w.write_all(b"<g class=\"people\">\n")?;
    for person in view.placed {
        let Some(pos) = person.position else {
            continue;
        };
        let fill = if view.is_highlighted(person.sign) {
            MARKER_HIGHLIGHT
        } else {
            MARKER_FILL
        };
        writeln!(
            w,
            r#"<g class="person" data-person="{}" transform="translate({:.2}, {:.2})">"#,
            html_encode(&person.id),
            pos.x,
            pos.y
        )?;
        writeln!(
            w,
            r#"<rect x="{:.1}" y="{:.1}" width="{MARKER_WIDTH}" height="{MARKER_HEIGHT}" rx="6" fill="{fill}"/>"#,
            -MARKER_WIDTH / 2.0,
            -MARKER_HEIGHT / 2.0
        )?;
        writeln!(
            w,
            r#"<text text-anchor="middle" dy="0.35em" font-size="14" fill="{LABEL_FILL}">{}</text>"#,
            html_encode(&person.name)
        )?;
        w.write_all(b"</g>\n")?;
    }
    w.write_all(b"</g>\n")?;

    w.write_all(b"</svg>\n")?;
    Ok(())
}

/// Renders the map into an SVG string
pub fn render_svg(view: &MapView, opt: &RenderOptions) -> Result<String> {
    let mut buf = Vec::new();
    write_svg(&mut buf, view, opt)?;
    String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
}

/// Writes the map to `output_path`, creating parent directories
pub fn save_svg<P: AsRef<Path>>(view: &MapView, opt: &RenderOptions, output_path: P) -> Result<()> {
    let output_path = output_path.as_ref();
    if let Some(parent) = output_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let mut w = BufWriter::new(File::create(output_path)?);
    write_svg(&mut w, view, opt)?;
    w.flush()?;
    info!("Map saved to: {}", output_path.display());
    Ok(())
}
