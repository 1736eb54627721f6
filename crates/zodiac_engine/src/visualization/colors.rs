use super::Emphasis;
use image::Rgb;

/// SVG colors
pub const BACKGROUND_FILL: &str = "#ffffff";
pub const BACKGROUND_STROKE: &str = "#c7d2fe";
pub const SECTOR_STROKE: &str = "#4f46e5";
pub const SECTOR_HIGHLIGHT: &str = "#e0e7ff";
pub const AXIS_STROKE: &str = "#a5b4fc";
pub const SIGN_FILL: &str = "#a855f7";
pub const LABEL_FILL: &str = "#ffffff";
pub const MARKER_FILL: &str = "#1e293b";
pub const MARKER_HIGHLIGHT: &str = "#4338ca";

/// Stroke color and width of a sign disc
pub fn sign_stroke(emphasis: Emphasis) -> (&'static str, f32) {
    match emphasis {
        Emphasis::Selected => ("#ffffff", 4.0),
        Emphasis::Opposite => ("#c7d2fe", 3.0),
        Emphasis::Plain => ("#7e22ce", 1.0),
    }
}

/// Raster colors
pub struct Colors;

impl Colors {
    pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    pub const BACKGROUND_STROKE: Rgb<u8> = Rgb([199, 210, 254]);
    pub const SECTOR_STROKE: Rgb<u8> = Rgb([180, 178, 240]);
    pub const SECTOR_HIGHLIGHT: Rgb<u8> = Rgb([224, 231, 255]);
    pub const AXIS: Rgb<u8> = Rgb([165, 180, 252]);
    pub const SIGN: Rgb<u8> = Rgb([168, 85, 247]);
    pub const SIGN_SELECTED: Rgb<u8> = Rgb([192, 132, 252]);
    pub const SIGN_OPPOSITE: Rgb<u8> = Rgb([147, 51, 234]);
    pub const MARKER: Rgb<u8> = Rgb([30, 41, 59]);
    pub const MARKER_HIGHLIGHT: Rgb<u8> = Rgb([67, 56, 202]);
}

/// Fill of a sign disc in the PNG export
pub fn sign_fill(emphasis: Emphasis) -> Rgb<u8> {
    match emphasis {
        Emphasis::Selected => Colors::SIGN_SELECTED,
        Emphasis::Opposite => Colors::SIGN_OPPOSITE,
        Emphasis::Plain => Colors::SIGN,
    }
}
