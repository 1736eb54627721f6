/// Number of sectors on the map
pub const SECTOR_COUNT: usize = 12;
pub const SECTOR_SPAN_DEG: f64 = 360.0 / SECTOR_COUNT as f64; // 30 [deg]

/// Default map layout (px)
pub const DEFAULT_CENTER: (f64, f64) = (650.0, 650.0);
pub const DEFAULT_RADIUS: f64 = 420.0;
pub const DEFAULT_PADDING: f64 = 140.0;
pub const DEFAULT_CANVAS_SIZE: u32 = 1300;

/// Sign disc and person marker sizes (px)
pub const SIGN_DISC_RADIUS: f64 = 60.0;
pub const MARKER_WIDTH: f64 = 90.0;
pub const MARKER_HEIGHT: f64 = 28.0;

/// Background ring drawn outside the wedges (px)
pub const BACKGROUND_MARGIN: f64 = 50.0;

