// Terrain shaping
pub const RUNWAY_BED_HEIGHT: f64 = -0.5; // m, flat bed under the runway mesh
pub const RUNWAY_CARVE_MARGIN: f64 = 15.0; // m, added to each half-extent of the runway
pub const LAYER_RUNWAY_CLEARANCE: f64 = 1.0; // m, secondary layers stay this far under the bed

pub const RUGGED_OCTAVES: usize = 5;
pub const RUGGED_PERSISTENCE: f64 = 0.5;
pub const RUGGED_LACUNARITY: f64 = 2.0;
pub const RUGGED_PEAK_EXPONENT: f64 = 2.5;
pub const RUGGED_SMOOTH_RADIUS: f64 = 1500.0; // m, radial fade-in around the origin

pub const AMPLIFY_KNEE: f64 = 250.0; // m
pub const ROLLING_BAND_FACTOR: f64 = 5.0; // fade band width in runway widths

pub const DEFAULT_TILE_OVERLAP: f32 = 0.2; // m
pub const FALLBACK_GROUND_COLOR: [f32; 3] = [1.0, 0.0, 1.0];

// Flight
pub const DISPLAY_SPEED_FACTOR: f64 = 3.0; // internal units to displayed knots-ish
pub const ALTITUDE_MILESTONES: [u32; 3] = [500, 1000, 2500]; // m
pub const NOSE_DIVE_SPEED: f64 = 50.0; // m/s, vertical
pub const GROUND_HUGGER_TIME: f64 = 60.0; // s of continuous ground proximity

// Secondary layer shaping
pub const ISLAND_MASK_SCALE: f64 = 0.25; // mask frequency relative to relief
pub const CLIFF_STEEPNESS: f64 = 4.0;
pub const RIDGE_SHARPNESS: i32 = 3;
