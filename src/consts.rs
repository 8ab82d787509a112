// Floating point comparisons
pub const FEQ_EPSILON: f64 = 0.0001;

// Shading
pub const SHININESS: f64 = 20.0;
pub const AMBIENT: f64 = 0.1;
pub const SHADOW_BIAS: f64 = 0.1;

// Projection
pub const FOCAL_DISTANCE: f64 = 1.0;

// Output
pub const MAX_CHANNEL_VAL: u8 = 255;
pub const PPM_LINE_WIDTH: usize = 70;
