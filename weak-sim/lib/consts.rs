//! Physical constants.

// speed of light in vacuum [m / s]
pub const C_LIGHT: f64 = 299_792_458.0;
