//! Collection of pre-defined parameter sets.

pub mod quarter_wave;
pub mod half_wave;
pub mod delay_scan;
