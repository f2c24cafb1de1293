//! 640 nm pulsed diode, preselected through a quarter-wave plate at π/3 and
//! analyzed with a linear polarizer at π/4.

use std::f64::consts::{ FRAC_PI_2, FRAC_PI_3, FRAC_PI_4 };
use weak_sim::{
    config::SimulationParameters,
    interferometer::{ InteractionSource, ZeroAlias },
    polarization::PolarizationAngles,
};

pub const WAVELENGTH: f64 = 640e-9; // m
pub const PULSE_WIDTH: f64 = 10e-9; // s
pub const DELAY: f64 = 1e-3; // s
pub const TIME_POINTS: usize = 1000;
// quarter-wave retardance on the vertical component; may be negative
pub const RETARDANCE: f64 = FRAC_PI_2;

pub fn params() -> SimulationParameters {
    SimulationParameters {
        wavelength: WAVELENGTH,
        pulse_width: PULSE_WIDTH,
        propagation: 0.0,
        delay: DELAY,
        time_points: TIME_POINTS,
        half_width: Some(PULSE_WIDTH),
        branch: "h".to_string(),
        zero_alias: ZeroAlias::Horizontal,
        interaction_source: InteractionSource::HorizontalArm,
        preselection: PolarizationAngles::new(FRAC_PI_3, 0.0, RETARDANCE),
        postselection: PolarizationAngles::new(FRAC_PI_4, 0.0, 0.0),
    }
}
