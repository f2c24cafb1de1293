//! Same source and analyzer as [`quarter_wave`][super::quarter_wave], with a
//! half-wave plate in place of the quarter-wave plate: the preselected light
//! stays linearly polarized, mirrored to -π/3.

use std::f64::consts::{ FRAC_PI_3, PI };
use weak_sim::{
    config::SimulationParameters,
    polarization::PolarizationAngles,
};
use super::quarter_wave;

pub const RETARDANCE: f64 = PI;

pub fn params() -> SimulationParameters {
    SimulationParameters {
        preselection: PolarizationAngles::new(FRAC_PI_3, 0.0, RETARDANCE),
        ..quarter_wave::params()
    }
}
