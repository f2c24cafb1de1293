//! Jones-vector description of a polarization setting.

use serde::{ Deserialize, Serialize };
use crate::{
    error::{ SimError, SimResult },
    utils::{ C64, cos_sin },
};

/// Angles describing a polarizer/retarder setting in the H/V basis.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolarizationAngles {
    /// Mixing angle θ, in radians, relative to horizontal.
    pub angle: f64,
    /// Phase offset, in radians, on the horizontal component.
    #[serde(default)]
    pub phi_x: f64,
    /// Phase offset, in radians, on the vertical component.
    #[serde(default)]
    pub phi_y: f64,
}

impl PolarizationAngles {
    pub fn new(angle: f64, phi_x: f64, phi_y: f64) -> Self {
        Self { angle, phi_x, phi_y }
    }

    /// Build the corresponding [`PolarizationVector`], checking that all
    /// angles are finite. `name` is used to label the failure.
    pub fn vector(&self, name: &'static str) -> SimResult<PolarizationVector> {
        SimError::check_finite(name, self.angle)?;
        SimError::check_finite(name, self.phi_x)?;
        SimError::check_finite(name, self.phi_y)?;
        Ok(PolarizationVector::from_angles(self.angle, self.phi_x, self.phi_y))
    }
}

impl Default for PolarizationAngles {
    fn default() -> Self { Self { angle: 0.0, phi_x: 0.0, phi_y: 0.0 } }
}

/// A time-independent Jones vector `(H, V)`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PolarizationVector {
    pub horizontal: C64,
    pub vertical: C64,
}

impl PolarizationVector {
    pub fn new(horizontal: C64, vertical: C64) -> Self {
        Self { horizontal, vertical }
    }

    /// `H = cos θ e^{iφx}`, `V = sin θ e^{iφy}`.
    ///
    /// Round-off at the axes is removed, so e.g. `θ = π/2` gives a horizontal
    /// component of exactly zero.
    pub fn from_angles(theta: f64, phi_x: f64, phi_y: f64) -> Self {
        let (ct, st) = cos_sin(theta);
        let (cx, sx) = cos_sin(phi_x);
        let (cy, sy) = cos_sin(phi_y);
        Self {
            horizontal: C64::new(ct * cx, ct * sx),
            vertical: C64::new(st * cy, st * sy),
        }
    }

    /// Pure horizontal polarization.
    pub fn horizontal() -> Self { Self::new(C64::new(1.0, 0.0), C64::new(0.0, 0.0)) }

    /// Pure vertical polarization.
    pub fn vertical() -> Self { Self::new(C64::new(0.0, 0.0), C64::new(1.0, 0.0)) }

    /// Linear polarization at angle `theta` from horizontal.
    pub fn linear(theta: f64) -> Self { Self::from_angles(theta, 0.0, 0.0) }

    /// Linear polarization at `theta` followed by a retarder imposing a phase
    /// `delta` on the vertical component; `delta = ±π/2` is a quarter-wave
    /// plate.
    pub fn retarded(theta: f64, delta: f64) -> Self {
        Self::from_angles(theta, 0.0, delta)
    }

    /// Complex conjugate of both components.
    pub fn conj(&self) -> Self {
        Self::new(self.horizontal.conj(), self.vertical.conj())
    }

    /// `|H|^2 + |V|^2`.
    pub fn intensity(&self) -> f64 {
        self.horizontal.norm_sqr() + self.vertical.norm_sqr()
    }
}

impl From<PolarizationVector> for [C64; 2] {
    fn from(v: PolarizationVector) -> Self { [v.horizontal, v.vertical] }
}
