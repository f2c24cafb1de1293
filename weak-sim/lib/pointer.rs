//! Temporal wavepacket of the light pulse used as the measurement pointer.

use std::{ f64::consts::TAU, ops::Deref };
use ndarray as nd;
use crate::{
    consts::C_LIGHT,
    error::{ SimError, SimResult },
    grid::TimeGrid,
    utils::C64,
};

/// Complex pulse amplitude sampled on a [`TimeGrid`].
#[derive(Clone, Debug, PartialEq)]
pub struct PointerWave(nd::Array1<C64>);

impl Deref for PointerWave {
    type Target = nd::Array1<C64>;

    fn deref(&self) -> &Self::Target { &self.0 }
}

impl AsRef<nd::Array1<C64>> for PointerWave {
    fn as_ref(&self) -> &nd::Array1<C64> { &self.0 }
}

impl From<nd::Array1<C64>> for PointerWave {
    fn from(a: nd::Array1<C64>) -> Self { Self(a) }
}

impl PointerWave {
    /// Gaussian pulse of temporal width `pulse_width` (σ_t) on an optical
    /// carrier of wavelength `wavelength`, observed after propagating a
    /// distance `z`.
    ///
    /// Each sample is
    /// ```text
    /// A exp(-((t - z/c) / 2σ_t)^2) exp(i (k z - ω t))
    /// ```
    /// with `A = (√(2π) σ_t)^(-1/2)`, `ω = 2π c / λ` and `k = 2π / λ`, so that
    /// `∫ |ψ(t)|^2 dt = 1` over the whole real line.
    ///
    /// Fails if `pulse_width` or `wavelength` is not finite and positive, or if
    /// `z` is not finite.
    pub fn gaussian(
        grid: &TimeGrid,
        pulse_width: f64,
        wavelength: f64,
        z: f64,
    ) -> SimResult<Self>
    {
        let sigma = SimError::check_positive("pulse_width", pulse_width)?;
        let lambda = SimError::check_positive("wavelength", wavelength)?;
        let z = SimError::check_finite("propagation", z)?;

        let amplitude = ((TAU.sqrt()) * sigma).sqrt().recip();
        let w = TAU * C_LIGHT / lambda;
        let k = TAU / lambda;
        let t0 = z / C_LIGHT;
        let psi: nd::Array1<C64>
            = grid.mapv(|t| {
                let env = amplitude * (-((t - t0) / (2.0 * sigma)).powi(2)).exp();
                let (s, c) = (k * z - w * t).sin_cos();
                C64::new(env * c, env * s)
            });
        Ok(Self(psi))
    }

    /// Real magnitude profile `|ψ(t)|`.
    pub fn envelope(&self) -> nd::Array1<f64> { self.0.mapv(|a| a.norm()) }

    /// Consume `self`, returning the underlying array.
    pub fn into_array(self) -> nd::Array1<C64> { self.0 }
}

/// Free-function form of [`PointerWave::gaussian`].
pub fn generate_pointer(
    grid: &TimeGrid,
    pulse_width: f64,
    wavelength: f64,
    z: f64,
) -> SimResult<PointerWave>
{
    PointerWave::gaussian(grid, pulse_width, wavelength, z)
}
