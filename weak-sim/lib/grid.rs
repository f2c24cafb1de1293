//! Discretized time axis.

use std::ops::Deref;
use ndarray as nd;
use crate::error::{ SimError, SimResult };

/// Uniformly spaced, strictly increasing sample times.
///
/// Always holds at least two points.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeGrid(nd::Array1<f64>);

impl Deref for TimeGrid {
    type Target = nd::Array1<f64>;

    fn deref(&self) -> &Self::Target { &self.0 }
}

impl AsRef<nd::Array1<f64>> for TimeGrid {
    fn as_ref(&self) -> &nd::Array1<f64> { &self.0 }
}

impl From<TimeGrid> for nd::Array1<f64> {
    fn from(grid: TimeGrid) -> Self { grid.0 }
}

impl TimeGrid {
    /// `n` evenly spaced points from `start` to `stop`, inclusive.
    ///
    /// Fails if `n < 2`, if either endpoint is not finite, or if
    /// `stop <= start`.
    pub fn linspace(start: f64, stop: f64, n: usize) -> SimResult<Self> {
        if n < 2 {
            return Err(SimError::invalid(
                "time_points", format!("need at least 2 samples; got {n}")));
        }
        SimError::check_finite("start", start)?;
        SimError::check_finite("stop", stop)?;
        if stop <= start {
            return Err(SimError::invalid(
                "stop", format!("must exceed start ({start}); got {stop}")));
        }
        let step = (stop - start) / (n - 1) as f64;
        let t: nd::Array1<f64>
            = nd::Array1::from_shape_fn(n, |i| start + i as f64 * step);
        Ok(Self(t))
    }

    /// `n` points symmetric about zero, covering `[-half_width, half_width]`.
    pub fn centered(half_width: f64, n: usize) -> SimResult<Self> {
        let half_width = SimError::check_positive("half_width", half_width)?;
        Self::linspace(-half_width, half_width, n)
    }

    /// First sample time.
    pub fn start(&self) -> f64 { self.0[0] }

    /// Last sample time.
    pub fn stop(&self) -> f64 { self.0[self.0.len() - 1] }

    /// Spacing between adjacent samples.
    pub fn step(&self) -> f64 {
        (self.stop() - self.start()) / (self.0.len() - 1) as f64
    }

    /// Consume `self`, returning the underlying array.
    pub fn into_array(self) -> nd::Array1<f64> { self.0 }
}

/// Free-function form of [`TimeGrid::linspace`].
pub fn linspace(start: f64, stop: f64, n: usize) -> SimResult<TimeGrid> {
    TimeGrid::linspace(start, stop, n)
}
