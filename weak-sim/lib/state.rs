//! Joint pointer-polarization amplitudes.

use ndarray as nd;
use crate::{
    error::{ SimError, SimResult },
    grid::TimeGrid,
    pointer::PointerWave,
    polarization::PolarizationVector,
    utils::C64,
};

/// Horizontal and vertical amplitudes at every sample of a time grid.
///
/// The state is kept separable: each time sample carries its own copy of a
/// polarization pair scaled by the pointer amplitude, rather than a full
/// tensor product. Both arrays always have the same length.
#[derive(Clone, Debug, PartialEq)]
pub struct JointState {
    horizontal: nd::Array1<C64>,
    vertical: nd::Array1<C64>,
}

impl JointState {
    /// Pair up horizontal and vertical amplitude arrays.
    ///
    /// Fails if they have different lengths.
    pub fn new(horizontal: nd::Array1<C64>, vertical: nd::Array1<C64>)
        -> SimResult<Self>
    {
        SimError::check_len("joint state", horizontal.len(), vertical.len())?;
        Ok(Self { horizontal, vertical })
    }

    /// Number of time samples.
    pub fn len(&self) -> usize { self.horizontal.len() }

    pub fn is_empty(&self) -> bool { self.horizontal.is_empty() }

    /// Horizontal amplitudes.
    pub fn horizontal(&self) -> &nd::Array1<C64> { &self.horizontal }

    /// Vertical amplitudes.
    pub fn vertical(&self) -> &nd::Array1<C64> { &self.vertical }

    /// Polarization pair at sample `k`, if it exists.
    pub fn get(&self, k: usize) -> Option<PolarizationVector> {
        self.horizontal.get(k).zip(self.vertical.get(k))
            .map(|(h, v)| PolarizationVector::new(*h, *v))
    }

    /// Consume `self`, returning the `(horizontal, vertical)` arrays.
    pub fn into_parts(self) -> (nd::Array1<C64>, nd::Array1<C64>) {
        (self.horizontal, self.vertical)
    }

    /// Fail unless `self` is aligned with `grid`.
    pub(crate) fn check_grid(&self, context: &'static str, grid: &TimeGrid)
        -> SimResult<()>
    {
        SimError::check_len(context, grid.len(), self.len())
    }
}

/// Form the separable joint state `ψ(t) ⊗ pol` by scaling `pol` with each
/// pointer sample.
///
/// Fails if `pointer` is not aligned with `grid`.
pub fn couple(pol: &PolarizationVector, pointer: &PointerWave, grid: &TimeGrid)
    -> SimResult<JointState>
{
    SimError::check_len("couple", grid.len(), pointer.len())?;
    let horizontal = pointer.mapv(|a| a * pol.horizontal);
    let vertical = pointer.mapv(|a| a * pol.vertical);
    JointState::new(horizontal, vertical)
}
