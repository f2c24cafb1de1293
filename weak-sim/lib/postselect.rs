//! Projection onto the analyzer (postselection) setting.

use crate::{
    error::SimResult,
    grid::TimeGrid,
    polarization::PolarizationVector,
    state::JointState,
};

/// Project each sample of `state` onto `analyzer`, component by component:
/// `H'(t) = H(t) conj(a_H)` and `V'(t) = V(t) conj(a_V)`.
///
/// The analyzer does not vary in time, so the same two factors apply at every
/// sample.
pub fn project(
    state: &JointState,
    analyzer: &PolarizationVector,
    grid: &TimeGrid,
) -> SimResult<JointState>
{
    state.check_grid("postselect", grid)?;
    let PolarizationVector { horizontal: ah, vertical: av } = analyzer.conj();
    JointState::new(
        state.horizontal().mapv(|h| h * ah),
        state.vertical().mapv(|v| v * av),
    )
}

/// Postselect `state` onto the polarization `H = cos θ e^{iφx}`,
/// `V = sin θ e^{iφy}`.
pub fn postselect(
    state: &JointState,
    angle: f64,
    phi_x: f64,
    phi_y: f64,
    grid: &TimeGrid,
) -> SimResult<JointState>
{
    let analyzer = PolarizationVector::from_angles(angle, phi_x, phi_y);
    project(state, &analyzer, grid)
}
