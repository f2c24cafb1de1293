//! Reductions of a [`JointState`] to measurable traces.

use std::f64::consts::FRAC_1_SQRT_2;
use ndarray as nd;
use num_traits::Zero;
use crate::{
    error::{ SimError, SimResult },
    state::JointState,
    utils::C64,
};

/// Overall constant applied to an intensity profile.
///
/// Postselection changes the total probability normalization, so profiles
/// taken after the analyzer carry an extra factor of `1/√2`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IntensityNorm {
    /// Before postselection; factor 1.
    Preselected,
    /// After postselection; factor `1/√2`.
    Postselected,
}

impl IntensityNorm {
    pub fn factor(&self) -> f64 {
        match *self {
            Self::Preselected => 1.0,
            Self::Postselected => FRAC_1_SQRT_2,
        }
    }
}

/// `I(t) = c (|H(t)|^2 + |V(t)|^2)` with `c` given by `norm`.
pub fn intensity_profile(state: &JointState, norm: IntensityNorm)
    -> nd::Array1<f64>
{
    let c = norm.factor();
    nd::Zip::from(state.horizontal()).and(state.vertical())
        .map_collect(|h, v| c * (h.norm_sqr() + v.norm_sqr()))
}

/// Complex first-order coherence between the two arms, normalized to its own
/// peak:
/// ```text
/// g1(t) = V(t) conj(H(t)) / max_t' |V(t') conj(H(t'))|
/// ```
/// so that `|g1| <= 1` everywhere and `|g1| = 1` at the peak.
///
/// This is not the ensemble-averaged `sqrt(<|H|^2> <|V|^2>)` normalization;
/// there is no ensemble here to average over.
///
/// Fails with [`DegenerateState`][SimError::DegenerateState] if every product
/// vanishes or if any product is not finite.
pub fn degree_of_coherence(state: &JointState) -> SimResult<nd::Array1<C64>> {
    let raw: nd::Array1<C64>
        = nd::Zip::from(state.vertical()).and(state.horizontal())
        .map_collect(|v, h| v * h.conj());
    if raw.iter().any(|g| !g.is_finite()) {
        return Err(SimError::DegenerateState(
            "coherence normalization: non-finite V·conj(H) product"));
    }
    let peak: f64 = raw.iter().map(|g| g.norm()).fold(0.0, f64::max);
    if peak.is_zero() {
        return Err(SimError::DegenerateState(
            "coherence normalization: all V·conj(H) products are zero"));
    }
    Ok(raw.mapv(|g| g / peak))
}

/// Magnitude `|g1(t)|` of a coherence trace.
pub fn coherence_magnitude(g1: &nd::Array1<C64>) -> nd::Array1<f64> {
    g1.mapv(|g| g.norm())
}

#[cfg(test)]
mod tests {
    use crate::{
        c,
        grid::TimeGrid,
        pointer::PointerWave,
        polarization::PolarizationVector,
        postselect::postselect,
        state::couple,
    };
    use super::*;

    fn sample_state() -> JointState {
        let h = nd::array![c!(1.0, 1.0), c!(0.5), c!(0.0, -2.0), c!(0.1, 0.1)];
        let v = nd::array![c!(0.0, 1.0), c!(-3.0), c!(1.0, 1.0), c!(0.0)];
        JointState::new(h, v).unwrap()
    }

    #[test]
    fn intensity_values() {
        let state = sample_state();
        let I = intensity_profile(&state, IntensityNorm::Preselected);
        let expected = [3.0, 9.25, 6.0, 0.02];
        I.iter().zip(expected)
            .for_each(|(i, e)| assert!((i - e).abs() < 1e-12));
        assert!(I.iter().all(|i| *i >= 0.0));
        let I_post = intensity_profile(&state, IntensityNorm::Postselected);
        I_post.iter().zip(I.iter())
            .for_each(|(p, i)| assert_eq!(*p, FRAC_1_SQRT_2 * i));
    }

    #[test]
    fn trivial_analyzer_scales_by_inverse_root_two() {
        let grid = TimeGrid::centered(10e-9, 101).unwrap();
        let psi = PointerWave::gaussian(&grid, 10e-9, 640e-9, 0.0).unwrap();
        let state = couple(&PolarizationVector::from_angles(0.0, 0.0, 0.0), &psi, &grid)
            .unwrap();
        let pre = intensity_profile(&state, IntensityNorm::Preselected);
        let out = postselect(&state, 0.0, 0.0, 0.0, &grid).unwrap();
        let post = intensity_profile(&out, IntensityNorm::Postselected);
        post.iter().zip(pre.iter())
            .for_each(|(p, i)| assert_eq!(*p, i * FRAC_1_SQRT_2));
    }

    #[test]
    fn coherence_bounded_with_unit_peak() {
        let state = sample_state();
        let g1 = degree_of_coherence(&state).unwrap();
        let mag = coherence_magnitude(&g1);
        assert_eq!(g1.len(), state.len());
        assert!(mag.iter().all(|m| *m <= 1.0 + 1e-15));
        // |V conj H| = √2, 1.5, 2√2, 0; the third sample is the peak
        assert!((mag[2] - 1.0).abs() < 1e-15);
        assert!((mag[0] - 0.5).abs() < 1e-15);
        assert_eq!(mag[3], 0.0);
        let expected = c!(1.0, 1.0) * c!(0.0, 2.0) / 8.0_f64.sqrt();
        assert!((g1[2] - expected).norm() < 1e-15);
    }

    #[test]
    fn degenerate_when_amplitudes_overflow() {
        let h = nd::array![c!(f64::INFINITY), c!(1.0), c!(1.0)];
        let v = nd::array![c!(1.0), c!(0.5), c!(f64::NAN)];
        let state = JointState::new(h, v).unwrap();
        assert!(matches!(
            degree_of_coherence(&state),
            Err(SimError::DegenerateState(_))
        ));
    }

    #[test]
    fn degenerate_when_arms_never_overlap() {
        let h = nd::array![c!(1.0), c!(0.0), c!(2.0)];
        let v = nd::array![c!(0.0), c!(3.0), c!(0.0)];
        let state = JointState::new(h, v).unwrap();
        assert!(matches!(
            degree_of_coherence(&state),
            Err(SimError::DegenerateState(_))
        ));
    }
}
