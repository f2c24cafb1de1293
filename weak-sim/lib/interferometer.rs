//! Weak interaction on one arm of the Mach-Zehnder interferometer.
//!
//! One polarization arm picks up a real damping factor `exp(-2π τ t)` at each
//! sample time `t`, where `τ` is the coupling delay; the other arm passes
//! through unchanged. The factor models a graded coupling strength rather than
//! a hard translation in time.
//!
//! Two details of the branch selection are configurable through
//! [`BranchRules`]:
//! - which arm the token `"0"` selects ([`ZeroAlias`]);
//! - which amplitude the damping factor is applied to before being written
//!   into the selected arm ([`InteractionSource`]).

use std::f64::consts::TAU;
use ndarray as nd;
use serde::{ Deserialize, Serialize };
use crate::{
    error::{ SimError, SimResult },
    grid::TimeGrid,
    state::JointState,
    utils::C64,
};

/// Polarization arm receiving the weak interaction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DelayedArm {
    Horizontal,
    Vertical,
}

/// Arm selected by the branch token `"0"`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroAlias {
    /// `"0"` behaves like `"H"`.
    #[default]
    Horizontal,
    /// `"0"` behaves like `"V"`.
    Vertical,
}

/// Amplitude read by the interaction operator.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionSource {
    /// Always damp the horizontal amplitude and write the result into the
    /// selected arm; both arms then couple through the same physical path.
    #[default]
    HorizontalArm,
    /// Damp the selected arm's own amplitude.
    SelectedArm,
}

/// Resolution of the branch-selection ambiguities.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BranchRules {
    #[serde(default)]
    pub zero_alias: ZeroAlias,
    #[serde(default)]
    pub source: InteractionSource,
}

impl DelayedArm {
    /// Parse a branch token.
    ///
    /// `"H"`/`"h"` and `"V"`/`"v"` name their arms directly; `"0"` is resolved
    /// by `zero_alias`. Anything else is an
    /// [`InvalidBranchSelector`][SimError::InvalidBranchSelector].
    pub fn parse(token: &str, zero_alias: ZeroAlias) -> SimResult<Self> {
        match token {
            "H" | "h" => Ok(Self::Horizontal),
            "V" | "v" => Ok(Self::Vertical),
            "0" => match zero_alias {
                ZeroAlias::Horizontal => Ok(Self::Horizontal),
                ZeroAlias::Vertical => Ok(Self::Vertical),
            },
            _ => Err(SimError::InvalidBranchSelector(token.to_string())),
        }
    }
}

/// Real damping factors `exp(-2π τ t)` applied to `amplitude`.
///
/// Fails if `delay` is so large that a factor overflows anywhere on the grid.
pub fn interaction_operator(
    amplitude: &nd::Array1<C64>,
    grid: &TimeGrid,
    delay: f64,
) -> SimResult<nd::Array1<C64>>
{
    SimError::check_len("interaction", grid.len(), amplitude.len())?;
    let delay = SimError::check_finite("delay", delay)?;
    let factors: nd::Array1<f64> = grid.mapv(|t| (-TAU * delay * t).exp());
    if let Some(k) = factors.iter().position(|f| !f.is_finite()) {
        return Err(SimError::invalid(
            "delay",
            format!("damping factor overflows at t = {}; got {delay}", grid[k]),
        ));
    }
    let damped: nd::Array1<C64>
        = nd::Zip::from(amplitude).and(&factors)
        .map_collect(|&a, &f| a * f);
    Ok(damped)
}

/// Apply the weak interaction to one arm of `state`, returning a new state.
///
/// `branch` is parsed with [`DelayedArm::parse`] under `rules.zero_alias`;
/// `rules.source` chooses which amplitude is damped. The arm that is not
/// selected is copied through unchanged.
pub fn interfere(
    state: &JointState,
    grid: &TimeGrid,
    delay: f64,
    branch: &str,
    rules: BranchRules,
) -> SimResult<JointState>
{
    let arm = DelayedArm::parse(branch, rules.zero_alias)?;
    interfere_arm(state, grid, delay, arm, rules.source)
}

/// Like [`interfere`], but with the arm already resolved.
pub fn interfere_arm(
    state: &JointState,
    grid: &TimeGrid,
    delay: f64,
    arm: DelayedArm,
    source: InteractionSource,
) -> SimResult<JointState>
{
    state.check_grid("interfere", grid)?;
    let input: &nd::Array1<C64>
        = match (source, arm) {
            (InteractionSource::HorizontalArm, _)
            | (InteractionSource::SelectedArm, DelayedArm::Horizontal)
                => state.horizontal(),
            (InteractionSource::SelectedArm, DelayedArm::Vertical)
                => state.vertical(),
        };
    let delayed = interaction_operator(input, grid, delay)?;
    match arm {
        DelayedArm::Horizontal
            => JointState::new(delayed, state.vertical().clone()),
        DelayedArm::Vertical
            => JointState::new(state.horizontal().clone(), delayed),
    }
}
