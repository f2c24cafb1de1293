//! Sequencing of the numerical stages.
//!
//! A run is a single forward pass:
//! grid → pointer → preselection coupling → weak interaction → intensity →
//! postselection → intensity → coherence.
//! Each stage consumes only the previous stage's output and the static
//! parameters, and the first failure halts the run.

use ndarray as nd;
use rayon::iter::{ IntoParallelRefIterator, ParallelIterator };
use tracing::debug;
use crate::{
    config::SimulationParameters,
    error::SimResult,
    grid::TimeGrid,
    interferometer::interfere,
    observables::{
        IntensityNorm,
        coherence_magnitude,
        degree_of_coherence,
        intensity_profile,
    },
    pointer::PointerWave,
    postselect::project,
    state::{ JointState, couple },
    utils::C64,
};

/// Everything produced by one run.
#[derive(Clone, Debug, PartialEq)]
pub struct PipelineOutput {
    pub time: TimeGrid,
    pub pointer: PointerWave,
    /// Pointer coupled to the preselected polarization.
    pub coupled: JointState,
    /// State after the weak interaction.
    pub interfered: JointState,
    /// State after the analyzer.
    pub postselected: JointState,
    /// Intensity before postselection.
    pub intensity: nd::Array1<f64>,
    /// Intensity after postselection.
    pub post_intensity: nd::Array1<f64>,
    /// Complex degree of coherence after postselection.
    pub coherence: nd::Array1<C64>,
}

impl PipelineOutput {
    /// Number of time samples.
    pub fn len(&self) -> usize { self.time.len() }

    pub fn is_empty(&self) -> bool { self.time.is_empty() }

    /// `|g1(t)|`.
    pub fn coherence_magnitude(&self) -> nd::Array1<f64> {
        coherence_magnitude(&self.coherence)
    }
}

fn log_stage(stage: &'static str, state: &JointState) {
    if let Some(first) = state.get(0) {
        debug!(stage, h0 = %first.horizontal, v0 = %first.vertical, "stage done");
    }
}

/// Run the full pipeline for one parameter set.
pub fn run(params: &SimulationParameters) -> SimResult<PipelineOutput> {
    params.validate()?;

    let time = params.grid()?;
    debug!(
        n = time.len(),
        start = time.start(),
        stop = time.stop(),
        "time grid"
    );

    let pointer = PointerWave::gaussian(
        &time, params.pulse_width, params.wavelength, params.propagation)?;
    debug!(psi0 = %pointer[0], "pointer");

    let preselection = params.preselection.vector("preselection")?;
    debug!(
        h = %preselection.horizontal,
        v = %preselection.vertical,
        "preselection Jones vector"
    );
    let coupled = couple(&preselection, &pointer, &time)?;
    log_stage("couple", &coupled);

    let interfered
        = interfere(&coupled, &time, params.delay, &params.branch, params.rules())?;
    log_stage("interfere", &interfered);
    let intensity = intensity_profile(&interfered, IntensityNorm::Preselected);

    let analyzer = params.postselection.vector("postselection")?;
    debug!(
        h = %analyzer.horizontal,
        v = %analyzer.vertical,
        h_conj = %analyzer.horizontal.conj(),
        v_conj = %analyzer.vertical.conj(),
        "postselection Jones vector"
    );
    let postselected = project(&interfered, &analyzer, &time)?;
    log_stage("postselect", &postselected);
    let post_intensity
        = intensity_profile(&postselected, IntensityNorm::Postselected);

    let coherence = degree_of_coherence(&postselected)?;

    Ok(PipelineOutput {
        time,
        pointer,
        coupled,
        interfered,
        postselected,
        intensity,
        post_intensity,
        coherence,
    })
}

/// Run many independent parameter sets in parallel.
///
/// Results are returned in the same order as `params`; a failure in one run
/// does not affect the others.
pub fn sweep(params: &[SimulationParameters]) -> Vec<SimResult<PipelineOutput>> {
    params.par_iter()
        .map(run)
        .collect()
}
