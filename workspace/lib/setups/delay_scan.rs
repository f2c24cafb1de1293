//! Scan of the coupling delay over a range where the damping factor
//! `exp(-2π τ t)` becomes appreciable across the pulse.

use weak_sim::config::SimulationParameters;
use super::quarter_wave;

pub const DELAY_MIN: f64 = 0.0; // s
pub const DELAY_MAX: f64 = 2e7; // s
pub const NUM_DELAYS: usize = 41;
pub const TIME_POINTS: usize = 500;

/// Delay values to scan.
pub fn delays() -> Vec<f64> {
    let step = (DELAY_MAX - DELAY_MIN) / (NUM_DELAYS - 1) as f64;
    (0..NUM_DELAYS).map(|k| DELAY_MIN + k as f64 * step).collect()
}

/// One parameter set per delay, otherwise identical to the quarter-wave
/// preset.
pub fn params() -> Vec<SimulationParameters> {
    let base = SimulationParameters {
        time_points: TIME_POINTS,
        ..quarter_wave::params()
    };
    delays().into_iter()
        .map(|delay| SimulationParameters { delay, ..base.clone() })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_covers_range() {
        let d = delays();
        assert_eq!(d.len(), NUM_DELAYS);
        assert_eq!(d[0], DELAY_MIN);
        assert!((d[NUM_DELAYS - 1] - DELAY_MAX).abs() < 1e-6);
        assert!(params().iter().all(|p| p.validate().is_ok()));
    }
}
