//! Simulation parameters and their TOML representation.

use std::{
    f64::consts::{ FRAC_PI_2, FRAC_PI_3, FRAC_PI_4 },
    fs,
    path::{ Path, PathBuf },
};
use serde::{ Deserialize, Serialize };
use thiserror::Error;
use crate::{
    error::{ SimError, SimResult },
    grid::TimeGrid,
    interferometer::{ BranchRules, DelayedArm, InteractionSource, ZeroAlias },
    polarization::PolarizationAngles,
};

/// Errors from loading a parameter file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("couldn't read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("couldn't parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(#[from] SimError),
}

/// Everything needed to run the pipeline once.
///
/// Any subset of fields may be given in a TOML file; missing ones take their
/// values from [`Default`], which is a 640 nm, 10 ns pulse with a quarter-wave
/// preselection at π/3 and a linear analyzer at π/4.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationParameters {
    /// Carrier wavelength λ (m).
    pub wavelength: f64,
    /// Temporal pulse width σ_t (s).
    pub pulse_width: f64,
    /// Propagation offset z (m).
    pub propagation: f64,
    /// Coupling delay τ (s).
    pub delay: f64,
    /// Number of time samples.
    pub time_points: usize,
    /// Half-width of the time window (s); the pulse width if absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub half_width: Option<f64>,
    /// Arm receiving the weak interaction: "H", "h", "V", "v", or "0".
    pub branch: String,
    /// Arm selected by the token "0".
    pub zero_alias: ZeroAlias,
    /// Amplitude the interaction operator reads.
    pub interaction_source: InteractionSource,
    /// Input polarization.
    pub preselection: PolarizationAngles,
    /// Analyzer polarization.
    pub postselection: PolarizationAngles,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            wavelength: 640e-9,
            pulse_width: 10e-9,
            propagation: 0.0,
            delay: 1e-3,
            time_points: 1000,
            half_width: None,
            branch: "h".to_string(),
            zero_alias: ZeroAlias::default(),
            interaction_source: InteractionSource::default(),
            preselection: PolarizationAngles::new(FRAC_PI_3, 0.0, FRAC_PI_2),
            postselection: PolarizationAngles::new(FRAC_PI_4, 0.0, 0.0),
        }
    }
}

impl SimulationParameters {
    /// Check every field against its valid range.
    pub fn validate(&self) -> SimResult<()> {
        SimError::check_positive("wavelength", self.wavelength)?;
        SimError::check_positive("pulse_width", self.pulse_width)?;
        SimError::check_finite("propagation", self.propagation)?;
        SimError::check_finite("delay", self.delay)?;
        if let Some(hw) = self.half_width {
            SimError::check_positive("half_width", hw)?;
        }
        if self.time_points < 2 {
            return Err(SimError::invalid(
                "time_points",
                format!("need at least 2 samples; got {}", self.time_points),
            ));
        }
        self.preselection.vector("preselection")?;
        self.postselection.vector("postselection")?;
        self.arm()?;
        Ok(())
    }

    /// Half-width of the time window.
    pub fn half_width(&self) -> f64 { self.half_width.unwrap_or(self.pulse_width) }

    /// Time grid over `[-half_width, half_width]`.
    pub fn grid(&self) -> SimResult<TimeGrid> {
        TimeGrid::centered(self.half_width(), self.time_points)
    }

    pub fn rules(&self) -> BranchRules {
        BranchRules {
            zero_alias: self.zero_alias,
            source: self.interaction_source,
        }
    }

    /// Resolve the branch token.
    pub fn arm(&self) -> SimResult<DelayedArm> {
        DelayedArm::parse(&self.branch, self.zero_alias)
    }

    /// Parse and validate parameters from a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let params: Self = toml::from_str(s)?;
        params.validate()?;
        Ok(params)
    }

    /// Read, parse, and validate a TOML parameter file.
    pub fn load<P>(path: P) -> Result<Self, ConfigError>
    where P: AsRef<Path>
    {
        let path = path.as_ref();
        let s = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&s)
    }

    /// Render as a TOML document.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let params = SimulationParameters::default();
        params.validate().unwrap();
        assert_eq!(params.half_width(), params.pulse_width);
        assert_eq!(params.arm(), Ok(DelayedArm::Horizontal));
        let grid = params.grid().unwrap();
        assert_eq!(grid.len(), 1000);
        assert_eq!(grid.start(), -10e-9);
    }

    #[test]
    fn partial_toml() {
        let params = SimulationParameters::from_toml_str(
            r#"
            delay = 2e-3
            time_points = 64
            branch = "0"
            zero_alias = "vertical"
            interaction_source = "selected_arm"

            [postselection]
            angle = 0.5
            "#
        ).unwrap();
        assert_eq!(params.delay, 2e-3);
        assert_eq!(params.time_points, 64);
        assert_eq!(params.wavelength, 640e-9);
        assert_eq!(params.postselection, PolarizationAngles::new(0.5, 0.0, 0.0));
        assert_eq!(params.arm(), Ok(DelayedArm::Vertical));
        assert_eq!(params.rules().source, InteractionSource::SelectedArm);
    }

    #[test]
    fn toml_round_trip() {
        let params = SimulationParameters {
            half_width: Some(3e-8),
            branch: "V".to_string(),
            ..Default::default()
        };
        let s = params.to_toml_string().unwrap();
        assert_eq!(SimulationParameters::from_toml_str(&s).unwrap(), params);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let cases: Vec<(&str, SimulationParameters)> = vec![
            ("wavelength", SimulationParameters { wavelength: 0.0, ..Default::default() }),
            ("pulse_width", SimulationParameters { pulse_width: -1e-9, ..Default::default() }),
            ("time_points", SimulationParameters { time_points: 1, ..Default::default() }),
            ("half_width", SimulationParameters { half_width: Some(0.0), ..Default::default() }),
            ("delay", SimulationParameters { delay: f64::NAN, ..Default::default() }),
        ];
        for (name, params) in cases {
            match params.validate() {
                Err(SimError::InvalidArgument { name: n, .. }) => assert_eq!(n, name),
                other => panic!("expected InvalidArgument for {name}; got {other:?}"),
            }
        }
        let params = SimulationParameters { branch: "x".into(), ..Default::default() };
        assert_eq!(
            params.validate(),
            Err(SimError::InvalidBranchSelector("x".into())),
        );
    }

    #[test]
    fn parse_errors() {
        assert!(matches!(
            SimulationParameters::from_toml_str("wavelength = \"red\""),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            SimulationParameters::from_toml_str("colour = 1"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            SimulationParameters::from_toml_str("time_points = 1"),
            Err(ConfigError::Invalid(SimError::InvalidArgument { .. }))
        ));
        assert!(matches!(
            SimulationParameters::load("/nonexistent/params.toml"),
            Err(ConfigError::Io { .. })
        ));
    }
}
