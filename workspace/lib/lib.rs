//! Shared setup for the simulation binaries.

pub mod setups;

/// Install a `tracing` subscriber printing to stdout.
///
/// The maximum level is read from `WEAK_SIM_LOG` (`trace`, `debug`, `info`,
/// `warn`, `error`), defaulting to `info`.
pub fn init_logging() {
    let level = std::env::var("WEAK_SIM_LOG")
        .ok()
        .and_then(|s| s.parse::<tracing::Level>().ok())
        .unwrap_or(tracing::Level::INFO);
    tracing_subscriber::fmt().with_max_level(level).init();
}

/// Load parameters from the TOML file named by the first command-line
/// argument, or fall back to `default` if there isn't one.
pub fn params_from_args<F>(default: F)
    -> anyhow::Result<weak_sim::config::SimulationParameters>
where F: FnOnce() -> weak_sim::config::SimulationParameters
{
    match std::env::args().nth(1) {
        Some(path) => {
            tracing::info!(%path, "loading parameters");
            Ok(weak_sim::config::SimulationParameters::load(path)?)
        },
        None => Ok(default()),
    }
}
