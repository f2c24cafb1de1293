#![allow(non_snake_case)]

use std::path::PathBuf;
use itertools::Itertools;
use ndarray as nd;
use tracing::{ info, warn };
use weak_sim::{
    output::{ PlotSpec, plot_line, register_font },
    pipeline::{ PipelineOutput, run },
};
use lib::setups::quarter_wave;

fn doit() -> anyhow::Result<PipelineOutput> {
    let params = lib::params_from_args(quarter_wave::params)?;
    info!(
        wavelength = params.wavelength,
        pulse_width = params.pulse_width,
        delay = params.delay,
        branch = %params.branch,
        "running weak measurement"
    );
    Ok(run(&params)?)
}

fn main() -> anyhow::Result<()> {
    lib::init_logging();
    let outdir = PathBuf::from("output/weak_measurement");

    let out = doit()?;
    out.export(&outdir)?;

    if let Ok(font) = std::env::var("WEAK_SIM_FONT") {
        if let Err(err) = register_font(&font) {
            warn!(%err, "plots will be drawn without labels");
        }
    }
    let g1 = out.coherence_magnitude();
    let plots: [(&str, &nd::Array1<f64>, &str, &str); 3] = [
        ("pre_intensity", &out.intensity, "Intensity before postselection", "Intensity"),
        ("post_intensity", &out.post_intensity, "Intensity after postselection", "Intensity"),
        ("degree_of_coherence", &g1, "Degree of Coherence", "Coherence"),
    ];
    for (name, y, title, y_label) in plots {
        let points = out.time.iter().copied().zip(y.iter().copied()).collect_vec();
        let spec = PlotSpec::new(title, "Time", y_label);
        let path = outdir.join(format!("{name}.png"));
        if let Err(err) = plot_line(&path, &points, &spec) {
            warn!(%err, plot = name, "couldn't render plot");
        }
    }

    println!("done");
    Ok(())
}
