#![allow(non_snake_case)]

use std::path::PathBuf;
use itertools::{ Itertools, MinMaxResult };
use ndarray as nd;
use tracing::{ info, warn };
use weak_sim::{
    mkdir,
    write_npz,
    output::write_csv,
    pipeline::sweep,
};
use lib::setups::delay_scan;

/// Intensity-weighted mean time of a profile.
fn centroid(time: &nd::Array1<f64>, I: &nd::Array1<f64>) -> f64 {
    let norm: f64 = I.sum();
    time.iter().zip(I).map(|(t, i)| t * i).sum::<f64>() / norm
}

fn main() -> anyhow::Result<()> {
    lib::init_logging();
    let outdir = PathBuf::from("output/delay_scan");
    mkdir!(outdir)?;

    let delays: nd::Array1<f64> = delay_scan::delays().into();
    let params = delay_scan::params();
    info!(runs = params.len(), "starting delay scan");
    let results = sweep(&params);

    let nt = delay_scan::TIME_POINTS;
    let time: nd::Array1<f64> = params[0].grid()?.into();
    let mut I_post: nd::Array2<f64>
        = nd::Array2::from_elem((delays.len(), nt), f64::NAN);
    let mut g1_mag: nd::Array2<f64>
        = nd::Array2::from_elem((delays.len(), nt), f64::NAN);
    let mut shift: nd::Array1<f64> = nd::Array1::from_elem(delays.len(), f64::NAN);
    for (k, res) in results.into_iter().enumerate() {
        match res {
            Ok(out) => {
                shift[k] = centroid(&time, &out.post_intensity);
                I_post.row_mut(k).assign(&out.post_intensity);
                g1_mag.row_mut(k).assign(&out.coherence_magnitude());
            },
            Err(err) => {
                warn!(delay = delays[k], %err, "run failed");
            },
        }
    }
    if let MinMaxResult::MinMax(lo, hi)
        = shift.iter().copied().filter(|s| s.is_finite()).minmax()
    {
        info!(min = lo, max = hi, "postselected centroid shift");
    }

    write_csv(
        outdir.join("centroid_shift.csv"),
        &delays.to_vec(),
        &shift.to_vec(),
        "delay",
        "shift",
    )?;
    write_npz!(
        outdir.join("delay_scan.npz"),
        arrays: {
            "delay" => &delays,
            "time" => &time,
            "post_intensity" => &I_post,
            "coherence" => &g1_mag,
            "shift" => &shift,
        }
    )?;

    println!("done");
    Ok(())
}
