//! File output for pipeline results: CSV tables, line plots, and `.npz`
//! archives.
//!
//! Nothing here feeds back into the numerics. A failure while writing is
//! reported to the caller and leaves already-computed results intact.

use std::{
    fs::File,
    path::{ Path, PathBuf },
    sync::Mutex,
};
use ndarray_npy::NpzWriter;
use plotters::{ prelude::*, style::FontStyle };
use thiserror::Error;
use tracing::{ info, warn };
use crate::{ mkdir, pipeline::PipelineOutput, write_npz };

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("npz error: {0}")]
    Npz(#[from] ndarray_npy::WriteNpzError),

    #[error("plot error: {0}")]
    Plot(String),

    #[error("couldn't load font from {0:?}")]
    Font(PathBuf),

    #[error("column length mismatch: {x} x-values, {y} y-values")]
    Shape { x: usize, y: usize },
}

fn plot_err<E: std::fmt::Display>(err: E) -> OutputError {
    OutputError::Plot(err.to_string())
}

/// Open an uncompressed `.npz` archive for writing.
pub fn npz_writer<P>(path: P) -> Result<NpzWriter<File>, OutputError>
where P: AsRef<Path>
{
    Ok(NpzWriter::new(File::create(path)?))
}

/// Shortest decimal representation that reads back to the same value, without
/// an exponent.
fn fmt_float(x: f64) -> String { format!("{}", x) }

/// Write a two-column table with a header row.
///
/// A failure on the header row is logged and otherwise ignored; a failure on
/// any data row aborts the write.
pub fn write_csv<P>(
    path: P,
    x: &[f64],
    y: &[f64],
    x_name: &str,
    y_name: &str,
) -> Result<(), OutputError>
where P: AsRef<Path>
{
    let path = path.as_ref();
    if x.len() != y.len() {
        return Err(OutputError::Shape { x: x.len(), y: y.len() });
    }
    let mut wtr = csv::Writer::from_path(path)?;
    if let Err(err) = wtr.write_record([x_name, y_name]) {
        warn!(path = %path.display(), %err, "couldn't write csv header");
    }
    for (xk, yk) in x.iter().zip(y) {
        wtr.write_record([fmt_float(*xk), fmt_float(*yk)])?;
    }
    wtr.flush()?;
    info!(path = %path.display(), rows = x.len(), "wrote csv");
    Ok(())
}

static FONT: Mutex<Option<PathBuf>> = Mutex::new(None);

fn font_loaded() -> bool {
    FONT.lock()
        .map(|font| font.is_some())
        .unwrap_or_else(|poisoned| poisoned.into_inner().is_some())
}

/// Load a TrueType/OpenType font to draw plot titles and axis labels with.
///
/// Only the first successful call has an effect. Plots drawn before any font
/// is registered carry no text.
pub fn register_font<P>(path: P) -> Result<(), OutputError>
where P: AsRef<Path>
{
    let path = path.as_ref();
    let mut font
        = FONT.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    if font.is_some() {
        return Ok(());
    }
    let bytes = std::fs::read(path)?;
    // plotters keeps the font data for the life of the process, so only a
    // file that parses is handed over
    ab_glyph::FontRef::try_from_slice(&bytes)
        .map_err(|_| OutputError::Font(path.to_path_buf()))?;
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    plotters::style::register_font("sans-serif", FontStyle::Normal, bytes)
        .map_err(|_| OutputError::Font(path.to_path_buf()))?;
    *font = Some(path.to_path_buf());
    info!(path = %path.display(), "registered plot font");
    Ok(())
}

/// Labels and dimensions for [`plot_line`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlotSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Image size in pixels.
    pub size: (u32, u32),
}

impl Default for PlotSpec {
    fn default() -> Self {
        Self {
            title: String::new(),
            x_label: String::new(),
            y_label: String::new(),
            size: (400, 400),
        }
    }
}

impl PlotSpec {
    pub fn new(title: &str, x_label: &str, y_label: &str) -> Self {
        Self {
            title: title.to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            ..Default::default()
        }
    }
}

fn padded_range<I>(vals: I) -> Option<std::ops::Range<f64>>
where I: IntoIterator<Item = f64>
{
    let (lo, hi)
        = vals.into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if lo > hi {
        return None;
    }
    let pad = if hi > lo { 0.05 * (hi - lo) } else { 0.5 * lo.abs().max(1.0) };
    Some(lo - pad .. hi + pad)
}

/// Render `points` as a line plot to a PNG file.
pub fn plot_line<P>(path: P, points: &[(f64, f64)], spec: &PlotSpec)
    -> Result<(), OutputError>
where P: AsRef<Path>
{
    let path = path.as_ref();
    let x_range = padded_range(points.iter().map(|p| p.0))
        .ok_or_else(|| OutputError::Plot("no finite x values".into()))?;
    let y_range = padded_range(points.iter().map(|p| p.1))
        .ok_or_else(|| OutputError::Plot("no finite y values".into()))?;
    let with_text = font_loaded();

    let root = BitMapBackend::new(path, spec.size).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;
    let mut builder = ChartBuilder::on(&root);
    builder.margin(10);
    if with_text {
        builder
            .caption(&spec.title, ("sans-serif", 20))
            .x_label_area_size(35)
            .y_label_area_size(55);
    }
    let mut chart = builder.build_cartesian_2d(x_range, y_range)
        .map_err(plot_err)?;
    if with_text {
        chart.configure_mesh()
            .x_desc(spec.x_label.as_str())
            .y_desc(spec.y_label.as_str())
            .x_labels(5)
            .draw()
            .map_err(plot_err)?;
    }
    chart.draw_series(LineSeries::new(points.iter().copied(), &BLUE))
        .map_err(plot_err)?;
    root.present().map_err(plot_err)?;
    info!(path = %path.display(), points = points.len(), "wrote plot");
    Ok(())
}

impl PipelineOutput {
    /// Write the intensity and coherence traces to `dir` as
    /// `initial_intensity.csv`, `post_initial_intensity.csv`, and
    /// `degree_of_coherence.csv` (time vs. `|g1|`), along with every
    /// intermediate array in `weak_measurement.npz`.
    ///
    /// Returns the paths written.
    pub fn export<P>(&self, dir: P) -> Result<Vec<PathBuf>, OutputError>
    where P: AsRef<Path>
    {
        let dir = dir.as_ref();
        mkdir!(dir)?;
        let time: Vec<f64> = self.time.to_vec();
        let g1_mag = self.coherence_magnitude();
        let tables: [(&str, &str, Vec<f64>); 3] = [
            ("initial_intensity", "intensity", self.intensity.to_vec()),
            ("post_initial_intensity", "intensity", self.post_intensity.to_vec()),
            ("degree_of_coherence", "coherence", g1_mag.to_vec()),
        ];
        let mut written: Vec<PathBuf> = Vec::with_capacity(tables.len() + 1);
        for (name, y_name, y) in tables.iter() {
            let path = dir.join(format!("{name}.csv"));
            write_csv(&path, &time, y, "time", y_name)?;
            written.push(path);
        }

        let npz = dir.join("weak_measurement.npz");
        write_npz!(
            &npz,
            arrays: {
                "time" => &*self.time,
                "pointer" => &*self.pointer,
                "coupled_h" => self.coupled.horizontal(),
                "coupled_v" => self.coupled.vertical(),
                "interfered_h" => self.interfered.horizontal(),
                "interfered_v" => self.interfered.vertical(),
                "postselected_h" => self.postselected.horizontal(),
                "postselected_v" => self.postselected.vertical(),
                "intensity" => &self.intensity,
                "post_intensity" => &self.post_intensity,
                "coherence" => &self.coherence,
            }
        )?;
        info!(path = %npz.display(), "wrote npz");
        written.push(npz);
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_text_has_no_exponent() {
        assert_eq!(fmt_float(1e-8), "0.00000001");
        assert_eq!(fmt_float(-2.5), "-2.5");
        assert_eq!(fmt_float(3.0), "3");
        let x = 0.1 + 0.2;
        assert_eq!(fmt_float(x).parse::<f64>().unwrap(), x);
    }

    #[test]
    fn ranges_are_padded() {
        assert_eq!(padded_range([0.0, 1.0]), Some(-0.05 .. 1.05));
        assert_eq!(padded_range([2.0, 2.0]), Some(1.0 .. 3.0));
        assert_eq!(padded_range([f64::NAN]), None);
        assert_eq!(padded_range(std::iter::empty::<f64>()), None);
    }
}
