use std::fs;
use weak_sim::{
    config::SimulationParameters,
    output::{ OutputError, PlotSpec, plot_line, register_font, write_csv },
    pipeline::run,
};

#[test]
fn csv_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("table.csv");
    let x = [-1e-8, 0.0, 1e-8];
    let y = [0.1 + 0.2, 2.0, 1.0 / 3.0];
    write_csv(&path, &x, &y, "time", "intensity").unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("time,intensity"));
    assert_eq!(lines.next(), Some("-0.00000001,0.30000000000000004"));

    let mut rdr = csv::Reader::from_path(&path).unwrap();
    let rows: Vec<(f64, f64)>
        = rdr.records()
        .map(|rec| {
            let rec = rec.unwrap();
            (rec[0].parse().unwrap(), rec[1].parse().unwrap())
        })
        .collect();
    assert_eq!(rows.len(), 3);
    rows.iter().zip(x.iter().zip(y.iter()))
        .for_each(|(row, (xk, yk))| assert_eq!(*row, (*xk, *yk)));
}

#[test]
fn csv_rejects_ragged_columns() {
    let dir = tempfile::tempdir().unwrap();
    let err = write_csv(dir.path().join("t.csv"), &[1.0, 2.0], &[1.0], "a", "b")
        .unwrap_err();
    assert!(matches!(err, OutputError::Shape { x: 2, y: 1 }));
}

#[test]
fn csv_reports_unwritable_destination() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("t.csv");
    assert!(write_csv(path, &[1.0], &[1.0], "a", "b").is_err());
}

#[test]
fn unlabeled_plot_is_written() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("g1.png");
    let points: Vec<(f64, f64)>
        = (0..50).map(|k| (k as f64 * 1e-9, (k as f64 / 10.0).sin().abs()))
        .collect();
    plot_line(&path, &points, &PlotSpec::new("Degree of Coherence", "Time", "Magnitude"))
        .unwrap();
    let bytes = fs::read(&path).unwrap();
    assert_eq!(&bytes[..4], b"\x89PNG");
}

#[test]
fn plot_needs_points() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        plot_line(dir.path().join("empty.png"), &[], &PlotSpec::default()),
        Err(OutputError::Plot(_))
    ));
}

#[test]
fn export_writes_every_table() {
    let params = SimulationParameters { time_points: 64, ..Default::default() };
    let out = run(&params).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let written = out.export(dir.path().join("run")).unwrap();
    let names: Vec<String>
        = written.iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec![
            "initial_intensity.csv",
            "post_initial_intensity.csv",
            "degree_of_coherence.csv",
            "weak_measurement.npz",
        ],
    );
    let coherence
        = fs::read_to_string(dir.path().join("run/degree_of_coherence.csv"))
        .unwrap();
    assert_eq!(coherence.lines().count(), 65);
    assert_eq!(coherence.lines().next(), Some("time,coherence"));
}

#[test]
fn intensity_plots_are_written() {
    let params = SimulationParameters { time_points: 128, ..Default::default() };
    let out = run(&params).unwrap();
    let dir = tempfile::tempdir().unwrap();
    for (name, y) in [("pre_intensity", &out.intensity), ("post_intensity", &out.post_intensity)] {
        let points: Vec<(f64, f64)>
            = out.time.iter().copied().zip(y.iter().copied()).collect();
        let path = dir.path().join(format!("{name}.png"));
        plot_line(&path, &points, &PlotSpec::new(name, "Time", "Intensity"))
            .unwrap();
        let bytes = fs::read(&path).unwrap();
        assert_eq!(&bytes[..4], b"\x89PNG");
    }
}

#[test]
fn unparseable_font_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("not_a_font.ttf");
    fs::write(&path, b"definitely not a font").unwrap();
    assert!(matches!(register_font(&path), Err(OutputError::Font(_))));
    assert!(matches!(
        register_font(dir.path().join("missing.ttf")),
        Err(OutputError::Io(_))
    ));
}
