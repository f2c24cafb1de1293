//! Small helpers and macros shared across the crate and its binaries.

pub use num_complex::Complex64 as C64;

/// Construct a [`C64`] literal.
///
/// - `c!(re)` gives a purely real number
/// - `c!(i im)` gives a purely imaginary number
/// - `c!(re, im)` gives a general complex number
#[macro_export]
macro_rules! c {
    ( i $im:expr ) => {
        $crate::utils::C64::new(0.0, $im)
    };
    ( $re:expr, $im:expr ) => {
        $crate::utils::C64::new($re, $im)
    };
    ( $re:expr ) => {
        $crate::utils::C64::new($re, 0.0)
    };
}

/// Create a directory and all its parents if it doesn't already exist,
/// evaluating to a [`std::io::Result`].
#[macro_export]
macro_rules! mkdir {
    ( $dir:expr ) => {
        {
            let dir: &std::path::Path = $dir.as_ref();
            if dir.is_dir() {
                Ok(())
            } else {
                std::fs::create_dir_all(dir)
            }
        }
    };
}

/// Write a collection of named arrays to a `.npz` archive, evaluating to a
/// `Result<(), `[`OutputError`][crate::output::OutputError]`>`.
///
/// ```ignore
/// write_npz!(
///     outdir.join("data.npz"),
///     arrays: {
///         "time" => &time,
///         "g1" => &g1,
///     }
/// )?;
/// ```
#[macro_export]
macro_rules! write_npz {
    (
        $outfile:expr,
        arrays: { $( $name:expr => $arr:expr ),+ $(,)? } $(,)?
    ) => {
        {
            let write = || -> Result<(), $crate::output::OutputError> {
                let mut npz = $crate::output::npz_writer($outfile)?;
                $(
                    npz.add_array($name, $arr)?;
                )+
                npz.finish()?;
                Ok(())
            };
            write()
        }
    };
}

/// Round values that trigonometric round-off leaves just off zero (e.g.
/// `cos(π/2)`) to exactly zero.
pub fn snap_zero(x: f64) -> f64 {
    if x.abs() < f64::EPSILON { 0.0 } else { x }
}

/// Return `(cos x, sin x)` with [`snap_zero`] applied to both.
pub fn cos_sin(x: f64) -> (f64, f64) {
    let (s, c) = x.sin_cos();
    (snap_zero(c), snap_zero(s))
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{ FRAC_PI_2, PI };
    use super::*;

    #[test]
    fn complex_literals() {
        assert_eq!(c!(1.5), C64::new(1.5, 0.0));
        assert_eq!(c!(i 2.0), C64::new(0.0, 2.0));
        assert_eq!(c!(1.0, -1.0), C64::new(1.0, -1.0));
    }

    #[test]
    fn axis_angles_are_exact() {
        assert_eq!(cos_sin(0.0), (1.0, 0.0));
        assert_eq!(cos_sin(FRAC_PI_2), (0.0, 1.0));
        assert_eq!(cos_sin(PI), (-1.0, 0.0));
    }
}
