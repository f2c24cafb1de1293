#![allow(non_snake_case)]

//! Simulation of a weak measurement carried out on the polarization of a
//! Gaussian light pulse inside a Mach-Zehnder interferometer.
//!
//! A pulse ("pointer") is coupled to a preselected polarization, one
//! polarization arm is weakly damped, the result is postselected onto an
//! analyzer setting, and the joint amplitude is reduced to intensity and
//! first-order coherence traces over a fixed time grid. Each stage is a pure
//! function of its inputs; see [`pipeline::run`] for the full sequence.

pub mod consts;
pub mod utils;
pub mod error;
pub mod grid;
pub mod pointer;
pub mod polarization;
pub mod state;
pub mod interferometer;
pub mod postselect;
pub mod observables;
pub mod config;
pub mod pipeline;
pub mod output;

pub use error::{ SimError, SimResult };
pub use utils::C64;
