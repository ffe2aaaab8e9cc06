//! Oscillator → gain → output.
//!
//! [`graph`] lives on the UI thread, [`render`] runs inside the output
//! stream's callback, and [`cpal_output`] connects the two.

pub mod cpal_output;
pub mod graph;
pub mod param;
pub mod render;
pub mod waveform;

pub use cpal_output::CpalBackend;
pub use graph::{AudioGraph, Backend};
