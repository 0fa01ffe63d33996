//! Scanline sonification.
//!
//! A vertical scan line sweeps the canvas; for each column the density of
//! every pitched palette color sets the loudness of that color's voice.

pub mod backend;
pub mod engine;
pub mod sampler;
pub mod scanner;
pub mod voice;
