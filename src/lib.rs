//! Rhythmicity estimation for neural time series.
//!
//! Rhythmicity is the degree to which a signal sustains an oscillation with
//! a stable phase over time. This crate estimates it with lagged coherence
//! (Fransen, van Ede & Maris, 2015, *NeuroImage* 118, 256-267): the phase
//! consistency of a frequency's Fourier coefficient across adjacent,
//! non-overlapping windows.
//!
//! # Quick Start
//!
//! ```rust
//! use rhythmicity::rhythm::{LaggedCoherenceConfig, lagged_coherence, lagged_coherence_spectrum};
//! use rhythmicity::sim::{sim_oscillation, sim_white_noise};
//!
//! let fs = 1000.0;
//! let config = LaggedCoherenceConfig::default();
//!
//! // A 10 Hz sinusoid is perfectly rhythmic around 10 Hz
//! let sine = sim_oscillation(10.0, fs, 10.0);
//! let spectrum = lagged_coherence_spectrum(&sine, (8.0, 12.0), fs, &config).unwrap();
//! assert!(spectrum.values[2] > 0.99);
//!
//! // Noise is not
//! let noise = sim_white_noise(sine.len(), 0);
//! assert!(lagged_coherence(&noise, (8.0, 12.0), fs, &config).unwrap() < 0.5);
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`rhythm`] | Lagged coherence: single frequency, frequency range, batches |
//! | [`frame`] | Non-overlapping chunking |
//! | [`fft`] | Forward FFT plan, frequency grid, nearest-bin lookup |
//! | [`window`] | Symmetric Hann taper |
//! | [`sim`] | Sinusoid, white noise and bursty signal generators |
//!
//! # Error Handling
//!
//! Malformed parameters (non-positive sampling rate, inverted frequency
//! range, out-of-range axis, ...) return [`Error`]. Frequencies that cannot
//! be estimated from the available data are not errors: they come back as
//! `NaN`, and a single warning is logged through the [`log`] facade when
//! the configuration is verbose.
//!
//! # Feature Flags
//!
//! | Flag | Description |
//! |------|-------------|
//! | `parallel` | Process batches of signals on the rayon thread pool |

#![forbid(unsafe_code)]

pub mod error;
pub use error::{Error, Result};

pub mod fft;
pub mod frame;
pub mod rhythm;
pub mod sim;
pub mod window;
