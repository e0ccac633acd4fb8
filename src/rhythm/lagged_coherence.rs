//! Lagged coherence (Fransen, van Ede & Maris, 2015).
//!
//! Lagged coherence measures how consistently the phase of one frequency's
//! Fourier coefficient carries over between adjacent, non-overlapping
//! windows of a signal. A sustained oscillation keeps a fixed phase
//! relationship from window to window and scores close to 1; noise scores
//! close to 0.
//!
//! For a frequency `f`, the signal is cut into chunks of
//! `ceil(n_cycles * fs / f)` samples, each chunk is Hann-tapered and
//! transformed, and the coefficients `c[i]` at the bin nearest `f` are
//! combined as
//!
//! ```text
//! LC(f) = |sum c[i] * conj(c[i+1])| / sqrt(sum |c[i]|^2 * sum |c[i+1]|^2)
//! ```
//!
//! Frequencies without at least two chunks are reported as `NaN`.

use crate::fft::{FftPlan, fft_frequencies, nearest_bin};
use crate::frame::nonoverlapping_chunks;
use crate::window;
use num_complex::Complex64;

/// Added to `(high - low) / f_step` before flooring so an upper bound that
/// sits on a step survives floating-point rounding.
const FREQ_STEP_TOLERANCE: f64 = 1e-9;

/// Upper limit on the number of frequencies one range may generate.
pub const MAX_FREQUENCIES: usize = 1_000_000;

const UNDEFINED_NOTICE: &str = "lagged coherence could not be estimated for at least some \
requested frequencies. This happens, especially with low frequencies, when there are not \
enough samples per segment and/or not enough segments available to estimate the measure. \
Try using a greater number of cycles, a longer signal, and/or adjust the frequency range.";

/// Configuration for lagged coherence estimation.
///
/// # Example
/// ```
/// use rhythmicity::rhythm::LaggedCoherenceConfig;
///
/// let config = LaggedCoherenceConfig::new()
///     .with_n_cycles(5.0)
///     .with_f_step(0.5)
///     .with_verbose(false);
/// assert_eq!(config.n_cycles, 5.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LaggedCoherenceConfig {
    /// Number of cycles of each frequency per window
    pub n_cycles: f64,
    /// Step size across the frequency range, in Hz
    pub f_step: f64,
    /// Whether to log a warning when some frequencies could not be estimated
    pub verbose: bool,
}

impl LaggedCoherenceConfig {
    /// Create a configuration with defaults (3 cycles, 1 Hz step, verbose).
    pub fn new() -> Self {
        Self {
            n_cycles: 3.0,
            f_step: 1.0,
            verbose: true,
        }
    }

    /// Set the number of cycles per window.
    pub fn with_n_cycles(mut self, n_cycles: f64) -> Self {
        self.n_cycles = n_cycles;
        self
    }

    /// Set the frequency step.
    pub fn with_f_step(mut self, f_step: f64) -> Self {
        self.f_step = f_step;
        self
    }

    /// Enable or disable the undefined-frequency warning.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

impl Default for LaggedCoherenceConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Lagged coherence evaluated at each frequency of a range.
#[derive(Debug, Clone, PartialEq)]
pub struct LaggedCoherenceSpectrum {
    /// Frequencies, in Hz
    pub freqs: Vec<f64>,
    /// Lagged coherence at each frequency; `NaN` where it could not be estimated
    pub values: Vec<f64>,
}

impl LaggedCoherenceSpectrum {
    /// Number of frequencies.
    pub fn len(&self) -> usize {
        self.freqs.len()
    }

    /// Whether the spectrum holds no frequencies.
    pub fn is_empty(&self) -> bool {
        self.freqs.is_empty()
    }

    /// Arithmetic mean of the values. `NaN` if any value is `NaN`.
    pub fn mean(&self) -> f64 {
        mean(&self.values)
    }

    /// Number of frequencies that could not be estimated.
    pub fn n_undefined(&self) -> usize {
        count_undefined(&self.values)
    }

    /// Iterate over `(frequency, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.freqs.iter().copied().zip(self.values.iter().copied())
    }
}

/// Generate the frequencies of a range, inclusive of the upper bound.
///
/// Values are `low + i * f_step` for every `i` that keeps the value at or
/// below `high`. An upper bound reached exactly by stepping is included.
///
/// # Arguments
/// * `f_range` - `(low, high)` in Hz, with `0 < low <= high`
/// * `f_step` - Step size in Hz (> 0)
///
/// # Example
/// ```
/// use rhythmicity::rhythm::frequency_range;
///
/// assert_eq!(frequency_range((8.0, 12.0), 1.0).unwrap(), vec![8.0, 9.0, 10.0, 11.0, 12.0]);
/// assert_eq!(frequency_range((1.0, 2.5), 1.0).unwrap(), vec![1.0, 2.0]);
/// ```
pub fn frequency_range(f_range: (f64, f64), f_step: f64) -> crate::Result<Vec<f64>> {
    let (low, high) = f_range;
    if !low.is_finite() || !high.is_finite() {
        return Err(crate::Error::InvalidFrequencyRange {
            fmin: low,
            fmax: high,
            reason: "bounds must be finite".to_string(),
        });
    }
    if low <= 0.0 {
        return Err(crate::Error::InvalidFrequencyRange {
            fmin: low,
            fmax: high,
            reason: "lower bound must be > 0".to_string(),
        });
    }
    if low > high {
        return Err(crate::Error::InvalidFrequencyRange {
            fmin: low,
            fmax: high,
            reason: "lower bound must not exceed upper bound".to_string(),
        });
    }
    check_positive("f_step", f_step)?;

    let n_steps = ((high - low) / f_step + FREQ_STEP_TOLERANCE).floor();
    if !n_steps.is_finite() || n_steps >= MAX_FREQUENCIES as f64 {
        return Err(crate::Error::InvalidFrequencyRange {
            fmin: low,
            fmax: high,
            reason: format!("step {f_step} yields more than {MAX_FREQUENCIES} frequencies"),
        });
    }
    let n_freqs = n_steps as usize + 1;
    Ok((0..n_freqs).map(|i| low + i as f64 * f_step).collect())
}

/// Compute lagged coherence at a single frequency.
///
/// # Arguments
/// * `y` - Input signal
/// * `freq` - Frequency of interest, in Hz
/// * `fs` - Sampling rate, in Hz
/// * `n_cycles` - Number of cycles of `freq` per window
///
/// # Returns
/// Lagged coherence in `[0, 1]`, or `NaN` if the signal holds fewer than two
/// windows or the windows carry no energy at `freq`.
///
/// # Errors
/// Returns an error if `freq`, `fs` or `n_cycles` is not a positive finite number.
pub fn lagged_coherence_1freq(y: &[f64], freq: f64, fs: f64, n_cycles: f64) -> crate::Result<f64> {
    check_positive("freq", freq)?;
    check_estimation_params(fs, n_cycles)?;
    estimate_1freq(y, freq, fs, n_cycles)
}

/// Compute lagged coherence across a frequency range.
///
/// # Arguments
/// * `y` - Input signal
/// * `f_range` - `(low, high)` frequency range in Hz
/// * `fs` - Sampling rate, in Hz
/// * `config` - Cycles per window, frequency step and verbosity
///
/// # Returns
/// The value at every frequency of [`frequency_range`]
///
/// # Example
/// ```
/// use rhythmicity::rhythm::{LaggedCoherenceConfig, lagged_coherence_spectrum};
/// use rhythmicity::sim::sim_oscillation;
///
/// let y = sim_oscillation(5.0, 500.0, 10.0);
/// let config = LaggedCoherenceConfig::default();
/// let spectrum = lagged_coherence_spectrum(&y, (8.0, 12.0), 500.0, &config).unwrap();
/// assert_eq!(spectrum.freqs, vec![8.0, 9.0, 10.0, 11.0, 12.0]);
/// assert!(spectrum.values[2] > 0.99);
/// ```
pub fn lagged_coherence_spectrum(
    y: &[f64],
    f_range: (f64, f64),
    fs: f64,
    config: &LaggedCoherenceConfig,
) -> crate::Result<LaggedCoherenceSpectrum> {
    let freqs = frequency_range(f_range, config.f_step)?;
    check_estimation_params(fs, config.n_cycles)?;

    let values = evaluate_spectrum(y, &freqs, fs, config.n_cycles)?;
    if config.verbose {
        notify_undefined(count_undefined(&values));
    }
    Ok(LaggedCoherenceSpectrum { freqs, values })
}

/// Compute the mean lagged coherence across a frequency range.
///
/// This is the mean of [`lagged_coherence_spectrum`] over the same
/// frequencies, and is `NaN` if any frequency could not be estimated.
pub fn lagged_coherence(
    y: &[f64],
    f_range: (f64, f64),
    fs: f64,
    config: &LaggedCoherenceConfig,
) -> crate::Result<f64> {
    lagged_coherence_spectrum(y, f_range, fs, config).map(|spectrum| spectrum.mean())
}

/// Evaluate every frequency of `freqs` on one signal. Parameters must already be validated.
pub(crate) fn evaluate_spectrum(
    y: &[f64],
    freqs: &[f64],
    fs: f64,
    n_cycles: f64,
) -> crate::Result<Vec<f64>> {
    freqs
        .iter()
        .map(|&freq| estimate_1freq(y, freq, fs, n_cycles))
        .collect()
}

pub(crate) fn check_estimation_params(fs: f64, n_cycles: f64) -> crate::Result<()> {
    check_positive("fs", fs)?;
    check_positive("n_cycles", n_cycles)
}

/// Log the advisory warning once if any frequency was undefined.
pub(crate) fn notify_undefined(n_undefined: usize) {
    if n_undefined > 0 {
        log::warn!("{UNDEFINED_NOTICE} ({n_undefined} undefined)");
    }
}

pub(crate) fn count_undefined(values: &[f64]) -> usize {
    values.iter().filter(|v| v.is_nan()).count()
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn check_positive(name: &'static str, value: f64) -> crate::Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(crate::Error::InvalidParameter {
            name,
            value: value.to_string(),
            reason: "must be a positive finite number".to_string(),
        });
    }
    Ok(())
}

fn estimate_1freq(y: &[f64], freq: f64, fs: f64, n_cycles: f64) -> crate::Result<f64> {
    let n_samples = (n_cycles * fs / freq).ceil();

    // Fewer than two windows fit: nothing to compare.
    if n_samples > (y.len() / 2) as f64 {
        log::trace!("{freq} Hz: window of {n_samples} samples exceeds half the signal");
        return Ok(f64::NAN);
    }
    let n_samples = n_samples as usize;

    let chunks = nonoverlapping_chunks(y, n_samples)?;
    let taper = window::hann(n_samples);
    let bin = nearest_bin(&fft_frequencies(n_samples, fs), freq).ok_or(
        crate::Error::InvalidSize {
            name: "n_samples",
            value: n_samples,
            reason: "frequency grid is empty",
        },
    )?;

    let plan = FftPlan::new(n_samples);
    let mut buffer = vec![Complex64::new(0.0, 0.0); n_samples];
    let coefs: Vec<Complex64> = chunks
        .iter()
        .map(|chunk| {
            for ((b, &sample), &w) in buffer.iter_mut().zip(chunk.iter()).zip(taper.iter()) {
                *b = Complex64::new(sample * w, 0.0);
            }
            plan.forward(&mut buffer);
            buffer[bin]
        })
        .collect();

    log::trace!(
        "{freq} Hz: {} chunks of {n_samples} samples, bin {bin}",
        coefs.len()
    );
    Ok(coherence_of_coefficients(&coefs))
}

/// Combine per-chunk coefficients into a lagged coherence value.
fn coherence_of_coefficients(coefs: &[Complex64]) -> f64 {
    let n = coefs.len();
    if n < 2 {
        return f64::NAN;
    }

    let numerator: Complex64 = coefs.windows(2).map(|pair| pair[0] * pair[1].conj()).sum();
    let leading: f64 = coefs[..n - 1].iter().map(|c| c.norm_sqr()).sum();
    let lagging: f64 = coefs[1..].iter().map(|c| c.norm_sqr()).sum();
    let denominator = (leading * lagging).sqrt();
    if denominator == 0.0 {
        return f64::NAN;
    }

    numerator.norm() / denominator
}
