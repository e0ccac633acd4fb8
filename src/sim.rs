//! Signal generators for demos and tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn n_samples(n_seconds: f64, fs: f64) -> usize {
    (n_seconds * fs).round().max(0.0) as usize
}

/// Generate a unit-amplitude sinusoid.
///
/// # Arguments
/// * `n_seconds` - Duration in seconds
/// * `fs` - Sampling rate in Hz
/// * `freq` - Oscillation frequency in Hz
pub fn sim_oscillation(n_seconds: f64, fs: f64, freq: f64) -> Vec<f64> {
    let angular_freq = 2.0 * std::f64::consts::PI * freq / fs;
    (0..n_samples(n_seconds, fs))
        .map(|i| (angular_freq * i as f64).sin())
        .collect()
}

/// Generate uniform white noise in `[-1, 1)`.
///
/// The same `seed` always produces the same samples.
pub fn sim_white_noise(n_samples: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n_samples).map(|_| rng.gen_range(-1.0..1.0)).collect()
}

/// Generate a sinusoid that is switched on and off every `cycles_per_burst` cycles.
///
/// The signal starts with a burst, then stays silent for the same number
/// of cycles, and so on.
///
/// # Errors
/// Returns an error if `cycles_per_burst` is zero.
///
/// # Example
/// ```
/// use rhythmicity::sim::sim_bursty_oscillation;
///
/// // 10 Hz at 1 kHz: 100 samples per cycle, bursts of 2 cycles
/// let y = sim_bursty_oscillation(1.0, 1000.0, 10.0, 2).unwrap();
/// assert_eq!(y.len(), 1000);
/// assert!(y[..200].iter().any(|&v| v != 0.0));
/// assert!(y[200..400].iter().all(|&v| v == 0.0));
/// ```
pub fn sim_bursty_oscillation(
    n_seconds: f64,
    fs: f64,
    freq: f64,
    cycles_per_burst: usize,
) -> crate::Result<Vec<f64>> {
    if cycles_per_burst == 0 {
        return Err(crate::Error::InvalidSize {
            name: "cycles_per_burst",
            value: 0,
            reason: "must be > 0",
        });
    }
    let mut y = sim_oscillation(n_seconds, fs, freq);
    for (i, sample) in y.iter_mut().enumerate() {
        let cycle = (i as f64 * freq / fs).floor() as usize;
        if (cycle / cycles_per_burst) % 2 == 1 {
            *sample = 0.0;
        }
    }
    Ok(y)
}
