use num_complex::Complex64;
use rustfft::{Fft, FftPlanner};
use std::sync::Arc;

/// Cached forward FFT plan.
///
/// The transform is unnormalized, so coefficient magnitudes scale with the
/// window length. Lagged coherence is a ratio of such magnitudes, which
/// makes the scale cancel out.
///
/// # Example
/// ```
/// use rhythmicity::fft::FftPlan;
/// use num_complex::Complex64;
///
/// let plan = FftPlan::new(8);
/// let mut buffer = vec![Complex64::new(1.0, 0.0); 8];
/// plan.forward(&mut buffer);
/// assert!((buffer[0].re - 8.0).abs() < 1e-12);
/// ```
pub struct FftPlan {
    forward: Arc<dyn Fft<f64>>,
    len: usize,
}

impl FftPlan {
    /// Create a forward plan for buffers of `len` samples.
    pub fn new(len: usize) -> Self {
        let mut planner = FftPlanner::new();
        let forward = planner.plan_fft_forward(len);
        Self { forward, len }
    }

    /// Length of the buffers this plan transforms.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether this plan transforms empty buffers.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Perform the forward FFT in place.
    ///
    /// # Arguments
    /// * `buffer` - Complex input of length [`FftPlan::len`], overwritten with the spectrum
    pub fn forward(&self, buffer: &mut [Complex64]) {
        self.forward.process(buffer);
    }
}

#[cfg(feature = "parallel")]
const _: () = {
    fn _assert_send_sync<T: Send + Sync>() {}
    fn _check() {
        _assert_send_sync::<FftPlan>();
    }
};

/// Frequencies of the bins of an `n`-point FFT at sampling rate `fs`.
///
/// Follows the standard layout: non-negative frequencies first, then the
/// negative ones in increasing order, e.g. `[0, 1, 2, -2, -1] * fs / n`
/// for `n = 5`.
///
/// # Example
/// ```
/// use rhythmicity::fft::fft_frequencies;
///
/// let freqs = fft_frequencies(4, 100.0);
/// assert_eq!(freqs, vec![0.0, 25.0, -50.0, -25.0]);
/// ```
pub fn fft_frequencies(n: usize, fs: f64) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    let spacing = fs / n as f64;
    let n_positive = (n - 1) / 2 + 1;
    (0..n)
        .map(|i| {
            if i < n_positive {
                i as f64 * spacing
            } else {
                (i as f64 - n as f64) * spacing
            }
        })
        .collect()
}

/// Index of the bin whose frequency is closest to `target`.
///
/// Ties resolve to the lowest index. Returns `None` for an empty grid.
pub fn nearest_bin(freqs: &[f64], target: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, &f) in freqs.iter().enumerate() {
        let dist = (f - target).abs();
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((idx, dist)),
        }
    }
    best.map(|(idx, _)| idx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fft_frequencies_odd_length() {
        let freqs = fft_frequencies(5, 10.0);
        assert_eq!(freqs, vec![0.0, 2.0, 4.0, -4.0, -2.0]);
    }

    #[test]
    fn test_fft_frequencies_even_length() {
        let freqs = fft_frequencies(300, 1000.0);
        assert_eq!(freqs.len(), 300);
        assert_relative_eq!(freqs[3], 10.0, epsilon = 1e-12);
        assert_relative_eq!(freqs[150], -500.0, epsilon = 1e-12);
        assert_relative_eq!(freqs[299], -1000.0 / 300.0, epsilon = 1e-12);
    }

    #[test]
    fn test_fft_frequencies_single() {
        assert_eq!(fft_frequencies(1, 250.0), vec![0.0]);
        assert!(fft_frequencies(0, 250.0).is_empty());
    }

    #[test]
    fn test_nearest_bin() {
        let freqs = fft_frequencies(375, 1000.0);
        // spacing is 8/3 Hz, so bin 3 sits exactly on 8 Hz
        assert_eq!(nearest_bin(&freqs, 8.0), Some(3));
        assert_eq!(nearest_bin(&freqs, 9.0), Some(3));
        assert_eq!(nearest_bin(&freqs, 10.0), Some(4));
    }

    #[test]
    fn test_nearest_bin_tie_takes_first() {
        let freqs = [0.0, 2.0, 4.0, -4.0, -2.0];
        assert_eq!(nearest_bin(&freqs, 1.0), Some(0));
        assert_eq!(nearest_bin(&freqs, -3.0), Some(3));
        assert_eq!(nearest_bin(&[], 1.0), None);
    }

    #[test]
    fn test_forward_matches_naive_dft() {
        let n = 12;
        let x: Vec<f64> = (0..n).map(|i| (i as f64 * 0.7).sin() + 0.25).collect();
        let plan = FftPlan::new(n);
        assert_eq!(plan.len(), n);
        let mut buffer: Vec<Complex64> = x.iter().map(|&v| Complex64::new(v, 0.0)).collect();
        plan.forward(&mut buffer);

        for (k, coef) in buffer.iter().enumerate() {
            let mut expected = Complex64::new(0.0, 0.0);
            for (t, &v) in x.iter().enumerate() {
                let angle = -2.0 * std::f64::consts::PI * (k * t) as f64 / n as f64;
                expected += Complex64::from_polar(v, angle);
            }
            assert_relative_eq!(coef.re, expected.re, epsilon = 1e-9);
            assert_relative_eq!(coef.im, expected.im, epsilon = 1e-9);
        }
    }
}
