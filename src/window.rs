/// Compute a symmetric Hann (raised cosine) window.
///
/// Both endpoints are zero and the window is symmetric about its center,
/// which is the form used for tapering an isolated segment before a
/// single FFT (as opposed to the periodic form used for overlap-add).
///
/// # Arguments
/// * `n` - Window length
///
/// # Returns
/// Hann window of length `n`
///
/// # Example
/// ```
/// use rhythmicity::window::hann;
///
/// let w = hann(5);
/// let expected = [0.0, 0.5, 1.0, 0.5, 0.0];
/// for (a, b) in w.iter().zip(expected.iter()) {
///     assert!((a - b).abs() < 1e-12);
/// }
/// ```
pub fn hann(n: usize) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![1.0];
    }
    let m = (n - 1) as f64;
    (0..n)
        .map(|i| 0.5 - 0.5 * (2.0 * std::f64::consts::PI * i as f64 / m).cos())
        .collect()
}
