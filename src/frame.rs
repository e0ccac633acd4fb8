/// Number of whole non-overlapping chunks of `n_samples` in a signal of `len` samples.
///
/// # Example
/// ```
/// use rhythmicity::frame::chunk_count;
///
/// assert_eq!(chunk_count(1000, 300).unwrap(), 3);
/// assert_eq!(chunk_count(10, 30).unwrap(), 0);
/// ```
pub fn chunk_count(len: usize, n_samples: usize) -> crate::Result<usize> {
    if n_samples == 0 {
        return Err(crate::Error::InvalidSize {
            name: "n_samples",
            value: 0,
            reason: "must be > 0",
        });
    }
    Ok(len / n_samples)
}

/// Split a signal into non-overlapping chunks.
///
/// Chunks are contiguous, in order, and each exactly `n_samples` long.
/// Samples past the last whole chunk are dropped; no padding is applied.
/// A signal shorter than `n_samples` yields no chunks.
///
/// # Arguments
/// * `y` - Input signal
/// * `n_samples` - Length of each chunk
///
/// # Returns
/// Borrowed chunks of `y`
///
/// # Example
/// ```
/// use rhythmicity::frame::nonoverlapping_chunks;
///
/// let signal = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
/// let chunks = nonoverlapping_chunks(&signal, 3).unwrap();
/// assert_eq!(chunks, vec![&[1.0, 2.0, 3.0][..], &[4.0, 5.0, 6.0][..]]);
/// ```
pub fn nonoverlapping_chunks(y: &[f64], n_samples: usize) -> crate::Result<Vec<&[f64]>> {
    let n_chunks = chunk_count(y.len(), n_samples)?;
    let chunks: Vec<&[f64]> = y.chunks_exact(n_samples).collect();
    debug_assert_eq!(chunks.len(), n_chunks);
    Ok(chunks)
}
