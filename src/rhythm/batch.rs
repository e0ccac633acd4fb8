//! Lagged coherence over batches of signals.
//!
//! Every 1-D lane of an N-dimensional array along a chosen time axis is
//! treated as an independent signal. Results are assembled into arrays that
//! keep the shape of the remaining axes.

use super::lagged_coherence::{
    LaggedCoherenceConfig, check_estimation_params, count_undefined, evaluate_spectrum,
    frequency_range, mean, notify_undefined,
};
use ndarray::{Array1, ArrayBase, ArrayD, ArrayView1, Axis, Data, Dimension, IxDyn};

/// Lagged coherence spectra for a batch of signals.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchSpectrum {
    /// Frequencies shared by every signal, in Hz
    pub freqs: Array1<f64>,
    /// Values with the input's batch axes followed by a frequency axis
    pub values: ArrayD<f64>,
}

/// Apply `f` to every signal along `axis`.
///
/// Signals are visited in the logical (row-major) order of the remaining
/// axes, so the output can be reshaped to their shape. The first error
/// returned by `f` aborts the map. With the `parallel` feature signals are
/// processed on the rayon thread pool.
///
/// # Example
/// ```
/// use ndarray::{Axis, array};
/// use rhythmicity::rhythm::map_signals;
///
/// let signals = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
/// let sums = map_signals(&signals, Axis(1), |y| Ok(y.iter().sum::<f64>())).unwrap();
/// assert_eq!(sums, vec![6.0, 15.0]);
/// ```
pub fn map_signals<S, D, T, F>(
    signals: &ArrayBase<S, D>,
    axis: Axis,
    f: F,
) -> crate::Result<Vec<T>>
where
    S: Data<Elem = f64>,
    D: Dimension,
    T: Send,
    F: Fn(&[f64]) -> crate::Result<T> + Sync,
{
    check_axis(signals.ndim(), axis)?;
    let signals = signals.view().into_dyn();
    let lanes: Vec<ArrayView1<'_, f64>> = signals.lanes(axis).into_iter().collect();

    let apply = |lane: &ArrayView1<'_, f64>| match lane.as_slice() {
        Some(y) => f(y),
        None => f(&lane.to_vec()),
    };

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        lanes.par_iter().map(apply).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        lanes.iter().map(apply).collect()
    }
}

/// Mean lagged coherence of every signal along `axis`.
///
/// # Returns
/// An array shaped like `signals` with `axis` removed
///
/// # Example
/// ```
/// use ndarray::{Array2, Axis};
/// use rhythmicity::rhythm::{LaggedCoherenceConfig, lagged_coherence_nd};
/// use rhythmicity::sim::sim_oscillation;
///
/// let mut signals = Array2::<f64>::zeros((2, 2500));
/// signals.row_mut(0).assign(&ndarray::Array1::from(sim_oscillation(5.0, 500.0, 10.0)));
/// signals.row_mut(1).assign(&ndarray::Array1::from(sim_oscillation(5.0, 500.0, 20.0)));
///
/// let config = LaggedCoherenceConfig::default();
/// let lc = lagged_coherence_nd(&signals, Axis(1), (9.0, 11.0), 500.0, &config).unwrap();
/// assert_eq!(lc.shape(), &[2]);
/// ```
pub fn lagged_coherence_nd<S, D>(
    signals: &ArrayBase<S, D>,
    axis: Axis,
    f_range: (f64, f64),
    fs: f64,
    config: &LaggedCoherenceConfig,
) -> crate::Result<ArrayD<f64>>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let (freqs, spectra) = batch_spectra(signals, axis, f_range, fs, config)?;
    log::debug!(
        "lagged coherence over {} signals x {} frequencies",
        spectra.len(),
        freqs.len()
    );

    let means: Vec<f64> = spectra.iter().map(|values| mean(values)).collect();
    let shape = batch_shape(signals.shape(), axis);
    ArrayD::from_shape_vec(IxDyn(&shape), means).map_err(|e| crate::Error::ShapeMismatch {
        expected: format!("{shape:?}"),
        got: e.to_string(),
    })
}

/// Lagged coherence spectra of every signal along `axis`.
///
/// The result's `values` has the batch axes of `signals` (all axes but
/// `axis`, in order) followed by one axis over `freqs`.
pub fn lagged_coherence_spectrum_nd<S, D>(
    signals: &ArrayBase<S, D>,
    axis: Axis,
    f_range: (f64, f64),
    fs: f64,
    config: &LaggedCoherenceConfig,
) -> crate::Result<BatchSpectrum>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let (freqs, spectra) = batch_spectra(signals, axis, f_range, fs, config)?;

    let mut shape = batch_shape(signals.shape(), axis);
    shape.push(freqs.len());
    let flat: Vec<f64> = spectra.into_iter().flatten().collect();
    let values =
        ArrayD::from_shape_vec(IxDyn(&shape), flat).map_err(|e| crate::Error::ShapeMismatch {
            expected: format!("{shape:?}"),
            got: e.to_string(),
        })?;

    Ok(BatchSpectrum {
        freqs: Array1::from(freqs),
        values,
    })
}

fn batch_spectra<S, D>(
    signals: &ArrayBase<S, D>,
    axis: Axis,
    f_range: (f64, f64),
    fs: f64,
    config: &LaggedCoherenceConfig,
) -> crate::Result<(Vec<f64>, Vec<Vec<f64>>)>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let freqs = frequency_range(f_range, config.f_step)?;
    check_estimation_params(fs, config.n_cycles)?;

    let spectra = map_signals(signals, axis, |y| {
        evaluate_spectrum(y, &freqs, fs, config.n_cycles)
    })?;

    if config.verbose {
        notify_undefined(spectra.iter().map(|values| count_undefined(values)).sum());
    }
    Ok((freqs, spectra))
}

fn check_axis(ndim: usize, axis: Axis) -> crate::Result<()> {
    if axis.index() >= ndim {
        return Err(crate::Error::InvalidAxis {
            axis: axis.index(),
            ndim,
        });
    }
    Ok(())
}

fn batch_shape(shape: &[usize], axis: Axis) -> Vec<usize> {
    let mut shape = shape.to_vec();
    shape.remove(axis.index());
    shape
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, Array3, array};

    #[test]
    fn test_map_signals_row_order() {
        let signals = Array3::from_shape_fn((2, 3, 4), |(i, j, k)| (i * 100 + j * 10 + k) as f64);
        let firsts = map_signals(&signals, Axis(2), |y| Ok(y[0])).unwrap();
        assert_eq!(firsts, vec![0.0, 10.0, 20.0, 100.0, 110.0, 120.0]);
    }

    #[test]
    fn test_map_signals_non_contiguous_axis() {
        let signals = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
        let columns = map_signals(&signals, Axis(0), |y| Ok(y.to_vec())).unwrap();
        assert_eq!(columns, vec![vec![1.0, 3.0, 5.0], vec![2.0, 4.0, 6.0]]);
    }

    #[test]
    fn test_map_signals_middle_axis() {
        let signals = Array3::from_shape_fn((2, 3, 2), |(i, j, k)| (i * 100 + j * 10 + k) as f64);
        let lanes = map_signals(&signals.view(), Axis(1), |y| Ok(y.to_vec())).unwrap();
        assert_eq!(
            lanes,
            vec![
                vec![0.0, 10.0, 20.0],
                vec![1.0, 11.0, 21.0],
                vec![100.0, 110.0, 120.0],
                vec![101.0, 111.0, 121.0],
            ]
        );
    }

    #[test]
    fn test_map_signals_propagates_error() {
        let signals = Array2::<f64>::zeros((3, 4));
        let result: crate::Result<Vec<()>> = map_signals(&signals, Axis(1), |_| {
            Err(crate::Error::InvalidSize {
                name: "test",
                value: 0,
                reason: "always fails",
            })
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_map_signals_invalid_axis() {
        let signals = Array2::<f64>::zeros((3, 4));
        let result = map_signals(&signals, Axis(2), |y| Ok(y.len()));
        assert!(matches!(
            result,
            Err(crate::Error::InvalidAxis { axis: 2, ndim: 2 })
        ));
    }

    #[test]
    fn test_batch_shape() {
        assert_eq!(batch_shape(&[2, 3, 100], Axis(2)), vec![2, 3]);
        assert_eq!(batch_shape(&[100, 4], Axis(0)), vec![4]);
        assert!(batch_shape(&[100], Axis(0)).is_empty());
    }

    #[test]
    fn test_nd_shapes() {
        let signals = Array3::<f64>::zeros((2, 3, 1000));
        let config = LaggedCoherenceConfig::default().with_verbose(false);

        let means = lagged_coherence_nd(&signals, Axis(2), (8.0, 12.0), 1000.0, &config).unwrap();
        assert_eq!(means.shape(), &[2, 3]);

        let spectra =
            lagged_coherence_spectrum_nd(&signals, Axis(2), (8.0, 12.0), 1000.0, &config).unwrap();
        assert_eq!(spectra.freqs.len(), 5);
        assert_eq!(spectra.values.shape(), &[2, 3, 5]);
        // all-zero signals carry no energy
        assert!(spectra.values.iter().all(|v| v.is_nan()));
    }
}
