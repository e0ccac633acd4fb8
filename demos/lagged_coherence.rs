//! Lagged Coherence Example
//!
//! Compares the rhythmicity of a sinusoid, a bursty oscillation and white
//! noise. Run with `RUST_LOG=info` to see the output.

use log::{error, info};
use ndarray::{Array2, Axis};
use rhythmicity::rhythm::{
    LaggedCoherenceConfig, lagged_coherence_spectrum, lagged_coherence_spectrum_nd,
};
use rhythmicity::sim;

fn main() {
    env_logger::init();
    info!("Lagged Coherence Example");

    let fs = 1000.0;
    let n_seconds = 10.0;
    let f_range = (4.0, 30.0);
    let config = LaggedCoherenceConfig::default();

    let sine = sim::sim_oscillation(n_seconds, fs, 10.0);
    let bursty = match sim::sim_bursty_oscillation(n_seconds, fs, 10.0, 5) {
        Ok(y) => y,
        Err(e) => {
            error!("Failed to simulate bursty oscillation: {e}");
            return;
        }
    };
    let noise = sim::sim_white_noise(sine.len(), 0);

    // Single signal
    info!("Spectrum of a 10 Hz sinusoid");
    match lagged_coherence_spectrum(&sine, f_range, fs, &config) {
        Ok(spectrum) => {
            for (freq, value) in spectrum.iter() {
                info!("  {freq:5.1} Hz: {value:.3}");
            }
            info!("  mean: {:.3}", spectrum.mean());
        }
        Err(e) => error!("Lagged coherence failed: {e}"),
    }

    // Batch
    let names = ["sine", "bursty", "noise"];
    let mut batch = Array2::<f64>::zeros((names.len(), sine.len()));
    for (mut row, y) in batch.rows_mut().into_iter().zip([&sine, &bursty, &noise]) {
        row.assign(&ndarray::ArrayView1::from(y.as_slice()));
    }

    info!("\nBatch of {} signals", names.len());
    match lagged_coherence_spectrum_nd(&batch, Axis(1), f_range, fs, &config) {
        Ok(spectra) => {
            for (name, values) in names.iter().zip(spectra.values.outer_iter()) {
                let peak = spectra
                    .freqs
                    .iter()
                    .zip(values.iter())
                    .filter(|(_, v)| !v.is_nan())
                    .fold((0.0, f64::NEG_INFINITY), |best, (&f, &v)| {
                        if v > best.1 { (f, v) } else { best }
                    });
                let mean = values.mean().unwrap_or(f64::NAN);
                info!("  {name:>6}: mean {mean:.3}, peak {:.3} at {:.1} Hz", peak.1, peak.0);
            }
        }
        Err(e) => error!("Batch lagged coherence failed: {e}"),
    }

    // Not enough data for low frequencies: a single warning is logged
    info!("\nShort signal (1 s) from 1 Hz");
    let short = &noise[..1000];
    match lagged_coherence_spectrum(short, (1.0, 10.0), fs, &config) {
        Ok(spectrum) => info!(
            "  {} of {} frequencies undefined",
            spectrum.n_undefined(),
            spectrum.len()
        ),
        Err(e) => error!("Lagged coherence failed: {e}"),
    }
}
