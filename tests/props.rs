use proptest::prelude::*;
use rhythmicity::frame::nonoverlapping_chunks;
use rhythmicity::rhythm::{
    LaggedCoherenceConfig, frequency_range, lagged_coherence, lagged_coherence_1freq,
    lagged_coherence_spectrum,
};
use rhythmicity::sim;

proptest! {
    #[test]
    fn chunks_cover_signal_prefix(len in 0usize..2000, n_samples in 1usize..300) {
        let y: Vec<f64> = (0..len).map(|i| i as f64).collect();
        let chunks = nonoverlapping_chunks(&y, n_samples).unwrap();

        prop_assert_eq!(chunks.len(), len / n_samples);
        prop_assert!(chunks.iter().all(|c| c.len() == n_samples));
        let joined: Vec<f64> = chunks.concat();
        prop_assert_eq!(&joined[..], &y[..chunks.len() * n_samples]);
    }

    #[test]
    fn values_lie_in_unit_interval(
        seed in any::<u64>(),
        freq in 2.0f64..60.0,
        n_cycles in 1.0f64..8.0,
    ) {
        let y = sim::sim_white_noise(3000, seed);
        let lc = lagged_coherence_1freq(&y, freq, 500.0, n_cycles).unwrap();
        prop_assert!(lc.is_nan() || (0.0..=1.0 + 1e-12).contains(&lc), "lc = {}", lc);
    }

    #[test]
    fn spectrum_matches_generated_frequencies(
        low in 1.0f64..20.0,
        width in 0.0f64..20.0,
        step in 0.1f64..4.0,
    ) {
        let y = sim::sim_white_noise(2000, 0);
        let config = LaggedCoherenceConfig::default().with_f_step(step).with_verbose(false);
        let spectrum = lagged_coherence_spectrum(&y, (low, low + width), 250.0, &config).unwrap();

        let freqs = frequency_range((low, low + width), step).unwrap();
        prop_assert_eq!(spectrum.values.len(), spectrum.freqs.len());
        prop_assert_eq!(&spectrum.freqs, &freqs);
        prop_assert!(freqs.iter().all(|&f| f <= low + width + 1e-6));
    }

    #[test]
    fn mean_form_is_mean_of_spectrum(seed in any::<u64>(), low in 2.0f64..10.0) {
        let y = sim::sim_white_noise(2500, seed);
        let config = LaggedCoherenceConfig::default().with_verbose(false);
        let spectrum = lagged_coherence_spectrum(&y, (low, low + 10.0), 250.0, &config).unwrap();
        let mean = lagged_coherence(&y, (low, low + 10.0), 250.0, &config).unwrap();

        prop_assert_eq!(mean.to_bits(), spectrum.mean().to_bits());
    }
}
