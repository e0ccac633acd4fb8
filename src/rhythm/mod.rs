pub mod batch;
pub mod lagged_coherence;

pub use batch::{BatchSpectrum, lagged_coherence_nd, lagged_coherence_spectrum_nd, map_signals};
pub use lagged_coherence::{
    LaggedCoherenceConfig, LaggedCoherenceSpectrum, MAX_FREQUENCIES, frequency_range,
    lagged_coherence, lagged_coherence_1freq, lagged_coherence_spectrum,
};
