pub mod fft;
pub mod phase;
pub mod stats;

pub use fft::FftHelper;
pub use phase::PhaseHelper;
pub use stats::StatsHelper;
