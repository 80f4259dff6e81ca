pub mod buffer_pool;
pub mod quantize;
pub mod spectrum;
pub mod step;
pub mod tone;

pub use buffer_pool::BufferPool;
pub use quantize::QuantizeStage;
pub use spectrum::SpectrumStage;
pub use step::StepStage;
pub use tone::ToneStage;
