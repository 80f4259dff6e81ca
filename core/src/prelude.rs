use serde::{Deserialize, Serialize};

/// Shared configuration for each synthesis stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageConfig {
    pub sample_count: usize,
    pub sample_rate_hz: f32,
    pub tone_hz: f32,
    pub amplitude: f32,
    pub bias: f32,
}

/// Input payload for a synthesis stage.
#[derive(Debug, Clone)]
pub struct StageInput {
    pub samples: Vec<f32>,
    pub phase_offset: Option<f32>,
}

/// Output produced by each stage.
#[derive(Debug, Clone)]
pub struct StageOutput {
    pub samples: Vec<f32>,
    pub metadata: StageMetadata,
}

/// Metadata used for chaining stages and telemetry.
#[derive(Debug, Clone, Default)]
pub struct StageMetadata {
    pub quantized: Option<Vec<u8>>,
    pub peak_frequency_hz: Option<f32>,
    pub rms: Option<f32>,
    pub notes: Vec<String>,
}

/// Common error type for stage execution.
#[derive(thiserror::Error, Debug)]
pub enum StageError {
    #[error("buffer exhaustion: {0}")]
    BufferExhaustion(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("internal failure: {0}")]
    Internal(String),
}

pub type StageResult<T> = Result<T, StageError>;

/// Trait describing table-synthesis stages.
pub trait SynthesisStage {
    fn initialize(&mut self, config: &StageConfig) -> StageResult<()>;
    fn execute(&mut self, input: StageInput) -> StageResult<StageOutput>;
    fn cleanup(&mut self);
}
