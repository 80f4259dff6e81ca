use crate::prelude::{
    StageConfig, StageError, StageInput, StageMetadata, StageOutput, StageResult, SynthesisStage,
};
use crate::synthesis::buffer_pool::BufferPool;
use crate::telemetry::log::LogManager;

/// Threshold-step stage: full-scale high past the table midpoint, zero below.
///
/// Output levels are already integer codes, so the stage fills
/// `metadata.quantized` itself and needs no quantization pass.
pub struct StepStage {
    pool: BufferPool,
    config: Option<StageConfig>,
    logger: LogManager,
}

impl StepStage {
    pub fn new(pool_size: usize) -> Self {
        Self {
            pool: BufferPool::with_capacity(pool_size),
            config: None,
            logger: LogManager::new(),
        }
    }
}

impl SynthesisStage for StepStage {
    fn initialize(&mut self, config: &StageConfig) -> StageResult<()> {
        self.config = Some(config.clone());
        Ok(())
    }

    fn execute(&mut self, input: StageInput) -> StageResult<StageOutput> {
        let config = self
            .config
            .as_ref()
            .ok_or_else(|| StageError::Internal("stage not initialized".into()))?;

        if input.samples.is_empty() {
            return Err(StageError::InvalidInput("no indices provided".into()));
        }

        let threshold = ((config.sample_count.saturating_sub(1)) / 2) as f32;
        let high = (config.bias + config.amplitude).min(255.0);

        let mut buffer = self.pool.checkout(input.samples.len())?;
        let mut codes = Vec::with_capacity(input.samples.len());
        let mut high_count = 0usize;

        for (slot, &index) in buffer.iter_mut().zip(&input.samples) {
            let level = if index > threshold { high } else { 0.0 };
            if level > 0.0 {
                high_count += 1;
            }
            *slot = level;
            codes.push(level as u8);
        }

        self.logger.record(&format!(
            "StepStage threshold {} high samples {}",
            threshold, high_count
        ));

        let metadata = StageMetadata {
            quantized: Some(codes),
            notes: vec![format!("step threshold {} high {}", threshold, high)],
            ..Default::default()
        };

        Ok(StageOutput {
            samples: buffer,
            metadata,
        })
    }

    fn cleanup(&mut self) {
        self.pool.reset();
        self.config = None;
    }
}
