use crate::math::phase::PhaseHelper;
use crate::math::stats::StatsHelper;
use crate::prelude::{
    StageConfig, StageError, StageInput, StageMetadata, StageOutput, StageResult, SynthesisStage,
};
use crate::synthesis::buffer_pool::BufferPool;
use crate::telemetry::log::LogManager;

/// Sine-synthesis stage mapping an index ramp to samples in `[-1, 1]`.
///
/// Phase advances either per sampled tone (`tone_hz` over `sample_rate_hz`)
/// or, with `with_cycles`, as a fixed number of cycles across the table
/// period of `sample_count - 1` indices.
pub struct ToneStage {
    pool: BufferPool,
    config: Option<StageConfig>,
    cycles: Option<f32>,
    logger: LogManager,
}

impl ToneStage {
    pub fn new(pool_size: usize) -> Self {
        Self {
            pool: BufferPool::with_capacity(pool_size),
            config: None,
            cycles: None,
            logger: LogManager::new(),
        }
    }

    /// Table-periodic variant: `cycles` full periods across the table.
    pub fn with_cycles(pool_size: usize, cycles: f32) -> Self {
        Self {
            pool: BufferPool::with_capacity(pool_size),
            config: None,
            cycles: Some(cycles),
            logger: LogManager::new(),
        }
    }
}

impl SynthesisStage for ToneStage {
    fn initialize(&mut self, config: &StageConfig) -> StageResult<()> {
        if self.cycles.is_none() && config.sample_rate_hz <= 0.0 {
            return Err(StageError::InvalidInput(format!(
                "sample rate must be positive, got {}",
                config.sample_rate_hz
            )));
        }
        if self.cycles.is_some() && config.sample_count < 2 {
            return Err(StageError::InvalidInput(
                "table-periodic synthesis needs at least 2 samples".into(),
            ));
        }
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

        let phase_offset = input.phase_offset.unwrap_or(0.0);
        let mut buffer = self.pool.checkout(input.samples.len())?;

        match self.cycles {
            Some(cycles) => {
                let period = (config.sample_count - 1) as f32;
                for (slot, &index) in buffer.iter_mut().zip(&input.samples) {
                    *slot = (PhaseHelper::table_angle(index, cycles, period) + phase_offset).sin();
                }
            }
            None => {
                for (slot, &index) in buffer.iter_mut().zip(&input.samples) {
                    *slot = (PhaseHelper::tone_angle(index, config.tone_hz, config.sample_rate_hz)
                        + phase_offset)
                        .sin();
                }
            }
        }

        let rms = StatsHelper::rms(&buffer);
        self.logger.record(&format!("ToneStage RMS {:.4}", rms));

        let metadata = StageMetadata {
            rms: Some(rms),
            notes: vec![format!("tone RMS {:.4}", rms)],
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
