use crate::math::stats::StatsHelper;
use crate::prelude::{
    StageConfig, StageError, StageInput, StageMetadata, StageOutput, StageResult, SynthesisStage,
};
use crate::synthesis::buffer_pool::BufferPool;
use crate::telemetry::log::LogManager;
use crate::telemetry::metrics::MetricsRecorder;

/// Quantization stage mapping real-valued samples into 8-bit table codes.
///
/// Each sample becomes `floor(v * amplitude) + bias`, clamped to `[0, 255]`.
/// With the default amplitude 127 and bias 128 a unit sine lands in
/// `[1, 255]` without clamping.
pub struct QuantizeStage {
    pool: BufferPool,
    config: Option<StageConfig>,
    metrics: MetricsRecorder,
    logger: LogManager,
}

impl QuantizeStage {
    pub fn new(pool_size: usize) -> Self {
        Self {
            pool: BufferPool::with_capacity(pool_size),
            config: None,
            metrics: MetricsRecorder::new(),
            logger: LogManager::new(),
        }
    }

    #[cfg(test)]
    pub fn metrics_snapshot(&self) -> (usize, usize) {
        self.metrics.snapshot()
    }
}

impl SynthesisStage for QuantizeStage {
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
            return Err(StageError::InvalidInput("no samples to quantize".into()));
        }

        let peak = StatsHelper::peak(&input.samples);
        let mut buffer = self.pool.checkout(input.samples.len())?;
        let mut codes = Vec::with_capacity(input.samples.len());
        let mut clamped = 0usize;

        for (slot, &value) in buffer.iter_mut().zip(&input.samples) {
            let raw = (value * config.amplitude).floor() + config.bias;
            let code = raw.clamp(0.0, 255.0);
            if code != raw {
                clamped += 1;
            }
            *slot = code;
            codes.push(code as u8);
        }

        self.metrics.record_table();
        if clamped > 0 {
            self.metrics.record_clamped(clamped);
            self.logger.warn(&format!(
                "QuantizeStage clamped {} of {} samples (input peak {:.3})",
                clamped,
                codes.len(),
                peak
            ));
        } else {
            self.logger
                .record(&format!("QuantizeStage peak {:.3}", peak));
        }

        let metadata = StageMetadata {
            quantized: Some(codes),
            notes: vec![format!(
                "quantized {} samples, {} clamped",
                input.samples.len(),
                clamped
            )],
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
