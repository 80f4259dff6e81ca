use crate::math::fft::FftHelper;
use crate::prelude::{
    StageConfig, StageError, StageInput, StageMetadata, StageOutput, StageResult, SynthesisStage,
};
use crate::synthesis::buffer_pool::BufferPool;
use crate::telemetry::log::LogManager;
use std::cmp::Ordering;

/// FFT verification stage estimating the dominant frequency of a table.
///
/// The input is mean-centered before the transform so a quantization bias
/// does not park all the energy in the DC bin.
pub struct SpectrumStage {
    pool: BufferPool,
    config: Option<StageConfig>,
    fft: Option<FftHelper>,
    logger: LogManager,
}

impl SpectrumStage {
    pub fn new(pool_size: usize) -> Self {
        Self {
            pool: BufferPool::with_capacity(pool_size),
            config: None,
            fft: None,
            logger: LogManager::new(),
        }
    }
}

impl SynthesisStage for SpectrumStage {
    fn initialize(&mut self, config: &StageConfig) -> StageResult<()> {
        if config.sample_count < 2 {
            return Err(StageError::InvalidInput(
                "spectrum check needs at least 2 samples".into(),
            ));
        }
        self.config = Some(config.clone());
        self.fft = Some(FftHelper::new(config.sample_count));
        Ok(())
    }

    fn execute(&mut self, input: StageInput) -> StageResult<StageOutput> {
        let config = self
            .config
            .as_ref()
            .ok_or_else(|| StageError::Internal("stage not initialized".into()))?;
        let fft = self
            .fft
            .as_ref()
            .ok_or_else(|| StageError::Internal("FFT not configured".into()))?;

        if input.samples.is_empty() {
            return Err(StageError::InvalidInput("no samples to analyze".into()));
        }

        let mean = input.samples.iter().sum::<f32>() / input.samples.len() as f32;
        let centered: Vec<f32> = input.samples.iter().map(|&v| v - mean).collect();

        let bins = fft.forward(&centered);
        let half = (bins.len() / 2).max(1);

        let mut magnitudes = self.pool.checkout(half)?;
        for (slot, bin) in magnitudes.iter_mut().zip(bins.iter().take(half)) {
            *slot = bin.norm();
        }

        let peak_bin = magnitudes
            .iter()
            .enumerate()
            .skip(1)
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(Ordering::Equal))
            .map(|(index, _)| index)
            .unwrap_or(0);
        let peak_hz = peak_bin as f32 * config.sample_rate_hz / fft.size() as f32;

        self.logger
            .record(&format!("SpectrumStage peak {:.1} Hz", peak_hz));

        let metadata = StageMetadata {
            peak_frequency_hz: Some(peak_hz),
            notes: vec![format!("spectrum peak {:.1} Hz (bin {})", peak_hz, peak_bin)],
            ..Default::default()
        };

        Ok(StageOutput {
            samples: magnitudes,
            metadata,
        })
    }

    fn cleanup(&mut self) {
        self.pool.reset();
        self.config = None;
        self.fft = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::phase::PhaseHelper;

    #[test]
    fn spectrum_stage_recovers_tone_frequency() {
        let mut stage = SpectrumStage::new(4);
        let config = StageConfig {
            sample_count: 1000,
            sample_rate_hz: 8000.0,
            tone_hz: 400.0,
            amplitude: 127.0,
            bias: 128.0,
        };

        stage.initialize(&config).unwrap();
        let samples: Vec<f32> = (0..1000)
            .map(|i| PhaseHelper::tone_angle(i as f32, 400.0, 8000.0).sin())
            .collect();

        let output = stage
            .execute(StageInput {
                samples,
                phase_offset: None,
            })
            .unwrap();

        let peak = output.metadata.peak_frequency_hz.unwrap();
        assert!((peak - 400.0).abs() < 1e-3);
        stage.cleanup();
    }

    #[test]
    fn spectrum_stage_ignores_constant_bias() {
        let mut stage = SpectrumStage::new(4);
        let config = StageConfig {
            sample_count: 64,
            sample_rate_hz: 8000.0,
            tone_hz: 1000.0,
            amplitude: 127.0,
            bias: 128.0,
        };

        stage.initialize(&config).unwrap();
        let samples: Vec<f32> = (0..64)
            .map(|i| 128.0 + 50.0 * PhaseHelper::tone_angle(i as f32, 1000.0, 8000.0).sin())
            .collect();

        let output = stage
            .execute(StageInput {
                samples,
                phase_offset: None,
            })
            .unwrap();

        let peak = output.metadata.peak_frequency_hz.unwrap();
        assert!((peak - 1000.0).abs() < 1e-3);
        stage.cleanup();
    }
}
