use crate::generator::profile::RenderRequest;
use crate::workflow::config::WorkflowConfig;
use anyhow::Context;
use tonecore::playback::{ToneTable, WaveformKind};
use tonecore::prelude::{StageInput, SynthesisStage};
use tonecore::synthesis::{QuantizeStage, SpectrumStage, StepStage, ToneStage};

pub struct WorkflowResult {
    pub table: ToneTable,
    pub rms: Option<f32>,
    pub peak_frequency_hz: Option<f32>,
    pub notes: Vec<String>,
}

#[derive(Clone)]
pub struct Runner {
    config: WorkflowConfig,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self, request: &RenderRequest) -> anyhow::Result<WorkflowResult> {
        match self.config.waveform {
            WaveformKind::Sine => self.execute_sine(request),
            WaveformKind::Step => self.execute_step(request),
        }
    }

    fn execute_sine(&self, request: &RenderRequest) -> anyhow::Result<WorkflowResult> {
        let stage_config = self.config.to_stage_config();
        let pool_size = stage_config.sample_count.max(1);
        let mut notes = Vec::new();

        let mut tone_stage = match self.config.cycles {
            Some(cycles) => ToneStage::with_cycles(pool_size, cycles),
            None => ToneStage::new(pool_size),
        };
        tone_stage
            .initialize(&stage_config)
            .context("initializing tone stage")?;
        let tone_output = tone_stage
            .execute(StageInput {
                samples: request.indices.clone(),
                phase_offset: None,
            })
            .context("executing tone stage")?;
        tone_stage.cleanup();

        let rms = tone_output.metadata.rms;
        notes.extend(tone_output.metadata.notes);

        let mut shaped = tone_output.samples;
        if let Some(dither) = &request.dither {
            for (sample, noise) in shaped.iter_mut().zip(dither) {
                *sample += noise;
            }
        }

        let mut quantize_stage = QuantizeStage::new(pool_size);
        quantize_stage
            .initialize(&stage_config)
            .context("initializing quantize stage")?;
        let quantize_output = quantize_stage
            .execute(StageInput {
                samples: shaped,
                phase_offset: None,
            })
            .context("executing quantize stage")?;
        quantize_stage.cleanup();

        let samples = quantize_output
            .metadata
            .quantized
            .ok_or_else(|| anyhow::anyhow!("quantize stage produced no table"))?;
        notes.extend(quantize_output.metadata.notes);

        let mut spectrum_stage = SpectrumStage::new(pool_size);
        spectrum_stage
            .initialize(&stage_config)
            .context("initializing spectrum stage")?;
        let spectrum_output = spectrum_stage
            .execute(StageInput {
                samples: quantize_output.samples,
                phase_offset: None,
            })
            .context("executing spectrum stage")?;
        spectrum_stage.cleanup();

        let peak_frequency_hz = spectrum_output.metadata.peak_frequency_hz;
        notes.extend(spectrum_output.metadata.notes);

        Ok(WorkflowResult {
            table: ToneTable::new(samples, request.ancillary.clone()),
            rms,
            peak_frequency_hz,
            notes,
        })
    }

    fn execute_step(&self, request: &RenderRequest) -> anyhow::Result<WorkflowResult> {
        let stage_config = self.config.to_stage_config();
        let mut notes = Vec::new();

        let mut step_stage = StepStage::new(stage_config.sample_count.max(1));
        step_stage
            .initialize(&stage_config)
            .context("initializing step stage")?;
        let step_output = step_stage
            .execute(StageInput {
                samples: request.indices.clone(),
                phase_offset: None,
            })
            .context("executing step stage")?;
        step_stage.cleanup();

        let samples = step_output
            .metadata
            .quantized
            .ok_or_else(|| anyhow::anyhow!("step stage produced no table"))?;
        notes.extend(step_output.metadata.notes);
        notes.push("spectrum check skipped for step table".to_string());

        Ok(WorkflowResult {
            table: ToneTable::new(samples, request.ancillary.clone()),
            rms: None,
            peak_frequency_hz: None,
            notes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::profile::{
        build_render_request, build_render_request_from_config, GeneratorConfig,
    };

    #[test]
    fn runner_renders_reference_tone_table() {
        let cfg = WorkflowConfig::from_args(1000, 8000.0, 400.0, WaveformKind::Sine);
        let runner = Runner::new(cfg.clone());
        let request = build_render_request(cfg.sample_count, cfg.tone_hz).unwrap();

        let result = runner.execute(&request).unwrap();
        let samples = &result.table.samples;

        assert_eq!(samples.len(), 1000);
        assert!(samples.iter().all(|&s| (1..=255).contains(&s)));
        assert_eq!(samples[0], 128);
        assert_eq!(samples[4], 248);
        assert_eq!(samples[5], 255);
        assert_eq!(samples[15], 1);

        let peak = result.peak_frequency_hz.unwrap();
        assert!((peak - 400.0).abs() < 1.0);
    }

    #[test]
    fn runner_renders_step_table_split_at_midpoint() {
        let cfg = WorkflowConfig::from_args(101, 8000.0, 80.0, WaveformKind::Step);
        let runner = Runner::new(cfg.clone());
        let request =
            build_render_request_from_config(&GeneratorConfig::from_workflow(&cfg)).unwrap();

        let result = runner.execute(&request).unwrap();
        let samples = &result.table.samples;

        assert_eq!(samples.len(), 101);
        assert!(samples[..=50].iter().all(|&s| s == 0));
        assert!(samples[51..].iter().all(|&s| s == 255));
        assert!(result.peak_frequency_hz.is_none());
    }

    #[test]
    fn runner_renders_table_periodic_cycles() {
        let mut cfg = WorkflowConfig::from_args(101, 8000.0, 80.0, WaveformKind::Sine);
        cfg.cycles = Some(1.0);
        let runner = Runner::new(cfg.clone());
        let request =
            build_render_request_from_config(&GeneratorConfig::from_workflow(&cfg)).unwrap();

        let result = runner.execute(&request).unwrap();
        let samples = &result.table.samples;

        assert_eq!(samples.len(), 101);
        assert_eq!(samples[0], 128);
        assert_eq!(samples[25], 255);
        assert_eq!(samples[75], 1);
    }
}
