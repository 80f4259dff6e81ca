use crate::generator::ramp::index_ramp;
use crate::workflow::config::WorkflowConfig;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tonecore::playback::{TableAncillary, TableScenario, WaveformKind};

/// Configuration for building a table render request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub sample_count: usize,
    pub sample_rate_hz: f32,
    pub tone_hz: f32,
    pub amplitude: f32,
    pub bias: f32,
    pub waveform: WaveformKind,
    pub cycles: Option<f32>,
    pub dither: f32,
    pub seed: u64,
    pub description: Option<String>,
    pub scenario: Option<TableScenario>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            sample_count: 1000,
            sample_rate_hz: 8000.0,
            tone_hz: 400.0,
            amplitude: 127.0,
            bias: 128.0,
            waveform: WaveformKind::Sine,
            cycles: None,
            dither: 0.0,
            seed: 0,
            description: None,
            scenario: None,
        }
    }
}

impl GeneratorConfig {
    pub fn from_workflow(config: &WorkflowConfig) -> Self {
        Self {
            sample_count: config.sample_count,
            sample_rate_hz: config.sample_rate_hz,
            tone_hz: config.tone_hz,
            amplitude: config.amplitude,
            bias: config.bias,
            waveform: config.waveform,
            cycles: config.cycles,
            ..Default::default()
        }
    }
}

/// Inputs handed to the synthesis stages for one table render.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub indices: Vec<f32>,
    pub dither: Option<Vec<f32>>,
    pub ancillary: TableAncillary,
}

pub fn build_render_request_from_config(
    config: &GeneratorConfig,
) -> anyhow::Result<RenderRequest> {
    anyhow::ensure!(config.sample_count > 0, "sample count must be at least 1");

    let indices = index_ramp(0, config.sample_count - 1);

    let dither = if config.dither > 0.0 {
        let mut rng = StdRng::seed_from_u64(config.seed);
        Some(
            (0..config.sample_count)
                .map(|_| rng.gen_range(-config.dither..config.dither))
                .collect(),
        )
    } else {
        None
    };

    let ancillary = TableAncillary {
        sample_rate_hz: config.sample_rate_hz,
        tone_hz: config.tone_hz,
        waveform: config.waveform,
        amplitude: config.amplitude,
        bias: config.bias,
        scenario: config.scenario.clone(),
    };

    Ok(RenderRequest {
        indices,
        dither,
        ancillary,
    })
}

#[allow(dead_code)]
pub fn build_render_request(sample_count: usize, tone_hz: f32) -> anyhow::Result<RenderRequest> {
    let config = GeneratorConfig {
        sample_count,
        tone_hz,
        ..Default::default()
    };
    build_render_request_from_config(&config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_request_covers_a_full_table() {
        let request = build_render_request_from_config(&GeneratorConfig::default()).unwrap();
        assert_eq!(request.indices.len(), 1000);
        assert_eq!(request.ancillary.waveform, WaveformKind::Sine);
        assert!(request.dither.is_none());
    }

    #[test]
    fn shortcut_builds_inclusive_ramps() {
        let request = build_render_request(101, 80.0).unwrap();
        assert_eq!(request.indices.len(), 101);
        assert_eq!(request.indices[100], 100.0);
        assert_eq!(request.ancillary.tone_hz, 80.0);
    }

    #[test]
    fn dither_noise_is_seeded_and_bounded() {
        let config = GeneratorConfig {
            sample_count: 64,
            dither: 0.01,
            seed: 7,
            ..Default::default()
        };
        let first = build_render_request_from_config(&config).unwrap();
        let second = build_render_request_from_config(&config).unwrap();

        let noise = first.dither.unwrap();
        assert_eq!(noise.len(), 64);
        assert!(noise.iter().all(|v| v.abs() < 0.01));
        assert_eq!(noise, second.dither.unwrap());
    }

    #[test]
    fn empty_tables_are_rejected() {
        let config = GeneratorConfig {
            sample_count: 0,
            ..Default::default()
        };
        assert!(build_render_request_from_config(&config).is_err());
    }
}
