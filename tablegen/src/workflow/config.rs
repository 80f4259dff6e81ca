use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tonecore::playback::WaveformKind;
use tonecore::prelude::StageConfig;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkflowConfig {
    pub sample_count: usize,
    pub sample_rate_hz: f32,
    pub tone_hz: f32,
    #[serde(default = "default_waveform")]
    pub waveform: WaveformKind,
    #[serde(default)]
    pub cycles: Option<f32>,
    #[serde(default = "default_amplitude")]
    pub amplitude: f32,
    #[serde(default = "default_bias")]
    pub bias: f32,
}

fn default_waveform() -> WaveformKind {
    WaveformKind::Sine
}

fn default_amplitude() -> f32 {
    127.0
}

fn default_bias() -> f32 {
    128.0
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(
        sample_count: usize,
        sample_rate_hz: f32,
        tone_hz: f32,
        waveform: WaveformKind,
    ) -> Self {
        Self {
            sample_count,
            sample_rate_hz,
            tone_hz,
            waveform,
            cycles: None,
            amplitude: default_amplitude(),
            bias: default_bias(),
        }
    }

    pub fn to_stage_config(&self) -> StageConfig {
        StageConfig {
            sample_count: self.sample_count,
            sample_rate_hz: self.sample_rate_hz,
            tone_hz: self.tone_hz,
            amplitude: self.amplitude,
            bias: self.bias,
        }
    }
}
