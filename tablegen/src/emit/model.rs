use serde::{Deserialize, Serialize};

/// Snapshot of a rendered table for emission and downstream tooling.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EmissionModel {
    pub samples: Vec<u8>,
    pub sample_rate_hz: f32,
    pub tone_hz: f32,
    pub peak_frequency_hz: Option<f32>,
    pub notes: Vec<String>,
}
