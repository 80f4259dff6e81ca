use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Table shape selector.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WaveformKind {
    Sine,
    Step,
}

impl fmt::Display for WaveformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sine => write!(f, "sine"),
            Self::Step => write!(f, "step"),
        }
    }
}

impl FromStr for WaveformKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "sine" => Ok(Self::Sine),
            "step" => Ok(Self::Step),
            other => Err(format!("unknown waveform '{other}', expected sine or step")),
        }
    }
}

/// Optional provenance describing the firmware target a table was built for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableScenario {
    pub name: String,
    pub board: String,
    pub pwm_resolution_bits: u8,
    pub description: Option<String>,
}

/// Ancillary metadata accompanying each rendered table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableAncillary {
    pub sample_rate_hz: f32,
    pub tone_hz: f32,
    pub waveform: WaveformKind,
    pub amplitude: f32,
    pub bias: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario: Option<TableScenario>,
}

/// Rendered lookup table consumed by the playback firmware.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToneTable {
    pub samples: Vec<u8>,
    pub ancillary: TableAncillary,
}

impl ToneTable {
    pub fn new(samples: Vec<u8>, ancillary: TableAncillary) -> Self {
        Self { samples, ancillary }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn waveform_kind_parses_case_insensitively() {
        assert_eq!("Sine".parse::<WaveformKind>().unwrap(), WaveformKind::Sine);
        assert_eq!("step".parse::<WaveformKind>().unwrap(), WaveformKind::Step);
        assert!("triangle".parse::<WaveformKind>().is_err());
    }

    #[test]
    fn waveform_kind_round_trips_through_display() {
        let kind: WaveformKind = WaveformKind::Step.to_string().parse().unwrap();
        assert_eq!(kind, WaveformKind::Step);
    }
}
