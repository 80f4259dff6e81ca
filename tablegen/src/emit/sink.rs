use crate::emit::model::EmissionModel;
use anyhow::Context;
use clap::ValueEnum;
use std::fs;
use std::path::Path;

/// Rendering target for an emitted table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Single-line bracketed list
    Plain,
    /// Pretty-printed JSON snapshot
    Json,
    /// C array ready for firmware inclusion
    CArray,
}

/// Writes rendered tables to stdout or disk.
pub struct Emitter {
    format: OutputFormat,
}

impl Emitter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn render(&self, model: &EmissionModel) -> anyhow::Result<String> {
        match self.format {
            OutputFormat::Plain => Ok(format!("{:?}", model.samples)),
            OutputFormat::Json => {
                serde_json::to_string_pretty(model).context("serializing emission model")
            }
            OutputFormat::CArray => Ok(Self::render_c_array(model)),
        }
    }

    fn render_c_array(model: &EmissionModel) -> String {
        let mut lines = Vec::new();
        lines.push(format!(
            "/* {} samples, {} Hz tone at {} Hz sample rate */",
            model.samples.len(),
            model.tone_hz,
            model.sample_rate_hz
        ));
        lines.push(format!(
            "static const uint8_t tone_table[{}] = {{",
            model.samples.len()
        ));
        for chunk in model.samples.chunks(12) {
            let row = chunk
                .iter()
                .map(|value| format!("{value:3}"))
                .collect::<Vec<_>>()
                .join(", ");
            lines.push(format!("    {row},"));
        }
        lines.push("};".to_string());
        lines.join("\n")
    }

    pub fn publish(&self, model: &EmissionModel) -> anyhow::Result<()> {
        println!("{}", self.render(model)?);
        Ok(())
    }

    pub fn publish_status(&self, message: &str) {
        println!("[tablegen] {}", message);
    }

    pub fn write_to(&self, model: &EmissionModel, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
        }
        fs::write(path, self.render(model)?)
            .with_context(|| format!("writing table to {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> EmissionModel {
        EmissionModel {
            samples: vec![0, 128, 255],
            sample_rate_hz: 8000.0,
            tone_hz: 400.0,
            peak_frequency_hz: Some(400.0),
            notes: vec!["tone RMS 0.7071".to_string()],
        }
    }

    #[test]
    fn plain_format_matches_list_notation() {
        let emitter = Emitter::new(OutputFormat::Plain);
        assert_eq!(emitter.render(&model()).unwrap(), "[0, 128, 255]");
    }

    #[test]
    fn c_array_format_declares_a_byte_table() {
        let emitter = Emitter::new(OutputFormat::CArray);
        let rendered = emitter.render(&model()).unwrap();
        assert!(rendered.contains("static const uint8_t tone_table[3]"));
        assert!(rendered.contains("  0, 128, 255,"));
        assert!(rendered.ends_with("};"));
    }

    #[test]
    fn json_format_round_trips_the_model() {
        let emitter = Emitter::new(OutputFormat::Json);
        let rendered = emitter.render(&model()).unwrap();
        let parsed: EmissionModel = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed.samples, vec![0, 128, 255]);
        assert_eq!(parsed.peak_frequency_hz, Some(400.0));
    }

    #[test]
    fn write_to_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tables/tone.txt");
        let emitter = Emitter::new(OutputFormat::Plain);
        emitter.write_to(&model(), &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[0, 128, 255]");
    }
}
