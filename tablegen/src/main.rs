use clap::Parser;
use emit::model::EmissionModel;
use emit::sink::{Emitter, OutputFormat};
use generator::profile::{build_render_request_from_config, GeneratorConfig};
use log::info;
use std::path::PathBuf;
use tonecore::playback::{toggle_timing, WaveformKind};
use workflow::config::WorkflowConfig;
use workflow::runner::Runner;

mod emit;
mod generator;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Tone-table workflow driver for PWM playback firmware")]
struct Args {
    /// Load a workflow config from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    #[arg(long, default_value_t = 1000)]
    sample_count: usize,
    #[arg(long, default_value_t = 8000.0)]
    sample_rate_hz: f32,
    #[arg(long, default_value_t = 400.0)]
    tone_hz: f32,
    /// Waveform rendered into the table (sine or step)
    #[arg(long, default_value_t = WaveformKind::Sine)]
    waveform: WaveformKind,
    /// Render the sine as N cycles across the table instead of a sampled tone
    #[arg(long)]
    cycles: Option<f32>,
    /// Output format for the emitted table
    #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
    format: OutputFormat,
    /// Also write the rendered table to this path
    #[arg(long)]
    out: Option<PathBuf>,
    /// Toggle frequency used for the scheduling report
    #[arg(long, default_value_t = 365.0)]
    toggle_hz: f64,
    /// Scheduler latency allowance in seconds
    #[arg(long, default_value_t = 0.00004)]
    toggle_wait_s: f64,
    /// Skip the toggle-timing report
    #[arg(long, default_value_t = false)]
    skip_timing: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let workflow_config = if let Some(path) = args.workflow {
        WorkflowConfig::load(path)?
    } else {
        let mut config = WorkflowConfig::from_args(
            args.sample_count,
            args.sample_rate_hz,
            args.tone_hz,
            args.waveform,
        );
        config.cycles = args.cycles;
        config
    };

    if !args.skip_timing {
        let timing = toggle_timing(args.toggle_hz, args.toggle_wait_s)?;
        println!("target = {:.9}", timing.target_s);
        println!("offset = {:.9}", timing.offset_s);
    }

    info!(
        "rendering {} {} samples at {} Hz",
        workflow_config.sample_count, workflow_config.waveform, workflow_config.sample_rate_hz
    );

    let runner = Runner::new(workflow_config.clone());
    let generator_config = GeneratorConfig::from_workflow(&workflow_config);
    let request = build_render_request_from_config(&generator_config)?;
    let result = runner.execute(&request)?;

    println!(
        "Render -> {} samples, waveform {}, rms {}, peak {}",
        result.table.samples.len(),
        result.table.ancillary.waveform,
        result
            .rms
            .map(|rms| format!("{rms:.4}"))
            .unwrap_or_else(|| "n/a".to_string()),
        result
            .peak_frequency_hz
            .map(|hz| format!("{hz:.1} Hz"))
            .unwrap_or_else(|| "n/a".to_string()),
    );

    let emitter = Emitter::new(args.format);
    let model = EmissionModel {
        samples: result.table.samples.clone(),
        sample_rate_hz: result.table.ancillary.sample_rate_hz,
        tone_hz: result.table.ancillary.tone_hz,
        peak_frequency_hz: result.peak_frequency_hz,
        notes: result.notes,
    };
    emitter.publish(&model)?;

    if let Some(path) = args.out {
        emitter.write_to(&model, &path)?;
        emitter.publish_status(&format!("table written to {}", path.display()));
    }

    Ok(())
}
