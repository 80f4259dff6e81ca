//! Waveform-synthesis core for the Rust tone-table toolkit.
//!
//! The modules mirror the firmware's PWM playback pipeline while providing
//! safe abstractions, scoped buffers, and well-defined synthesis stages.

pub mod math;
pub mod playback;
pub mod prelude;
pub mod synthesis;
pub mod telemetry;

pub use prelude::{StageInput, StageOutput, SynthesisStage};
