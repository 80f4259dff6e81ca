pub mod table;
pub mod toggle;

pub use table::{TableAncillary, TableScenario, ToneTable, WaveformKind};
pub use toggle::{toggle_timing, ToggleTiming, REFERENCE_TICK_HZ};
