pub mod beatmap;
pub mod chart;

/// Milliseconds from the beginning of the chart's audio.
pub type Timestamp = f64;
