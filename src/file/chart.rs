//! Source chart model: what a `.hbxml` document describes.

pub mod fields;
pub mod reading;

use super::beatmap::HitSound;
use super::Timestamp;

/// Information used to identify the chart
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChartMetadata {
    pub title: String,
    pub artist: String,
    /// Difficulty name
    pub version: String,
    pub creator: String,
    pub source: String,
    /// Space-separated search terms, kept as written.
    pub tags: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChartGeneral {
    /// Location of the audio file relative to the chart folder
    pub audio_filename: String,
    /// Milliseconds of silence before the audio starts playing
    pub audio_lead_in: i32,
    /// Time when the audio preview should start
    pub preview_offset: Timestamp,
    pub letterbox_during_breaks: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChartDifficulty {
    pub hp_drain_rate: f32,
    pub circle_size: f32,
    pub overall_difficulty: f32,
    pub approach_rate: f32,
    /// Base slider velocity
    pub slider_multiplier: f32,
    pub slider_tick_rate: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TimingKind {
    /// Sets a new tempo.
    Uninherited { bpm: f64 },
    /// Keeps the tempo of the last uninherited point and changes the slider velocity.
    Inherited,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SourceTimingPoint {
    pub offset: Timestamp,
    pub kind: TimingKind,
    /// Slider velocity multiplier, read on every point.
    pub slider_multiplier: f64,
    pub sample_set: u32,
    pub volume: u8,
    /// Kiai time.
    pub special: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CurveKind {
    Perfect,
    Linear,
    Bezier,
    Catmull,
}

impl CurveKind {
    /// Reads a curve token. Unknown tokens fall back to linear.
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        match token.to_ascii_lowercase().as_str() {
            "p" | "perfect" => Self::Perfect,
            "l" | "linear" => Self::Linear,
            "b" | "bezier" => Self::Bezier,
            "c" | "catmull" => Self::Catmull,
            other => {
                log::warn!("Unknown curve type {other:?}, using linear");
                Self::Linear
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControlPoint {
    pub x: i32,
    pub y: i32,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SourceHitObjectKind {
    Tap,
    Slider {
        /// Control points, starting with the head of the slider.
        control_points: Vec<ControlPoint>,
        curve: CurveKind,
        /// Amount of times the slider goes back on its path.
        repeat_count: u16,
        /// Length of the path in osu! pixels.
        length: f64,
        /// Per-edge overrides from the `endsounds` attribute.
        endsounds: Vec<u32>,
        /// Per-edge overrides from the `hit-sound` children.
        inline_hitsounds: Vec<u32>,
    },
    Spinner {
        end_offset: Timestamp,
    },
    Hold {
        end_offset: Timestamp,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct SourceHitObject {
    pub x: i32,
    pub y: i32,
    pub offset: Timestamp,
    pub new_combo: bool,
    /// Base hitsound of the object.
    pub hit_sound: HitSound,
    pub kind: SourceHitObjectKind,
}

impl SourceHitObject {
    /// Amount of edges of a slider (head, one per repeat, tail). `None` for other objects.
    #[must_use]
    pub fn edge_count(&self) -> Option<usize> {
        match &self.kind {
            SourceHitObjectKind::Slider { repeat_count, .. } => Some(usize::from(*repeat_count) + 2),
            _ => None,
        }
    }
}

/// Combo color. Channels are kept as written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ComboColor {
    pub red: i32,
    pub green: i32,
    pub blue: i32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Background {
    pub filename: String,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Break {
    pub offset: Timestamp,
    pub end_offset: Timestamp,
}

/// A parsed `.hbxml` chart.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceChart {
    pub metadata: ChartMetadata,
    pub general: ChartGeneral,
    pub difficulty: ChartDifficulty,
    pub timing_points: Vec<SourceTimingPoint>,
    pub hit_objects: Vec<SourceHitObject>,
    pub combo_colors: Vec<ComboColor>,
    pub backgrounds: Vec<Background>,
    pub breaks: Vec<Break>,
}

#[cfg(test)]
mod tests {
    use super::CurveKind;

    #[test]
    fn curve_tokens() {
        assert_eq!(CurveKind::from_token("p"), CurveKind::Perfect);
        assert_eq!(CurveKind::from_token("perfect"), CurveKind::Perfect);
        assert_eq!(CurveKind::from_token("B"), CurveKind::Bezier);
        assert_eq!(CurveKind::from_token("catmull"), CurveKind::Catmull);
        assert_eq!(CurveKind::from_token("l"), CurveKind::Linear);
        assert_eq!(CurveKind::from_token("spline"), CurveKind::Linear);
        assert_eq!(CurveKind::from_token(""), CurveKind::Linear);
    }
}
