//! Target model: an osu! beatmap as written to a `.osu` file.

use std::fmt;
use std::io::{self, Write};
use std::num::ParseIntError;
use std::ops::{BitAnd, BitOr};
use std::str::FromStr;

pub mod serializing;

pub use super::Timestamp;
use crate::utils::DecimalView;
use serializing::serialize_beatmap_file;

/// General information about the beatmap
#[derive(Clone, Debug, PartialEq)]
pub struct GeneralSection {
    /// Location of the audio file relative to the current folder
    pub audio_filename: String,
    /// Milliseconds of silence before the audio starts playing
    pub audio_lead_in: i32,
    /// Time in milliseconds when the audio preview should start
    pub preview_time: Timestamp,
    /// Speed of the countdown before the first hit object
    /// - 0 = no countdown
    /// - 1 = normal
    /// - 2 = half
    /// - 3 = double
    pub countdown: i32,
    /// Sample set that will be used if timing points do not override it (Normal, Soft, Drum)
    pub sample_set: String,
    /// Multiplier for the threshold in time where hit objects placed close together stack (0–1)
    pub stack_leniency: f64,
    /// - 0 = osu!
    /// - 1 = osu!taiko
    /// - 2 = osu!catch
    /// - 3 = osu!mania
    pub mode: u8,
    /// Whether or not breaks have a letterboxing effect
    pub letterbox_in_breaks: bool,
    /// Whether or not the storyboard allows widescreen viewing
    pub widescreen_storyboard: bool,
}

impl Default for GeneralSection {
    fn default() -> Self {
        Self {
            audio_filename: String::new(),
            audio_lead_in: 0,
            preview_time: -1.,
            countdown: 0,
            sample_set: "Normal".to_owned(),
            stack_leniency: 0.7,
            mode: 0,
            letterbox_in_breaks: false,
            widescreen_storyboard: true,
        }
    }
}

/// Saved settings for the beatmap editor
#[derive(Clone, Debug, PartialEq)]
pub struct EditorSection {
    /// Distance snap multiplier
    pub distance_spacing: f64,
    /// Beat snap divisor
    pub beat_divisor: f64,
    /// Grid size
    pub grid_size: i32,
    /// Scale factor for the object timeline
    pub timeline_zoom: f64,
}

impl Default for EditorSection {
    fn default() -> Self {
        Self {
            distance_spacing: 1.,
            beat_divisor: 2.,
            grid_size: 8,
            timeline_zoom: 1.,
        }
    }
}

/// Information used to identify the beatmap
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetadataSection {
    /// Romanised song title
    pub title: String,
    /// Song title
    pub title_unicode: String,
    /// Romanised song artist
    pub artist: String,
    /// Song artist
    pub artist_unicode: String,
    /// Beatmap creator
    pub creator: String,
    /// Difficulty name
    pub version: String,
    /// Original media the song was produced for
    pub source: String,
    /// Search terms, space-separated
    pub tags: String,
    /// Difficulty ID
    pub beatmap_id: i32,
    /// Beatmap ID
    pub beatmap_set_id: i32,
}

/// Difficulty settings
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DifficultySection {
    /// HP setting (0–10)
    pub hp_drain_rate: f32,
    /// CS setting (0–10)
    pub circle_size: f32,
    /// OD setting (0–10)
    pub overall_difficulty: f32,
    /// AR setting (0–10)
    pub approach_rate: f32,
    /// Base slider velocity in hundreds of osu! pixels per beat
    pub slider_multiplier: f32,
    /// Amount of slider ticks per beat
    pub slider_tick_rate: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub enum EventParams {
    Background {
        /// Location of the background image relative to the beatmap directory.
        filename: String,
        /// Offset in osu! pixels from the center of the screen.
        x_offset: i32,
        /// Offset in osu! pixels from the center of the screen.
        y_offset: i32,
    },
    Break {
        end_time: Timestamp,
    },
    /// Legacy background colour transformation.
    ColourTransformation { r: u8, g: u8, b: u8 },
}

/// Beatmap and storyboard graphic event
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    /// Start time of the event, in milliseconds from the beginning of the beatmap's audio.
    /// For events that do not use a start time, the default is `0`.
    pub start_time: Timestamp,
    /// Extra parameters specific to the event's type.
    pub params: EventParams,
}

impl Event {
    /// Numeric type of the event as written in `.osu` files.
    #[must_use]
    pub const fn event_type(&self) -> u8 {
        match self.params {
            EventParams::Background { .. } => 0,
            EventParams::Break { .. } => 2,
            EventParams::ColourTransformation { .. } => 3,
        }
    }
}

/// Second field of a timing point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BeatLength {
    /// Duration of a beat in milliseconds (uninherited points).
    Millis(f64),
    /// Negative inverse slider velocity multiplier, as a percentage (inherited points).
    /// For example, `-50` makes sliders twice as fast as `slider_multiplier`.
    InverseVelocity(f64),
    /// Inherited point that keeps the base slider velocity, written as a bare `-100`.
    BaseVelocity,
}

impl fmt::Display for BeatLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Millis(value) | Self::InverseVelocity(value) => write!(f, "{}", DecimalView(*value)),
            Self::BaseVelocity => write!(f, "-100"),
        }
    }
}

/// Timing and control points
#[derive(Clone, Debug, PartialEq)]
pub struct TimingPoint {
    /// Start time of the timing section, in milliseconds from the beginning of the beatmap's audio.
    /// The end of the timing section is the next timing point's time (or never, if this is the last timing point).
    pub time: Timestamp,
    pub beat_length: BeatLength,
    /// Third column. Holds the chart point's own slider multiplier, written as given.
    pub meter: f64,
    /// Default sample set for hit objects (0 = beatmap default, 1 = normal, 2 = soft, 3 = drum).
    pub sample_set: SampleBank,
    /// Custom sample index for hit objects. `0` indicates osu!'s default hitsounds.
    pub sample_index: u32,
    /// Volume percentage for hit objects.
    pub volume: u8,
    /// Whether or not the timing point is uninherited.
    pub uninherited: bool,
    /// Bit flags that give the timing point extra effects.
    pub effects: u32,
}

impl TimingPoint {
    /// Effect bit enabling kiai time.
    pub const KIAI: u32 = 0b1;
}

/// Combo colour. Channels are written as they are, without range checks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Color {
    pub r: i32,
    pub g: i32,
    pub b: i32,
}

impl Color {
    #[must_use]
    pub fn to_osu_string(&self) -> String {
        let Self { r, g, b } = self;
        format!("{r},{g},{b}")
    }
}

/// Combo and skin colors
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ColorsSection {
    /// Additive combo colors
    pub combo_colors: Vec<Color>,
}

/// A bank of samples for normal, whistle, finish and clap hitsounds.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[repr(u8)]
pub enum SampleBank {
    #[default]
    Auto = 0,
    Normal = 1,
    Soft = 2,
    Drum = 3,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HitSampleSet {
    /// Sample set of the normal sound.
    pub normal_set: SampleBank,
    /// Sample set of the whistle, finish, and clap sounds.
    pub addition_set: SampleBank,
}

impl HitSampleSet {
    #[must_use]
    pub fn to_osu_string(&self) -> String {
        let Self {
            normal_set,
            addition_set,
        } = *self;
        format!("{}:{}", normal_set as u8, addition_set as u8)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HitSample {
    /// Sample set of the normal sound.
    pub normal_set: SampleBank,
    /// Sample set of the whistle, finish, and clap sounds.
    pub addition_set: SampleBank,
    /// Index of the sample. If this is `0`, the timing point's sample index will be used instead.
    pub index: u32,
    /// Volume of the sample from 1 to 100. If this is `0`, the timing point's volume will be used instead.
    pub volume: u32,
}

impl HitSample {
    /// Hit sample with an empty filename, as in `0:0:0:0:`.
    #[must_use]
    pub fn to_osu_string(&self) -> String {
        format!("{}:", self.to_osu_string_without_filename())
    }

    /// Hit sample without the filename field, as in `0:0:0:0`.
    #[must_use]
    pub fn to_osu_string_without_filename(&self) -> String {
        let Self {
            normal_set,
            addition_set,
            index,
            volume,
        } = self;

        format!("{}:{}:{index}:{volume}", *normal_set as u8, *addition_set as u8)
    }
}

/// Type of curve used to construct a slider at a particular point.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SliderCurveType {
    /// inherit the previous point's curve type
    Inherit,
    /// bézier curve
    Bezier,
    /// centripetal catmull-rom
    Catmull,
    /// linear
    Linear,
    /// perfect circle
    PerfectCurve,
}

impl SliderCurveType {
    /// Curve letter followed by a pipe, or nothing for [`SliderCurveType::Inherit`].
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Inherit => "",
            Self::Bezier => "B|",
            Self::Catmull => "C|",
            Self::Linear => "L|",
            Self::PerfectCurve => "P|",
        }
    }
}

/// Anchor point used to construct a slider.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SliderPoint {
    /// Type of curve used from this point on.
    pub curve_type: SliderCurveType,
    /// Horizontal coordinate of the slider point.
    pub x: i32,
    /// Vertical coordinate of the slider point.
    pub y: i32,
}

impl SliderPoint {
    #[must_use]
    pub const fn new(curve_type: SliderCurveType, x: i32, y: i32) -> Self {
        Self { curve_type, x, y }
    }
}

/// Extra parameters specific to the object's type.
#[derive(Clone, Debug, PartialEq)]
pub enum HitObjectParams {
    HitCircle,
    Slider {
        /// Curve type of the first anchor point.
        first_curve_type: SliderCurveType,
        /// Anchor points used to construct the slider, head included.
        curve_points: Vec<SliderPoint>,
        /// Amount of times the player has to follow the slider's curve back-and-forth before
        /// the slider is complete. It can also be interpreted as the repeat count plus one.
        slides: u32,
        /// Visual length in osu! pixels of the slider.
        length: f64,
        /// Hitsounds that play when hitting edges of the slider's curve.
        /// The first sound is the one that plays when the slider is first clicked,
        /// and the last sound is the one that plays when the slider's end is hit.
        edge_hitsounds: Vec<HitSound>,
        /// Sample sets used for the edge hitsounds.
        edge_samplesets: Vec<HitSampleSet>,
    },
    Spinner {
        /// End time of the spinner, in milliseconds from the beginning of the beatmap's audio.
        end_time: Timestamp,
    },
    /// Note: `x` and `y` do not affect holds, they sit at the center of the playfield.
    Hold {
        /// End time of the hold, in milliseconds from the beginning of the beatmap's audio.
        end_time: Timestamp,
    },
}

/// Bit flags of the hitsound applied to an object.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(transparent)]
pub struct HitSound(u8);

impl fmt::Display for HitSound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for HitSound {
    type Err = ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(u8::from_str(s)?))
    }
}

impl From<u8> for HitSound {
    fn from(bits: u8) -> Self {
        Self(bits)
    }
}

impl HitSound {
    pub const NONE: Self = Self(0b0_0000);
    pub const WHISTLE: Self = Self(0b0_0010);
    pub const FINISH: Self = Self(0b0_0100);
    pub const CLAP: Self = Self(0b0_1000);
    /// Baseline bit carried by every slider edge hitsound.
    pub const EDGE_NORMAL: Self = Self(0b1_0000);
    /// Whistle, finish and clap.
    pub const ADDITIONS: Self = Self(0b0_1110);

    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }
}

impl BitAnd for HitSound {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

impl BitOr for HitSound {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

/// Hit object
#[derive(Clone, Debug, PartialEq)]
pub struct HitObject {
    /// Horizontal position in osu! pixels of the object.
    pub x: i32,
    /// Vertical position in osu! pixels of the object.
    pub y: i32,
    /// Time when the object is to be hit, in milliseconds from the beginning of the beatmap's audio.
    pub time: Timestamp,
    /// Whether the object starts a new combo.
    pub new_combo: bool,
    /// Bit flags indicating the hitsound applied to the object.
    pub hit_sound: HitSound,
    /// Extra parameters specific to the object's type.
    pub object_params: HitObjectParams,
    /// Information about which samples are played when the object is hit.
    pub hit_sample: HitSample,
}

impl HitObject {
    /// Position of the bit that signifies whether a hit object is a hit circle in its `type` bit flags.
    pub const RAW_TYPE_HIT_CIRCLE: u8 = 0;
    /// Position of the bit that signifies whether a hit object is a slider in its `type` bit flags.
    pub const RAW_TYPE_SLIDER: u8 = 1;
    /// Position of the bit that signifies whether a hit object is a spinner in its `type` bit flags.
    pub const RAW_TYPE_SPINNER: u8 = 3;
    /// Position of the bit that signifies whether a hit object is an osu!mania hold in its `type` bit flags.
    pub const RAW_TYPE_OSU_MANIA_HOLD: u8 = 7;
    /// Position of the bit that signifies whether a hit object is on a new combo.
    pub const RAW_NEW_COMBO: u8 = 2;

    /// Center of the playfield, where holds are placed.
    pub const PLAYFIELD_CENTER: (i32, i32) = (256, 192);

    /// Type bit flags, with the new combo bit folded in.
    #[must_use]
    pub const fn raw_object_type(&self) -> u8 {
        let rt = match self.object_params {
            HitObjectParams::HitCircle => Self::RAW_TYPE_HIT_CIRCLE,
            HitObjectParams::Slider { .. } => Self::RAW_TYPE_SLIDER,
            HitObjectParams::Spinner { .. } => Self::RAW_TYPE_SPINNER,
            HitObjectParams::Hold { .. } => Self::RAW_TYPE_OSU_MANIA_HOLD,
        };

        let new_combo = if self.new_combo { 1 << Self::RAW_NEW_COMBO } else { 0 };

        1 << rt | new_combo
    }
}

/// `.osu` is a human-readable file format containing information about a beatmap.
#[derive(Clone, Debug, PartialEq)]
#[allow(clippy::module_name_repetitions)]
pub struct BeatmapFile {
    /// Version written on the first line, as in `osu file format v14`.
    pub osu_file_format: u32,
    /// General information about the beatmap
    pub general: GeneralSection,
    /// Saved settings for the beatmap editor
    pub editor: EditorSection,
    /// Information used to identify the beatmap
    pub metadata: MetadataSection,
    /// Difficulty settings
    pub difficulty: DifficultySection,
    /// Beatmap and storyboard graphic events
    pub events: Vec<Event>,
    /// Timing and control points
    pub timing_points: Vec<TimingPoint>,
    /// Combo and skin colors
    pub colors: ColorsSection,
    /// Hit objects
    pub hit_objects: Vec<HitObject>,
}

impl BeatmapFile {
    /// Write this beatmap file as a `.osu` file.
    ///
    /// # Errors
    ///
    /// This function will return an error if an IO issue occured.
    pub fn serialize<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        serialize_beatmap_file(self, writer)
    }

    /// Renders this beatmap file as a `.osu` string.
    #[must_use]
    pub fn to_osu_string(&self) -> String {
        let mut buffer = Vec::new();
        // io::Write for Vec<u8> never errors, and the serializer only writes through it
        let _ = self.serialize(&mut buffer);
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::{BeatLength, HitObject, HitObjectParams, HitSample, HitSound};

    fn object(new_combo: bool, object_params: HitObjectParams) -> HitObject {
        HitObject {
            x: 0,
            y: 0,
            time: 0.,
            new_combo,
            hit_sound: HitSound::NONE,
            object_params,
            hit_sample: HitSample::default(),
        }
    }

    #[test]
    fn raw_object_types() {
        assert_eq!(object(false, HitObjectParams::HitCircle).raw_object_type(), 1);
        assert_eq!(object(true, HitObjectParams::HitCircle).raw_object_type(), 5);
        assert_eq!(object(true, HitObjectParams::Spinner { end_time: 0. }).raw_object_type(), 12);
        assert_eq!(object(false, HitObjectParams::Hold { end_time: 0. }).raw_object_type(), 128);
    }

    #[test]
    fn beat_lengths() {
        assert_eq!(BeatLength::Millis(500.).to_string(), "500.0");
        assert_eq!(BeatLength::InverseVelocity(-50.).to_string(), "-50.0");
        assert_eq!(BeatLength::BaseVelocity.to_string(), "-100");
    }

    #[test]
    fn hit_sound_flags() {
        let hs = HitSound::WHISTLE | HitSound::CLAP;
        assert_eq!(hs.bits(), 10);
        assert_eq!((hs & HitSound::ADDITIONS).bits(), 10);
        assert_eq!((HitSound::EDGE_NORMAL | hs & HitSound::CLAP).bits(), 24);
        assert_eq!(HitSample::default().to_osu_string(), "0:0:0:0:");
        assert_eq!(HitSample::default().to_osu_string_without_filename(), "0:0:0:0");
    }
}
