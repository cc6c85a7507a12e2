//! Attribute lookup table of the `.hbxml` format.
//!
//! Every attribute the converter reads is described here together with the value it takes when
//! the attribute is absent, so that absent attributes never turn into errors.

/// An attribute of a chart element and its default value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Field {
    /// Element the attribute belongs to.
    pub element: &'static str,
    /// Attribute name.
    pub attribute: &'static str,
    /// Value used when the attribute is absent.
    pub default: &'static str,
}

impl Field {
    const fn new(element: &'static str, attribute: &'static str, default: &'static str) -> Self {
        Self {
            element,
            attribute,
            default,
        }
    }
}

pub const TITLE: Field = Field::new("meta", "title", "Unknown");
pub const ARTIST: Field = Field::new("meta", "artist", "Unknown");
pub const VERSION: Field = Field::new("meta", "version", "Unknown");
pub const CREATOR: Field = Field::new("meta", "creator", "Unknown");
pub const SOURCE: Field = Field::new("meta", "source", "");
pub const TAGS: Field = Field::new("meta", "tags", "");

pub const AUDIO_FILENAME: Field = Field::new("general", "audioFilename", "audio.mp3");
pub const AUDIO_LEAD_IN: Field = Field::new("general", "audioLeadIn", "0");
pub const PREVIEW_OFFSET: Field = Field::new("general", "previewOffset", "-1");
pub const LETTERBOX_DURING_BREAKS: Field = Field::new("general", "letterboxDuringBreaks", "false");

pub const HP_DRAIN_RATE: Field = Field::new("difficulty", "hpDrainRate", "5");
pub const CIRCLE_SIZE: Field = Field::new("difficulty", "circleSize", "5");
pub const OVERALL_DIFFICULTY: Field = Field::new("difficulty", "overallDifficulty", "5");
pub const APPROACH_RATE: Field = Field::new("difficulty", "approachRate", "5");
pub const SLIDER_MULTIPLIER: Field = Field::new("difficulty", "sliderMultiplier", "1");
pub const SLIDER_TICK_RATE: Field = Field::new("difficulty", "sliderTickRate", "1");

pub const TIMING_OFFSET: Field = Field::new("timing-point", "offset", "0");
pub const TIMING_BPM: Field = Field::new("timing-point", "bpm", "128");
pub const TIMING_SLIDER_MULTIPLIER: Field = Field::new("timing-point", "sliderMultiplier", "1");
/// Only the literal `false` makes a timing point uninherited.
pub const TIMING_INHERITED: Field = Field::new("timing-point", "inherited", "true");
pub const TIMING_SAMPLE_SET: Field = Field::new("timing-point", "sampleSet", "1");
pub const TIMING_VOLUME: Field = Field::new("timing-point", "volume", "100");
/// Only the literal `true` enables kiai.
pub const TIMING_SPECIAL: Field = Field::new("timing-point", "special", "false");

/// No default: an absent type is an unsupported object kind.
pub const OBJECT_TYPE: Field = Field::new("hit-object", "type", "");
pub const OBJECT_OFFSET: Field = Field::new("hit-object", "offset", "0");
pub const OBJECT_X: Field = Field::new("hit-object", "x", "0");
pub const OBJECT_Y: Field = Field::new("hit-object", "y", "0");
pub const OBJECT_NEW_COMBO: Field = Field::new("hit-object", "newCombo", "false");
pub const OBJECT_HITSOUND: Field = Field::new("hit-object", "hitsound", "0");
pub const OBJECT_END_OFFSET: Field = Field::new("hit-object", "endOffset", "0");
pub const SLIDER_CURVE: Field = Field::new("hit-object", "curve", "L");
/// Repeat count of a slider.
pub const SLIDER_BACKTRACKS: Field = Field::new("hit-object", "backtracks", "0");
pub const SLIDER_LENGTH: Field = Field::new("hit-object", "length", "0");
pub const SLIDER_ENDSOUNDS: Field = Field::new("hit-object", "endsounds", "");

pub const POINT_X: Field = Field::new("point", "x", "0");
pub const POINT_Y: Field = Field::new("point", "y", "0");

pub const COMBO_RED: Field = Field::new("combo", "red", "0");
pub const COMBO_GREEN: Field = Field::new("combo", "green", "0");
pub const COMBO_BLUE: Field = Field::new("combo", "blue", "0");

pub const BACKGROUND_FILENAME: Field = Field::new("background", "filename", "");

pub const BREAK_OFFSET: Field = Field::new("break", "offset", "0");
pub const BREAK_END_OFFSET: Field = Field::new("break", "endOffset", "0");

/// Fields whose value is read as a number.
#[cfg(test)]
const NUMERIC_FIELDS: &[Field] = &[
    AUDIO_LEAD_IN,
    PREVIEW_OFFSET,
    HP_DRAIN_RATE,
    CIRCLE_SIZE,
    OVERALL_DIFFICULTY,
    APPROACH_RATE,
    SLIDER_MULTIPLIER,
    SLIDER_TICK_RATE,
    TIMING_OFFSET,
    TIMING_BPM,
    TIMING_SLIDER_MULTIPLIER,
    TIMING_SAMPLE_SET,
    TIMING_VOLUME,
    OBJECT_OFFSET,
    OBJECT_X,
    OBJECT_Y,
    OBJECT_HITSOUND,
    OBJECT_END_OFFSET,
    SLIDER_BACKTRACKS,
    SLIDER_LENGTH,
    POINT_X,
    POINT_Y,
    COMBO_RED,
    COMBO_GREEN,
    COMBO_BLUE,
    BREAK_OFFSET,
    BREAK_END_OFFSET,
];
