use crate::file::beatmap::{BeatLength, SampleBank, TimingPoint};
use crate::file::chart::{SourceTimingPoint, TimingKind};

/// Translates one timing point.
///
/// The point's own slider multiplier goes in the third column, uninherited or not.
/// The source sample set is written as the custom sample index, on top of the normal sample bank.
#[must_use]
pub fn translate_timing_point(source: &SourceTimingPoint) -> TimingPoint {
    let (beat_length, uninherited) = match source.kind {
        TimingKind::Uninherited { bpm } => (BeatLength::Millis(60000. / bpm), true),
        TimingKind::Inherited => (inherited_beat_length(source.slider_multiplier), false),
    };

    TimingPoint {
        time: source.offset,
        beat_length,
        meter: source.slider_multiplier,
        sample_set: SampleBank::Normal,
        sample_index: source.sample_set,
        volume: source.volume,
        uninherited,
        effects: if source.special { TimingPoint::KIAI } else { 0 },
    }
}

#[allow(clippy::float_cmp)]
fn inherited_beat_length(slider_multiplier: f64) -> BeatLength {
    if slider_multiplier == 1. {
        BeatLength::BaseVelocity
    } else {
        BeatLength::InverseVelocity(-100. / slider_multiplier)
    }
}

/// Translates timing points in order, without merging duplicates.
#[must_use]
pub fn translate_timing_points(source: &[SourceTimingPoint]) -> Vec<TimingPoint> {
    source.iter().map(translate_timing_point).collect()
}
