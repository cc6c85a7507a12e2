use super::hitsound::edge_hitsounds;
use super::ConvertOptions;
use crate::file::beatmap::{HitObject, HitObjectParams, HitSample, HitSampleSet, SliderCurveType, SliderPoint};
use crate::file::chart::{CurveKind, SourceHitObject, SourceHitObjectKind};

/// Combo bookkeeping across the object sequence.
///
/// The first object starts the first combo implicitly, so it never carries the new combo bit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ComboState {
    #[default]
    AwaitingFirst,
    Emitting,
}

impl ComboState {
    /// Whether the next object gets the new combo bit, given its own flag.
    pub fn next(&mut self, new_combo: bool) -> bool {
        match self {
            Self::AwaitingFirst => {
                *self = Self::Emitting;
                false
            }
            Self::Emitting => new_combo,
        }
    }
}

impl From<CurveKind> for SliderCurveType {
    fn from(curve: CurveKind) -> Self {
        match curve {
            CurveKind::Perfect => Self::PerfectCurve,
            CurveKind::Linear => Self::Linear,
            CurveKind::Bezier => Self::Bezier,
            CurveKind::Catmull => Self::Catmull,
        }
    }
}

/// Translates one hit object. `new_combo` is the combo bit decided by [`ComboState`].
#[must_use]
pub fn translate_hit_object(
    source: &SourceHitObject,
    new_combo: bool,
    options: &ConvertOptions,
) -> HitObject {
    let (x, y, new_combo, object_params) = match &source.kind {
        SourceHitObjectKind::Tap => (source.x, source.y, new_combo, HitObjectParams::HitCircle),
        SourceHitObjectKind::Slider {
            control_points,
            curve,
            repeat_count,
            length,
            endsounds,
            inline_hitsounds,
        } => {
            let edge_count = source.edge_count().unwrap_or_default();
            let base = options.base_hitsound_on_edges.then_some(source.hit_sound);

            let params = HitObjectParams::Slider {
                first_curve_type: SliderCurveType::from(*curve),
                curve_points: control_points
                    .iter()
                    .map(|p| SliderPoint::new(SliderCurveType::Inherit, p.x, p.y))
                    .collect(),
                slides: u32::from(*repeat_count) + 1,
                length: *length,
                edge_hitsounds: edge_hitsounds(base, endsounds, inline_hitsounds, edge_count),
                edge_samplesets: vec![HitSampleSet::default(); edge_count],
            };

            (source.x, source.y, new_combo, params)
        }
        // spinners always start a new combo
        SourceHitObjectKind::Spinner { end_offset } => (
            source.x,
            source.y,
            true,
            HitObjectParams::Spinner { end_time: *end_offset },
        ),
        // holds never carry the new combo bit
        SourceHitObjectKind::Hold { end_offset } => {
            let (x, y) = HitObject::PLAYFIELD_CENTER;
            (x, y, false, HitObjectParams::Hold { end_time: *end_offset })
        }
    };

    HitObject {
        x,
        y,
        time: source.offset,
        new_combo,
        hit_sound: source.hit_sound,
        object_params,
        hit_sample: HitSample::default(),
    }
}

/// Translates hit objects one to one, in order.
#[must_use]
pub fn translate_hit_objects(source: &[SourceHitObject], options: &ConvertOptions) -> Vec<HitObject> {
    let mut combo = ComboState::default();
    source
        .iter()
        .map(|hit_object| {
            let new_combo = combo.next(hit_object.new_combo);
            translate_hit_object(hit_object, new_combo, options)
        })
        .collect()
}
