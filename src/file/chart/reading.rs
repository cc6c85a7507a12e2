use std::str::FromStr;

use super::fields::{self, Field};
use super::{
    Background, Break, ChartDifficulty, ChartGeneral, ChartMetadata, ComboColor, ControlPoint, CurveKind,
    SourceChart, SourceHitObject, SourceHitObjectKind, SourceTimingPoint, TimingKind,
};
use crate::error::{ChartErrorKind, ReadError};
use crate::utils::{parse_override_list, parse_override_token};
use crate::xml::Element;

/// Raw value of a field, or its default if the attribute is absent.
pub(crate) fn field_value<'a>(element: &'a Element, field: Field) -> &'a str {
    element.attr(field.attribute).unwrap_or(field.default)
}

/// Numeric value of a field. An absent attribute takes the field's default.
pub(crate) fn numeric_field<T: FromStr>(element: &Element, field: Field) -> Result<T, ReadError> {
    let value = field_value(element, field);
    value.trim().parse().map_err(|_| {
        ReadError::new(
            element.span,
            ChartErrorKind::MalformedNumericField {
                element: element.name.clone(),
                attribute: field.attribute,
                value: value.to_owned(),
            },
        )
        .with_label("in this element")
    })
}

/// Whether a field is exactly `true`.
fn flag_field(element: &Element, field: Field) -> bool {
    field_value(element, field) == "true"
}

fn required_section<'a>(root: &'a Element, name: &'static str) -> Result<&'a Element, ReadError> {
    root.child(name).ok_or_else(|| {
        ReadError::new(root.span, ChartErrorKind::MissingRequiredSection(name))
            .with_label("in this chart")
            .with_help("meta, general and difficulty are direct children of the root element")
    })
}

fn read_metadata(meta: &Element) -> ChartMetadata {
    ChartMetadata {
        title: field_value(meta, fields::TITLE).to_owned(),
        artist: field_value(meta, fields::ARTIST).to_owned(),
        version: field_value(meta, fields::VERSION).to_owned(),
        creator: field_value(meta, fields::CREATOR).to_owned(),
        source: field_value(meta, fields::SOURCE).to_owned(),
        tags: field_value(meta, fields::TAGS).to_owned(),
    }
}

fn read_general(general: &Element) -> Result<ChartGeneral, ReadError> {
    Ok(ChartGeneral {
        audio_filename: field_value(general, fields::AUDIO_FILENAME).to_owned(),
        audio_lead_in: numeric_field(general, fields::AUDIO_LEAD_IN)?,
        preview_offset: numeric_field(general, fields::PREVIEW_OFFSET)?,
        letterbox_during_breaks: flag_field(general, fields::LETTERBOX_DURING_BREAKS),
    })
}

fn read_difficulty(difficulty: &Element) -> Result<ChartDifficulty, ReadError> {
    Ok(ChartDifficulty {
        hp_drain_rate: numeric_field(difficulty, fields::HP_DRAIN_RATE)?,
        circle_size: numeric_field(difficulty, fields::CIRCLE_SIZE)?,
        overall_difficulty: numeric_field(difficulty, fields::OVERALL_DIFFICULTY)?,
        approach_rate: numeric_field(difficulty, fields::APPROACH_RATE)?,
        slider_multiplier: numeric_field(difficulty, fields::SLIDER_MULTIPLIER)?,
        slider_tick_rate: numeric_field(difficulty, fields::SLIDER_TICK_RATE)?,
    })
}

pub(crate) fn read_timing_point(element: &Element) -> Result<SourceTimingPoint, ReadError> {
    let kind = if field_value(element, fields::TIMING_INHERITED) == "false" {
        TimingKind::Uninherited {
            bpm: numeric_field(element, fields::TIMING_BPM)?,
        }
    } else {
        TimingKind::Inherited
    };

    Ok(SourceTimingPoint {
        offset: numeric_field(element, fields::TIMING_OFFSET)?,
        kind,
        slider_multiplier: numeric_field(element, fields::TIMING_SLIDER_MULTIPLIER)?,
        sample_set: numeric_field(element, fields::TIMING_SAMPLE_SET)?,
        volume: numeric_field(element, fields::TIMING_VOLUME)?,
        special: flag_field(element, fields::TIMING_SPECIAL),
    })
}

fn read_slider(element: &Element, head: ControlPoint) -> Result<SourceHitObjectKind, ReadError> {
    let mut control_points = vec![head];
    for point in element.descendants_named("point") {
        control_points.push(ControlPoint {
            x: numeric_field(point, fields::POINT_X)?,
            y: numeric_field(point, fields::POINT_Y)?,
        });
    }

    let inline_hitsounds = element
        .children_named("hit-sound")
        .map(|hit_sound| parse_override_token(&hit_sound.text()))
        .collect();

    Ok(SourceHitObjectKind::Slider {
        control_points,
        curve: CurveKind::from_token(field_value(element, fields::SLIDER_CURVE)),
        repeat_count: numeric_field(element, fields::SLIDER_BACKTRACKS)?,
        length: numeric_field(element, fields::SLIDER_LENGTH)?,
        endsounds: parse_override_list(field_value(element, fields::SLIDER_ENDSOUNDS), '|'),
        inline_hitsounds,
    })
}

pub(crate) fn read_hit_object(element: &Element) -> Result<SourceHitObject, ReadError> {
    let x = numeric_field(element, fields::OBJECT_X)?;
    let y = numeric_field(element, fields::OBJECT_Y)?;

    let kind = match field_value(element, fields::OBJECT_TYPE) {
        "1" => SourceHitObjectKind::Tap,
        "2" => read_slider(element, ControlPoint { x, y })?,
        "4" => SourceHitObjectKind::Spinner {
            end_offset: numeric_field(element, fields::OBJECT_END_OFFSET)?,
        },
        "8" => SourceHitObjectKind::Hold {
            end_offset: numeric_field(element, fields::OBJECT_END_OFFSET)?,
        },
        other => {
            return Err(
                ReadError::new(element.span, ChartErrorKind::UnsupportedObjectKind(other.to_owned()))
                    .with_label("this hit object")
                    .with_help("supported types are 1 (tap), 2 (slider), 4 (spinner) and 8 (hold)"),
            );
        }
    };

    Ok(SourceHitObject {
        x,
        y,
        offset: numeric_field(element, fields::OBJECT_OFFSET)?,
        new_combo: flag_field(element, fields::OBJECT_NEW_COMBO),
        hit_sound: numeric_field(element, fields::OBJECT_HITSOUND)?,
        kind,
    })
}

fn read_combo_color(element: &Element) -> Result<ComboColor, ReadError> {
    Ok(ComboColor {
        red: numeric_field(element, fields::COMBO_RED)?,
        green: numeric_field(element, fields::COMBO_GREEN)?,
        blue: numeric_field(element, fields::COMBO_BLUE)?,
    })
}

fn read_break(element: &Element) -> Result<Break, ReadError> {
    Ok(Break {
        offset: numeric_field(element, fields::BREAK_OFFSET)?,
        end_offset: numeric_field(element, fields::BREAK_END_OFFSET)?,
    })
}

impl SourceChart {
    /// Builds the chart model from the root element of a `.hbxml` document.
    ///
    /// # Errors
    ///
    /// This function will return an error if `meta`, `general` or `difficulty` is missing,
    /// if a numeric attribute holds something else than a number,
    /// or if a hit object has an unsupported type.
    pub fn from_element(root: &Element) -> Result<Self, ReadError> {
        let metadata = read_metadata(required_section(root, "meta")?);
        let general = read_general(required_section(root, "general")?)?;
        let difficulty = read_difficulty(required_section(root, "difficulty")?)?;

        let timing_points = root
            .descendants_named("timing-point")
            .into_iter()
            .map(read_timing_point)
            .collect::<Result<Vec<_>, _>>()?;

        let hit_objects = root
            .descendants_named("hit-object")
            .into_iter()
            .map(read_hit_object)
            .collect::<Result<Vec<_>, _>>()?;

        let combo_colors = root
            .descendants_named("combo")
            .into_iter()
            .map(read_combo_color)
            .collect::<Result<Vec<_>, _>>()?;

        let backgrounds = root
            .descendants_named("background")
            .into_iter()
            .map(|background| Background {
                filename: field_value(background, fields::BACKGROUND_FILENAME).to_owned(),
            })
            .collect();

        let breaks = root
            .descendants_named("break")
            .into_iter()
            .map(read_break)
            .collect::<Result<Vec<_>, _>>()?;

        log::debug!(
            "Read chart {:?} with {} timing points and {} hit objects",
            metadata.title,
            timing_points.len(),
            hit_objects.len()
        );

        Ok(Self {
            metadata,
            general,
            difficulty,
            timing_points,
            hit_objects,
            combo_colors,
            backgrounds,
            breaks,
        })
    }
}
