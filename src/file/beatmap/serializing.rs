use std::io::{self, Write};

use super::{
    BeatmapFile, ColorsSection, DifficultySection, EditorSection, Event, EventParams, GeneralSection, HitObject,
    HitObjectParams, HitSampleSet, HitSound, MetadataSection, SliderCurveType, SliderPoint, TimingPoint,
};

fn serialize_general_section<W: Write>(section: &GeneralSection, writer: &mut W) -> io::Result<()> {
    writeln!(writer, "[General]")?;
    writeln!(writer, "AudioFilename: {}", section.audio_filename)?;
    writeln!(writer, "AudioLeadIn: {}", section.audio_lead_in)?;
    writeln!(writer, "PreviewTime: {}", section.preview_time)?;
    writeln!(writer, "Countdown: {}", section.countdown)?;
    writeln!(writer, "SampleSet: {}", section.sample_set)?;
    writeln!(writer, "StackLeniency: {}", section.stack_leniency)?;
    writeln!(writer, "Mode: {}", section.mode)?;
    writeln!(writer, "LetterboxInBreaks: {}", u8::from(section.letterbox_in_breaks))?;
    writeln!(writer, "WidescreenStoryboard: {}", u8::from(section.widescreen_storyboard))?;
    writeln!(writer)
}

fn serialize_editor_section<W: Write>(section: &EditorSection, writer: &mut W) -> io::Result<()> {
    writeln!(writer, "[Editor]")?;
    writeln!(writer, "DistanceSpacing: {}", section.distance_spacing)?;
    writeln!(writer, "BeatDivisor: {}", section.beat_divisor)?;
    writeln!(writer, "GridSize: {}", section.grid_size)?;
    writeln!(writer, "TimelineZoom: {}", section.timeline_zoom)?;
    writeln!(writer)
}

fn serialize_metadata_section<W: Write>(section: &MetadataSection, writer: &mut W) -> io::Result<()> {
    writeln!(writer, "[Metadata]")?;
    writeln!(writer, "Title:{}", section.title)?;
    writeln!(writer, "TitleUnicode:{}", section.title_unicode)?;
    writeln!(writer, "Artist:{}", section.artist)?;
    writeln!(writer, "ArtistUnicode:{}", section.artist_unicode)?;
    writeln!(writer, "Creator:{}", section.creator)?;
    writeln!(writer, "Version:{}", section.version)?;
    writeln!(writer, "Source:{}", section.source)?;
    writeln!(writer, "Tags:{}", section.tags)?;
    writeln!(writer, "BeatmapID:{}", section.beatmap_id)?;
    writeln!(writer, "BeatmapSetID:{}", section.beatmap_set_id)?;
    writeln!(writer)
}

fn serialize_difficulty_section<W: Write>(section: &DifficultySection, writer: &mut W) -> io::Result<()> {
    writeln!(writer, "[Difficulty]")?;
    writeln!(writer, "HPDrainRate:{}", section.hp_drain_rate)?;
    writeln!(writer, "CircleSize:{}", section.circle_size)?;
    writeln!(writer, "OverallDifficulty:{}", section.overall_difficulty)?;
    writeln!(writer, "ApproachRate:{}", section.approach_rate)?;
    writeln!(writer, "SliderMultiplier:{}", section.slider_multiplier)?;
    writeln!(writer, "SliderTickRate:{}", section.slider_tick_rate)?;
    writeln!(writer)
}

fn serialize_event<W: Write>(event: &Event, writer: &mut W) -> io::Result<()> {
    write!(writer, "{},{},", event.event_type(), event.start_time)?;
    match &event.params {
        EventParams::Background {
            filename,
            x_offset,
            y_offset,
        } => {
            writeln!(writer, "\"{filename}\",{x_offset},{y_offset}")
        }
        EventParams::Break { end_time } => {
            writeln!(writer, "{end_time}")
        }
        EventParams::ColourTransformation { r, g, b } => {
            writeln!(writer, "{r},{g},{b}")
        }
    }
}

fn serialize_events<W: Write>(events: &[Event], writer: &mut W) -> io::Result<()> {
    let of_type = |event_type: u8| events.iter().filter(move |e| e.event_type() == event_type);

    writeln!(writer, "[Events]")?;
    writeln!(writer, "//Background and Video events")?;
    for event in of_type(0) {
        serialize_event(event, writer)?;
    }
    writeln!(writer, "//Break Periods")?;
    for event in of_type(2) {
        serialize_event(event, writer)?;
    }
    writeln!(writer, "//Storyboard Layer 0 (Background)")?;
    writeln!(writer, "//Storyboard Layer 1 (Fail)")?;
    writeln!(writer, "//Storyboard Layer 2 (Pass)")?;
    writeln!(writer, "//Storyboard Layer 3 (Foreground)")?;
    writeln!(writer, "//Storyboard Sound Samples")?;
    writeln!(writer, "//Background Colour Transformations")?;
    for event in of_type(3) {
        serialize_event(event, writer)?;
    }
    writeln!(writer)
}

fn serialize_timing_point<W: Write>(timing_point: &TimingPoint, writer: &mut W) -> io::Result<()> {
    let TimingPoint {
        time,
        beat_length,
        meter,
        sample_set,
        sample_index,
        volume,
        uninherited,
        effects,
    } = timing_point;

    writeln!(
        writer,
        "{time},{beat_length},{meter},{},{sample_index},{volume},{},{effects}",
        *sample_set as u8,
        u8::from(*uninherited),
    )
}

fn serialize_color_section<W: Write>(section: &ColorsSection, writer: &mut W) -> io::Result<()> {
    writeln!(writer, "[Colours]")?;
    for (i, combo_color) in section.combo_colors.iter().enumerate() {
        writeln!(writer, "Combo{} : {}", i + 1, combo_color.to_osu_string())?;
    }
    writeln!(writer)
}

fn serialize_curve_points<W: Write>(
    first_curve_type: SliderCurveType,
    curve_points: &[SliderPoint],
    writer: &mut W,
) -> io::Result<()> {
    write!(writer, "{}", first_curve_type.prefix())?;

    let mut started = false;
    for &curve_point in curve_points {
        if started {
            write!(writer, "|")?;
        }

        let SliderPoint { curve_type, x, y } = curve_point;
        write!(writer, "{}{x}:{y}", curve_type.prefix())?;
        started = true;
    }

    Ok(())
}

fn serialize_hit_object<W: Write>(hit_object: &HitObject, writer: &mut W) -> io::Result<()> {
    let HitObject {
        x,
        y,
        time,
        hit_sound,
        object_params,
        hit_sample,
        ..
    } = hit_object;

    let raw_object_type = hit_object.raw_object_type();
    match object_params {
        HitObjectParams::HitCircle => {
            writeln!(
                writer,
                "{x},{y},{time},{raw_object_type},{hit_sound},{}",
                hit_sample.to_osu_string()
            )
        }
        HitObjectParams::Slider {
            first_curve_type,
            curve_points,
            slides,
            length,
            edge_hitsounds,
            edge_samplesets,
        } => {
            // the slider's own hitsound lives on its edges
            write!(writer, "{x},{y},{time},{raw_object_type},0,")?;
            serialize_curve_points(*first_curve_type, curve_points, writer)?;

            let edge_hitsounds: Vec<_> = edge_hitsounds.iter().map(HitSound::to_string).collect();
            let edge_samplesets: Vec<_> = edge_samplesets.iter().map(HitSampleSet::to_osu_string).collect();
            writeln!(
                writer,
                ",{slides},{length},{},{},{}",
                edge_hitsounds.join("|"),
                edge_samplesets.join("|"),
                hit_sample.to_osu_string()
            )
        }
        HitObjectParams::Spinner { end_time } => {
            writeln!(
                writer,
                "{x},{y},{time},{raw_object_type},{hit_sound},{end_time},{}",
                hit_sample.to_osu_string()
            )
        }
        HitObjectParams::Hold { end_time } => {
            writeln!(
                writer,
                "{x},{y},{time},{raw_object_type},{hit_sound},{end_time},{}",
                hit_sample.to_osu_string_without_filename()
            )
        }
    }
}

/// Write a beatmap file as a `.osu` file.
///
/// Every section is written, even when empty.
///
/// # Errors
///
/// This function will return an error if an IO issue occured.
pub fn serialize_beatmap_file<W: Write>(bm_file: &BeatmapFile, writer: &mut W) -> io::Result<()> {
    write!(writer, "osu file format v{}\n\n", bm_file.osu_file_format)?;

    serialize_general_section(&bm_file.general, writer)?;
    serialize_editor_section(&bm_file.editor, writer)?;
    serialize_metadata_section(&bm_file.metadata, writer)?;
    serialize_difficulty_section(&bm_file.difficulty, writer)?;
    serialize_events(&bm_file.events, writer)?;

    writeln!(writer, "[TimingPoints]")?;
    for timing_point in &bm_file.timing_points {
        serialize_timing_point(timing_point, writer)?;
    }
    writeln!(writer)?;

    serialize_color_section(&bm_file.colors, writer)?;

    writeln!(writer, "[HitObjects]")?;
    for hit_object in &bm_file.hit_objects {
        serialize_hit_object(hit_object, writer)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::file::beatmap::serializing::{serialize_curve_points, serialize_events, serialize_hit_object};
    use crate::file::beatmap::{
        Event, EventParams, HitObject, HitObjectParams, HitSample, HitSampleSet, HitSound, SliderCurveType,
        SliderPoint,
    };

    fn render_hit_object(hit_object: &HitObject) -> String {
        let mut s: Vec<u8> = Vec::new();
        serialize_hit_object(hit_object, &mut s).unwrap();
        String::from_utf8(s).unwrap()
    }

    #[test]
    fn curve_points() {
        let first_curve_point = SliderCurveType::Bezier;
        let curve_points = &[
            SliderPoint::new(SliderCurveType::Bezier, 465, 225),
            SliderPoint::new(SliderCurveType::Bezier, 473, 217),
            SliderPoint::new(SliderCurveType::Inherit, 457, 121),
        ];

        let mut s: Vec<u8> = Vec::new();
        serialize_curve_points(first_curve_point, curve_points, &mut s).unwrap();

        assert_eq!(b"B|B|465:225|B|473:217|457:121", s.as_slice());
    }

    #[test]
    fn curve_points_stable() {
        let first_curve_point = SliderCurveType::PerfectCurve;
        let curve_points = &[
            SliderPoint::new(SliderCurveType::Inherit, 100, 100),
            SliderPoint::new(SliderCurveType::Inherit, 150, 50),
            SliderPoint::new(SliderCurveType::Inherit, 200, 100),
        ];

        let mut s: Vec<u8> = Vec::new();
        serialize_curve_points(first_curve_point, curve_points, &mut s).unwrap();

        assert_eq!(b"P|100:100|150:50|200:100", s.as_slice());
    }

    #[test]
    fn slider_line() {
        let slider = HitObject {
            x: 100,
            y: 100,
            time: 1000.,
            new_combo: true,
            hit_sound: HitSound::WHISTLE,
            object_params: HitObjectParams::Slider {
                first_curve_type: SliderCurveType::Linear,
                curve_points: vec![
                    SliderPoint::new(SliderCurveType::Inherit, 100, 100),
                    SliderPoint::new(SliderCurveType::Inherit, 200, 100),
                ],
                slides: 2,
                length: 100.,
                edge_hitsounds: vec![HitSound::from(26), HitSound::from(22), HitSound::from(18)],
                edge_samplesets: vec![HitSampleSet::default(); 3],
            },
            hit_sample: HitSample::default(),
        };

        assert_eq!(
            render_hit_object(&slider),
            "100,100,1000,6,0,L|100:100|200:100,2,100,26|22|18,0:0|0:0|0:0,0:0:0:0:\n"
        );
    }

    #[test]
    fn hold_line() {
        let hold = HitObject {
            x: 256,
            y: 192,
            time: 500.,
            new_combo: false,
            hit_sound: HitSound::FINISH,
            object_params: HitObjectParams::Hold { end_time: 900. },
            hit_sample: HitSample::default(),
        };

        assert_eq!(render_hit_object(&hold), "256,192,500,128,4,900,0:0:0:0\n");
    }

    #[test]
    fn spinner_line() {
        let spinner = HitObject {
            x: 256,
            y: 192,
            time: 2000.,
            new_combo: true,
            hit_sound: HitSound::NONE,
            object_params: HitObjectParams::Spinner { end_time: 3000. },
            hit_sample: HitSample::default(),
        };

        assert_eq!(render_hit_object(&spinner), "256,192,2000,12,0,3000,0:0:0:0:\n");
    }

    #[test]
    fn events_are_grouped() {
        let events = [
            Event {
                start_time: 10000.,
                params: EventParams::Break { end_time: 12000. },
            },
            Event {
                start_time: 0.,
                params: EventParams::Background {
                    filename: "bg.jpg".to_owned(),
                    x_offset: 0,
                    y_offset: 0,
                },
            },
        ];

        let mut s: Vec<u8> = Vec::new();
        serialize_events(&events, &mut s).unwrap();
        let s = String::from_utf8(s).unwrap();
        let lines: Vec<_> = s.lines().collect();

        assert_eq!(lines[0], "[Events]");
        assert_eq!(lines[1], "//Background and Video events");
        assert_eq!(lines[2], "0,0,\"bg.jpg\",0,0");
        assert_eq!(lines[3], "//Break Periods");
        assert_eq!(lines[4], "2,10000,12000");
        assert_eq!(lines[10], "//Background Colour Transformations");
        assert_eq!(lines[11], "");
        assert_eq!(lines.len(), 12);
    }
}
