//! Assembly of an osu! beatmap from a Hexis chart.

pub mod hit_objects;
pub mod hitsound;
pub mod timing;

use std::fs;
use std::path::Path;

use crate::error::{ChartError, ConvertFileError};
use crate::file::beatmap::{
    BeatmapFile, Color, ColorsSection, DifficultySection, EditorSection, Event, EventParams, GeneralSection,
    MetadataSection,
};
use crate::file::chart::SourceChart;
use crate::xml::parse_document;

use self::hit_objects::translate_hit_objects;
use self::timing::translate_timing_points;

/// Version of the `.osu` format that is written.
pub const OSU_FILE_FORMAT: u32 = 14;

/// Knobs of the conversion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Add the slider's own hitsound to every one of its edges.
    pub base_hitsound_on_edges: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            base_hitsound_on_edges: true,
        }
    }
}

fn convert_general(chart: &SourceChart) -> GeneralSection {
    GeneralSection {
        audio_filename: chart.general.audio_filename.clone(),
        audio_lead_in: chart.general.audio_lead_in,
        preview_time: chart.general.preview_offset,
        letterbox_in_breaks: chart.general.letterbox_during_breaks,
        ..GeneralSection::default()
    }
}

fn convert_metadata(chart: &SourceChart) -> MetadataSection {
    let meta = &chart.metadata;
    MetadataSection {
        title: meta.title.clone(),
        title_unicode: meta.title.clone(),
        artist: meta.artist.clone(),
        artist_unicode: meta.artist.clone(),
        creator: meta.creator.clone(),
        version: meta.version.clone(),
        source: meta.source.clone(),
        tags: meta.tags.clone(),
        beatmap_id: 0,
        beatmap_set_id: -1,
    }
}

fn convert_difficulty(chart: &SourceChart) -> DifficultySection {
    let difficulty = &chart.difficulty;
    DifficultySection {
        hp_drain_rate: difficulty.hp_drain_rate,
        circle_size: difficulty.circle_size,
        overall_difficulty: difficulty.overall_difficulty,
        approach_rate: difficulty.approach_rate,
        slider_multiplier: difficulty.slider_multiplier,
        slider_tick_rate: difficulty.slider_tick_rate,
    }
}

fn convert_events(chart: &SourceChart) -> Vec<Event> {
    let backgrounds = chart.backgrounds.iter().map(|background| Event {
        start_time: 0.,
        params: EventParams::Background {
            filename: background.filename.clone(),
            x_offset: 0,
            y_offset: 0,
        },
    });

    let breaks = chart.breaks.iter().map(|brk| Event {
        start_time: brk.offset,
        params: EventParams::Break {
            end_time: brk.end_offset,
        },
    });

    let colour_transformation = Event {
        start_time: 100.,
        params: EventParams::ColourTransformation { r: 163, g: 162, b: 255 },
    };

    backgrounds
        .chain(breaks)
        .chain(std::iter::once(colour_transformation))
        .collect()
}

fn convert_colors(chart: &SourceChart) -> ColorsSection {
    ColorsSection {
        combo_colors: chart
            .combo_colors
            .iter()
            .map(|c| Color {
                r: c.red,
                g: c.green,
                b: c.blue,
            })
            .collect(),
    }
}

/// Converts a chart into a beatmap. Nothing can fail at this point.
#[must_use]
pub fn convert_chart(chart: &SourceChart, options: &ConvertOptions) -> BeatmapFile {
    let timing_points = translate_timing_points(&chart.timing_points);
    let hit_objects = translate_hit_objects(&chart.hit_objects, options);

    log::debug!(
        "Converted {} timing points, {} hit objects, {} combo colours",
        timing_points.len(),
        hit_objects.len(),
        chart.combo_colors.len()
    );

    BeatmapFile {
        osu_file_format: OSU_FILE_FORMAT,
        general: convert_general(chart),
        editor: EditorSection::default(),
        metadata: convert_metadata(chart),
        difficulty: convert_difficulty(chart),
        events: convert_events(chart),
        timing_points,
        colors: convert_colors(chart),
        hit_objects,
    }
}

/// Parses a `.hbxml` document and converts it into a beatmap.
///
/// # Errors
///
/// This function will return an error if the document is not well-formed XML
/// or if it does not describe a chart.
pub fn convert_str(
    name: impl AsRef<str>,
    source: &str,
    options: &ConvertOptions,
) -> Result<BeatmapFile, ChartError> {
    let name = name.as_ref();
    let root = parse_document(name, source)?;
    let chart =
        SourceChart::from_element(&root).map_err(|e| ChartError::from_source_and_read_error(name, source, e))?;
    Ok(convert_chart(&chart, options))
}

/// Reads a `.hbxml` file and converts it into a beatmap.
///
/// # Errors
///
/// This function will return an error if the file cannot be read or if [`convert_str`] fails.
pub fn convert_file<P: AsRef<Path>>(
    path: P,
    options: &ConvertOptions,
) -> Result<BeatmapFile, ConvertFileError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| ConvertFileError::Io {
        path: path.to_owned(),
        source,
    })?;

    Ok(convert_str(path.display().to_string(), &source, options)?)
}
