//! Converts Hexis `.hbxml` charts into osu! `.osu` beatmaps.
//!
//! ```no_run
//! use hbxml_osu::convert::{convert_file, ConvertOptions};
//!
//! let beatmap = convert_file("chart.hbxml", &ConvertOptions::default())?;
//! beatmap.serialize(&mut std::io::stdout())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod convert;
pub mod error;
pub mod file;
pub mod utils;
pub mod xml;

pub use convert::{convert_chart, convert_file, convert_str, ConvertOptions};
pub use error::{ChartError, ChartErrorKind, ConvertFileError};
pub use file::beatmap::BeatmapFile;
pub use file::chart::SourceChart;
