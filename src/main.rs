use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use hbxml_osu::{convert_file, BeatmapFile, ConvertOptions};
use walkdir::WalkDir;

const PATH_HELP: &str = "Path to a .hbxml chart or a folder containing .hbxml charts.";

/// Convert Hexis charts into osu! beatmaps.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        help = "Output file, or output folder when converting a folder (defaults to next to each chart)."
    )]
    out_path: Option<PathBuf>,

    #[arg(
        short,
        long,
        help = "Whether to recurse in the folder. (option is ignored if the path is a file)."
    )]
    recursive: bool,

    #[arg(long, help = "Write the beatmap to stdout instead of a file (single chart only).")]
    stdout: bool,

    #[arg(long, help = "Do not add a slider's own hitsound to each of its edges.")]
    no_base_edge_hitsound: bool,

    #[arg(help = PATH_HELP)]
    path: PathBuf,
}

fn main() -> ExitCode {
    env_logger::init();
    let Cli {
        out_path,
        recursive,
        stdout,
        no_base_edge_hitsound,
        path,
    } = Cli::parse();

    let options = ConvertOptions {
        base_hitsound_on_edges: !no_base_edge_hitsound,
    };

    if !path.is_dir() {
        let out = if stdout {
            None
        } else {
            Some(out_path.unwrap_or_else(|| path.with_extension("osu")))
        };

        return if cli_convert(&path, out.as_deref(), &options) {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        };
    }

    if stdout {
        log::error!("--stdout only works with a single chart, but {} is a folder", path.display());
        return ExitCode::FAILURE;
    }

    let failures = cli_convert_folder(&path, out_path.as_deref(), recursive, &options);
    if failures == 0 {
        ExitCode::SUCCESS
    } else {
        log::error!("{failures} chart(s) failed to convert");
        ExitCode::FAILURE
    }
}

fn is_chart(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext.eq_ignore_ascii_case("hbxml"))
}

/// Converts every chart of a folder, returning the amount of charts that failed.
fn cli_convert_folder(
    path: &Path,
    out_path: Option<&Path>,
    recursive: bool,
    options: &ConvertOptions,
) -> usize {
    let mut failures = 0;

    for entry in WalkDir::new(path)
        .max_depth(if recursive { usize::MAX } else { 1 })
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| !e.path().is_dir() && is_chart(e.path()))
    {
        let chart_path = entry.path();
        let out = match out_path {
            Some(out_dir) => {
                let relative = chart_path.strip_prefix(path).unwrap_or(chart_path);
                out_dir.join(relative).with_extension("osu")
            }
            None => chart_path.with_extension("osu"),
        };

        if !cli_convert(chart_path, Some(&out), options) {
            failures += 1;
        }
    }

    failures
}

/// Converts a single chart. Errors are reported here, the return value tells whether it succeeded.
fn cli_convert(path: &Path, out_path: Option<&Path>, options: &ConvertOptions) -> bool {
    log::warn!("Parsing {}...", path.display());
    let beatmap = match convert_file(path, options) {
        Ok(beatmap) => beatmap,
        Err(err) => {
            log::error!("\n{:?}", miette::Report::new(err));
            return false;
        }
    };

    match write_beatmap_out(&beatmap, out_path) {
        Ok(()) => true,
        Err(err) => {
            log::error!("Could not write beatmap for {}: {err}", path.display());
            false
        }
    }
}

fn write_beatmap_out(beatmap: &BeatmapFile, path: Option<&Path>) -> io::Result<()> {
    if let Some(path) = path {
        log::warn!("Write beatmap to {}...", path.display());
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut out_file = BufWriter::new(File::create(path)?);
        beatmap.serialize(&mut out_file)?;
        out_file.flush()
    } else {
        let mut stdout = io::stdout().lock();
        beatmap.serialize(&mut stdout)?;
        stdout.flush()
    }
}
