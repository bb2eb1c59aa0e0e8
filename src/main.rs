use clap::{Parser, Subcommand};
use rayon::prelude::*;
use ripecheck::analyzer::Analyzer;
use ripecheck::config::{self, AnalyzerConfig};
use ripecheck::output::{self, SourceInfo};
use ripecheck::report;
use ripecheck::verdict::AnalysisRecord;
use serde::Serialize;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "ripecheck")]
#[command(about = "Deterministic pomegranate ripeness verdicts from image bytes")]
#[command(long_about = "\
Deterministic pomegranate ripeness verdicts from image bytes

No pixels are inspected: the verdict is a stable function of the image's
bytes, built from a content hash, seeded pseudo-randomness, and a weighted
score. The same photo always gets the same verdict within a run — repeated
analyses replay the cached record, recommendation text included.

Examples:

  ripecheck analyze photo.jpg               # one verdict, human-readable
  ripecheck analyze shots/ --json           # whole directory, JSON array
  ripecheck report photo.jpg -o card.html   # self-contained HTML card

Run 'ripecheck gen-config' to print a documented ripecheck.toml.")]
#[command(version)]
struct Cli {
    /// Path to ripecheck.toml (defaults are used when absent)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze images and print their verdicts
    Analyze {
        /// Image files and/or directories to analyze
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Emit a JSON array instead of formatted text
        #[arg(long)]
        json: bool,
    },
    /// Render one image's verdict as a standalone HTML card
    Report {
        /// Image file to analyze
        path: PathBuf,
        /// Output HTML file
        #[arg(long, short, default_value = "report.html")]
        output: PathBuf,
    },
    /// Print a stock ripecheck.toml with all options documented
    GenConfig,
}

/// One analyzed file, as emitted by `analyze --json`.
#[derive(Serialize)]
struct FileVerdict {
    file: String,
    verdict: AnalysisRecord,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AnalyzerConfig::load(path)?,
        None => AnalyzerConfig::default(),
    };

    match cli.command {
        Command::Analyze { paths, json } => {
            let engine = Analyzer::with_config(&config);
            let files = collect_image_files(&paths);
            if files.is_empty() {
                return Err("no image files found in the given paths".into());
            }

            // Analysis is pure CPU; sniffing and hashing parallelize per
            // file while the shared cache deduplicates identical content.
            let mut analyzed: Vec<(PathBuf, SourceInfo, Arc<AnalysisRecord>)> = files
                .par_iter()
                .filter_map(|path| match analyze_file(&engine, path) {
                    Ok((info, record)) => Some((path.clone(), info, record)),
                    Err(message) => {
                        eprintln!("Skipping {}: {}", path.display(), message);
                        None
                    }
                })
                .collect();
            analyzed.sort_by(|a, b| a.0.cmp(&b.0));

            if json {
                let verdicts: Vec<FileVerdict> = analyzed
                    .into_iter()
                    .map(|(path, _, record)| FileVerdict {
                        file: path.display().to_string(),
                        verdict: (*record).clone(),
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&verdicts)?);
            } else {
                for (index, (path, info, record)) in analyzed.iter().enumerate() {
                    for line in output::verdict_lines(index + 1, &file_name(path), Some(info), record)
                    {
                        println!("{line}");
                    }
                }
                println!("Cache: {}", engine.cache_stats());
            }
        }
        Command::Report { path, output } => {
            let engine = Analyzer::with_config(&config);
            let (_, record) = analyze_file(&engine, &path).map_err(|m| format!("{}: {m}", path.display()))?;
            let html = report::render_report(&file_name(&path), &record);
            std::fs::write(&output, html.into_string())?;
            println!("Report written to {}", output.display());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Read, sniff, and analyze one file. The engine itself accepts any
/// non-empty bytes; the format check lives here so typos and stray
/// non-image files are reported per file instead of silently scored.
fn analyze_file(
    engine: &Analyzer,
    path: &Path,
) -> Result<(SourceInfo, Arc<AnalysisRecord>), String> {
    let bytes = std::fs::read(path).map_err(|e| e.to_string())?;
    let format = image::guess_format(&bytes).map_err(|_| "not a recognized image".to_string())?;
    let dimensions = image::ImageReader::with_format(Cursor::new(&bytes), format)
        .into_dimensions()
        .ok();
    let record = engine.analyze(&bytes).map_err(|e| e.to_string())?;
    Ok((
        SourceInfo {
            format: format!("{format:?}").to_lowercase(),
            dimensions,
            bytes: bytes.len() as u64,
        },
        record,
    ))
}

/// Gather image files from the given paths: files are taken as-is once
/// their extension looks like an image; directories are walked recursively.
fn collect_image_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            for entry in WalkDir::new(path)
                .sort_by_file_name()
                .into_iter()
                .filter_map(Result::ok)
            {
                if entry.file_type().is_file() && has_image_extension(entry.path()) {
                    files.push(entry.into_path());
                }
            }
        } else {
            files.push(path.clone());
        }
    }
    files
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| image::ImageFormat::from_extension(ext).is_some())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
