//! Batch processing command for multiple OCR text files.
//!
//! Every file is segmented up front so each image gets a starting record
//! number that cannot collide with its neighbours. Extraction then runs on
//! blocking tasks and the records are concatenated in path order.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use pharmascan_core::export::render;
use pharmascan_core::order::LineGroup;
use pharmascan_core::{HeuristicOrderParser, OrderRecord, OutputFormat};

use super::process::report_missing_fields;
use super::{FormatArg, image_name_for, is_supported_input, load_config, read_ocr_text};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern matching .txt or .json inputs
    #[arg(required = true)]
    input: String,

    /// Combined output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (default: from config)
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    /// Number of the first record
    #[arg(long, default_value = "1")]
    start: u32,

    /// Report records missing ID, email or name
    #[arg(long)]
    validate: bool,
}

/// One input file after segmentation.
struct PlannedFile {
    path: PathBuf,
    image_name: String,
    groups: Vec<LineGroup>,
    start_record_no: u32,
}

/// Input that could not be read.
struct FailedFile {
    path: PathBuf,
    error: String,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let mut files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| is_supported_input(p))
        .collect();
    files.sort();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    eprintln!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    let parser = Arc::new(HeuristicOrderParser::from_config(&config.extraction));
    let (planned, failed) = plan(&files, &parser, args.start, args.continue_on_error)?;

    let pb = ProgressBar::new(planned.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let semaphore = Arc::new(Semaphore::new(args.jobs.max(1)));
    let mut handles: Vec<JoinHandle<Vec<OrderRecord>>> = Vec::with_capacity(planned.len());

    for file in planned {
        let permit = semaphore.clone().acquire_owned().await?;
        let parser = Arc::clone(&parser);
        let pb = pb.clone();

        handles.push(tokio::task::spawn_blocking(move || {
            let _permit = permit;
            let records =
                parser.extract_groups(&file.groups, &file.image_name, file.start_record_no);
            debug!("{}: {} records", file.path.display(), records.len());
            pb.inc(1);
            records
        }));
    }

    let mut records = Vec::new();
    for handle in handles {
        records.extend(handle.await?);
    }

    pb.finish_and_clear();

    if args.validate {
        report_missing_fields(&records);
    }

    let format: OutputFormat = args
        .format
        .map(Into::into)
        .unwrap_or(config.output.default_format);
    let output = render(&records, format, &config.output)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    eprintln!();
    eprintln!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        files.len(),
        start.elapsed()
    );
    eprintln!(
        "   {} records, {} failed files",
        style(records.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        eprintln!();
        eprintln!("{}", style("Failed files:").red());
        for file in &failed {
            eprintln!("  - {}: {}", file.path.display(), file.error);
        }
    }

    Ok(())
}

/// Read and segment every file, assigning starting record numbers in order.
fn plan(
    files: &[PathBuf],
    parser: &HeuristicOrderParser,
    first_record_no: u32,
    continue_on_error: bool,
) -> anyhow::Result<(Vec<PlannedFile>, Vec<FailedFile>)> {
    let mut planned = Vec::with_capacity(files.len());
    let mut failed = Vec::new();
    let mut next_record_no = first_record_no;

    for path in files {
        let text = match read_ocr_text(path) {
            Ok(text) => text,
            Err(e) if continue_on_error => {
                warn!("Failed to read {}: {}", path.display(), e);
                failed.push(FailedFile {
                    path: path.clone(),
                    error: e.to_string(),
                });
                continue;
            }
            Err(e) => {
                error!("Failed to read {}: {}", path.display(), e);
                anyhow::bail!("Processing failed: {}", e);
            }
        };

        let groups = parser.segmenter().segment(&text).groups;
        let start_record_no = next_record_no;
        next_record_no = next_record_no.saturating_add(groups.len() as u32);

        planned.push(PlannedFile {
            path: path.clone(),
            image_name: image_name_for(path),
            groups,
            start_record_no,
        });
    }

    Ok((planned, failed))
}
