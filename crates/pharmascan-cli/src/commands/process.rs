//! Process command - extract order records from a single OCR text file.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use pharmascan_core::export::render;
use pharmascan_core::{HeuristicOrderParser, OrderParser, OrderRecord, OutputFormat};

use super::{FormatArg, image_name_for, load_config, read_ocr_text};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (.txt OCR text or .json OCR response)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (default: from config)
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    /// Image name written to every record (default: input file name)
    #[arg(long)]
    image_name: Option<String>,

    /// Number of the first record
    #[arg(long, default_value = "1")]
    start: u32,

    /// Report records missing ID, email or name
    #[arg(long)]
    validate: bool,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message("Reading OCR text...");

    let text = read_ocr_text(&args.input)?;
    let image_name = args
        .image_name
        .clone()
        .unwrap_or_else(|| image_name_for(&args.input));

    pb.set_message("Extracting records...");
    let parser = HeuristicOrderParser::from_config(&config.extraction);
    let result = parser.parse(&text, &image_name, args.start);

    pb.finish_and_clear();

    debug!(
        "{} start lines, {} groups dropped, {} orphan lines",
        result.stats.start_lines, result.stats.dropped_groups, result.stats.orphan_lines
    );

    if args.validate {
        report_missing_fields(&result.records);
    }

    let format: OutputFormat = args
        .format
        .map(Into::into)
        .unwrap_or(config.output.default_format);
    let output = render(&result.records, format, &config.output)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} {} records written to {}",
            style("✓").green(),
            result.records.len(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Print records lacking any anchor field to stderr.
pub fn report_missing_fields(records: &[OrderRecord]) {
    let incomplete: Vec<_> = records
        .iter()
        .map(|r| (r, r.missing_key_fields()))
        .filter(|(_, missing)| !missing.is_empty())
        .collect();

    if incomplete.is_empty() {
        return;
    }

    eprintln!("{}", style("Validation issues:").yellow());
    for (record, missing) in incomplete {
        let names: Vec<&str> = missing.iter().map(|f| f.name()).collect();
        eprintln!(
            "  - record {} ({}): missing {}",
            record.record_no().unwrap_or_default(),
            record.image_name(),
            names.join(", ")
        );
    }
}
