//! CLI tool for extracting and summarizing slide-deck content.

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use decksum_core::{DeckExtractor, ExtractionConfig, SlideRecord, TableSerializer};
use decksum_pptx::PptxParser;
use decksum_summarizer::{
    PromptTemplate, SummarizerConfig, SummaryLedger, SummaryState, TableSummarizer,
};
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};

/// ZIP local-file-header magic; every .pptx starts with it.
const PPTX_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// Extract titles, text, and tables from a .pptx deck, with optional
/// LLM summaries of the tables.
#[derive(Parser, Debug)]
#[command(name = "decksum")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input presentation (.pptx)
    input: PathBuf,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Minimum data rows for a table to be kept
    #[arg(long, default_value = "2")]
    min_table_rows: usize,

    /// Minimum columns for a table to be kept
    #[arg(long, default_value = "2")]
    min_table_cols: usize,

    /// Maximum input file size in megabytes
    #[arg(long, default_value = "5")]
    max_size_mb: u64,

    /// Request an LLM summary for each extracted table (needs GROQ_API_KEY)
    #[arg(short, long)]
    summarize: bool,

    /// Model identifier for summarization
    #[arg(long)]
    model: Option<String>,

    /// Custom prompt template file (must contain {table_data})
    #[arg(long)]
    prompt_template: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Plain-text report with fixed-width tables
    Text,
    /// Markdown report with pipe tables
    Markdown,
    /// Machine-readable JSON
    Json,
}

/// Everything the report renderers consume.
#[derive(Debug, Serialize)]
struct Report {
    filename: String,
    slides: Vec<SlideRecord>,
    summaries: Vec<SummaryEntry>,
}

#[derive(Debug, Serialize)]
struct SummaryEntry {
    slide_number: usize,
    table_index: usize,
    state: SummaryState,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    validate_input(&args.input, args.max_size_mb)?;

    let filename = args
        .input
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown");

    let file = File::open(&args.input)
        .with_context(|| format!("Failed to open {}", args.input.display()))?;
    let reader = BufReader::new(file);

    let deck = PptxParser::new()
        .parse(reader, filename)
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    if args.verbose {
        eprintln!("Found {} slides", deck.slides.len());
    }

    let config = ExtractionConfig::new()
        .with_min_table_rows(args.min_table_rows)
        .with_min_table_cols(args.min_table_cols);
    let slides = DeckExtractor::new(config).extract_all(&deck);

    let ledger = if args.summarize {
        summarize_tables(&slides, &args)?
    } else {
        SummaryLedger::new()
    };

    let report = Report {
        filename: filename.to_string(),
        summaries: collect_summaries(&slides, &ledger),
        slides,
    };

    let rendered = match args.format {
        Format::Text => render_text(&report),
        Format::Markdown => render_markdown(&report),
        Format::Json => serde_json::to_string_pretty(&report).context("Failed to encode JSON")?,
    };

    match &args.output {
        Some(path) => {
            let mut file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            file.write_all(rendered.as_bytes())
                .with_context(|| format!("Failed to write to {}", path.display()))?;
            if args.verbose {
                eprintln!("Written to: {}", path.display());
            }
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

/// Reject inputs that are missing, not .pptx, oversized, or not ZIP data.
fn validate_input(path: &Path, max_size_mb: u64) -> Result<()> {
    if !path.exists() {
        bail!("File not found: {}", path.display());
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());
    if extension.as_deref() != Some("pptx") {
        bail!(
            "Unsupported file format: {} (expected .pptx)",
            path.display()
        );
    }

    let size = path
        .metadata()
        .with_context(|| format!("Failed to stat {}", path.display()))?
        .len();
    if size > max_size_mb * 1024 * 1024 {
        bail!(
            "File size ({:.2}MB) exceeds maximum allowed size ({}MB)",
            size as f64 / (1024.0 * 1024.0),
            max_size_mb
        );
    }

    let mut magic = [0u8; 4];
    File::open(path)?
        .read_exact(&mut magic)
        .with_context(|| "Failed to read file header")?;
    if magic != PPTX_MAGIC {
        bail!("Invalid or corrupted file: {} is not a ZIP", path.display());
    }

    Ok(())
}

/// Request a summary for every extracted table, recording outcomes per
/// table. One failed request never aborts the rest.
fn summarize_tables(slides: &[SlideRecord], args: &Args) -> Result<SummaryLedger> {
    let mut config = SummarizerConfig::from_env()?;
    if let Some(model) = &args.model {
        config = config.with_model(model);
    }

    let template = match &args.prompt_template {
        Some(path) => PromptTemplate::from_file(path)?,
        None => PromptTemplate::default(),
    };

    let summarizer = TableSummarizer::new(config, template)?;
    let mut ledger = SummaryLedger::new();

    for slide in slides {
        for (table_index, table_text) in slide.table_texts.iter().enumerate() {
            ledger.set(slide.slide_number, table_index, SummaryState::Pending);

            match summarizer.generate(table_text) {
                Ok(summary) => {
                    ledger.set(
                        slide.slide_number,
                        table_index,
                        SummaryState::Ready(summary),
                    );
                }
                Err(e) => {
                    log::error!(
                        "Summary failed for slide {} table {}: {}",
                        slide.slide_number,
                        table_index,
                        e
                    );
                    ledger.set(
                        slide.slide_number,
                        table_index,
                        SummaryState::Failed(e.to_string()),
                    );
                }
            }
        }
    }

    Ok(ledger)
}

/// Flatten the ledger into deck order for the report.
fn collect_summaries(slides: &[SlideRecord], ledger: &SummaryLedger) -> Vec<SummaryEntry> {
    let mut entries = Vec::new();
    for slide in slides {
        for table_index in 0..slide.table_texts.len() {
            let state = ledger.state(slide.slide_number, table_index);
            if *state != SummaryState::NotRequested {
                entries.push(SummaryEntry {
                    slide_number: slide.slide_number,
                    table_index,
                    state: state.clone(),
                });
            }
        }
    }
    entries
}

fn render_text(report: &Report) -> String {
    let serializer = TableSerializer::new();
    let mut out = String::new();

    out.push_str(&format!("Deck: {}\n", report.filename));

    for slide in &report.slides {
        out.push('\n');
        match &slide.title {
            Some(title) => out.push_str(&format!("Slide {}: {}\n", slide.slide_number, title)),
            None => out.push_str(&format!("Slide {}\n", slide.slide_number)),
        }

        if !slide.has_content {
            out.push_str("  (no content)\n");
            continue;
        }

        for block in &slide.text_blocks {
            for line in block.lines() {
                out.push_str(&format!("  {}\n", line));
            }
        }

        for (table_index, table) in slide.tables.iter().enumerate() {
            out.push('\n');
            for line in serializer.to_plain_text(table).lines() {
                out.push_str(&format!("  {}\n", line));
            }
            push_summary_text(&mut out, report, slide.slide_number, table_index);
        }
    }

    out
}

fn render_markdown(report: &Report) -> String {
    let mut out = String::new();

    out.push_str(&format!("# {}\n", report.filename));

    for slide in &report.slides {
        out.push('\n');
        match &slide.title {
            Some(title) => {
                out.push_str(&format!("## Slide {}: {}\n", slide.slide_number, title))
            }
            None => out.push_str(&format!("## Slide {}\n", slide.slide_number)),
        }

        if !slide.has_content {
            out.push_str("\n*(no content)*\n");
            continue;
        }

        for block in &slide.text_blocks {
            out.push('\n');
            out.push_str(block);
            out.push('\n');
        }

        for (table_index, table_text) in slide.table_texts.iter().enumerate() {
            out.push('\n');
            out.push_str(table_text);
            out.push('\n');
            push_summary_markdown(&mut out, report, slide.slide_number, table_index);
        }
    }

    out
}

fn find_summary<'a>(
    report: &'a Report,
    slide_number: usize,
    table_index: usize,
) -> Option<&'a SummaryState> {
    report
        .summaries
        .iter()
        .find(|s| s.slide_number == slide_number && s.table_index == table_index)
        .map(|s| &s.state)
}

fn push_summary_text(out: &mut String, report: &Report, slide_number: usize, table_index: usize) {
    match find_summary(report, slide_number, table_index) {
        Some(SummaryState::Ready(summary)) => {
            out.push_str(&format!("  Summary: {}\n", summary.trim()));
        }
        Some(SummaryState::Failed(error)) => {
            out.push_str(&format!("  Summary unavailable: {}\n", error));
        }
        _ => {}
    }
}

fn push_summary_markdown(
    out: &mut String,
    report: &Report,
    slide_number: usize,
    table_index: usize,
) {
    match find_summary(report, slide_number, table_index) {
        Some(SummaryState::Ready(summary)) => {
            out.push_str(&format!("\n> {}\n", summary.trim().replace('\n', "\n> ")));
        }
        Some(SummaryState::Failed(error)) => {
            out.push_str(&format!("\n> Summary unavailable: {}\n", error));
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use decksum_core::NormalizedTable;

    fn report_with_one_slide(slide: SlideRecord) -> Report {
        Report {
            filename: "deck.pptx".to_string(),
            slides: vec![slide],
            summaries: Vec::new(),
        }
    }

    #[test]
    fn test_empty_slide_renders_no_content_marker() {
        let report = report_with_one_slide(SlideRecord::empty(1));

        let text = render_text(&report);
        assert!(text.contains("(no content)"));

        let markdown = render_markdown(&report);
        assert!(markdown.contains("*(no content)*"));
    }

    #[test]
    fn test_text_report_includes_title_and_table() {
        let table = NormalizedTable {
            columns: vec!["Segment".into(), "Rate".into()],
            rows: vec![vec!["Retail".into(), "3.1".into()]],
        };
        let table_text = TableSerializer::new().to_markdown(&table);
        let report = report_with_one_slide(SlideRecord {
            slide_number: 2,
            title: Some("Forecast".into()),
            text_blocks: vec!["Key risks".into()],
            tables: vec![table],
            table_texts: vec![table_text],
            has_content: true,
        });

        let text = render_text(&report);
        assert!(text.contains("Slide 2: Forecast"));
        assert!(text.contains("Key risks"));
        assert!(text.contains("Retail"));
    }

    #[test]
    fn test_validate_rejects_wrong_extension() {
        let err = validate_input(Path::new("/tmp/nope.pdf"), 5).unwrap_err();
        assert!(err.to_string().contains("not found") || err.to_string().contains("Unsupported"));
    }
}
