//! pdfbrief CLI - PDF extraction and summarization tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfbrief::provider::{DEFAULT_MAX_INPUT_TOKENS, DEFAULT_MODEL_ID, DEFAULT_REVISION};
use pdfbrief::{
    extract_file_with_options, flatten, render, summarize_document, DeviceChoice, Document,
    DocumentStats, ExtractOptions, JsonFormat, ModelConfig, ModelProvider, PageSelection,
    SummarizeOptions,
};

const PARSED_FILE: &str = "parsed.json";
const SUMMARY_FILE: &str = "summary.txt";

#[derive(Parser)]
#[command(name = "pdfbrief")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Extract paragraphs and tables from PDFs and summarize them", long_about = None)]
struct Cli {
    /// Input PDF file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(flatten)]
    extract: ExtractArgs,

    #[command(flatten)]
    summary: SummaryArgs,

    #[command(flatten)]
    model: ModelArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract and summarize, writing parsed.json and summary.txt
    Run {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        #[command(flatten)]
        extract: ExtractArgs,

        #[command(flatten)]
        summary: SummaryArgs,

        #[command(flatten)]
        model: ModelArgs,
    },

    /// Extract the content tree as JSON
    Json {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        extract: ExtractArgs,
    },

    /// Print the flattened text fed to the summarizer
    Text {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        extract: ExtractArgs,
    },

    /// Summarize a PDF
    Summarize {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        extract: ExtractArgs,

        #[command(flatten)]
        summary: SummaryArgs,

        #[command(flatten)]
        model: ModelArgs,
    },

    /// Show document metrics
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Args, Clone)]
struct ExtractArgs {
    /// Page range (e.g., "1-10", "1,3,5")
    #[arg(long)]
    pages: Option<String>,

    /// Forget the section title at each new page
    #[arg(long)]
    per_page_sections: bool,

    /// Skip table detection
    #[arg(long)]
    no_tables: bool,
}

impl ExtractArgs {
    fn options(&self) -> Result<ExtractOptions, String> {
        let pages = match self.pages.as_deref() {
            Some(p) => PageSelection::parse(p).map_err(|e| format!("Invalid page range: {}", e))?,
            None => PageSelection::All,
        };

        let mut options = ExtractOptions::new()
            .with_pages(pages)
            .with_tables(!self.no_tables);
        if self.per_page_sections {
            options = options.per_page_sections();
        }
        Ok(options)
    }
}

#[derive(Args, Clone)]
struct SummaryArgs {
    /// Minimum summary length in tokens
    #[arg(long, default_value_t = 50)]
    min_length: usize,

    /// Maximum summary length in tokens
    #[arg(long, default_value_t = 500)]
    max_length: usize,
}

impl SummaryArgs {
    fn options(&self) -> SummarizeOptions {
        SummarizeOptions::new()
            .with_min_length(self.min_length)
            .with_max_length(self.max_length)
    }
}

#[derive(Args, Clone)]
struct ModelArgs {
    /// Hugging Face model repository
    #[arg(long, env = "PDFBRIEF_MODEL", default_value = DEFAULT_MODEL_ID)]
    model: String,

    /// Model repository revision
    #[arg(long, env = "PDFBRIEF_REVISION", default_value = DEFAULT_REVISION)]
    revision: String,

    /// Model input budget in tokens
    #[arg(long, default_value_t = DEFAULT_MAX_INPUT_TOKENS)]
    max_input_tokens: usize,

    /// Run on this CUDA device instead of the CPU
    #[arg(long, value_name = "ORDINAL")]
    cuda: Option<usize>,
}

impl ModelArgs {
    fn config(&self) -> ModelConfig {
        let device = self.cuda.map_or(DeviceChoice::Cpu, DeviceChoice::Cuda);
        ModelConfig::new()
            .with_model_id(&self.model)
            .with_revision(&self.revision)
            .with_max_input_tokens(self.max_input_tokens)
            .with_device(device)
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Run {
            input,
            output,
            extract,
            summary,
            model,
        }) => cmd_run(&input, output.as_deref(), &extract, &summary, &model),
        Some(Commands::Json {
            input,
            output,
            compact,
            extract,
        }) => cmd_json(&input, output.as_deref(), compact, &extract),
        Some(Commands::Text {
            input,
            output,
            extract,
        }) => cmd_text(&input, output.as_deref(), &extract),
        Some(Commands::Summarize {
            input,
            output,
            extract,
            summary,
            model,
        }) => cmd_summarize(&input, output.as_deref(), &extract, &summary, &model),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: run if input is provided
            if let Some(input) = cli.input {
                cmd_run(
                    &input,
                    cli.output.as_deref(),
                    &cli.extract,
                    &cli.summary,
                    &cli.model,
                )
            } else {
                println!("{}", "Usage: pdfbrief <FILE> [OUTPUT]".yellow());
                println!("       pdfbrief --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn default_output_dir(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    PathBuf::from(format!("{}_brief", stem))
}

/// Write the two downloadable artifacts into `dir`.
fn write_outputs(
    dir: &Path,
    doc: &Document,
    summary: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all(dir)?;
    fs::write(dir.join(PARSED_FILE), render::to_json(doc, JsonFormat::Pretty)?)?;
    fs::write(dir.join(SUMMARY_FILE), summary)?;
    Ok(())
}

fn cmd_run(
    input: &Path,
    output: Option<&Path>,
    extract: &ExtractArgs,
    summary: &SummaryArgs,
    model: &ModelArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| default_output_dir(input));

    let pb = ProgressBar::new(4);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Extracting content...");
    let doc = extract_file_with_options(input, extract.options()?)?;
    pb.inc(1);

    pb.set_message("Loading model...");
    let provider = ModelProvider::from_hub(model.config());
    let summarizer = provider.acquire()?;
    pb.inc(1);

    pb.set_message("Summarizing...");
    let text = summarize_document(&doc, summarizer.as_ref(), &summary.options())?;
    pb.inc(1);

    pb.set_message("Writing files...");
    write_outputs(&output_dir, &doc, &text)?;
    pb.inc(1);

    pb.finish_with_message("Done!");

    println!("\n{}", "Summary".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}", text);

    println!();
    print_stats(&doc.stats());

    println!("\n{} {}", "Output files:".green().bold(), output_dir.display());
    println!("  {} {}", "├─".dimmed(), PARSED_FILE);
    println!("  {} {}", "└─".dimmed(), SUMMARY_FILE);

    Ok(())
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    extract: &ExtractArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = extract_file_with_options(input, extract.options()?)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = render::to_json(&doc, format)?;
    emit(output, &json)
}

fn cmd_text(
    input: &Path,
    output: Option<&Path>,
    extract: &ExtractArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = extract_file_with_options(input, extract.options()?)?;
    emit(output, &flatten(&doc))
}

fn cmd_summarize(
    input: &Path,
    output: Option<&Path>,
    extract: &ExtractArgs,
    summary: &SummaryArgs,
    model: &ModelArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = extract_file_with_options(input, extract.options()?)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_message(format!("Loading {}...", model.model));
    let provider = ModelProvider::from_hub(model.config());
    let summarizer = provider.acquire()?;

    spinner.set_message("Summarizing...");
    let text = summarize_document(&doc, summarizer.as_ref(), &summary.options())?;
    spinner.finish_and_clear();

    emit(output, &text)
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let header = pdfbrief::detect_format_from_path(input)?;
    let doc = pdfbrief::extract_file(input)?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Format".bold(), header);

    let sections: Vec<&str> = doc
        .pages
        .iter()
        .flat_map(|p| p.content.iter())
        .filter_map(|b| b.section())
        .fold(Vec::new(), |mut acc, s| {
            if acc.last() != Some(&s) {
                acc.push(s);
            }
            acc
        });
    if !sections.is_empty() {
        println!("{}: {}", "Sections".bold(), sections.join(", "));
    }

    println!();
    print_stats(&doc.stats());
    Ok(())
}

fn print_stats(stats: &DocumentStats) {
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Pages".bold(), stats.pages);
    println!("{}: {}", "Blocks".bold(), stats.blocks);
    println!("{}: {}", "Paragraphs".bold(), stats.paragraphs);
    println!("{}: {}", "Tables".bold(), stats.tables);
    println!("{}: {}", "Words".bold(), stats.words);
}

/// Write to a file when one is given, stdout otherwise.
fn emit(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pdfbrief".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF extraction and summarization tool");
    println!();
    println!("Default model: {}", DEFAULT_MODEL_ID.dimmed());
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdfbrief::{Page, Paragraph};

    #[test]
    fn test_default_output_dir() {
        assert_eq!(
            default_output_dir(Path::new("/tmp/report.pdf")),
            PathBuf::from("report_brief")
        );
    }

    #[test]
    fn test_write_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested");

        let mut doc = Document::new();
        let mut page = Page::new(1);
        page.add_paragraph(Paragraph::new(Some("Intro".into()), "Hello there"));
        doc.add_page(page);

        write_outputs(&out, &doc, "A short summary.").unwrap();

        let json = fs::read_to_string(out.join(PARSED_FILE)).unwrap();
        assert_eq!(render::from_json(&json).unwrap(), doc);
        assert_eq!(
            fs::read_to_string(out.join(SUMMARY_FILE)).unwrap(),
            "A short summary."
        );
    }

    #[test]
    fn test_parse_default_invocation() {
        let cli = Cli::try_parse_from(["pdfbrief", "report.pdf", "out"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.input, Some(PathBuf::from("report.pdf")));
        assert_eq!(cli.output, Some(PathBuf::from("out")));
        assert_eq!(cli.summary.min_length, 50);
        assert_eq!(cli.summary.max_length, 500);
    }

    #[test]
    fn test_parse_summarize_flags() {
        let cli = Cli::try_parse_from([
            "pdfbrief",
            "summarize",
            "report.pdf",
            "--min-length",
            "30",
            "--max-input-tokens",
            "512",
            "--revision",
            "v1",
            "--pages",
            "2-3",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Summarize {
                summary,
                model,
                extract,
                ..
            }) => {
                assert_eq!(summary.options().min_length, 30);
                let config = model.config();
                assert_eq!(config.max_input_tokens, 512);
                assert_eq!(config.revision, "v1");
                assert!(extract.options().unwrap().pages.includes(3));
            }
            _ => panic!("expected summarize command"),
        }
    }

    #[test]
    fn test_bad_page_range() {
        let args = ExtractArgs {
            pages: Some("x-y".to_string()),
            per_page_sections: false,
            no_tables: false,
        };
        assert!(args.options().is_err());
    }

    #[test]
    fn test_extract_flags() {
        let args = ExtractArgs {
            pages: None,
            per_page_sections: true,
            no_tables: true,
        };
        let options = args.options().unwrap();
        assert!(!options.detect_tables);
        assert_eq!(options.section_scope, pdfbrief::SectionScope::PerPage);
    }
}
