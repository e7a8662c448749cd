//! docsift CLI - PDF outline extraction and persona-driven ranking

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use docsift::config::{self, ANALYSIS_FILE_NAME, DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_DIR};
use docsift::render::{self, JsonFormat};
use docsift::{
    Analyzer, ErrorMode, HashEmbedder, HeadingLevel, OutlineExtractor, OutlineOptions,
    PdfSpanSource, RankOptions, RunConfig, SpanSource, Stage,
};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "docsift")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Extract PDF outlines and rank sections for a persona", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a title/heading outline JSON for every PDF in a directory
    Outline {
        /// Directory containing PDF files
        #[arg(value_name = "INPUT_DIR", env = "DOCSIFT_INPUT_DIR", default_value = DEFAULT_INPUT_DIR)]
        input: PathBuf,

        /// Directory receiving one <name>.json per PDF
        #[arg(value_name = "OUTPUT_DIR", env = "DOCSIFT_OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
        output: PathBuf,

        /// Leading pages scanned for font statistics and the title
        #[arg(long, default_value_t = docsift::options::DEFAULT_TITLE_SCAN_PAGES)]
        title_pages: usize,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Skip unreadable documents instead of failing
        #[arg(long)]
        lenient: bool,
    },

    /// Rank document lines against a persona and job
    Analyze {
        /// Directory containing PDF files and the persona/job JSON
        #[arg(value_name = "INPUT_DIR", env = "DOCSIFT_INPUT_DIR", default_value = DEFAULT_INPUT_DIR)]
        input: PathBuf,

        /// Output file (defaults to OUTPUT_DIR/persona_analysis.json)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Directory receiving persona_analysis.json when --output is not given
        #[arg(long, value_name = "OUTPUT_DIR", env = "DOCSIFT_OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
        output_dir: PathBuf,

        /// Persona/job JSON file (defaults to the first JSON file in INPUT_DIR)
        #[arg(long, value_name = "FILE")]
        persona: Option<PathBuf>,

        /// Number of ranked sections to keep
        #[arg(long, default_value_t = docsift::options::DEFAULT_TOP_K)]
        top_k: usize,

        /// Embedding dimensions
        #[arg(long, default_value_t = docsift::embed::DEFAULT_DIMENSIONS)]
        dimensions: usize,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Skip unreadable documents instead of failing
        #[arg(long)]
        lenient: bool,
    },

    /// Show font statistics and the detected outline of a PDF
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print the information as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Outline {
            input,
            output,
            title_pages,
            compact,
            lenient,
        }) => {
            let options = OutlineOptions::new()
                .with_title_scan_pages(title_pages)
                .with_error_mode(error_mode(lenient));
            cmd_outline(&input, &output, options, json_format(compact)).map(|_| ())
        }
        Some(Commands::Analyze {
            input,
            output,
            output_dir,
            persona,
            top_k,
            dimensions,
            compact,
            lenient,
        }) => {
            let options = RankOptions::new()
                .with_top_k(top_k)
                .with_error_mode(error_mode(lenient));
            cmd_analyze(
                &input,
                analysis_output(output, &output_dir),
                persona,
                options,
                dimensions,
                json_format(compact),
            )
        }
        Some(Commands::Info { input, json }) => cmd_info(&input, json),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!("{}", "Usage: docsift <outline|analyze|info> [ARGS]".yellow());
            println!("       docsift --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn error_mode(lenient: bool) -> ErrorMode {
    if lenient {
        ErrorMode::Lenient
    } else {
        ErrorMode::Strict
    }
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn progress_bar(len: usize) -> CliResult<ProgressBar> {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );
    Ok(pb)
}

/// Output file for a PDF: same stem, `.json` extension.
fn outline_file_name(pdf: &Path) -> String {
    let stem = pdf.file_stem().unwrap_or_default().to_string_lossy();
    format!("{}.json", stem)
}

/// Explicit output file, or the analysis file inside the output directory.
fn analysis_output(output: Option<PathBuf>, output_dir: &Path) -> PathBuf {
    output.unwrap_or_else(|| output_dir.join(ANALYSIS_FILE_NAME))
}

fn cmd_outline(
    input: &Path,
    output: &Path,
    options: OutlineOptions,
    format: JsonFormat,
) -> CliResult<usize> {
    let pdfs = config::discover_pdfs(input)?;
    fs::create_dir_all(output)?;

    let extractor = OutlineExtractor::new(options);
    let lenient = extractor.options().error_mode == ErrorMode::Lenient;
    let pb = progress_bar(pdfs.len())?;
    let mut written = 0;

    for path in &pdfs {
        let name = config::document_name(path);
        pb.set_message(name.clone());

        let source = match PdfSpanSource::open(path) {
            Ok(source) => source.with_error_mode(extractor.options().error_mode),
            Err(e) if lenient => {
                pb.println(format!("{} {}: {}", "Skipped".yellow(), name, e));
                pb.inc(1);
                continue;
            }
            Err(e) => return Err(e.for_document(Stage::Outline, name).into()),
        };

        if let Some(outline) = extractor.extract_document(&name, &source)? {
            let target = output.join(outline_file_name(path));
            render::write_json(&outline, &target, format)?;
            written += 1;
        } else {
            pb.println(format!("{} {}", "Skipped".yellow(), name));
        }
        pb.inc(1);
    }

    pb.finish_with_message("Done!");
    println!(
        "\n{} {} of {} outlines written to {}",
        "Done!".green().bold(),
        written,
        pdfs.len(),
        output.display()
    );

    Ok(written)
}

fn cmd_analyze(
    input: &Path,
    output: PathBuf,
    persona: Option<PathBuf>,
    options: RankOptions,
    dimensions: usize,
    format: JsonFormat,
) -> CliResult<()> {
    let start = Instant::now();

    let mut run_config = RunConfig::from_input_dir(input, output)?;
    if let Some(path) = persona {
        run_config = run_config.with_persona_path(path);
    }

    println!(
        "{} {} documents",
        "Analyzing".cyan(),
        run_config.input_paths.len()
    );

    let analyzer = Analyzer::new(Box::new(HashEmbedder::with_dimensions(dimensions)))
        .with_options(options);
    let result = analyzer.analyze_run(&run_config)?;

    // Written only after the whole run succeeded
    render::write_json(&result, &run_config.output_path, format)?;

    println!("\n{}", "Top sections:".green().bold());
    for section in &result.section_summary {
        println!(
            "  {:>2}. {} {}",
            section.importance_rank,
            section.section_title,
            format!("({} p.{})", section.document, section.page_number).dimmed()
        );
    }
    println!(
        "\n{} {} in {:.2?}",
        "Saved to".green(),
        run_config.output_path.display(),
        start.elapsed()
    );

    Ok(())
}

fn cmd_info(input: &Path, as_json: bool) -> CliResult<()> {
    // Lenient: show what can be read even if some pages fail
    let source = PdfSpanSource::open(input)?.with_error_mode(ErrorMode::Lenient);
    let extractor = OutlineExtractor::new(OutlineOptions::new().lenient());
    let scan = extractor.scan_title(&source)?;
    let outline = extractor.extract(&source)?;
    let h1 = outline.count_level(HeadingLevel::H1);
    let h2 = outline.count_level(HeadingLevel::H2);

    if as_json {
        let info = serde_json::json!({
            "file": input.display().to_string(),
            "version": source.version(),
            "pages": source.page_count(),
            "max_font_size": scan.stats.max_size,
            "min_font_size": scan.stats.min_size,
            "h1_threshold": scan.stats.h1_threshold(),
            "h2_threshold": scan.stats.h2_threshold(),
            "title": scan.title,
            "h1": h1,
            "h2": h2,
        });
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!("{}: PDF {}", "Format".bold(), source.version());
    println!("{}: {}", "Pages".bold(), source.page_count());
    if !scan.title.is_empty() {
        println!("{}: {}", "Title".bold(), scan.title);
    }

    println!();
    println!("{}", "Font Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {:.1}", "Largest size".bold(), scan.stats.max_size);
    println!("{}: {:.1}", "Smallest size".bold(), scan.stats.min_size);
    println!("{}: {:.2}", "H1 threshold".bold(), scan.stats.h1_threshold());
    println!("{}: {:.2}", "H2 threshold".bold(), scan.stats.h2_threshold());

    println!();
    println!("{}", "Outline".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "H1 headings".bold(), h1);
    println!("{}: {}", "H2 headings".bold(), h2);

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "docsift".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF outline extraction and persona-driven ranking");
    println!();
    println!("Embedder: {}", docsift::embed::MODEL_NAME.dimmed());
    println!("License: MIT");
}
