//! pagetext CLI - reading-order text reconstruction tool

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pagetext::render::to_json;
use pagetext::{
    load_file, normalize_with, ColumnLayout, Extraction, ExtractionStats, JsonFormat,
    LayoutConfig, NormalizeOptions, PageSelection, Pagetext,
};

type CliResult = Result<(), Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "pagetext")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Rebuild reading-order text from positioned text fragments", long_about = None)]
struct Cli {
    /// Input file (fragment JSON or plain text)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(flatten)]
    layout: LayoutArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconstruct text from one or more input files
    Extract {
        /// Input files (fragment JSON or plain text)
        #[arg(value_name = "FILE", required = true, num_args = 1..)]
        inputs: Vec<PathBuf>,

        /// Output file, or directory when several inputs are given
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Print extraction statistics to stderr
        #[arg(long)]
        stats: bool,

        /// Emit the extraction (text and statistics) as JSON
        #[arg(long)]
        json: bool,

        /// Output compact JSON
        #[arg(long, requires = "json")]
        compact: bool,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Normalize plain text (reads stdin when no file is given)
    Normalize {
        /// Input text file
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Compose to Unicode NFC first
        #[arg(long)]
        nfc: bool,
    },

    /// Show per-page column and break decisions
    Layout {
        /// Input fragment JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Emit the report as JSON
        #[arg(long)]
        json: bool,

        /// Output compact JSON
        #[arg(long, requires = "json")]
        compact: bool,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Show version information
    Version,
}

/// Thresholds and processing flags shared by the layout commands.
#[derive(Args, Clone, Default)]
struct LayoutArgs {
    /// JSON file with layout thresholds (missing keys keep their defaults)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Page range (e.g., "1-3", "1,3,5")
    #[arg(long)]
    pages: Option<String>,

    /// Line grouping tolerance
    #[arg(long, value_name = "UNITS")]
    line_tolerance: Option<f64>,

    /// Vertical gap that starts a paragraph
    #[arg(long, value_name = "UNITS")]
    paragraph_gap: Option<f64>,

    /// Vertical gap that starts a line
    #[arg(long, value_name = "UNITS")]
    line_gap: Option<f64>,

    /// Font size ratio that starts a heading block
    #[arg(long, value_name = "RATIO")]
    heading_ratio: Option<f64>,

    /// Minimum characters for a usable extraction
    #[arg(long, value_name = "N", env = "PAGETEXT_MIN_CHARS")]
    min_chars: Option<usize>,

    /// Compose to Unicode NFC before normalization
    #[arg(long)]
    nfc: bool,

    /// Disable parallel page processing
    #[arg(long)]
    sequential: bool,
}

impl LayoutArgs {
    fn to_config(&self) -> Result<LayoutConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => {
                let json = fs::read_to_string(path)?;
                serde_json::from_str::<LayoutConfig>(&json)
                    .map_err(|e| format!("Invalid config {}: {}", path.display(), e))?
            }
            None => LayoutConfig::default(),
        };

        if let Some(tolerance) = self.line_tolerance {
            config.line_tolerance = tolerance;
        }
        if let Some(gap) = self.paragraph_gap {
            config.paragraph_gap = gap;
        }
        if let Some(gap) = self.line_gap {
            config.line_gap = gap;
        }
        if let Some(ratio) = self.heading_ratio {
            config.heading_size_ratio = ratio;
        }
        if let Some(chars) = self.min_chars {
            config.min_usable_chars = chars;
        }
        if self.nfc {
            config.normalize.unicode_nfc = true;
        }
        if self.sequential {
            config.parallel = false;
        }

        config.validate()?;
        Ok(config)
    }

    fn builder(&self) -> Result<Pagetext, Box<dyn std::error::Error>> {
        let pages = match self.pages.as_deref() {
            Some(p) => PageSelection::parse(p)?,
            None => PageSelection::All,
        };
        Ok(Pagetext::new()
            .with_config(self.to_config()?)
            .with_pages(pages))
    }
}

struct ExtractFlags {
    stats: bool,
    json: bool,
    compact: bool,
}

impl ExtractFlags {
    fn json_format(&self) -> JsonFormat {
        if self.compact {
            JsonFormat::Compact
        } else {
            JsonFormat::Pretty
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Extract {
            inputs,
            output,
            stats,
            json,
            compact,
            layout,
        }) => {
            let flags = ExtractFlags {
                stats,
                json,
                compact,
            };
            cmd_extract(&inputs, output.as_deref(), &flags, &layout)
        }
        Some(Commands::Normalize { input, output, nfc }) => {
            cmd_normalize(input.as_deref(), output.as_deref(), nfc)
        }
        Some(Commands::Layout {
            input,
            json,
            compact,
            layout,
        }) => cmd_layout(&input, json, compact, &layout),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: extract if input is provided
            if let Some(input) = cli.input {
                let flags = ExtractFlags {
                    stats: false,
                    json: false,
                    compact: false,
                };
                cmd_extract(&[input], None, &flags, &cli.layout)
            } else {
                println!("{}", "Usage: pagetext <FILE>".yellow());
                println!("       pagetext --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn insufficient_message(extraction: &Extraction, min_chars: usize) -> String {
    format!(
        "only {} characters extracted (need at least {}); paste the text manually instead",
        extraction.char_count, min_chars
    )
}

fn cmd_extract(
    inputs: &[PathBuf],
    output: Option<&Path>,
    flags: &ExtractFlags,
    layout: &LayoutArgs,
) -> CliResult {
    let pagetext = layout.builder()?;

    if inputs.len() == 1 {
        let extraction = pagetext.extract_file(&inputs[0])?;
        if flags.stats {
            print_stats("Extraction Statistics", &extraction.stats);
        }
        if !pagetext.is_usable(&extraction) {
            return Err(insufficient_message(&extraction, pagetext.config().min_usable_chars).into());
        }

        let rendered = if flags.json {
            to_json(&extraction, flags.json_format())?
        } else {
            extraction.text
        };

        if let Some(path) = output {
            fs::write(path, &rendered)?;
            println!("{} {}", "Saved to".green(), path.display());
        } else {
            println!("{}", rendered);
        }
        return Ok(());
    }

    cmd_extract_batch(inputs, output, flags, &pagetext)
}

fn cmd_extract_batch(
    inputs: &[PathBuf],
    output: Option<&Path>,
    flags: &ExtractFlags,
    pagetext: &Pagetext,
) -> CliResult {
    let output_dir = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&output_dir)?;

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let extension = if flags.json { "json" } else { "txt" };
    let mut written = Vec::new();
    let mut insufficient = Vec::new();
    let mut totals = ExtractionStats::new();

    for input in inputs {
        pb.set_message(input.display().to_string());
        let extraction = pagetext.extract_file(input)?;
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();

        if !pagetext.is_usable(&extraction) {
            insufficient.push((input.clone(), extraction.char_count));
        } else {
            let rendered = if flags.json {
                to_json(&extraction, flags.json_format())?
            } else {
                extraction.text.clone()
            };
            let filename = format!("{}.{}", stem, extension);
            fs::write(output_dir.join(&filename), rendered)?;
            written.push(filename);
        }

        if flags.stats {
            pb.suspend(|| print_stats(&input.display().to_string(), &extraction.stats));
        }
        totals.merge(&extraction.stats);
        pb.inc(1);
    }

    pb.finish_with_message("Done!");

    if flags.stats {
        print_stats("Batch Totals", &totals);
    }

    println!("\n{}", "Output files:".green().bold());
    for (i, filename) in written.iter().enumerate() {
        let branch = if i + 1 == written.len() { "└─" } else { "├─" };
        println!("  {} {}", branch.dimmed(), filename);
    }

    if !insufficient.is_empty() {
        for (path, chars) in &insufficient {
            eprintln!(
                "{} {} ({} characters)",
                "Insufficient text:".yellow().bold(),
                path.display(),
                chars
            );
        }
        return Err(format!(
            "{} of {} files produced too little text; paste their text manually instead",
            insufficient.len(),
            inputs.len()
        )
        .into());
    }

    Ok(())
}

fn print_stats(title: &str, stats: &ExtractionStats) {
    eprintln!("{}", title.cyan().bold());
    eprintln!("{}", "─".repeat(40).dimmed());
    eprintln!(
        "{}: {} ({} emitted, {} skipped)",
        "Pages".bold(),
        stats.page_count,
        stats.emitted_pages,
        stats.skipped_pages
    );
    eprintln!("{}: {}", "Multi-column pages".bold(), stats.multi_column_pages);
    eprintln!("{}: {}", "Lines".bold(), stats.line_count);
    eprintln!(
        "{}: {} paragraph, {} heading",
        "Breaks".bold(),
        stats.paragraph_breaks,
        stats.heading_breaks
    );
    eprintln!(
        "{}: {} bullets, {} numbered, {} headings",
        "Markers".bold(),
        stats.bullet_count,
        stats.numbered_count,
        stats.heading_count
    );
    eprintln!("{}: {}", "Words".bold(), stats.word_count);
    eprintln!(
        "{}: {}",
        "Non-whitespace characters".bold(),
        stats.non_whitespace_chars
    );
}

fn cmd_normalize(input: Option<&Path>, output: Option<&Path>, nfc: bool) -> CliResult {
    let raw = match input {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let text = normalize_with(&raw, &NormalizeOptions::new().with_nfc(nfc));

    if let Some(path) = output {
        fs::write(path, &text)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", text);
    }

    Ok(())
}

fn cmd_layout(input: &Path, json: bool, compact: bool, layout: &LayoutArgs) -> CliResult {
    let pagetext = layout.builder()?;
    let report = pagetext.layout_report(load_file(input)?);

    if json {
        let format = if compact {
            JsonFormat::Compact
        } else {
            JsonFormat::Pretty
        };
        println!("{}", to_json(&report, format)?);
        return Ok(());
    }

    println!("{}", "Layout Report".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());

    if report.pages.is_empty() {
        println!("{}", "No positioned pages (plain text input)".yellow());
        return Ok(());
    }

    for page in &report.pages {
        let layout = match page.layout {
            ColumnLayout::SingleColumn => "single column".to_string(),
            ColumnLayout::MultiColumn { divider_x } => {
                format!("two columns, divider at x={:.2}", divider_x)
            }
        };
        let status = if page.skipped {
            "skipped".yellow()
        } else {
            "emitted".green()
        };
        println!(
            "{} {}: {} fragments, {} [{}]",
            "Page".bold(),
            page.page,
            page.fragments,
            layout,
            status
        );
        if page.layout.is_multi_column() {
            println!(
                "  {} main {}, sidebar {}",
                "├─".dimmed(),
                page.main_fragments,
                page.sidebar_fragments
            );
        }
        println!(
            "  {} {} lines, {} paragraph breaks, {} heading breaks, {} chars",
            "└─".dimmed(),
            page.breaks.lines,
            page.breaks.paragraphs,
            page.breaks.headings,
            page.chars
        );
    }

    println!();
    println!(
        "{}: {} of {}",
        "Multi-column pages".bold(),
        report.multi_column_pages(),
        report.pages.len()
    );

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pagetext".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Reading-order text reconstruction tool");
    println!();
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_default_input() {
        let cli = Cli::try_parse_from(["pagetext", "resume.json"]).unwrap();
        assert_eq!(cli.input, Some(PathBuf::from("resume.json")));
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_parses_extract_flags() {
        let cli = Cli::try_parse_from([
            "pagetext",
            "extract",
            "a.json",
            "b.json",
            "-o",
            "out",
            "--stats",
            "--sequential",
            "--line-tolerance",
            "2.5",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Extract {
                inputs,
                output,
                stats,
                layout,
                ..
            }) => {
                assert_eq!(inputs.len(), 2);
                assert_eq!(output, Some(PathBuf::from("out")));
                assert!(stats);
                let config = layout.to_config().unwrap();
                assert!(!config.parallel);
                assert_eq!(config.line_tolerance, 2.5);
            }
            _ => panic!("expected extract command"),
        }
    }

    #[test]
    fn test_compact_requires_json() {
        assert!(Cli::try_parse_from(["pagetext", "extract", "a.json", "--compact"]).is_err());
    }

    #[test]
    fn test_layout_args_reject_invalid_thresholds() {
        let args = LayoutArgs {
            line_gap: Some(5.0),
            paragraph_gap: Some(1.0),
            ..Default::default()
        };
        assert!(args.to_config().is_err());
    }

    #[test]
    fn test_layout_args_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("thresholds.json");
        fs::write(&path, r#"{"paragraph_gap": 20.0, "line_gap": 8.0}"#).unwrap();

        let args = LayoutArgs {
            config: Some(path),
            heading_ratio: Some(1.5),
            ..Default::default()
        };
        let config = args.to_config().unwrap();
        assert_eq!(config.paragraph_gap, 20.0);
        assert_eq!(config.line_gap, 8.0);
        assert_eq!(config.heading_size_ratio, 1.5);
        assert_eq!(config.line_tolerance, 0.3);
    }

    #[test]
    fn test_layout_args_bad_pages() {
        let args = LayoutArgs {
            pages: Some("0-2".to_string()),
            ..Default::default()
        };
        assert!(args.builder().is_err());
    }

    #[test]
    fn test_extract_batch_with_stats() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let body = "SUMMARY\n- Designed storage engines and query planners in Rust\n";
        let inputs: Vec<PathBuf> = ["a.txt", "b.txt"]
            .iter()
            .map(|name| {
                let path = dir.path().join(name);
                fs::write(&path, body).unwrap();
                path
            })
            .collect();

        let flags = ExtractFlags {
            stats: true,
            json: false,
            compact: false,
        };
        cmd_extract_batch(&inputs, Some(&out), &flags, &Pagetext::new()).unwrap();

        let written = fs::read_to_string(out.join("a.txt")).unwrap();
        assert!(written.starts_with("## SUMMARY"));
        assert!(out.join("b.txt").exists());
    }

    #[test]
    fn test_insufficient_message() {
        let extraction = Extraction::new("short".to_string(), Default::default());
        let message = insufficient_message(&extraction, 50);
        assert!(message.contains("5 characters"));
        assert!(message.contains("paste the text manually"));
    }
}
