use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, Subcommand};
use rayon::prelude::*;
use rept::corpus::{Corpus, Input, SymbolKind};
use rept::output::{self, ColorMode, FileReport, LcsReport};
use rept::pipeline::ExtractOptions;
use rept::utils::{AppConfig, Document, Encoding, collect_files, get_config_path, progress};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "rept")]
#[command(version, about = "Longest repeated and common substrings with suffix trees")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (default: <config dir>/rept/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract repeated substrings from each file
    Lrs {
        /// Files or directories to scan
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Stop once the longest repeat is shorter than this
        #[arg(long)]
        min_substring_len: Option<usize>,

        /// Stop once fewer symbols than this remain
        #[arg(long)]
        min_remaining_len: Option<usize>,

        /// Stop once more than this many substrings were extracted
        #[arg(long)]
        max_results: Option<usize>,

        /// Trim substrings to whole lines
        #[arg(long)]
        lines: bool,

        #[arg(long, value_enum)]
        encoding: Option<Encoding>,

        /// Only scan matching files when walking directories (repeatable)
        #[arg(long = "glob")]
        globs: Vec<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,

        #[arg(long, value_enum)]
        color: Option<ColorMode>,
    },
    /// Longest substring common to all files
    Lcs {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        #[arg(long, value_enum)]
        encoding: Option<Encoding>,

        #[arg(long)]
        json: bool,
    },
    /// Find a pattern in a file
    Find {
        file: PathBuf,

        pattern: String,

        /// Print every occurrence instead of the first
        #[arg(short, long)]
        all: bool,

        #[arg(long, value_enum)]
        encoding: Option<Encoding>,
    },
    /// Show the effective configuration
    Config {
        /// Write the effective configuration to the config file
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = AppConfig::load_from(cli.config.as_deref())?;

    match cli.command {
        Commands::Lrs {
            paths,
            min_substring_len,
            min_remaining_len,
            max_results,
            lines,
            encoding,
            globs,
            json,
            color,
        } => {
            let options = ExtractOptions {
                min_substring_len: min_substring_len.unwrap_or(config.extract.min_substring_len),
                min_remaining_len: min_remaining_len.unwrap_or(config.extract.min_remaining_len),
                max_results: max_results.unwrap_or(config.extract.max_results),
            };
            let globs = if globs.is_empty() { config.globs.clone() } else { globs };
            run_lrs(
                &paths,
                &globs,
                &options,
                lines || config.align_lines,
                encoding.unwrap_or(config.encoding),
                json,
                color.unwrap_or(config.color),
            )?;
        }
        Commands::Lcs { files, encoding, json } => {
            run_lcs(files, encoding.unwrap_or(config.encoding), json, config.color)?;
        }
        Commands::Find {
            file,
            pattern,
            all,
            encoding,
        } => {
            run_find(&file, &pattern, all, encoding.unwrap_or(config.encoding), config.color)?;
        }
        Commands::Config { init } => {
            if init {
                let path = match cli.config {
                    Some(path) => {
                        config.save_to(&path)?;
                        path
                    }
                    None => config.save()?,
                };
                println!("Wrote configuration to {}", path.display());
            } else {
                output::print_json(&config)?;
                if cli.config.is_none() {
                    log::info!("config file: {}", get_config_path()?.display());
                }
            }
        }
    }

    Ok(())
}

/// `RUST_LOG` wins over `-v`
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn open_all(files: &[PathBuf]) -> Result<Vec<Document>> {
    files.par_iter().map(|path| Document::open(path)).collect()
}

fn run_lrs(
    paths: &[PathBuf],
    globs: &[String],
    options: &ExtractOptions,
    align_lines: bool,
    encoding: Encoding,
    json: bool,
    color: ColorMode,
) -> Result<()> {
    let files = collect_files(paths, globs)?;
    if files.is_empty() {
        bail!("No input files found");
    }
    let documents = open_all(&files)?;

    let bar = progress::file_bar(documents.len(), !json && documents.len() > 1);
    let reports = documents
        .par_iter()
        .map(|doc| {
            let report = extract_file(doc, options, align_lines, encoding);
            bar.inc(1);
            report
        })
        .collect::<Result<Vec<_>>>();
    bar.finish_and_clear();
    let reports = reports?;

    if json {
        output::print_json(&reports)?;
        return Ok(());
    }

    let mut stdout = color.stdout();
    let heading = reports.len() > 1;
    for (i, report) in reports.iter().enumerate() {
        if heading && i > 0 {
            println!();
        }
        output::print_report(&mut stdout, report, heading)?;
    }
    Ok(())
}

fn extract_file(doc: &Document, options: &ExtractOptions, align_lines: bool, encoding: Encoding) -> Result<FileReport> {
    let corpus = Corpus::from_inputs([doc.decode(encoding)?])?;
    let extracted = corpus
        .extract(options, align_lines)
        .with_context(|| format!("Failed to extract from {}", doc.path.display()))?;
    log::info!(
        "{}: {} substrings ({:?})",
        doc.path.display(),
        extracted.substrings.len(),
        extracted.stop
    );
    Ok(FileReport::new(&doc.path, corpus.kind(), &extracted))
}

fn run_lcs(files: Vec<PathBuf>, encoding: Encoding, json: bool, color: ColorMode) -> Result<()> {
    let documents = open_all(&files)?;
    let inputs = documents
        .iter()
        .map(|doc| doc.decode(encoding))
        .collect::<Result<Vec<_>>>()?;
    let corpus = Corpus::from_inputs(inputs).context("Cannot build a tree over these files")?;
    let report = LcsReport::new(files, corpus.lcs()?);

    if json {
        output::print_json(&report)?;
    } else {
        output::print_lcs(&mut color.stdout(), &report)?;
    }
    Ok(())
}

fn run_find(file: &Path, pattern: &str, all: bool, encoding: Encoding, color: ColorMode) -> Result<()> {
    let doc = Document::open(file)?;
    let corpus = Corpus::from_inputs([doc.decode(encoding)?])?;
    let pattern = match corpus.kind() {
        SymbolKind::Bytes => Input::Bytes(pattern.as_bytes()),
        SymbolKind::Text => Input::Text(pattern),
    };

    let offsets = if all {
        corpus.find_all(pattern)?
    } else {
        corpus.find(pattern)?.into_iter().collect()
    };
    if offsets.is_empty() {
        log::info!("no match in {}", file.display());
    }

    output::print_offsets(&mut color.stdout(), &[doc.path.clone()], &offsets)?;
    Ok(())
}
