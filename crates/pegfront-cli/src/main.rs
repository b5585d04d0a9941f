//! Pegfront CLI - Command line interface for the grammar parser

use std::fs;
use std::path::{Path, PathBuf};

use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};
use clap::{ArgAction, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use pegfront_ast::{strip_locations, Grammar, ToPeg};
use pegfront_parser::{parse_with_options, ParseError, ParseOptions};

#[derive(Parser)]
#[command(name = "pegfront")]
#[command(about = "Parse PEG grammar files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a grammar and output the AST as JSON
    Parse {
        /// Input file
        file: PathBuf,
        /// Pretty print the output
        #[arg(short, long)]
        pretty: bool,
        /// Drop all source locations from the output
        #[arg(long)]
        strip_locations: bool,
        /// Source name recorded in locations (defaults to the file path)
        #[arg(long)]
        source: Option<String>,
        /// Production to start parsing from
        #[arg(long)]
        start_rule: Option<String>,
    },
    /// Check that grammar files parse
    Check {
        /// Input file(s)
        files: Vec<PathBuf>,
    },
    /// Reprint a grammar in canonical form
    Fmt {
        /// Input file
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(directive_for_verbosity(cli.verbose))),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Parse {
            file,
            pretty,
            strip_locations,
            source,
            start_rule,
        } => {
            let mut options = ParseOptions::new()
                .with_source(source.unwrap_or_else(|| file.display().to_string()));
            options.start_rule = start_rule;
            cmd_parse(&file, &options, pretty, strip_locations)
        }
        Commands::Check { files } => cmd_check(&files),
        Commands::Fmt { file } => cmd_fmt(&file),
    }
}

fn directive_for_verbosity(v: u8) -> &'static str {
    match v {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}

fn read_source(file: &Path) -> Option<String> {
    match fs::read_to_string(file) {
        Ok(s) => Some(s),
        Err(e) => {
            eprintln!("Error reading {}: {}", file.display(), e);
            None
        }
    }
}

/// Read and parse one file, reporting any failure to stderr
fn load_grammar(file: &Path, options: &ParseOptions) -> Option<Grammar> {
    let source = read_source(file)?;
    match parse_with_options(&source, options) {
        Ok(grammar) => Some(grammar),
        Err(e) => {
            report_parse_error(&source, file, &e);
            None
        }
    }
}

fn file_options(file: &Path) -> ParseOptions {
    ParseOptions::new().with_source(file.display().to_string())
}

fn cmd_parse(file: &Path, options: &ParseOptions, pretty: bool, strip: bool) {
    let Some(mut grammar) = load_grammar(file, options) else {
        std::process::exit(1);
    };
    if strip {
        strip_locations(&mut grammar);
    }

    let json = if pretty {
        serde_json::to_string_pretty(&grammar)
    } else {
        serde_json::to_string(&grammar)
    };
    match json {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing AST: {}", e);
            std::process::exit(1);
        }
    }
}

fn cmd_check(files: &[PathBuf]) {
    let mut all_ok = true;

    for file in files {
        match load_grammar(file, &file_options(file)) {
            Some(grammar) => {
                let named = grammar.rules.iter().filter(|r| r.display_name().is_some()).count();
                println!(
                    "✓ {} - {} rules ({} named)",
                    file.display(),
                    grammar.rules.len(),
                    named
                );
            }
            None => all_ok = false,
        }
    }

    debug!(files = files.len(), all_ok, "check finished");
    if !all_ok {
        std::process::exit(1);
    }
}

fn cmd_fmt(file: &Path) {
    let Some(grammar) = load_grammar(file, &file_options(file)) else {
        std::process::exit(1);
    };
    print!("{}", grammar.to_peg());
}

fn report_parse_error(source: &str, file: &Path, error: &ParseError) {
    let Some(location) = error.location() else {
        eprintln!("Error: {}", error);
        return;
    };
    let id = file.display().to_string();
    let range = location.range();
    let label = match error {
        ParseError::InvalidCharacterRange { .. } => "range start is after its end",
        _ => "unexpected input here",
    };

    let printed = Report::build(ReportKind::Error, id.clone(), range.start)
        .with_config(Config::default().with_index_type(IndexType::Byte))
        .with_message(error.to_string())
        .with_label(
            Label::new((id.clone(), range))
                .with_message(label)
                .with_color(Color::Red),
        )
        .finish()
        .eprint((id, Source::from(source)));
    if let Err(e) = printed {
        eprintln!("Error: {} ({})", error, e);
    }
}
