use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;

use ipo_score::buffered_eprintln;
use ipo_score::output::{self, ScoredIpo};

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
enum Format {
    /// Aligned table, colored on a terminal
    #[default]
    Table,
    /// Tab-separated: score, label, name
    Tsv,
    /// JSON array with factors and breakdown
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score IPO records read from a JSON file (one object or an array)
    Score {
        /// Input file, or "-" for stdin
        #[arg(default_value = "-")]
        file: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t)]
        format: Format,

        /// Order by score, highest first (ties keep input order)
        #[arg(short, long)]
        sort: bool,
    },
    /// Print the label and color for a score
    Label {
        #[arg(allow_negative_numbers = true)]
        score: f64,
    },
    /// Write a config file with the default scoring ladders
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "ipo-score")]
#[command(about = "IPO quality scoring CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/ipo-score/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();
    let config_path = cli.config.map(PathBuf::from);

    match cli.command {
        Commands::Label { score } => {
            let label = ipo_score::label_for(score);
            println!("{}\t{}", label.label, label.color);
        }
        Commands::Init { force } => {
            let path = match config_path.map_or_else(ipo_score::config::get_config_path, Ok) {
                Ok(p) => p,
                Err(e) => {
                    eprintln!("Config error: {}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            };
            if let Err(e) = ipo_score::config::write_default_config(&path, force) {
                eprintln!("Config error: {:#}", e);
                std::process::exit(EXIT_CONFIG);
            }
            println!("Config written to {}", path.display());
        }
        Commands::Score { file, format, sort } => {
            run_score(config_path, &file, format, sort, cli.verbose);
        }
    }

    std::process::exit(EXIT_SUCCESS);
}

fn run_score(config_path: Option<PathBuf>, file: &str, format: Format, sort: bool, verbose: bool) {
    let start_time = Instant::now();

    let config = match ipo_score::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate scoring config before touching any input
    let scoring = config.effective_scoring();
    if let Err(errors) = ipo_score::scoring::validate_scoring(&scoring) {
        eprintln!("Scoring config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let source = (file != "-").then(|| PathBuf::from(file));
    let records = match ipo_score::ipo::read_records(source.as_deref()) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Input error: {:#}", e);
            std::process::exit(EXIT_INPUT);
        }
    };

    if verbose {
        eprintln!("Loaded {} records from {}", records.len(), file);
        ipo_score::stderr_buffer::activate();
    }

    let results: Vec<_> = records
        .iter()
        .map(|ipo| {
            if verbose {
                for note in ipo_score::scoring::diagnose_record(ipo) {
                    buffered_eprintln!("  {}: {}", ipo.display_name(), note);
                }
            }
            ipo_score::compute_with(ipo, &scoring)
        })
        .collect();

    let mut scored: Vec<ScoredIpo> = records
        .iter()
        .zip(&results)
        .map(|(ipo, result)| ScoredIpo { ipo, result })
        .collect();

    if sort {
        // Stable sort: equal scores keep input order
        scored.sort_by(|a, b| b.result.score.total_cmp(&a.result.score));
    }

    match format {
        Format::Table => {
            let use_colors = output::should_use_colors();
            if verbose && !scored.is_empty() {
                for entry in &scored {
                    println!("{}", output::format_detail(entry, use_colors));
                    println!();
                }
            } else {
                println!("{}", output::format_scored_table(&scored, use_colors));
            }
        }
        Format::Tsv => {
            let tsv = output::format_tsv(&scored);
            if !tsv.is_empty() {
                println!("{}", tsv);
            }
        }
        Format::Json => match output::format_json(&scored) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Output error: {:#}", e);
                std::process::exit(EXIT_INPUT);
            }
        },
    }

    if verbose {
        let notes = ipo_score::stderr_buffer::drain();
        if !notes.is_empty() {
            eprintln!("Factors scored as 0:");
            for note in notes {
                eprintln!("{}", note);
            }
        }
        eprintln!("Scored {} records in {:?}", scored.len(), start_time.elapsed());
    }
}
