use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;

use fighter_rank::filter::{filter_fighters, validate_filters, WeightRange};
use fighter_rank::scoring::{Criterion, ScoringConfig};
use tracing::{info, warn};

const EXIT_SUCCESS: i32 = 0;
const EXIT_DATA: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rank fighters by Weighted Product score (default if no subcommand)
    Rank,
    /// List the available criteria and the active selection
    Criteria,
    /// Show headline numbers for the filtered dataset
    Summary,
    /// Create a config file interactively
    Init,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Table,
    Tsv,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "fighter-rank")]
#[command(about = "Weighted Product ranking of fighters", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging and per-fighter score breakdowns
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/fighter-rank/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Fighter statistics CSV (overrides the config file)
    #[arg(short, long, global = true)]
    dataset: Option<PathBuf>,

    /// Criterion as key:direction[:weight], repeatable; replaces configured criteria
    #[arg(short = 'k', long = "criterion", global = true)]
    criteria: Vec<String>,

    /// Only keep fighters with this stance, repeatable
    #[arg(long, global = true)]
    stance: Vec<String>,

    /// Minimum weight in kg
    #[arg(long, global = true)]
    min_weight: Option<f64>,

    /// Maximum weight in kg
    #[arg(long, global = true)]
    max_weight: Option<f64>,

    /// Number of fighters to show (0 shows all)
    #[arg(short = 'n', long, global = true)]
    top: Option<usize>,

    /// Output format for the ranking
    #[arg(short, long, global = true, value_enum, default_value_t = Format::Table)]
    format: Format,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() {
    let cli = Cli::parse();
    fighter_rank::logging::init_logging(cli.verbose);
    let command = cli.command.unwrap_or(Commands::Rank);
    let start_time = Instant::now();
    let config_path = cli.config.map(PathBuf::from);

    if let Commands::Init = command {
        if let Err(e) = fighter_rank::config::run_init_wizard(config_path) {
            eprintln!("Init failed: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
        std::process::exit(EXIT_SUCCESS);
    }

    // Load config
    let config = match fighter_rank::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Command-line criteria replace the configured selection
    let scoring = if cli.criteria.is_empty() {
        config.scoring()
    } else {
        let mut criteria = Vec::with_capacity(cli.criteria.len());
        for raw in &cli.criteria {
            match Criterion::parse(raw) {
                Ok(c) => criteria.push(c),
                Err(e) => {
                    eprintln!("Invalid --criterion: {}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            }
        }
        ScoringConfig { criteria }
    };

    // Validate scoring config at startup
    if let Err(errors) = fighter_rank::scoring::validate_scoring(&scoring) {
        eprintln!("Scoring config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }
    let criteria = match scoring.to_criterion_set() {
        Ok(set) => set,
        Err(e) => {
            eprintln!("Scoring config error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let mut filters = config.filters();
    if !cli.stance.is_empty() {
        filters.stances = Some(cli.stance.clone());
    }
    if cli.min_weight.is_some() || cli.max_weight.is_some() {
        let current = filters.weight_kg.unwrap_or_default();
        filters.weight_kg = Some(WeightRange {
            min: cli.min_weight.or(current.min),
            max: cli.max_weight.or(current.max),
        });
    }
    if let Err(errors) = validate_filters(&filters) {
        eprintln!("Filter config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let use_colors = fighter_rank::output::should_use_colors();

    if let Commands::Criteria = command {
        println!(
            "{}",
            fighter_rank::output::format_criteria_list(Some(&criteria), use_colors)
        );
        println!();
        println!(
            "Normalized weights: {}",
            fighter_rank::output::format_weights(&criteria)
        );
        std::process::exit(EXIT_SUCCESS);
    }

    // Load dataset
    let dataset_path = cli.dataset.clone().unwrap_or_else(|| config.dataset_path());
    let dataset = match fighter_rank::dataset::load_dataset(&dataset_path) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Dataset error: {:#}", e);
            std::process::exit(EXIT_DATA);
        }
    };

    for key in criteria.keys().filter(|k| !dataset.has_attribute(k)) {
        warn!(key, "Criterion is not a scorable dataset column, every fighter scores it as 0");
    }

    let total = dataset.len();
    let fighters = filter_fighters(dataset.fighters, &filters);
    if filters.is_active() {
        info!(kept = fighters.len(), total, "Applied filters");
    }

    // Route based on subcommand
    match command {
        Commands::Summary => {
            let summary = fighter_rank::dataset::summarize(&fighters);
            println!("{}", fighter_rank::output::format_summary(&summary));
        }
        Commands::Rank => {
            let results = match fighter_rank::scoring::rank(&fighters, &criteria) {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("Scoring error: {}", e);
                    std::process::exit(EXIT_DATA);
                }
            };

            let top = cli.top.unwrap_or_else(|| config.top());
            let shown = if top == 0 {
                &results[..]
            } else {
                &results[..top.min(results.len())]
            };

            match cli.format {
                Format::Table => {
                    println!(
                        "Normalized weights: {}",
                        fighter_rank::output::format_weights(&criteria)
                    );
                    println!();
                    println!(
                        "{}",
                        fighter_rank::output::format_ranking_table(shown, &criteria, use_colors)
                    );
                    if let Some(line) =
                        fighter_rank::output::format_recommendation(shown, use_colors)
                    {
                        println!();
                        println!("{}", line);
                    }
                    if cli.verbose {
                        for result in shown {
                            println!();
                            println!("{}", fighter_rank::output::format_breakdown(result));
                        }
                    }
                }
                Format::Tsv => {
                    println!("{}", fighter_rank::output::format_tsv(shown, &criteria));
                }
                Format::Json => match fighter_rank::output::format_json(shown) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("Output error: {:#}", e);
                        std::process::exit(EXIT_DATA);
                    }
                },
            }

            info!(
                ranked = results.len(),
                elapsed = ?start_time.elapsed(),
                "Done"
            );
        }
        // Both exit before the dataset is loaded
        Commands::Criteria | Commands::Init => {}
    }

    std::process::exit(EXIT_SUCCESS);
}
