use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use match_analyzer::api::{build_router, state::AppState};
use match_analyzer::calculate::{side_comparison, SideComparison};
use match_analyzer::catalog::WeaponCatalog;
use match_analyzer::classify::{
    AlwaysNo, AlwaysYes, ArmorDecider, DisambiguationPolicy, ParticipantSummary,
};
use match_analyzer::config::AppConfig;
use match_analyzer::ingest::{MatchAnalyzer, MatchInfo};
use match_analyzer::models::{MatchResult, PlayerId, Role, Side};
use match_analyzer::storage::parquet::ParquetWriter;
use match_analyzer::storage::{
    read_results_file, write_results_file, HistoryStore, RecordOutcome, StorageConfig,
};

#[derive(Parser)]
#[command(name = "match-analyzer")]
#[command(about = "Hell Let Loose match analyzer: infers team and role per player from weapon stats")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Data directory path (overrides the config file)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DecisionMode {
    /// Ask on the terminal
    Prompt,
    /// Keep every questionable player as infantry
    AlwaysNo,
    /// Move every questionable player to armor
    AlwaysYes,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a roster CSV export
    Analyze {
        /// Roster CSV file
        csv: PathBuf,

        /// Axis team name (prompted if missing)
        #[arg(long)]
        axis_team: Option<String>,

        /// Allies team name (prompted if missing)
        #[arg(long)]
        allies_team: Option<String>,

        /// Map name (prompted if missing)
        #[arg(long)]
        map: Option<String>,

        /// Match date (prompted if missing)
        #[arg(long)]
        date: Option<String>,

        /// Player ID to force into armor; repeatable
        #[arg(long = "armor-override")]
        armor_overrides: Vec<String>,

        /// How low-confidence infantry is resolved
        #[arg(long, value_enum, default_value = "prompt")]
        decisions: DecisionMode,

        /// Directory for the results file (defaults to the CSV's directory)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Also record the match in the history store
        #[arg(long)]
        record: bool,
    },

    /// Record results files into the history store
    Record {
        /// Directory containing results JSON files
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },

    /// Export history to Parquet
    ExportParquet,

    /// Print the Axis vs Allies comparison of a results file
    Compare {
        /// Results JSON file
        results: PathBuf,
    },

    /// Inspect the weapon catalog
    Catalog {
        #[command(subcommand)]
        command: CatalogCommand,
    },

    /// Start the API server
    Serve {
        /// Bind address (overrides the config file)
        #[arg(long)]
        host: Option<String>,

        /// Port number (overrides the config file)
        #[arg(long)]
        port: Option<u16>,
    },
}

#[derive(Subcommand)]
enum CatalogCommand {
    /// Show the catalog entry of one weapon
    Lookup { weapon: String },
    /// List every catalog entry
    List,
}

/// Asks the operator on the terminal.
struct StdinDecider;

impl ArmorDecider for StdinDecider {
    fn ask_is_armor(&mut self, summary: &ParticipantSummary) -> bool {
        println!("{}", summary);
        match prompt(&format!("Is {} actually armor? (y/n): ", summary.name)) {
            Ok(answer) => {
                let yes = answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes");
                if yes {
                    println!("OK, setting this person as Armor");
                }
                yes
            }
            Err(e) => {
                tracing::warn!("Could not read answer, keeping infantry: {}", e);
                false
            }
        }
    }
}

fn prompt(label: &str) -> io::Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn value_or_prompt(value: Option<String>, label: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => prompt(label).with_context(|| format!("reading {}", label.trim_end_matches(": "))),
    }
}

fn prompt_overrides() -> Result<Vec<String>> {
    let mut overrides = Vec::new();
    loop {
        let id = prompt(
            "Enter the Player ID of an armor player categorized as infantry (leave blank if done): ",
        )?;
        if id.is_empty() {
            return Ok(overrides);
        }
        overrides.push(id);
    }
}

fn load_catalog(config: &AppConfig) -> Result<WeaponCatalog> {
    match &config.classifier.catalog_extensions {
        Some(path) => WeaponCatalog::builtin_with_extensions(path)
            .with_context(|| format!("loading catalog extensions from {}", path.display())),
        None => Ok(WeaponCatalog::builtin()),
    }
}

fn print_result(result: &MatchResult) {
    println!("{} on {} ({})", result.id(), result.map_name, result.match_date);
    for side in Side::ALL {
        let team = result.team(side);
        let total = &team.total.tally;
        println!(
            "  {:<6} {:<24} players {:>3}  kills {:>4}  deaths {:>4}  KDR {:>6}  MG kills {:>4}",
            side.to_string(),
            team.team_name,
            total.player_count,
            total.kills,
            total.deaths,
            total.kdr,
            team.total.machine_gun_kills
        );
        for role in Role::ALL {
            let bucket = &team.role(role).tally;
            if bucket.player_count > 0 {
                println!(
                    "         {:<24} players {:>3}  kills {:>4}  deaths {:>4}  KDR {:>6}",
                    role.to_string(),
                    bucket.player_count,
                    bucket.kills,
                    bucket.deaths,
                    bucket.kdr
                );
            }
        }
    }
    println!("  Spectators: {}", result.spectators.len());
}

fn print_comparison(comparison: &SideComparison) {
    println!("{}", comparison.title);
    for category in &comparison.categories {
        println!("  {}", category.category);
        for pair in &category.metrics {
            println!(
                "    {:<22} {:>8} | {:<8}",
                pair.metric, pair.axis, pair.allies
            );
        }
    }
}

fn print_outcome(file_name: &str, outcome: &RecordOutcome) {
    match outcome {
        RecordOutcome::Recorded {
            match_id,
            performances,
        } => println!("Recorded {} as {} ({} players)", file_name, match_id, performances),
        RecordOutcome::AlreadyRecorded { match_id } => {
            println!("{} has already been recorded ({})", file_name, match_id)
        }
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));
    let registry = tracing_subscriber::registry().with(filter);
    if cli.json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting match-analyzer v{}", env!("CARGO_PKG_VERSION"));

    let storage = StorageConfig::new(config.data_dir.clone());

    match cli.command {
        Commands::Analyze {
            csv,
            axis_team,
            allies_team,
            map,
            date,
            armor_overrides,
            decisions,
            output,
            record,
        } => {
            let info = MatchInfo::new(
                value_or_prompt(axis_team, "Axis Team Name: ")?,
                value_or_prompt(allies_team, "Allies Team Name: ")?,
                value_or_prompt(map, "Map Name: ")?,
                value_or_prompt(date, "Match Date: ")?,
            );

            let overrides = if armor_overrides.is_empty() && decisions == DecisionMode::Prompt {
                prompt_overrides()?
            } else {
                armor_overrides
            };

            let catalog = load_catalog(&config)?;
            let policy = DisambiguationPolicy::new(
                overrides.into_iter().map(PlayerId::from),
                &config.classifier,
            );
            let analyzer = MatchAnalyzer::new(&catalog, &policy, &config.classifier);

            let mut decider: Box<dyn ArmorDecider> = match decisions {
                DecisionMode::Prompt => Box::new(StdinDecider),
                DecisionMode::AlwaysNo => Box::new(AlwaysNo),
                DecisionMode::AlwaysYes => Box::new(AlwaysYes),
            };

            let analysis = analyzer
                .analyze_csv(&csv, &info, decider.as_mut())
                .with_context(|| format!("analyzing {}", csv.display()))?;

            if !analysis.unknown_weapons.is_empty() {
                println!("Unknown weapons:");
                for weapon in &analysis.unknown_weapons {
                    println!("  {}", weapon);
                }
            }
            for review in &analysis.reviews {
                tracing::info!(
                    "Review {}: {} {} -> {}",
                    review.reason,
                    review.player_name,
                    review.original_role,
                    review.final_role
                );
            }

            let out_dir = output
                .or_else(|| csv.parent().map(Path::to_path_buf))
                .unwrap_or_else(|| PathBuf::from("."));
            let path = write_results_file(&out_dir, &analysis.result, chrono::Utc::now().timestamp())
                .context("writing results file")?;
            print_result(&analysis.result);
            println!("Match analysis saved to {}", path.display());

            if record {
                let history = HistoryStore::new(storage);
                let file_name = file_name_of(&path);
                let outcome = history
                    .record_match(&file_name, &analysis.result, &analysis.reviews)
                    .context("recording match")?;
                print_outcome(&file_name, &outcome);
            }
        }
        Commands::Record { dir } => {
            let history = HistoryStore::new(storage);
            let outcomes = history
                .record_directory(&dir)
                .with_context(|| format!("recording results in {}", dir.display()))?;
            if outcomes.is_empty() {
                println!("No results files found in {}", dir.display());
            }
            for (file_name, outcome) in &outcomes {
                print_outcome(file_name, outcome);
            }
        }
        Commands::ExportParquet => {
            let history = HistoryStore::new(storage.clone());
            let performances = history.performances()?;
            let players = history.players()?;

            let writer = ParquetWriter::new(storage);
            let path = writer.write_performances(&performances)?;
            println!("Exported {} performances to {}", performances.len(), path.display());
            let path = writer.write_players(&players)?;
            println!("Exported {} players to {}", players.len(), path.display());
        }
        Commands::Compare { results } => {
            let result = read_results_file(&results)
                .with_context(|| format!("reading {}", results.display()))?;
            print_comparison(&side_comparison(&result));
        }
        Commands::Catalog { command } => {
            let catalog = load_catalog(&config)?;
            match command {
                CatalogCommand::Lookup { weapon } => match catalog.lookup(&weapon) {
                    Some(entry) => println!(
                        "{}: {} {} ({}){}",
                        entry.id,
                        entry.side,
                        entry.role,
                        entry.faction,
                        if catalog.is_machine_gun(&entry.id) {
                            ", machine gun"
                        } else {
                            ""
                        }
                    ),
                    None => println!("'{}' is not in the catalog", weapon),
                },
                CatalogCommand::List => {
                    for entry in catalog.entries() {
                        println!(
                            "{:<45} {:<7} {:<4} {}",
                            entry.id,
                            entry.side.to_string(),
                            entry.faction,
                            entry.role
                        );
                    }
                    println!("{} weapons", catalog.len());
                }
            }
        }
        Commands::Serve { host, port } => {
            let host = host.unwrap_or(config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            let state = AppState::new(storage, config.server.cors_origin.clone());
            let app = build_router(state);
            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("binding {}", addr))?;
            tracing::info!("API listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
