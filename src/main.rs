//! College basketball analytics CLI
//!
//! Rankings, competitive tiers, and matchup win probabilities over an
//! imported season snapshot.

use clap::{Parser, Subcommand};
use hoops::{Config, Result};

#[derive(Parser)]
#[command(name = "hoops")]
#[command(about = "College basketball ratings, tiers, and matchup predictions", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Data management commands
    Data {
        #[command(subcommand)]
        action: DataCommands,
    },
    /// Per-category stat ranks for one team
    Ranks {
        /// Team name
        team: String,
    },
    /// Competitive tier listing
    Tier {
        /// Tier name: contenders, next-up, or mid-majors
        name: String,
        /// Output format: table or json
        #[arg(long, default_value = "table")]
        format: OutputFormat,
    },
    /// AP top-25 poll listing
    Top25,
    /// Madness rating leaderboard
    Madness,
    /// All team names
    Teams,
    /// Side-by-side matchup report with stat ranks
    Matchup { team1: String, team2: String },
    /// Win probabilities for both orientations of a matchup
    Predict {
        home: String,
        away: String,
        /// Print the built feature vector as well
        #[arg(long)]
        features: bool,
    },
    /// Create default config and directories
    Init,
}

#[derive(Subcommand)]
enum DataCommands {
    /// Import a season data file (conferences + teams JSON)
    Import {
        /// Path to the JSON file
        file: String,
    },
    /// Show database status
    Status,
}

#[derive(Clone, Debug)]
enum OutputFormat {
    Table,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use table or json.", s)),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Load or create config
    let config = if std::path::Path::new(&cli.config).exists() {
        match Config::load(&cli.config) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        Config::default()
    };

    // Run command
    let result = match cli.command {
        Commands::Data { action } => match action {
            DataCommands::Import { file } => commands::data_import(&config, &file),
            DataCommands::Status => commands::data_status(&config),
        },
        Commands::Ranks { team } => commands::ranks(&config, &team),
        Commands::Tier { name, format } => commands::tier(&config, &name, format),
        Commands::Top25 => commands::top_25(&config),
        Commands::Madness => commands::madness(&config),
        Commands::Teams => commands::teams(&config),
        Commands::Matchup { team1, team2 } => commands::matchup(&config, &team1, &team2),
        Commands::Predict {
            home,
            away,
            features,
        } => commands::predict(&config, &home, &away, features),
        Commands::Init => commands::init(&cli.config),
    };

    if let Err(e) = result {
        log::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

mod commands {
    use super::OutputFormat;
    use hoops::data::{Database, Snapshot};
    use hoops::data::database::ImportFile;
    use hoops::features::MatchupFeatures;
    use hoops::model::Classifier;
    use hoops::predict::ProbabilityEngine;
    use hoops::tiers::{self, TierKind};
    use hoops::{rankings, summary, Config, HoopsError, Result};
    use std::sync::Arc;

    fn load_snapshot(config: &Config) -> Result<(Database, Snapshot)> {
        let db = Database::open(&config.data.database_path)?;
        let snapshot = db.load_snapshot()?;
        log::debug!(
            "Loaded snapshot: {} teams, {} conferences",
            snapshot.teams.len(),
            snapshot.conferences.len()
        );
        Ok((db, snapshot))
    }

    pub fn init(config_path: &str) -> Result<()> {
        let config = Config::default();
        config.save(config_path)?;
        println!("Created default config at {}", config_path);

        std::fs::create_dir_all("data")?;
        std::fs::create_dir_all("model")?;
        println!("Created data/ and model/ directories");

        println!("\nNext steps:");
        println!("  1. Edit {} to customize settings", config_path);
        println!("  2. Run 'hoops data import <season.json>' to load team data");
        println!("  3. Place the exported classifier at the configured artifact path");
        println!("  4. Run 'hoops predict \"Team A\" \"Team B\"' for win probabilities");

        Ok(())
    }

    pub fn data_import(config: &Config, file: &str) -> Result<()> {
        let content = std::fs::read_to_string(file)?;
        let import: ImportFile = serde_json::from_str(&content)
            .map_err(|e| HoopsError::Parse(format!("Invalid season file {}: {}", file, e)))?;

        let db = Database::open(&config.data.database_path)?;
        let (conferences, teams) = db.import(&import)?;
        println!("Imported {} conferences and {} teams", conferences, teams);

        Ok(())
    }

    pub fn data_status(config: &Config) -> Result<()> {
        let db = Database::open(&config.data.database_path)?;
        let stats = db.get_stats()?;

        println!("Database Status");
        println!("───────────────────────────────");
        println!("  Path:         {}", config.data.database_path);
        println!("  Teams:        {}", stats.team_count);
        println!("  Conferences:  {}", stats.conference_count);
        println!("  Predictions:  {}", stats.prediction_count);

        Ok(())
    }

    pub fn ranks(config: &Config, team_name: &str) -> Result<()> {
        let (_db, snapshot) = load_snapshot(config)?;
        let team = snapshot
            .find_team(team_name)
            .ok_or_else(|| HoopsError::UnknownTeam(team_name.to_string()))?;

        let mut all_ranks = rankings::rank_all(&snapshot.teams);
        let ranks = all_ranks.remove(&team.id).unwrap_or_default();

        println!("{} ({} teams ranked)", team.name, snapshot.teams.len());
        for (stat, rank) in &ranks {
            println!("  {:<34} #{}", stat, rank);
        }

        Ok(())
    }

    pub fn tier(config: &Config, name: &str, format: OutputFormat) -> Result<()> {
        let kind = match name.to_lowercase().as_str() {
            "contenders" => TierKind::Contenders,
            "next-up" | "nextup" => TierKind::NextUp,
            "mid-majors" | "best-mid-majors" => TierKind::BestMidMajors,
            other => {
                return Err(HoopsError::Parse(format!(
                    "Unknown tier: {}. Use contenders, next-up, or mid-majors.",
                    other
                )))
            }
        };

        let (_db, snapshot) = load_snapshot(config)?;
        let entries = tiers::classify(&snapshot.teams, &snapshot.conferences, kind);
        log::debug!("Tier {} has {} teams", kind.spec().name, entries.len());

        match format {
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&entries)
                        .map_err(|e| HoopsError::Parse(e.to_string()))?
                );
            }
            OutputFormat::Table => {
                println!(
                    "{:<24} {:<10} {:<7} {:>4}  {:>8}",
                    "Team", "Conf", "Record", "AP", "Net Rtg"
                );
                for entry in &entries {
                    println!(
                        "{:<24} {:<10} {:<7} {:>4}  {:>8.2}",
                        entry.team_name,
                        entry.conference,
                        format!("{}-{}", entry.wins, entry.losses),
                        entry.ap_rank,
                        entry.net_rating_adjusted.unwrap_or(0.0),
                    );
                }
            }
        }

        Ok(())
    }

    pub fn top_25(config: &Config) -> Result<()> {
        let (_db, snapshot) = load_snapshot(config)?;
        for entry in summary::top_25(&snapshot) {
            println!(
                "{:>3}. {:<24} {}",
                entry.ap_rank, entry.team_name, entry.record
            );
        }
        Ok(())
    }

    pub fn madness(config: &Config) -> Result<()> {
        let (_db, snapshot) = load_snapshot(config)?;
        for entry in summary::madness_leaderboard(&snapshot) {
            println!(
                "{:>3}. {:<24} {:<10} {}",
                entry.position,
                entry.team_name,
                entry.conference,
                entry
                    .madness_rating
                    .map(|r| format!("{:.2}", r))
                    .unwrap_or_else(|| "-".to_string()),
            );
        }
        Ok(())
    }

    pub fn teams(config: &Config) -> Result<()> {
        let (_db, snapshot) = load_snapshot(config)?;
        for name in summary::team_names(&snapshot) {
            println!("{}", name);
        }
        Ok(())
    }

    pub fn matchup(config: &Config, team1: &str, team2: &str) -> Result<()> {
        let (_db, snapshot) = load_snapshot(config)?;
        let report = summary::matchup_report(&snapshot, team1, team2).map_err(|e| {
            log::error!("matchup report failed for {} vs {}: {}", team1, team2, e);
            e
        })?;

        println!(
            "{}",
            serde_json::to_string_pretty(&report).map_err(|e| HoopsError::Parse(e.to_string()))?
        );
        Ok(())
    }

    pub fn predict(config: &Config, home: &str, away: &str, show_features: bool) -> Result<()> {
        let (db, snapshot) = load_snapshot(config)?;

        let classifier = Arc::new(Classifier::load(&config.model.artifact_path)?);
        let engine = ProbabilityEngine::new(classifier);

        let probs = engine.predict_names(&snapshot, home, away).map_err(|e| {
            log::error!("prediction failed for {} vs {}: {}", home, away, e);
            e
        })?;

        let home_team = snapshot
            .find_team(home)
            .ok_or_else(|| HoopsError::UnknownTeam(home.to_string()))?;
        let away_team = snapshot
            .find_team(away)
            .ok_or_else(|| HoopsError::UnknownTeam(away.to_string()))?;
        db.log_prediction(home_team.id, away_team.id, &probs)?;

        println!("{:<24} {:>5.1}%", home_team.name, probs.home_percentage);
        println!("{:<24} {:>5.1}%", away_team.name, probs.away_percentage);

        if show_features {
            let features = MatchupFeatures::build(home_team, away_team)?;
            println!(
                "{}",
                serde_json::to_string_pretty(&features.to_json())
                    .map_err(|e| HoopsError::Parse(e.to_string()))?
            );
        }

        Ok(())
    }
}
