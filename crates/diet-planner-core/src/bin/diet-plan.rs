//! Command-line front end for the diet planner.
//!
//! Reads a JSON profile, prints plans as JSON, and optionally records simple
//! plans in a local history database.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use diet_planner_core::db::DEFAULT_HISTORY_LIMIT;
use diet_planner_core::{Database, DietEngine, ExtendedProfile, Profile, ReferenceData};

#[derive(Parser)]
#[command(name = "diet-plan")]
#[command(about = "Rule-based meal plan recommendations")]
struct Cli {
    /// Reference data JSON (catalog, guidelines, templates); built-in tables if omitted
    #[arg(long, global = true)]
    reference: Option<PathBuf>,

    /// Seed for reproducible selections
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// One dish per slot with a calorie figure and notes
    Plan {
        /// Profile JSON file
        #[arg(long)]
        profile: PathBuf,
        /// History database; the plan is recorded when set
        #[arg(long, requires = "user")]
        db: Option<PathBuf>,
        /// User the plan is recorded for
        #[arg(long)]
        user: Option<String>,
    },
    /// Structured meals, weekly plan and nutrition targets
    MealPlan {
        /// Profile JSON file
        #[arg(long)]
        profile: PathBuf,
    },
    /// Stored plans for a user, newest first
    History {
        /// History database
        #[arg(long)]
        db: PathBuf,
        /// User whose plans to list
        #[arg(long)]
        user: String,
        /// Maximum number of plans
        #[arg(long, default_value_t = DEFAULT_HISTORY_LIMIT)]
        limit: usize,
    },
    /// Print the reference data in the JSON format --reference reads
    Reference,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let reference = match &cli.reference {
        Some(path) => ReferenceData::load(path)
            .with_context(|| format!("loading reference data from {}", path.display()))?,
        None => ReferenceData::builtin(),
    };
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let engine = DietEngine::new(&reference);

    match cli.command {
        Commands::Plan { profile, db, user } => {
            let profile = read_profile(&profile)?;
            let plan = engine.generate_plan(&profile, &mut rng);

            match (db, user) {
                (Some(db_path), Some(user_id)) => {
                    let db = open_db(&db_path)?;
                    db.upsert_profile(&user_id, &profile)?;
                    let stored = db.insert_plan(&user_id, &plan)?;
                    info!(plan_id = %stored.plan_id, user_id = %user_id, "recorded plan");
                    println!("{}", serde_json::to_string_pretty(&stored)?);
                }
                _ => println!("{}", serde_json::to_string_pretty(&plan)?),
            }
        }
        Commands::MealPlan { profile } => {
            let profile = read_profile(&profile)?;
            let outcome = engine.generate_meal_plan(&ExtendedProfile::from(&profile), &mut rng);
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        Commands::History { db, user, limit } => {
            let db = open_db(&db)?;
            let plans = db.plan_history(&user, limit)?;
            if plans.is_empty() {
                eprintln!("No plans found for {}.", user);
            }
            println!("{}", serde_json::to_string_pretty(&plans)?);
        }
        Commands::Reference => {
            println!("{}", reference.to_json()?);
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) -> Result<()> {
    let default_level = match verbose {
        0 => "diet_planner_core=info",
        1 => "diet_planner_core=debug",
        _ => "diet_planner_core=trace",
    };
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    Ok(())
}

fn read_profile(path: &Path) -> Result<Profile> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading profile {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing profile {}", path.display()))
}

fn open_db(path: &Path) -> Result<Database> {
    Database::open(path).with_context(|| format!("opening database {}", path.display()))
}
