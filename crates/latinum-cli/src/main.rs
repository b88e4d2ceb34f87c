//! CLI frontend for Latinum, the Rules of Acquisition oracle.

mod commands;

use std::path::PathBuf;
use std::process;

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use latinum_daily::GracePolicy;

use commands::Context;

#[derive(Parser)]
#[command(
    name = "latinum",
    about = "Latinum — Rules of Acquisition, daily challenges and achievements",
    version,
    propagate_version = true
)]
struct Cli {
    /// JSON file holding all progress
    #[arg(long, global = true, default_value = "latinum-store.json")]
    store: PathBuf,

    /// Rule corpus JSON file (default: the built-in rules)
    #[arg(long, global = true)]
    corpus: Option<PathBuf>,

    /// Act as if today were this date (YYYY-MM-DD)
    #[arg(long, global = true)]
    date: Option<NaiveDate>,

    /// When a missed day spends the grace period: on-completion, on-detection
    #[arg(long, global = true, default_value = "on-completion", value_parser = parse_grace)]
    grace: GracePolicy,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Consult a Rule of Acquisition
    Rule {
        /// RNG seed for a reproducible draw
        #[arg(short, long)]
        seed: Option<u64>,

        /// Show a specific rule instead of a random one
        #[arg(short, long)]
        number: Option<u32>,
    },

    /// Show today's challenge, or play it with --answers
    Daily {
        /// Chosen option per question, comma separated (e.g. 0,2,1,3,0)
        #[arg(short, long, value_delimiter = ',')]
        answers: Option<Vec<usize>>,

        /// Seconds left on the clock when you finished
        #[arg(short, long, default_value = "0")]
        time_left: u32,
    },

    /// Show the daily streak
    Streak,

    /// List finished daily challenges
    History,

    /// Show achievement progress
    Achievements {
        /// Only show one category (discovery, gaming, collection, streak, special, ultimate)
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Show tracked statistics
    Stats,

    /// Mark a rule as a favorite
    Favorite {
        /// Rule number
        number: u32,
    },

    /// Record sharing a rule
    Share,

    /// Record finding an easter egg
    Egg,

    /// Record trying a theme
    Theme,

    /// Record a mini-game played, optionally with its score
    Game {
        /// Game name
        name: String,

        /// Final score
        #[arg(short, long)]
        score: Option<u32>,
    },
}

fn parse_grace(s: &str) -> Result<GracePolicy, String> {
    GracePolicy::parse(s).ok_or_else(|| format!("unknown grace policy '{s}'"))
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = Context {
        store: cli.store,
        corpus: cli.corpus,
        date: cli.date.unwrap_or_else(|| Local::now().date_naive()),
        grace: cli.grace,
    };

    let result = match cli.command {
        Commands::Rule { seed, number } => commands::rule::run(&ctx, seed, number),
        Commands::Daily { answers, time_left } => {
            commands::daily::run(&ctx, answers.as_deref(), time_left)
        }
        Commands::Streak => commands::streak::run(&ctx),
        Commands::History => commands::history::run(&ctx),
        Commands::Achievements { category } => {
            commands::achievements::run(&ctx, category.as_deref())
        }
        Commands::Stats => commands::stats::run(&ctx),
        Commands::Favorite { number } => commands::track::favorite(&ctx, number),
        Commands::Share => commands::track::share(&ctx),
        Commands::Egg => commands::track::easter_egg(&ctx),
        Commands::Theme => commands::track::theme(&ctx),
        Commands::Game { name, score } => commands::game::run(&ctx, &name, score),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
