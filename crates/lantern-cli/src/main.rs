//! CLI frontend for the Lantern interactive-fiction engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "lantern",
    about = "Lantern, a rule engine for text adventures",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log filter written to stderr (overrides RUST_LOG), e.g. "debug"
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a world interactively
    Play {
        /// Path to the world JSON document
        world: PathBuf,

        /// Flag that ends the game in victory
        #[arg(long)]
        victory_flag: Option<String>,
    },

    /// Run a script of commands against a world
    Run {
        /// Path to the world JSON document
        world: PathBuf,

        /// File with one command per line
        #[arg(short, long)]
        script: PathBuf,

        /// Flag that ends the game in victory
        #[arg(long)]
        victory_flag: Option<String>,
    },

    /// Load and validate a world document
    Check {
        /// Path to the world JSON document
        world: PathBuf,
    },

    /// List the artifacts in a world
    List {
        /// Path to the world JSON document
        world: PathBuf,

        /// Filter by kind (area, fixture, item)
        #[arg(short, long)]
        kind: Option<String>,
    },
}

fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    let result = match cli.command {
        Commands::Play {
            world,
            victory_flag,
        } => commands::play::run(&world, victory_flag.as_deref()),
        Commands::Run {
            world,
            script,
            victory_flag,
        } => commands::run::run(&world, &script, victory_flag.as_deref()),
        Commands::Check { world } => commands::check::run(&world),
        Commands::List { world, kind } => commands::list::run(&world, kind.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
