mod logging;
mod status;
mod tui;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use savings_core::{
    default_data_dir, Config, FileKeyValueStore, KeyValueStore, Outcome, SavingsService,
};
use tracing::debug;

#[derive(Parser)]
#[command(name = "savings")]
#[command(about = "Track a savings goal and running balance", long_about = None)]
struct Cli {
    /// Directory for store.json, config.json and savings.log (default: ~/.savings_tracker)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Number of cells in the progress bar
    #[arg(long, global = true)]
    segments: Option<usize>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Show goal, balance and progress
    Status,
    /// Set the savings goal
    Goal {
        text: String,
    },
    /// Add an amount to the balance
    Add {
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
    /// Withdraw an amount from the balance
    Withdraw {
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
    /// Set the balance back to 0
    Reset,
    /// Open the Terminal User Interface
    Tui,
}

fn report<S: KeyValueStore>(outcome: Outcome, service: &SavingsService<S>) {
    match outcome {
        Outcome::Rejected(e) => println!("Not applied: {}", e),
        Outcome::Applied | Outcome::Unchanged => status::show_status(&service.view()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => default_data_dir()?,
    };
    fs::create_dir_all(&data_dir)
        .with_context(|| format!("creating data directory {}", data_dir.display()))?;
    logging::init_tracing(&data_dir)?;

    let mut config = Config::load(&data_dir)?;
    if let Some(segments) = cli.segments {
        config.segment_count = segments;
    }
    config.validate()?;
    debug!(?config, data_dir = %data_dir.display(), "starting");

    let store = FileKeyValueStore::new(Some(data_dir))?;
    let mut service = SavingsService::new(store, config)?;

    match cli.command {
        Some(Commands::Status) => {
            status::show_status(&service.view());
        }
        Some(Commands::Goal { text }) => {
            service.set_goal(text)?;
            service.commit_goal()?;
            status::show_status(&service.view());
        }
        Some(Commands::Add { amount }) => {
            let outcome = service.add(&amount)?;
            report(outcome, &service);
        }
        Some(Commands::Withdraw { amount }) => {
            let outcome = service.withdraw(&amount)?;
            report(outcome, &service);
        }
        Some(Commands::Reset) => {
            service.reset()?;
            status::show_status(&service.view());
        }
        Some(Commands::Tui) | None => {
            tui::run(service)?;
        }
    }
    Ok(())
}
