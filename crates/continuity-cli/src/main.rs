use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod render;
mod session;

#[derive(Parser)]
#[command(name = "continuity", version, about = "Learning Continuity CLI")]
struct Cli {
    /// Treat this date (YYYY-MM-DD) as today
    #[arg(long, global = true)]
    today: Option<String>,
    /// Keep the log in memory only; nothing is read from or written to disk
    #[arg(long, global = true)]
    ephemeral: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show streaks, this week's grid and the leaderboard
    Status {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Toggle completion for a day
    Toggle {
        /// Date to toggle (YYYY-MM-DD); defaults to today
        date: Option<String>,
    },
    /// Reset all data to the built-in sample log
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Print a snapshot of the log and streaks
    Log,
    /// Keyboard-driven session reading one key per line from stdin
    Interactive,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let opts = session::SessionOptions {
        today: cli.today,
        ephemeral: cli.ephemeral,
    };
    let result = match cli.command {
        Commands::Status { json } => commands::status::run(&opts, json),
        Commands::Toggle { date } => commands::toggle::run(&opts, date),
        Commands::Reset { yes } => commands::reset::run(&opts, yes),
        Commands::Log => commands::log::run(&opts),
        Commands::Interactive => commands::interactive::run(&opts),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
