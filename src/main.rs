use clap::{Parser, Subcommand};
use eyre::{Context, Result};
use std::fs::File;
use std::io::{self, BufReader, IsTerminal};
use std::path::PathBuf;
use tracing::Level;

use kanban::Config;
use kanban::render;
use kanban::shell::Session;

#[derive(Parser)]
#[command(name = "kanban")]
#[command(about = "Kanban board in your terminal - columns, task cards, drag and drop")]
#[command(version = env!("GIT_DESCRIBE"))]
struct Cli {
    /// Path to a YAML config file (default: <config dir>/kanban/config.yml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print boards as JSON
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive session (default)
    Shell,

    /// Run commands from a file, then print the board
    Run {
        /// Script with one shell command per line
        script: PathBuf,
    },

    /// List the suggested tasks
    Suggestions,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    let config = Config::load(cli.config.as_deref())?;
    let mut session = Session::new(config.controller()?).with_json(cli.json);

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => {
            let stdin = io::stdin();
            let interactive = stdin.is_terminal();
            if interactive {
                println!("Welcome to the Kanban board! Type `help` for commands.");
                print!("{}", session.show()?);
            }
            session.run(stdin.lock(), io::stdout(), interactive)?;
        }
        Commands::Run { script } => {
            let file = File::open(&script).with_context(|| format!("Failed to open script {}", script.display()))?;
            session.run(BufReader::new(file), io::stdout(), false)?;
            print!("{}", session.show()?);
        }
        Commands::Suggestions => {
            print!("{}", render::suggestions_text(session.controller().suggestions()));
        }
    }

    Ok(())
}
