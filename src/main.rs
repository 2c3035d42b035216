use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use winratez::config::Config;
use winratez::display::output::{
    display_banner, display_error, display_history, display_info, display_presets, display_stats,
    display_success, display_win_rate,
};
use winratez::storage::FileStore;
use winratez::Session;

#[derive(Parser, Debug)]
#[command(name = "winratez")]
#[command(about = "Track matches and wins, watch your win rate, keep a short history", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Directory holding saved stats (default: ~/.winratez)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Print the win rate without the animated gauge
    #[arg(long, global = true)]
    no_animate: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the current win rate and totals
    Show,

    /// Add to (or subtract from) total matches, e.g. `matches -1`
    Matches {
        #[arg(allow_negative_numbers = true, default_value = "1")]
        delta: i64,
    },

    /// Add to (or subtract from) total wins, e.g. `wins +2`
    Wins {
        #[arg(allow_negative_numbers = true, default_value = "1")]
        delta: i64,
    },

    /// Overwrite total matches. Anything that isn't a non-negative number counts as 0
    SetMatches {
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Overwrite total wins. Anything that isn't a non-negative number counts as 0
    SetWins {
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Save the current stats to history
    Save,

    /// Clear totals and history
    Reset,

    /// List the simulator presets
    Presets,

    /// Load simulator preset N (see `presets`)
    Preset { number: usize },

    /// Show saved snapshots and the history chart
    History,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("winratez=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    let animate = !cli.no_animate && std::io::stdout().is_terminal();

    let store = FileStore::new(config.data_dir.clone());
    let mut session = Session::load(store, config.history_cap);
    let before = session.state().current_win_rate();

    let command = cli.command.unwrap_or(Command::Show);
    let from = match command {
        Command::Show => 0.0,
        Command::Matches { delta } => {
            session.adjust_matches(delta);
            before
        }
        Command::Wins { delta } => {
            session.adjust_wins(delta);
            before
        }
        Command::SetMatches { ref value } => {
            session.set_matches(value);
            before
        }
        Command::SetWins { ref value } => {
            session.set_wins(value);
            before
        }
        Command::Save => {
            let today = chrono::Local::now().date_naive();
            if session.save_snapshot(today) {
                let history = session.state().history();
                if let Some(snap) = history.latest() {
                    display_success(&format!(
                        "Saved {:.2}% on {} ({} in history)",
                        snap.win_rate,
                        snap.date,
                        history.len()
                    ));
                }
            } else {
                display_info("Nothing to save yet. Record some matches first.");
            }
            return Ok(());
        }
        Command::Reset => {
            session.reset();
            display_success("All stats and history cleared");
            before
        }
        Command::Presets => {
            display_presets();
            return Ok(());
        }
        Command::Preset { number } => {
            let preset = session.apply_preset(number)?;
            display_success(&format!(
                "Loaded preset {}W - {}L",
                preset.wins,
                preset.losses()
            ));
            before
        }
        Command::History => {
            display_history(session.state().history());
            return Ok(());
        }
    };

    display_banner();
    display_win_rate(
        session.state(),
        from,
        config.animation_duration,
        config.animation_steps,
        animate,
    );
    display_stats(session.state());

    Ok(())
}
