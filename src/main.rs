//! `tick` command-line entry point.
//!
//! ```bash
//! # Open the interactive UI
//! tick
//!
//! # Capture a task from the shell
//! tick add "Renew car insurance" --duration short --desc "compare quotes first"
//!
//! # Grouped list with urgency markers
//! tick list --all
//! ```

use clap::Parser;
use tracing::error;

use tick::cli::Cli;
use tick::cmd::*;
use tick::config::Settings;
use tick::error::Error;
use tick::logging::{self, LogTarget};
use tick::persist::FileStore;
use tick::store::TaskStore;
use tick::tui::run::run_tui;

fn main() {
    let cli = Cli::parse();

    let home = std::env::var("HOME").ok();
    let settings = match Settings::resolve(&cli, home.as_deref()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };

    let command = cli.command.unwrap_or(Commands::Ui);

    // Completions and the legend need neither storage nor logging.
    match command {
        Commands::Completions { shell } => {
            cmd_completions(shell);
            return;
        }
        Commands::Legend => {
            cmd_legend();
            return;
        }
        _ => {}
    }

    if let Err(e) = settings.ensure_data_dir() {
        eprintln!("{e}");
        std::process::exit(1);
    }

    let log_file = settings.log_file();
    let is_ui = matches!(command, Commands::Ui);
    let target = if is_ui { LogTarget::File(&log_file) } else { LogTarget::Stderr };
    logging::init(settings.verbosity, target);

    let mut store = TaskStore::open_with_key(FileStore::new(&settings.data_dir), &settings.storage_key);

    let result = match command {
        Commands::Ui => run_tui(&mut store).map_err(Error::from),
        Commands::Add { title, desc, duration } => cmd_add(&mut store, title, desc, duration),
        Commands::List { all, completed, duration } => cmd_list(&store, all, completed, duration),
        Commands::View { id } => cmd_view(&store, id),
        Commands::Update { id, title, desc, duration } => cmd_update(&mut store, id, title, desc, duration),
        Commands::Toggle { id } => cmd_toggle(&mut store, id),
        Commands::Delete { id } => cmd_delete(&mut store, id),
        Commands::Legend | Commands::Completions { .. } => unreachable!("handled above"),
    };

    if let Err(e) = result {
        if is_ui {
            error!("{e}");
        }
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
