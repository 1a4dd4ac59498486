use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;
use crate::persist::DEFAULT_STORAGE_KEY;

/// Personal task tracker. Tasks turn yellow, orange and red as they outlive their duration class.
/// Storage defaults to ~/.tick/tasks.json.
#[derive(Parser)]
#[command(name = "tick", version, about = "Tasks that age in colour")]
pub struct Cli {
    /// Directory holding the task file and the UI log.
    #[arg(long, global = true, env = "TICK_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Storage key; each key is a separate task list.
    #[arg(long, global = true, default_value = DEFAULT_STORAGE_KEY)]
    pub key: String,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Defaults to `ui` when omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,
}
