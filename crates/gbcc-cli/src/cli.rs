use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "gbcc", about = "Edit per-ROM cheats and configuration overrides")]
pub struct Args {
    /// Storage root; per-ROM files live under <DIR>/config
    #[arg(long, global = true, value_name = "DIR")]
    pub storage: Option<PathBuf>,

    /// Path to the CLI settings file
    #[arg(long, global = true, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Edit the cheat list of a ROM
    Cheats {
        /// ROM file; only its base name is used
        rom: PathBuf,

        #[command(subcommand)]
        action: CheatAction,
    },

    /// Edit the configuration overrides of a ROM
    Config {
        /// ROM file; only its base name is used
        rom: PathBuf,

        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum CheatAction {
    /// List all cheats with their index
    List,

    /// Append a new, active cheat
    Add {
        code: String,
        #[arg(required = true, num_args = 1..)]
        description: Vec<String>,
    },

    /// Replace the cheat at INDEX
    Edit {
        index: usize,
        code: String,
        #[arg(required = true, num_args = 1..)]
        description: Vec<String>,
    },

    /// Delete the cheat at INDEX
    Remove { index: usize },

    /// Flip the active flag of the cheat at INDEX
    Toggle { index: usize },

    /// Activate the cheat at INDEX
    Enable { index: usize },

    /// Deactivate the cheat at INDEX
    Disable { index: usize },

    /// Print the codes that would be applied, one per line
    Active,

    /// Delete the cheat file
    Clear,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    /// Print a string value
    Get {
        key: String,
        #[arg(long, default_value = "")]
        default: String,
    },

    /// Print a boolean value
    GetBool {
        key: String,
        #[arg(long, default_value_t = false, action = ArgAction::Set)]
        default: bool,
    },

    Set { key: String, value: String },

    SetBool {
        key: String,
        #[arg(action = ArgAction::Set)]
        value: bool,
    },

    /// Remove a key
    Unset { key: String },

    /// Print every key=value pair
    List,

    /// Delete the config file, falling back to global defaults
    Reset,
}
