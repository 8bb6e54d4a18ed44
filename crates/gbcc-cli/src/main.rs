mod cli;
mod cli_config;
mod session;

use anyhow::{Context, Result};
use clap::Parser;
use gbcc_store::RomFiles;
use log::debug;

use cli::{Args, Command};

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let settings_path = args
        .settings
        .clone()
        .unwrap_or_else(cli_config::default_cli_config_path);
    let settings = cli_config::load_from_file(&settings_path);
    let storage = args.storage.clone().unwrap_or_else(|| settings.storage_dir());
    debug!("Using storage root {}", storage.display());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match args.command {
        Command::Cheats { rom, action } => {
            let files = rom_files(&storage, &rom)?;
            session::run_cheats(&files, action, &mut out)
        }
        Command::Config { rom, action } => {
            let files = rom_files(&storage, &rom)?;
            session::run_config(&files, action, &mut out)
        }
    }
}

fn rom_files(storage: &std::path::Path, rom: &std::path::Path) -> Result<RomFiles> {
    let files = RomFiles::new(storage, rom)?;
    files
        .ensure_config_dir()
        .with_context(|| format!("storage root {} is not writable", storage.display()))?;
    Ok(files)
}
