//! One editing session per invocation: open the store, apply the action,
//! save on the way out.

use std::io::Write;

use anyhow::{Context, Result};
use gbcc_store::{CheatEntry, CheatStore, ConfigStore, RomFiles};
use log::info;

use crate::cli::{CheatAction, ConfigAction};

pub fn run_cheats(files: &RomFiles, action: CheatAction, out: &mut impl Write) -> Result<()> {
    let path = files.cheats_path();
    let mut store = CheatStore::open(&path)
        .with_context(|| format!("failed to open cheats for {}", files.base_name()))?;

    let dirty = match action {
        CheatAction::List => {
            for (i, cheat) in store.iter().enumerate() {
                let state = if cheat.active { "on " } else { "off" };
                writeln!(out, "{i:>3} [{state}] {:<11} {}", cheat.display_code(), cheat.description)?;
            }
            false
        }
        CheatAction::Add { code, description } => {
            let entry = CheatEntry::from_input(&description.join(" "), &code)?;
            let idx = store.add(entry);
            writeln!(out, "added cheat {idx}")?;
            true
        }
        CheatAction::Edit {
            index,
            code,
            description,
        } => {
            let entry = CheatEntry::from_input(&description.join(" "), &code)?;
            store.update(index, entry)?;
            true
        }
        CheatAction::Remove { index } => {
            let removed = store.remove(index)?;
            writeln!(out, "removed '{}'", removed.description)?;
            true
        }
        CheatAction::Toggle { index } => {
            let active = store.toggle(index)?;
            writeln!(out, "{index} is now {}", if active { "on" } else { "off" })?;
            true
        }
        CheatAction::Enable { index } => {
            store.set_active(index, true)?;
            true
        }
        CheatAction::Disable { index } => {
            store.set_active(index, false)?;
            true
        }
        CheatAction::Active => {
            for code in store.active_codes() {
                writeln!(out, "{code}")?;
            }
            false
        }
        CheatAction::Clear => {
            store.delete()?;
            info!("Cleared cheats for {}", files.base_name());
            return Ok(());
        }
    };

    if dirty {
        store.save()?;
    }
    Ok(())
}

pub fn run_config(files: &RomFiles, action: ConfigAction, out: &mut impl Write) -> Result<()> {
    let path = files.config_path();
    let mut store = ConfigStore::open(&path)
        .with_context(|| format!("failed to open config for {}", files.base_name()))?;

    let dirty = match action {
        ConfigAction::Get { key, default } => {
            writeln!(out, "{}", store.get_string(&key, &default))?;
            false
        }
        ConfigAction::GetBool { key, default } => {
            writeln!(out, "{}", store.get_boolean(&key, default))?;
            false
        }
        ConfigAction::Set { key, value } => {
            store.put_string(key, value);
            true
        }
        ConfigAction::SetBool { key, value } => {
            store.put_boolean(key, value);
            true
        }
        ConfigAction::Unset { key } => store.remove(&key).is_some(),
        ConfigAction::List => {
            for (key, value) in store.iter() {
                writeln!(out, "{key}={value}")?;
            }
            false
        }
        ConfigAction::Reset => {
            store.delete()?;
            info!("Reset config for {}", files.base_name());
            return Ok(());
        }
    };

    if dirty {
        store.save()?;
    }
    Ok(())
}
