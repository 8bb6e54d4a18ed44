//! Where per-ROM files live.
//!
//! Everything for a ROM is keyed by its base name (file name minus the last
//! extension) under `<storage_root>/config/`.

use std::{
    io,
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::fs::{FileSystem, StdFileSystem};

pub const CONFIG_DIR: &str = "config";
pub const CHEATS_EXTENSION: &str = "cheats";
pub const CONFIG_EXTENSION: &str = "cfg";

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("ROM path {} has no file name", .0.display())]
    NoFileName(PathBuf),

    #[error("failed to create config directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// `roms/Tetris DX.gbc` -> `Tetris DX`.
pub fn rom_base_name(rom: &Path) -> Option<&str> {
    rom.file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RomFiles {
    config_dir: PathBuf,
    base_name: String,
}

impl RomFiles {
    pub fn new(storage_root: impl AsRef<Path>, rom: impl AsRef<Path>) -> Result<Self, LayoutError> {
        let rom = rom.as_ref();
        let base_name = rom_base_name(rom)
            .ok_or_else(|| LayoutError::NoFileName(rom.to_path_buf()))?
            .to_string();

        Ok(Self {
            config_dir: storage_root.as_ref().join(CONFIG_DIR),
            base_name,
        })
    }

    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn cheats_path(&self) -> PathBuf {
        self.file_with_extension(CHEATS_EXTENSION)
    }

    pub fn config_path(&self) -> PathBuf {
        self.file_with_extension(CONFIG_EXTENSION)
    }

    pub fn ensure_config_dir(&self) -> Result<(), LayoutError> {
        self.ensure_config_dir_with(&StdFileSystem)
    }

    pub fn ensure_config_dir_with<F: FileSystem>(&self, fs: &F) -> Result<(), LayoutError> {
        fs.create_dir_all(&self.config_dir)
            .map_err(|source| LayoutError::CreateDir {
                path: self.config_dir.clone(),
                source,
            })
    }

    fn file_with_extension(&self, ext: &str) -> PathBuf {
        // Not `with_extension`: base names may themselves contain dots.
        self.config_dir.join(format!("{}.{ext}", self.base_name))
    }
}
