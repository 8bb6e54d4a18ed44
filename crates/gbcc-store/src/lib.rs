//! Per-ROM persistent storage for the gbcc Game Boy / Game Boy Color frontend.
//!
//! Two independent stores, each bound to a single file:
//! - [`CheatStore`]: the ordered cheat list for a ROM (`<base>.cheats`).
//! - [`ConfigStore`]: key/value emulator overrides for a ROM (`<base>.cfg`).
//!
//! Both load fully on open, mutate in memory and write back only on `save()`.
//! Neither does any locking; one session per file at a time.

/// Cheat entries, the cheat file format and [`CheatStore`].
pub mod cheats;

/// Properties-style key/value store.
pub mod config;

pub mod error;

/// Filesystem capability the stores are written against.
pub mod fs;

/// Per-ROM file naming under the storage root.
pub mod layout;

pub use cheats::{CheatEntry, CheatKind, CheatStore};
pub use config::ConfigStore;
pub use error::{CheatInputError, StoreError};
pub use fs::{FileSystem, StdFileSystem};
pub use layout::{LayoutError, RomFiles};
