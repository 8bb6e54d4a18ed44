//! Per-ROM cheat list.
//!
//! Cheats live in a flat text file, one per line:
//!
//! ```text
//! cheat=01FF26C1#Infinite health
//! #cheat=0A1-B2C-D3E#Moon jump
//! ```
//!
//! A leading `#` comments the whole line out, which is how an inactive cheat
//! is stored. The list is read once on [`CheatStore::open`] and written back
//! in full by [`CheatStore::save`].

use std::{
    fmt,
    path::{Path, PathBuf},
};

use log::debug;

use crate::error::{CheatInputError, Result, StoreError};
use crate::fs::{FileSystem, StdFileSystem};

const CHEAT_KEY: &str = "cheat";
const INACTIVE_MARKER: char = '#';
const DELIMITERS: &[char] = &['=', '#'];

/// Characters the editor strips from descriptions.
const RESERVED_DESCRIPTION_CHARS: &[char] = &['#', ';'];

/// Characters that would split or end the line if written inside a code.
const RESERVED_CODE_CHARS: &[char] = &['=', '#', '\r', '\n'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheatKind {
    /// 8-character RAM patch (`ttvvaaaa`).
    GameShark,
    /// 9-character ROM patch, usually displayed as `XXX-XXX-XXX`.
    GameGenie,
}

impl fmt::Display for CheatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GameShark => f.write_str("GameShark"),
            Self::GameGenie => f.write_str("Game Genie"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheatEntry {
    pub description: String,
    pub code: String,
    pub active: bool,
}

impl CheatEntry {
    pub fn new(description: impl Into<String>, code: impl Into<String>, active: bool) -> Self {
        Self {
            description: description.into(),
            code: code.into(),
            active,
        }
    }

    /// Builds an active entry from raw user input.
    ///
    /// Reserved characters are dropped from the description and it is trimmed.
    /// The code is uppercased and must be 8 or 9 characters long.
    pub fn from_input(description: &str, code: &str) -> Result<Self, CheatInputError> {
        let description: String = description
            .chars()
            .filter(|c| !RESERVED_DESCRIPTION_CHARS.contains(c) && *c != '\n' && *c != '\r')
            .collect();
        let description = description.trim();
        if description.is_empty() {
            return Err(CheatInputError::BlankDescription);
        }

        let code = code.trim().to_uppercase();
        if let Some(c) = code.chars().find(|c| RESERVED_CODE_CHARS.contains(c)) {
            return Err(CheatInputError::ReservedCodeChar(c));
        }
        let len = code.chars().count();
        if len != 8 && len != 9 {
            return Err(CheatInputError::InvalidCodeLength(len));
        }

        Ok(Self::new(description, code, true))
    }

    pub fn kind(&self) -> Option<CheatKind> {
        match self.code.chars().count() {
            8 => Some(CheatKind::GameShark),
            9 => Some(CheatKind::GameGenie),
            _ => None,
        }
    }

    /// The code as shown to the user: Game Genie codes are split into three
    /// groups of three, everything else is returned verbatim.
    pub fn display_code(&self) -> String {
        let code = &self.code;
        if code.len() == 9 && code.is_ascii() {
            format!("{}-{}-{}", &code[0..3], &code[3..6], &code[6..9])
        } else {
            code.clone()
        }
    }

    fn parse_line(line: &str) -> Option<Self> {
        let (active, body) = match line.strip_prefix(INACTIVE_MARKER) {
            Some(rest) => (false, rest),
            None => (true, line),
        };

        let mut parts = body.splitn(3, DELIMITERS);
        let _key = parts.next()?;
        let code = parts.next()?;
        let description = parts.next()?;

        Some(Self::new(description, code, active))
    }

    /// Why this entry would not survive a write and reload, if it wouldn't.
    fn unencodable_reason(&self) -> Option<&'static str> {
        if self.code.contains(RESERVED_CODE_CHARS) {
            Some("code contains '=', '#' or a line break")
        } else if self.description.contains(&['\r', '\n'][..]) {
            Some("description contains a line break")
        } else {
            None
        }
    }

    fn write_line(&self, out: &mut String) {
        if !self.active {
            out.push(INACTIVE_MARKER);
        }
        out.push_str(CHEAT_KEY);
        out.push('=');
        out.push_str(&self.code);
        out.push('#');
        out.push_str(&self.description);
        out.push('\n');
    }
}

/// Ordered cheat list for one ROM, bound to its backing file.
///
/// Indices are positions in the list: removing an entry shifts every later
/// entry down by one.
#[derive(Debug)]
pub struct CheatStore<F: FileSystem = StdFileSystem> {
    fs: F,
    path: PathBuf,
    cheats: Vec<CheatEntry>,
}

impl CheatStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        Self::open_with(StdFileSystem, path)
    }
}

impl<F: FileSystem> CheatStore<F> {
    /// Loads the cheat file at `path`, creating an empty one if it is missing.
    ///
    /// Any malformed line fails the whole load with [`StoreError::Parse`].
    pub fn open_with(fs: F, path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if !fs.exists(&path) {
            fs.create_empty(&path)
                .map_err(|e| StoreError::io(&path, e))?;
            debug!("Created empty cheat file {}", path.display());
            return Ok(Self {
                fs,
                path,
                cheats: Vec::new(),
            });
        }

        let text = fs.read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::InvalidData {
                StoreError::Parse {
                    path: path.clone(),
                    line: 0,
                    content: "file is not valid UTF-8".to_string(),
                }
            } else {
                StoreError::io(&path, e)
            }
        })?;
        let cheats = parse(&path, &text)?;
        debug!("Loaded {} cheats from {}", cheats.len(), path.display());

        Ok(Self { fs, path, cheats })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.cheats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cheats.is_empty()
    }

    pub fn entries(&self) -> &[CheatEntry] {
        &self.cheats
    }

    pub fn iter(&self) -> impl Iterator<Item = &CheatEntry> {
        self.cheats.iter()
    }

    /// Codes of every active cheat, in list order.
    pub fn active_codes(&self) -> impl Iterator<Item = &str> {
        self.cheats
            .iter()
            .filter(|c| c.active)
            .map(|c| c.code.as_str())
    }

    /// Appends `entry` and returns its index.
    pub fn add(&mut self, entry: CheatEntry) -> usize {
        self.cheats.push(entry);
        self.cheats.len() - 1
    }

    pub fn get(&self, index: usize) -> Result<&CheatEntry> {
        StoreError::check_index(index, self.cheats.len())?;
        Ok(&self.cheats[index])
    }

    pub fn update(&mut self, index: usize, entry: CheatEntry) -> Result<()> {
        StoreError::check_index(index, self.cheats.len())?;
        self.cheats[index] = entry;
        Ok(())
    }

    /// Removes and returns the entry at `index`.
    pub fn remove(&mut self, index: usize) -> Result<CheatEntry> {
        StoreError::check_index(index, self.cheats.len())?;
        Ok(self.cheats.remove(index))
    }

    pub fn set_active(&mut self, index: usize, active: bool) -> Result<()> {
        StoreError::check_index(index, self.cheats.len())?;
        self.cheats[index].active = active;
        Ok(())
    }

    /// Flips the active flag and returns the new value.
    pub fn toggle(&mut self, index: usize) -> Result<bool> {
        StoreError::check_index(index, self.cheats.len())?;
        let cheat = &mut self.cheats[index];
        cheat.active = !cheat.active;
        Ok(cheat.active)
    }

    /// Writes the whole list back. Fails with [`StoreError::Unencodable`]
    /// without touching the file if any entry would not read back unchanged.
    pub fn save(&self) -> Result<()> {
        let text = serialize(&self.cheats)?;
        self.fs
            .write_atomic(&self.path, text.as_bytes())
            .map_err(|e| StoreError::io(&self.path, e))?;
        debug!("Saved {} cheats to {}", self.cheats.len(), self.path.display());
        Ok(())
    }

    /// Removes the backing file. An already missing file is not an error.
    pub fn delete(self) -> Result<()> {
        match self.fs.remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(StoreError::io(&self.path, e)),
        }
        debug!("Deleted cheat file {}", self.path.display());
        Ok(())
    }
}

fn parse(path: &Path, text: &str) -> Result<Vec<CheatEntry>> {
    text.lines()
        .enumerate()
        .map(|(i, line)| {
            CheatEntry::parse_line(line).ok_or_else(|| StoreError::Parse {
                path: path.to_path_buf(),
                line: i + 1,
                content: line.to_string(),
            })
        })
        .collect()
}

fn serialize(cheats: &[CheatEntry]) -> Result<String> {
    let mut out = String::new();
    for (index, cheat) in cheats.iter().enumerate() {
        if let Some(reason) = cheat.unencodable_reason() {
            return Err(StoreError::Unencodable { index, reason });
        }
        cheat.write_line(&mut out);
    }
    Ok(out)
}
