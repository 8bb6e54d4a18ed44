//! Per-ROM configuration overrides.
//!
//! The backing file is a minimal properties dialect: one `key=value` pair per
//! line, `#` or `!` starting a comment line. Backslash escapes follow
//! `java.util.Properties` (`\=`, `\ `, `\#`, `\n`, `\uXXXX`, ...) so any key and
//! value reads back unchanged. Values are plain strings; the typed accessors
//! coerce on read.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    str::Chars,
};

use log::debug;

use crate::error::{Result, StoreError};
use crate::fs::{FileSystem, StdFileSystem};

#[derive(Debug)]
pub struct ConfigStore<F: FileSystem = StdFileSystem> {
    fs: F,
    path: PathBuf,
    props: BTreeMap<String, String>,
}

impl ConfigStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        Self::open_with(StdFileSystem, path)
    }
}

impl<F: FileSystem> ConfigStore<F> {
    /// Loads the table at `path`, creating an empty file if it is missing.
    pub fn open_with(fs: F, path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let props = if fs.exists(&path) {
            let text = fs
                .read_to_string(&path)
                .map_err(|e| StoreError::io(&path, e))?;
            let props = parse(&text);
            debug!("Loaded {} config keys from {}", props.len(), path.display());
            props
        } else {
            fs.create_empty(&path)
                .map_err(|e| StoreError::io(&path, e))?;
            debug!("Created empty config file {}", path.display());
            BTreeMap::new()
        };

        Ok(Self { fs, path, props })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.props.len()
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.props.contains_key(key)
    }

    /// Iterates over all pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.props.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn get_string<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.props.get(key).map_or(default, String::as_str)
    }

    pub fn put_string(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.props.insert(key.into(), value.into());
    }

    /// Returns the stored boolean, or `default` when the key is missing or
    /// holds anything other than `true`/`false`.
    pub fn get_boolean(&self, key: &str, default: bool) -> bool {
        match self.props.get(key).map(String::as_str) {
            Some("true") => true,
            Some("false") => false,
            _ => default,
        }
    }

    pub fn put_boolean(&mut self, key: impl Into<String>, value: bool) {
        self.put_string(key, if value { "true" } else { "false" });
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.props.remove(key)
    }

    pub fn save(&self) -> Result<()> {
        let text = serialize(&self.props);
        self.fs
            .write_atomic(&self.path, text.as_bytes())
            .map_err(|e| StoreError::io(&self.path, e))?;
        debug!("Saved {} config keys to {}", self.props.len(), self.path.display());
        Ok(())
    }

    /// Removes the backing file, resetting the ROM to global defaults.
    pub fn delete(self) -> Result<()> {
        match self.fs.remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(StoreError::io(&self.path, e)),
        }
        debug!("Deleted config file {}", self.path.display());
        Ok(())
    }
}

fn parse(text: &str) -> BTreeMap<String, String> {
    let mut props = BTreeMap::new();

    for raw in text.lines() {
        let line = raw.trim_start();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }

        let (key, value) = parse_pair(line);
        props.insert(key, value);
    }

    props
}

/// Splits at the first unescaped `=` and resolves escapes on both sides.
fn parse_pair(line: &str) -> (String, String) {
    let mut chars = line.chars();
    let mut key = String::new();
    // Trailing whitespace is dropped from the key unless it was escaped.
    let mut keep = 0;

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                key.extend(unescape(&mut chars));
                keep = key.len();
            }
            '=' => break,
            c => key.push(c),
        }
    }
    let len = key.trim_end().len().max(keep);
    key.truncate(len);

    let mut value = String::new();
    let mut chars = chars.as_str().trim_start().chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            value.extend(unescape(&mut chars));
        } else {
            value.push(c);
        }
    }

    (key, value)
}

fn unescape(chars: &mut Chars<'_>) -> Option<char> {
    match chars.next()? {
        'n' => Some('\n'),
        'r' => Some('\r'),
        't' => Some('\t'),
        'f' => Some('\x0c'),
        'u' => {
            let hex: String = chars.by_ref().take(4).collect();
            let code = u32::from_str_radix(&hex, 16).ok()?;
            Some(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER))
        }
        c => Some(c),
    }
}

fn escape_into(out: &mut String, text: &str, is_key: bool) {
    for (i, c) in text.chars().enumerate() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\x0c' => out.push_str("\\f"),
            '=' if is_key => out.push_str("\\="),
            '#' | '!' if is_key && i == 0 => {
                out.push('\\');
                out.push(c);
            }
            // Keys lose whitespace at both ends on parse, values only in front.
            c if c.is_whitespace() && (is_key || i == 0) => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
}

fn serialize(props: &BTreeMap<String, String>) -> String {
    let mut out = String::new();
    for (key, value) in props {
        escape_into(&mut out, key, true);
        out.push('=');
        escape_into(&mut out, value, false);
        out.push('\n');
    }
    out
}
