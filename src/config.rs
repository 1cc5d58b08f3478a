// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Modelshelf-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Modelshelf and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Explorer tunables.
//!
//! Defaults match the backend: saves snapshot the previous notes, notes are capped at one
//! million characters, and ten backups are listed per model. Hosts may load a JSON file and
//! then apply `MODELSHELF_*` environment overrides.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_MAX_NOTES_CHARS: usize = 1_000_000;
pub const DEFAULT_MAX_BACKUPS: usize = 10;
pub const DEFAULT_FIND_KEY: char = 'f';

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// Ask the backend to snapshot the previous notes on every save.
    pub backup_on_save: bool,
    pub max_notes_chars: usize,
    /// Backups kept in an open draft's list, newest first.
    pub max_backups: usize,
    /// Pressed with Ctrl, focuses the search box.
    pub find_key: char,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            backup_on_save: true,
            max_notes_chars: DEFAULT_MAX_NOTES_CHARS,
            max_backups: DEFAULT_MAX_BACKUPS,
            find_key: DEFAULT_FIND_KEY,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

impl ExplorerConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Applies overrides from `lookup`. Values that fail to parse leave the setting unchanged.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        self.backup_on_save = env_bool(&lookup, "MODELSHELF_BACKUP_ON_SAVE", self.backup_on_save);
        self.max_notes_chars =
            env_usize(&lookup, "MODELSHELF_MAX_NOTES_CHARS", self.max_notes_chars).max(1);
        self.max_backups = env_usize(&lookup, "MODELSHELF_MAX_BACKUPS", self.max_backups);
        self
    }
}

fn env_usize(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: usize) -> usize {
    lookup(name).and_then(|raw| raw.trim().parse::<usize>().ok()).unwrap_or(default)
}

fn env_bool(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: bool) -> bool {
    match lookup(name).map(|raw| raw.trim().to_ascii_lowercase()).as_deref() {
        Some("1" | "true" | "yes" | "on") => true,
        Some("0" | "false" | "no" | "off") => false,
        _ => default,
    }
}
