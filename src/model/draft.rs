// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Modelshelf-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Modelshelf and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{BackupId, ModelId};

/// Whether the draft matches what was last persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutoSaveStatus {
    #[default]
    Saved,
    Dirty,
    Saving,
}

/// Character/word/line counts shown next to the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TextStats {
    pub chars: usize,
    pub words: usize,
    pub lines: usize,
}

impl TextStats {
    pub fn of(content: &str) -> Self {
        Self {
            chars: content.chars().count(),
            words: content.split_whitespace().count(),
            lines: content.lines().count(),
        }
    }
}

/// A listed notes snapshot. Only `id` is needed to restore; the rest is display metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupEntry {
    pub id: BackupId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, alias = "content_preview", skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
}

impl BackupEntry {
    pub fn new(id: BackupId) -> Self {
        Self {
            id,
            created_at: None,
            preview: None,
        }
    }
}

/// The in-progress notes edit for a single model.
#[derive(Debug, Clone, PartialEq)]
pub struct NotesDraft {
    model_id: ModelId,
    content: String,
    original_content: String,
    status: AutoSaveStatus,
    backups: Vec<BackupEntry>,
    stats: TextStats,
    last_saved_at: Option<DateTime<Utc>>,
    template_picker_open: bool,
}

impl NotesDraft {
    pub fn open(model_id: ModelId, content: impl Into<String>, backups: Vec<BackupEntry>) -> Self {
        let content = content.into();
        Self {
            model_id,
            stats: TextStats::of(&content),
            original_content: content.clone(),
            content,
            status: AutoSaveStatus::Saved,
            backups,
            last_saved_at: None,
            template_picker_open: false,
        }
    }

    pub fn model_id(&self) -> &ModelId {
        &self.model_id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn original_content(&self) -> &str {
        &self.original_content
    }

    pub fn is_dirty(&self) -> bool {
        self.content != self.original_content
    }

    pub fn status(&self) -> AutoSaveStatus {
        self.status
    }

    pub fn backups(&self) -> &[BackupEntry] {
        &self.backups
    }

    pub fn stats(&self) -> TextStats {
        self.stats
    }

    pub fn last_saved_at(&self) -> Option<DateTime<Utc>> {
        self.last_saved_at
    }

    pub fn template_picker_open(&self) -> bool {
        self.template_picker_open
    }

    pub(crate) fn set_content(&mut self, content: String) {
        self.content = content;
        self.stats = TextStats::of(&self.content);
        self.status = if self.is_dirty() {
            AutoSaveStatus::Dirty
        } else {
            AutoSaveStatus::Saved
        };
    }

    pub(crate) fn begin_saving(&mut self) {
        self.status = AutoSaveStatus::Saving;
    }

    /// Marks `saved` as persisted. Edits made while the save was in flight keep the draft dirty.
    pub(crate) fn mark_saved(&mut self, saved: String, at: DateTime<Utc>) {
        self.original_content = saved;
        self.last_saved_at = Some(at);
        self.status = if self.is_dirty() {
            AutoSaveStatus::Dirty
        } else {
            AutoSaveStatus::Saved
        };
    }

    pub(crate) fn mark_save_failed(&mut self) {
        self.status = AutoSaveStatus::Dirty;
    }

    pub(crate) fn reload(&mut self, content: String, backups: Vec<BackupEntry>) {
        self.stats = TextStats::of(&content);
        self.original_content = content.clone();
        self.content = content;
        self.backups = backups;
        self.status = AutoSaveStatus::Saved;
    }

    pub(crate) fn set_backups(&mut self, backups: Vec<BackupEntry>) {
        self.backups = backups;
    }

    pub(crate) fn set_template_picker_open(&mut self, open: bool) {
        self.template_picker_open = open;
    }
}
