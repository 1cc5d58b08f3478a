// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Modelshelf-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Modelshelf and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ids::ModelId;

/// One catalog entry: a model file plus its persisted notes.
///
/// `has_notes` is derived from `notes` and only ever changes through [`ModelRecord::set_notes`].
/// Deserialization recomputes it and ignores whatever the backend reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ModelRecordRepr")]
pub struct ModelRecord {
    id: ModelId,
    name: String,
    #[serde(rename = "type")]
    model_type: String,
    notes: String,
    has_notes: bool,
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    modified: Option<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl ModelRecord {
    pub fn new(id: ModelId, name: impl Into<String>, model_type: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            model_type: model_type.into(),
            notes: String::new(),
            has_notes: false,
            path: String::new(),
            size: None,
            modified: None,
            extra: Map::new(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.set_notes(notes);
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_modified(mut self, modified: impl Into<String>) -> Self {
        self.modified = Some(modified.into());
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    pub fn id(&self) -> &ModelId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn model_type(&self) -> &str {
        &self.model_type
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn has_notes(&self) -> bool {
        self.has_notes
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn size(&self) -> Option<u64> {
        self.size
    }

    pub fn modified(&self) -> Option<&str> {
        self.modified.as_deref()
    }

    /// Backend fields this crate does not interpret (hashes, tags, civitai links, ...).
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
        self.has_notes = !self.notes.trim().is_empty();
    }
}

#[derive(Deserialize)]
struct ModelRecordRepr {
    id: ModelId,
    #[serde(default)]
    name: String,
    #[serde(rename = "type", default)]
    model_type: String,
    #[serde(default, alias = "notes_content")]
    notes: Option<String>,
    #[serde(default, rename = "has_notes")]
    _has_notes: IgnoredAny,
    #[serde(default)]
    path: Option<String>,
    #[serde(default, alias = "size_bytes")]
    size: Option<u64>,
    #[serde(default, alias = "modified_at")]
    modified: Option<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl From<ModelRecordRepr> for ModelRecord {
    fn from(repr: ModelRecordRepr) -> Self {
        let mut record = ModelRecord {
            id: repr.id,
            name: repr.name,
            model_type: repr.model_type,
            notes: String::new(),
            has_notes: false,
            path: repr.path.unwrap_or_default(),
            size: repr.size,
            modified: repr.modified,
            extra: repr.extra,
        };
        record.set_notes(repr.notes.unwrap_or_default());
        record
    }
}
