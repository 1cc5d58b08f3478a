// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Modelshelf-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Modelshelf and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Backend collaborators.
//!
//! The catalog and notes editor never perform network I/O themselves; hosts inject
//! implementations of [`ModelGateway`] and [`NotesGateway`]. [`wire`] decodes the backend's JSON
//! envelope for hosts that talk HTTP, and [`memory::MemoryGateway`] serves everything from memory.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::model::{BackupEntry, BackupId, ModelId, ModelRecord, TemplateId};

pub mod memory;
pub mod wire;

pub use crate::error::GatewayError;

#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Returns the whole catalog, in display order.
    async fn list(&self) -> Result<Vec<ModelRecord>, GatewayError>;

    async fn detail(&self, id: &ModelId) -> Result<ModelRecord, GatewayError>;
}

#[async_trait]
pub trait NotesGateway: Send + Sync {
    /// Notes that were never written load as an empty payload, not an error.
    async fn load(&self, model_id: &ModelId) -> Result<NotesPayload, GatewayError>;

    async fn save(
        &self,
        model_id: &ModelId,
        content: &str,
        create_backup: bool,
    ) -> Result<SaveReply, GatewayError>;

    async fn template(
        &self,
        model_id: &ModelId,
        template_id: &TemplateId,
    ) -> Result<String, GatewayError>;

    async fn templates(&self) -> Result<Vec<TemplateInfo>, GatewayError>;

    async fn restore(&self, model_id: &ModelId, backup_id: &BackupId) -> Result<(), GatewayError>;

    /// Every model's non-empty notes, for backup or migration.
    async fn export(&self) -> Result<NotesExport, GatewayError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NotesPayload {
    pub content: String,
    pub backups: Vec<BackupEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyStatus {
    Success,
    #[serde(alias = "failure")]
    Error,
}

/// The backend's answer to a save. A failure here is a normal reply, not a transport error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveReply {
    pub status: ReplyStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SaveReply {
    pub fn success() -> Self {
        Self {
            status: ReplyStatus::Success,
            message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: ReplyStatus::Error,
            message: Some(message.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ReplyStatus::Success
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateInfo {
    pub id: TemplateId,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// One model's notes inside a [`NotesExport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedNote {
    pub model_id: ModelId,
    pub model_name: String,
    #[serde(default)]
    pub model_path: String,
    pub content: String,
    #[serde(default)]
    pub last_modified: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotesExport {
    pub version: String,
    #[serde(default)]
    pub exported_at: Option<String>,
    #[serde(default)]
    pub notes: Vec<ExportedNote>,
}
