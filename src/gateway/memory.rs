// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Modelshelf-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Modelshelf and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! An in-memory backend implementing both gateways.
//!
//! It mirrors the notes service's observable behaviour: saving over existing notes snapshots
//! them first, backups list newest first and are capped, and restoring a backup re-saves it.
//! Individual operations can be made to fail for tests.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use tokio::sync::Mutex;

use super::{
    ExportedNote, GatewayError, ModelGateway, NotesExport, NotesGateway, NotesPayload, SaveReply,
    TemplateInfo,
};
use crate::config::DEFAULT_MAX_BACKUPS;
use crate::model::{BackupEntry, BackupId, ModelId, ModelRecord, TemplateId};

const PREVIEW_CHARS: usize = 100;
const FALLBACK_TEMPLATE: &str = "checkpoint";
const EXPORT_VERSION: &str = "1.0";

/// Gateway operations, for fault injection and call counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operation {
    List,
    Detail,
    Load,
    Save,
    Template,
    Templates,
    Restore,
    Export,
}

#[derive(Debug, Clone)]
struct StoredBackup {
    id: BackupId,
    created_at: DateTime<Utc>,
    content: String,
}

#[derive(Debug, Default)]
struct State {
    models: Vec<ModelRecord>,
    details: BTreeMap<ModelId, ModelRecord>,
    backups: BTreeMap<ModelId, Vec<StoredBackup>>,
    next_backup: u64,
    failing: BTreeSet<Operation>,
    calls: BTreeMap<Operation, usize>,
}

impl State {
    fn enter(&mut self, op: Operation) -> Result<(), GatewayError> {
        *self.calls.entry(op).or_default() += 1;
        if self.failing.contains(&op) {
            return Err(GatewayError::Transport(format!("{op:?} unavailable")));
        }
        Ok(())
    }

    fn model(&self, id: &ModelId) -> Option<&ModelRecord> {
        self.models.iter().find(|model| model.id() == id)
    }

    fn backups_for(&self, id: &ModelId, max_backups: usize) -> Vec<BackupEntry> {
        let Some(stored) = self.backups.get(id) else {
            return Vec::new();
        };
        stored
            .iter()
            .rev()
            .take(max_backups)
            .map(|backup| BackupEntry {
                id: backup.id.clone(),
                created_at: Some(backup.created_at.to_rfc3339()),
                preview: Some(backup.content.chars().take(PREVIEW_CHARS).collect()),
            })
            .collect()
    }

    fn write_notes(&mut self, id: &ModelId, content: &str, create_backup: bool) -> SaveReply {
        let Some(previous) = self.model(id).map(|model| model.notes().to_owned()) else {
            return SaveReply::failure("Model not found");
        };

        if create_backup && !previous.is_empty() {
            self.next_backup += 1;
            let backup_id = match BackupId::new(self.next_backup.to_string()) {
                Ok(backup_id) => backup_id,
                Err(err) => return SaveReply::failure(err.to_string()),
            };
            self.backups.entry(id.clone()).or_default().push(StoredBackup {
                id: backup_id,
                created_at: Utc::now(),
                content: previous,
            });
        }

        for model in self.models.iter_mut().filter(|model| model.id() == id) {
            model.set_notes(content);
        }
        if let Some(detail) = self.details.get_mut(id) {
            detail.set_notes(content);
        }
        SaveReply::success()
    }
}

#[derive(Debug)]
pub struct MemoryGateway {
    state: Mutex<State>,
    max_backups: usize,
}

impl MemoryGateway {
    pub fn new(models: Vec<ModelRecord>) -> Self {
        Self {
            state: Mutex::new(State {
                models,
                ..State::default()
            }),
            max_backups: DEFAULT_MAX_BACKUPS,
        }
    }

    pub fn with_max_backups(mut self, max_backups: usize) -> Self {
        self.max_backups = max_backups;
        self
    }

    /// Registers a richer record served by `detail` instead of the listed one.
    pub async fn insert_detail(&self, record: ModelRecord) {
        let mut state = self.state.lock().await;
        state.details.insert(record.id().clone(), record);
    }

    pub async fn replace_models(&self, models: Vec<ModelRecord>) {
        self.state.lock().await.models = models;
    }

    pub async fn fail(&self, op: Operation) {
        self.state.lock().await.failing.insert(op);
    }

    pub async fn recover(&self, op: Operation) {
        self.state.lock().await.failing.remove(&op);
    }

    pub async fn calls(&self, op: Operation) -> usize {
        self.state.lock().await.calls.get(&op).copied().unwrap_or(0)
    }

    pub async fn notes_of(&self, id: &ModelId) -> Option<String> {
        let state = self.state.lock().await;
        state.model(id).map(|model| model.notes().to_owned())
    }
}

#[async_trait]
impl ModelGateway for MemoryGateway {
    async fn list(&self) -> Result<Vec<ModelRecord>, GatewayError> {
        let mut state = self.state.lock().await;
        state.enter(Operation::List)?;
        Ok(state.models.clone())
    }

    async fn detail(&self, id: &ModelId) -> Result<ModelRecord, GatewayError> {
        let mut state = self.state.lock().await;
        state.enter(Operation::Detail)?;
        state
            .details
            .get(id)
            .or_else(|| state.model(id))
            .cloned()
            .ok_or_else(|| GatewayError::NotFound(format!("model {id}")))
    }
}

#[async_trait]
impl NotesGateway for MemoryGateway {
    async fn load(&self, model_id: &ModelId) -> Result<NotesPayload, GatewayError> {
        let mut state = self.state.lock().await;
        state.enter(Operation::Load)?;
        let Some(model) = state.model(model_id) else {
            return Ok(NotesPayload::default());
        };
        Ok(NotesPayload {
            content: model.notes().to_owned(),
            backups: state.backups_for(model_id, self.max_backups),
        })
    }

    async fn save(
        &self,
        model_id: &ModelId,
        content: &str,
        create_backup: bool,
    ) -> Result<SaveReply, GatewayError> {
        let mut state = self.state.lock().await;
        state.enter(Operation::Save)?;
        Ok(state.write_notes(model_id, content, create_backup))
    }

    async fn template(
        &self,
        model_id: &ModelId,
        template_id: &TemplateId,
    ) -> Result<String, GatewayError> {
        let mut state = self.state.lock().await;
        state.enter(Operation::Template)?;
        let model = state
            .details
            .get(model_id)
            .or_else(|| state.model(model_id))
            .ok_or_else(|| GatewayError::NotFound("Model not found".to_owned()))?;
        Ok(render_template(template_id.as_str(), model, Utc::now()))
    }

    async fn templates(&self) -> Result<Vec<TemplateInfo>, GatewayError> {
        let mut state = self.state.lock().await;
        state.enter(Operation::Templates)?;
        TEMPLATES
            .iter()
            .map(|template| {
                let id = TemplateId::new(template.id)
                    .map_err(|err| GatewayError::Malformed(err.to_string()))?;
                Ok(TemplateInfo {
                    id,
                    name: template.name.to_owned(),
                    description: template.description.to_owned(),
                })
            })
            .collect()
    }

    async fn restore(&self, model_id: &ModelId, backup_id: &BackupId) -> Result<(), GatewayError> {
        let mut state = self.state.lock().await;
        state.enter(Operation::Restore)?;
        let content = state
            .backups
            .get(model_id)
            .and_then(|backups| backups.iter().find(|backup| &backup.id == backup_id))
            .map(|backup| backup.content.clone())
            .ok_or_else(|| GatewayError::NotFound("Backup not found".to_owned()))?;

        let reply = state.write_notes(model_id, &content, true);
        if reply.is_success() {
            Ok(())
        } else {
            Err(GatewayError::Rejected(reply.message.unwrap_or_default()))
        }
    }

    async fn export(&self) -> Result<NotesExport, GatewayError> {
        let mut state = self.state.lock().await;
        state.enter(Operation::Export)?;
        let notes = state
            .models
            .iter()
            .filter(|model| model.has_notes())
            .map(|model| ExportedNote {
                model_id: model.id().clone(),
                model_name: model.name().to_owned(),
                model_path: model.path().to_owned(),
                content: model.notes().to_owned(),
                last_modified: model.modified().map(str::to_owned),
            })
            .collect();
        Ok(NotesExport {
            version: EXPORT_VERSION.to_owned(),
            exported_at: Some(Utc::now().to_rfc3339()),
            notes,
        })
    }
}

struct Template {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    body: &'static str,
}

const TEMPLATES: &[Template] = &[
    Template {
        id: "checkpoint",
        name: "Checkpoint Model",
        description: "Full model checkpoint template",
        body: "# {model_name}\n\n## Model Information\n- **Type:** Checkpoint\n- **Base Model:** {base_model}\n- **File Size:** {file_size}\n- **Format:** {format}\n\n## Recommended Settings\n- **Sampler:**\n- **Steps:**\n- **CFG Scale:**\n\n## Usage Notes\n\n---\n*Last updated: {date}*",
    },
    Template {
        id: "lora",
        name: "LoRA Model",
        description: "LoRA adaptation template",
        body: "# {model_name}\n\n## Model Information\n- **Type:** LoRA\n- **Base Model:** {base_model}\n- **File Size:** {file_size}\n- **Format:** {format}\n\n## Usage\n- **Trigger Words:**\n- **Recommended Weight:**\n\n## Example Prompts\n\n---\n*Last updated: {date}*",
    },
    Template {
        id: "vae",
        name: "VAE Model",
        description: "VAE encoder template",
        body: "# {model_name}\n\n## Model Information\n- **Type:** VAE\n- **Compatible with:** {base_model}\n- **File Size:** {file_size}\n\n## Effects\n\n---\n*Last updated: {date}*",
    },
    Template {
        id: "controlnet",
        name: "ControlNet",
        description: "ControlNet model template",
        body: "# {model_name}\n\n## Model Information\n- **Type:** ControlNet\n- **Base Model:** {base_model}\n- **File Size:** {file_size}\n\n## Usage Settings\n- **Control Weight:**\n- **Preprocessor:**\n\n---\n*Last updated: {date}*",
    },
    Template {
        id: "embedding",
        name: "Embedding",
        description: "Textual inversion template",
        body: "# {model_name}\n\n## Model Information\n- **Type:** Embedding\n- **Base Model:** {base_model}\n- **File Size:** {file_size}\n\n## Usage\n- **Trigger Word:** `{model_name}`\n\n---\n*Last updated: {date}*",
    },
];

/// Fills a template body for `model`. Unknown template ids fall back to the checkpoint template.
pub fn render_template(template_id: &str, model: &ModelRecord, now: DateTime<Utc>) -> String {
    let wanted = template_id.to_lowercase();
    let body = TEMPLATES
        .iter()
        .find(|template| template.id == wanted)
        .or_else(|| TEMPLATES.iter().find(|template| template.id == FALLBACK_TEMPLATE))
        .map(|template| template.body)
        .unwrap_or_default();

    let base_model = model
        .extra()
        .get("base_model")
        .and_then(Value::as_str)
        .unwrap_or("Unknown");
    let file_size = model.size().map(format_size).unwrap_or_else(|| "Unknown".to_owned());
    let format = std::path::Path::new(model.path())
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_owned)
        .unwrap_or_else(|| "Unknown".to_owned());

    body.replace("{model_name}", model.name())
        .replace("{base_model}", base_model)
        .replace("{file_size}", &file_size)
        .replace("{format}", &format)
        .replace("{date}", &now.format("%Y-%m-%d").to_string())
}

pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}
