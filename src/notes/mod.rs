// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Modelshelf-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Modelshelf and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The notes editor: one open draft, its autosave status, and the gateway calls around it.
//!
//! Every operation that talks to the gateway mutates the draft only after the call succeeds.
//! Failures are logged, reported through the [`Notifier`], and returned to the caller.

pub mod format;


use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, error, warn};

use crate::catalog::CatalogStore;
use crate::config::ExplorerConfig;
use crate::error::{ExplorerError, GatewayError, ValidationError};
use crate::gateway::{NotesExport, NotesGateway, NotesPayload, TemplateInfo};
use crate::host::{Confirmer, NoticeLevel, Notifier};
use crate::model::{
    AutoSaveStatus, BackupEntry, BackupId, ModelRecord, NotesDraft, TemplateId, TextStats,
};

pub use format::{TextEdit, TextSelection};

const DISCARD_PROMPT: &str = "You have unsaved changes. Discard them?";

/// What [`NotesEditorController::close`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    Closed,
    /// The user kept the unsaved draft.
    Declined,
    NotOpen,
}

pub struct NotesEditorController {
    gateway: Arc<dyn NotesGateway>,
    notifier: Arc<dyn Notifier>,
    confirmer: Arc<dyn Confirmer>,
    config: ExplorerConfig,
    draft: Option<NotesDraft>,
}

impl NotesEditorController {
    pub fn new(
        gateway: Arc<dyn NotesGateway>,
        notifier: Arc<dyn Notifier>,
        confirmer: Arc<dyn Confirmer>,
        config: ExplorerConfig,
    ) -> Self {
        Self {
            gateway,
            notifier,
            confirmer,
            config,
            draft: None,
        }
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    pub fn draft(&self) -> Option<&NotesDraft> {
        self.draft.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.draft.is_some()
    }

    pub fn is_dirty(&self) -> bool {
        self.draft.as_ref().is_some_and(NotesDraft::is_dirty)
    }

    pub fn status(&self) -> Option<AutoSaveStatus> {
        self.draft.as_ref().map(NotesDraft::status)
    }

    pub fn stats(&self) -> TextStats {
        self.draft.as_ref().map(NotesDraft::stats).unwrap_or_default()
    }

    /// Opens a draft for `model` with its persisted notes and backup list.
    ///
    /// Returns `false` when a dirty draft is open and the user keeps it. A clean draft is
    /// replaced silently. A failed load leaves the open draft in place.
    pub async fn edit(&mut self, model: Option<&ModelRecord>) -> Result<bool, ExplorerError> {
        let Some(model) = model else {
            self.notifier
                .notify(NoticeLevel::Warning, "Please select a model first");
            return Err(ValidationError::NoModel.into());
        };

        if let Some(open) = self.draft.as_ref().filter(|draft| draft.is_dirty()) {
            if !self.confirmer.confirm(DISCARD_PROMPT).await {
                debug!(model_id = %open.model_id(), "kept unsaved notes instead of switching");
                return Ok(false);
            }
        }

        let payload = match self.gateway.load(model.id()).await {
            Ok(payload) => payload,
            Err(GatewayError::NotFound(_)) => NotesPayload::default(),
            Err(err) => {
                error!(model_id = %model.id(), error = %err, "failed to load notes");
                self.notifier
                    .notify(NoticeLevel::Error, &format!("Failed to load notes: {err}"));
                return Err(err.into());
            }
        };

        let backups = cap_backups(payload.backups, self.config.max_backups);
        self.draft = Some(NotesDraft::open(model.id().clone(), payload.content, backups));
        Ok(true)
    }

    /// Replaces the draft content. Returns `false` when no draft is open.
    pub fn on_content_change(&mut self, content: impl Into<String>) -> bool {
        match self.draft.as_mut() {
            Some(draft) => {
                draft.set_content(content.into());
                true
            }
            None => false,
        }
    }

    /// Persists the draft and writes the notes back onto the catalog record.
    ///
    /// Returns the save time. On failure the content is kept and the draft stays dirty.
    pub async fn save(&mut self, catalog: &mut CatalogStore) -> Result<DateTime<Utc>, ExplorerError> {
        let max_chars = self.config.max_notes_chars;
        let max_backups = self.config.max_backups;
        let create_backup = self.config.backup_on_save;

        let draft = self.require_draft()?;
        let model_id = draft.model_id().clone();
        let content = draft.content().to_owned();
        if let Err(err) = validate_notes(&content, max_chars) {
            warn!(model_id = %model_id, error = %err, "refusing to save notes");
            self.notifier.notify(NoticeLevel::Warning, &err.to_string());
            return Err(err.into());
        }
        draft.begin_saving();

        let result = match self.gateway.save(&model_id, &content, create_backup).await {
            Ok(reply) if reply.is_success() => Ok(()),
            Ok(reply) => Err(GatewayError::Rejected(
                reply
                    .message
                    .unwrap_or_else(|| "save was rejected".to_owned()),
            )),
            Err(err) => Err(err),
        };

        if let Err(err) = result {
            if let Some(draft) = self.draft.as_mut() {
                draft.mark_save_failed();
            }
            error!(model_id = %model_id, error = %err, "failed to save notes");
            self.notifier
                .notify(NoticeLevel::Error, &format!("Failed to save notes: {err}"));
            return Err(err.into());
        }

        let saved_at = Utc::now();
        if let Some(draft) = self.draft.as_mut() {
            draft.mark_saved(content.clone(), saved_at);
        }
        catalog.apply_saved_notes(&model_id, &content);

        match self.gateway.load(&model_id).await {
            Ok(payload) => {
                if let Some(draft) = self.draft.as_mut() {
                    draft.set_backups(cap_backups(payload.backups, max_backups));
                }
            }
            Err(err) => {
                warn!(model_id = %model_id, error = %err, "failed to refresh backups after save");
            }
        }

        self.notifier
            .notify(NoticeLevel::Success, "Notes saved successfully");
        Ok(saved_at)
    }

    /// Saves, then closes the editor if the save went through.
    pub async fn save_and_close(
        &mut self,
        catalog: &mut CatalogStore,
    ) -> Result<DateTime<Utc>, ExplorerError> {
        let saved_at = self.save(catalog).await?;
        self.close().await;
        Ok(saved_at)
    }

    /// Drops the draft, asking first when it has unsaved changes.
    pub async fn close(&mut self) -> CloseOutcome {
        let Some(draft) = self.draft.as_ref() else {
            return CloseOutcome::NotOpen;
        };
        if draft.is_dirty() && !self.confirmer.confirm(DISCARD_PROMPT).await {
            debug!(model_id = %draft.model_id(), "kept unsaved notes");
            return CloseOutcome::Declined;
        }
        self.draft = None;
        CloseOutcome::Closed
    }

    /// Flips the template picker and returns whether it is now open.
    pub fn toggle_template_picker(&mut self) -> Result<bool, ValidationError> {
        let draft = self.require_draft()?;
        let open = !draft.template_picker_open();
        draft.set_template_picker_open(open);
        Ok(open)
    }

    pub async fn list_templates(&self) -> Result<Vec<TemplateInfo>, ExplorerError> {
        self.gateway.templates().await.map_err(|err| {
            error!(error = %err, "failed to list templates");
            self.notifier
                .notify(NoticeLevel::Error, &format!("Failed to load templates: {err}"));
            err.into()
        })
    }

    /// Replaces the draft content with the rendered template and closes the picker.
    pub async fn apply_template(&mut self, template_id: &TemplateId) -> Result<(), ExplorerError> {
        let model_id = self.require_draft()?.model_id().clone();

        let body = match self.gateway.template(&model_id, template_id).await {
            Ok(body) => body,
            Err(err) => {
                error!(model_id = %model_id, template = %template_id, error = %err, "failed to load template");
                self.notifier
                    .notify(NoticeLevel::Error, &format!("Failed to load template: {err}"));
                return Err(err.into());
            }
        };

        if let Some(draft) = self.draft.as_mut() {
            draft.set_content(body);
            draft.set_template_picker_open(false);
        }
        self.notifier.notify(NoticeLevel::Info, "Template applied");
        Ok(())
    }

    /// Wraps `selection` in `before`/`after` and returns the caret to restore.
    pub fn insert_formatting(
        &mut self,
        before: &str,
        after: &str,
        selection: TextSelection,
    ) -> Result<usize, ValidationError> {
        let draft = self.require_draft()?;
        let edit = format::wrap_selection(draft.content(), selection, before, after);
        draft.set_content(edit.content);
        Ok(edit.caret)
    }

    /// Replaces `selection` with `text` and returns the caret to restore.
    pub fn insert_text(
        &mut self,
        text: &str,
        selection: TextSelection,
    ) -> Result<usize, ValidationError> {
        let draft = self.require_draft()?;
        let edit = format::insert_at(draft.content(), selection, text);
        draft.set_content(edit.content);
        Ok(edit.caret)
    }

    /// Restores a backup on the backend, then reloads the draft from it.
    ///
    /// The draft is replaced only once both the restore and the reload succeeded.
    pub async fn restore_backup(
        &mut self,
        backup_id: &BackupId,
        catalog: &mut CatalogStore,
    ) -> Result<(), ExplorerError> {
        let model_id = self.require_draft()?.model_id().clone();

        if let Err(err) = self.gateway.restore(&model_id, backup_id).await {
            error!(model_id = %model_id, backup_id = %backup_id, error = %err, "failed to restore backup");
            self.notifier
                .notify(NoticeLevel::Error, &format!("Failed to restore backup: {err}"));
            return Err(err.into());
        }

        let payload = match self.gateway.load(&model_id).await {
            Ok(payload) => payload,
            Err(err) => {
                error!(model_id = %model_id, error = %err, "failed to reload notes after restore");
                self.notifier.notify(
                    NoticeLevel::Error,
                    &format!("Backup restored but notes could not be reloaded: {err}"),
                );
                return Err(err.into());
            }
        };

        catalog.apply_saved_notes(&model_id, &payload.content);
        let backups = cap_backups(payload.backups, self.config.max_backups);
        if let Some(draft) = self.draft.as_mut() {
            draft.reload(payload.content, backups);
        }
        self.notifier
            .notify(NoticeLevel::Success, "Backup restored successfully");
        Ok(())
    }

    /// Fetches every model's notes for backup or migration.
    pub async fn export_notes(&self) -> Result<NotesExport, ExplorerError> {
        match self.gateway.export().await {
            Ok(export) => {
                self.notifier.notify(
                    NoticeLevel::Success,
                    &format!("Exported notes for {} models", export.notes.len()),
                );
                Ok(export)
            }
            Err(err) => {
                error!(error = %err, "failed to export notes");
                self.notifier
                    .notify(NoticeLevel::Error, &format!("Failed to export notes: {err}"));
                Err(err.into())
            }
        }
    }

    fn require_draft(&mut self) -> Result<&mut NotesDraft, ValidationError> {
        match self.draft.as_mut() {
            Some(draft) => Ok(draft),
            None => {
                self.notifier
                    .notify(NoticeLevel::Warning, "No notes editor is open");
                Err(ValidationError::NoDraft)
            }
        }
    }
}

/// NUL is reported ahead of length when both fail.
fn validate_notes(content: &str, limit: usize) -> Result<(), ValidationError> {
    if content.contains('\0') {
        return Err(ValidationError::NulCharacter);
    }
    let actual = content.chars().count();
    if actual > limit {
        return Err(ValidationError::ContentTooLong { limit, actual });
    }
    Ok(())
}

fn cap_backups(mut backups: Vec<BackupEntry>, limit: usize) -> Vec<BackupEntry> {
    backups.truncate(limit);
    backups
}
