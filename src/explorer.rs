// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Modelshelf-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Modelshelf and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The explorer state a view layer renders from and forwards events to.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use crossterm::event::KeyEvent;
use tracing::debug;

use crate::catalog::CatalogStore;
use crate::error::ExplorerError;
use crate::host::ViewHooks;
use crate::keys::{DispatchView, Focus, KeyAction, KeyboardDispatcher};
use crate::model::BackupId;
use crate::notes::{CloseOutcome, NotesEditorController};

/// What [`Explorer::handle_key`] did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyOutcome {
    pub action: Option<KeyAction>,
    pub suppress_default: bool,
}

pub struct Explorer {
    catalog: CatalogStore,
    editor: NotesEditorController,
    hooks: Arc<dyn ViewHooks>,
    dispatcher: KeyboardDispatcher,
    settings_open: bool,
    focus: Focus,
    connected: bool,
}

impl Explorer {
    pub fn new(
        catalog: CatalogStore,
        editor: NotesEditorController,
        hooks: Arc<dyn ViewHooks>,
    ) -> Self {
        let dispatcher = KeyboardDispatcher::from_config(editor.config());
        Self {
            catalog,
            editor,
            hooks,
            dispatcher,
            settings_open: false,
            focus: Focus::default(),
            connected: false,
        }
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut CatalogStore {
        &mut self.catalog
    }

    pub fn editor(&self) -> &NotesEditorController {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut NotesEditorController {
        &mut self.editor
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
    }

    pub fn settings_open(&self) -> bool {
        self.settings_open
    }

    pub fn open_settings(&mut self) {
        self.settings_open = true;
    }

    pub fn close_settings(&mut self) {
        self.settings_open = false;
        if self.focus == Focus::SettingsField {
            self.focus = Focus::List;
        }
        self.hooks.close_settings();
    }

    /// Backend reachability as last reported by the host's poller.
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
    }

    pub fn dispatch_view(&self) -> DispatchView {
        DispatchView {
            settings_open: self.settings_open,
            focus: self.focus,
            search_active: self.catalog.criteria().has_search(),
            has_selection: self.catalog.selected().is_some(),
        }
    }

    /// Routes `key` and runs the resulting action.
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<KeyOutcome, ExplorerError> {
        let Some(action) = self.dispatcher.route(&key, &self.dispatch_view()) else {
            return Ok(KeyOutcome::default());
        };
        debug!(?action, "dispatching key action");

        match action {
            KeyAction::CloseSettings => self.close_settings(),
            KeyAction::ClearSearch => self.catalog.clear_search(),
            KeyAction::ClearSelection => self.catalog.clear_selection(),
            KeyAction::SaveSettings => self.hooks.save_settings(),
            KeyAction::OpenNotesEditor => {
                self.open_notes_editor().await?;
            }
            KeyAction::FocusSearch => {
                self.focus = Focus::SearchInput;
                self.hooks.focus_search();
            }
            KeyAction::Navigate(direction) => self.catalog.navigate_models(direction).await,
        }

        Ok(KeyOutcome {
            action: Some(action),
            suppress_default: action.suppresses_default(),
        })
    }

    /// Opens the notes editor on the selected model. Returns `false` when the user kept an
    /// unsaved draft instead.
    pub async fn open_notes_editor(&mut self) -> Result<bool, ExplorerError> {
        let selected = self.catalog.selected().cloned();
        let opened = self.editor.edit(selected.as_ref()).await?;
        if opened {
            self.focus = Focus::NotesEditor;
        }
        Ok(opened)
    }

    pub async fn save_notes(&mut self) -> Result<DateTime<Utc>, ExplorerError> {
        self.editor.save(&mut self.catalog).await
    }

    pub async fn save_and_close_notes(&mut self) -> Result<DateTime<Utc>, ExplorerError> {
        let saved_at = self.editor.save_and_close(&mut self.catalog).await?;
        self.leave_editor_focus();
        Ok(saved_at)
    }

    pub async fn close_notes(&mut self) -> CloseOutcome {
        let outcome = self.editor.close().await;
        if outcome == CloseOutcome::Closed {
            self.leave_editor_focus();
        }
        outcome
    }

    pub async fn restore_backup(&mut self, backup_id: &BackupId) -> Result<(), ExplorerError> {
        self.editor.restore_backup(backup_id, &mut self.catalog).await
    }

    fn leave_editor_focus(&mut self) {
        if self.focus == Focus::NotesEditor {
            self.focus = Focus::List;
        }
    }
}
