// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Modelshelf-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Modelshelf and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Global keyboard routing.
//!
//! The dispatcher holds no explorer state. It maps a key event plus a [`DispatchView`] snapshot
//! to at most one [`KeyAction`]; the explorer executes it.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::catalog::Direction;
use crate::config::ExplorerConfig;

/// Which widget has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Focus {
    #[default]
    List,
    SearchInput,
    NotesEditor,
    /// An input inside the settings modal.
    SettingsField,
}

/// The slice of explorer state routing depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchView {
    pub settings_open: bool,
    pub focus: Focus,
    pub search_active: bool,
    pub has_selection: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    CloseSettings,
    ClearSearch,
    ClearSelection,
    SaveSettings,
    OpenNotesEditor,
    FocusSearch,
    Navigate(Direction),
}

impl KeyAction {
    /// Whether the host should swallow the key's default behaviour (scrolling, browser find).
    pub fn suppresses_default(self) -> bool {
        matches!(self, Self::Navigate(_) | Self::FocusSearch)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyboardDispatcher {
    find_key: char,
}

impl Default for KeyboardDispatcher {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_FIND_KEY)
    }
}

impl KeyboardDispatcher {
    pub fn new(find_key: char) -> Self {
        Self { find_key }
    }

    pub fn from_config(config: &ExplorerConfig) -> Self {
        Self::new(config.find_key)
    }

    /// Routes `key`. The first matching rule wins:
    ///
    /// 1. `Esc` closes settings, else clears the search, else clears the selection.
    /// 2. With settings open, only `Enter` on a settings field does anything.
    /// 3. `F2` opens the notes editor for the selected model.
    /// 4. `Ctrl` + the find key focuses the search box.
    /// 5. `Down`/`Up` move the selection.
    pub fn route(&self, key: &KeyEvent, view: &DispatchView) -> Option<KeyAction> {
        if key.kind == KeyEventKind::Release {
            return None;
        }

        if key.code == KeyCode::Esc {
            return Some(if view.settings_open {
                KeyAction::CloseSettings
            } else if view.search_active {
                KeyAction::ClearSearch
            } else {
                KeyAction::ClearSelection
            });
        }

        if view.settings_open {
            let save = key.code == KeyCode::Enter && view.focus == Focus::SettingsField;
            return save.then_some(KeyAction::SaveSettings);
        }

        match key.code {
            KeyCode::F(2) if view.has_selection => Some(KeyAction::OpenNotesEditor),
            KeyCode::Char(ch) if self.is_find_chord(ch, key.modifiers) => {
                Some(KeyAction::FocusSearch)
            }
            KeyCode::Down => Some(KeyAction::Navigate(Direction::Next)),
            KeyCode::Up => Some(KeyAction::Navigate(Direction::Prev)),
            _ => None,
        }
    }

    fn is_find_chord(&self, ch: char, modifiers: KeyModifiers) -> bool {
        modifiers.contains(KeyModifiers::CONTROL) && ch.eq_ignore_ascii_case(&self.find_key)
    }
}
