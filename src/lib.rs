// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Modelshelf-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Modelshelf and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Modelshelf: the catalog and notes-editor core of a local AI model library explorer.
//!
//! The crate owns state and interaction rules only. Rendering, the backend and the toast or
//! dialog surfaces are collaborators injected through the traits in [`gateway`] and [`host`].

pub mod catalog;
pub mod config;
pub mod error;
pub mod explorer;
pub mod gateway;
pub mod host;
pub mod keys;
pub mod model;
pub mod notes;

pub use catalog::{CatalogStore, Direction};
pub use config::ExplorerConfig;
pub use error::{ExplorerError, GatewayError, ValidationError};
pub use explorer::{Explorer, KeyOutcome};
pub use notes::{CloseOutcome, NotesEditorController, TextSelection};
