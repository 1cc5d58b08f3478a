// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Modelshelf-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Modelshelf and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! Model records form the catalog; a notes draft is the single in-progress edit of one record's
//! notes. Neither type performs I/O.

pub mod draft;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod filter;
pub mod ids;
pub mod record;

pub use draft::{AutoSaveStatus, BackupEntry, NotesDraft, TextStats};
pub use filter::{FilterCriteria, TypeFilter};
pub use ids::{BackupId, Id, IdError, ModelId, TemplateId};
pub use record::ModelRecord;
