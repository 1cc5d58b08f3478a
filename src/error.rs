// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Modelshelf-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Modelshelf and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Error taxonomy shared by the catalog and the notes editor.
//!
//! A declined discard confirmation is not an error; see [`crate::notes::CloseOutcome`].

use thiserror::Error;

/// Talking to a gateway failed, or the backend answered with something unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The request never produced a response (connection refused, timeout, ...).
    #[error("request failed: {0}")]
    Transport(String),

    /// The backend answered with an error status.
    #[error("{0}")]
    Rejected(String),

    /// The response body could not be decoded.
    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("not found: {0}")]
    NotFound(String),
}

/// An operation was invoked without the state or arguments it needs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no model selected")]
    NoModel,

    #[error("no notes editor is open")]
    NoDraft,

    #[error("notes exceed the maximum length of {limit} characters ({actual})")]
    ContentTooLong { limit: usize, actual: usize },

    #[error("notes contain null characters")]
    NulCharacter,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExplorerError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
