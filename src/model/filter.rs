// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Modelshelf-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Modelshelf and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use super::record::ModelRecord;

const ALL_TYPES: &str = "all";

/// Restricts the catalog to a single model type, or lets every type through.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Only(String),
}

impl TypeFilter {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        if raw.trim().eq_ignore_ascii_case(ALL_TYPES) {
            Self::All
        } else {
            Self::Only(raw)
        }
    }

    pub fn matches(&self, model_type: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(tag) => tag.to_lowercase() == model_type.to_lowercase(),
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL_TYPES),
            Self::Only(tag) => f.write_str(tag),
        }
    }
}

impl FromStr for TypeFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

/// The search box text plus the type dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterCriteria {
    pub search_query: String,
    pub type_filter: TypeFilter,
}

impl FilterCriteria {
    pub fn has_search(&self) -> bool {
        !self.search_query.trim().is_empty()
    }

    /// Search matches name, type or notes (any one suffices); the type filter is ANDed on top.
    pub fn matches(&self, model: &ModelRecord) -> bool {
        self.matches_search(model) && self.type_filter.matches(model.model_type())
    }

    fn matches_search(&self, model: &ModelRecord) -> bool {
        if !self.has_search() {
            return true;
        }
        let needle = self.search_query.to_lowercase();
        [model.name(), model.model_type(), model.notes()]
            .into_iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}
