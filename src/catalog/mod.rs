// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Modelshelf-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Modelshelf and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The model catalog: the loaded list, the active filter, and the selection.
//!
//! Filtering produces indices into `models`, so the visible list always refers to the canonical
//! records. The selection is a copy because a detail fetch may enrich it, but it is always
//! identified by id.
//!
//! Detail fetches are tagged with a [`DetailTicket`]. A response for a selection that has since
//! changed is dropped instead of clobbering the newer selection.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::gateway::{GatewayError, ModelGateway};
use crate::model::{FilterCriteria, ModelId, ModelRecord, TypeFilter};

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Next,
    Prev,
}

impl Direction {
    fn step(self, index: Option<usize>, len: usize) -> usize {
        match (self, index) {
            (Self::Next, Some(index)) if index + 1 < len => index + 1,
            (Self::Next, _) => 0,
            (Self::Prev, Some(index)) if index > 0 => index - 1,
            // -1 + -1 wraps to the last entry, same as stepping back from the first.
            (Self::Prev, _) => len - 1,
        }
    }
}

/// Identifies the selection a detail request was issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailTicket {
    id: ModelId,
    generation: u64,
}

impl DetailTicket {
    pub fn model_id(&self) -> &ModelId {
        &self.id
    }
}

pub struct CatalogStore {
    gateway: Arc<dyn ModelGateway>,
    models: Vec<ModelRecord>,
    criteria: FilterCriteria,
    visible: Vec<usize>,
    selected: Option<ModelRecord>,
    generation: u64,
}

impl CatalogStore {
    pub fn new(gateway: Arc<dyn ModelGateway>) -> Self {
        Self {
            gateway,
            models: Vec::new(),
            criteria: FilterCriteria::default(),
            visible: Vec::new(),
            selected: None,
            generation: 0,
        }
    }

    pub fn gateway(&self) -> Arc<dyn ModelGateway> {
        Arc::clone(&self.gateway)
    }

    pub fn models(&self) -> &[ModelRecord] {
        &self.models
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn selected(&self) -> Option<&ModelRecord> {
        self.selected.as_ref()
    }

    pub fn find(&self, id: &ModelId) -> Option<&ModelRecord> {
        self.models.iter().find(|model| model.id() == id)
    }

    /// The visible subset, in catalog order.
    pub fn filtered(&self) -> impl Iterator<Item = &ModelRecord> + '_ {
        self.visible.iter().filter_map(|&index| self.models.get(index))
    }

    pub fn filtered_len(&self) -> usize {
        self.visible.len()
    }

    /// Replaces the catalog from the gateway.
    ///
    /// On failure the list is emptied rather than left stale and the error is returned. On
    /// success the first model is selected when nothing was, and the filter is re-applied.
    pub async fn load_models(&mut self) -> Result<usize, GatewayError> {
        let gateway = self.gateway();
        match gateway.list().await {
            Ok(models) => {
                self.models = models;
                self.retain_selection_if_listed();
                self.filter_models();
                if self.selected.is_none() {
                    if let Some(first) = self.models.first().cloned() {
                        self.select_model(Some(&first)).await;
                    }
                }
                Ok(self.models.len())
            }
            Err(err) => {
                error!(error = %err, "failed to load models");
                self.models.clear();
                self.clear_selection();
                self.filter_models();
                Err(err)
            }
        }
    }

    /// Keeps the selected record (detail included) while its id is still listed, taking the
    /// listed notes so the selection and the catalog agree.
    fn retain_selection_if_listed(&mut self) {
        let Some(selected) = self.selected.as_ref() else {
            return;
        };
        match self.find(selected.id()).map(|fresh| fresh.notes().to_owned()) {
            Some(notes) => {
                if let Some(selected) = self.selected.as_mut() {
                    selected.set_notes(notes);
                }
            }
            None => {
                debug!(model_id = %selected.id(), "selected model disappeared after reload");
                self.clear_selection();
            }
        }
    }

    /// Recomputes the visible subset from `models`. Idempotent; never touches `models`.
    pub fn filter_models(&mut self) -> usize {
        let criteria = &self.criteria;
        self.visible = self
            .models
            .iter()
            .enumerate()
            .filter(|(_, model)| criteria.matches(model))
            .map(|(index, _)| index)
            .collect();
        self.visible.len()
    }

    pub fn set_filter(&mut self, model_type: impl Into<String>) {
        self.criteria.type_filter = TypeFilter::new(model_type);
        self.filter_models();
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.criteria.search_query = query.into();
        self.filter_models();
    }

    pub fn clear_search(&mut self) {
        self.criteria.search_query.clear();
        self.filter_models();
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Selects `model` immediately and returns the ticket its detail fetch must present.
    pub fn begin_select(&mut self, model: Option<&ModelRecord>) -> Option<DetailTicket> {
        let Some(model) = model else {
            warn!("ignoring selection of a missing model");
            return None;
        };
        self.generation = self.generation.wrapping_add(1);
        self.selected = Some(model.clone());
        Some(DetailTicket {
            id: model.id().clone(),
            generation: self.generation,
        })
    }

    /// Applies a detail response. Returns whether the selection was replaced.
    ///
    /// A failed fetch keeps the optimistic record selected.
    pub fn complete_select(
        &mut self,
        ticket: DetailTicket,
        result: Result<ModelRecord, GatewayError>,
    ) -> bool {
        if ticket.generation != self.generation {
            debug!(model_id = %ticket.id, "discarding stale model detail");
            return false;
        }
        match result {
            Ok(detail) if detail.id() == &ticket.id => {
                self.selected = Some(detail);
                true
            }
            Ok(detail) => {
                warn!(
                    model_id = %ticket.id,
                    returned = %detail.id(),
                    "model detail answered for a different id"
                );
                false
            }
            Err(err) => {
                warn!(model_id = %ticket.id, error = %err, "failed to fetch model detail");
                false
            }
        }
    }

    /// Selects `model` optimistically, then swaps in the detailed record if it arrives while
    /// the selection is unchanged.
    pub async fn select_model(&mut self, model: Option<&ModelRecord>) -> bool {
        let Some(ticket) = self.begin_select(model) else {
            return false;
        };
        let gateway = self.gateway();
        let result = gateway.detail(ticket.model_id()).await;
        self.complete_select(ticket, result)
    }

    /// Moves the selection through the visible list, wrapping at both ends.
    pub async fn navigate_models(&mut self, direction: Direction) {
        let len = self.visible.len();
        if len == 0 {
            return;
        }
        let current = self.selected.as_ref().and_then(|selected| {
            self.visible
                .iter()
                .position(|&index| self.models[index].id() == selected.id())
        });
        let target = self.models[self.visible[direction.step(current, len)]].clone();
        self.select_model(Some(&target)).await;
    }

    /// Writes persisted notes onto the catalog record and the selection. Returns whether the
    /// record exists.
    pub fn apply_saved_notes(&mut self, id: &ModelId, notes: &str) -> bool {
        let mut found = false;
        for model in self.models.iter_mut().filter(|model| model.id() == id) {
            model.set_notes(notes);
            found = true;
        }
        if let Some(selected) = self.selected.as_mut().filter(|selected| selected.id() == id) {
            selected.set_notes(notes);
        }
        if found {
            self.filter_models();
        }
        found
    }

    /// Number of models per lower-cased type tag.
    pub fn type_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for model in &self.models {
            *counts.entry(model.model_type().to_lowercase()).or_default() += 1;
        }
        counts
    }

    pub fn available_types(&self) -> Vec<String> {
        self.type_counts().into_keys().collect()
    }
}
