// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Modelshelf-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Modelshelf and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use rstest::{fixture, rstest};
use tracing_test::traced_test;

use super::{CatalogStore, Direction};
use crate::gateway::memory::{MemoryGateway, Operation};
use crate::gateway::GatewayError;
use crate::model::fixtures::{mid, model, small_library};
use crate::model::ModelRecord;

struct CatalogCtx {
    gateway: Arc<MemoryGateway>,
    store: CatalogStore,
}

impl CatalogCtx {
    fn new(models: Vec<ModelRecord>) -> Self {
        let gateway = Arc::new(MemoryGateway::new(models));
        let store = CatalogStore::new(gateway.clone());
        Self { gateway, store }
    }

    async fn loaded(models: Vec<ModelRecord>) -> Self {
        let mut ctx = Self::new(models);
        ctx.store.load_models().await.expect("load models");
        ctx
    }
}

#[fixture]
fn library() -> Vec<ModelRecord> {
    small_library()
}

fn visible_ids(store: &CatalogStore) -> Vec<String> {
    store.filtered().map(|model| model.id().to_string()).collect()
}

fn selected_id(store: &CatalogStore) -> Option<String> {
    store.selected().map(|model| model.id().to_string())
}

#[rstest]
#[tokio::test]
async fn load_selects_first_model_and_shows_everything(library: Vec<ModelRecord>) {
    let ctx = CatalogCtx::loaded(library).await;

    assert_eq!(ctx.store.models().len(), 5);
    assert_eq!(visible_ids(&ctx.store), ["a", "b", "c", "d", "e"]);
    assert_eq!(selected_id(&ctx.store).as_deref(), Some("a"));
}

#[rstest]
#[tokio::test]
async fn load_keeps_an_existing_selection(library: Vec<ModelRecord>) {
    let mut ctx = CatalogCtx::loaded(library).await;
    let c = ctx.store.find(&mid("c")).cloned();
    ctx.store.select_model(c.as_ref()).await;

    ctx.store.load_models().await.expect("reload");
    assert_eq!(selected_id(&ctx.store).as_deref(), Some("c"));
}

#[rstest]
#[tokio::test]
async fn reload_keeps_detail_and_takes_listed_notes(library: Vec<ModelRecord>) {
    let mut ctx = CatalogCtx::loaded(library).await;
    ctx.gateway
        .insert_detail(
            model("b", "Detail Tweaker", "lora").with_extra("base_model", serde_json::json!("SD 1.5")),
        )
        .await;
    let b = ctx.store.find(&mid("b")).cloned();
    ctx.store.select_model(b.as_ref()).await;

    let mut relisted = small_library();
    relisted[1].set_notes("use at 0.7 weight");
    ctx.gateway.replace_models(relisted).await;
    ctx.store.load_models().await.expect("reload");

    let selected = ctx.store.selected().expect("selected");
    assert!(selected.extra().contains_key("base_model"));
    assert_eq!(selected.notes(), "use at 0.7 weight");
}

#[rstest]
#[tokio::test]
async fn reload_drops_a_selection_that_disappeared(library: Vec<ModelRecord>) {
    let mut ctx = CatalogCtx::loaded(library).await;
    let c = ctx.store.find(&mid("c")).cloned();
    ctx.store.select_model(c.as_ref()).await;

    ctx.gateway.replace_models(vec![model("x", "Fresh", "lora")]).await;
    ctx.store.load_models().await.expect("reload");
    assert_eq!(selected_id(&ctx.store).as_deref(), Some("x"));
}

#[tokio::test]
async fn load_of_empty_catalog_selects_nothing() {
    let ctx = CatalogCtx::loaded(Vec::new()).await;
    assert!(ctx.store.selected().is_none());
    assert_eq!(ctx.store.filtered_len(), 0);
}

#[rstest]
#[tokio::test]
#[traced_test]
async fn load_failure_clears_the_list_and_returns_the_error(library: Vec<ModelRecord>) {
    let mut ctx = CatalogCtx::loaded(library).await;
    ctx.gateway.fail(Operation::List).await;

    let err = ctx.store.load_models().await.unwrap_err();
    assert!(matches!(err, GatewayError::Transport(_)));
    assert!(ctx.store.models().is_empty());
    assert_eq!(ctx.store.filtered_len(), 0);
    assert!(ctx.store.selected().is_none());
    assert!(logs_contain("failed to load models"));
}

#[rstest]
#[case("", "all", &["a", "b", "c", "d", "e"])]
#[case("jugger", "all", &["a", "d"])]
#[case("LORA", "all", &["b"])]
#[case("weight", "all", &["b"])]
#[case("", "checkpoint", &["a", "e"])]
#[case("jugger", "checkpoint", &["a"])]
#[case("jugger", "vae", &[])]
#[case("   ", "Controlnet", &["d"])]
#[tokio::test]
async fn filter_applies_search_then_type(
    library: Vec<ModelRecord>,
    #[case] query: &str,
    #[case] model_type: &str,
    #[case] expected: &[&str],
) {
    let mut ctx = CatalogCtx::loaded(library).await;
    ctx.store.set_search_query(query);
    ctx.store.set_filter(model_type);

    assert_eq!(visible_ids(&ctx.store), expected);
}

#[rstest]
#[tokio::test]
async fn filtering_is_idempotent_and_leaves_models_untouched(library: Vec<ModelRecord>) {
    let mut ctx = CatalogCtx::loaded(library.clone()).await;
    ctx.store.set_search_query("e");

    let first = visible_ids(&ctx.store);
    ctx.store.filter_models();
    assert_eq!(visible_ids(&ctx.store), first);
    assert_eq!(ctx.store.models(), library.as_slice());
}

#[rstest]
#[tokio::test]
async fn clear_search_restores_the_type_filtered_view(library: Vec<ModelRecord>) {
    let mut ctx = CatalogCtx::loaded(library).await;
    ctx.store.set_filter("checkpoint");
    ctx.store.set_search_query("dream");
    assert_eq!(visible_ids(&ctx.store), ["e"]);

    ctx.store.clear_search();
    assert_eq!(visible_ids(&ctx.store), ["a", "e"]);
    assert!(!ctx.store.criteria().has_search());
}

#[rstest]
#[tokio::test]
async fn select_replaces_optimistic_record_with_detail(library: Vec<ModelRecord>) {
    let mut ctx = CatalogCtx::loaded(library).await;
    ctx.gateway
        .insert_detail(
            model("b", "Detail Tweaker", "lora")
                .with_notes("use at 0.5 weight")
                .with_extra("tags_list", serde_json::json!(["detail"])),
        )
        .await;

    let b = ctx.store.find(&mid("b")).cloned();
    assert!(ctx.store.select_model(b.as_ref()).await);

    let selected = ctx.store.selected().expect("selected");
    assert!(selected.extra().contains_key("tags_list"));
}

#[rstest]
#[tokio::test]
#[traced_test]
async fn detail_failure_keeps_optimistic_selection(library: Vec<ModelRecord>) {
    let mut ctx = CatalogCtx::loaded(library).await;
    ctx.gateway.fail(Operation::Detail).await;

    let c = ctx.store.find(&mid("c")).cloned();
    assert!(!ctx.store.select_model(c.as_ref()).await);
    assert_eq!(selected_id(&ctx.store).as_deref(), Some("c"));
    assert!(logs_contain("failed to fetch model detail"));
}

#[rstest]
#[tokio::test]
#[traced_test]
async fn selecting_nothing_is_rejected_without_changing_selection(library: Vec<ModelRecord>) {
    let mut ctx = CatalogCtx::loaded(library).await;

    assert!(!ctx.store.select_model(None).await);
    assert_eq!(selected_id(&ctx.store).as_deref(), Some("a"));
    assert!(logs_contain("ignoring selection of a missing model"));
}

#[rstest]
#[tokio::test]
async fn stale_detail_response_does_not_overwrite_newer_selection(library: Vec<ModelRecord>) {
    let mut ctx = CatalogCtx::loaded(library).await;
    let b = ctx.store.find(&mid("b")).cloned();
    let c = ctx.store.find(&mid("c")).cloned();

    let stale = ctx.store.begin_select(b.as_ref()).expect("ticket for b");
    let fresh = ctx.store.begin_select(c.as_ref()).expect("ticket for c");

    let detailed_b = model("b", "Detail Tweaker v2", "lora");
    assert!(!ctx.store.complete_select(stale, Ok(detailed_b)));
    assert_eq!(selected_id(&ctx.store).as_deref(), Some("c"));

    let detailed_c = model("c", "sdxl-vae-fp16 (fixed)", "vae");
    assert!(ctx.store.complete_select(fresh, Ok(detailed_c)));
    assert_eq!(ctx.store.selected().map(ModelRecord::name), Some("sdxl-vae-fp16 (fixed)"));
}

#[rstest]
#[tokio::test]
async fn detail_for_another_id_is_ignored(library: Vec<ModelRecord>) {
    let mut ctx = CatalogCtx::loaded(library).await;
    let b = ctx.store.find(&mid("b")).cloned();
    let ticket = ctx.store.begin_select(b.as_ref()).expect("ticket");

    assert!(!ctx.store.complete_select(ticket, Ok(model("c", "other", "vae"))));
    assert_eq!(selected_id(&ctx.store).as_deref(), Some("b"));
}

#[rstest]
#[tokio::test]
async fn clearing_selection_invalidates_pending_detail(library: Vec<ModelRecord>) {
    let mut ctx = CatalogCtx::loaded(library).await;
    let b = ctx.store.find(&mid("b")).cloned();
    let ticket = ctx.store.begin_select(b.as_ref()).expect("ticket");

    ctx.store.clear_selection();
    assert!(!ctx.store.complete_select(ticket, Ok(model("b", "late", "lora"))));
    assert!(ctx.store.selected().is_none());
}

#[rstest]
#[case("c", Direction::Next, "d")]
#[case("e", Direction::Next, "a")]
#[case("a", Direction::Prev, "e")]
#[case("c", Direction::Prev, "b")]
#[tokio::test]
async fn navigation_wraps_around_the_visible_list(
    library: Vec<ModelRecord>,
    #[case] from: &str,
    #[case] direction: Direction,
    #[case] expected: &str,
) {
    let mut ctx = CatalogCtx::loaded(library).await;
    let start = ctx.store.find(&mid(from)).cloned();
    ctx.store.select_model(start.as_ref()).await;

    ctx.store.navigate_models(direction).await;
    assert_eq!(selected_id(&ctx.store).as_deref(), Some(expected));
}

#[rstest]
#[tokio::test]
async fn navigation_stays_inside_the_filtered_list(library: Vec<ModelRecord>) {
    let mut ctx = CatalogCtx::loaded(library).await;
    ctx.store.set_search_query("t");
    let visible = visible_ids(&ctx.store);
    assert_eq!(visible, ["a", "b", "d", "e"]);

    ctx.store.set_filter("checkpoint");
    assert_eq!(visible_ids(&ctx.store), ["a", "e"]);

    let e = ctx.store.find(&mid("e")).cloned();
    ctx.store.select_model(e.as_ref()).await;
    ctx.store.navigate_models(Direction::Next).await;
    assert_eq!(selected_id(&ctx.store).as_deref(), Some("a"));
    ctx.store.navigate_models(Direction::Prev).await;
    assert_eq!(selected_id(&ctx.store).as_deref(), Some("e"));
}

#[rstest]
#[tokio::test]
async fn navigation_from_hidden_selection_starts_at_the_ends(library: Vec<ModelRecord>) {
    let mut ctx = CatalogCtx::loaded(library).await;
    ctx.store.set_filter("lora");
    // "a" stays selected but is filtered out.
    ctx.store.navigate_models(Direction::Next).await;
    assert_eq!(selected_id(&ctx.store).as_deref(), Some("b"));

    ctx.store.set_filter("checkpoint");
    ctx.store.navigate_models(Direction::Prev).await;
    assert_eq!(selected_id(&ctx.store).as_deref(), Some("e"));
}

#[tokio::test]
async fn navigation_on_empty_view_is_a_no_op() {
    let mut ctx = CatalogCtx::loaded(small_library()).await;
    ctx.store.set_search_query("no such model");

    ctx.store.navigate_models(Direction::Next).await;
    assert_eq!(selected_id(&ctx.store).as_deref(), Some("a"));
    assert_eq!(ctx.gateway.calls(Operation::Detail).await, 1);
}

#[rstest]
#[tokio::test]
async fn saved_notes_update_record_selection_and_search(library: Vec<ModelRecord>) {
    let mut ctx = CatalogCtx::loaded(library).await;
    let c = ctx.store.find(&mid("c")).cloned();
    ctx.store.select_model(c.as_ref()).await;
    ctx.store.set_search_query("washed out");
    assert_eq!(ctx.store.filtered_len(), 0);

    assert!(ctx.store.apply_saved_notes(&mid("c"), "fixes washed out colors"));

    let record = ctx.store.find(&mid("c")).expect("record");
    assert!(record.has_notes());
    assert_eq!(ctx.store.selected().map(ModelRecord::notes), Some("fixes washed out colors"));
    assert_eq!(visible_ids(&ctx.store), ["c"]);

    assert!(!ctx.store.apply_saved_notes(&mid("zz"), "x"));
}

#[rstest]
#[tokio::test]
async fn type_counts_fold_case(library: Vec<ModelRecord>) {
    let ctx = CatalogCtx::loaded(library).await;
    let counts = ctx.store.type_counts();

    assert_eq!(counts.get("checkpoint"), Some(&2));
    assert_eq!(counts.get("lora"), Some(&1));
    assert_eq!(ctx.store.available_types(), ["checkpoint", "controlnet", "lora", "vae"]);
}
