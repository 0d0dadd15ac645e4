//! Suggestion flow with a scripted completion provider on a real database

mod common;

use common::*;
use server_core::common::Role;
use server_core::domains::buddies::models::CreateBuddyProfile;
use server_core::domains::suggestions::activities::{ai_status, clear_cache, suggest_buddies};
use server_core::domains::suggestions::{SuggestRequest, SuggestionError};
use server_core::kernel::{MockCompletionProvider, TestDependencies};
use test_context::test_context;
use uuid::Uuid;

fn request(newcomer_id: Uuid) -> SuggestRequest {
    SuggestRequest {
        newcomer_id: Some(newcomer_id.to_string()),
    }
}

#[test_context(TestHarness)]
#[tokio::test]
async fn suggestions_keep_only_offered_buddies_and_are_cached(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let hr = create_user(pool, Role::Hr).await.unwrap();
    let newcomer = create_newcomer_with_profile(pool).await.unwrap();
    let strong = create_buddy(
        pool,
        CreateBuddyProfile {
            location: Some("Berlin".into()),
            tech_stack: vec!["Rust".into()],
            ..Default::default()
        },
    )
    .await
    .unwrap();
    let weak = create_buddy_with_capacity(pool, 2).await.unwrap();

    let response = format!(
        r#"Sure! {{"suggestions": [
            {{"buddyId": "{}", "score": 0.35, "reasoning": "Different city"}},
            {{"buddyId": "{}", "score": 1.4, "reasoning": "Same city and stack"}},
            {{"buddyId": "{}", "score": 0.99, "reasoning": "Invented"}}
        ]}}"#,
        weak.id,
        strong.id,
        Uuid::new_v4()
    );
    let test_deps = TestDependencies::new().mock_ai(MockCompletionProvider::new().with_response(response));
    let mock = test_deps.ai.clone().unwrap();
    let deps = ctx.deps(test_deps);

    let result = suggest_buddies(actor(&hr), request(newcomer.id), &deps)
        .await
        .unwrap();
    assert_eq!(result.suggestions.len(), 2);
    assert_eq!(result.suggestions[0].buddy_id, strong.id);
    assert_eq!(result.suggestions[0].score, 1.0);
    assert_eq!(result.suggestions[1].buddy_id, weak.id);
    assert!(result.total_analyzed >= 2);

    // every available buddy was offered
    let prompt = &mock.calls()[0].messages[1].content;
    assert!(prompt.contains(&strong.id.to_string()));
    assert!(prompt.contains(&weak.id.to_string()));

    let cached = suggest_buddies(actor(&hr), request(newcomer.id), &deps)
        .await
        .unwrap();
    assert_eq!(cached, result);
    assert_eq!(mock.call_count(), 1);

    let status = ai_status(actor(&hr), &deps).unwrap();
    assert!(status.configured);
    assert_eq!(status.cache_entries, 1);
    assert_eq!(status.cache_ttl_seconds, 300);

    clear_cache(actor(&hr), &deps).unwrap();
    suggest_buddies(actor(&hr), request(newcomer.id), &deps)
        .await
        .unwrap();
    assert_eq!(mock.call_count(), 2);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn newcomer_checks_run_in_order(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let hr = create_user(pool, Role::Hr).await.unwrap();
    let deps = ctx.deps(TestDependencies::new());

    let missing = suggest_buddies(actor(&hr), request(Uuid::new_v4()), &deps).await;
    assert!(matches!(missing, Err(SuggestionError::NewcomerNotFound)));

    let buddy = create_buddy_with_capacity(pool, 1).await.unwrap();
    let wrong_role = suggest_buddies(actor(&hr), request(buddy.id), &deps).await;
    assert!(matches!(wrong_role, Err(SuggestionError::NewcomerNotFound)));

    let bare = create_user(pool, Role::Newcomer).await.unwrap();
    let incomplete = suggest_buddies(actor(&hr), request(bare.id), &deps).await;
    assert!(matches!(incomplete, Err(SuggestionError::ProfileIncomplete)));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn unconfigured_provider_is_reported_before_any_lookup(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let hr = create_user(pool, Role::Hr).await.unwrap();
    let deps = ctx.deps(TestDependencies::new().without_ai());

    let err = suggest_buddies(actor(&hr), request(Uuid::new_v4()), &deps)
        .await
        .unwrap_err();
    assert!(matches!(err, SuggestionError::NotConfigured));

    let status = ai_status(actor(&hr), &deps).unwrap();
    assert!(!status.configured);
    assert_eq!(status.provider, "none");
}

#[test_context(TestHarness)]
#[tokio::test]
async fn provider_failure_is_not_an_empty_success(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let hr = create_user(pool, Role::Hr).await.unwrap();
    let newcomer = create_newcomer_with_profile(pool).await.unwrap();
    create_buddy_with_capacity(pool, 1).await.unwrap();

    let deps = ctx.deps(
        TestDependencies::new().mock_ai(MockCompletionProvider::new().with_failure("rate limited")),
    );

    let err = suggest_buddies(actor(&hr), request(newcomer.id), &deps)
        .await
        .unwrap_err();
    assert!(matches!(err, SuggestionError::GenerationFailed(_)));

    // failures are not cached
    assert_eq!(ai_status(actor(&hr), &deps).unwrap().cache_entries, 0);
}
