//! Match lifecycle against a real Postgres: create, respond, complete,
//! plus the capacity rules that guard ACCEPTED.

mod common;

use common::*;
use futures::future::join_all;
use server_core::common::Role;
use server_core::domains::buddies::activities::capacity_for;
use server_core::domains::matches::activities::{
    complete_match, create_match, get_match, list_matches, respond_to_match,
};
use server_core::domains::matches::{
    CreateMatchInput, ListMatchesQuery, MatchError, MatchStatus, MatchType, RespondInput,
};
use test_context::test_context;

fn accept() -> RespondInput {
    RespondInput {
        status: Some("ACCEPTED".to_string()),
        message: Some("Happy to help".to_string()),
    }
}

fn reject() -> RespondInput {
    RespondInput {
        status: Some("REJECTED".to_string()),
        message: None,
    }
}

#[test_context(TestHarness)]
#[tokio::test]
async fn create_then_accept_then_second_response_is_not_found(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let hr = create_user(pool, Role::Hr).await.unwrap();
    let buddy = create_buddy_with_capacity(pool, 3).await.unwrap();
    let newcomer = create_newcomer_with_profile(pool).await.unwrap();

    let created = create_pending_match(pool, &hr, &buddy, &newcomer).await.unwrap();
    assert_eq!(created.record.status, MatchStatus::Pending);
    assert_eq!(created.record.sender_id, hr.id);
    assert_eq!(created.receiver.as_ref().unwrap().id, buddy.id);
    assert_eq!(created.newcomer.as_ref().unwrap().id, newcomer.id);

    let accepted = respond_to_match(actor(&buddy), created.record.id, accept(), pool)
        .await
        .unwrap();
    assert_eq!(accepted.record.status, MatchStatus::Accepted);
    assert!(accepted.record.responded_at.is_some());
    assert_eq!(accepted.record.response_message.as_deref(), Some("Happy to help"));

    let again = respond_to_match(actor(&buddy), created.record.id, reject(), pool).await;
    assert!(matches!(again, Err(MatchError::NotFound(_))));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn only_the_receiver_may_respond(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let hr = create_user(pool, Role::Hr).await.unwrap();
    let buddy = create_buddy_with_capacity(pool, 3).await.unwrap();
    let other_buddy = create_buddy_with_capacity(pool, 3).await.unwrap();
    let newcomer = create_newcomer_with_profile(pool).await.unwrap();

    let created = create_pending_match(pool, &hr, &buddy, &newcomer).await.unwrap();

    let foreign = respond_to_match(actor(&other_buddy), created.record.id, accept(), pool).await;
    assert!(matches!(foreign, Err(MatchError::NotFound(_))));

    let missing = respond_to_match(actor(&buddy), uuid::Uuid::new_v4(), accept(), pool).await;
    assert!(matches!(missing, Err(MatchError::NotFound(_))));

    // the failed attempts left the match untouched
    let still_pending = get_match(actor(&buddy), created.record.id, pool).await.unwrap();
    assert_eq!(still_pending.record.status, MatchStatus::Pending);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn duplicate_pending_request_is_rejected(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let hr = create_user(pool, Role::Hr).await.unwrap();
    let buddy = create_buddy_with_capacity(pool, 3).await.unwrap();
    let newcomer = create_newcomer_with_profile(pool).await.unwrap();

    create_pending_match(pool, &hr, &buddy, &newcomer).await.unwrap();

    let err = create_match(actor(&hr), create_input(&buddy, MatchType::OfficeConnection), pool)
        .await
        .unwrap_err();
    assert!(matches!(err, MatchError::DuplicatePending));
    assert_eq!(
        err.to_string(),
        "A pending match request already exists for this buddy"
    );
}

#[test_context(TestHarness)]
#[tokio::test]
async fn rejected_request_allows_a_new_one(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let hr = create_user(pool, Role::Hr).await.unwrap();
    let buddy = create_buddy_with_capacity(pool, 3).await.unwrap();
    let newcomer = create_newcomer_with_profile(pool).await.unwrap();

    let first = create_pending_match(pool, &hr, &buddy, &newcomer).await.unwrap();
    let rejected = respond_to_match(actor(&buddy), first.record.id, reject(), pool)
        .await
        .unwrap();
    assert_eq!(rejected.record.status, MatchStatus::Rejected);

    let second = create_pending_match(pool, &hr, &buddy, &newcomer).await.unwrap();
    assert_ne!(second.record.id, first.record.id);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn receiver_must_be_a_buddy(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let hr = create_user(pool, Role::Hr).await.unwrap();
    let not_a_buddy = create_user(pool, Role::OfficeSeeker).await.unwrap();

    let err = create_match(
        actor(&hr),
        create_input(&not_a_buddy, MatchType::OfficeConnection),
        pool,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, MatchError::ReceiverNotBuddy));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn newcomer_must_have_newcomer_role(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let hr = create_user(pool, Role::Hr).await.unwrap();
    let buddy = create_buddy_with_capacity(pool, 3).await.unwrap();
    let relocating = create_user(pool, Role::RelocatingEmployee).await.unwrap();

    let input = CreateMatchInput {
        newcomer_id: Some(relocating.id.to_string()),
        ..create_input(&buddy, MatchType::NewcomerMatch)
    };
    let err = create_match(actor(&hr), input, pool).await.unwrap_err();
    assert!(matches!(err, MatchError::InvalidNewcomer));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn buddy_may_not_create_newcomer_matches(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let sender = create_buddy_with_capacity(pool, 3).await.unwrap();
    let receiver = create_buddy_with_capacity(pool, 3).await.unwrap();

    let err = create_match(
        actor(&sender),
        create_input(&receiver, MatchType::NewcomerMatch),
        pool,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, MatchError::Forbidden(_)));

    // peer support between buddies is fine
    let created = create_match(
        actor(&sender),
        create_input(&receiver, MatchType::RelocationSupport),
        pool,
    )
    .await
    .unwrap();
    assert_eq!(created.record.match_type, MatchType::RelocationSupport);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn full_buddy_rejects_new_requests_and_acceptances(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let hr = create_user(pool, Role::Hr).await.unwrap();
    let other_hr = create_user(pool, Role::Hr).await.unwrap();
    let buddy = create_buddy_with_capacity(pool, 1).await.unwrap();
    let newcomer = create_newcomer_with_profile(pool).await.unwrap();

    // two pending requests may coexist: capacity counts ACCEPTED only
    let first = create_pending_match(pool, &hr, &buddy, &newcomer).await.unwrap();
    let second = create_pending_match(pool, &other_hr, &buddy, &newcomer).await.unwrap();

    respond_to_match(actor(&buddy), first.record.id, accept(), pool)
        .await
        .unwrap();

    let err = respond_to_match(actor(&buddy), second.record.id, accept(), pool)
        .await
        .unwrap_err();
    assert!(matches!(err, MatchError::CapacityReached));

    // rejecting still works at capacity
    respond_to_match(actor(&buddy), second.record.id, reject(), pool)
        .await
        .unwrap();

    let third_hr = create_user(pool, Role::Hr).await.unwrap();
    let err = create_pending_match(pool, &third_hr, &buddy, &newcomer)
        .await
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<MatchError>(),
        Some(MatchError::CapacityReached)
    ));

    let capacity = capacity_for(buddy.id, pool).await.unwrap().unwrap();
    assert_eq!(capacity.current_buddies, 1);
    assert_eq!(capacity.utilization_rate, Some(100.0));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn concurrent_accepts_never_exceed_capacity(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let buddy = create_buddy_with_capacity(pool, 1).await.unwrap();
    let newcomer = create_newcomer_with_profile(pool).await.unwrap();

    let mut match_ids = Vec::new();
    for _ in 0..5 {
        let hr = create_user(pool, Role::Hr).await.unwrap();
        let created = create_pending_match(pool, &hr, &buddy, &newcomer).await.unwrap();
        match_ids.push(created.record.id);
    }

    let attempts = match_ids
        .iter()
        .map(|id| respond_to_match(actor(&buddy), *id, accept(), pool));
    let results = join_all(attempts).await;

    let accepted = results.iter().filter(|r| r.is_ok()).count();
    let refused = results
        .iter()
        .filter(|r| matches!(r, Err(MatchError::CapacityReached)))
        .count();
    assert_eq!(accepted, 1);
    assert_eq!(refused, 4);

    let capacity = capacity_for(buddy.id, pool).await.unwrap().unwrap();
    assert_eq!(capacity.current_buddies, 1);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn concurrent_creates_yield_one_pending(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let hr = create_user(pool, Role::Hr).await.unwrap();
    let buddy = create_buddy_with_capacity(pool, 3).await.unwrap();

    let attempts = (0..6).map(|_| {
        create_match(
            actor(&hr),
            create_input(&buddy, MatchType::OfficeConnection),
            pool,
        )
    });
    let results = join_all(attempts).await;

    let created = results.iter().filter(|r| r.is_ok()).count();
    let duplicates = results
        .iter()
        .filter(|r| matches!(r, Err(MatchError::DuplicatePending)))
        .count();
    assert!(
        !results.iter().any(|r| matches!(r, Err(MatchError::Internal(_)))),
        "no attempt may surface as an internal error"
    );
    assert_eq!(created, 1);
    assert_eq!(duplicates, 5);

    let pending = list_matches(
        actor(&buddy),
        &ListMatchesQuery {
            status: Some("PENDING".to_string()),
            ..Default::default()
        },
        pool,
    )
    .await
    .unwrap();
    assert_eq!(pending.len(), 1);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn completion_frees_capacity(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let hr = create_user(pool, Role::Hr).await.unwrap();
    let buddy = create_buddy_with_capacity(pool, 1).await.unwrap();
    let newcomer = create_newcomer_with_profile(pool).await.unwrap();

    let created = create_pending_match(pool, &hr, &buddy, &newcomer).await.unwrap();

    // only ACCEPTED matches can be completed
    let early = complete_match(actor(&hr), created.record.id, pool).await;
    assert!(matches!(early, Err(MatchError::NotFound(_))));

    respond_to_match(actor(&buddy), created.record.id, accept(), pool)
        .await
        .unwrap();

    let outsider = create_buddy_with_capacity(pool, 1).await.unwrap();
    let foreign = complete_match(actor(&outsider), created.record.id, pool).await;
    assert!(matches!(foreign, Err(MatchError::NotFound(_))));

    let completed = complete_match(actor(&buddy), created.record.id, pool)
        .await
        .unwrap();
    assert_eq!(completed.record.status, MatchStatus::Completed);
    assert!(completed.record.completed_at.is_some());

    let capacity = capacity_for(buddy.id, pool).await.unwrap().unwrap();
    assert_eq!(capacity.current_buddies, 0);
    assert_eq!(capacity.utilization_rate, Some(0.0));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn list_and_get_are_scoped_to_participants(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let hr = create_user(pool, Role::Hr).await.unwrap();
    let other_hr = create_user(pool, Role::Hr).await.unwrap();
    let buddy = create_buddy_with_capacity(pool, 3).await.unwrap();
    let newcomer = create_newcomer_with_profile(pool).await.unwrap();

    let first = create_pending_match(pool, &hr, &buddy, &newcomer).await.unwrap();
    let second = create_match(
        actor(&hr),
        create_input(&create_buddy_with_capacity(pool, 3).await.unwrap(), MatchType::OfficeConnection),
        pool,
    )
    .await
    .unwrap();
    respond_to_match(actor(&buddy), first.record.id, accept(), pool)
        .await
        .unwrap();

    let all = list_matches(actor(&hr), &ListMatchesQuery::default(), pool)
        .await
        .unwrap();
    assert_eq!(all.len(), 2);
    // newest first
    assert_eq!(all[0].record.id, second.record.id);

    let accepted_only = list_matches(
        actor(&hr),
        &ListMatchesQuery {
            status: Some("ACCEPTED".to_string()),
            ..Default::default()
        },
        pool,
    )
    .await
    .unwrap();
    assert_eq!(accepted_only.len(), 1);
    assert_eq!(accepted_only[0].record.id, first.record.id);

    let bad_filter = list_matches(
        actor(&hr),
        &ListMatchesQuery {
            status: Some("SOMETIMES".to_string()),
            ..Default::default()
        },
        pool,
    )
    .await;
    assert!(matches!(bad_filter, Err(MatchError::Validation(_))));

    assert!(list_matches(actor(&other_hr), &ListMatchesQuery::default(), pool)
        .await
        .unwrap()
        .is_empty());
    let hidden = get_match(actor(&other_hr), first.record.id, pool).await;
    assert!(matches!(hidden, Err(MatchError::NotFound(_))));
}
