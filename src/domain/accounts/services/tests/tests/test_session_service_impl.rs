// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.


use assert_matches::assert_matches;
use chrono::Duration;
use internal_error::InternalError;
use pretty_assertions::assert_eq;
use sigauth_accounts::*;
use sigauth_accounts_inmem::{InMemorySessionRepository, InMemoryUserRepository};
use sigauth_accounts_services::SESSION_TOKEN_BYTES;

use crate::tests::utils::{AccountsHarness, t0, wallet};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_first_session_registers_user() {
    let harness = AccountsHarness::new();
    let alice = wallet(0xa1);

    let created = harness
        .get::<dyn SessionService>()
        .create_session(&alice)
        .await
        .unwrap();

    assert_eq!(created.expires_at, t0() + Duration::days(2));
    assert_eq!(created.token.len(), SESSION_TOKEN_BYTES * 2);
    assert!(created.token.chars().all(|c| c.is_ascii_hexdigit()));

    let user = harness
        .get::<dyn UserRepository>()
        .find_user_by_wallet(&alice)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.wallet_address, alice);
    assert_eq!(user.registered_at, t0());

    assert_eq!(
        harness
            .get::<dyn SessionRepository>()
            .find_sessions_by_wallet(&alice)
            .await
            .unwrap(),
        vec![Session {
            token: created.token,
            wallet_address: alice,
            expires_at: created.expires_at,
            created_at: t0(),
        }]
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_later_sessions_reuse_user() {
    let harness = AccountsHarness::new();
    let session_service = harness.get::<dyn SessionService>();
    let user_repo = harness.get::<dyn UserRepository>();
    let alice = wallet(0xa1);

    let first = session_service.create_session(&alice).await.unwrap();
    let user = user_repo.find_user_by_wallet(&alice).await.unwrap().unwrap();

    harness.time_source.advance(Duration::hours(5));
    let second = session_service.create_session(&alice).await.unwrap();

    assert_ne!(first.token, second.token);
    assert_eq!(second.expires_at, first.expires_at + Duration::hours(5));

    // Same user, registration time untouched
    assert_eq!(
        user_repo.find_user_by_wallet(&alice).await.unwrap(),
        Some(user)
    );

    let tokens: Vec<_> = harness
        .get::<dyn SessionRepository>()
        .find_sessions_by_wallet(&alice)
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.token)
        .collect();
    assert_eq!(tokens, vec![first.token, second.token]);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_concurrently_registered_user_is_reused() {
    let alice = wallet(0xa1);
    let registered = User::new(alice, t0() - Duration::seconds(1));

    let mut user_repo_mock = MockUserRepository::new();
    let mut seq = mockall::Sequence::new();
    user_repo_mock
        .expect_find_user_by_wallet()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(None));
    user_repo_mock
        .expect_create_user()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|user| {
            Err(CreateUserError::Duplicate(UserErrorDuplicate {
                wallet: user.wallet_address,
            }))
        });
    user_repo_mock
        .expect_find_user_by_wallet()
        .times(1)
        .in_sequence(&mut seq)
        .returning({
            let registered = registered.clone();
            move |_| Ok(Some(registered.clone()))
        });

    let harness = AccountsHarness::new_with(SessionValidationMode::Enforced, |b| {
        b.add_value(user_repo_mock)
            .bind::<dyn UserRepository, MockUserRepository>();
        b.add::<InMemorySessionRepository>();
    });

    let created = harness
        .get::<dyn SessionService>()
        .create_session(&alice)
        .await
        .unwrap();

    assert_eq!(
        harness
            .get::<dyn SessionRepository>()
            .find_active_session(&alice, &created.token, t0())
            .await
            .unwrap()
            .map(|s| s.wallet_address),
        Some(registered.wallet_address)
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_user_store_failure_is_reported_as_user_creation_failure() {
    let mut user_repo_mock = MockUserRepository::new();
    user_repo_mock
        .expect_find_user_by_wallet()
        .returning(|_| Err(InternalError::new("connection reset".to_string())));
    user_repo_mock.expect_create_user().never();

    let harness = AccountsHarness::new_with(SessionValidationMode::Enforced, |b| {
        b.add_value(user_repo_mock)
            .bind::<dyn UserRepository, MockUserRepository>();
        b.add::<InMemorySessionRepository>();
    });
    let alice = wallet(0xa1);

    assert_matches!(
        harness
            .get::<dyn SessionService>()
            .create_session(&alice)
            .await,
        Err(CreateSessionError::UserCreationFailed(_))
    );
    assert_eq!(
        harness
            .get::<dyn SessionRepository>()
            .find_sessions_by_wallet(&alice)
            .await
            .unwrap(),
        Vec::<Session>::new()
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_session_store_failure_is_reported_as_session_creation_failure() {
    let mut session_repo_mock = MockSessionRepository::new();
    session_repo_mock
        .expect_save_session()
        .times(1)
        .returning(|_| {
            Err(SaveSessionError::Internal(InternalError::new(
                "disk full".to_string(),
            )))
        });

    let harness = AccountsHarness::new_with(SessionValidationMode::Enforced, |b| {
        b.add::<InMemoryUserRepository>();
        b.add_value(session_repo_mock)
            .bind::<dyn SessionRepository, MockSessionRepository>();
    });
    let alice = wallet(0xa1);

    assert_matches!(
        harness
            .get::<dyn SessionService>()
            .create_session(&alice)
            .await,
        Err(CreateSessionError::SessionCreationFailed(_))
    );

    // The user registered before the failing write is kept
    assert_matches!(
        harness
            .get::<dyn UserRepository>()
            .find_user_by_wallet(&alice)
            .await,
        Ok(Some(User { wallet_address, .. })) if wallet_address == alice
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
