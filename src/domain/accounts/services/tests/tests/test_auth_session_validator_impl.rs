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
use pretty_assertions::assert_eq;
use sigauth_accounts::*;

use crate::tests::utils::{AccountsHarness, t0, wallet};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_session_is_valid_until_it_expires() {
    let harness = AccountsHarness::new();
    let validator = harness.get::<dyn AuthSessionValidator>();
    let alice = wallet(0xa1);

    let created = harness
        .get::<dyn SessionService>()
        .create_session(&alice)
        .await
        .unwrap();

    let expected = AuthenticatedIdentity {
        wallet_address: alice,
        credential: AuthCredential::Session {
            expires_at: created.expires_at,
        },
    };

    assert_eq!(
        validator.validate(&alice, &created.token).await.unwrap(),
        expected
    );

    harness.time_source.set(created.expires_at - Duration::seconds(1));
    assert_eq!(
        validator.validate(&alice, &created.token).await.unwrap(),
        expected
    );

    harness.time_source.set(created.expires_at + Duration::seconds(1));
    assert_matches!(
        validator.validate(&alice, &created.token).await,
        Err(ValidateSessionError::Unauthenticated(_))
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_all_sessions_of_wallet_are_valid() {
    let harness = AccountsHarness::new();
    let session_service = harness.get::<dyn SessionService>();
    let validator = harness.get::<dyn AuthSessionValidator>();
    let alice = wallet(0xa1);

    let first = session_service.create_session(&alice).await.unwrap();
    let second = session_service.create_session(&alice).await.unwrap();

    for token in [&first.token, &second.token] {
        assert_matches!(validator.validate(&alice, token).await, Ok(_));
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_token_of_another_wallet_is_rejected() {
    let harness = AccountsHarness::new();
    let validator = harness.get::<dyn AuthSessionValidator>();
    let alice = wallet(0xa1);
    let bob = wallet(0xb0);

    let created = harness
        .get::<dyn SessionService>()
        .create_session(&alice)
        .await
        .unwrap();

    assert_matches!(
        validator.validate(&bob, &created.token).await,
        Err(ValidateSessionError::Unauthenticated(_))
    );
    assert_matches!(
        validator.validate(&alice, "0badc0ffee").await,
        Err(ValidateSessionError::Unauthenticated(_))
    );
    assert_matches!(
        validator.validate(&alice, "").await,
        Err(ValidateSessionError::Unauthenticated(_))
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_api_key_is_accepted_when_no_session_matches() {
    let harness = AccountsHarness::new();
    let validator = harness.get::<dyn AuthSessionValidator>();
    let alice = wallet(0xa1);
    let bob = wallet(0xb0);

    harness
        .get::<dyn ApiKeyRepository>()
        .save_api_key(&ApiKey {
            key: "alice-ci-key".to_string(),
            wallet_address: alice,
            created_at: t0(),
        })
        .await
        .unwrap();

    // API keys never expire
    harness.time_source.advance(Duration::days(365));

    assert_eq!(
        validator.validate(&alice, "alice-ci-key").await.unwrap(),
        AuthenticatedIdentity {
            wallet_address: alice,
            credential: AuthCredential::ApiKey,
        }
    );
    assert_matches!(
        validator.validate(&bob, "alice-ci-key").await,
        Err(ValidateSessionError::Unauthenticated(_))
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_bypass_mode_accepts_any_token() {
    let harness = AccountsHarness::bypassing();
    let validator = harness.get::<dyn AuthSessionValidator>();
    let alice = wallet(0xa1);

    for token in ["", "anything"] {
        assert_eq!(
            validator.validate(&alice, token).await.unwrap(),
            AuthenticatedIdentity {
                wallet_address: alice,
                credential: AuthCredential::Bypassed,
            }
        );
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
