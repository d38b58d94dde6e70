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
use dill::Catalog;
use pretty_assertions::assert_eq;
use sigauth_accounts::{SaveSessionError, Session, SessionRepository};

use crate::helpers::{reference_time, wallet};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn make_session(token: &str, wallet_seed: u8, lifetime: Duration) -> Session {
    Session {
        token: token.to_string(),
        wallet_address: wallet(wallet_seed),
        expires_at: reference_time() + lifetime,
        created_at: reference_time(),
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_no_sessions(catalog: &Catalog) {
    let session_repo = catalog.get_one::<dyn SessionRepository>().unwrap();

    assert_eq!(
        session_repo
            .find_active_session(&wallet(1), "unknown", reference_time())
            .await
            .unwrap(),
        None
    );
    assert_eq!(
        session_repo.find_sessions_by_wallet(&wallet(1)).await.unwrap(),
        Vec::<Session>::new()
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_find_active_session(catalog: &Catalog) {
    let session_repo = catalog.get_one::<dyn SessionRepository>().unwrap();

    let session = make_session("token-1", 1, Duration::days(2));
    session_repo.save_session(&session).await.unwrap();

    // Matching wallet and token, before expiry
    assert_eq!(
        session_repo
            .find_active_session(&wallet(1), "token-1", reference_time())
            .await
            .unwrap(),
        Some(session.clone())
    );
    assert_eq!(
        session_repo
            .find_active_session(
                &wallet(1),
                "token-1",
                session.expires_at - Duration::seconds(1)
            )
            .await
            .unwrap(),
        Some(session.clone())
    );

    // Token presented for another wallet
    assert_eq!(
        session_repo
            .find_active_session(&wallet(2), "token-1", reference_time())
            .await
            .unwrap(),
        None
    );

    // Expired sessions no longer match, but are still stored
    assert_eq!(
        session_repo
            .find_active_session(&wallet(1), "token-1", session.expires_at)
            .await
            .unwrap(),
        None
    );
    assert_eq!(
        session_repo
            .find_active_session(
                &wallet(1),
                "token-1",
                session.expires_at + Duration::seconds(1)
            )
            .await
            .unwrap(),
        None
    );
    assert_eq!(
        session_repo.find_sessions_by_wallet(&wallet(1)).await.unwrap(),
        vec![session]
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_multiple_sessions_per_wallet(catalog: &Catalog) {
    let session_repo = catalog.get_one::<dyn SessionRepository>().unwrap();

    let laptop = make_session("token-laptop", 1, Duration::days(2));
    let phone = Session {
        created_at: reference_time() + Duration::hours(1),
        expires_at: reference_time() + Duration::hours(1) + Duration::days(2),
        ..make_session("token-phone", 1, Duration::days(2))
    };
    let other = make_session("token-other", 2, Duration::days(2));

    session_repo.save_session(&laptop).await.unwrap();
    session_repo.save_session(&phone).await.unwrap();
    session_repo.save_session(&other).await.unwrap();

    assert_eq!(
        session_repo.find_sessions_by_wallet(&wallet(1)).await.unwrap(),
        vec![laptop.clone(), phone.clone()]
    );

    for session in [&laptop, &phone] {
        assert_eq!(
            session_repo
                .find_active_session(&wallet(1), &session.token, reference_time())
                .await
                .unwrap()
                .as_ref(),
            Some(session)
        );
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_duplicate_session_token(catalog: &Catalog) {
    let session_repo = catalog.get_one::<dyn SessionRepository>().unwrap();

    session_repo
        .save_session(&make_session("token-1", 1, Duration::days(2)))
        .await
        .unwrap();

    assert_matches!(
        session_repo
            .save_session(&make_session("token-1", 2, Duration::days(2)))
            .await,
        Err(SaveSessionError::Duplicate(_))
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
