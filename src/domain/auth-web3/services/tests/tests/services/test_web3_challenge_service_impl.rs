// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use assert_matches::assert_matches;
use chrono::{DateTime, Duration, Utc};
use pretty_assertions::assert_eq;
use sigauth_auth_web3::*;
use sigauth_auth_web3_services::Web3ChallengeServiceImpl;

use crate::tests::utils::{Web3AuthHarness, t0};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn wallet() -> EvmWalletAddress {
    EvmWalletAddressConvertor::parse("0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed").unwrap()
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_issue_challenge_embeds_service_address_and_time() {
    let harness = Web3AuthHarness::new();
    let challenge_service = harness.get::<dyn Web3ChallengeService>();

    let challenge = challenge_service.issue_challenge(&wallet()).await.unwrap();

    assert_eq!(
        challenge,
        Web3AuthChallenge {
            wallet_address: wallet(),
            text: format!(
                "Signing in to App as 0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed at {}",
                t0().timestamp_millis()
            ),
            issued_at: t0(),
            consumed_at: None,
        }
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_reissued_challenge_supersedes_previous_one() {
    let harness = Web3AuthHarness::new();
    let challenge_service = harness.get::<dyn Web3ChallengeService>();
    let challenge_repo = harness.get::<dyn Web3AuthChallengeRepository>();

    let first = challenge_service.issue_challenge(&wallet()).await.unwrap();

    harness.time_source.advance(Duration::milliseconds(1));
    let second = challenge_service.issue_challenge(&wallet()).await.unwrap();

    assert_ne!(first.text, second.text);

    harness.time_source.advance(Duration::milliseconds(1));
    let active = challenge_service
        .find_active_challenge(&wallet())
        .await
        .unwrap();

    assert_eq!(active, second);
    assert_eq!(challenge_repo.get_challenge(&wallet()).await, Ok(second));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_find_active_challenge_not_found() {
    let harness = Web3AuthHarness::new();
    let challenge_service = harness.get::<dyn Web3ChallengeService>();

    assert_matches!(
        challenge_service.find_active_challenge(&wallet()).await,
        Err(FindActiveChallengeError::NotFound(ChallengeNotFoundError { wallet: w }))
            if w == wallet()
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_challenge_expires_after_validity_window() {
    let harness = Web3AuthHarness::new();
    let challenge_service = harness.get::<dyn Web3ChallengeService>();

    challenge_service.issue_challenge(&wallet()).await.unwrap();

    harness
        .time_source
        .advance(Duration::hours(24) - Duration::milliseconds(1));
    assert_matches!(
        challenge_service.find_active_challenge(&wallet()).await,
        Ok(_)
    );

    harness.time_source.advance(Duration::milliseconds(1));
    assert_matches!(
        challenge_service.find_active_challenge(&wallet()).await,
        Err(FindActiveChallengeError::Expired(ChallengeExpiredError { expired_at, .. }))
            if expired_at == t0() + Duration::hours(24)
    );

    // A new request restarts the window
    challenge_service.issue_challenge(&wallet()).await.unwrap();
    assert_matches!(
        challenge_service.find_active_challenge(&wallet()).await,
        Ok(_)
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_consumed_challenge_is_no_longer_active() {
    let harness = Web3AuthHarness::new();
    let challenge_service = harness.get::<dyn Web3ChallengeService>();

    let challenge = challenge_service.issue_challenge(&wallet()).await.unwrap();

    harness.time_source.advance(Duration::seconds(3));
    challenge_service
        .consume_challenge(&wallet(), &challenge.text)
        .await
        .unwrap();

    assert_matches!(
        challenge_service.find_active_challenge(&wallet()).await,
        Err(FindActiveChallengeError::Consumed(ChallengeConsumedError { consumed_at, .. }))
            if consumed_at == t0() + Duration::seconds(3)
    );
    assert_matches!(
        challenge_service
            .consume_challenge(&wallet(), &challenge.text)
            .await,
        Err(ConsumeActiveChallengeError::NotAvailable { wallet: w }) if w == wallet()
    );

    // A new request gives the wallet a fresh, unused challenge
    let reissued = challenge_service.issue_challenge(&wallet()).await.unwrap();
    assert_eq!(
        challenge_service
            .find_active_challenge(&wallet())
            .await
            .unwrap(),
        reissued
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

struct NonceMessageGenerator;

impl Web3ChallengeMessageGenerator for NonceMessageGenerator {
    fn generate(
        &self,
        now: DateTime<Utc>,
        service_name: &str,
        wallet: &EvmWalletAddress,
    ) -> String {
        format!("{service_name} wants {wallet} to sign nonce {}", now.timestamp())
    }
}

#[test_log::test(tokio::test)]
async fn test_custom_message_generator() {
    let harness = Web3AuthHarness::new_with(|b| {
        b.add_value(NonceMessageGenerator)
            .bind::<dyn Web3ChallengeMessageGenerator, NonceMessageGenerator>();
        b.add::<Web3ChallengeServiceImpl>();
    });
    let challenge_service = harness.get::<dyn Web3ChallengeService>();

    let challenge = challenge_service.issue_challenge(&wallet()).await.unwrap();

    assert_eq!(
        challenge.text,
        format!(
            "App wants 0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed to sign nonce {}",
            t0().timestamp()
        )
    );
    assert_eq!(challenge.issued_at, t0());
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
