// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::{DateTime, Duration, TimeZone, Utc};
use dill::Catalog;
use pretty_assertions::assert_eq;
use sigauth_auth_web3::{
    ConsumeChallengeError,
    EvmWalletAddress,
    GetChallengeError,
    Web3AuthChallenge,
    Web3AuthChallengeRepository,
};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2050, 1, 2, 12, 0, 0).unwrap()
}

fn make_challenge(wallet: EvmWalletAddress, text: &str, offset: Duration) -> Web3AuthChallenge {
    Web3AuthChallenge::new(wallet, text.to_string(), t0() + offset)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_get_challenge_not_found(catalog: &Catalog) {
    let challenge_repo = catalog.get_one::<dyn Web3AuthChallengeRepository>().unwrap();

    let wallet = EvmWalletAddress::repeat_byte(1);

    assert_eq!(
        challenge_repo.get_challenge(&wallet).await,
        Err(GetChallengeError::NotFound { wallet })
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_upsert_replaces_previous_challenge(catalog: &Catalog) {
    let challenge_repo = catalog.get_one::<dyn Web3AuthChallengeRepository>().unwrap();

    let wallet = EvmWalletAddress::repeat_byte(1);

    let first = make_challenge(wallet, "first", Duration::zero());
    challenge_repo.upsert_challenge(&first).await.unwrap();

    assert_eq!(challenge_repo.get_challenge(&wallet).await, Ok(first));

    let second = make_challenge(wallet, "second", Duration::seconds(1));
    challenge_repo.upsert_challenge(&second).await.unwrap();

    assert_eq!(challenge_repo.get_challenge(&wallet).await, Ok(second));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_challenges_are_kept_per_wallet(catalog: &Catalog) {
    let challenge_repo = catalog.get_one::<dyn Web3AuthChallengeRepository>().unwrap();

    let wallet_a = EvmWalletAddress::repeat_byte(1);
    let wallet_b = EvmWalletAddress::repeat_byte(2);

    let challenge_a = make_challenge(wallet_a, "for a", Duration::zero());
    let challenge_b = make_challenge(wallet_b, "for b", Duration::minutes(5));

    challenge_repo.upsert_challenge(&challenge_a).await.unwrap();
    challenge_repo.upsert_challenge(&challenge_b).await.unwrap();

    assert_eq!(challenge_repo.get_challenge(&wallet_a).await, Ok(challenge_a));
    assert_eq!(challenge_repo.get_challenge(&wallet_b).await, Ok(challenge_b));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_consume_challenge_only_once(catalog: &Catalog) {
    let challenge_repo = catalog.get_one::<dyn Web3AuthChallengeRepository>().unwrap();

    let wallet = EvmWalletAddress::repeat_byte(1);
    let challenge = make_challenge(wallet, "sign me", Duration::zero());
    challenge_repo.upsert_challenge(&challenge).await.unwrap();

    let consumed_at = t0() + Duration::seconds(5);

    assert_eq!(
        challenge_repo
            .consume_challenge(&wallet, "sign me", consumed_at)
            .await,
        Ok(())
    );
    assert_eq!(
        challenge_repo
            .consume_challenge(&wallet, "sign me", consumed_at + Duration::seconds(1))
            .await,
        Err(ConsumeChallengeError::NotAvailable { wallet })
    );

    // The row is kept, only marked
    assert_eq!(
        challenge_repo.get_challenge(&wallet).await,
        Ok(Web3AuthChallenge {
            consumed_at: Some(consumed_at),
            ..challenge
        })
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_consume_challenge_requires_current_text(catalog: &Catalog) {
    let challenge_repo = catalog.get_one::<dyn Web3AuthChallengeRepository>().unwrap();

    let wallet = EvmWalletAddress::repeat_byte(1);
    let other_wallet = EvmWalletAddress::repeat_byte(2);

    assert_eq!(
        challenge_repo
            .consume_challenge(&wallet, "never issued", t0())
            .await,
        Err(ConsumeChallengeError::NotAvailable { wallet })
    );

    let first = make_challenge(wallet, "first", Duration::zero());
    challenge_repo.upsert_challenge(&first).await.unwrap();
    let second = make_challenge(wallet, "second", Duration::seconds(1));
    challenge_repo.upsert_challenge(&second).await.unwrap();

    assert_eq!(
        challenge_repo.consume_challenge(&wallet, "first", t0()).await,
        Err(ConsumeChallengeError::NotAvailable { wallet })
    );
    assert_eq!(
        challenge_repo
            .consume_challenge(&other_wallet, "second", t0())
            .await,
        Err(ConsumeChallengeError::NotAvailable {
            wallet: other_wallet
        })
    );
    assert_eq!(challenge_repo.get_challenge(&wallet).await, Ok(second));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_upsert_replaces_consumed_challenge(catalog: &Catalog) {
    let challenge_repo = catalog.get_one::<dyn Web3AuthChallengeRepository>().unwrap();

    let wallet = EvmWalletAddress::repeat_byte(1);

    let first = make_challenge(wallet, "first", Duration::zero());
    challenge_repo.upsert_challenge(&first).await.unwrap();
    challenge_repo
        .consume_challenge(&wallet, "first", t0())
        .await
        .unwrap();

    let second = make_challenge(wallet, "second", Duration::minutes(1));
    challenge_repo.upsert_challenge(&second).await.unwrap();

    assert_eq!(challenge_repo.get_challenge(&wallet).await, Ok(second));
    assert_eq!(
        challenge_repo
            .consume_challenge(&wallet, "second", t0() + Duration::minutes(2))
            .await,
        Ok(())
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
