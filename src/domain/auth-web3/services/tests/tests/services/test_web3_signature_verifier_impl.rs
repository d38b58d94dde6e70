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

use crate::tests::utils::{TestWallet, Web3AuthHarness, t0};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

struct VerifierHarness {
    harness: Web3AuthHarness,
}

impl VerifierHarness {
    fn new() -> Self {
        Self {
            harness: Web3AuthHarness::new(),
        }
    }

    async fn issue_challenge(&self, wallet: &TestWallet) -> String {
        self.harness
            .get::<dyn Web3ChallengeService>()
            .issue_challenge(&wallet.address())
            .await
            .unwrap()
            .text
    }

    async fn verify(
        &self,
        claimed: &TestWallet,
        signature: &str,
        challenge_text: &str,
    ) -> Result<(), VerifySignatureError> {
        self.verify_signed_at(claimed, signature, challenge_text, None)
            .await
    }

    async fn verify_signed_at(
        &self,
        claimed: &TestWallet,
        signature: &str,
        challenge_text: &str,
        signed_at: Option<DateTime<Utc>>,
    ) -> Result<(), VerifySignatureError> {
        self.harness
            .get::<dyn Web3SignatureVerifier>()
            .verify(&claimed.address(), signature, challenge_text, signed_at)
            .await
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_signature_of_claimed_wallet_over_current_challenge_is_accepted() {
    let harness = VerifierHarness::new();
    let alice = TestWallet::alice();

    let challenge = harness.issue_challenge(&alice).await;
    let signature = alice.sign(&challenge);

    assert_matches!(harness.verify(&alice, &signature, &challenge).await, Ok(()));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_challenge_verifies_only_once() {
    let harness = VerifierHarness::new();
    let alice = TestWallet::alice();

    let challenge = harness.issue_challenge(&alice).await;
    let signature = alice.sign(&challenge);

    assert_matches!(harness.verify(&alice, &signature, &challenge).await, Ok(()));

    for _ in 0..3 {
        assert_matches!(
            harness.verify(&alice, &signature, &challenge).await,
            Err(VerifySignatureError::InvalidSignature(_))
        );
    }

    // The challenge stays stored, marked as used
    let stored = harness
        .harness
        .get::<dyn Web3AuthChallengeRepository>()
        .get_challenge(&alice.address())
        .await
        .unwrap();
    assert_eq!(stored.text, challenge);
    assert_eq!(stored.consumed_at, Some(t0()));

    let next_challenge = harness.issue_challenge(&alice).await;
    assert_matches!(
        harness
            .verify(&alice, &alice.sign(&next_challenge), &next_challenge)
            .await,
        Ok(())
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_rejected_attempts_do_not_consume_challenge() {
    let harness = VerifierHarness::new();
    let alice = TestWallet::alice();
    let bob = TestWallet::bob();

    let challenge = harness.issue_challenge(&alice).await;

    assert_matches!(
        harness
            .verify(&alice, &bob.sign(&challenge), &challenge)
            .await,
        Err(VerifySignatureError::InvalidSignature(_))
    );
    assert_matches!(
        harness
            .verify(&alice, &alice.sign(&challenge), &challenge)
            .await,
        Ok(())
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_signature_claimed_for_another_wallet_is_rejected() {
    let harness = VerifierHarness::new();
    let alice = TestWallet::alice();
    let bob = TestWallet::bob();

    let challenge = harness.issue_challenge(&alice).await;
    let signature = alice.sign(&challenge);

    // Bob's wallet has a live challenge of its own
    harness.issue_challenge(&bob).await;

    assert_matches!(
        harness.verify(&bob, &signature, &challenge).await,
        Err(VerifySignatureError::InvalidSignature(_))
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_signature_over_other_text_is_rejected() {
    let harness = VerifierHarness::new();
    let alice = TestWallet::alice();

    let challenge = harness.issue_challenge(&alice).await;
    let signature = alice.sign("Something else entirely");

    assert_matches!(
        harness.verify(&alice, &signature, &challenge).await,
        Err(VerifySignatureError::InvalidSignature(_))
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_text_that_is_not_the_stored_challenge_is_rejected() {
    let harness = VerifierHarness::new();
    let alice = TestWallet::alice();

    let stored = harness.issue_challenge(&alice).await;

    // Correctly signed by the wallet, but never issued by the server
    let tampered = format!("{stored} ");
    let backdated = format!(
        "Signing in to App as {} at {}",
        alice.address(),
        t0().timestamp_millis() - 1
    );

    for text in [tampered, backdated] {
        assert_matches!(
            harness.verify(&alice, &alice.sign(&text), &text).await,
            Err(VerifySignatureError::InvalidSignature(_)),
            "text: {text:?}"
        );
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_superseded_challenge_is_rejected() {
    let harness = VerifierHarness::new();
    let alice = TestWallet::alice();

    let old_challenge = harness.issue_challenge(&alice).await;
    let old_signature = alice.sign(&old_challenge);

    harness.harness.time_source.advance(Duration::seconds(1));
    let new_challenge = harness.issue_challenge(&alice).await;

    assert_matches!(
        harness.verify(&alice, &old_signature, &old_challenge).await,
        Err(VerifySignatureError::InvalidSignature(_))
    );
    assert_matches!(
        harness
            .verify(&alice, &alice.sign(&new_challenge), &new_challenge)
            .await,
        Ok(())
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_without_issued_challenge_is_rejected() {
    let harness = VerifierHarness::new();
    let alice = TestWallet::alice();

    let text = "Signing in to App as someone at 0";

    assert_matches!(
        harness.verify(&alice, &alice.sign(text), text).await,
        Err(VerifySignatureError::InvalidSignature(_))
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_malformed_signatures_are_rejected() {
    let harness = VerifierHarness::new();
    let alice = TestWallet::alice();

    let challenge = harness.issue_challenge(&alice).await;
    let valid = alice.sign(&challenge);

    let too_long = format!("{valid}00");
    let too_short = &valid[..valid.len() - 2];

    for signature in ["", "0x", "not a signature", too_short, too_long.as_str()] {
        assert_matches!(
            harness.verify(&alice, signature, &challenge).await,
            Err(VerifySignatureError::InvalidSignature(_)),
            "signature: {signature:?}"
        );
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_expired_challenge_is_rejected() {
    let harness = VerifierHarness::new();
    let alice = TestWallet::alice();

    let challenge = harness.issue_challenge(&alice).await;
    let signature = alice.sign(&challenge);

    harness.harness.time_source.advance(Duration::hours(24));

    assert_matches!(
        harness.verify(&alice, &signature, &challenge).await,
        Err(VerifySignatureError::Expired(_))
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_signing_time_outside_window_is_rejected() {
    let harness = VerifierHarness::new();
    let alice = TestWallet::alice();

    for (signed_at, is_accepted) in [
        (t0(), true),
        (t0() - Duration::hours(23), true),
        (t0() - Duration::hours(24), false),
        (t0() + Duration::seconds(1), false),
        (t0() + Duration::hours(23), false),
    ] {
        // Each accepted attempt consumes the challenge
        let challenge = harness.issue_challenge(&alice).await;
        let signature = alice.sign(&challenge);

        let result = harness
            .verify_signed_at(&alice, &signature, &challenge, Some(signed_at))
            .await;

        if is_accepted {
            assert_matches!(result, Ok(()), "signed at: {signed_at}");
        } else {
            assert_matches!(
                result,
                Err(VerifySignatureError::Expired(_)),
                "signed at: {signed_at}"
            );
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
