// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use sigauth_auth_web3::*;
use time_source::SystemTimeSource;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Accepts a signature only when, in this order:
/// - a signer can be recovered from it over `challenge_text`;
/// - that signer is the claimed wallet;
/// - `challenge_text` is the wallet's stored challenge and was issued within
///   the validity window;
/// - `signed_at`, if given, is not in the future and not older than the
///   validity window;
/// - the challenge has not been consumed yet, after which it is consumed.
///
/// Recovery, mismatch, unknown and consumed challenges all yield the same
/// [`InvalidSignatureError`]; the specific reason is only logged.
#[dill::component]
#[dill::interface(dyn Web3SignatureVerifier)]
pub struct Web3SignatureVerifierImpl {
    challenge_service: Arc<dyn Web3ChallengeService>,
    time_source: Arc<dyn SystemTimeSource>,
    config: Arc<Web3AuthConfig>,
}

impl Web3SignatureVerifierImpl {
    fn is_within_validity_window(&self, signed_at: DateTime<Utc>) -> bool {
        let now = self.time_source.now();
        let validity = self.config.challenge_validity;

        signed_at <= now && now - signed_at < validity
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl Web3SignatureVerifier for Web3SignatureVerifierImpl {
    #[tracing::instrument(level = "debug", skip_all, fields(%wallet))]
    async fn verify(
        &self,
        wallet: &EvmWalletAddress,
        signature: &str,
        challenge_text: &str,
        signed_at: Option<DateTime<Utc>>,
    ) -> Result<(), VerifySignatureError> {
        let recovered = match recover_personal_signer(challenge_text, signature) {
            Ok(recovered) => recovered,
            Err(e) => {
                tracing::debug!(error = %e, "Signer recovery failed");
                return Err(InvalidSignatureError.into());
            }
        };

        if recovered != *wallet {
            tracing::debug!(%recovered, "Recovered signer differs from the claimed wallet");
            return Err(InvalidSignatureError.into());
        }

        let challenge = match self.challenge_service.find_active_challenge(wallet).await {
            Ok(challenge) => challenge,
            Err(FindActiveChallengeError::NotFound(e)) => {
                tracing::debug!(error = %e, "No challenge to verify against");
                return Err(InvalidSignatureError.into());
            }
            Err(FindActiveChallengeError::Consumed(e)) => {
                tracing::debug!(error = %e, "Challenge was already used");
                return Err(InvalidSignatureError.into());
            }
            Err(FindActiveChallengeError::Expired(e)) => {
                tracing::debug!(error = %e, "Challenge expired");
                return Err(SignatureExpiredError.into());
            }
            Err(FindActiveChallengeError::Internal(e)) => return Err(e.into()),
        };

        if challenge.text != challenge_text {
            tracing::debug!("Signed text is not the current challenge of the wallet");
            return Err(InvalidSignatureError.into());
        }

        if let Some(signed_at) = signed_at.filter(|t| !self.is_within_validity_window(*t)) {
            tracing::debug!(%signed_at, "Signing time is outside the validity window");
            return Err(SignatureExpiredError.into());
        }

        match self
            .challenge_service
            .consume_challenge(wallet, challenge_text)
            .await
        {
            Ok(()) => Ok(()),
            Err(ConsumeActiveChallengeError::NotAvailable { .. }) => {
                tracing::debug!("Challenge was used by a concurrent login");
                Err(InvalidSignatureError.into())
            }
            Err(ConsumeActiveChallengeError::Internal(e)) => Err(e.into()),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
