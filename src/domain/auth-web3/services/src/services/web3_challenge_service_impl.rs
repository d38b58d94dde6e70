// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use internal_error::ResultIntoInternal;
use sigauth_auth_web3::*;
use time_source::SystemTimeSource;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[dill::component]
#[dill::interface(dyn Web3ChallengeService)]
pub struct Web3ChallengeServiceImpl {
    challenge_repo: Arc<dyn Web3AuthChallengeRepository>,
    message_generator: Arc<dyn Web3ChallengeMessageGenerator>,
    time_source: Arc<dyn SystemTimeSource>,
    config: Arc<Web3AuthConfig>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl Web3ChallengeService for Web3ChallengeServiceImpl {
    #[tracing::instrument(level = "debug", skip_all, fields(%wallet))]
    async fn issue_challenge(
        &self,
        wallet: &EvmWalletAddress,
    ) -> Result<Web3AuthChallenge, IssueChallengeError> {
        let now = self.time_source.now();

        let challenge = Web3AuthChallenge::new(
            *wallet,
            self.message_generator
                .generate(now, &self.config.service_name, wallet),
            now,
        );

        self.challenge_repo
            .upsert_challenge(&challenge)
            .await
            .int_err()?;

        Ok(challenge)
    }

    #[tracing::instrument(level = "debug", skip_all, fields(%wallet))]
    async fn find_active_challenge(
        &self,
        wallet: &EvmWalletAddress,
    ) -> Result<Web3AuthChallenge, FindActiveChallengeError> {
        let challenge = match self.challenge_repo.get_challenge(wallet).await {
            Ok(challenge) => challenge,
            Err(GetChallengeError::NotFound { wallet }) => {
                return Err(ChallengeNotFoundError { wallet }.into());
            }
            Err(GetChallengeError::Internal(e)) => return Err(e.into()),
        };

        if let Some(consumed_at) = challenge.consumed_at {
            return Err(ChallengeConsumedError {
                wallet: *wallet,
                consumed_at,
            }
            .into());
        }

        let validity = self.config.challenge_validity;

        if challenge.is_active_at(self.time_source.now(), validity) {
            Ok(challenge)
        } else {
            Err(ChallengeExpiredError {
                wallet: *wallet,
                expired_at: challenge.expires_at(validity),
            }
            .into())
        }
    }

    #[tracing::instrument(level = "debug", skip_all, fields(%wallet))]
    async fn consume_challenge(
        &self,
        wallet: &EvmWalletAddress,
        text: &str,
    ) -> Result<(), ConsumeActiveChallengeError> {
        match self
            .challenge_repo
            .consume_challenge(wallet, text, self.time_source.now())
            .await
        {
            Ok(()) => Ok(()),
            Err(ConsumeChallengeError::NotAvailable { wallet }) => {
                Err(ConsumeActiveChallengeError::NotAvailable { wallet })
            }
            Err(ConsumeChallengeError::Internal(e)) => Err(e.into()),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
