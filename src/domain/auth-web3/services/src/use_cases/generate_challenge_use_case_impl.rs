// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use sigauth_auth_web3::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[dill::component]
#[dill::interface(dyn GenerateChallengeUseCase)]
pub struct GenerateChallengeUseCaseImpl {
    challenge_service: Arc<dyn Web3ChallengeService>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl GenerateChallengeUseCase for GenerateChallengeUseCaseImpl {
    #[tracing::instrument(
        level = "info",
        name = "GenerateChallengeUseCaseImpl::execute",
        skip_all
    )]
    async fn execute(
        &self,
        raw_public_address: &str,
    ) -> Result<ChallengeIssued, GenerateChallengeError> {
        InvalidInputError::ensure_present("publicAddress", raw_public_address)?;

        let wallet =
            EvmWalletAddressConvertor::parse(raw_public_address).map_err(InvalidInputError::from)?;

        let challenge = self
            .challenge_service
            .issue_challenge(&wallet)
            .await
            .map_err(|e| match e {
                IssueChallengeError::Internal(e) => GenerateChallengeError::Internal(e),
            })?;

        tracing::debug!(%wallet, "Challenge issued");

        Ok(ChallengeIssued {
            public_address: EvmWalletAddressConvertor::checksummed_string(&wallet),
            challenge: challenge.text,
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
