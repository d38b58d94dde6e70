// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use internal_error::ErrorIntoInternal;
use sigauth_accounts::SessionService;
use sigauth_auth_web3::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[dill::component]
#[dill::interface(dyn GenerateUserSessionUseCase)]
pub struct GenerateUserSessionUseCaseImpl {
    signature_verifier: Arc<dyn Web3SignatureVerifier>,
    session_service: Arc<dyn SessionService>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl GenerateUserSessionUseCase for GenerateUserSessionUseCaseImpl {
    #[tracing::instrument(
        level = "info",
        name = "GenerateUserSessionUseCaseImpl::execute",
        skip_all
    )]
    async fn execute(
        &self,
        raw_public_address: &str,
        challenge: &str,
        signature: &str,
    ) -> Result<UserSessionCreated, GenerateUserSessionError> {
        InvalidInputError::ensure_present("publicAddress", raw_public_address)?;
        InvalidInputError::ensure_present("challenge", challenge)?;
        InvalidInputError::ensure_present("signature", signature)?;

        let wallet =
            EvmWalletAddressConvertor::parse(raw_public_address).map_err(InvalidInputError::from)?;

        match self
            .signature_verifier
            .verify(&wallet, signature, challenge, None)
            .await
        {
            Ok(()) => {}
            Err(VerifySignatureError::InvalidSignature(e)) => {
                tracing::info!(%wallet, "Login rejected");
                return Err(e.into());
            }
            Err(VerifySignatureError::Expired(e)) => {
                tracing::info!(%wallet, error = %e, "Login rejected");
                return Err(InvalidSignatureError.into());
            }
            Err(VerifySignatureError::Internal(e)) => return Err(e.into()),
        }

        let session = self
            .session_service
            .create_session(&wallet)
            .await
            .map_err(ErrorIntoInternal::int_err)?;

        tracing::info!(%wallet, expires_at = %session.expires_at, "User session created");

        Ok(UserSessionCreated {
            public_address: EvmWalletAddressConvertor::checksummed_string(&wallet),
            auth_token: session.token,
            expires_at: session.expires_at,
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
