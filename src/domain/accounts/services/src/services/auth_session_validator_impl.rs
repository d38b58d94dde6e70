// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use sigauth_accounts::*;
use sigauth_auth_web3::EvmWalletAddress;
use time_source::SystemTimeSource;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[dill::component]
#[dill::interface(dyn AuthSessionValidator)]
pub struct AuthSessionValidatorImpl {
    session_repo: Arc<dyn SessionRepository>,
    api_key_repo: Arc<dyn ApiKeyRepository>,
    time_source: Arc<dyn SystemTimeSource>,
    config: Arc<SessionConfig>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl AuthSessionValidator for AuthSessionValidatorImpl {
    #[tracing::instrument(level = "debug", skip_all, fields(%wallet))]
    async fn validate(
        &self,
        wallet: &EvmWalletAddress,
        token: &str,
    ) -> Result<AuthenticatedIdentity, ValidateSessionError> {
        if self.config.validation_mode == SessionValidationMode::BypassForTesting {
            return Ok(AuthenticatedIdentity {
                wallet_address: *wallet,
                credential: AuthCredential::Bypassed,
            });
        }

        if token.is_empty() {
            return Err(UnauthenticatedError.into());
        }

        let now = self.time_source.now();

        if let Some(session) = self
            .session_repo
            .find_active_session(wallet, token, now)
            .await?
        {
            return Ok(AuthenticatedIdentity {
                wallet_address: session.wallet_address,
                credential: AuthCredential::Session {
                    expires_at: session.expires_at,
                },
            });
        }

        if let Some(api_key) = self.api_key_repo.find_api_key(wallet, token).await? {
            return Ok(AuthenticatedIdentity {
                wallet_address: api_key.wallet_address,
                credential: AuthCredential::ApiKey,
            });
        }

        tracing::debug!("No active session or API key matches");

        Err(UnauthenticatedError.into())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
