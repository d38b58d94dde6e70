// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use internal_error::{ErrorIntoInternal, InternalError};
use random_strings::get_random_hex;
use sigauth_accounts::*;
use sigauth_auth_web3::EvmWalletAddress;
use time_source::SystemTimeSource;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Session tokens carry this many random bytes, hex-encoded
pub const SESSION_TOKEN_BYTES: usize = 24;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[dill::component]
#[dill::interface(dyn SessionService)]
pub struct SessionServiceImpl {
    user_repo: Arc<dyn UserRepository>,
    session_repo: Arc<dyn SessionRepository>,
    time_source: Arc<dyn SystemTimeSource>,
    config: Arc<SessionConfig>,
}

impl SessionServiceImpl {
    async fn ensure_user_registered(
        &self,
        wallet: &EvmWalletAddress,
    ) -> Result<User, InternalError> {
        if let Some(user) = self.user_repo.find_user_by_wallet(wallet).await? {
            return Ok(user);
        }

        let user = User::new(*wallet, self.time_source.now());

        match self.user_repo.create_user(&user).await {
            Ok(()) => {
                tracing::info!(user_id = %user.id, "Registered new user");
                Ok(user)
            }
            Err(CreateUserError::Duplicate(_)) => {
                // Lost the race against a concurrent first login of the same wallet
                tracing::debug!("User registered concurrently, re-reading");
                self.user_repo
                    .find_user_by_wallet(wallet)
                    .await?
                    .ok_or_else(|| "User is missing after a duplicate registration".int_err())
            }
            Err(CreateUserError::Internal(e)) => Err(e),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl SessionService for SessionServiceImpl {
    #[tracing::instrument(level = "debug", skip_all, fields(%wallet))]
    async fn create_session(
        &self,
        wallet: &EvmWalletAddress,
    ) -> Result<CreatedSession, CreateSessionError> {
        self.ensure_user_registered(wallet)
            .await
            .map_err(CreateSessionError::UserCreationFailed)?;

        let now = self.time_source.now();
        let session = Session {
            token: get_random_hex(SESSION_TOKEN_BYTES),
            wallet_address: *wallet,
            expires_at: now + self.config.session_lifetime,
            created_at: now,
        };

        self.session_repo
            .save_session(&session)
            .await
            .map_err(|e| CreateSessionError::SessionCreationFailed(e.int_err()))?;

        tracing::debug!(expires_at = %session.expires_at, "Session created");

        Ok(CreatedSession {
            token: session.token,
            expires_at: session.expires_at,
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
