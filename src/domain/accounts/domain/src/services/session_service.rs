// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::{DateTime, Utc};
use internal_error::InternalError;
use sigauth_auth_web3::EvmWalletAddress;
use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Mints bearer sessions for wallets that have proven key ownership
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait::async_trait]
pub trait SessionService: Send + Sync {
    /// Finds or lazily registers the user of the wallet, then stores a new
    /// session. Concurrent logins of one wallet yield independent sessions.
    async fn create_session(
        &self,
        wallet: &EvmWalletAddress,
    ) -> Result<CreatedSession, CreateSessionError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedSession {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum CreateSessionError {
    #[error("User creation failed")]
    UserCreationFailed(#[source] InternalError),

    #[error("Session creation failed")]
    SessionCreationFailed(#[source] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
