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

use crate::Session;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait::async_trait]
pub trait SessionRepository: Send + Sync {
    async fn save_session(&self, session: &Session) -> Result<(), SaveSessionError>;

    /// Returns the session only if both the wallet and the token match and
    /// it has not expired at `now`
    async fn find_active_session(
        &self,
        wallet: &EvmWalletAddress,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Session>, InternalError>;

    /// All sessions of the wallet including expired ones, oldest first
    async fn find_sessions_by_wallet(
        &self,
        wallet: &EvmWalletAddress,
    ) -> Result<Vec<Session>, InternalError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum SaveSessionError {
    #[error(transparent)]
    Duplicate(#[from] SessionTokenDuplicateError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Session token already in use")]
pub struct SessionTokenDuplicateError;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
