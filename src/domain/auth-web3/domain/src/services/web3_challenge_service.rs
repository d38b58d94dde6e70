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
use thiserror::Error;

use crate::{EvmWalletAddress, Web3AuthChallenge};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
pub trait Web3ChallengeService: Send + Sync {
    /// Issues a fresh challenge, superseding the previous one of the wallet
    async fn issue_challenge(
        &self,
        wallet: &EvmWalletAddress,
    ) -> Result<Web3AuthChallenge, IssueChallengeError>;

    /// Fails unless the wallet holds a challenge that is neither consumed nor
    /// expired
    async fn find_active_challenge(
        &self,
        wallet: &EvmWalletAddress,
    ) -> Result<Web3AuthChallenge, FindActiveChallengeError>;

    /// Spends the wallet's challenge `text` on one login
    async fn consume_challenge(
        &self,
        wallet: &EvmWalletAddress,
        text: &str,
    ) -> Result<(), ConsumeActiveChallengeError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum IssueChallengeError {
    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum FindActiveChallengeError {
    #[error(transparent)]
    NotFound(#[from] ChallengeNotFoundError),

    #[error(transparent)]
    Consumed(#[from] ChallengeConsumedError),

    #[error(transparent)]
    Expired(#[from] ChallengeExpiredError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("No challenge was issued for wallet: {wallet}")]
pub struct ChallengeNotFoundError {
    pub wallet: EvmWalletAddress,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Challenge for wallet {wallet} was already used at {consumed_at}")]
pub struct ChallengeConsumedError {
    pub wallet: EvmWalletAddress,
    pub consumed_at: DateTime<Utc>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Challenge for wallet {wallet} expired at {expired_at}")]
pub struct ChallengeExpiredError {
    pub wallet: EvmWalletAddress,
    pub expired_at: DateTime<Utc>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum ConsumeActiveChallengeError {
    #[error("Challenge of wallet {wallet} is not available for login")]
    NotAvailable { wallet: EvmWalletAddress },

    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
