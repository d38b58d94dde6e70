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
pub trait Web3AuthChallengeRepository: Send + Sync {
    /// Stores the challenge, replacing any previous challenge of the same
    /// wallet. Implementations must perform this as one atomic write.
    async fn upsert_challenge(
        &self,
        challenge: &Web3AuthChallenge,
    ) -> Result<(), UpsertChallengeError>;

    async fn get_challenge(
        &self,
        wallet: &EvmWalletAddress,
    ) -> Result<Web3AuthChallenge, GetChallengeError>;

    /// Marks the wallet's challenge as consumed, provided it still reads `text`
    /// and was not consumed before. The check and the write happen atomically,
    /// so of two concurrent calls at most one succeeds.
    async fn consume_challenge(
        &self,
        wallet: &EvmWalletAddress,
        text: &str,
        consumed_at: DateTime<Utc>,
    ) -> Result<(), ConsumeChallengeError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum UpsertChallengeError {
    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl PartialEq for UpsertChallengeError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Internal(a), Self::Internal(b)) => a.reason().eq(&b.reason()),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum GetChallengeError {
    #[error("Challenge not found for wallet: {wallet}")]
    NotFound { wallet: EvmWalletAddress },

    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl PartialEq for GetChallengeError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::NotFound { wallet: a }, Self::NotFound { wallet: b }) => a == b,
            (Self::Internal(a), Self::Internal(b)) => a.reason().eq(&b.reason()),
            (_, _) => false,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum ConsumeChallengeError {
    #[error("No unconsumed challenge with the given text for wallet: {wallet}")]
    NotAvailable { wallet: EvmWalletAddress },

    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl PartialEq for ConsumeChallengeError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::NotAvailable { wallet: a }, Self::NotAvailable { wallet: b }) => a == b,
            (Self::Internal(a), Self::Internal(b)) => a.reason().eq(&b.reason()),
            (_, _) => false,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
