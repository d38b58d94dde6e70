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

use crate::EvmWalletAddress;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Decides whether `signature` proves that the owner of `wallet` signed
/// `challenge_text`, and that the challenge is the wallet's current one, still
/// fresh and unused. A successful verification consumes the challenge.
#[async_trait::async_trait]
pub trait Web3SignatureVerifier: Send + Sync {
    async fn verify(
        &self,
        wallet: &EvmWalletAddress,
        signature: &str,
        challenge_text: &str,
        signed_at: Option<DateTime<Utc>>,
    ) -> Result<(), VerifySignatureError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum VerifySignatureError {
    #[error(transparent)]
    InvalidSignature(#[from] InvalidSignatureError),

    #[error(transparent)]
    Expired(#[from] SignatureExpiredError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

/// Carries no detail about which check failed
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[error("Signature invalid")]
pub struct InvalidSignatureError;

/// Either the challenge or the signing time lies outside the validity window,
/// or the signing time is in the future
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[error("Signature expired")]
pub struct SignatureExpiredError;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
