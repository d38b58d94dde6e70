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

use crate::{InvalidInputError, InvalidSignatureError};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Exchanges a signed challenge for a bearer session token
#[async_trait::async_trait]
pub trait GenerateUserSessionUseCase: Send + Sync {
    async fn execute(
        &self,
        raw_public_address: &str,
        challenge: &str,
        signature: &str,
    ) -> Result<UserSessionCreated, GenerateUserSessionError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSessionCreated {
    pub public_address: String,
    pub auth_token: String,
    pub expires_at: DateTime<Utc>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum GenerateUserSessionError {
    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),

    /// Covers every verification failure: unrecoverable signature, address
    /// mismatch, unknown or superseded challenge, expiry
    #[error(transparent)]
    SignatureInvalid(#[from] InvalidSignatureError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
