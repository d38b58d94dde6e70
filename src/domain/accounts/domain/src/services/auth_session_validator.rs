// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use internal_error::InternalError;
use sigauth_auth_web3::EvmWalletAddress;
use thiserror::Error;

use crate::AuthenticatedIdentity;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
pub trait AuthSessionValidator: Send + Sync {
    /// Accepts an unexpired session of the wallet, or else an API key of the
    /// wallet equal to `token`
    async fn validate(
        &self,
        wallet: &EvmWalletAddress,
        token: &str,
    ) -> Result<AuthenticatedIdentity, ValidateSessionError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum ValidateSessionError {
    #[error(transparent)]
    Unauthenticated(#[from] UnauthenticatedError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[error("Unauthenticated")]
pub struct UnauthenticatedError;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
