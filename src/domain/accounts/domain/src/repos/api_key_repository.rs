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

use crate::ApiKey;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
pub trait ApiKeyRepository: Send + Sync {
    async fn save_api_key(&self, api_key: &ApiKey) -> Result<(), SaveApiKeyError>;

    async fn find_api_key(
        &self,
        wallet: &EvmWalletAddress,
        key: &str,
    ) -> Result<Option<ApiKey>, InternalError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum SaveApiKeyError {
    #[error(transparent)]
    Duplicate(#[from] ApiKeyDuplicateError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("API key already in use")]
pub struct ApiKeyDuplicateError;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
