// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use dill::*;
use internal_error::InternalError;
use sigauth_auth_web3::EvmWalletAddress;

use crate::domain::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct InMemoryApiKeyRepository {
    state: Arc<Mutex<State>>,
}

#[derive(Default)]
struct State {
    api_keys_by_key: HashMap<String, ApiKey>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[component(pub)]
#[interface(dyn ApiKeyRepository)]
#[scope(Singleton)]
impl InMemoryApiKeyRepository {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State::default())),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl ApiKeyRepository for InMemoryApiKeyRepository {
    async fn save_api_key(&self, api_key: &ApiKey) -> Result<(), SaveApiKeyError> {
        let mut guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        if guard.api_keys_by_key.contains_key(&api_key.key) {
            return Err(ApiKeyDuplicateError.into());
        }

        guard
            .api_keys_by_key
            .insert(api_key.key.clone(), api_key.clone());

        Ok(())
    }

    async fn find_api_key(
        &self,
        wallet: &EvmWalletAddress,
        key: &str,
    ) -> Result<Option<ApiKey>, InternalError> {
        let guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        Ok(guard
            .api_keys_by_key
            .get(key)
            .filter(|api_key| api_key.wallet_address == *wallet)
            .cloned())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
