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

pub struct InMemoryUserRepository {
    state: Arc<Mutex<State>>,
}

#[derive(Default)]
struct State {
    users_by_wallet: HashMap<EvmWalletAddress, User>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[component(pub)]
#[interface(dyn UserRepository)]
#[scope(Singleton)]
impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State::default())),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create_user(&self, user: &User) -> Result<(), CreateUserError> {
        let mut guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        if guard.users_by_wallet.contains_key(&user.wallet_address) {
            return Err(UserErrorDuplicate {
                wallet: user.wallet_address,
            }
            .into());
        }

        guard
            .users_by_wallet
            .insert(user.wallet_address, user.clone());

        Ok(())
    }

    async fn find_user_by_wallet(
        &self,
        wallet: &EvmWalletAddress,
    ) -> Result<Option<User>, InternalError> {
        let guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        Ok(guard.users_by_wallet.get(wallet).cloned())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
