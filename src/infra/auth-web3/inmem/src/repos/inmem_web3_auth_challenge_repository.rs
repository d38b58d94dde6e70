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

use chrono::{DateTime, Utc};
use dill::*;

use crate::domain::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct InMemoryWeb3AuthChallengeRepository {
    state: Arc<Mutex<State>>,
}

#[derive(Default)]
struct State {
    challenges_by_wallet: HashMap<EvmWalletAddress, Web3AuthChallenge>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[component(pub)]
#[interface(dyn Web3AuthChallengeRepository)]
#[scope(Singleton)]
impl InMemoryWeb3AuthChallengeRepository {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State::default())),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl Web3AuthChallengeRepository for InMemoryWeb3AuthChallengeRepository {
    async fn upsert_challenge(
        &self,
        challenge: &Web3AuthChallenge,
    ) -> Result<(), UpsertChallengeError> {
        let mut guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        guard
            .challenges_by_wallet
            .insert(challenge.wallet_address, challenge.clone());

        Ok(())
    }

    async fn get_challenge(
        &self,
        wallet: &EvmWalletAddress,
    ) -> Result<Web3AuthChallenge, GetChallengeError> {
        let guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        guard
            .challenges_by_wallet
            .get(wallet)
            .cloned()
            .ok_or(GetChallengeError::NotFound { wallet: *wallet })
    }

    async fn consume_challenge(
        &self,
        wallet: &EvmWalletAddress,
        text: &str,
        consumed_at: DateTime<Utc>,
    ) -> Result<(), ConsumeChallengeError> {
        let mut guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        match guard.challenges_by_wallet.get_mut(wallet) {
            Some(challenge) if challenge.text == text && !challenge.is_consumed() => {
                challenge.consumed_at = Some(consumed_at);
                Ok(())
            }
            _ => Err(ConsumeChallengeError::NotAvailable { wallet: *wallet }),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
