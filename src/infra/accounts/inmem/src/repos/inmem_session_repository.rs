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
use internal_error::InternalError;
use sigauth_auth_web3::EvmWalletAddress;

use crate::domain::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct InMemorySessionRepository {
    state: Arc<Mutex<State>>,
}

#[derive(Default)]
struct State {
    sessions_by_token: HashMap<String, Session>,
    tokens_by_wallet: HashMap<EvmWalletAddress, Vec<String>>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[component(pub)]
#[interface(dyn SessionRepository)]
#[scope(Singleton)]
impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State::default())),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn save_session(&self, session: &Session) -> Result<(), SaveSessionError> {
        let mut guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        if guard.sessions_by_token.contains_key(&session.token) {
            return Err(SessionTokenDuplicateError.into());
        }

        guard
            .sessions_by_token
            .insert(session.token.clone(), session.clone());
        guard
            .tokens_by_wallet
            .entry(session.wallet_address)
            .or_default()
            .push(session.token.clone());

        Ok(())
    }

    async fn find_active_session(
        &self,
        wallet: &EvmWalletAddress,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Session>, InternalError> {
        let guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        Ok(guard
            .sessions_by_token
            .get(token)
            .filter(|session| session.wallet_address == *wallet && session.is_active_at(now))
            .cloned())
    }

    async fn find_sessions_by_wallet(
        &self,
        wallet: &EvmWalletAddress,
    ) -> Result<Vec<Session>, InternalError> {
        let guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        let sessions = guard
            .tokens_by_wallet
            .get(wallet)
            .map(|tokens| {
                tokens
                    .iter()
                    .filter_map(|token| guard.sessions_by_token.get(token).cloned())
                    .collect()
            })
            .unwrap_or_default();

        Ok(sessions)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
