// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::{DateTime, Utc};
use dill::{component, interface};
use internal_error::{ErrorIntoInternal, InternalError, ResultIntoInternal};
use sigauth_auth_web3::{EvmWalletAddress, EvmWalletAddressConvertor};
use sqlx::SqlitePool;

use crate::domain::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct SqliteSessionRepository {
    sqlite_pool: SqlitePool,
}

#[component(pub)]
#[interface(dyn SessionRepository)]
impl SqliteSessionRepository {
    pub fn new(sqlite_pool: SqlitePool) -> Self {
        Self { sqlite_pool }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl SessionRepository for SqliteSessionRepository {
    async fn save_session(&self, session: &Session) -> Result<(), SaveSessionError> {
        let wallet_address = EvmWalletAddressConvertor::checksummed_string(&session.wallet_address);

        sqlx::query(
            r#"
            INSERT INTO accounts_sessions (session_token, wallet_address, expires_at, created_at)
                VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&session.token)
        .bind(wallet_address)
        .bind(session.expires_at)
        .bind(session.created_at)
        .execute(&self.sqlite_pool)
        .await
        .map_err(|e: sqlx::Error| match e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                SaveSessionError::Duplicate(SessionTokenDuplicateError)
            }
            e => SaveSessionError::Internal(e.int_err()),
        })?;

        Ok(())
    }

    async fn find_active_session(
        &self,
        wallet: &EvmWalletAddress,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Session>, InternalError> {
        let wallet_address = EvmWalletAddressConvertor::checksummed_string(wallet);

        let maybe_session_row = sqlx::query_as::<_, SessionRowModel>(
            r#"
            SELECT session_token, wallet_address, expires_at, created_at
            FROM accounts_sessions
            WHERE session_token = $1 AND wallet_address = $2
            "#,
        )
        .bind(token)
        .bind(wallet_address)
        .fetch_optional(&self.sqlite_pool)
        .await
        .int_err()?;

        // Expiry is compared on decoded values, not on the stored text
        let maybe_session = maybe_session_row
            .map(Session::try_from)
            .transpose()?
            .filter(|session| session.is_active_at(now));

        Ok(maybe_session)
    }

    async fn find_sessions_by_wallet(
        &self,
        wallet: &EvmWalletAddress,
    ) -> Result<Vec<Session>, InternalError> {
        let wallet_address = EvmWalletAddressConvertor::checksummed_string(wallet);

        let session_rows = sqlx::query_as::<_, SessionRowModel>(
            r#"
            SELECT session_token, wallet_address, expires_at, created_at
            FROM accounts_sessions
            WHERE wallet_address = $1
            ORDER BY created_at, session_token
            "#,
        )
        .bind(wallet_address)
        .fetch_all(&self.sqlite_pool)
        .await
        .int_err()?;

        session_rows.into_iter().map(Session::try_from).collect()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, sqlx::FromRow)]
struct SessionRowModel {
    session_token: String,
    wallet_address: String,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl TryFrom<SessionRowModel> for Session {
    type Error = InternalError;

    fn try_from(row: SessionRowModel) -> Result<Self, Self::Error> {
        Ok(Session {
            token: row.session_token,
            wallet_address: EvmWalletAddressConvertor::parse(&row.wallet_address).int_err()?,
            expires_at: row.expires_at,
            created_at: row.created_at,
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
