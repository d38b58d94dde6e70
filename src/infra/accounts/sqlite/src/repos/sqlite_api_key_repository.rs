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

pub struct SqliteApiKeyRepository {
    sqlite_pool: SqlitePool,
}

#[component(pub)]
#[interface(dyn ApiKeyRepository)]
impl SqliteApiKeyRepository {
    pub fn new(sqlite_pool: SqlitePool) -> Self {
        Self { sqlite_pool }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl ApiKeyRepository for SqliteApiKeyRepository {
    async fn save_api_key(&self, api_key: &ApiKey) -> Result<(), SaveApiKeyError> {
        let wallet_address = EvmWalletAddressConvertor::checksummed_string(&api_key.wallet_address);

        sqlx::query(
            r#"
            INSERT INTO accounts_api_keys (api_key, wallet_address, created_at)
                VALUES ($1, $2, $3)
            "#,
        )
        .bind(&api_key.key)
        .bind(wallet_address)
        .bind(api_key.created_at)
        .execute(&self.sqlite_pool)
        .await
        .map_err(|e: sqlx::Error| match e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                SaveApiKeyError::Duplicate(ApiKeyDuplicateError)
            }
            e => SaveApiKeyError::Internal(e.int_err()),
        })?;

        Ok(())
    }

    async fn find_api_key(
        &self,
        wallet: &EvmWalletAddress,
        key: &str,
    ) -> Result<Option<ApiKey>, InternalError> {
        let wallet_address = EvmWalletAddressConvertor::checksummed_string(wallet);

        let maybe_api_key_row = sqlx::query_as::<_, ApiKeyRowModel>(
            r#"
            SELECT api_key, wallet_address, created_at
            FROM accounts_api_keys
            WHERE api_key = $1 AND wallet_address = $2
            "#,
        )
        .bind(key)
        .bind(wallet_address)
        .fetch_optional(&self.sqlite_pool)
        .await
        .int_err()?;

        maybe_api_key_row.map(ApiKey::try_from).transpose()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, sqlx::FromRow)]
struct ApiKeyRowModel {
    api_key: String,
    wallet_address: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<ApiKeyRowModel> for ApiKey {
    type Error = InternalError;

    fn try_from(row: ApiKeyRowModel) -> Result<Self, Self::Error> {
        Ok(ApiKey {
            key: row.api_key,
            wallet_address: EvmWalletAddressConvertor::parse(&row.wallet_address).int_err()?,
            created_at: row.created_at,
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
