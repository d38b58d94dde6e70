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
use uuid::Uuid;

use crate::domain::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct SqliteUserRepository {
    sqlite_pool: SqlitePool,
}

#[component(pub)]
#[interface(dyn UserRepository)]
impl SqliteUserRepository {
    pub fn new(sqlite_pool: SqlitePool) -> Self {
        Self { sqlite_pool }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl UserRepository for SqliteUserRepository {
    async fn create_user(&self, user: &User) -> Result<(), CreateUserError> {
        let user_id = user.id.to_string();
        let wallet_address = EvmWalletAddressConvertor::checksummed_string(&user.wallet_address);

        sqlx::query(
            r#"
            INSERT INTO accounts_users (id, wallet_address, registered_at)
                VALUES ($1, $2, $3)
            "#,
        )
        .bind(user_id)
        .bind(wallet_address)
        .bind(user.registered_at)
        .execute(&self.sqlite_pool)
        .await
        .map_err(|e: sqlx::Error| match e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                CreateUserError::Duplicate(UserErrorDuplicate {
                    wallet: user.wallet_address,
                })
            }
            e => CreateUserError::Internal(e.int_err()),
        })?;

        Ok(())
    }

    async fn find_user_by_wallet(
        &self,
        wallet: &EvmWalletAddress,
    ) -> Result<Option<User>, InternalError> {
        let wallet_address = EvmWalletAddressConvertor::checksummed_string(wallet);

        let maybe_user_row = sqlx::query_as::<_, UserRowModel>(
            r#"
            SELECT id, wallet_address, registered_at
            FROM accounts_users
            WHERE wallet_address = $1
            "#,
        )
        .bind(wallet_address)
        .fetch_optional(&self.sqlite_pool)
        .await
        .int_err()?;

        maybe_user_row.map(User::try_from).transpose()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, sqlx::FromRow)]
struct UserRowModel {
    id: String,
    wallet_address: String,
    registered_at: DateTime<Utc>,
}

impl TryFrom<UserRowModel> for User {
    type Error = InternalError;

    fn try_from(row: UserRowModel) -> Result<Self, Self::Error> {
        Ok(User {
            id: Uuid::parse_str(&row.id).int_err()?,
            wallet_address: EvmWalletAddressConvertor::parse(&row.wallet_address).int_err()?,
            registered_at: row.registered_at,
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
