// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::{DateTime, Utc};
use internal_error::{InternalError, ResultIntoInternal};
use sqlx::SqlitePool;

use crate::domain::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct SqliteWeb3AuthChallengeRepository {
    sqlite_pool: SqlitePool,
}

#[dill::component(pub)]
#[dill::interface(dyn Web3AuthChallengeRepository)]
impl SqliteWeb3AuthChallengeRepository {
    pub fn new(sqlite_pool: SqlitePool) -> Self {
        Self { sqlite_pool }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl Web3AuthChallengeRepository for SqliteWeb3AuthChallengeRepository {
    async fn upsert_challenge(
        &self,
        challenge: &Web3AuthChallenge,
    ) -> Result<(), UpsertChallengeError> {
        let wallet_address =
            EvmWalletAddressConvertor::checksummed_string(&challenge.wallet_address);

        sqlx::query(
            r#"
            INSERT INTO web3_auth_challenges(wallet_address, challenge, issued_at, consumed_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (wallet_address) DO UPDATE
                SET challenge = excluded.challenge,
                    issued_at = excluded.issued_at,
                    consumed_at = excluded.consumed_at
            "#,
        )
        .bind(wallet_address)
        .bind(&challenge.text)
        .bind(challenge.issued_at)
        .bind(challenge.consumed_at)
        .execute(&self.sqlite_pool)
        .await
        .int_err()?;

        Ok(())
    }

    async fn get_challenge(
        &self,
        wallet: &EvmWalletAddress,
    ) -> Result<Web3AuthChallenge, GetChallengeError> {
        let maybe_challenge_row = sqlx::query_as::<_, Web3AuthChallengeRowModel>(
            r#"
            SELECT wallet_address,
                   challenge,
                   issued_at,
                   consumed_at
            FROM web3_auth_challenges
            WHERE wallet_address = $1
            "#,
        )
        .bind(EvmWalletAddressConvertor::checksummed_string(wallet))
        .fetch_optional(&self.sqlite_pool)
        .await
        .int_err()?;

        if let Some(challenge_row) = maybe_challenge_row {
            let challenge = challenge_row.try_into()?;

            Ok(challenge)
        } else {
            Err(GetChallengeError::NotFound { wallet: *wallet })
        }
    }

    async fn consume_challenge(
        &self,
        wallet: &EvmWalletAddress,
        text: &str,
        consumed_at: DateTime<Utc>,
    ) -> Result<(), ConsumeChallengeError> {
        let update_result = sqlx::query(
            r#"
            UPDATE web3_auth_challenges
            SET consumed_at = $1
            WHERE wallet_address = $2
              AND challenge = $3
              AND consumed_at IS NULL
            "#,
        )
        .bind(consumed_at)
        .bind(EvmWalletAddressConvertor::checksummed_string(wallet))
        .bind(text)
        .execute(&self.sqlite_pool)
        .await
        .int_err()?;

        if update_result.rows_affected() == 0 {
            return Err(ConsumeChallengeError::NotAvailable { wallet: *wallet });
        }

        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, sqlx::FromRow)]
struct Web3AuthChallengeRowModel {
    wallet_address: String,
    challenge: String,
    issued_at: DateTime<Utc>,
    consumed_at: Option<DateTime<Utc>>,
}

impl TryFrom<Web3AuthChallengeRowModel> for Web3AuthChallenge {
    type Error = InternalError;

    fn try_from(row: Web3AuthChallengeRowModel) -> Result<Self, Self::Error> {
        Ok(Web3AuthChallenge {
            wallet_address: EvmWalletAddressConvertor::parse(&row.wallet_address).int_err()?,
            text: row.challenge,
            issued_at: row.issued_at,
            consumed_at: row.consumed_at,
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
