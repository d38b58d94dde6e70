// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use database_common::testing::create_migrated_in_memory_sqlite_pool;
use dill::{Catalog, CatalogBuilder};
use sigauth_auth_web3_sqlite::SqliteWeb3AuthChallengeRepository;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_get_challenge_not_found() {
    let harness = SqliteWeb3AuthChallengeRepositoryHarness::new().await;
    sigauth_auth_web3_repo_tests::test_get_challenge_not_found(&harness.catalog).await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_upsert_replaces_previous_challenge() {
    let harness = SqliteWeb3AuthChallengeRepositoryHarness::new().await;
    sigauth_auth_web3_repo_tests::test_upsert_replaces_previous_challenge(&harness.catalog).await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_challenges_are_kept_per_wallet() {
    let harness = SqliteWeb3AuthChallengeRepositoryHarness::new().await;
    sigauth_auth_web3_repo_tests::test_challenges_are_kept_per_wallet(&harness.catalog).await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_consume_challenge_only_once() {
    let harness = SqliteWeb3AuthChallengeRepositoryHarness::new().await;
    sigauth_auth_web3_repo_tests::test_consume_challenge_only_once(&harness.catalog).await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_consume_challenge_requires_current_text() {
    let harness = SqliteWeb3AuthChallengeRepositoryHarness::new().await;
    sigauth_auth_web3_repo_tests::test_consume_challenge_requires_current_text(
        &harness.catalog,
    )
    .await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_upsert_replaces_consumed_challenge() {
    let harness = SqliteWeb3AuthChallengeRepositoryHarness::new().await;
    sigauth_auth_web3_repo_tests::test_upsert_replaces_consumed_challenge(&harness.catalog).await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

struct SqliteWeb3AuthChallengeRepositoryHarness {
    catalog: Catalog,
}

impl SqliteWeb3AuthChallengeRepositoryHarness {
    pub async fn new() -> Self {
        // Initialize catalog with a migrated in-memory Sqlite pool
        let sqlite_pool = create_migrated_in_memory_sqlite_pool().await;

        let mut catalog_builder = CatalogBuilder::new();
        catalog_builder.add_value(sqlite_pool);
        catalog_builder.add::<SqliteWeb3AuthChallengeRepository>();

        Self {
            catalog: catalog_builder.build(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
