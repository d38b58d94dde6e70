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
use sigauth_accounts_sqlite::SqliteSessionRepository;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_no_sessions() {
    let harness = SqliteSessionRepositoryHarness::new().await;
    sigauth_accounts_repo_tests::test_no_sessions(&harness.catalog).await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_find_active_session() {
    let harness = SqliteSessionRepositoryHarness::new().await;
    sigauth_accounts_repo_tests::test_find_active_session(&harness.catalog).await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_multiple_sessions_per_wallet() {
    let harness = SqliteSessionRepositoryHarness::new().await;
    sigauth_accounts_repo_tests::test_multiple_sessions_per_wallet(&harness.catalog).await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_duplicate_session_token() {
    let harness = SqliteSessionRepositoryHarness::new().await;
    sigauth_accounts_repo_tests::test_duplicate_session_token(&harness.catalog).await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

struct SqliteSessionRepositoryHarness {
    catalog: Catalog,
}

impl SqliteSessionRepositoryHarness {
    pub async fn new() -> Self {
        // Initialize catalog with a migrated in-memory Sqlite pool
        let sqlite_pool = create_migrated_in_memory_sqlite_pool().await;

        let mut catalog_builder = CatalogBuilder::new();
        catalog_builder.add_value(sqlite_pool);
        catalog_builder.add::<SqliteSessionRepository>();

        Self {
            catalog: catalog_builder.build(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
