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
use sigauth_accounts_sqlite::SqliteUserRepository;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_missing_user_not_found() {
    let harness = SqliteUserRepositoryHarness::new().await;
    sigauth_accounts_repo_tests::test_missing_user_not_found(&harness.catalog).await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_create_and_find_users() {
    let harness = SqliteUserRepositoryHarness::new().await;
    sigauth_accounts_repo_tests::test_create_and_find_users(&harness.catalog).await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_create_user_duplicate_wallet() {
    let harness = SqliteUserRepositoryHarness::new().await;
    sigauth_accounts_repo_tests::test_create_user_duplicate_wallet(&harness.catalog).await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

struct SqliteUserRepositoryHarness {
    catalog: Catalog,
}

impl SqliteUserRepositoryHarness {
    pub async fn new() -> Self {
        // Initialize catalog with a migrated in-memory Sqlite pool
        let sqlite_pool = create_migrated_in_memory_sqlite_pool().await;

        let mut catalog_builder = CatalogBuilder::new();
        catalog_builder.add_value(sqlite_pool);
        catalog_builder.add::<SqliteUserRepository>();

        Self {
            catalog: catalog_builder.build(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
