// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

use crate::SqlitePlugin;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Fresh migrated in-memory database. A single connection keeps every query on
/// the same in-memory instance.
pub async fn create_migrated_in_memory_sqlite_pool() -> SqlitePool {
    let sqlite_pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    SqlitePlugin::run_migrations(&sqlite_pool).await.unwrap();

    sqlite_pool
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
