// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::str::FromStr;

use dill::{Catalog, CatalogBuilder};
use secrecy::{ExposeSecret, SecretString};
use sqlx::SqlitePool;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

use crate::DatabaseError;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Schema of every SQLite-backed repository in the workspace
pub static SQLITE_MIGRATOR: Migrator = sqlx::migrate!("../../../migrations/sqlite");

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct SqlitePlugin;

impl SqlitePlugin {
    /// Opens the database in WAL mode (creating the file when missing) and
    /// brings its schema up to date
    #[tracing::instrument(level = "info", skip_all)]
    pub async fn connect_sqlite_pool(
        connection_string: &SecretString,
    ) -> Result<SqlitePool, DatabaseError> {
        let connect_options = SqliteConnectOptions::from_str(connection_string.expose_secret())?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);

        let sqlite_pool = SqlitePoolOptions::new()
            .connect_with(connect_options)
            .await?;

        Self::run_migrations(&sqlite_pool).await?;

        Ok(sqlite_pool)
    }

    #[tracing::instrument(level = "info", skip_all)]
    pub async fn run_migrations(sqlite_pool: &SqlitePool) -> Result<(), DatabaseError> {
        SQLITE_MIGRATOR.run(sqlite_pool).await?;
        Ok(())
    }

    pub fn catalog_with_connected_pool(
        base_catalog: &Catalog,
        sqlite_pool: SqlitePool,
    ) -> Catalog {
        CatalogBuilder::new_chained(base_catalog)
            .add_value(sqlite_pool)
            .build()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
