// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.


use std::net::{Ipv4Addr, SocketAddr};
use std::path::Path;

use duration_string::DurationString;
use internal_error::{InternalError, ResultIntoInternal};
use serde::{Deserialize, Serialize};
use sigauth_accounts::{DEFAULT_SESSION_LIFETIME_DAYS, SessionConfig, SessionValidationMode};
use sigauth_auth_web3::{DEFAULT_CHALLENGE_VALIDITY_HOURS, DEFAULT_SERVICE_NAME, Web3AuthConfig};

use crate::RunArgs;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const DEFAULT_HTTP_PORT: u16 = 8080;

const SECONDS_PER_HOUR: u64 = 60 * 60;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ServerConfig {
    pub server: HttpConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
}

impl ServerConfig {
    /// Defaults are used when no file is given
    pub fn load(maybe_path: Option<&Path>) -> Result<Self, InternalError> {
        let Some(path) = maybe_path else {
            return Ok(Self::default());
        };

        let file = std::fs::File::open(path)
            .int_err()
            .map_err(|e| e.with_context(format!("Reading config {}", path.display())))?;

        serde_yaml::from_reader(file)
            .int_err()
            .map_err(|e| e.with_context(format!("Parsing config {}", path.display())))
    }

    pub fn apply_run_args(&mut self, args: &RunArgs) {
        if let Some(address) = args.address {
            self.server.address = address;
        }
        if let Some(database_url) = &args.database_url {
            self.database.url = Some(database_url.clone());
        }
    }

    pub fn web3_auth_config(&self) -> Result<Web3AuthConfig, InternalError> {
        Ok(Web3AuthConfig::new(
            self.auth.service_name.clone(),
            to_chrono_duration(self.auth.challenge_validity)?,
        ))
    }

    pub fn session_config(
        &self,
        validation_mode: SessionValidationMode,
    ) -> Result<SessionConfig, InternalError> {
        Ok(SessionConfig::new(
            to_chrono_duration(self.auth.session_lifetime)?,
            validation_mode,
        ))
    }
}

fn to_chrono_duration(duration: DurationString) -> Result<chrono::Duration, InternalError> {
    chrono::Duration::from_std(duration.into()).int_err()
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct HttpConfig {
    pub address: SocketAddr,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            address: SocketAddr::from((Ipv4Addr::LOCALHOST, DEFAULT_HTTP_PORT)),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct DatabaseConfig {
    /// SQLite connection string. In-memory stores are used when absent.
    pub url: Option<String>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct AuthConfig {
    /// Appears in the challenge text shown by the wallet
    pub service_name: String,
    pub challenge_validity: DurationString,
    pub session_lifetime: DurationString,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            challenge_validity: DurationString::from(std::time::Duration::from_secs(
                DEFAULT_CHALLENGE_VALIDITY_HOURS.unsigned_abs() * SECONDS_PER_HOUR,
            )),
            session_lifetime: DurationString::from(std::time::Duration::from_secs(
                DEFAULT_SESSION_LIFETIME_DAYS.unsigned_abs() * 24 * SECONDS_PER_HOUR,
            )),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
