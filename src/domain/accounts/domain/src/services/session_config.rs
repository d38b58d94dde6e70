// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::Duration;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const ENV_VAR_SIGAUTH_INSECURE_SESSION_BYPASS: &str = "SIGAUTH_INSECURE_SESSION_BYPASS";

pub const DEFAULT_SESSION_LIFETIME_DAYS: i64 = 2;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub session_lifetime: Duration,
    pub validation_mode: SessionValidationMode,
}

impl SessionConfig {
    pub fn new(session_lifetime: Duration, validation_mode: SessionValidationMode) -> Self {
        Self {
            session_lifetime,
            validation_mode,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new(
            Duration::days(DEFAULT_SESSION_LIFETIME_DAYS),
            SessionValidationMode::Enforced,
        )
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SessionValidationMode {
    #[default]
    Enforced,
    /// Every request is accepted as the wallet it claims to be. Only for
    /// test and benchmark environments.
    BypassForTesting,
}

impl SessionValidationMode {
    pub fn load_from_env() -> Self {
        let maybe_value = std::env::var(ENV_VAR_SIGAUTH_INSECURE_SESSION_BYPASS).ok();
        Self::from_env_value(maybe_value.as_deref())
    }

    /// Only the exact value `true` enables the bypass
    pub fn from_env_value(maybe_value: Option<&str>) -> Self {
        match maybe_value.map(str::trim) {
            Some("true") => Self::BypassForTesting,
            _ => Self::Enforced,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
