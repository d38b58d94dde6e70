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

pub const DEFAULT_SERVICE_NAME: &str = "sigauth";

pub const DEFAULT_CHALLENGE_VALIDITY_HOURS: i64 = 24;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Web3AuthConfig {
    /// Embedded into every challenge so a user sees which service asks for
    /// a signature
    pub service_name: String,
    /// How long an issued challenge (and a signature over it) stays usable
    pub challenge_validity: Duration,
}

impl Web3AuthConfig {
    pub fn new(service_name: impl Into<String>, challenge_validity: Duration) -> Self {
        Self {
            service_name: service_name.into(),
            challenge_validity,
        }
    }
}

impl Default for Web3AuthConfig {
    fn default() -> Self {
        Self::new(
            DEFAULT_SERVICE_NAME,
            Duration::hours(DEFAULT_CHALLENGE_VALIDITY_HOURS),
        )
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
