// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::{DateTime, Utc};
use sigauth_auth_web3::EvmWalletAddress;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Result of a successful request authentication
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedIdentity {
    pub wallet_address: EvmWalletAddress,
    pub credential: AuthCredential,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthCredential {
    Session { expires_at: DateTime<Utc> },
    ApiKey,
    /// Validation disabled, see [`crate::SessionValidationMode::BypassForTesting`]
    Bypassed,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
