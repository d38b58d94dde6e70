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
use uuid::Uuid;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Identity behind a wallet. Created lazily on the first successful login and
/// never deleted by this system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub wallet_address: EvmWalletAddress,
    pub registered_at: DateTime<Utc>,
}

impl User {
    pub fn new(wallet_address: EvmWalletAddress, registered_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            wallet_address,
            registered_at,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
