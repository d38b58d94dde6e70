// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::{DateTime, Duration, Utc};

use crate::EvmWalletAddress;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// The single live challenge of a wallet. Issuing a new one for the same
/// wallet replaces it. A challenge admits one login: once consumed it stays
/// stored but never verifies again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Web3AuthChallenge {
    pub wallet_address: EvmWalletAddress,
    pub text: String,
    pub issued_at: DateTime<Utc>,
    pub consumed_at: Option<DateTime<Utc>>,
}

impl Web3AuthChallenge {
    pub fn new(wallet_address: EvmWalletAddress, text: String, issued_at: DateTime<Utc>) -> Self {
        Self {
            wallet_address,
            text,
            issued_at,
            consumed_at: None,
        }
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed_at.is_some()
    }

    pub fn expires_at(&self, validity: Duration) -> DateTime<Utc> {
        self.issued_at + validity
    }

    pub fn is_active_at(&self, now: DateTime<Utc>, validity: Duration) -> bool {
        now < self.expires_at(validity)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
