// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::{DateTime, Utc};

use crate::EvmWalletAddress;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Produces the human-readable text a wallet is asked to sign
pub trait Web3ChallengeMessageGenerator: Send + Sync {
    fn generate(
        &self,
        now: DateTime<Utc>,
        service_name: &str,
        wallet: &EvmWalletAddress,
    ) -> String;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
