// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::{DateTime, Utc};
use sigauth_auth_web3::{
    EvmWalletAddress,
    EvmWalletAddressConvertor,
    Web3ChallengeMessageGenerator,
};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// `Signing in to {service} as {checksummed address} at {unix time in ms}`
#[dill::component]
#[dill::interface(dyn Web3ChallengeMessageGenerator)]
pub struct Web3ChallengeMessageGeneratorDefault;

impl Web3ChallengeMessageGenerator for Web3ChallengeMessageGeneratorDefault {
    fn generate(
        &self,
        now: DateTime<Utc>,
        service_name: &str,
        wallet: &EvmWalletAddress,
    ) -> String {
        format!(
            "Signing in to {service_name} as {} at {}",
            EvmWalletAddressConvertor::checksummed_string(wallet),
            now.timestamp_millis()
        )
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
