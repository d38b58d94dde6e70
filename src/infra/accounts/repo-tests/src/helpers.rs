// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::{DateTime, TimeZone, Utc};
use sigauth_auth_web3::EvmWalletAddress;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub(crate) fn wallet(seed: u8) -> EvmWalletAddress {
    EvmWalletAddress::repeat_byte(seed)
}

pub(crate) fn reference_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2050, 1, 2, 12, 0, 0).unwrap()
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
