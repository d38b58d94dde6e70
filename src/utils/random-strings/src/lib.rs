// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use rand::RngCore;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Produces `num_bytes` bytes from the thread-local CSPRNG, hex-encoded
/// (the resulting string is twice as long)
pub fn get_random_hex(num_bytes: usize) -> String {
    let mut bytes = vec![0u8; num_bytes];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
