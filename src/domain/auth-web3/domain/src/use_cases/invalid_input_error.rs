// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use thiserror::Error;

use crate::InvalidWalletAddressError;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Request-level validation failure, a user error and never a server fault
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidInputError {
    #[error(transparent)]
    WalletAddress(#[from] InvalidWalletAddressError),

    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },
}

impl InvalidInputError {
    /// Empty or whitespace-only values count as missing. The value itself is
    /// left untouched, since signed texts must be verified byte for byte.
    pub fn ensure_present(field: &'static str, value: &str) -> Result<(), InvalidInputError> {
        if value.trim().is_empty() {
            Err(Self::MissingField { field })
        } else {
            Ok(())
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
