// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub type EvmWalletAddress = alloy_primitives::Address;

const ADDRESS_HEX_LENGTH: usize = 40;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Converts untrusted address strings into [`EvmWalletAddress`] and back into
/// the canonical EIP-55 checksummed form used for storage and comparison.
///
/// Accepted inputs: `0x`-prefixed or bare 40-digit hex strings that are
/// all-lowercase, all-uppercase, or mixed-case with a valid checksum.
/// Mixed-case input with a wrong checksum is rejected, since it most likely
/// contains a typo.
pub struct EvmWalletAddressConvertor;

impl EvmWalletAddressConvertor {
    pub fn parse(raw: &str) -> Result<EvmWalletAddress, InvalidWalletAddressError> {
        let hex_part = raw.strip_prefix("0x").unwrap_or(raw);

        if hex_part.len() != ADDRESS_HEX_LENGTH || !hex_part.bytes().all(|b| b.is_ascii_hexdigit())
        {
            return Err(InvalidWalletAddressError::new(raw));
        }

        let mut bytes = [0u8; 20];
        hex::decode_to_slice(hex_part, &mut bytes)
            .map_err(|_| InvalidWalletAddressError::new(raw))?;
        let wallet = EvmWalletAddress::from(bytes);

        let has_lowercase = hex_part.bytes().any(|b| b.is_ascii_lowercase());
        let has_uppercase = hex_part.bytes().any(|b| b.is_ascii_uppercase());

        if has_lowercase && has_uppercase {
            let checksummed = Self::checksummed_string(&wallet);
            if &checksummed[2..] != hex_part {
                return Err(InvalidWalletAddressError::new(raw));
            }
        }

        Ok(wallet)
    }

    /// Shorthand for parse followed by formatting
    pub fn normalize(raw: &str) -> Result<String, InvalidWalletAddressError> {
        Self::parse(raw).map(|wallet| Self::checksummed_string(&wallet))
    }

    pub fn checksummed_string(wallet: &EvmWalletAddress) -> String {
        wallet.to_checksum(None)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid wallet address: '{raw}'")]
pub struct InvalidWalletAddressError {
    pub raw: String,
}

impl InvalidWalletAddressError {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
