// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use alloy_primitives::Signature;
use thiserror::Error;

use crate::EvmWalletAddress;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

const SIGNATURE_BYTE_LENGTH: usize = 65;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// ECDSA (secp256k1) signature over an EIP-191 "personal message", as produced
/// by wallet `personal_sign`: 65 bytes `r || s || v`, hex-encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersonalSignature(Signature);

impl PersonalSignature {
    pub fn parse(raw: &str) -> Result<Self, MalformedSignatureError> {
        let hex_part = raw.strip_prefix("0x").unwrap_or(raw);

        let bytes = hex::decode(hex_part).map_err(|e| MalformedSignatureError {
            reason: e.to_string(),
        })?;

        if bytes.len() != SIGNATURE_BYTE_LENGTH {
            return Err(MalformedSignatureError {
                reason: format!(
                    "expected {SIGNATURE_BYTE_LENGTH} bytes, got {}",
                    bytes.len()
                ),
            });
        }

        let signature =
            Signature::try_from(bytes.as_slice()).map_err(|e| MalformedSignatureError {
                reason: e.to_string(),
            })?;

        Ok(Self(signature))
    }

    /// Applies the `"\x19Ethereum Signed Message:\n" + len(message)` prefix
    /// before recovering, so the message must be exactly the text the wallet
    /// displayed and signed.
    pub fn recover_signer(
        &self,
        message: &str,
    ) -> Result<EvmWalletAddress, SignatureRecoveryError> {
        self.0
            .recover_address_from_msg(message.as_bytes())
            .map_err(|e| SignatureRecoveryError::Unrecoverable {
                reason: e.to_string(),
            })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Recovers the address whose private key produced `signature` over the
/// personal message `message`. Never panics on untrusted input.
pub fn recover_personal_signer(
    message: &str,
    signature: &str,
) -> Result<EvmWalletAddress, SignatureRecoveryError> {
    PersonalSignature::parse(signature)?.recover_signer(message)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Malformed signature: {reason}")]
pub struct MalformedSignatureError {
    pub reason: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignatureRecoveryError {
    #[error(transparent)]
    Malformed(#[from] MalformedSignatureError),

    #[error("Signer cannot be recovered: {reason}")]
    Unrecoverable { reason: String },
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
