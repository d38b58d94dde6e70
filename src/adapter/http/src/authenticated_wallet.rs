// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.


use axum::extract::FromRequestParts;
use dill::Catalog;
use internal_error::ErrorIntoInternal;
use sigauth_accounts::{AuthSessionValidator, AuthenticatedIdentity, UnauthenticatedError};
use sigauth_auth_web3::EvmWalletAddressConvertor;

use crate::{ApiError, IntoApiError, ResultIntoApiError};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const HEADER_PUBLIC_ADDRESS: &str = "x-public-address";

const BEARER_PREFIX: &str = "Bearer ";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Wallet of the caller, authenticated by `Authorization: Bearer <token>`
/// together with the `X-Public-Address` header.
///
/// Requires the [Catalog] to be present in request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedWallet(pub AuthenticatedIdentity);

impl<S> FromRequestParts<S> for AuthenticatedWallet
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let catalog = parts
            .extensions
            .get::<Catalog>()
            .cloned()
            .ok_or_else(|| "Catalog is missing in request extensions".int_err().api_err())?;

        let raw_public_address = header_str(parts, HEADER_PUBLIC_ADDRESS)
            .ok_or_else(|| ApiError::unauthorized(UnauthenticatedError))?;
        let wallet = EvmWalletAddressConvertor::parse(raw_public_address)
            .map_err(ApiError::bad_request)?;

        // Absent credentials are left for the validator to reject
        let token = header_str(parts, http::header::AUTHORIZATION.as_str())
            .and_then(|value| value.strip_prefix(BEARER_PREFIX))
            .map(str::trim)
            .unwrap_or_default();

        let validator = catalog
            .get_one::<dyn AuthSessionValidator>()
            .map_err(|e| e.int_err().api_err())?;

        let identity = validator.validate(&wallet, token).await.api_err()?;

        Ok(Self(identity))
    }
}

fn header_str<'a>(parts: &'a http::request::Parts, name: &str) -> Option<&'a str> {
    parts
        .headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
