// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.


use axum::extract::rejection::JsonRejection;
use axum::{Extension, Json};
use chrono::{DateTime, Utc};
use dill::Catalog;
use internal_error::ErrorIntoInternal;
use serde::{Deserialize, Serialize};
use sigauth_accounts::AuthCredential;
use sigauth_auth_web3::*;

use crate::{ApiError, AuthenticatedWallet, IntoApiError, ResultIntoApiError};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedIdentityResponse {
    pub public_address: String,
    pub credential: CredentialKind,
    /// Only set for session credentials
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum CredentialKind {
    Session,
    ApiKey,
    Bypassed,
}

impl From<AuthenticatedWallet> for AuthenticatedIdentityResponse {
    fn from(AuthenticatedWallet(identity): AuthenticatedWallet) -> Self {
        let (credential, expires_at) = match identity.credential {
            AuthCredential::Session { expires_at } => (CredentialKind::Session, Some(expires_at)),
            AuthCredential::ApiKey => (CredentialKind::ApiKey, None),
            AuthCredential::Bypassed => (CredentialKind::Bypassed, None),
        };

        Self {
            public_address: EvmWalletAddressConvertor::checksummed_string(
                &identity.wallet_address,
            ),
            credential,
            expires_at,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Issue a login challenge for a wallet
#[utoipa::path(
    post,
    path = "/session/challenge",
    request_body = GenerateChallengeRequest,
    responses(
        (status = OK, body = ApiResponse<ChallengeResponse>),
        (status = BAD_REQUEST, description = "Malformed wallet address or missing field"),
    ),
    tag = "sigauth",
)]
pub async fn session_challenge_handler(
    Extension(catalog): Extension<Catalog>,
    request: Result<Json<GenerateChallengeRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<ChallengeResponse>>, ApiError> {
    let Json(request) = request.map_err(|e| ApiError::bad_request_with_message(&e.body_text()))?;

    let use_case = catalog
        .get_one::<dyn GenerateChallengeUseCase>()
        .map_err(|e| e.int_err().api_err())?;

    let issued = use_case.execute(&request.public_address).await.api_err()?;

    Ok(Json(ApiResponse::ok(issued.into())))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Exchange a signed challenge for a session token
#[utoipa::path(
    post,
    path = "/session/user-session",
    request_body = GenerateUserSessionRequest,
    responses(
        (status = OK, body = ApiResponse<UserSessionResponse>),
        (status = BAD_REQUEST, description = "Malformed wallet address or missing field"),
        (status = UNAUTHORIZED, description = "Signature invalid"),
    ),
    tag = "sigauth",
)]
pub async fn session_user_session_handler(
    Extension(catalog): Extension<Catalog>,
    request: Result<Json<GenerateUserSessionRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<UserSessionResponse>>, ApiError> {
    let Json(request) = request.map_err(|e| ApiError::bad_request_with_message(&e.body_text()))?;

    let use_case = catalog
        .get_one::<dyn GenerateUserSessionUseCase>()
        .map_err(|e| e.int_err().api_err())?;

    let created = use_case
        .execute(
            &request.public_address,
            &request.challenge,
            &request.signature,
        )
        .await
        .api_err()?;

    Ok(Json(ApiResponse::ok(created.into())))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Identity behind the presented credentials
#[utoipa::path(
    get,
    path = "/session/me",
    params(
        ("x-public-address" = String, Header, description = "Wallet address of the caller"),
    ),
    responses(
        (status = OK, body = ApiResponse<AuthenticatedIdentityResponse>),
        (status = UNAUTHORIZED, description = "Missing, unknown or expired credentials"),
    ),
    tag = "sigauth",
)]
pub async fn session_me_handler(
    wallet: AuthenticatedWallet,
) -> Json<ApiResponse<AuthenticatedIdentityResponse>> {
    Json(ApiResponse::ok(wallet.into()))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
