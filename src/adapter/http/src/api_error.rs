// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.


use internal_error::InternalError;
use sigauth_accounts::ValidateSessionError;
use sigauth_auth_web3::{ApiResponse, GenerateChallengeError, GenerateUserSessionError};
use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Message returned in place of internal error details
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal error";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Unifies error responses and their logging across handlers.
///
/// The typical usage pattern is:
///
/// ```
/// async fn handler() -> Result<(), ApiError> {
///     operation().await.api_err()?;
///     Ok(())
/// }
/// ```
///
/// Conversion from domain errors is done through [`IntoApiError`] rather than
/// [From], so that every `?` on a fallible operation states which status code
/// it maps to.
///
/// Every error is rendered as the `{"success": false, "error": ".."}`
/// envelope. Internal errors carry a generic message, the details only go to
/// the log.
#[derive(Debug, Error)]
#[error("api error {status_code:?}")]
pub struct ApiError {
    pub status_code: http::StatusCode,
    source: Box<dyn std::error::Error + Send + Sync + 'static>,
}

impl ApiError {
    pub fn new(
        source: impl std::error::Error + Send + Sync + 'static,
        status_code: http::StatusCode,
    ) -> Self {
        Self {
            status_code,
            source: source.into(),
        }
    }

    pub fn bad_request(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::new(source, http::StatusCode::BAD_REQUEST)
    }

    pub fn bad_request_with_message(message: &str) -> Self {
        Self {
            source: message.into(),
            status_code: http::StatusCode::BAD_REQUEST,
        }
    }

    pub fn unauthorized(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::new(source, http::StatusCode::UNAUTHORIZED)
    }

    pub fn internal(source: InternalError) -> Self {
        Self::new(source, http::StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let message = if self.status_code == http::StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(
                error = ?self.source,
                error_msg = %self.source,
                status_code = %self.status_code,
                "Internal API error",
            );
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            tracing::warn!(
                error_msg = %self.source,
                status_code = %self.status_code,
                "API error",
            );
            self.source.to_string()
        };

        let body = axum::Json(ApiResponse::<()>::failure(message));

        (self.status_code, body).into_response()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Provides explicit conversion into [`ApiError`]
pub trait IntoApiError {
    fn api_err(self) -> ApiError;
}

/// Allows using `.api_err()` method on [Result] types
pub trait ResultIntoApiError<K, E>
where
    E: IntoApiError,
{
    fn api_err(self) -> Result<K, ApiError>;
}

impl<K, E> ResultIntoApiError<K, E> for Result<K, E>
where
    E: IntoApiError,
{
    fn api_err(self) -> Result<K, ApiError> {
        self.map_err(IntoApiError::api_err)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

impl IntoApiError for InternalError {
    fn api_err(self) -> ApiError {
        ApiError::internal(self)
    }
}

impl IntoApiError for GenerateChallengeError {
    fn api_err(self) -> ApiError {
        match self {
            Self::InvalidInput(e) => ApiError::bad_request(e),
            Self::Internal(e) => ApiError::internal(e),
        }
    }
}

impl IntoApiError for GenerateUserSessionError {
    fn api_err(self) -> ApiError {
        match self {
            Self::InvalidInput(e) => ApiError::bad_request(e),
            Self::SignatureInvalid(e) => ApiError::unauthorized(e),
            Self::Internal(e) => ApiError::internal(e),
        }
    }
}

impl IntoApiError for ValidateSessionError {
    fn api_err(self) -> ApiError {
        match self {
            Self::Unauthenticated(e) => ApiError::unauthorized(e),
            Self::Internal(e) => ApiError::internal(e),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
