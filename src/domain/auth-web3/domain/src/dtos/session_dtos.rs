// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{ChallengeIssued, UserSessionCreated};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Requests
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct GenerateChallengeRequest {
    #[serde(default)]
    pub public_address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct GenerateUserSessionRequest {
    #[serde(default)]
    pub public_address: String,
    #[serde(default)]
    pub challenge: String,
    #[serde(default)]
    pub signature: String,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Responses
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ChallengeResponse {
    pub public_address: String,
    pub challenge: String,
}

impl From<ChallengeIssued> for ChallengeResponse {
    fn from(value: ChallengeIssued) -> Self {
        Self {
            public_address: value.public_address,
            challenge: value.challenge,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct UserSessionResponse {
    pub public_address: String,
    pub auth_token: String,
    #[cfg_attr(feature = "utoipa", schema(value_type = String, format = DateTime))]
    pub expires_at: DateTime<Utc>,
}

impl From<UserSessionCreated> for UserSessionResponse {
    fn from(value: UserSessionCreated) -> Self {
        Self {
            public_address: value.public_address,
            auth_token: value.auth_token,
            expires_at: value.expires_at,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
