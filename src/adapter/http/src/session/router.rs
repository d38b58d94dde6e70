// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.


use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Login flow routes. Handlers expect a [`dill::Catalog`] extension layer.
pub fn session_router() -> OpenApiRouter {
    use crate::session::handlers;

    OpenApiRouter::new()
        .routes(routes!(handlers::session_challenge_handler))
        .routes(routes!(handlers::session_user_session_handler))
        .routes(routes!(handlers::session_me_handler))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
