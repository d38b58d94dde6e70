// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.


use std::future::IntoFuture;
use std::net::SocketAddr;

use database_common::SqlitePlugin;
use dill::{Catalog, CatalogBuilder};
use internal_error::{ErrorIntoInternal, InternalError, ResultIntoInternal};
use secrecy::SecretString;
use sigauth_accounts::{ENV_VAR_SIGAUTH_INSECURE_SESSION_BYPASS, SessionValidationMode};
use time_source::SystemTimeSourceDefault;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;

use crate::{RunArgs, ServerConfig};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

const DEFAULT_LOGGING_CONFIG: &str = "info";
const VERBOSE_LOGGING_CONFIG: &str = "debug";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn run(matches: clap::ArgMatches) -> Result<(), InternalError> {
    let Some(("run", run_matches)) = matches.subcommand() else {
        return InternalError::bail("Unsupported command");
    };

    let args = RunArgs::from_matches(run_matches);
    configure_logging(args.verbosity_level);

    let mut config = ServerConfig::load(args.config_path.as_deref())?;
    config.apply_run_args(&args);

    let validation_mode = SessionValidationMode::load_from_env();
    if validation_mode == SessionValidationMode::BypassForTesting {
        tracing::warn!(
            env_var = ENV_VAR_SIGAUTH_INSECURE_SESSION_BYPASS,
            "Session validation is bypassed, any caller is trusted as the wallet it claims"
        );
    }

    let catalog = init_catalog(&config, validation_mode).await?;

    let listener = tokio::net::TcpListener::bind(config.server.address)
        .await
        .int_err()?;

    APIServer::new(catalog, listener)?
        .run_until(shutdown_signal())
        .await
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn configure_logging(verbosity_level: u8) {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::fmt::format::FmtSpan;

    // Logging may be already initialized when running under tests
    if tracing::dispatcher::has_been_set() {
        return;
    }

    // Use configuration from RUST_LOG env var if provided
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match verbosity_level {
            0 => EnvFilter::new(DEFAULT_LOGGING_CONFIG),
            _ => EnvFilter::new(VERBOSE_LOGGING_CONFIG),
        },
    };

    let span_events = if verbosity_level > 1 {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_span_events(span_events)
        .with_writer(std::io::stderr)
        .init();
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutting down"),
        Err(e) => tracing::error!(error = ?e, "Unable to listen for the shutdown signal"),
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Registers services, configuration and the stores selected by
/// `database.url`: SQLite when set, in-memory otherwise
pub async fn init_catalog(
    config: &ServerConfig,
    validation_mode: SessionValidationMode,
) -> Result<Catalog, InternalError> {
    let mut b = CatalogBuilder::new();

    b.add::<SystemTimeSourceDefault>();
    b.add_value(config.web3_auth_config()?);
    b.add_value(config.session_config(validation_mode)?);

    sigauth_auth_web3_services::register_dependencies(&mut b);
    sigauth_accounts_services::register_dependencies(&mut b);

    let Some(database_url) = &config.database.url else {
        tracing::info!("Using in-memory stores, state is lost on exit");

        b.add::<sigauth_auth_web3_inmem::InMemoryWeb3AuthChallengeRepository>();
        b.add::<sigauth_accounts_inmem::InMemoryUserRepository>();
        b.add::<sigauth_accounts_inmem::InMemorySessionRepository>();
        b.add::<sigauth_accounts_inmem::InMemoryApiKeyRepository>();

        return Ok(b.build());
    };

    b.add::<sigauth_auth_web3_sqlite::SqliteWeb3AuthChallengeRepository>();
    b.add::<sigauth_accounts_sqlite::SqliteUserRepository>();
    b.add::<sigauth_accounts_sqlite::SqliteSessionRepository>();
    b.add::<sigauth_accounts_sqlite::SqliteApiKeyRepository>();

    let base_catalog = b.build();

    let sqlite_pool = SqlitePlugin::connect_sqlite_pool(&SecretString::from(database_url.clone()))
        .await
        .int_err()?;

    Ok(SqlitePlugin::catalog_with_connected_pool(
        &base_catalog,
        sqlite_pool,
    ))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(OpenApi)]
#[openapi(info(
    title = "sigauth",
    description = "Sign-in with an Ethereum wallet signature"
))]
struct ApiDoc;

pub fn build_router(catalog: Catalog) -> axum::Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(sigauth_adapter_http::session_router())
        .split_for_parts();

    router
        .route(
            "/openapi.json",
            axum::routing::get(move || {
                let api = api.clone();
                async move { axum::Json(api) }
            }),
        )
        .layer(
            tower::ServiceBuilder::new()
                .layer(tower_http::trace::TraceLayer::new_for_http())
                .layer(
                    tower_http::cors::CorsLayer::new()
                        .allow_origin(tower_http::cors::Any)
                        .allow_methods(vec![http::Method::GET, http::Method::POST])
                        .allow_headers(tower_http::cors::Any),
                )
                .layer(axum::extract::Extension(catalog)),
        )
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct APIServer {
    router: axum::Router,
    listener: tokio::net::TcpListener,
    local_addr: SocketAddr,
}

impl APIServer {
    pub fn new(catalog: Catalog, listener: tokio::net::TcpListener) -> Result<Self, InternalError> {
        let local_addr = listener.local_addr().int_err()?;

        Ok(Self {
            router: build_router(catalog),
            listener,
            local_addr,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub async fn run_until(
        self,
        shutdown: impl std::future::Future<Output = ()> + Send + 'static,
    ) -> Result<(), InternalError> {
        tracing::info!(address = %self.local_addr, "HTTP server is listening");

        axum::serve(self.listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .into_future()
            .await
            .map_err(ErrorIntoInternal::int_err)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
