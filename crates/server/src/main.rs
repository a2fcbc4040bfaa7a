mod config;
mod doc;
mod dtos;
mod error;
mod routes;
mod state;
mod utils;

use crate::{
    config::Config,
    doc::ApiDoc,
    routes::{auth, category, health, seminar},
    state::AppState,
    utils::shutdown::shutdown_signal,
};
use axum::{
    Router,
    routing::{get, post},
};
use log::{error, info};
use migration::{Migrator, MigratorTrait};
use std::{error::Error, process::ExitCode, sync::Arc};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_oauth2_resource_server::server::OAuth2ResourceServer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Routes that need an authenticated caller
fn seminar_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(auth::me))
        .route("/categories", get(category::get_categories))
        .route(
            "/seminars",
            get(seminar::get_seminars).post(seminar::create_seminar),
        )
        .route("/seminars/joined", get(seminar::get_joined_seminars))
        .route(
            "/seminars/{id}",
            get(seminar::get_seminar_by_id)
                .put(seminar::edit_seminar)
                .delete(seminar::delete_seminar),
        )
        .route("/seminars/{id}/edit", get(seminar::get_edit_form))
        .route("/seminars/{id}/delete", get(seminar::get_delete_info))
        .route("/seminars/{id}/join", post(seminar::join_seminar))
        .route("/seminars/{id}/leave", post(seminar::leave_seminar))
}

async fn run(config: Config) -> Result<(), Box<dyn Error>> {
    let db = database::db::connect(&config.database_url).await?;

    if config.run_migrations {
        Migrator::up(&db, None).await?;
        info!("Database migrations applied");
    }

    let oauth2_resource_server = <OAuth2ResourceServer>::builder()
        .issuer_url(&config.oidc_issuer_url)
        .build()
        .await?;

    let state = AppState {
        db,
        rules: Arc::new(config.rules),
    };

    let app = Router::new()
        .merge(
            seminar_routes()
                .layer(ServiceBuilder::new().layer(oauth2_resource_server.into_layer())),
        )
        .route("/health", get(health::health))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CompressionLayer::new())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("Running axum on http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("Invalid configuration: {err}");
            return ExitCode::FAILURE;
        }
    };

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("Server failed: {err}");
            ExitCode::FAILURE
        }
    }
}
