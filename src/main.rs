use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use jobboard_backend::{
    config::{get_config, init_config},
    database::pool::create_pool,
    middleware::{auth, rate_limit},
    routes,
    storage::LocalBlobStore,
    AppState,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let blobs = Arc::new(LocalBlobStore::new(
        config.uploads_dir.clone(),
        config.public_base_url.clone(),
    ));
    let app_state = AppState::new(pool, blobs);

    let public_api = Router::new()
        .route("/api/job/list", get(routes::job::list_jobs))
        .route("/api/job/:id", get(routes::job::get_job))
        .route("/api/company/list", get(routes::company::list_companies))
        .route("/api/company/:id", get(routes::company::get_company))
        .layer(axum::middleware::from_fn_with_state(
            rate_limit::new_rps_state(config.public_rps),
            rate_limit::rps_middleware,
        ));

    let candidate_api = Router::new()
        .route(
            "/api/application/apply/:job_id",
            post(routes::application::apply),
        )
        .route(
            "/api/application/get",
            get(routes::application::get_applied_jobs),
        )
        .route("/api/profile/resume", post(routes::profile::upload_resume))
        .layer(axum::middleware::from_fn(auth::require_candidate));

    let recruiter_api = Router::new()
        .route("/api/job/create", post(routes::job::create_job))
        .route(
            "/api/job/update/:id",
            axum::routing::patch(routes::job::update_job),
        )
        .route(
            "/api/application/:job_id/applicants",
            get(routes::application::get_applicants),
        )
        .route(
            "/api/application/status/:application_id/update",
            post(routes::application::update_status),
        )
        .route("/api/company/create", post(routes::company::create_company))
        .route(
            "/api/company/update/:id",
            axum::routing::patch(routes::company::update_company),
        )
        .route(
            "/api/company/delete/:id",
            axum::routing::delete(routes::company::delete_company),
        )
        .route("/api/company/logo/:id", post(routes::company::upload_logo))
        .layer(axum::middleware::from_fn(auth::require_recruiter));

    let profile_api = Router::new()
        .route("/api/profile/me", get(routes::profile::get_me))
        .route(
            "/api/profile/update",
            axum::routing::patch(routes::profile::update_profile),
        )
        .route("/api/profile/photo", post(routes::profile::upload_photo))
        .layer(axum::middleware::from_fn(auth::require_auth));

    let authed_api = candidate_api
        .merge(recruiter_api)
        .merge(profile_api)
        .layer(axum::middleware::from_fn_with_state(
            rate_limit::new_rps_state(config.api_rps),
            rate_limit::rps_middleware,
        ));

    info!("Serving uploads from: {}", config.uploads_dir);

    let app = Router::new()
        .route("/health", get(routes::health::health))
        .merge(public_api)
        .merge(authed_api)
        .nest_service(
            "/uploads",
            tower_http::services::ServeDir::new(&config.uploads_dir),
        )
        .with_state(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(config.max_upload_bytes));

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
