//! # chamada: attendance and enrollment records over HTTP
//!
//! `chamada` is a small REST service for a school's activity program. It exposes the student
//! roster, records the daily attendance call, and manages which student attends which activity,
//! on which weekday and at what time.
//!
//! ## Architecture
//!
//! The application is built on [Axum](https://github.com/tokio-rs/axum) for the HTTP layer and
//! uses SQLite (through `sqlx`) for all persistence. One connection pool is created at start-up
//! and shared by every handler through [`AppState`].
//!
//! The **API layer** ([`api`]) validates requests and maps results onto status codes and the
//! `{"error": ...}` body. The **database layer** ([`db`]) holds the repositories, the record
//! structs and the schema bootstrap.
//!
//! ### Attendance
//!
//! A call is submitted for one day at a time. Each listed student gets the submitted status for
//! that day (insert or overwrite); students left out of the submission keep their existing record.
//! A submission is written in one transaction, so a failing entry (say, an unknown student) leaves
//! nothing behind.
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use chamada::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = chamada::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     chamada::telemetry::init_telemetry()?;
//!
//!     let app = Application::new(config).await?;
//!     app.serve(async {
//!         let _ = tokio::signal::ctrl_c().await;
//!     })
//!     .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! See the [`config`] module for configuration options.
pub mod api;
pub mod config;
pub mod db;
pub mod errors;
mod openapi;
pub mod telemetry;
#[cfg(test)]
pub mod test_utils;
pub mod types;

use crate::openapi::ApiDoc;
use axum::{
    Json, Router,
    http::{self, HeaderValue, Method},
    routing::{get, post, put},
};
use bon::Builder;
pub use config::Config;
use config::CorsOrigin;
use sqlx::SqlitePool;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, debug, info, instrument};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

/// Application state shared across all request handlers.
///
/// # Example
///
/// ```ignore
/// let state = AppState::builder()
///     .db(pool)
///     .config(config)
///     .build();
/// ```
#[derive(Clone, Builder)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Config,
}

/// Open the connection pool described by the configuration.
async fn setup_database(config: &Config) -> anyhow::Result<SqlitePool> {
    info!("Opening database {}", config.database.url);
    let pool = db::connect(&config.database)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to open database {}: {}", config.database.url, e))?;
    Ok(pool)
}

/// Create the schema and, when configured, seed the default roster.
async fn prepare_database(pool: &SqlitePool, config: &Config) -> anyhow::Result<()> {
    db::schema::bootstrap(pool).await?;

    if config.seed_students {
        db::schema::seed_students(pool).await?;
    }

    Ok(())
}

/// Create CORS layer from configuration
fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let cors_config = &config.cors;

    let has_wildcard = cors_config.allowed_origins.contains(&CorsOrigin::Wildcard);
    if has_wildcard && cors_config.allow_credentials {
        anyhow::bail!("CORS cannot combine the wildcard origin with allow_credentials");
    }

    // tower-http refuses "*" inside an origin list
    let allow_origin = if has_wildcard {
        AllowOrigin::any()
    } else {
        let mut origins = Vec::new();
        for origin in &cors_config.allowed_origins {
            if let CorsOrigin::Url(url) = origin {
                origins.push(url.origin().ascii_serialization().parse::<HeaderValue>()?);
            }
        }
        AllowOrigin::list(origins)
    };

    let mut cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(cors_config.allow_credentials)
        .expose_headers(vec![http::header::LOCATION]);

    if let Some(max_age) = cors_config.max_age {
        cors = cors.max_age(std::time::Duration::from_secs(max_age));
    }

    Ok(cors)
}

/// Build the application router with all endpoints and middleware.
///
/// This function constructs the Axum router with:
/// - The `/api` routes (students, attendance, schedule, enrollments)
/// - `/healthz`
/// - OpenAPI document and Scalar UI, when `enable_docs` is set
/// - CORS configuration
/// - Tracing middleware
///
/// # Errors
///
/// Returns an error if the CORS configuration is invalid.
#[instrument(skip_all)]
pub fn build_router(state: AppState) -> anyhow::Result<Router> {
    use api::handlers::{attendance, enrollments, schedule, students};

    let mut router = Router::new()
        .route("/api/alunos", get(students::list_students))
        .route(
            "/api/presenca",
            get(attendance::list_attendance).post(attendance::submit_attendance),
        )
        .route("/api/grade", get(schedule::get_schedule))
        .route("/api/matriculas", post(enrollments::create_enrollment))
        .route("/api/matriculas/aluno/{idaluno}", get(enrollments::list_student_enrollments))
        .route(
            "/api/matriculas/{id}",
            put(enrollments::update_enrollment).delete(enrollments::delete_enrollment),
        )
        .route("/healthz", get(|| async { "OK" }))
        .with_state(state.clone());

    if state.config.enable_docs {
        router = router
            .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
            .merge(Scalar::with_url("/docs", ApiDoc::openapi()));
    }

    let cors_layer = create_cors_layer(&state.config)?;

    // Outermost first: trace every request, including CORS preflights
    let router = router.layer(
        ServiceBuilder::new()
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                    .on_request(DefaultOnRequest::new().level(Level::INFO))
                    .on_response(DefaultOnResponse::new().level(Level::INFO)),
            )
            .layer(cors_layer),
    );

    Ok(router)
}

/// Main application struct that owns all resources and runs the server.
///
/// # Lifecycle
///
/// 1. **Create**: [`Application::new`] opens the pool, creates the schema and optionally seeds
///    the roster
/// 2. **Serve**: [`Application::serve`] binds to a TCP port and starts handling requests
/// 3. **Shutdown**: When the shutdown signal is received, in-flight requests finish and the pool
///    is closed
pub struct Application {
    router: Router,
    config: Config,
    pool: SqlitePool,
}

impl Application {
    /// Create a new application instance with all resources initialized
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        debug!("Starting chamada with configuration: {:#?}", config);

        let pool = setup_database(&config).await?;
        Self::new_with_pool(config, pool).await
    }

    /// Create an application on top of an existing pool (used by tests)
    pub async fn new_with_pool(config: Config, pool: SqlitePool) -> anyhow::Result<Self> {
        prepare_database(&pool, &config).await?;

        let app_state = AppState::builder().db(pool.clone()).config(config.clone()).build();
        let router = build_router(app_state)?;

        Ok(Self { router, config, pool })
    }

    /// Convert application into a test server (for tests)
    #[cfg(test)]
    pub fn into_test_server(self) -> axum_test::TestServer {
        axum_test::TestServer::new(self.router).expect("Failed to create test server")
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!(
            "chamada listening on http://{}, available at http://localhost:{}",
            bind_addr, self.config.port
        );

        axum::serve(listener, self.router).with_graceful_shutdown(shutdown).await?;

        info!("Closing database connections...");
        self.pool.close().await;

        Ok(())
    }
}
