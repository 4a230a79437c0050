mod core;
mod features;
mod modules;
mod shared;

use crate::core::config::Config;
use crate::core::middleware;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::features::auth::{routes as auth_routes, TokenService};
use crate::features::health;
use crate::features::leaderboard::{routes as leaderboard_routes, LeaderboardService};
use crate::features::reports::{routes as reports_routes, ReportService};
use crate::features::statistics::{routes as statistics_routes, StatisticsService};
use crate::features::users::{routes as users_routes, UserService};
use crate::modules::storage::{JsonStore, UploadStore};
use crate::modules::vision::{MockWasteAnalyzer, OpenAiWasteAnalyzer, WasteAnalyzer};
use crate::shared::constants::UPLOADS_URL_PREFIX;
use axum::{extract::DefaultBodyLimit, middleware::from_fn, Router};
use std::path::Path;
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Services shared by the HTTP routers
pub struct AppServices {
    pub users: Arc<UserService>,
    pub reports: Arc<ReportService>,
    pub leaderboard: Arc<LeaderboardService>,
    pub statistics: Arc<StatisticsService>,
    pub tokens: Arc<TokenService>,
}

/// All `/api` routes plus the read-only `/uploads` file server.
///
/// Bearer tokens are read only by the routes that act on behalf of a caller;
/// when one is sent there it must be valid.
pub fn api_router(services: &AppServices, uploads_dir: &Path) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(users_routes::routes(Arc::clone(&services.users)))
        .merge(auth_routes::routes(
            Arc::clone(&services.users),
            Arc::clone(&services.tokens),
        ))
        .merge(reports_routes::routes(
            Arc::clone(&services.reports),
            Arc::clone(&services.tokens),
        ))
        .merge(leaderboard_routes::routes(Arc::clone(&services.leaderboard)))
        .merge(statistics_routes::routes(Arc::clone(&services.statistics)))
        .nest_service(UPLOADS_URL_PREFIX, ServeDir::new(uploads_dir))
}

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!(
        "System info: tokio_worker_threads={}, pid={}",
        worker_threads,
        std::process::id()
    );
    tracing::info!("Configuration loaded successfully");

    let store = Arc::new(JsonStore::open(&config.storage.data_dir).await?);
    let uploads = Arc::new(UploadStore::new(&config.storage.uploads_dir).await?);
    tracing::info!(
        "Storage initialized: data={}, uploads={}",
        store.data_dir().display(),
        uploads.dir().display()
    );

    let analyzer: Arc<dyn WasteAnalyzer> = match config.vision.api_key.clone() {
        Some(api_key) => {
            tracing::info!(
                "Vision analyzer initialized (model: {}, endpoint: {})",
                config.vision.model,
                config.vision.base_url
            );
            Arc::new(OpenAiWasteAnalyzer::new(&config.vision, api_key)?)
        }
        None => {
            tracing::info!("OPENAI_API_KEY not set, using mock vision analyzer");
            Arc::new(MockWasteAnalyzer::new())
        }
    };

    let tokens = Arc::new(TokenService::new(&config.auth_token));
    let services = AppServices {
        users: Arc::new(UserService::new(Arc::clone(&store), Arc::clone(&tokens))),
        reports: Arc::new(ReportService::new(
            Arc::clone(&store),
            Arc::clone(&uploads),
            analyzer,
            config.storage.max_upload_size,
        )),
        leaderboard: Arc::new(LeaderboardService::new(Arc::clone(&store))),
        statistics: Arc::new(StatisticsService::new(Arc::clone(&store))),
        tokens,
    };
    tracing::info!("Services initialized");

    // Build application router with dynamic swagger config
    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    let swagger = if let Some(credentials) = config.swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
            .layer(from_fn(middleware::basic_auth_middleware(Arc::new(
                credentials,
            ))))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
    };

    let app = Router::new()
        .merge(swagger)
        .merge(api_router(&services, uploads.dir()))
        .layer(DefaultBodyLimit::max(config.app.max_request_body_size))
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    socket.set_nodelay(true)?;

    #[cfg(target_os = "linux")]
    {
        let keepalive = socket2::TcpKeepalive::new()
            .with_time(std::time::Duration::from_secs(60))
            .with_interval(std::time::Duration::from_secs(10))
            .with_retries(3);
        socket.set_tcp_keepalive(&keepalive)?;
    }
    #[cfg(not(target_os = "linux"))]
    {
        let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
        socket.set_tcp_keepalive(&keepalive)?;
    }

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
