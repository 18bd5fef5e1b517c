use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Extension, Router,
};
use reelgen_server::{api, config::AppConfig, context::AppContext, metrics, migrator};

#[tokio::main]
async fn main() {
    // Load .env if present (dotenvy)
    dotenvy::dotenv().ok();

    reelgen_server::telemetry::init_telemetry("reelgen-server");

    let (prometheus_layer, metric_handle) = axum_prometheus::PrometheusMetricLayer::pair();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("configuration error: {err}");
            std::process::exit(1);
        }
    };

    let ctx = AppContext::init(&config)
        .await
        .expect("Failed to initialize application context");

    // Run migrations
    use sea_orm_migration::MigratorTrait;
    migrator::Migrator::up(&ctx.db, None)
        .await
        .expect("Failed to run migrations");

    metrics::init_metrics(&ctx.db).await;

    let app = app(Arc::new(ctx), prometheus_layer, metric_handle);

    let port = std::env::var("PORT")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(8000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

async fn health_check() -> &'static str {
    "OK"
}

fn app(
    ctx: Arc<AppContext>,
    prometheus_layer: axum_prometheus::PrometheusMetricLayer<'static>,
    metric_handle: metrics_exporter_prometheus::PrometheusHandle,
) -> Router {
    let allowed_origin = std::env::var("CORS_ALLOWED_ORIGIN")
        .unwrap_or_else(|_| "http://localhost:3000".to_string());

    Router::new()
        .route("/health", get(health_check))
        .route("/avatars/delete", post(api::avatar::delete_avatar))
        .route("/avatars/rename", post(api::avatar::rename_avatar))
        .route("/voices/delete", post(api::voice::delete_voice))
        .route("/voices/update", post(api::voice::update_voice))
        .route(
            "/videos",
            get(api::video::list_videos).post(api::video::create_video),
        )
        .route("/videos/temp", post(api::video::create_video_temp))
        .route("/videos/sweep", post(api::video::sweep_stale_videos))
        .route("/media/upload", post(api::media::upload_media))
        .route("/media/delete", post(api::media::delete_media))
        .layer(Extension(ctx))
        .layer(prometheus_layer)
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<axum::body::Body>| {
                    let matched_path = request
                        .extensions()
                        .get::<axum::extract::MatchedPath>()
                        .map(|matched| matched.as_str());

                    let span_name = if let Some(path) = matched_path {
                        format!("{} {}", request.method(), path)
                    } else {
                        format!("{} {}", request.method(), request.uri().path())
                    };

                    tracing::info_span!(
                        "request",
                        "otel.name" = span_name,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        // Filled in by the operation handlers' event sink
                        uid = tracing::field::Empty,
                        op = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency = tracing::field::Empty,
                    )
                },
            )
            .on_response(
                |response: &axum::http::Response<_>,
                 latency: std::time::Duration,
                 span: &tracing::Span| {
                    span.record("status", tracing::field::display(response.status()));
                    span.record("latency", tracing::field::debug(latency));
                    tracing::info!("request completed");
                },
            ),
        )
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(
                    allowed_origin
                        .parse::<axum::http::HeaderValue>()
                        .expect("CORS_ALLOWED_ORIGIN must be a valid header value"),
                )
                .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
                .allow_headers([axum::http::header::CONTENT_TYPE])
                .allow_credentials(true),
        )
        .route("/metrics", get(|| async move { metric_handle.render() }))
        .layer(axum::extract::DefaultBodyLimit::max(100 * 1024 * 1024))
}
