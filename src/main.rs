use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fairway_api::config::Config;
use fairway_api::middleware::auth::JwtSecret;
use fairway_api::{db, routes, services, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let config = Arc::new(config);

    let pool = db::create_pool(&config.database_url).await?;
    db::run_migrations(&pool).await?;
    info!("Database connected and migrations applied");

    services::metrics::start(pool.clone());

    let state = AppState {
        db: pool,
        config: config.clone(),
    };

    // CORS: the configured frontend origin, plus localhost for development.
    let base_url = config.app_base_url.clone();
    let cors_origin = AllowOrigin::predicate(move |origin: &HeaderValue, _| {
        let o = match origin.to_str() {
            Ok(s) => s,
            Err(_) => return false,
        };
        if o.starts_with("http://localhost") || o.starts_with("http://127.0.0.1") {
            return true;
        }
        o == base_url
    });

    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(AllowHeaders::list([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
        ]))
        .allow_origin(cors_origin);

    let jwt_secret = JwtSecret(config.jwt_secret.clone());

    let app = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/metrics", get(routes::metrics::metrics_handler))
        // Auth
        .route("/auth/login", post(routes::auth::login))
        .route("/auth/me", get(routes::auth::me))
        // Calendar (public read)
        .route("/calendar", get(routes::calendar::get_range))
        .route("/calendar/{date}", get(routes::calendar::get_day))
        // Program items (golf + events)
        .route("/program-items", post(routes::program_items::create))
        .route(
            "/program-items/{id}",
            put(routes::program_items::update).delete(routes::program_items::delete),
        )
        .route(
            "/program-items/{id}/occurrences",
            get(routes::program_items::occurrences),
        )
        // Hotel bookings with derived breakfasts/reservations
        .route("/hotel-bookings", post(routes::hotel_bookings::create))
        .route(
            "/hotel-bookings/{id}",
            put(routes::hotel_bookings::update).delete(routes::hotel_bookings::delete),
        )
        // Standalone breakfast configurations
        .route("/breakfasts", post(routes::breakfasts::create))
        .route(
            "/breakfasts/{id}",
            put(routes::breakfasts::update).delete(routes::breakfasts::delete),
        )
        // Restaurant reservations
        .route("/reservations", post(routes::reservations::create))
        .route(
            "/reservations/{id}",
            put(routes::reservations::update).delete(routes::reservations::delete),
        )
        // Venue and contact directories
        .route(
            "/venues",
            get(routes::venues::list).post(routes::venues::create),
        )
        .route(
            "/venues/{id}",
            put(routes::venues::update).delete(routes::venues::delete),
        )
        .route(
            "/contacts",
            get(routes::contacts::list).post(routes::contacts::create),
        )
        .route(
            "/contacts/{id}",
            put(routes::contacts::update).delete(routes::contacts::delete),
        )
        .layer(axum::Extension(jwt_secret))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    let addr = format!("{}:{}", config.host, config.port);
    info!("fairway scheduling API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
