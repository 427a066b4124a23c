//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request-level errors flow through
//! `kernel::error::AppError`.

use accounts::{AccountsConfig, PgUserRepository, accounts_router};
use axum::{Router, http, http::Method, http::header, routing::get};
use base64::Engine;
use base64::engine::general_purpose;
use posts::{PgPostRepository, posts_router};
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::{IpAddr, SocketAddr};
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,accounts=info,posts=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Accounts configuration (token secret, pepper)
    let config = build_accounts_config()?;

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let app = Router::new()
        .route("/", get(|| async { "Server running successfully!!!" }))
        .nest(
            "/user",
            accounts_router(PgUserRepository::new(pool.clone()), config.clone()),
        )
        .nest(
            "/post",
            posts_router(PgPostRepository::new(pool.clone()), config),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let host: IpAddr = env::var("HOST")
        .unwrap_or_else(|_| "0.0.0.0".to_string())
        .parse()?;
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse()?;
    let addr = SocketAddr::from((host, port));

    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Assemble the accounts config from the environment
///
/// Debug builds fall back to a random per-process secret; production
/// requires `TOKEN_SECRET` (base64, 32 bytes) so tokens survive restarts
/// and multiple instances agree.
fn build_accounts_config() -> anyhow::Result<AccountsConfig> {
    let mut config = if cfg!(debug_assertions) {
        match env::var("TOKEN_SECRET") {
            Ok(secret_b64) => AccountsConfig {
                token_secret: decode_secret(&secret_b64)?,
                ..Default::default()
            },
            Err(_) => {
                tracing::warn!("TOKEN_SECRET not set, using a random per-process secret");
                AccountsConfig::with_random_secret()
            }
        }
    } else {
        let secret_b64 =
            env::var("TOKEN_SECRET").expect("TOKEN_SECRET must be set in production");
        AccountsConfig {
            token_secret: decode_secret(&secret_b64)?,
            ..Default::default()
        }
    };

    if let Ok(pepper_b64) = env::var("PASSWORD_PEPPER") {
        let pepper = general_purpose::STANDARD.decode(pepper_b64.trim())?;
        config.password_pepper = Some(pepper);
    }

    Ok(config)
}

fn decode_secret(secret_b64: &str) -> anyhow::Result<[u8; 32]> {
    let bytes = general_purpose::STANDARD.decode(secret_b64.trim())?;
    let secret: [u8; 32] = bytes
        .as_slice()
        .try_into()
        .map_err(|_| anyhow::anyhow!("TOKEN_SECRET must decode to exactly 32 bytes"))?;
    Ok(secret)
}
