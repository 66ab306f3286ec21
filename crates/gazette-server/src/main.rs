use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use gazette_api::auth::{AppState, AppStateInner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gazette=debug,tower_http=debug".into()),
        )
        .init();

    // Config
    let jwt_secret =
        std::env::var("GAZETTE_JWT_SECRET").unwrap_or_else(|_| "dev-secret-change-me".into());
    let db_path = std::env::var("GAZETTE_DB_PATH").unwrap_or_else(|_| "gazette.db".into());
    let host = std::env::var("GAZETTE_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("GAZETTE_PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()?;
    let home_page_size: u32 = std::env::var("GAZETTE_HOME_PAGE_SIZE")
        .unwrap_or_else(|_| "10".into())
        .parse()?;

    // Init database
    let db = gazette_db::Database::open(&PathBuf::from(&db_path))?;

    // Shared state
    let state: AppState = Arc::new(AppStateInner {
        db,
        jwt_secret,
        home_page_size,
    });

    let app = gazette_api::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Gazette server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
