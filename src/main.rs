use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use paystore::db::PaymentStore;
use paystore::{config::Config, db, routes, rpc, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "paystore=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!("Configuration loaded: {:?}", config.server);

    // Connect to database
    let pool = db::create_pool(&config.database).await?;

    // Run migrations
    info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to run migrations: {}", e))?;
    info!("Database migrations completed");

    // Create shared state; both front ends get the same store instance
    let state = AppState {
        store: PaymentStore::new(pool),
        config: config.clone(),
    };

    // RPC server on its own port
    let rpc_app = rpc::router(state.clone());
    let rpc_addr = SocketAddr::from(([0, 0, 0, 0], config.server.rpc_port));
    tokio::spawn(async move {
        match TcpListener::bind(rpc_addr).await {
            Ok(listener) => {
                info!("RPC server listening on {}", rpc_addr);
                if let Err(e) = axum::serve(listener, rpc_app).await {
                    error!("RPC server error: {}", e);
                }
            }
            Err(e) => error!("Failed to bind RPC listener on {}: {}", rpc_addr, e),
        }
    });

    // REST server
    let app = routes::create_router(state);
    let addr = format!("{}:{}", config.server.host, config.server.http_port);
    info!("Server listening on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}
