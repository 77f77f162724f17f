use candidate_portal::{
    config::Config,
    database::pool::{create_pool, run_migrations},
    routes, AppState,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    let pool = create_pool(&config.database).await?;
    run_migrations(&pool).await?;

    let seed_default_admin = config.seed_default_admin;
    let addr: SocketAddr = config.server_address.parse()?;
    let app_state = AppState::new(pool, config);

    if seed_default_admin && app_state.admin_service.ensure_default_admin().await? {
        info!("Default admin account created");
    }

    let app = routes::router(app_state);

    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
