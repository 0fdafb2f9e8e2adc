use anyhow::Context;
use dotenv::dotenv;
use htmx_todo::{SharedData, app_env, db, logging, persistence, routes};
use std::env;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let loaded_dotenv = dotenv().is_ok();

    let env_filter = logging::init_env_filter()?;
    let otel_exporters = logging::exporters_from_env()?;
    logging::setup_logging_and_tracing(env_filter, otel_exporters);
    if !loaded_dotenv {
        info!("No .env file found, using the process environment only");
    }

    let db_url = env::var(app_env::DB_URL).unwrap_or_else(|_| app_env::DEFAULT_DB_URL.to_owned());
    let db_pool = db::connect_sqlx(&db_url).await?;
    db::migrate(&db_pool).await?;

    let shared_data = Arc::new(SharedData {
        ext_cxn: persistence::ExternalConnectivity::new(db_pool),
    });
    let router = routes::build_router(shared_data);

    let server_address = env::var(app_env::SERVER_ADDRESS)
        .unwrap_or_else(|_| app_env::DEFAULT_SERVER_ADDRESS.to_owned());
    let listener = TcpListener::bind(&server_address)
        .await
        .with_context(|| format!("binding to {server_address}"))?;
    info!("Todo server is running at http://{}", listener.local_addr()?);

    axum::serve(listener, router)
        .await
        .context("serving HTTP requests")?;

    Ok(())
}
