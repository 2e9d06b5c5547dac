use std::sync::Arc;

use github_user_search::telemetry::init_tracing;
use github_user_search::{router, AppState, GithubSearchClient, ServiceConfig};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServiceConfig::load()?;
    init_tracing(&config.log_level)?;

    if config.github.token.is_none() {
        tracing::warn!("No GitHub token configured, upstream searches will be rejected");
    }

    let client = GithubSearchClient::new(&config.github)?;
    let app = router(AppState::new(Arc::new(client), config.public_path.as_str()));

    let address = config.bind_address();
    let listener = TcpListener::bind(&address).await?;
    tracing::info!("Listening on {address}, serving {}", config.public_path);

    axum::serve(listener, app).await?;
    Ok(())
}
