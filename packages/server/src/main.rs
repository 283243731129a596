use std::net::SocketAddr;
use std::sync::Arc;

use ewakeel_common::storage::FilesystemUploadStore;
use tracing::{Level, info};

use ewakeel_server::config::AppConfig;
use ewakeel_server::database::init_db;
use ewakeel_server::seed;
use ewakeel_server::services::advice::AdviceClient;
use ewakeel_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load()?;

    let db = init_db(&config.database.url).await?;
    seed::seed_advocates(&db).await?;
    seed::ensure_indexes(&db).await?;

    let uploads = FilesystemUploadStore::new(
        config.uploads.dir.clone().into(),
        config.uploads.max_file_size,
    )
    .await?;

    let advice = AdviceClient::new(&config.advice);
    if !advice.is_enabled() {
        info!("No advice API key configured; consultation endpoint disabled");
    }

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    let state = AppState {
        db,
        config: Arc::new(config),
        uploads: Arc::new(uploads),
        advice,
    };

    let app = ewakeel_server::build_router(state);

    info!("Server running at http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
