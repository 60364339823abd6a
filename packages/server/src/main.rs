use std::sync::Arc;

use tracing::{Level, info};

use common::storage::FilesystemBlobStore;
use server::config::AppConfig;
use server::services::avatar::AvatarService;
use server::state::AppState;
use server::{build_router, database, seed};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load()?;

    let db = database::init_db(&config.database).await?;
    seed::ensure_indexes(&db).await?;

    let store = Arc::new(
        FilesystemBlobStore::new(
            config.storage.avatars_dir.clone(),
            config.storage.max_upload_size,
        )
        .await?,
    );
    let avatars = AvatarService::new(db.clone(), store, config.storage.max_upload_size);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState {
        db,
        config,
        avatars,
    };
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server running at http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
