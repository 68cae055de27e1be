use anyhow::{Context, Result};
use log::info;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::api::handlers::AppState;
use crate::api::routes::create_router;
use crate::config::settings::AppConfig;
use crate::store::ReportStore;

pub struct ServerService {
    port: u16,
    config: AppConfig,
    static_dir: Option<PathBuf>,
}

impl ServerService {
    pub fn new(port: u16, config: AppConfig, static_dir: Option<PathBuf>) -> Self {
        Self {
            port,
            config,
            static_dir,
        }
    }

    pub async fn run(&self) -> Result<()> {
        let store = ReportStore::new(&self.config.store.data_path);
        info!("Serving reports from {}", store.path().display());

        let state = Arc::new(AppState::new(store, self.config.clone()));

        let mut app = create_router(state);
        if let Some(dir) = &self.static_dir {
            info!("Serving dashboard files from {}", dir.display());
            app = app.fallback_service(ServeDir::new(dir));
        }
        let app = app.layer(CorsLayer::permissive());

        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        info!("Server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}
