mod config;
mod form;
mod handler;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tracing_subscriber::EnvFilter;

use config::ServiceConfig;
use profile_media_core::{HttpObjectStore, HttpProfileStore, ProfileEditor};

#[derive(Clone)]
pub struct AppState {
    pub editor: Arc<ProfileEditor>,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    if json {
        builder.json().with_current_span(false).init();
    } else {
        builder.init();
    }
}

pub fn router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(handler::health))
        .route("/image-kinds", get(handler::image_kinds))
        .route(
            "/users/{uid}/profile",
            get(handler::get_profile).put(handler::put_profile),
        )
        .route("/users/{uid}/pic", get(handler::get_pic))
        .route("/compress", post(handler::compress))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServiceConfig::from_env()?;
    init_tracing(config.log_json);

    let objects = HttpObjectStore::from_env()?;
    let profiles = HttpProfileStore::from_env()?;
    let state = AppState {
        editor: Arc::new(ProfileEditor::new(Arc::new(objects), Arc::new(profiles))),
    };

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(
        addr = %config.bind_addr,
        max_upload_bytes = config.max_upload_bytes,
        "profile media service listening"
    );

    axum::serve(listener, router(state, config.max_upload_bytes)).await?;
    Ok(())
}
