use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    http::StatusCode,
    routing::{delete, get, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use parlor_api::auth::{self, AppState, AppStateInner};
use parlor_api::{conversations, groups, messages};
use parlor_core::Store;

fn router(state: AppState) -> Router {
    Router::new()
        .route("/liveness", get(liveness))
        .route("/session", post(auth::login))
        .route("/me/name", put(auth::set_my_name))
        .route("/conversations", get(conversations::get_my_conversations))
        .route(
            "/conversations/{conversation_id}",
            get(conversations::get_conversation),
        )
        .route("/messages", post(messages::send_message))
        .route("/messages/{message_id}", delete(messages::delete_message))
        .route(
            "/messages/{message_id}/comment",
            post(messages::comment_message).delete(messages::uncomment_message),
        )
        .route(
            "/messages/{message_id}/forward",
            post(messages::forward_message),
        )
        .route("/groups/{group_id}/members", post(groups::add_member))
        .route("/groups/{group_id}/leave", post(groups::leave_group))
        .route("/groups/{group_id}/name", put(groups::set_group_name))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "parlor=debug,tower_http=debug".into()),
        )
        .init();

    // Config
    let host = std::env::var("PARLOR_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("PARLOR_PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()?;

    // Shared state: everything lives in memory and dies with the process.
    let state: AppState = Arc::new(AppStateInner { store: Store::new() });
    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Parlor server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn liveness() -> StatusCode {
    StatusCode::OK
}
