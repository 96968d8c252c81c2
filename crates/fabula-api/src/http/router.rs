//! Axum router configuration with middleware.
//!
//! One router per service. Middleware: CORS, tracing. Each service's
//! landing page is served from a static directory (`web/chat` /
//! `web/story`, env-overridable); API routes take priority and unknown
//! paths fall through to the page.

use axum::Router;
use axum::routing::{get, post, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::{ChatState, StoryState};

/// Build the chat service router with all routes and middleware.
pub fn build_chat_router(state: ChatState) -> Router {
    let router = Router::new()
        .route(
            "/dialogs",
            get(handlers::dialog::list_dialogs).post(handlers::dialog::create_dialog),
        )
        .route(
            "/dialogs/{id}",
            put(handlers::dialog::rename_dialog).delete(handlers::dialog::delete_dialog),
        )
        .route("/dialogs/{id}/messages", get(handlers::dialog::list_messages))
        .route("/dialogs/{id}/chat", post(handlers::chat::chat_turn))
        .route("/health", get(health_check))
        .layer(cors())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    with_landing_page(router, "FABULA_CHAT_WEB_DIR", "web/chat")
}

/// Build the story service router with all routes and middleware.
pub fn build_story_router(state: StoryState) -> Router {
    let router = Router::new()
        .route("/api/continue", post(handlers::story::continue_story))
        .route("/health", get(health_check))
        .layer(cors())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    with_landing_page(router, "FABULA_STORY_WEB_DIR", "web/story")
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Serve the landing page directory if it exists. API routes and
/// /health take priority; unknown paths fall through to index.html.
fn with_landing_page(router: Router, env_var: &str, default_dir: &str) -> Router {
    let web_dir = std::env::var(env_var).unwrap_or_else(|_| default_dir.to_string());
    if std::path::Path::new(&web_dir).exists() {
        let index_path = format!("{web_dir}/index.html");
        let serve_dir = ServeDir::new(&web_dir).fallback(ServeFile::new(index_path));
        tracing::info!(path = %web_dir, "landing page serving enabled");
        router.fallback_service(serve_dir)
    } else {
        tracing::warn!(path = %web_dir, "landing page directory missing; serving API only");
        router
    }
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
