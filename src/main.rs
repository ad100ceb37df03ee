mod config;
mod dto;
mod handlers;
mod models;
mod repository;
mod service;

use axum::{
    Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};

use std::sync::Arc;

use handlers::rest;
use repository::Repository;

use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use service::NoteService;

#[tokio::main]
async fn main() {
    // Log setup
    tracing_subscriber::fmt::init();

    // Load config
    let cfg = config::load_config().expect("failed to load config");
    tracing::info!("Using database file {}", cfg.database_path.display());

    // Repository creation and migration
    let repo = Repository::open(&cfg.database_path).unwrap_or_else(|e| {
        tracing::error!("Error opening database: {e}");
        panic!("failed to open database: {e}");
    });

    repo.migrate().unwrap_or_else(|e| {
        tracing::error!("Failed to migrate database: {e}");
        panic!("failed to migrate database: {e}");
    });
    tracing::info!("Connected to the SQLite database");

    // Service creation
    let service = Arc::new(NoteService::new(Arc::new(tokio::sync::Mutex::new(repo))));

    let listener = tokio::net::TcpListener::bind((cfg.host.as_str(), cfg.port))
        .await
        .expect("failed to bind to address");
    let addr = listener.local_addr().expect("listener has no local address");

    tracing::info!("Server running at http://{}", addr);
    axum::serve(listener, app(service))
        .await
        .expect("failed to start server");
}

fn app(service: Arc<NoteService>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/notes", get(rest::get_all_notes))
        .route("/note", post(rest::create_note))
        .route("/note/", post(rest::create_note))
        .route(
            "/note/{id}",
            get(rest::get_one_note)
                .put(rest::update_note)
                .delete(rest::delete_note),
        )
        .route("/note/read/{title}", get(rest::get_note_by_title))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", rest::ApiDoc::openapi()))
        .with_state(service)
        .layer(TraceLayer::new_for_http())
}

async fn root() -> Response {
    (StatusCode::OK, "Notes server is up").into_response()
}
