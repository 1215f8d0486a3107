use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use configuration::Settings;
use database::TriviaStore;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;
pub mod payloads;
pub mod responses;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TriviaStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn TriviaStore>) -> Self {
        Self { store }
    }
}

/// Builds the application router with CORS and request tracing applied.
pub fn create_router(state: AppState) -> Router {
    // Every response may be read from any origin.
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(AllowMethods::any())
        .allow_headers(AllowHeaders::any());

    Router::new()
        .route(
            "/health",
            get(|| async { "OK" }).fallback(handlers::route_not_found),
        )
        .route("/categories", get(handlers::get_categories).fallback(handlers::route_not_found))
        .route(
            "/categories/:category_id/questions",
            get(handlers::get_questions_by_category).fallback(handlers::route_not_found),
        )
        .route(
            "/questions",
            get(handlers::get_questions)
                .post(handlers::create_question)
                .fallback(handlers::route_not_found),
        )
        .route(
            "/questions/:question_id",
            delete(handlers::delete_question).fallback(handlers::route_not_found),
        )
        .route(
            "/searchQuestions",
            post(handlers::search_questions).fallback(handlers::route_not_found),
        )
        .route(
            "/quizzes",
            post(handlers::play_quiz).fallback(handlers::route_not_found),
        )
        .fallback(handlers::route_not_found)
        .with_state(Arc::new(state))
        .layer(cors)
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http())
}

/// The main function to configure and run the web server.
///
/// Opens the configured store, binds the listener and serves until Ctrl-C.
/// Tracing must already be initialized by the caller.
pub async fn run_server(settings: &Settings) -> anyhow::Result<()> {
    let addr = settings.server.socket_addr()?;
    let store = database::open_store(&settings.database).await?;

    let app = create_router(AppState::new(store))
        .layer(DefaultBodyLimit::max(settings.server.body_limit_bytes));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Web server started and listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Web server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for the shutdown signal.");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, draining connections.");
}
