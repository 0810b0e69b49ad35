use anyhow::Context;
use askama::Template;
use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};
use picks_board::{init_logging, Board, BoardCard, BoardState, Config};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{error, info};

const PAGE_TITLE: &str = "Gilbs Picks";

// Custom filters for formatting
mod filters {
    pub fn kickoff(s: &str) -> ::askama::Result<String> {
        Ok(picks_board::normalize::format_kickoff(s))
    }
}

#[derive(Template)]
#[template(path = "board.html")]
struct BoardTemplate {
    title: String,
    loading: bool,
    has_error: bool,
    error: String,
    show_empty: bool,
    cards: Vec<BoardCard>,
}

impl BoardTemplate {
    fn from_state(state: BoardState) -> Self {
        let (loading, error, cards) = match state {
            BoardState::Loading => (true, None, Vec::new()),
            BoardState::Error(message) => (false, Some(message), Vec::new()),
            BoardState::Loaded(cards) => (false, None, cards),
        };
        let has_error = error.is_some();

        Self {
            title: PAGE_TITLE.to_string(),
            loading,
            has_error,
            error: error.unwrap_or_default(),
            show_empty: !loading && !has_error && cards.is_empty(),
            cards,
        }
    }
}

#[derive(Clone)]
struct AppState {
    board: Arc<Board>,
    // Latest completed load, replaced as a whole
    latest: Arc<RwLock<BoardState>>,
}

impl AppState {
    async fn refresh(&self) -> BoardState {
        let state = self.board.load().await;
        *self.latest.write().await = state.clone();
        state
    }
}

/// Every page view is a fresh load
async fn home(State(app): State<AppState>) -> impl IntoResponse {
    let state = app.refresh().await;
    BoardTemplate::from_state(state)
}

async fn board_json(State(app): State<AppState>) -> Json<BoardState> {
    Json(app.latest.read().await.clone())
}

async fn health() -> &'static str {
    "ok"
}

fn router(app: AppState) -> Router {
    Router::new()
        .nest_service("/static", ServeDir::new("static"))
        .route("/", get(home))
        .route("/api/board", get(board_json))
        .route("/health", get(health))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(app)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    let config = Config::from_env().context("Invalid configuration")?;
    init_logging(&config.log_level);

    let board = Board::from_config(&config)?;
    info!(
        "Showing {} allow-listed {} games",
        board.book.allowed_ids.len(),
        config.league
    );

    let app = AppState {
        board: Arc::new(board),
        latest: Arc::new(RwLock::new(BoardState::Loading)),
    };

    // Warm the JSON endpoint without holding up the listener
    let warmup = app.clone();
    tokio::spawn(async move {
        if let BoardState::Error(e) = warmup.refresh().await {
            error!("Initial load failed: {}", e);
        }
    });

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Starting web server at http://{}", addr);
    axum::serve(listener, router(app))
        .await
        .context("Server error")?;

    Ok(())
}
