pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod utils;

pub use api::*;
pub use config::Config;
pub use error::BoardError;
pub use models::*;
pub use utils::*;

use anyhow::{Context, Result};
use utils::board::load_board_state;
use utils::data::resolve_picks_book;

/// Everything a page load needs: the API client and the curated picks
#[derive(Debug, Clone)]
pub struct Board {
    pub client: EspnApiClient,
    pub book: PicksBook,
}

impl Board {
    pub fn from_config(config: &Config) -> Result<Self> {
        let client =
            EspnApiClient::from_config(config).context("Failed to create scoreboard client")?;
        let book = resolve_picks_book(config.picks_file.as_deref())
            .context("Failed to load picks")?;

        Ok(Self { client, book })
    }

    /// Run one page load. Never fails; a scoreboard failure becomes the error state.
    pub async fn load(&self) -> BoardState {
        load_board_state(&self.client, &self.book).await
    }
}

/// Initialize tracing with `RUST_LOG`, falling back to the configured level
pub fn init_logging(default_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
