use crate::error::Result;
use crate::models::{BoardCard, BoardState, PicksBook};
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// Allow-list and picks shipped with the binary
const DEFAULT_PICKS_JSON: &str = include_str!("../../data/picks.json");

/// The built-in picks book
pub fn default_picks_book() -> Result<PicksBook> {
    Ok(serde_json::from_str(DEFAULT_PICKS_JSON)?)
}

/// Load a picks book from a JSON file
pub fn load_picks_book(path: impl AsRef<Path>) -> Result<PicksBook> {
    let json = std::fs::read_to_string(path.as_ref())?;
    let book: PicksBook = serde_json::from_str(&json)?;
    Ok(book)
}

/// Use the file when one is given, the built-in book otherwise
pub fn resolve_picks_book(path: Option<&str>) -> Result<PicksBook> {
    match path {
        Some(path) => {
            info!("Loading picks from {}", path);
            load_picks_book(path)
        }
        None => default_picks_book(),
    }
}

/// Save a board state to a JSON file
pub fn save_state_snapshot(state: &BoardState, path: impl AsRef<Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(state)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Load a board state saved by [`save_state_snapshot`]
pub fn load_state_snapshot(path: impl AsRef<Path>) -> Result<BoardState> {
    let json = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

#[derive(Debug, Serialize)]
struct CardRow<'a> {
    id: &'a str,
    matchup: &'a str,
    status: &'a str,
    start_date: &'a str,
    away_team: &'a str,
    away_score: &'a str,
    home_team: &'a str,
    home_score: &'a str,
    winner: &'a str,
    picks: String,
}

/// Save board cards to CSV, one row per game
pub fn save_cards_to_csv(cards: &[BoardCard], path: impl AsRef<Path>) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    for card in cards {
        let e = &card.event;
        let winner = if e.home_winner {
            e.home_team.as_str()
        } else if e.away_winner {
            e.away_team.as_str()
        } else {
            ""
        };
        let picks = card
            .picks
            .iter()
            .map(|g| format!("{} @ {}", g.pick, g.pickers_label()))
            .collect::<Vec<_>>()
            .join("; ");

        writer.serialize(CardRow {
            id: &e.id,
            matchup: &e.competition_name,
            status: &e.status,
            start_date: &e.start_date,
            away_team: &e.away_team,
            away_score: e.away_score.as_deref().unwrap_or(""),
            home_team: &e.home_team,
            home_score: e.home_score.as_deref().unwrap_or(""),
            winner,
            picks,
        })?;
    }

    writer.flush()?;
    Ok(())
}
