use crate::api::espn_api::EspnApiClient;
use crate::error::Result;
use crate::models::{BoardCard, BoardState, Event, PicksBook};
use crate::utils::normalize::normalize_scoreboard_event;
use crate::utils::picks::picks_for_event;
use futures_util::future::join_all;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Keep the events whose id is on the allow-list, in scoreboard order.
/// An empty allow-list keeps everything.
pub fn filter_allowed(events: Vec<Event>, allowed_ids: &[String]) -> Vec<Event> {
    if allowed_ids.is_empty() {
        return events;
    }

    let allowed: HashSet<&str> = allowed_ids.iter().map(String::as_str).collect();
    events
        .into_iter()
        .filter(|event| allowed.contains(event.id.as_str()))
        .collect()
}

/// Allow-listed ids that did not show up on the scoreboard, in allow-list order
pub fn missing_ids(allowed_ids: &[String], present: &[Event]) -> Vec<String> {
    let mut seen: HashSet<&str> = present.iter().map(|e| e.id.as_str()).collect();

    allowed_ids
        .iter()
        .filter(|id| seen.insert(id.as_str()))
        .cloned()
        .collect()
}

/// Look up each id on the summary endpoint concurrently. Failed lookups are
/// logged and left out; they never affect the other ids.
pub async fn backfill(client: &EspnApiClient, ids: &[String]) -> Vec<Event> {
    if ids.is_empty() {
        return Vec::new();
    }

    debug!("Backfilling {} events from the summary endpoint", ids.len());

    let lookups = ids.iter().map(|id| client.fetch_summary(id));
    let results = join_all(lookups).await;

    results
        .into_iter()
        .zip(ids)
        .filter_map(|(result, id)| match result {
            Ok(event) => Some(event),
            Err(e) => {
                warn!("Failed to fetch game {}: {}", id, e);
                None
            }
        })
        .collect()
}

/// Fetch the scoreboard, narrow it to the allow-list, backfill what is missing
/// and attach the grouped picks to every event.
///
/// Only a failed scoreboard request is an error.
pub async fn build_board(client: &EspnApiClient, book: &PicksBook) -> Result<Vec<BoardCard>> {
    let raw_events = client.fetch_scoreboard().await?;
    let total = raw_events.len();

    let events: Vec<Event> = raw_events
        .iter()
        .filter_map(|raw| normalize_scoreboard_event(raw, client.league()))
        .collect();

    if events.len() < total {
        debug!("Dropped {} malformed scoreboard records", total - events.len());
    }

    let events = if book.allowed_ids.is_empty() {
        events
    } else {
        let mut filtered = filter_allowed(events, &book.allowed_ids);
        let missing = missing_ids(&book.allowed_ids, &filtered);
        filtered.extend(backfill(client, &missing).await);
        filtered
    };

    info!("Board has {} games", events.len());

    Ok(events
        .into_iter()
        .map(|event| BoardCard {
            picks: picks_for_event(book, &event.id),
            event,
        })
        .collect())
}

/// Run one full load and turn the outcome into the state the page shows
pub async fn load_board_state(client: &EspnApiClient, book: &PicksBook) -> BoardState {
    match build_board(client, book).await {
        Ok(cards) => BoardState::Loaded(cards),
        Err(e) => {
            warn!("Board load failed: {}", e);
            BoardState::Error(e.to_string())
        }
    }
}
