use crate::api::espn_api::{RawCompetition, RawCompetitor, RawEvent, RawTeam, SummaryHeader};
use crate::models::{Event, League, FINAL_STATUS};
use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::Deserialize;
use tracing::debug;

/// Which of the two API shapes a record came from. They differ in where the
/// logo lives and in how the matchup label and start date are derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    Scoreboard,
    Summary,
}

/// Map one raw scoreboard record to an [`Event`].
///
/// Returns `None` when the record is not shaped like an event or lacks a
/// competition, a home competitor or an away competitor.
pub fn normalize_scoreboard_event(raw: &serde_json::Value, league: League) -> Option<Event> {
    let event = match RawEvent::deserialize(raw) {
        Ok(event) => event,
        Err(e) => {
            debug!("Dropping malformed scoreboard record: {}", e);
            return None;
        }
    };

    let id = non_empty(event.id.as_deref())?.to_string();
    let competition = event.competitions.as_ref()?.first()?;
    let competition_name = non_empty(event.name.as_deref())
        .unwrap_or(league.display_name())
        .to_string();

    build_event(
        id,
        competition,
        event.date.as_deref(),
        Some(competition_name),
        Source::Scoreboard,
    )
}

/// Map a summary header to an [`Event`]. `event_id` is used when the header
/// does not carry its own id.
pub fn normalize_summary(header: &SummaryHeader, event_id: &str) -> Option<Event> {
    let id = non_empty(header.id.as_deref())
        .unwrap_or(event_id)
        .to_string();
    let competition = header.competitions.as_ref()?.first()?;

    build_event(id, competition, competition.date.as_deref(), None, Source::Summary)
}

fn build_event(
    id: String,
    competition: &RawCompetition,
    date: Option<&str>,
    competition_name: Option<String>,
    source: Source,
) -> Option<Event> {
    let (home, away) = split_competitors(competition.competitors.as_deref()?)?;

    let status_type = competition
        .status
        .as_ref()
        .and_then(|s| s.status_type.as_ref());
    let status = status_type
        .and_then(|t| non_empty(t.detail.as_deref()))
        .unwrap_or("Scheduled")
        .to_string();
    let description = status_type
        .and_then(|t| t.short_detail.clone())
        .unwrap_or_default();

    let home_team = team_name(home, "Home");
    let away_team = team_name(away, "Away");
    let competition_name =
        competition_name.unwrap_or_else(|| format!("{} vs {}", home_team, away_team));

    // A winner flag only counts once the game is over
    let is_final = status == FINAL_STATUS;

    Some(Event {
        id,
        home_team_logo: team_logo(home, source),
        away_team_logo: team_logo(away, source),
        start_date: start_date_or_now(date),
        home_score: home.score.as_ref().map(|s| s.to_string()),
        away_score: away.score.as_ref().map(|s| s.to_string()),
        home_winner: is_final && home.winner.unwrap_or(false),
        away_winner: is_final && away.winner.unwrap_or(false),
        home_team,
        away_team,
        status,
        competition_name,
        description,
    })
}

/// Pick the home and away competitors. Uses the `homeAway` tags when both are
/// present, otherwise the first two entries are home and away.
fn split_competitors(competitors: &[RawCompetitor]) -> Option<(&RawCompetitor, &RawCompetitor)> {
    let tagged = |side: &str| {
        competitors
            .iter()
            .find(|c| c.home_away.as_deref() == Some(side))
    };

    if let (Some(home), Some(away)) = (tagged("home"), tagged("away")) {
        return Some((home, away));
    }

    Some((competitors.first()?, competitors.get(1)?))
}

fn team_name(competitor: &RawCompetitor, fallback: &str) -> String {
    competitor
        .team
        .as_ref()
        .and_then(|t| non_empty(t.name.as_deref()))
        .unwrap_or(fallback)
        .to_string()
}

fn team_logo(competitor: &RawCompetitor, source: Source) -> String {
    let team: Option<&RawTeam> = competitor.team.as_ref();
    let logo = match source {
        Source::Scoreboard => team.and_then(|t| t.logo.clone()),
        Source::Summary => team
            .and_then(|t| t.logos.as_ref())
            .and_then(|logos| logos.first())
            .and_then(|l| l.href.clone()),
    };
    logo.unwrap_or_default()
}

/// Missing start dates fall back to the current time
fn start_date_or_now(date: Option<&str>) -> String {
    match non_empty(date) {
        Some(d) => d.to_string(),
        None => Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Human readable kickoff time, e.g. "Oct 18, 7:30 PM UTC".
/// Falls back to the input when it cannot be parsed.
pub fn format_kickoff(start_date: &str) -> String {
    let parsed = DateTime::parse_from_rfc3339(start_date)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            // The scoreboard omits seconds: "2025-10-18T19:30Z"
            NaiveDateTime::parse_from_str(start_date, "%Y-%m-%dT%H:%MZ")
                .ok()
                .map(|naive| naive.and_utc())
        });

    match parsed {
        Some(dt) => dt.format("%b %-d, %-I:%M %p UTC").to_string(),
        None => start_date.to_string(),
    }
}
