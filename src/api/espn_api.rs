use crate::config::Config;
use crate::error::{BoardError, Result};
use crate::models::{Event, League};
use crate::utils::normalize::normalize_summary;
use reqwest::Client;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use tracing::debug;

pub const ESPN_BASE_URL: &str = "https://site.api.espn.com/apis/site/v2/sports";

/// Scoreboard document. Events are kept as raw JSON so one bad record
/// cannot fail the whole batch.
#[derive(Debug, Deserialize, Default)]
pub struct ScoreboardResponse {
    pub events: Option<Vec<serde_json::Value>>,
}

/// A single scoreboard event
#[derive(Debug, Deserialize, Default, Clone)]
pub struct RawEvent {
    pub id: Option<String>,
    pub name: Option<String>,
    pub date: Option<String>,
    pub competitions: Option<Vec<RawCompetition>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RawCompetition {
    pub date: Option<String>,
    pub status: Option<RawStatus>,
    pub competitors: Option<Vec<RawCompetitor>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RawStatus {
    #[serde(rename = "type")]
    pub status_type: Option<RawStatusType>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RawStatusType {
    pub detail: Option<String>,
    #[serde(rename = "shortDetail")]
    pub short_detail: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RawCompetitor {
    #[serde(rename = "homeAway")]
    pub home_away: Option<String>,
    pub team: Option<RawTeam>,
    pub score: Option<RawScore>,
    pub winner: Option<bool>,
}

/// Scores arrive as strings on most endpoints, occasionally as numbers
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum RawScore {
    Text(String),
    Number(serde_json::Number),
}

impl fmt::Display for RawScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawScore::Text(s) => f.write_str(s),
            RawScore::Number(n) => write!(f, "{}", n),
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RawTeam {
    pub name: Option<String>,
    /// Scoreboard logo
    pub logo: Option<String>,
    /// Summary logos
    pub logos: Option<Vec<RawLogo>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RawLogo {
    pub href: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct SummaryResponse {
    pub header: Option<SummaryHeader>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct SummaryHeader {
    pub id: Option<String>,
    pub competitions: Option<Vec<RawCompetition>>,
}

/// Client for the public ESPN site API. One request per call, no retries.
#[derive(Debug, Clone)]
pub struct EspnApiClient {
    client: Client,
    base_url: String,
    league: League,
}

impl EspnApiClient {
    pub fn new(league: League) -> Self {
        Self {
            client: Client::new(),
            base_url: ESPN_BASE_URL.to_string(),
            league,
        }
    }

    /// Point the client at another host serving the same API shape
    pub fn with_base_url(base_url: impl Into<String>, league: League) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            league,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| BoardError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.espn_base_url.trim_end_matches('/').to_string(),
            league: config.league,
        })
    }

    pub fn league(&self) -> League {
        self.league
    }

    pub fn scoreboard_url(&self) -> String {
        format!("{}/{}/scoreboard", self.base_url, self.league.path())
    }

    pub fn summary_url(&self) -> String {
        format!("{}/{}/summary", self.base_url, self.league.path())
    }

    /// Fetch the current scoreboard snapshot as raw event records
    pub async fn fetch_scoreboard(&self) -> Result<Vec<serde_json::Value>> {
        let url = self.scoreboard_url();
        debug!("Fetching scoreboard from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| BoardError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(BoardError::Network(format!(
                "scoreboard returned {}",
                response.status()
            )));
        }

        let scoreboard: ScoreboardResponse = response
            .json()
            .await
            .map_err(|e| BoardError::Network(format!("invalid scoreboard response: {}", e)))?;

        let events = scoreboard.events.unwrap_or_default();
        debug!("Scoreboard returned {} events", events.len());
        Ok(events)
    }

    /// Look up a single event on the summary endpoint
    pub async fn fetch_summary(&self, event_id: &str) -> Result<Event> {
        let url = self.summary_url();
        let lookup_error = |reason: String| BoardError::BackfillLookup {
            id: event_id.to_string(),
            reason,
        };

        let response = self
            .client
            .get(&url)
            .query(&[("event", event_id)])
            .send()
            .await
            .map_err(|e| lookup_error(e.to_string()))?;

        if !response.status().is_success() {
            return Err(lookup_error(format!(
                "summary returned {}",
                response.status()
            )));
        }

        let summary: SummaryResponse = response
            .json()
            .await
            .map_err(|e| lookup_error(format!("invalid summary response: {}", e)))?;

        let header = summary.header.ok_or_else(|| {
            BoardError::MalformedRecord(format!("summary for event {} has no header", event_id))
        })?;

        // The summary must describe the requested event
        if let Some(header_id) = header.id.as_deref().filter(|id| !id.is_empty()) {
            if header_id != event_id {
                return Err(BoardError::MalformedRecord(format!(
                    "summary for event {} returned event {}",
                    event_id, header_id
                )));
            }
        }

        normalize_summary(&header, event_id).ok_or_else(|| {
            BoardError::MalformedRecord(format!(
                "summary for event {} is missing a competition or competitor",
                event_id
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    const SCOREBOARD_PATH: &str = "/football/college-football/scoreboard";
    const SUMMARY_PATH: &str = "/football/college-football/summary";

    #[test]
    fn test_urls() {
        let client = EspnApiClient::with_base_url("http://localhost:1234/", League::Nfl);
        assert_eq!(
            client.scoreboard_url(),
            "http://localhost:1234/football/nfl/scoreboard"
        );
        assert_eq!(
            client.summary_url(),
            "http://localhost:1234/football/nfl/summary"
        );
        assert_eq!(
            EspnApiClient::new(League::CollegeFootball).scoreboard_url(),
            "https://site.api.espn.com/apis/site/v2/sports/football/college-football/scoreboard"
        );
    }

    #[test]
    fn test_raw_score_accepts_text_and_numbers() {
        let text: RawScore = serde_json::from_str("\"21\"").unwrap();
        let number: RawScore = serde_json::from_str("14").unwrap();
        assert_eq!(text.to_string(), "21");
        assert_eq!(number.to_string(), "14");
    }

    #[test]
    fn test_from_config() {
        let config = Config {
            espn_base_url: "http://localhost:1234/".to_string(),
            league: League::Nba,
            request_timeout_secs: None,
            ..Config::default()
        };
        let client = EspnApiClient::from_config(&config).unwrap();
        assert_eq!(
            client.scoreboard_url(),
            "http://localhost:1234/basketball/nba/scoreboard"
        );

        let timed = Config {
            request_timeout_secs: Some(3),
            ..Config::default()
        };
        assert!(EspnApiClient::from_config(&timed).is_ok());
    }

    #[tokio::test]
    async fn test_fetch_scoreboard() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", SCOREBOARD_PATH)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"events": [{"id": "1"}, {"id": "2"}]}"#)
            .create_async()
            .await;

        let client = EspnApiClient::with_base_url(server.url(), League::CollegeFootball);
        let events = client.fetch_scoreboard().await.unwrap();
        assert_eq!(events.len(), 2);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_scoreboard_without_events_is_empty() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", SCOREBOARD_PATH)
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let client = EspnApiClient::with_base_url(server.url(), League::CollegeFootball);
        assert!(client.fetch_scoreboard().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_scoreboard_error_status_is_network_error() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", SCOREBOARD_PATH)
            .with_status(503)
            .expect(1)
            .create_async()
            .await;

        let client = EspnApiClient::with_base_url(server.url(), League::CollegeFootball);
        let err = client.fetch_scoreboard().await.unwrap_err();
        assert!(matches!(err, BoardError::Network(_)));
        // no retry
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_scoreboard_invalid_body_is_network_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", SCOREBOARD_PATH)
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let client = EspnApiClient::with_base_url(server.url(), League::CollegeFootball);
        let err = client.fetch_scoreboard().await.unwrap_err();
        assert!(matches!(err, BoardError::Network(_)));
    }

    #[tokio::test]
    async fn test_fetch_summary() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", SUMMARY_PATH)
            .match_query(Matcher::UrlEncoded("event".into(), "401752742".into()))
            .with_status(200)
            .with_body(
                r#"{"header": {"id": "401752742", "competitions": [{
                    "date": "2025-10-18T16:00Z",
                    "status": {"type": {"detail": "Final", "shortDetail": "Final"}},
                    "competitors": [
                        {"team": {"name": "Rebels", "logos": [{"href": "https://a/rebels.png"}]}, "score": "30", "winner": false},
                        {"team": {"name": "Bulldogs", "logos": [{"href": "https://a/dawgs.png"}]}, "score": "34", "winner": true}
                    ]}]}}"#,
            )
            .create_async()
            .await;

        let client = EspnApiClient::with_base_url(server.url(), League::CollegeFootball);
        let event = client.fetch_summary("401752742").await.unwrap();
        assert_eq!(event.id, "401752742");
        assert_eq!(event.competition_name, "Rebels vs Bulldogs");
        assert_eq!(event.away_team_logo, "https://a/dawgs.png");
        assert!(event.away_winner);
        assert!(!event.home_winner);
    }

    #[tokio::test]
    async fn test_fetch_summary_failures() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", SUMMARY_PATH)
            .match_query(Matcher::UrlEncoded("event".into(), "404".into()))
            .with_status(404)
            .create_async()
            .await;
        server
            .mock("GET", SUMMARY_PATH)
            .match_query(Matcher::UrlEncoded("event".into(), "empty".into()))
            .with_status(200)
            .with_body(r#"{"header": {"id": "empty", "competitions": []}}"#)
            .create_async()
            .await;
        server
            .mock("GET", SUMMARY_PATH)
            .match_query(Matcher::UrlEncoded("event".into(), "B".into()))
            .with_status(200)
            .with_body(
                r#"{"header": {"id": "Z", "competitions": [{"competitors": [
                    {"team": {"name": "Rebels"}}, {"team": {"name": "Bulldogs"}}
                ]}]}}"#,
            )
            .create_async()
            .await;

        let client = EspnApiClient::with_base_url(server.url(), League::CollegeFootball);
        assert!(matches!(
            client.fetch_summary("404").await,
            Err(BoardError::BackfillLookup { .. })
        ));
        assert!(matches!(
            client.fetch_summary("empty").await,
            Err(BoardError::MalformedRecord(_))
        ));
        assert!(matches!(
            client.fetch_summary("B").await,
            Err(BoardError::MalformedRecord(_))
        ));
    }
}
