use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::BoardError;

/// Status detail the scoreboard uses for a completed game
pub const FINAL_STATUS: &str = "Final";

/// Leagues the scoreboard endpoints are available for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum League {
    #[default]
    CollegeFootball,
    Nfl,
    CollegeBasketball,
    Nba,
}

impl League {
    /// Path segment below the sports root, e.g. `football/college-football`
    pub fn path(&self) -> &'static str {
        match self {
            League::CollegeFootball => "football/college-football",
            League::Nfl => "football/nfl",
            League::CollegeBasketball => "basketball/mens-college-basketball",
            League::Nba => "basketball/nba",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            League::CollegeFootball => "College Football",
            League::Nfl => "NFL",
            League::CollegeBasketball => "College Basketball",
            League::Nba => "NBA",
        }
    }
}

impl FromStr for League {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "college-football" | "cfb" => Ok(League::CollegeFootball),
            "nfl" => Ok(League::Nfl),
            "mens-college-basketball" | "cbb" => Ok(League::CollegeBasketball),
            "nba" => Ok(League::Nba),
            other => Err(BoardError::Config(format!("unknown league '{}'", other))),
        }
    }
}

impl fmt::Display for League {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// One game as shown on the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub home_team: String,
    pub away_team: String,
    pub home_team_logo: String,
    pub away_team_logo: String,
    pub status: String,
    pub start_date: String, // ISO-8601
    pub home_score: Option<String>,
    pub away_score: Option<String>,
    pub competition_name: String,
    pub description: String,
    pub home_winner: bool,
    pub away_winner: bool,
}

impl Event {
    /// Away score, or "-" before the game starts
    pub fn away_score_label(&self) -> &str {
        self.away_score.as_deref().unwrap_or("-")
    }

    pub fn home_score_label(&self) -> &str {
        self.home_score.as_deref().unwrap_or("")
    }
}

/// A single pick made against an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pick {
    pub picker: String,
    pub pick: String, // e.g. "BYU ML"
}

/// Everyone who made the same pick, in the order they were listed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickGroup {
    pub pick: String,
    pub pickers: Vec<String>,
}

impl PickGroup {
    pub fn pickers_label(&self) -> String {
        self.pickers.join(", ")
    }
}

/// The curated part of the board: which events to show and the picks made on them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PicksBook {
    #[serde(default)]
    pub allowed_ids: Vec<String>,
    #[serde(default)]
    pub picks: HashMap<String, Vec<Pick>>,
}

impl PicksBook {
    pub fn picks_for(&self, event_id: &str) -> &[Pick] {
        self.picks
            .get(event_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// An event together with its grouped picks, ready to render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardCard {
    pub event: Event,
    pub picks: Vec<PickGroup>,
}

impl BoardCard {
    /// Format the card as a readable block of text
    pub fn format(&self) -> String {
        let e = &self.event;
        let mut out = format!(
            "{} [{}]\n  {}{} {}\n  {}{} {}",
            e.competition_name,
            e.description,
            e.away_team,
            if e.away_winner { " (W)" } else { "" },
            e.away_score_label(),
            e.home_team,
            if e.home_winner { " (W)" } else { "" },
            e.home_score_label(),
        );
        if !self.picks.is_empty() {
            out.push_str("\n  PICKS");
            for group in &self.picks {
                out.push_str(&format!(
                    "\n    {} odds at {}",
                    group.pick,
                    group.pickers_label()
                ));
            }
        }
        out
    }
}

/// What the page shows. Each load replaces the whole value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "data", rename_all = "camelCase")]
pub enum BoardState {
    Loading,
    Error(String),
    Loaded(Vec<BoardCard>),
}

impl BoardState {
    pub fn cards(&self) -> &[BoardCard] {
        match self {
            BoardState::Loaded(cards) => cards,
            _ => &[],
        }
    }
}
