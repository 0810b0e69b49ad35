use anyhow::{Context, Result};
use clap::Parser;
use picks_board::data::{save_cards_to_csv, save_state_snapshot};
use picks_board::{init_logging, Board, BoardState, Config, League};

#[derive(Debug, Parser)]
#[command(name = "cli", about = "Print the picks board for the allow-listed games")]
struct Args {
    /// League to load (college-football, nfl, mens-college-basketball, nba)
    #[arg(long)]
    league: Option<League>,

    /// Picks book JSON file; the built-in picks are used otherwise
    #[arg(long)]
    picks: Option<String>,

    /// Root of the sports API
    #[arg(long)]
    base_url: Option<String>,

    /// Print the board state as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Also write the games to a CSV file
    #[arg(long)]
    csv: Option<String>,

    /// Also save the board state to a JSON file
    #[arg(long)]
    snapshot: Option<String>,
}

impl Args {
    fn apply(&self, mut config: Config) -> Config {
        if let Some(league) = self.league {
            config.league = league;
        }
        if let Some(picks) = &self.picks {
            config.picks_file = Some(picks.clone());
        }
        if let Some(base_url) = &self.base_url {
            config.espn_base_url = base_url.clone();
        }
        config
    }
}

fn render_state(state: &BoardState) -> String {
    match state {
        BoardState::Loading => "Loading games...".to_string(),
        BoardState::Error(e) => format!("Error: {}", e),
        BoardState::Loaded(cards) if cards.is_empty() => "No games available.".to_string(),
        BoardState::Loaded(cards) => cards
            .iter()
            .enumerate()
            .map(|(i, card)| format!("{}. {}\n", i + 1, card.format()))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let args = Args::parse();
    let config = args.apply(Config::from_env().context("Invalid configuration")?);

    // Initialize logging
    init_logging(&config.log_level);

    let board = Board::from_config(&config)?;
    if !args.json {
        println!("Gilbs Picks - {}\n", config.league);
        println!("{}", render_state(&BoardState::Loading));
    }

    let state = board.load().await;

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&state).context("Failed to serialize board")?
        );
    } else {
        println!("{}", render_state(&state));
    }

    if let Some(path) = &args.csv {
        save_cards_to_csv(state.cards(), path).context("Failed to write CSV file")?;
        println!("Saved {} games to {}", state.cards().len(), path);
    }

    if let Some(path) = &args.snapshot {
        save_state_snapshot(&state, path).context("Failed to write snapshot")?;
        println!("Saved board snapshot to {}", path);
    }

    Ok(())
}
