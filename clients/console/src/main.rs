use clap::{Parser, ValueEnum};
use std::error::Error;
use std::path::PathBuf;
use twentyone::{RuleSet, Table};

mod display;
mod game;
mod logger;
mod roster;

use game::ConsoleGame;
use roster::Roster;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Preset {
    VegasStrip,
    European,
}

#[derive(Parser)]
#[command(name = "twentyone", about = "Multi-round Twenty One at the console")]
struct Args {
    /// Named house-rule preset to start from
    #[arg(long, value_enum)]
    preset: Option<Preset>,

    /// JSON file with a (possibly partial) rule set; overrides the preset
    #[arg(long)]
    rules_file: Option<PathBuf>,

    /// Number of seats at the table
    #[arg(long)]
    players: Option<u8>,

    /// Number of 52-card decks in the shoe
    #[arg(long)]
    decks: Option<u8>,

    /// Maximum splits per player per round
    #[arg(long)]
    split_limit: Option<u8>,

    #[arg(long)]
    dealer_hits_soft_17: Option<bool>,

    #[arg(long)]
    dealer_wins_ties: Option<bool>,

    #[arg(long)]
    can_hit_split_aces: Option<bool>,

    #[arg(long)]
    post_split_blackjack: Option<bool>,

    #[arg(long)]
    no_hole_card: Option<bool>,

    #[arg(long)]
    split_by_rank: Option<bool>,

    /// Number of rounds to play (prompted for when omitted)
    #[arg(long)]
    rounds: Option<u32>,

    /// Shoe shuffle seed, for replayable games
    #[arg(long)]
    seed: Option<u64>,

    /// Round-by-round event log
    #[arg(long, default_value = "twentyone.log")]
    log_file: PathBuf,
}

fn main() {
    let args = Args::parse();
    if let Err(err) = run(args) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    logger::init(&args.log_file)?;
    let rules = resolve_rules(&args)?;
    let names = collect_names(rules.num_players)?;
    let rounds = match args.rounds {
        Some(rounds) if rounds > 0 => rounds,
        Some(_) => return Err("at least one round is required".into()),
        None => prompt_rounds()?,
    };
    let table = match args.seed {
        Some(seed) => Table::with_seed(rules, names, seed)?,
        None => Table::new(rules, names)?,
    };
    ConsoleGame::new(table, rounds).run()
}

fn resolve_rules(args: &Args) -> Result<RuleSet, Box<dyn Error>> {
    let mut rules = match (&args.rules_file, args.preset) {
        (Some(path), _) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        (None, Some(Preset::VegasStrip)) => RuleSet::vegas_strip(),
        (None, Some(Preset::European)) => RuleSet::european(),
        (None, None) => RuleSet::default(),
    };
    if let Some(players) = args.players {
        rules.num_players = players;
    }
    if let Some(decks) = args.decks {
        rules.num_decks = decks;
    }
    if let Some(split_limit) = args.split_limit {
        rules.split_limit = split_limit;
    }
    if let Some(value) = args.dealer_hits_soft_17 {
        rules.dealer_hits_soft_17 = value;
    }
    if let Some(value) = args.dealer_wins_ties {
        rules.dealer_wins_ties = value;
    }
    if let Some(value) = args.can_hit_split_aces {
        rules.can_hit_split_aces = value;
    }
    if let Some(value) = args.post_split_blackjack {
        rules.post_split_blackjack = value;
    }
    if let Some(value) = args.no_hole_card {
        rules.no_hole_card = value;
    }
    if let Some(value) = args.split_by_rank {
        rules.split_by_rank = value;
    }
    if rules.num_players == 0 {
        return Err("at least one player is required".into());
    }
    if rules.num_decks == 0 {
        return Err("at least one deck is required".into());
    }
    Ok(rules)
}

fn collect_names(count: u8) -> Result<Vec<String>, Box<dyn Error>> {
    let mut roster = Roster::new();
    for idx in 0..count {
        loop {
            display::clear_screen()?;
            println!("Welcome to Twenty One!");
            println!();
            println!("Player {}, what is your name?", idx + 1);
            let name = display::read_line()?;
            match roster.admit(&name) {
                Ok(()) => break,
                Err(reason) => {
                    println!("{reason}");
                    display::pause();
                }
            }
        }
    }
    Ok(roster.into_names())
}

fn prompt_rounds() -> Result<u32, Box<dyn Error>> {
    loop {
        display::clear_screen()?;
        println!("Welcome to Twenty One!");
        println!();
        println!("How many rounds do you want to play?");
        let entry = display::read_line()?;
        match entry.parse::<u32>() {
            Ok(rounds) if rounds > 0 => return Ok(rounds),
            _ => {
                println!("Please enter a positive integer");
                display::pause();
            }
        }
    }
}
