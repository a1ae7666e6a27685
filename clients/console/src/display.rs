use crossterm::{
    cursor,
    execute,
    terminal::{Clear, ClearType},
};
use std::io::{self, Write};
use twentyone::{Card, Hand, HandOutcome, RuleSet};

const PRINT_LIMIT: usize = 80;

pub fn clear_screen() -> io::Result<()> {
    execute!(io::stdout(), Clear(ClearType::All), cursor::MoveTo(0, 0))
}

pub fn read_line() -> io::Result<String> {
    io::stdout().flush()?;
    let mut buffer = String::new();
    io::stdin().read_line(&mut buffer)?;
    Ok(buffer.trim().to_string())
}

pub fn pause() {
    println!("press enter to continue");
    let _ = read_line();
}

fn card_label(card: &Card) -> String {
    format!("[{}]", card.to_display())
}

/// Card row, wrapped so long post-split hands stay readable.
pub fn format_cards(hand: &Hand) -> String {
    let mut output = String::new();
    let mut line_len = 0;
    for card in &hand.cards {
        let label = card_label(card);
        let width = label.chars().count();
        if line_len == 0 {
            output.push_str(&label);
            line_len = width;
        } else if line_len + 3 + width > PRINT_LIMIT {
            output.push('\n');
            output.push_str(&label);
            line_len = width;
        } else {
            output.push_str("   ");
            output.push_str(&label);
            line_len += 3 + width;
        }
    }
    output
}

/// Upcard showing, every other card hidden.
pub fn format_with_hole(hand: &Hand) -> String {
    let mut output = String::new();
    for (idx, card) in hand.cards.iter().enumerate() {
        if idx > 0 {
            output.push_str("   ");
        }
        if idx == 0 {
            output.push_str(&card_label(card));
        } else {
            output.push_str("[??]");
        }
    }
    output
}

pub fn format_upcard(hand: &Hand) -> String {
    hand.cards.first().map(card_label).unwrap_or_default()
}

pub fn status_line(hand: &Hand, rules: &RuleSet) -> String {
    if hand.is_true_blackjack(rules) {
        "21 (blackjack)".to_string()
    } else if hand.is_twenty_one() {
        "21 (unnatural)".to_string()
    } else if hand.is_busted() {
        format!("{} (bust)", hand.value())
    } else {
        format!("{} (stayed)", hand.value())
    }
}

pub fn outcome_word(outcome: HandOutcome) -> &'static str {
    match outcome {
        HandOutcome::Win => "win",
        HandOutcome::Loss => "loss",
        HandOutcome::Push => "push",
    }
}
