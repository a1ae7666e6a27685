use crate::display;
use log::info;
use std::error::Error;
use twentyone::{Hand, HandOutcome, Move, Table};

fn move_label(choice: Move) -> &'static str {
    match choice {
        Move::Hit => "hit",
        Move::Stay => "stay",
        Move::Split => "split",
    }
}

/// The console loop: prompts and screens around the table's round cycle.
pub struct ConsoleGame {
    table: Table,
    total_rounds: u32,
}

impl ConsoleGame {
    pub fn new(table: Table, total_rounds: u32) -> Self {
        Self { table, total_rounds }
    }

    pub fn run(&mut self) -> Result<(), Box<dyn Error>> {
        loop {
            self.play_round()?;
            if self.table.round == self.total_rounds {
                break;
            }
            self.table.reset_round()?;
        }
        println!("Thanks for playing Twenty One! Bye!!!");
        println!();
        Ok(())
    }

    fn play_round(&mut self) -> Result<(), Box<dyn Error>> {
        info!("round {} begins", self.table.round);
        self.table.deal_initial()?;
        if self.table.dealer_blackjack_ends_round() {
            display::clear_screen()?;
            println!("Dealer got Blackjack! Better luck next time!");
            println!();
            info!("dealer opened on a natural; player turns skipped");
            display::pause();
        } else {
            for player_idx in 0..self.table.players.len() {
                self.take_turn(player_idx)?;
            }
            self.table.play_dealer()?;
            self.show_dealer_result()?;
        }
        let outcomes = self.table.settle()?;
        self.show_round_results(&outcomes)?;
        self.show_scores()?;
        Ok(())
    }

    fn take_turn(&mut self, player_idx: usize) -> Result<(), Box<dyn Error>> {
        self.announce_opening_hand(player_idx)?;
        loop {
            let hands = &self.table.players[player_idx].hands;
            let Some(hand_idx) = hands.iter().position(Hand::is_live) else {
                break;
            };
            let moves = self.table.available_moves(player_idx, hand_idx)?;
            let choice = self.prompt_move(player_idx, hand_idx, &moves)?;
            match choice {
                Move::Hit => self.table.hit(player_idx, hand_idx)?,
                Move::Stay => self.table.stay(player_idx, hand_idx)?,
                Move::Split => self.table.split(player_idx, hand_idx)?,
            }
            info!(
                "{} chose {} on hand {}",
                self.table.players[player_idx].name,
                move_label(choice),
                hand_idx + 1
            );
            if choice != Move::Split && !self.table.players[player_idx].hands[hand_idx].is_live() {
                self.show_finished_hand(player_idx, hand_idx)?;
            }
        }
        Ok(())
    }

    fn announce_opening_hand(&self, player_idx: usize) -> Result<(), Box<dyn Error>> {
        if self.table.players[player_idx].hands[0].is_blackjack() {
            display::clear_screen()?;
            self.print_turn_view(player_idx, 0);
            println!("=> Blackjack!!!");
            display::pause();
        }
        Ok(())
    }

    fn prompt_move(
        &self,
        player_idx: usize,
        hand_idx: usize,
        moves: &[Move],
    ) -> Result<Move, Box<dyn Error>> {
        loop {
            display::clear_screen()?;
            self.print_turn_view(player_idx, hand_idx);
            let menu = moves
                .iter()
                .enumerate()
                .map(|(idx, &choice)| format!("{})  {}", idx + 1, move_label(choice)))
                .collect::<Vec<_>>()
                .join("    ");
            println!("Select an option:  {menu}");
            let entry = display::read_line()?;
            if let Ok(number) = entry.parse::<usize>() {
                if (1..=moves.len()).contains(&number) {
                    return Ok(moves[number - 1]);
                }
            }
            println!("=> Invalid entry. Please try again.");
            display::pause();
        }
    }

    fn print_turn_view(&self, player_idx: usize, hand_idx: usize) {
        let player = &self.table.players[player_idx];
        let hand = &player.hands[hand_idx];
        let dealer_view = if self.table.rules.no_hole_card {
            display::format_upcard(&self.table.dealer.hand)
        } else {
            display::format_with_hole(&self.table.dealer.hand)
        };
        println!("Round {} - {}'s Turn:", self.table.round, player.name);
        println!();
        println!("--------------------------------------------------");
        println!("=> Dealer's Hand:   {dealer_view}");
        println!("__________________________________________________");
        println!("{}: Hand {} of {}", player.name, hand_idx + 1, player.hands.len());
        println!();
        println!("{}", display::format_cards(hand));
        println!();
        println!("=> Value: {}", hand.value());
        println!();
    }

    fn show_finished_hand(&self, player_idx: usize, hand_idx: usize) -> Result<(), Box<dyn Error>> {
        let hand = &self.table.players[player_idx].hands[hand_idx];
        display::clear_screen()?;
        self.print_turn_view(player_idx, hand_idx);
        if hand.is_busted() {
            println!("=> Bust!");
        } else if hand.is_true_blackjack(&self.table.rules) {
            println!("=> Blackjack!");
        } else if hand.is_twenty_one() {
            println!("=> Twenty one!");
        } else {
            println!("=> Stayed at {}", hand.value());
        }
        display::pause();
        Ok(())
    }

    fn show_dealer_result(&self) -> Result<(), Box<dyn Error>> {
        let dealer = &self.table.dealer.hand;
        display::clear_screen()?;
        println!("Round {} - Dealer's Turn:", self.table.round);
        println!();
        println!("=> Dealer's Hand:");
        println!("{}", display::format_cards(dealer));
        println!();
        println!("=> Value: {}", dealer.value());
        println!("__________________________________________________");
        if dealer.stayed {
            println!("Dealer hand stayed at {}", dealer.value());
        } else if dealer.is_blackjack() {
            println!("Dealer gets Blackjack!");
        } else if dealer.is_twenty_one() {
            println!("Dealer gets Twenty One!");
        } else {
            println!("Dealer busts!");
        }
        info!("dealer finished at {}", dealer.value());
        display::pause();
        Ok(())
    }

    fn show_round_results(&self, outcomes: &[Vec<HandOutcome>]) -> Result<(), Box<dyn Error>> {
        display::clear_screen()?;
        println!("Round {} Results:", self.table.round);
        println!();
        println!("=> Dealer's Hand:");
        println!("=> {}", display::status_line(&self.table.dealer.hand, &self.table.rules));
        println!("__________________________________________________");
        for (player, player_outcomes) in self.table.players.iter().zip(outcomes) {
            if player.hands.len() > 1 {
                println!("{}'s Hands:", player.name);
            } else {
                println!("{}'s Hand:", player.name);
            }
            let summary = player
                .hands
                .iter()
                .zip(player_outcomes)
                .map(|(hand, &outcome)| format!("{} ({})", hand.value(), display::outcome_word(outcome)))
                .collect::<Vec<_>>()
                .join(", ");
            println!("=>  {summary}");
            println!();
            info!("{}: {summary}", player.name);
        }
        display::pause();
        Ok(())
    }

    fn show_scores(&self) -> Result<(), Box<dyn Error>> {
        let last_round = self.table.round == self.total_rounds;
        display::clear_screen()?;
        if last_round {
            println!("Final Results:");
        } else {
            println!("Round {} Results:", self.table.round);
        }
        println!();
        println!("Player Scores:");
        println!();
        println!("__________________________________________________");
        for player in &self.table.players {
            println!("{}:", player.name);
            println!(
                "=> won {} out of {} hands played.",
                player.score.hands_won, player.score.hands_played
            );
            println!("=> (win percentage: {:.1}%)", player.score.win_percentage());
            println!();
        }
        if !last_round {
            display::pause();
        }
        Ok(())
    }
}
