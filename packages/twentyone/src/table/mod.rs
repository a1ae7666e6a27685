use crate::outcome::{dealer_should_hit, performance_vs_dealer};
use crate::{Card, Dealer, Deck, GameError, Hand, HandOutcome, Player, RuleSet};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Where a round currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    NotStarted,
    PlayerTurn,
    DealerTurn,
    Settled,
}

/// The three things a player can do with a live hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Move {
    Hit,
    Stay,
    Split,
}

/// The table runs one round at a time: deal, player turns, dealer turn,
/// settlement, reset. It owns the shoe and every hand; front ends sequence
/// these calls and do all of the talking.
#[derive(Debug, Clone)]
pub struct Table {
    pub players: Vec<Player>,
    pub dealer: Dealer,
    pub rules: RuleSet,
    pub phase: GamePhase,
    pub round: u32,
    deck: Deck,
    rng: StdRng,
}

impl Table {
    pub fn new(rules: RuleSet, names: Vec<String>) -> Result<Self, GameError> {
        Self::with_rng(rules, names, StdRng::from_entropy())
    }

    /// Deterministic shoe order for tests and replayable games.
    pub fn with_seed(rules: RuleSet, names: Vec<String>, seed: u64) -> Result<Self, GameError> {
        Self::with_rng(rules, names, StdRng::seed_from_u64(seed))
    }

    fn with_rng(rules: RuleSet, names: Vec<String>, mut rng: StdRng) -> Result<Self, GameError> {
        if rules.num_players == 0 || rules.num_decks == 0 {
            return Err(GameError::InvalidRules);
        }
        if names.len() != rules.num_players as usize {
            return Err(GameError::PlayerCount {
                expected: rules.num_players as usize,
                got: names.len(),
            });
        }
        let deck = Deck::shuffled(rules.num_decks, &mut rng);
        Ok(Self {
            players: names.into_iter().map(Player::new).collect(),
            dealer: Dealer::new(),
            rules,
            phase: GamePhase::NotStarted,
            round: 1,
            deck,
            rng,
        })
    }

    pub fn shoe_size(&self) -> usize {
        self.deck.len()
    }

    /// Two cards to every player, then the dealer's opener: one card under
    /// the no-hole-card rule, two otherwise. When the dealer opens on a
    /// blackjack and ties go to the house, player turns are skipped
    /// entirely and the round goes straight to settlement.
    pub fn deal_initial(&mut self) -> Result<(), GameError> {
        self.ensure_phase(GamePhase::NotStarted, "the initial deal")?;
        for idx in 0..self.players.len() {
            for _ in 0..2 {
                let card = self.draw_card();
                self.players[idx].hands[0].add_card(card);
            }
        }
        let dealer_cards = if self.rules.no_hole_card { 1 } else { 2 };
        for _ in 0..dealer_cards {
            let card = self.draw_card();
            self.dealer.hand.add_card(card);
        }
        self.phase = if self.dealer_blackjack_ends_round() {
            GamePhase::DealerTurn
        } else {
            GamePhase::PlayerTurn
        };
        Ok(())
    }

    pub fn dealer_blackjack_ends_round(&self) -> bool {
        self.dealer.hand.is_blackjack() && self.rules.dealer_wins_ties
    }

    /// Moves open to a hand right now, in menu order. A hand that is no
    /// longer live has none.
    pub fn available_moves(&self, player_idx: usize, hand_idx: usize) -> Result<Vec<Move>, GameError> {
        self.ensure_phase(GamePhase::PlayerTurn, "choosing a move")?;
        let hand = self.hand_at(player_idx, hand_idx)?;
        if !hand.is_live() {
            return Ok(Vec::new());
        }
        let mut moves = Vec::new();
        if hand.can_hit(&self.rules) {
            moves.push(Move::Hit);
        }
        moves.push(Move::Stay);
        if self.players[player_idx].can_split(hand_idx, &self.rules) {
            moves.push(Move::Split);
        }
        Ok(moves)
    }

    pub fn hit(&mut self, player_idx: usize, hand_idx: usize) -> Result<(), GameError> {
        self.ensure_phase(GamePhase::PlayerTurn, "a hit")?;
        let rules = self.rules;
        {
            let hand = self.hand_at(player_idx, hand_idx)?;
            if !hand.is_live() {
                return Err(GameError::HandNotLive);
            }
            if !hand.can_hit(&rules) {
                return Err(GameError::HitNotAllowed);
            }
        }
        let card = self.draw_card();
        self.players[player_idx].hands[hand_idx].add_card(card);
        Ok(())
    }

    pub fn stay(&mut self, player_idx: usize, hand_idx: usize) -> Result<(), GameError> {
        self.ensure_phase(GamePhase::PlayerTurn, "a stay")?;
        self.hand_at(player_idx, hand_idx)?;
        let hand = &mut self.players[player_idx].hands[hand_idx];
        if !hand.is_live() {
            return Err(GameError::HandNotLive);
        }
        hand.stay();
        Ok(())
    }

    /// Splits the pair and completes both children with one card each, so
    /// every hand on the table keeps at least two cards once dealt.
    pub fn split(&mut self, player_idx: usize, hand_idx: usize) -> Result<(), GameError> {
        self.ensure_phase(GamePhase::PlayerTurn, "a split")?;
        let rules = self.rules;
        {
            let hand = self.hand_at(player_idx, hand_idx)?;
            if !hand.is_live() {
                return Err(GameError::HandNotLive);
            }
        }
        self.players[player_idx].split(hand_idx, &rules)?;
        let count = self.players[player_idx].hands.len();
        for idx in count - 2..count {
            let card = self.draw_card();
            self.players[player_idx].hands[idx].add_card(card);
        }
        Ok(())
    }

    /// Reveals the deferred hole card if there is one, then runs the fixed
    /// dealer policy to a terminal hand. Requires every player hand to be
    /// finished; a short-circuited round skips straight past this.
    pub fn play_dealer(&mut self) -> Result<(), GameError> {
        match self.phase {
            GamePhase::PlayerTurn => {
                if self.players.iter().any(Player::has_live_hand) {
                    return Err(GameError::PlayersStillActing);
                }
                self.phase = GamePhase::DealerTurn;
                if self.rules.no_hole_card {
                    let card = self.draw_card();
                    self.dealer.hand.add_card(card);
                }
            }
            GamePhase::DealerTurn => {}
            phase => {
                return Err(GameError::OutOfPhase {
                    action: "the dealer turn",
                    phase,
                })
            }
        }
        while self.dealer.hand.is_live() {
            if dealer_should_hit(&self.dealer.hand, &self.rules) {
                let card = self.draw_card();
                self.dealer.hand.add_card(card);
            } else {
                self.dealer.hand.stay();
            }
        }
        Ok(())
    }

    /// Scores every player hand against the dealer hand and folds the
    /// results into the cumulative scores. Outcomes come back in player
    /// order, one inner entry per hand.
    pub fn settle(&mut self) -> Result<Vec<Vec<HandOutcome>>, GameError> {
        self.ensure_phase(GamePhase::DealerTurn, "settlement")?;
        if self.dealer.hand.is_live() {
            return Err(GameError::DealerStillActing);
        }
        let dealer_hand = self.dealer.hand.clone();
        let rules = self.rules;
        let mut results = Vec::with_capacity(self.players.len());
        for player in &mut self.players {
            let outcomes: Vec<HandOutcome> = player
                .hands
                .iter()
                .map(|hand| performance_vs_dealer(hand, &dealer_hand, &rules))
                .collect();
            for &outcome in &outcomes {
                player.score.record(outcome);
            }
            results.push(outcomes);
        }
        self.phase = GamePhase::Settled;
        Ok(results)
    }

    /// Round boundary: fresh hands, fresh split counters, fresh shoe.
    /// Names and scores carry over.
    pub fn reset_round(&mut self) -> Result<(), GameError> {
        self.ensure_phase(GamePhase::Settled, "the round reset")?;
        for player in &mut self.players {
            player.reset_round();
        }
        self.dealer.reset_round();
        self.replace_shoe();
        self.round += 1;
        self.phase = GamePhase::NotStarted;
        Ok(())
    }

    fn draw_card(&mut self) -> Card {
        if self.deck.is_empty() {
            self.replace_shoe();
        }
        self.deck.deal()
    }

    fn replace_shoe(&mut self) {
        self.deck = Deck::shuffled(self.rules.num_decks, &mut self.rng);
    }

    fn ensure_phase(&self, expected: GamePhase, action: &'static str) -> Result<(), GameError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(GameError::OutOfPhase {
                action,
                phase: self.phase,
            })
        }
    }

    fn hand_at(&self, player_idx: usize, hand_idx: usize) -> Result<&Hand, GameError> {
        let player = self
            .players
            .get(player_idx)
            .ok_or(GameError::UnknownPlayer(player_idx))?;
        player.hands.get(hand_idx).ok_or(GameError::UnknownHand(hand_idx))
    }
}
