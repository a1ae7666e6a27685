use crate::hand::can_split_cards;
use crate::{GameError, Hand, HandOutcome, RuleSet};
use serde::{Deserialize, Serialize};

/// Cumulative record across rounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub hands_won: u32,
    pub hands_played: u32,
}

impl Score {
    pub fn record(&mut self, outcome: HandOutcome) {
        self.hands_played += 1;
        if outcome == HandOutcome::Win {
            self.hands_won += 1;
        }
    }

    /// Percentage of hands won. A player who has not played yet is at 0.0.
    pub fn win_percentage(&self) -> f64 {
        if self.hands_played == 0 {
            return 0.0;
        }
        f64::from(self.hands_won) / f64::from(self.hands_played) * 100.0
    }
}

/// A seat at the table: one or more hands (several after splitting), the
/// per-round split counter, and the cumulative score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub hands: Vec<Hand>,
    pub splits_this_round: u8,
    pub score: Score,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hands: vec![Hand::new()],
            splits_this_round: 0,
            score: Score::default(),
        }
    }

    pub fn has_live_hand(&self) -> bool {
        self.hands.iter().any(Hand::is_live)
    }

    pub fn can_split(&self, hand_idx: usize, rules: &RuleSet) -> bool {
        let Some(hand) = self.hands.get(hand_idx) else {
            return false;
        };
        if hand.cards.len() != 2 || self.splits_this_round >= rules.split_limit {
            return false;
        }
        can_split_cards(&hand.cards[0], &hand.cards[1], rules)
    }

    /// Replaces the hand with two one-card split children, each marked with
    /// its lineage. The caller deals one card to each child before any
    /// further action on them.
    pub fn split(&mut self, hand_idx: usize, rules: &RuleSet) -> Result<(), GameError> {
        if !self.can_split(hand_idx, rules) {
            return Err(GameError::SplitNotAllowed);
        }
        let hand = self.hands.remove(hand_idx);
        let mut cards = hand.cards;
        let second = cards.pop().ok_or(GameError::SplitNotAllowed)?;
        let first = cards.pop().ok_or(GameError::SplitNotAllowed)?;
        self.hands.push(Hand::split_child(first));
        self.hands.push(Hand::split_child(second));
        self.splits_this_round += 1;
        Ok(())
    }

    /// Round boundary: back to a single empty hand. The score persists.
    pub fn reset_round(&mut self) {
        self.hands = vec![Hand::new()];
        self.splits_this_round = 0;
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dealer {
    pub hand: Hand,
}

impl Dealer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset_round(&mut self) {
        self.hand = Hand::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Card, Face, Suit};

    fn pair(first: Face, second: Face) -> Player {
        let mut player = Player::new("test");
        player.hands[0].add_card(Card::new(Suit::Hearts, first));
        player.hands[0].add_card(Card::new(Suit::Spades, second));
        player
    }

    #[test]
    fn test_can_split_a_fresh_pair() {
        let player = pair(Face::Eight, Face::Eight);
        assert!(player.can_split(0, &RuleSet::default()));
    }

    #[test]
    fn test_cannot_split_three_cards() {
        let mut player = pair(Face::Eight, Face::Eight);
        player.hands[0].add_card(Card::new(Suit::Clubs, Face::Two));
        assert!(!player.can_split(0, &RuleSet::default()));
    }

    #[test]
    fn test_cannot_split_past_the_limit() {
        let mut player = pair(Face::Eight, Face::Eight);
        player.splits_this_round = 4;
        assert!(!player.can_split(0, &RuleSet::default()));

        let no_splitting = RuleSet {
            split_limit: 0,
            ..RuleSet::default()
        };
        player.splits_this_round = 0;
        assert!(!player.can_split(0, &no_splitting));
    }

    #[test]
    fn test_cannot_split_mismatched_values() {
        let player = pair(Face::Ten, Face::Nine);
        assert!(!player.can_split(0, &RuleSet::default()));
    }

    #[test]
    fn test_rank_based_splitting_requires_matching_faces() {
        let player = pair(Face::Ten, Face::King);
        assert!(player.can_split(0, &RuleSet::default()));

        let by_rank = RuleSet {
            split_by_rank: true,
            ..RuleSet::default()
        };
        assert!(!player.can_split(0, &by_rank));
    }

    #[test]
    fn test_split_produces_two_marked_one_card_hands() {
        let rules = RuleSet::default();
        let mut player = pair(Face::Eight, Face::Eight);

        player.split(0, &rules).unwrap();

        assert_eq!(player.hands.len(), 2);
        assert_eq!(player.splits_this_round, 1);
        for hand in &player.hands {
            assert_eq!(hand.cards.len(), 1);
            assert_eq!(hand.cards[0].face, Face::Eight);
            assert!(hand.obtained_via_split);
        }
    }

    #[test]
    fn test_split_of_an_ineligible_hand_is_an_error() {
        let rules = RuleSet::default();
        let mut player = pair(Face::Ten, Face::Nine);
        assert_eq!(player.split(0, &rules), Err(GameError::SplitNotAllowed));
        assert_eq!(player.hands.len(), 1);
        assert_eq!(player.splits_this_round, 0);
    }

    #[test]
    fn test_round_reset_keeps_the_score() {
        let rules = RuleSet::default();
        let mut player = pair(Face::Eight, Face::Eight);
        player.split(0, &rules).unwrap();
        player.score.record(HandOutcome::Win);

        player.reset_round();

        assert_eq!(player.hands.len(), 1);
        assert!(player.hands[0].cards.is_empty());
        assert_eq!(player.splits_this_round, 0);
        assert_eq!(player.score.hands_won, 1);
    }

    #[test]
    fn test_win_percentage() {
        let mut score = Score::default();
        assert_eq!(score.win_percentage(), 0.0);

        score.record(HandOutcome::Win);
        score.record(HandOutcome::Loss);
        score.record(HandOutcome::Push);
        score.record(HandOutcome::Win);
        assert_eq!(score.hands_played, 4);
        assert_eq!(score.hands_won, 2);
        assert!((score.win_percentage() - 50.0).abs() < f64::EPSILON);
    }
}
