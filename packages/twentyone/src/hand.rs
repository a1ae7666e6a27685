use crate::{Card, Face, RuleSet};
use serde::{Deserialize, Serialize};

/// Total of a card sequence, counting aces as 11 and then re-counting them
/// as 1, one at a time, while the total is over 21. A hand can still bust
/// with every ace reduced.
pub fn hand_value(cards: &[Card]) -> u8 {
    let mut total = 0;
    let mut aces = 0;
    for card in cards {
        if card.face == Face::Ace {
            aces += 1;
        }
        total += card.value();
    }
    while total > 21 && aces > 0 {
        total -= 10;
        aces -= 1;
    }
    total
}

/// A hand is soft while an ace still counts as 11, i.e. no reduction was
/// needed to stay at or under 21.
pub fn is_soft_hand(cards: &[Card]) -> bool {
    let raw: u8 = cards.iter().map(|card| card.value()).sum();
    cards.iter().any(|card| card.face == Face::Ace) && hand_value(cards) == raw
}

pub fn is_busted(cards: &[Card]) -> bool {
    hand_value(cards) > 21
}

pub fn is_twenty_one(cards: &[Card]) -> bool {
    hand_value(cards) == 21
}

/// A blackjack is 21 on exactly two cards. Whether a split hand's blackjack
/// counts for ranking is a rule question, answered by `Hand::is_true_blackjack`.
pub fn is_blackjack(cards: &[Card]) -> bool {
    cards.len() == 2 && hand_value(cards) == 21
}

/// Whether two cards form a splittable pair. Values must match; under
/// `split_by_rank` the faces must match as well.
pub fn can_split_cards(first: &Card, second: &Card, rules: &RuleSet) -> bool {
    if first.value() != second.value() {
        return false;
    }
    !(rules.split_by_rank && first.face != second.face)
}

/// One hand in play: its cards plus the two flags that drive the turn loop.
/// `stayed` is terminal; `obtained_via_split` is set at creation and never
/// cleared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hand {
    pub cards: Vec<Card>,
    pub stayed: bool,
    pub obtained_via_split: bool,
}

impl Hand {
    pub fn new() -> Self {
        Self {
            cards: Vec::new(),
            stayed: false,
            obtained_via_split: false,
        }
    }

    /// One half of a split pair, carrying the lineage marker.
    pub fn split_child(card: Card) -> Self {
        Self {
            cards: vec![card],
            stayed: false,
            obtained_via_split: true,
        }
    }

    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn stay(&mut self) {
        self.stayed = true;
    }

    pub fn value(&self) -> u8 {
        hand_value(&self.cards)
    }

    pub fn is_soft(&self) -> bool {
        is_soft_hand(&self.cards)
    }

    pub fn is_busted(&self) -> bool {
        is_busted(&self.cards)
    }

    pub fn is_twenty_one(&self) -> bool {
        is_twenty_one(&self.cards)
    }

    pub fn is_blackjack(&self) -> bool {
        is_blackjack(&self.cards)
    }

    /// Blackjack for ranking purposes: a split hand's two-card 21 only
    /// qualifies when the rules say so.
    pub fn is_true_blackjack(&self, rules: &RuleSet) -> bool {
        self.is_blackjack() && (rules.post_split_blackjack || !self.obtained_via_split)
    }

    /// A hand keeps requiring action until it stays, busts, or reaches 21.
    pub fn is_live(&self) -> bool {
        !self.stayed && !self.is_busted() && !self.is_twenty_one()
    }

    /// Split aces may not be hit unless the rules allow it.
    pub fn can_hit(&self, rules: &RuleSet) -> bool {
        let split_ace = self.obtained_via_split
            && self.cards.first().map(|card| card.face) == Some(Face::Ace);
        !split_ace || rules.can_hit_split_aces
    }
}

impl Default for Hand {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Suit;

    fn cards(faces: &[Face]) -> Vec<Card> {
        faces.iter().map(|&face| Card::new(Suit::Hearts, face)).collect()
    }

    fn hand(faces: &[Face]) -> Hand {
        let mut hand = Hand::new();
        for card in cards(faces) {
            hand.add_card(card);
        }
        hand
    }

    #[test]
    fn test_value_simple() {
        assert_eq!(hand_value(&cards(&[Face::Two, Face::Three])), 5);
    }

    #[test]
    fn test_value_court_cards() {
        assert_eq!(hand_value(&cards(&[Face::King, Face::Queen])), 20);
    }

    #[test]
    fn test_value_soft_ace() {
        assert_eq!(hand_value(&cards(&[Face::Ace, Face::Nine])), 20);
        assert!(is_soft_hand(&cards(&[Face::Ace, Face::Nine])));
    }

    #[test]
    fn test_value_hard_ace() {
        assert_eq!(hand_value(&cards(&[Face::Ace, Face::Six, Face::Nine])), 16);
        assert!(!is_soft_hand(&cards(&[Face::Ace, Face::Six, Face::Nine])));
    }

    #[test]
    fn test_two_aces_and_a_nine_is_a_hard_21() {
        let cards = cards(&[Face::Ace, Face::Ace, Face::Nine]);
        assert_eq!(hand_value(&cards), 21);
        assert!(!is_soft_hand(&cards));
    }

    #[test]
    fn test_reduction_stops_once_under_21() {
        // 11 + 11 + 5 reduces one ace only
        assert_eq!(hand_value(&cards(&[Face::Ace, Face::Ace, Face::Five])), 17);
    }

    #[test]
    fn test_all_aces_reduced_can_still_bust() {
        let cards = cards(&[Face::Ace, Face::Ace, Face::King, Face::King]);
        assert_eq!(hand_value(&cards), 22);
        assert!(is_busted(&cards));
    }

    #[test]
    fn test_reduction_never_increases_the_total() {
        let cards = cards(&[Face::Ace, Face::Ace, Face::Ace, Face::Seven]);
        let raw: u8 = cards.iter().map(|card| card.value()).sum();
        assert!(hand_value(&cards) <= raw);
    }

    #[test]
    fn test_ace_king_is_blackjack() {
        let cards = cards(&[Face::Ace, Face::King]);
        assert_eq!(hand_value(&cards), 21);
        assert!(is_blackjack(&cards));
    }

    #[test]
    fn test_ace_nine_is_not_blackjack() {
        assert!(!is_blackjack(&cards(&[Face::Ace, Face::Nine])));
    }

    #[test]
    fn test_three_card_21_is_not_blackjack() {
        assert!(!is_blackjack(&cards(&[Face::Seven, Face::Seven, Face::Seven])));
        assert!(is_twenty_one(&cards(&[Face::Seven, Face::Seven, Face::Seven])));
    }

    #[test]
    fn test_true_blackjack_follows_split_lineage() {
        let rules = RuleSet::default();
        let mut split_hand = Hand::split_child(Card::new(Suit::Hearts, Face::Ace));
        split_hand.add_card(Card::new(Suit::Spades, Face::King));

        assert!(split_hand.is_blackjack());
        assert!(!split_hand.is_true_blackjack(&rules));

        let generous = RuleSet {
            post_split_blackjack: true,
            ..rules
        };
        assert!(split_hand.is_true_blackjack(&generous));
    }

    #[test]
    fn test_liveness_ends_on_stay_bust_or_21() {
        let mut staying = hand(&[Face::Five, Face::Five]);
        assert!(staying.is_live());
        staying.stay();
        assert!(!staying.is_live());

        assert!(!hand(&[Face::King, Face::Queen, Face::Five]).is_live());
        assert!(!hand(&[Face::Ace, Face::King]).is_live());
    }

    #[test]
    fn test_can_split_cards_matching_faces() {
        let rules = RuleSet::default();
        let eight_h = Card::new(Suit::Hearts, Face::Eight);
        let eight_s = Card::new(Suit::Spades, Face::Eight);
        assert!(can_split_cards(&eight_h, &eight_s, &rules));
    }

    #[test]
    fn test_can_split_cards_matching_values_only() {
        let ten = Card::new(Suit::Hearts, Face::Ten);
        let king = Card::new(Suit::Spades, Face::King);

        let by_value = RuleSet::default();
        assert!(can_split_cards(&ten, &king, &by_value));

        let by_rank = RuleSet {
            split_by_rank: true,
            ..by_value
        };
        assert!(!can_split_cards(&ten, &king, &by_rank));
    }

    #[test]
    fn test_cannot_split_mismatched_values() {
        let rules = RuleSet::default();
        let nine = Card::new(Suit::Hearts, Face::Nine);
        let eight = Card::new(Suit::Spades, Face::Eight);
        assert!(!can_split_cards(&nine, &eight, &rules));
    }

    #[test]
    fn test_split_aces_may_not_hit_by_default() {
        let rules = RuleSet::default();
        let mut hand = Hand::split_child(Card::new(Suit::Hearts, Face::Ace));
        hand.add_card(Card::new(Suit::Clubs, Face::Four));
        assert!(!hand.can_hit(&rules));

        let lenient = RuleSet {
            can_hit_split_aces: true,
            ..rules
        };
        assert!(hand.can_hit(&lenient));
    }

    #[test]
    fn test_split_non_aces_may_hit() {
        let rules = RuleSet::default();
        let mut hand = Hand::split_child(Card::new(Suit::Hearts, Face::Eight));
        hand.add_card(Card::new(Suit::Clubs, Face::Four));
        assert!(hand.can_hit(&rules));
    }

    #[test]
    fn test_unsplit_ace_hands_may_hit() {
        let rules = RuleSet::default();
        assert!(hand(&[Face::Ace, Face::Four]).can_hit(&rules));
    }
}
