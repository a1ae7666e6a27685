use crate::{Hand, RuleSet};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandOutcome {
    Win,
    Loss,
    Push,
}

/// Ranking surrogate for comparing hands: a true blackjack outranks any
/// other 21, which outranks every plain total, which outranks a bust.
pub fn rank(hand: &Hand, rules: &RuleSet) -> u8 {
    if hand.is_true_blackjack(rules) {
        22
    } else if hand.is_twenty_one() {
        21
    } else if hand.is_busted() {
        0
    } else {
        hand.value()
    }
}

/// A busted player hand loses outright, even against a dealer bust.
pub fn compare_hand(player: &Hand, dealer: &Hand, rules: &RuleSet) -> HandOutcome {
    if player.is_busted() {
        return HandOutcome::Loss;
    }
    match rank(player, rules).cmp(&rank(dealer, rules)) {
        Ordering::Greater => HandOutcome::Win,
        Ordering::Equal => HandOutcome::Push,
        Ordering::Less => HandOutcome::Loss,
    }
}

/// Final per-hand result, with pushes going to the house when the rules say so.
pub fn performance_vs_dealer(player: &Hand, dealer: &Hand, rules: &RuleSet) -> HandOutcome {
    match compare_hand(player, dealer, rules) {
        HandOutcome::Push if rules.dealer_wins_ties => HandOutcome::Loss,
        outcome => outcome,
    }
}

/// Dealer policy: hit below 17, and on soft 17 under the H17 rule.
pub fn dealer_should_hit(hand: &Hand, rules: &RuleSet) -> bool {
    let value = hand.value();
    value < 17 || (rules.dealer_hits_soft_17 && value == 17 && hand.is_soft())
}
