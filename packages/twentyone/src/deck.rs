use crate::{Card, Face, Suit};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// The shoe: one or more standard 52-card decks, shuffled at construction
/// and dealt from the top. A fresh shoe replaces an exhausted one; this type
/// never reshuffles itself mid-round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn new(num_decks: u8) -> Self {
        Self::shuffled(num_decks, &mut StdRng::from_entropy())
    }

    /// Deterministic shoe for tests and replayable games.
    pub fn seeded(num_decks: u8, seed: u64) -> Self {
        Self::shuffled(num_decks, &mut StdRng::seed_from_u64(seed))
    }

    pub fn shuffled(num_decks: u8, rng: &mut impl Rng) -> Self {
        let mut cards = Vec::with_capacity(num_decks as usize * 52);
        for _ in 0..num_decks {
            for suit in Suit::ALL {
                for face in Face::ALL {
                    cards.push(Card::new(suit, face));
                }
            }
        }
        cards.shuffle(rng);
        Self { cards }
    }

    /// Removes and returns the top card. Dealing from an empty shoe is a
    /// caller bug; the caller is responsible for replacing the shoe first.
    pub fn deal(&mut self) -> Card {
        match self.cards.pop() {
            Some(card) => card,
            None => panic!("dealt from an empty shoe"),
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_deck_has_52_cards() {
        assert_eq!(Deck::seeded(1, 0).len(), 52);
    }

    #[test]
    fn test_multi_deck_multiplies_composition() {
        let mut deck = Deck::seeded(3, 0);
        assert_eq!(deck.len(), 156);

        let mut aces_of_spades = 0;
        while !deck.is_empty() {
            let card = deck.deal();
            if card.suit == Suit::Spades && card.face == Face::Ace {
                aces_of_spades += 1;
            }
        }
        assert_eq!(aces_of_spades, 3);
    }

    #[test]
    fn test_deal_removes_from_the_top() {
        let mut deck = Deck::seeded(1, 7);
        let before = deck.len();
        deck.deal();
        assert_eq!(deck.len(), before - 1);
    }

    #[test]
    fn test_seeded_shoes_reproduce() {
        let mut first = Deck::seeded(2, 42);
        let mut second = Deck::seeded(2, 42);
        for _ in 0..104 {
            assert_eq!(first.deal(), second.deal());
        }
    }

    #[test]
    #[should_panic(expected = "empty shoe")]
    fn test_dealing_from_an_empty_shoe_panics() {
        let mut deck = Deck::seeded(1, 0);
        for _ in 0..53 {
            deck.deal();
        }
    }
}
