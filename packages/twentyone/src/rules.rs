use serde::{Deserialize, Serialize};

/// Configurable house rules, fixed for the lifetime of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    /// Number of seats at the table
    pub num_players: u8,

    /// Number of 52-card decks in the shoe
    pub num_decks: u8,

    /// Maximum splits per player per round
    pub split_limit: u8,

    /// Dealer hits on soft 17
    pub dealer_hits_soft_17: bool,

    /// Ties go to the house instead of pushing
    pub dealer_wins_ties: bool,

    /// Hands made by splitting aces may take further cards
    pub can_hit_split_aces: bool,

    /// A two-card 21 on a split hand still counts as blackjack
    pub post_split_blackjack: bool,

    /// Dealer takes no hole card; the second dealer card arrives only after
    /// every player has finished acting
    pub no_hole_card: bool,

    /// Splitting requires matching faces, not merely matching values
    /// (a ten and a king stop being a splittable pair)
    pub split_by_rank: bool,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            num_players: 3,
            num_decks: 3,
            split_limit: 4,
            dealer_hits_soft_17: true,
            dealer_wins_ties: true,
            can_hit_split_aces: false,
            post_split_blackjack: false,
            no_hole_card: false,
            split_by_rank: false,
        }
    }
}

impl RuleSet {
    /// Vegas Strip style: dealer stands on soft 17 and ties push.
    pub fn vegas_strip() -> Self {
        Self {
            num_decks: 4,
            dealer_hits_soft_17: false,
            dealer_wins_ties: false,
            ..Self::default()
        }
    }

    /// European style: no hole card, and a split pair must match by face.
    pub fn european() -> Self {
        Self {
            num_decks: 6,
            dealer_wins_ties: false,
            no_hole_card: true,
            split_by_rank: true,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_the_house_configuration() {
        let rules = RuleSet::default();
        assert_eq!(rules.num_players, 3);
        assert_eq!(rules.num_decks, 3);
        assert_eq!(rules.split_limit, 4);
        assert!(rules.dealer_hits_soft_17);
        assert!(rules.dealer_wins_ties);
        assert!(!rules.can_hit_split_aces);
        assert!(!rules.post_split_blackjack);
        assert!(!rules.no_hole_card);
        assert!(!rules.split_by_rank);
    }

    #[test]
    fn test_vegas_strip_softens_the_house_edge() {
        let rules = RuleSet::vegas_strip();
        assert!(!rules.dealer_hits_soft_17);
        assert!(!rules.dealer_wins_ties);
        assert!(!rules.no_hole_card);
    }

    #[test]
    fn test_european_defers_the_hole_card() {
        let rules = RuleSet::european();
        assert!(rules.no_hole_card);
        assert!(rules.split_by_rank);
    }

    #[test]
    fn test_partial_rules_file_falls_back_to_defaults() {
        let rules: RuleSet = serde_json::from_str(r#"{"num_decks": 8, "dealer_wins_ties": false}"#).unwrap();
        assert_eq!(rules.num_decks, 8);
        assert!(!rules.dealer_wins_ties);
        assert_eq!(rules.num_players, 3);
        assert!(rules.dealer_hits_soft_17);
    }
}
