use rand::seq::SliceRandom;
use rand::Rng;

use crate::card::{Card, Rank, Suit};
use crate::hand_evaluator::Hand;

lazy_static! {
    /// Every card of a standard deck, in index order
    pub static ref DECK: Vec<Card> = init_deck();
}

/// A standard 52 card deck, or what is left of one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Default for Deck {
    fn default() -> Self {
        Deck::new()
    }
}

impl Deck {
    /// Full deck, cloned from the static table
    pub fn new() -> Deck {
        Deck {
            cards: DECK.clone(),
        }
    }

    /// Deck without the cards of `hand`
    pub fn without(hand: &Hand) -> Deck {
        let mut deck = Deck::new();
        deck.remove(hand);
        deck
    }

    /// Remove every card of `hand` still in the deck
    pub fn remove(&mut self, hand: &Hand) {
        let mask = hand.mask();
        self.cards.retain(|c| (c.mask() & mask) == 0);
    }

    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Takes the first `n` cards from the top of the deck that are not in
    /// `used_cards_mask`
    ///
    /// Returns fewer than `n` cards when the deck runs out.
    pub fn deal(&self, n: usize, used_cards_mask: u64) -> Hand {
        self.cards
            .iter()
            .copied()
            .filter(|c| (c.mask() & used_cards_mask) == 0)
            .take(n)
            .collect()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

fn init_deck() -> Vec<Card> {
    let mut cards = Vec::with_capacity(Rank::ALL.len() * Suit::ALL.len());
    for &rank in Rank::ALL.iter() {
        for &suit in Suit::ALL.iter() {
            cards.push(Card::new(rank, suit));
        }
    }
    cards
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::CARD_COUNT;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_deck_constants() {
        assert_eq!(DECK.len(), usize::from(CARD_COUNT));
        // one card per (rank, suit), stored by index
        let mask = DECK.iter().fold(0u64, |m, c| m | c.mask());
        assert_eq!(mask.count_ones(), u32::from(CARD_COUNT));
        for (i, c) in DECK.iter().enumerate() {
            assert_eq!(usize::from(c.index()), i);
        }
    }

    #[test]
    fn test_remove() {
        let board: Hand = "AhKhQd".parse().unwrap();
        let deck = Deck::without(&board);
        assert_eq!(deck.len(), 49);
        assert!(deck.cards().iter().all(|c| !board.contains(*c)));
    }

    #[test]
    fn test_shuffle_keeps_cards() {
        let mut rng = SmallRng::seed_from_u64(42);
        let mut deck = Deck::new();
        deck.shuffle(&mut rng);
        assert_eq!(deck.len(), 52);
        assert_ne!(deck, Deck::new());
        let mut cards = deck.cards().to_vec();
        cards.sort();
        assert_eq!(cards, *DECK);
    }

    #[test]
    fn test_deal_skips_used_cards() {
        let deck = Deck::new();
        let hole: Hand = "2h2d".parse().unwrap();
        let dealt = deck.deal(3, hole.mask());
        assert_eq!(dealt.to_string(), "2c2s3h");
        // not enough cards left
        let dealt = deck.deal(60, 0);
        assert_eq!(dealt.len(), 52);
    }
}
