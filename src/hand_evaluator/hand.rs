use std::fmt;
use std::iter::FromIterator;
use std::ops::Add;
use std::ops::AddAssign;
use std::str::FromStr;

use crate::card::{parse_cards, Card, CardError, Suit};

/// An ordered collection of cards
///
/// Holds hole cards, a partial or complete board, or both combined for
/// evaluation. The type does not enforce that its cards are distinct;
/// use `is_disjoint` before combining hands that must not share cards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    /// contruct the empty hand
    pub fn empty() -> Hand {
        Hand { cards: Vec::new() }
    }

    pub fn new(cards: Vec<Card>) -> Hand {
        Hand { cards }
    }

    /// Create hand from hole cards
    pub fn from_hole_cards(c1: Card, c2: Card) -> Hand {
        Hand::new(vec![c1, c2])
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Remove a card if it is in the hand
    ///
    /// Returns whether anything was removed
    pub fn remove(&mut self, card: Card) -> bool {
        match self.cards.iter().position(|&c| c == card) {
            Some(i) => {
                self.cards.remove(i);
                true
            }
            None => false,
        }
    }

    // Return number of cards in hand
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    /// Numeric rank values in hand order
    pub fn ranks(&self) -> Vec<u8> {
        self.cards.iter().map(|c| c.value()).collect()
    }

    pub fn suits(&self) -> Vec<Suit> {
        self.cards.iter().map(|c| c.suit()).collect()
    }

    /// Sort cards by ascending rank value
    pub fn sort(&mut self) {
        self.cards.sort();
    }

    /// 64 bit mask of every card in the hand
    pub fn mask(&self) -> u64 {
        self.cards.iter().fold(0u64, |mask, c| mask | c.mask())
    }

    /// true when the two hands share no card
    pub fn is_disjoint(&self, other: &Hand) -> bool {
        (self.mask() & other.mask()) == 0
    }
}

impl Add for Hand {
    type Output = Self;

    fn add(mut self, other: Self) -> Self::Output {
        self.cards.extend(other.cards);
        self
    }
}

impl Add<&Hand> for &Hand {
    type Output = Hand;

    fn add(self, other: &Hand) -> Self::Output {
        let mut cards = Vec::with_capacity(self.len() + other.len());
        cards.extend_from_slice(&self.cards);
        cards.extend_from_slice(&other.cards);
        Hand { cards }
    }
}

impl AddAssign<Card> for Hand {
    fn add_assign(&mut self, rhs: Card) {
        self.cards.push(rhs);
    }
}

impl FromIterator<Card> for Hand {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Hand {
            cards: iter.into_iter().collect(),
        }
    }
}

impl FromStr for Hand {
    type Err = CardError;

    /// Parse a hand from concatenated card tokens, e.g. "AhKhQd"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_cards(s).map(Hand::new)
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for card in &self.cards {
            write!(f, "{}", card)?;
        }
        Ok(())
    }
}
