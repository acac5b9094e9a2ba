/*
 * Card value types
 *
 * A card is indexed 0..52 as 4 * rank + suit,
 * the same index picks its bit in a 64 bit card mask
 */

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardError {
    #[error("invalid card token '{0}'")]
    InvalidCardToken(String),
    #[error("card {0} appears more than once")]
    DuplicateCard(Card),
}

/// Card rank, ordered from deuce to ace
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    /// Every rank in canonical order (2, 3, ..., K, A)
    pub const ALL: [Rank; RANK_COUNT as usize] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Position in canonical order, 0 for a deuce
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Numeric value used for comparisons, 2 for a deuce and 14 for an ace
    pub const fn value(self) -> u8 {
        self as u8 + 2
    }

    pub fn from_index(index: u8) -> Option<Rank> {
        Rank::ALL.get(usize::from(index)).copied()
    }

    /// Convert a rank char to a rank, case insensitive
    ///
    /// # Example
    ///
    /// ```
    /// use range_equity::card::Rank;
    /// assert_eq!(Rank::from_char('a'), Some(Rank::Ace));
    /// assert_eq!(Rank::from_char('x'), None);
    /// ```
    pub fn from_char(c: char) -> Option<Rank> {
        let upper = c.to_ascii_uppercase();
        RANK_TO_CHAR
            .iter()
            .position(|&r| r == upper)
            .and_then(|i| Rank::from_index(i as u8))
    }

    pub fn to_char(self) -> char {
        RANK_TO_CHAR[usize::from(self.index())]
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Card suit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; SUIT_COUNT as usize] =
        [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    pub const fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Option<Suit> {
        Suit::ALL.get(usize::from(index)).copied()
    }

    /// Convert a suit char (h, d, c, s) to a suit
    pub fn from_char(c: char) -> Option<Suit> {
        SUIT_TO_CHAR
            .iter()
            .position(|&s| s == c)
            .and_then(|i| Suit::from_index(i as u8))
    }

    pub fn to_char(self) -> char {
        SUIT_TO_CHAR[usize::from(self.index())]
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A single playing card
///
/// Two cards are equal when both rank and suit match.
/// Ordering is by rank first, then suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Card {
        Card { rank, suit }
    }

    /// Build a card from a rank char and a suit char
    pub fn from_chars(rank: char, suit: char) -> Result<Card, CardError> {
        match (Rank::from_char(rank), Suit::from_char(suit)) {
            (Some(r), Some(s)) => Ok(Card::new(r, s)),
            _ => Err(CardError::InvalidCardToken(format!("{}{}", rank, suit))),
        }
    }

    /// Build a card from its 0..52 index
    pub fn from_index(index: u8) -> Option<Card> {
        if index >= CARD_COUNT {
            return None;
        }
        let rank = Rank::from_index(index >> 2)?;
        let suit = Suit::from_index(index & 3)?;
        Some(Card::new(rank, suit))
    }

    pub const fn rank(self) -> Rank {
        self.rank
    }

    pub const fn suit(self) -> Suit {
        self.suit
    }

    /// Numeric rank value, 2..=14
    pub const fn value(self) -> u8 {
        self.rank.value()
    }

    /// 4 * rank + suit
    pub const fn index(self) -> u8 {
        4 * self.rank.index() + self.suit.index()
    }

    /// Single bit card mask
    pub const fn mask(self) -> u64 {
        1u64 << self.index()
    }
}

impl fmt::Display for Card {
    /// Writes card as a two char token
    ///
    /// # Example
    /// ```
    /// // prints 'Kh'
    /// use range_equity::card::{Card, Rank, Suit};
    /// let card = Card::new(Rank::King, Suit::Hearts);
    /// println!("{}", card);
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

impl FromStr for Card {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 2 {
            return Err(CardError::InvalidCardToken(s.to_string()));
        }
        Card::from_chars(chars[0], chars[1])
    }
}

/// Parses a string of concatenated two char card tokens
///
/// Whitespace between tokens is ignored. An empty string is an empty list.
///
/// # Example
///
/// ```
/// use range_equity::card::parse_cards;
/// let flop = parse_cards("AhKhQd").unwrap();
/// assert_eq!(flop.len(), 3);
/// ```
pub fn parse_cards(text: &str) -> Result<Vec<Card>, CardError> {
    let chars: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();
    let mut cards = Vec::with_capacity(chars.len() / 2);
    let mut used_mask = 0u64;
    for chunk in chars.chunks(2) {
        if chunk.len() != 2 {
            // odd length, dangling char
            return Err(CardError::InvalidCardToken(chunk.iter().collect()));
        }
        let card = Card::from_chars(chunk[0], chunk[1])?;
        if used_mask & card.mask() != 0 {
            return Err(CardError::DuplicateCard(card));
        }
        used_mask |= card.mask();
        cards.push(card);
    }
    Ok(cards)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_from_char() {
        // valid input
        assert_eq!(Rank::from_char('A'), Some(Rank::Ace));
        assert_eq!(Rank::from_char('t'), Some(Rank::Ten));
        assert_eq!(Rank::from_char('2'), Some(Rank::Two));
        // invalid input
        assert_eq!(Rank::from_char('1'), None);
        assert_eq!(Rank::from_char('Z'), None);
        assert_eq!(Rank::from_char(' '), None);
    }

    #[test]
    fn test_suit_from_char() {
        assert_eq!(Suit::from_char('h'), Some(Suit::Hearts));
        assert_eq!(Suit::from_char('s'), Some(Suit::Spades));
        assert_eq!(Suit::from_char('x'), None);
        assert_eq!(Suit::from_char('z'), None);
    }

    #[test]
    fn test_rank_values() {
        assert_eq!(Rank::Two.value(), 2);
        assert_eq!(Rank::Ten.value(), 10);
        assert_eq!(Rank::Ace.value(), 14);
        assert!(Rank::King < Rank::Ace);
    }

    #[test]
    fn test_card_index_and_mask() {
        let c = Card::new(Rank::Two, Suit::Hearts);
        assert_eq!(c.index(), 0);
        assert_eq!(c.mask(), 1);
        let c = Card::new(Rank::Ace, Suit::Spades);
        assert_eq!(c.index(), 51);
        assert_eq!(Card::from_index(51), Some(c));
        assert_eq!(Card::from_index(52), None);
    }

    #[test]
    fn test_card_from_str() {
        let c: Card = "Kh".parse().unwrap();
        assert_eq!(c, Card::new(Rank::King, Suit::Hearts));
        assert_eq!(c.to_string(), "Kh");
        assert!("Zz".parse::<Card>().is_err());
        assert!("Kx".parse::<Card>().is_err());
        assert!("K".parse::<Card>().is_err());
        assert!("Khh".parse::<Card>().is_err());
    }

    #[test]
    fn test_parse_cards() {
        let cards = parse_cards("AsKd7c5h").unwrap();
        assert_eq!(cards.len(), 4);
        assert_eq!(cards[0], Card::new(Rank::Ace, Suit::Spades));
        assert_eq!(cards[3], Card::new(Rank::Five, Suit::Hearts));

        let cards = parse_cards("Ah Kh Qd").unwrap();
        assert_eq!(cards.len(), 3);

        assert!(parse_cards("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_cards_invalid() {
        assert_eq!(
            parse_cards("Zz"),
            Err(CardError::InvalidCardToken("Zz".to_string()))
        );
        assert_eq!(
            parse_cards("AhK"),
            Err(CardError::InvalidCardToken("K".to_string()))
        );
        assert_eq!(
            parse_cards("AhAh"),
            Err(CardError::DuplicateCard(Card::new(Rank::Ace, Suit::Hearts)))
        );
    }
}
