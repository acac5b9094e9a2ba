/*
 * Creates hand ranges from string
 *
 * A range string is a comma separated list of segments:
 *   "AA", "AKs", "AKo"   single notation tokens
 *   "JJ+"                a pocket pair and every pair above it
 *   "A2s-A5s", "22-55"   a run between two tokens of the same shape
 */

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::card::{Card, Rank, Suit};
use crate::hand_evaluator::Hand;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("invalid range notation '{0}'")]
    InvalidNotation(String),
}

fn invalid(segment: &str) -> RangeError {
    RangeError::InvalidNotation(segment.to_string())
}

/// A single player hand
///
/// Cards are stored highest first, so the same two cards
/// always make the same combo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Combo(Card, Card);

impl Combo {
    pub fn new(c1: Card, c2: Card) -> Combo {
        if c1 < c2 {
            Combo(c2, c1)
        } else {
            Combo(c1, c2)
        }
    }

    pub const fn high(self) -> Card {
        self.0
    }

    pub const fn low(self) -> Card {
        self.1
    }

    /// Mask of both cards used for collision checks
    pub const fn mask(self) -> u64 {
        self.0.mask() | self.1.mask()
    }

    pub fn to_hand(self) -> Hand {
        Hand::from_hole_cards(self.0, self.1)
    }
}

impl fmt::Display for Combo {
    /// Writes hole cards to string
    ///
    /// # Example
    /// ```
    /// // prints 'AsKs'
    /// use range_equity::card::{Card, Rank, Suit};
    /// use range_equity::hand_range::Combo;
    /// let combo = Combo::new(
    ///     Card::new(Rank::King, Suit::Spades),
    ///     Card::new(Rank::Ace, Suit::Spades),
    /// );
    /// println!("{}", combo);
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.0, self.1)
    }
}

/// One grammar unit of a range string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notation {
    /// Pocket pair, "QQ"
    Pair(Rank),
    /// Two ranks of the same suit, "AKs"
    Suited(Rank, Rank),
    /// Two ranks of different suits, "AKo"
    Offsuit(Rank, Rank),
}

impl Notation {
    /// Every concrete combo the token denotes
    ///
    /// 6 for a pair, 4 for a suited hand, 12 for an offsuit hand
    pub fn combos(&self) -> Vec<Combo> {
        let mut combos = Vec::with_capacity(12);
        match *self {
            Notation::Pair(rank) => {
                for (i, &suit1) in Suit::ALL.iter().enumerate() {
                    for &suit2 in &Suit::ALL[i + 1..] {
                        combos.push(Combo::new(
                            Card::new(rank, suit1),
                            Card::new(rank, suit2),
                        ));
                    }
                }
            }
            Notation::Suited(rank1, rank2) => {
                for &suit in Suit::ALL.iter() {
                    combos.push(Combo::new(Card::new(rank1, suit), Card::new(rank2, suit)));
                }
            }
            Notation::Offsuit(rank1, rank2) => {
                for &suit1 in Suit::ALL.iter() {
                    for &suit2 in Suit::ALL.iter() {
                        if suit1 != suit2 {
                            combos.push(Combo::new(
                                Card::new(rank1, suit1),
                                Card::new(rank2, suit2),
                            ));
                        }
                    }
                }
            }
        }
        combos
    }

    fn first_rank(&self) -> Rank {
        match *self {
            Notation::Pair(r) | Notation::Suited(r, _) | Notation::Offsuit(r, _) => r,
        }
    }
}

impl FromStr for Notation {
    type Err = RangeError;

    /// Parses "AA", "AKs" or "AKo", ranks are case insensitive
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        let rank = |i: usize| Rank::from_char(chars[i]).ok_or_else(|| invalid(s));
        match chars.len() {
            2 => {
                let (r1, r2) = (rank(0)?, rank(1)?);
                if r1 != r2 {
                    return Err(invalid(s));
                }
                Ok(Notation::Pair(r1))
            }
            3 => {
                let (r1, r2) = (rank(0)?, rank(1)?);
                if r1 == r2 {
                    return Err(invalid(s));
                }
                match chars[2].to_ascii_lowercase() {
                    's' => Ok(Notation::Suited(r1, r2)),
                    'o' => Ok(Notation::Offsuit(r1, r2)),
                    _ => Err(invalid(s)),
                }
            }
            _ => Err(invalid(s)),
        }
    }
}

impl fmt::Display for Notation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Notation::Pair(r) => write!(f, "{}{}", r, r),
            Notation::Suited(r1, r2) => write!(f, "{}{}s", r1, r2),
            Notation::Offsuit(r1, r2) => write!(f, "{}{}o", r1, r2),
        }
    }
}

/// Splits a range string into notation tokens
///
/// Runs and plus segments are expanded in place, so "22+, AKs" gives
/// every pair followed by AKs. The first malformed segment fails the
/// whole string.
///
/// # Example
///
/// ```
/// use range_equity::hand_range::{parse_range_notation, Notation};
/// use range_equity::card::Rank;
/// let hands = parse_range_notation("A2s-A4s").unwrap();
/// assert_eq!(hands[0], Notation::Suited(Rank::Ace, Rank::Two));
/// assert_eq!(hands.len(), 3);
/// ```
pub fn parse_range_notation(text: &str) -> Result<Vec<Notation>, RangeError> {
    let mut hands = Vec::new();
    for segment in text.split(',') {
        let segment = segment.trim();
        if segment.contains('-') {
            hands.extend(expand_run(segment)?);
        } else if segment.contains('+') {
            hands.extend(expand_plus(segment)?);
        } else {
            hands.push(segment.parse::<Notation>().map_err(|_| invalid(segment))?);
        }
    }
    Ok(hands)
}

/// Expands a single notation token into its combos
pub fn expand_token(token: &str) -> Result<Vec<Combo>, RangeError> {
    token.trim().parse::<Notation>().map(|n| n.combos())
}

/**
 * "88+" -> 88, 99, TT, JJ, QQ, KK, AA
 *
 * only pocket pairs take a plus
 */
fn expand_plus(segment: &str) -> Result<Vec<Notation>, RangeError> {
    let base = segment
        .strip_suffix('+')
        .ok_or_else(|| invalid(segment))?;
    match base.trim().parse::<Notation>() {
        Ok(Notation::Pair(rank)) => Ok(Rank::ALL[usize::from(rank.index())..]
            .iter()
            .map(|&r| Notation::Pair(r))
            .collect()),
        _ => Err(invalid(segment)),
    }
}

/**
 * "A2s-A5s" -> A2s, A3s, A4s, A5s
 * "22-44"   -> 22, 33, 44
 *
 * endpoints may come in either order
 */
fn expand_run(segment: &str) -> Result<Vec<Notation>, RangeError> {
    let parts: Vec<&str> = segment.split('-').collect();
    if parts.len() != 2 {
        return Err(invalid(segment));
    }
    let start: Notation = parts[0].trim().parse().map_err(|_| invalid(segment))?;
    let end: Notation = parts[1].trim().parse().map_err(|_| invalid(segment))?;

    let span = |a: Rank, b: Rank| -> Vec<Rank> {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        Rank::ALL
            .iter()
            .copied()
            .filter(|&r| lo <= r && r <= hi)
            .collect()
    };

    match (start, end) {
        (Notation::Pair(a), Notation::Pair(b)) => {
            Ok(span(a, b).into_iter().map(Notation::Pair).collect())
        }
        (Notation::Suited(_, a), Notation::Suited(_, b))
        | (Notation::Offsuit(_, a), Notation::Offsuit(_, b)) => {
            let first = start.first_rank();
            if end.first_rank() != first {
                return Err(invalid(segment));
            }
            let ranks = span(a, b);
            // would produce a pair with a suitedness suffix
            if ranks.contains(&first) {
                return Err(invalid(segment));
            }
            let suited = matches!(start, Notation::Suited(..));
            Ok(ranks
                .into_iter()
                .map(|r| {
                    if suited {
                        Notation::Suited(first, r)
                    } else {
                        Notation::Offsuit(first, r)
                    }
                })
                .collect())
        }
        _ => Err(invalid(segment)),
    }
}

/// A range of private player hands for texas holdem
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HandRange {
    /// Distinct hole card combos, sorted
    hands: Vec<Combo>,
}

impl HandRange {
    /// Create a Handrange from a string
    ///
    /// # Arguments
    ///
    /// * `text` - A range string, e.g. "JJ+, AKs, A2s-A5s"
    ///
    /// # Example
    ///
    /// ```
    /// use range_equity::hand_range::HandRange;
    /// let range = HandRange::from_string("JJ+").unwrap();
    /// assert_eq!(range.len(), 24);
    /// ```
    pub fn from_string(text: &str) -> Result<Self, RangeError> {
        let notations = parse_range_notation(text)?;
        let range = HandRange::from_combos(notations.iter().flat_map(|n| n.combos()).collect());
        log::debug!(
            "{:<32}{:<8}{}",
            "parsed range",
            range.len(),
            text.trim()
        );
        Ok(range)
    }

    /// Create a range from explicit combos, duplicates are dropped
    pub fn from_combos(hands: Vec<Combo>) -> Self {
        let mut range = HandRange { hands };
        range.remove_duplicates();
        range
    }

    pub fn combos(&self) -> &[Combo] {
        &self.hands
    }

    pub fn len(&self) -> usize {
        self.hands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hands.is_empty()
    }

    /**
     * remove duplicate combos
     */
    fn remove_duplicates(&mut self) {
        // first sort hands
        self.hands.sort();
        // remove duplicates
        self.hands.dedup();
    }
}

impl FromStr for HandRange {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HandRange::from_string(s)
    }
}
