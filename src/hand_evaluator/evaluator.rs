use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::hand::Hand;
use crate::card::{Card, Rank, Suit};
use crate::constants::{BOARD_CARDS, SUIT_COUNT};

const ACE: u8 = Rank::Ace.value();
const FIVE: u8 = Rank::Five.value();

// A-5 straight, ace plays low
const WHEEL: [u8; 5] = [ACE, 5, 4, 3, 2];

/// Hand categories, weakest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HandCategory {
    HighCard,
    OnePair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
    RoyalFlush,
}

impl HandCategory {
    /// Category rank, 0 for high card through 9 for a royal flush
    pub const fn rank(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            HandCategory::HighCard => "High Card",
            HandCategory::OnePair => "One Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full House",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::StraightFlush => "Straight Flush",
            HandCategory::RoyalFlush => "Royal Flush",
        }
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Strength of the best five card hand
///
/// Ordering compares the category first, then the tiebreak ranks
/// element by element. Two evaluations of the same category always
/// carry tiebreak lists of the same length.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Evaluation {
    category: HandCategory,
    tiebreaks: Vec<u8>,
}

impl Evaluation {
    pub fn new(category: HandCategory, tiebreaks: Vec<u8>) -> Self {
        Evaluation {
            category,
            tiebreaks,
        }
    }

    pub const fn category(&self) -> HandCategory {
        self.category
    }

    /// Rank values (2..=14) deciding between hands of the same category
    pub fn tiebreaks(&self) -> &[u8] {
        &self.tiebreaks
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.category, self.tiebreaks)
    }
}

/// Evaluates the best five card hand out of 5 to 7 cards
///
/// Cards must be distinct, the evaluator does not check.
///
/// # Example
///
/// ```
/// use range_equity::card::parse_cards;
/// use range_equity::hand_evaluator::{evaluate, HandCategory};
/// let cards = parse_cards("AhKhQhJhTh2c3d").unwrap();
/// assert_eq!(evaluate(&cards).category(), HandCategory::RoyalFlush);
/// ```
pub fn evaluate(cards: &[Card]) -> Evaluation {
    debug_assert!(cards.len() <= 7, "too many cards to evaluate");

    let mut ranks: Vec<u8> = cards.iter().map(|c| c.value()).collect();
    ranks.sort_unstable_by(|a, b| b.cmp(a));

    let mut rank_counts = [0u8; ACE as usize + 1];
    for &r in &ranks {
        rank_counts[usize::from(r)] += 1;
    }
    let mut suit_counts = [0u8; SUIT_COUNT as usize];
    for c in cards {
        suit_counts[usize::from(c.suit().index())] += 1;
    }

    let flush_ranks: Option<Vec<u8>> = Suit::ALL
        .iter()
        .copied()
        .find(|s| usize::from(suit_counts[usize::from(s.index())]) >= BOARD_CARDS)
        .map(|suit| {
            let mut flush: Vec<u8> = cards
                .iter()
                .filter(|c| c.suit() == suit)
                .map(|c| c.value())
                .collect();
            flush.sort_unstable_by(|a, b| b.cmp(a));
            flush
        });

    if let Some(flush) = &flush_ranks {
        match straight_high(flush) {
            Some(ACE) => return Evaluation::new(HandCategory::RoyalFlush, vec![ACE]),
            Some(high) => return Evaluation::new(HandCategory::StraightFlush, vec![high]),
            None => {}
        }
    }

    if let Some(quads) = highest_with_count(&rank_counts, 4) {
        let mut tiebreaks = vec![quads];
        tiebreaks.extend(kickers(&ranks, &[quads], 1));
        return Evaluation::new(HandCategory::FourOfAKind, tiebreaks);
    }

    let trips = highest_with_count(&rank_counts, 3);
    if let Some(trips) = trips {
        // a second set of trips plays as the pair
        let pair = (2..=ACE)
            .rev()
            .find(|&r| r != trips && rank_counts[usize::from(r)] >= 2);
        if let Some(pair) = pair {
            return Evaluation::new(HandCategory::FullHouse, vec![trips, pair]);
        }
    }

    if let Some(mut flush) = flush_ranks {
        flush.truncate(BOARD_CARDS);
        return Evaluation::new(HandCategory::Flush, flush);
    }

    if let Some(high) = straight_high(&ranks) {
        return Evaluation::new(HandCategory::Straight, vec![high]);
    }

    if let Some(trips) = trips {
        let mut tiebreaks = vec![trips];
        tiebreaks.extend(kickers(&ranks, &[trips], 2));
        return Evaluation::new(HandCategory::ThreeOfAKind, tiebreaks);
    }

    let pairs: Vec<u8> = (2..=ACE)
        .rev()
        .filter(|&r| rank_counts[usize::from(r)] == 2)
        .collect();
    match pairs.as_slice() {
        [] => {
            ranks.truncate(BOARD_CARDS);
            Evaluation::new(HandCategory::HighCard, ranks)
        }
        [pair] => {
            let mut tiebreaks = vec![*pair];
            tiebreaks.extend(kickers(&ranks, &[*pair], 3));
            Evaluation::new(HandCategory::OnePair, tiebreaks)
        }
        [high, low, ..] => {
            let mut tiebreaks = vec![*high, *low];
            tiebreaks.extend(kickers(&ranks, &[*high, *low], 1));
            Evaluation::new(HandCategory::TwoPair, tiebreaks)
        }
    }
}

/// Evaluates every card of a hand
pub fn evaluate_hand(hand: &Hand) -> Evaluation {
    evaluate(hand.cards())
}

/// Compares two evaluations, `Greater` when `a` wins
pub fn compare(a: &Evaluation, b: &Evaluation) -> Ordering {
    a.cmp(b)
}

/// Highest card of the best straight among `ranks`, sorted descending
fn straight_high(ranks: &[u8]) -> Option<u8> {
    let mut distinct = ranks.to_vec();
    distinct.dedup();
    distinct
        .windows(5)
        .find(|w| w[0] - w[4] == 4)
        .map(|w| w[0])
        .or_else(|| {
            if WHEEL.iter().all(|r| distinct.contains(r)) {
                Some(FIVE)
            } else {
                None
            }
        })
}

fn highest_with_count(rank_counts: &[u8], n: u8) -> Option<u8> {
    (2..=ACE).rev().find(|&r| rank_counts[usize::from(r)] == n)
}

fn kickers<'a>(ranks: &'a [u8], exclude: &'a [u8], n: usize) -> impl Iterator<Item = u8> + 'a {
    ranks
        .iter()
        .copied()
        .filter(move |r| !exclude.contains(r))
        .take(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::parse_cards;
    use rand::rngs::SmallRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    fn eval(text: &str) -> Evaluation {
        evaluate(&parse_cards(text).unwrap())
    }

    #[test]
    fn test_2222() {
        let e = eval("2h2d2c2sKh");
        assert_eq!(e.category(), HandCategory::FourOfAKind);
        assert_eq!(e.tiebreaks(), &[2, 13]);
    }

    #[test]
    fn test_categories() {
        let cases = [
            ("AhKhQhJhTh2c3d", HandCategory::RoyalFlush, vec![14]),
            ("9h8h7h6h5h2c3d", HandCategory::StraightFlush, vec![9]),
            ("AsAdAcAh9h2c3d", HandCategory::FourOfAKind, vec![14, 9]),
            ("KsKdKc9h9d2c3d", HandCategory::FullHouse, vec![13, 9]),
            ("Ah9h7h4h2hKcQd", HandCategory::Flush, vec![14, 9, 7, 4, 2]),
            ("Th9c8d7s6h2c2d", HandCategory::Straight, vec![10]),
            ("7h7d7cAsKh2c3d", HandCategory::ThreeOfAKind, vec![7, 14, 13]),
            ("JhJdThTcAs2c3d", HandCategory::TwoPair, vec![11, 10, 14]),
            ("QhQdAsTh8c3d2s", HandCategory::OnePair, vec![12, 14, 10, 8]),
            ("AhJd9c7s5h3d2c", HandCategory::HighCard, vec![14, 11, 9, 7, 5]),
        ];
        for (cards, category, tiebreaks) in cases.iter() {
            let e = eval(cards);
            assert_eq!(e.category(), *category, "{}", cards);
            assert_eq!(e.tiebreaks(), tiebreaks.as_slice(), "{}", cards);
        }
    }

    #[test]
    fn test_category_ranks() {
        assert_eq!(HandCategory::HighCard.rank(), 0);
        assert_eq!(HandCategory::FullHouse.rank(), 6);
        assert_eq!(HandCategory::RoyalFlush.rank(), 9);
        assert_eq!(HandCategory::TwoPair.to_string(), "Two Pair");
    }

    #[test]
    fn test_wheel() {
        let e = eval("Ah2d3c4s5hKdQc");
        assert_eq!(e.category(), HandCategory::Straight);
        assert_eq!(e.tiebreaks(), &[5]);
        // six high beats the wheel
        let six_high = eval("Ah2d3c4s5h6dQc");
        assert_eq!(six_high.tiebreaks(), &[6]);
        assert_eq!(compare(&six_high, &e), Ordering::Greater);
    }

    #[test]
    fn test_steel_wheel() {
        let e = eval("Ah2h3h4h5hKdQc");
        assert_eq!(e.category(), HandCategory::StraightFlush);
        assert_eq!(e.tiebreaks(), &[5]);
    }

    #[test]
    fn test_straight_and_flush_kept_apart() {
        // straight cards and flush cards differ, flush wins
        let e = eval("9h8h7h6c5h2h3d");
        assert_eq!(e.category(), HandCategory::Flush);
        assert_eq!(e.tiebreaks(), &[9, 8, 7, 5, 2]);
    }

    #[test]
    fn test_two_trips_make_full_house() {
        let e = eval("KsKdKc9h9d9c3d");
        assert_eq!(e.category(), HandCategory::FullHouse);
        assert_eq!(e.tiebreaks(), &[13, 9]);
    }

    #[test]
    fn test_three_pairs() {
        let e = eval("KsKd9c9h4d4c3d");
        assert_eq!(e.category(), HandCategory::TwoPair);
        // third pair plays as the kicker
        assert_eq!(e.tiebreaks(), &[13, 9, 4]);
    }

    #[test]
    fn test_quads_kicker_from_trips() {
        let e = eval("8s8d8c8hQdQcQs");
        assert_eq!(e.category(), HandCategory::FourOfAKind);
        assert_eq!(e.tiebreaks(), &[8, 12]);
    }

    #[test]
    fn test_six_card_flush() {
        let e = eval("Ah9h7h4h3h2hKc");
        assert_eq!(e.category(), HandCategory::Flush);
        assert_eq!(e.tiebreaks(), &[14, 9, 7, 4, 3]);
    }

    #[test]
    fn test_five_and_six_cards() {
        let e = eval("AhAd9c7s5h");
        assert_eq!(e.category(), HandCategory::OnePair);
        assert_eq!(e.tiebreaks(), &[14, 9, 7, 5]);
        let e = eval("AhAd9c9s5h5c");
        assert_eq!(e.category(), HandCategory::TwoPair);
        assert_eq!(e.tiebreaks(), &[14, 9, 5]);
    }

    #[test]
    fn test_order_invariance() {
        let hands = [
            "AhKhQhJhTh2c3d",
            "KsKdKc9h9d2c3d",
            "Ah2d3c4s5hKdQc",
            "JhJdThTcAs2c3d",
            "AhJd9c7s5h3d2c",
            "9h8h7h6c5h2h3d",
        ];
        let mut rng = SmallRng::seed_from_u64(7);
        for text in hands.iter() {
            let mut cards = parse_cards(text).unwrap();
            let expected = evaluate(&cards);
            for _ in 0..20 {
                cards.shuffle(&mut rng);
                assert_eq!(evaluate(&cards), expected, "{}", text);
            }
        }
    }

    #[test]
    fn test_category_ordering() {
        let royal = eval("AhKhQhJhTh2c3d");
        let quads = eval("AsAdAcAh9h2c3d");
        let full_house = eval("KsKdKc9h9d2c3d");
        assert_eq!(compare(&royal, &quads), Ordering::Greater);
        assert_eq!(compare(&quads, &full_house), Ordering::Greater);
        assert_eq!(compare(&full_house, &royal), Ordering::Less);
    }

    #[test]
    fn test_kicker_decides() {
        let a = eval("AhAd9c7s5hKd2c");
        let b = eval("AcAs9d7h5dQc2s");
        assert_eq!(compare(&a, &b), Ordering::Greater);
        assert_eq!(compare(&b, &a), Ordering::Less);
    }

    #[test]
    fn test_split_pot() {
        // board plays for both
        let a = eval("2h3dAsKsQsJsTd");
        let b = eval("4c5cAsKsQsJsTd");
        assert_eq!(a.category(), HandCategory::Straight);
        assert_eq!(compare(&a, &b), Ordering::Equal);
        // kickers past the fifth card do not count
        let a = eval("AhAd9c7s5h4c2d");
        let b = eval("AcAs9d7h5d3c2s");
        assert_eq!(compare(&a, &b), Ordering::Equal);
    }

    #[test]
    fn test_evaluate_hand() {
        let hand: Hand = "AhKhQhJhTh".parse().unwrap();
        assert_eq!(evaluate_hand(&hand).category(), HandCategory::RoyalFlush);
    }
}
