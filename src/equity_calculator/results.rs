use std::cmp::Ordering;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

/// Win, tie and discard counts of a batch of simulated games
///
/// Batches from different workers are summed with `+`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationResults {
    wins: [u64; 2],
    ties: u64,
    valid_trials: u64,
    discarded_trials: u64,
}

impl SimulationResults {
    /// Record a showdown, `Greater` when the first range won
    pub fn record(&mut self, showdown: Ordering) {
        match showdown {
            Ordering::Greater => self.wins[0] += 1,
            Ordering::Less => self.wins[1] += 1,
            Ordering::Equal => self.ties += 1,
        }
        self.valid_trials += 1;
    }

    /// Record a game thrown away because of a card collision
    /// or an empty range
    pub fn discard(&mut self) {
        self.discarded_trials += 1;
    }

    /// Games won outright by range 0 or 1
    pub fn wins(&self, player: usize) -> u64 {
        self.wins[player]
    }

    pub fn ties(&self) -> u64 {
        self.ties
    }

    pub fn valid_trials(&self) -> u64 {
        self.valid_trials
    }

    pub fn discarded_trials(&self) -> u64 {
        self.discarded_trials
    }

    pub fn total_trials(&self) -> u64 {
        self.valid_trials + self.discarded_trials
    }

    /// Percentages over the valid games, all zero when there are none
    pub fn equity_result(&self) -> EquityResult {
        if self.valid_trials == 0 {
            return EquityResult::default();
        }
        let valid = self.valid_trials as f64;
        EquityResult {
            range1: self.wins[0] as f64 / valid * 100.0,
            range2: self.wins[1] as f64 / valid * 100.0,
            ties: self.ties as f64 / valid * 100.0,
        }
    }
}

impl AddAssign for SimulationResults {
    fn add_assign(&mut self, rhs: SimulationResults) {
        for i in 0..self.wins.len() {
            self.wins[i] += rhs.wins[i];
        }
        self.ties += rhs.ties;
        self.valid_trials += rhs.valid_trials;
        self.discarded_trials += rhs.discarded_trials;
    }
}

impl Add for SimulationResults {
    type Output = Self;

    fn add(mut self, other: Self) -> Self::Output {
        self += other;
        self
    }
}

/// Result of a range vs. range calculation, in percent
///
/// `range1` and `range2` are the shares of games each range won outright and
/// `ties` the share of split pots; the three add up to 100. Serialized as
/// `{"range1": .., "range2": .., "ties": ..}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EquityResult {
    pub range1: f64,
    pub range2: f64,
    pub ties: f64,
}

impl EquityResult {
    /// Pot share of the first range, wins plus half of the ties
    pub fn range1_equity(&self) -> f64 {
        self.range1 + self.ties / 2.0
    }

    /// Pot share of the second range, wins plus half of the ties
    pub fn range2_equity(&self) -> f64 {
        self.range2 + self.ties / 2.0
    }

    /// true when no game was valid
    pub fn is_degenerate(&self) -> bool {
        self.range1 == 0.0 && self.range2 == 0.0 && self.ties == 0.0
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_record() {
        let mut results = SimulationResults::default();
        results.record(Ordering::Greater);
        results.record(Ordering::Greater);
        results.record(Ordering::Less);
        results.record(Ordering::Equal);
        results.discard();
        assert_eq!(results.wins(0), 2);
        assert_eq!(results.wins(1), 1);
        assert_eq!(results.ties(), 1);
        assert_eq!(results.valid_trials(), 4);
        assert_eq!(results.discarded_trials(), 1);
        assert_eq!(results.total_trials(), 5);
    }

    #[test]
    fn test_equity_result() {
        let mut results = SimulationResults::default();
        results.record(Ordering::Greater);
        results.record(Ordering::Greater);
        results.record(Ordering::Less);
        results.record(Ordering::Equal);
        results.discard();
        let equity = results.equity_result();
        assert!((equity.range1 - 50.0).abs() < EPSILON);
        assert!((equity.range2 - 25.0).abs() < EPSILON);
        assert!((equity.ties - 25.0).abs() < EPSILON);
        assert!((equity.range1_equity() - 62.5).abs() < EPSILON);
        assert!((equity.range2_equity() - 37.5).abs() < EPSILON);
        assert!((equity.range1 + equity.range2 + equity.ties - 100.0).abs() < EPSILON);
    }

    #[test]
    fn test_no_valid_trials() {
        let mut results = SimulationResults::default();
        results.discard();
        results.discard();
        let equity = results.equity_result();
        assert_eq!(equity, EquityResult::default());
        assert!(equity.is_degenerate());
    }

    #[test]
    fn test_merge() {
        let mut a = SimulationResults::default();
        a.record(Ordering::Greater);
        a.discard();
        let mut b = SimulationResults::default();
        b.record(Ordering::Less);
        b.record(Ordering::Equal);
        let sum = a + b;
        assert_eq!(sum.wins(0), 1);
        assert_eq!(sum.wins(1), 1);
        assert_eq!(sum.ties(), 1);
        assert_eq!(sum.valid_trials(), 3);
        assert_eq!(sum.discarded_trials(), 1);
        // order does not matter
        assert_eq!(b + a, sum);
    }

    #[test]
    fn test_to_json() {
        let equity = EquityResult {
            range1: 50.0,
            range2: 25.0,
            ties: 25.0,
        };
        let json = equity.to_json().unwrap();
        assert_eq!(json, r#"{"range1":50.0,"range2":25.0,"ties":25.0}"#);
        let back: EquityResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, equity);
    }
}
