//! # Range Equity
//! Range vs. range equity for texas holdem
//!
//! Currently supports
//!  - range strings like "JJ+, AKs, A2s-A5s, KQo"
//!  - seven card hand evaluation with full tiebreaks
//!  - monte carlo equity preflop, on the flop and on the turn
//!
//! ## Equity Calculator
//!
//! ```
//! use range_equity::config::SimulatorConfig;
//! use range_equity::equity_calculator::{flop_equity, preflop_equity};
//! let config = SimulatorConfig::default().with_sim_count(2000).with_threads(2);
//! let equity = preflop_equity("AA", "KK", &config).unwrap();
//! assert!(equity.range1_equity() > 70.0);
//! let equity = flop_equity("AKs, AQs", "JTs, T9s", "AhKhQd", &config).unwrap();
//! println!("{}", equity.to_json().unwrap());
//! ```
//!
//! ## Hand Evaluator
//!
//! ```
//! use range_equity::card::parse_cards;
//! use range_equity::hand_evaluator::{evaluate, HandCategory};
//! let cards = parse_cards("AsAdKcKh7s2d3c").unwrap();
//! let score = evaluate(&cards);
//! assert_eq!(score.category(), HandCategory::TwoPair);
//! ```

#[macro_use]
extern crate lazy_static;
extern crate crossbeam;
extern crate rand;
extern crate serde;
extern crate serde_json;

pub mod card;
pub mod config;
pub mod constants;
pub mod deck;
pub mod hand_evaluator;
pub mod hand_range;

pub mod equity_calculator;
