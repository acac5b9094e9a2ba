mod evaluator;
mod hand;

pub use evaluator::{compare, evaluate, evaluate_hand, Evaluation, HandCategory};
pub use hand::Hand;
