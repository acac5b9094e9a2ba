/// Number of cards in standard deck
pub const CARD_COUNT: u8 = 52;

/// Number of ranks in a sandard deck
/// (2 -> A)
pub const RANK_COUNT: u8 = 13;

/// Number of suits in a standard deck
pub const SUIT_COUNT: u8 = 4;

/// Cards in a complete board
pub const BOARD_CARDS: usize = 5;

/// Private cards dealt to each player
pub const HOLE_CARDS: usize = 2;

/// Games simulated when the caller does not say otherwise
pub const DEFAULT_SIM_COUNT: u64 = 10_000;

/// u8 rank to char table
pub const RANK_TO_CHAR: &[char; 13] = &[
    '2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K', 'A',
];

/// u8 suit to char table
pub static SUIT_TO_CHAR: &[char; 4] = &['h', 'd', 'c', 's'];
