//! Klondike solitaire as a compact, copyable state machine.
//!
//! A `GameState` is dealt from a seed (or an explicit card order), mutated
//! only through `GameState::apply`, and copied with `GameState::snapshot`
//! whenever a caller wants to look ahead. `GameState::legal_moves` lists
//! exactly the moves `apply` would accept.
//!
//! ```
//! use klondike_engine::{GameState, Move};
//!
//! let mut game = GameState::new(12);
//! let moves = game.legal_moves();
//! assert!(moves.contains(&Move::DRAW));
//!
//! let mut lookahead = game.snapshot();
//! let outcome = lookahead.apply_move(moves[moves.len() - 1]);
//! assert!(outcome.success);
//!
//! // The original is untouched.
//! assert_eq!(game.score(), 0);
//! let _ = game.apply(0, 0);
//! ```

pub mod card;
pub mod config;
pub mod deal;
pub mod game;
pub mod moves;
pub mod rules;
pub mod tableau;

pub use card::{Card, Color, Rank, Suit, fits_after};
pub use config::{ConfigError, GameConfig};
pub use deal::{
    DealError, DealScheme, Deck, deal_number, deck_from_deal_number, deck_from_indices,
    ks_shuffle, shuffled_deck,
};
pub use game::{GameState, InvariantViolation};
pub use moves::{Move, Outcome, Slot};
