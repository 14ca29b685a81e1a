//! Move encoding, the move applier, and legal-move enumeration.
//!
//! Moves are pairs of slot indices:
//!   - `0`            the stock (draw window)
//!   - `1..=4`        the foundation of suit `index - 1`
//!   - `5..5+n_piles` the tableau columns
//!
//! `(0, 0)` advances the draw window. Every other pair transfers one card,
//! or a run of face-up cards between two columns.
//!
//! `GameState::apply` is the only mutating entry point. It either rejects a
//! move without touching the state or applies it and returns a reward
//! delta. `GameState::legal_moves` lists exactly the pairs `apply` would
//! accept, computed by inspection rather than by trial; the integration
//! tests check that equivalence against brute force.

use core::fmt;

use log::{debug, trace};

use crate::card::{Card, Suit, fits_after};
use crate::config::MAX_PILES;
use crate::game::{FIRST_COLUMN_SLOT, GameState};
use crate::rules::{foundation_accepts, foundation_top, split_point};

/// Slot index of the stock.
pub const STOCK_SLOT: usize = 0;

/// Reward for a draw that wraps the window back to the start of the stock.
pub const REWARD_REDEAL: i32 = -2;
/// Reward for playing the drawable card onto its foundation.
pub const REWARD_STOCK_TO_FOUNDATION: i32 = 20;
/// Reward for playing the drawable card onto a column.
pub const REWARD_STOCK_TO_TABLEAU: i32 = 5;
/// Reward for taking a card back off a foundation.
pub const REWARD_FOUNDATION_TO_TABLEAU: i32 = -15;
/// Reward for moving a column's top card to its foundation.
pub const REWARD_TABLEAU_TO_FOUNDATION: i32 = 15;
/// Extra reward when a move turns up a face-down card.
pub const REWARD_REVEAL: i32 = 5;

/// Typed view of a slot index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    Stock,
    Foundation(Suit),
    Column(usize),
}

impl Slot {
    /// Decode a slot index for a game with `n_piles` columns.
    pub fn decode(index: usize, n_piles: usize) -> Option<Slot> {
        match index {
            STOCK_SLOT => Some(Slot::Stock),
            i if i < FIRST_COLUMN_SLOT => Suit::from_u8((i - 1) as u8).map(Slot::Foundation),
            i if i < FIRST_COLUMN_SLOT + n_piles => Some(Slot::Column(i - FIRST_COLUMN_SLOT)),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Slot::Stock => STOCK_SLOT,
            Slot::Foundation(suit) => 1 + suit as usize,
            Slot::Column(c) => FIRST_COLUMN_SLOT + c,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Stock => f.write_str("Stock"),
            Slot::Foundation(suit) => write!(f, "Foundation({})", suit.letter()),
            // Columns are printed 1-based for humans.
            Slot::Column(c) => write!(f, "Column {}", c + 1),
        }
    }
}

/// A `(source, destination)` slot pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Move {
    pub src: u8,
    pub dst: u8,
}

impl Move {
    /// Advance the draw window.
    pub const DRAW: Move = Move { src: 0, dst: 0 };

    #[inline]
    pub const fn new(src: u8, dst: u8) -> Self {
        Move { src, dst }
    }

    #[inline]
    fn between(src: usize, dst: usize) -> Self {
        Move::new(src as u8, dst as u8)
    }

    /// Render a move as a human-readable string, naming the card that would
    /// leave the source slot in `game`.
    pub fn describe(&self, game: &GameState) -> String {
        if *self == Move::DRAW {
            return "Draw".to_string();
        }
        let n = game.n_piles();
        let (Some(src), Some(dst)) = (
            Slot::decode(self.src as usize, n),
            Slot::decode(self.dst as usize, n),
        ) else {
            return format!("{} -> {} (out of range)", self.src, self.dst);
        };
        let card = match src {
            Slot::Stock => game.drawable_card(),
            Slot::Foundation(suit) => foundation_top(&game.foundations(), suit as usize),
            Slot::Column(c) => game.visible_top(c),
        };
        match card {
            Some(card) => format!("{src}: {card} -> {dst}"),
            None => format!("{src} (empty) -> {dst}"),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.src, self.dst)
    }
}

/// Result of `GameState::apply`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Outcome {
    pub success: bool,
    /// Signed reward delta; always 0 for a rejected move.
    pub reward: i32,
}

impl Outcome {
    pub const REJECTED: Outcome = Outcome {
        success: false,
        reward: 0,
    };

    #[inline]
    pub const fn accepted(reward: i32) -> Self {
        Outcome {
            success: true,
            reward,
        }
    }
}

/// Why a move was turned down. Only used for trace logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Rejection {
    BadSlots,
    NothingToLift,
    NotNextOnFoundation,
    DoesNotFit,
    EmptyColumn,
}

impl GameState {
    /// Validate and apply the move `src -> dst`.
    ///
    /// Illegal moves, including out-of-range slot indices, return
    /// `Outcome::REJECTED` and leave the state untouched.
    ///
    /// # Panics
    ///
    /// Panics if a column involved in the move has face-down cards but no
    /// face-up card, which the rules make unreachable.
    pub fn apply(&mut self, src: usize, dst: usize) -> Outcome {
        let result = if src == STOCK_SLOT && dst == STOCK_SLOT {
            Ok(self.draw())
        } else if dst == STOCK_SLOT || src == dst || src >= self.n_slots() || dst >= self.n_slots()
        {
            Err(Rejection::BadSlots)
        } else if src < FIRST_COLUMN_SLOT {
            self.lift(src, dst)
        } else {
            self.move_from_column(src - FIRST_COLUMN_SLOT, dst)
        };

        match result {
            Ok(reward) => {
                self.score += reward;
                debug_assert_eq!(self.verify_invariants(), Ok(()), "after {src}->{dst}");
                Outcome::accepted(reward)
            }
            Err(why) => {
                trace!("rejected move {src}->{dst}: {why:?}");
                Outcome::REJECTED
            }
        }
    }

    /// Same as [`GameState::apply`] for a typed move.
    #[inline]
    pub fn apply_move(&mut self, mv: Move) -> Outcome {
        self.apply(mv.src as usize, mv.dst as usize)
    }

    /// Playable card of column `col`.
    ///
    /// Checks that the column is not hiding cards under an empty visible
    /// pile; auto-reveal makes that state unreachable.
    fn column_top(&self, col: usize) -> Option<Card> {
        let column = &self.tableau.columns[col];
        assert!(
            column.visible_len() > 0 || column.hidden_len() == 0,
            "column {col} has {} face-down cards but no face-up card",
            column.hidden_len()
        );
        column.top()
    }

    /// Advance the draw window by one step, wrapping to the start of the
    /// stock once it has been fully shown.
    fn draw(&mut self) -> i32 {
        let len = self.stock_len();
        let mut start = self.draw_end as usize;
        let mut reward = 0;
        if start >= len {
            debug!("redeal: draw window wraps over {len} stock cards");
            start = 0;
            reward = REWARD_REDEAL;
        }
        let end = start + self.draw_step().min(len - start);
        self.draw_start = start as u8;
        self.draw_end = end as u8;
        reward
    }

    /// Move the drawable card or a foundation's top card.
    fn lift(&mut self, src: usize, dst: usize) -> Result<i32, Rejection> {
        // Stock index of the lifted card, or None for a foundation.
        let (card, stock_idx) = if src == STOCK_SLOT {
            let idx = self.drawable_index().ok_or(Rejection::NothingToLift)?;
            let card = self.tableau.stock.get(idx).ok_or(Rejection::NothingToLift)?;
            (card, Some(idx))
        } else {
            let card = foundation_top(&self.tableau.foundations, src - 1)
                .ok_or(Rejection::NothingToLift)?;
            (card, None)
        };

        let to_foundation = dst < FIRST_COLUMN_SLOT;
        if to_foundation {
            if card.suit_index() as usize != dst - 1
                || !foundation_accepts(&self.tableau.foundations, card)
            {
                return Err(Rejection::NotNextOnFoundation);
            }
            self.tableau.foundations[dst - 1] += 1;
        } else {
            let col = dst - FIRST_COLUMN_SLOT;
            if !fits_after(card, self.column_top(col)) {
                return Err(Rejection::DoesNotFit);
            }
            self.tableau.columns[col].push_visible(card);
        }

        match stock_idx {
            Some(idx) => {
                self.tableau.stock.remove(idx);
                self.draw_end -= 1;
                Ok(if to_foundation {
                    REWARD_STOCK_TO_FOUNDATION
                } else {
                    REWARD_STOCK_TO_TABLEAU
                })
            }
            None => {
                self.tableau.foundations[src - 1] -= 1;
                Ok(REWARD_FOUNDATION_TO_TABLEAU)
            }
        }
    }

    /// Move the top card of column `col` to a foundation, or a run from it
    /// to another column.
    fn move_from_column(&mut self, col: usize, dst: usize) -> Result<i32, Rejection> {
        let top = self.column_top(col).ok_or(Rejection::EmptyColumn)?;

        let mut reward = if dst < FIRST_COLUMN_SLOT {
            if top.suit_index() as usize != dst - 1
                || !foundation_accepts(&self.tableau.foundations, top)
            {
                return Err(Rejection::NotNextOnFoundation);
            }
            self.tableau.columns[col].pop_visible();
            self.tableau.foundations[dst - 1] += 1;
            REWARD_TABLEAU_TO_FOUNDATION
        } else {
            let to = dst - FIRST_COLUMN_SLOT;
            let onto = self.column_top(to);
            let start = split_point(self.tableau.columns[col].visible(), onto)
                .ok_or(Rejection::DoesNotFit)?;
            self.tableau.move_run(col, to, start);
            0
        };

        if let Some(card) = self.tableau.columns[col].reveal_if_exposed() {
            debug!("column {col}: revealed {card}");
            reward += REWARD_REVEAL;
        }
        Ok(reward)
    }

    /// Every move `apply` would currently accept.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(16);
        self.legal_moves_into(&mut moves);
        moves
    }

    /// Like [`GameState::legal_moves`], but refills a caller-owned buffer so
    /// that hot loops do not allocate.
    ///
    /// Order: the draw, then lifts from the stock and each foundation, then
    /// moves out of each column.
    pub fn legal_moves_into(&self, moves: &mut Vec<Move>) {
        moves.clear();
        moves.push(Move::DRAW);

        let foundations = &self.tableau.foundations;
        let n_piles = self.n_piles();
        let tops: [Option<Card>; MAX_PILES] =
            core::array::from_fn(|c| if c < n_piles { self.column_top(c) } else { None });
        let tops = &tops[..n_piles];

        // Stock and foundations as sources.
        for src in 0..FIRST_COLUMN_SLOT {
            let card = if src == STOCK_SLOT {
                self.drawable_card()
            } else {
                foundation_top(foundations, src - 1)
            };
            let Some(card) = card else { continue };

            if foundation_accepts(foundations, card) {
                moves.push(Move::between(src, 1 + card.suit_index() as usize));
            }
            for (c, &top) in tops.iter().enumerate() {
                if fits_after(card, top) {
                    moves.push(Move::between(src, FIRST_COLUMN_SLOT + c));
                }
            }
        }

        // Columns as sources.
        for (c, column) in self.columns().iter().enumerate() {
            let Some(top) = tops[c] else { continue };
            let src = FIRST_COLUMN_SLOT + c;

            if foundation_accepts(foundations, top) {
                moves.push(Move::between(src, 1 + top.suit_index() as usize));
            }
            for (d, &onto) in tops.iter().enumerate() {
                if d != c && split_point(column.visible(), onto).is_some() {
                    moves.push(Move::between(src, FIRST_COLUMN_SLOT + d));
                }
            }
        }
    }
}
