//! Game-level state: one deal in progress.
//!
//! `GameState` owns everything needed to continue a game:
//!   - the episode configuration (draw step, pile count)
//!   - the current piles (`Tableau`)
//!   - the draw window over the stock
//!   - the running score, i.e. the sum of all reward deltas so far.
//!
//! It is a flat `Copy` value, so `snapshot()` is a plain bitwise copy that
//! shares nothing with the original. Mutation goes exclusively through
//! `apply` in `crate::moves`.

use core::fmt;
use core::ops::Range;

use crate::card::{CARDS_PER_DECK, Card, NUM_RANKS, NUM_SUITS, Suit};
use crate::config::{ConfigError, GameConfig};
use crate::deal::{DealScheme, Deck, deal_tableau};
use crate::rules::is_valid_run;
use crate::tableau::{Column, Tableau};

/// Number of non-column slots: the stock plus four foundations.
pub const FIRST_COLUMN_SLOT: usize = 1 + NUM_SUITS as usize;

/// 64-bit FNV-1a parameters.
const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01B3;

#[inline]
fn fnv1a_mix_byte(mut h: u64, byte: u8) -> u64 {
    h ^= byte as u64;
    h.wrapping_mul(FNV_PRIME)
}

/// A broken structural invariant, reported by [`GameState::verify_invariants`].
///
/// Seeing one of these always means a bug in the engine, never bad input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    /// The same card was found in two places.
    DuplicateCard(Card),
    /// Fewer than 52 cards were found across all piles.
    MissingCards { found: usize },
    FoundationOverflow { suit: Suit, count: u8 },
    /// A visible pile is not a descending alternating-color run.
    BrokenRun { column: usize },
    /// A column shows no card although face-down cards remain.
    HiddenUnderEmpty { column: usize },
    /// The draw window reaches past the end of the stock.
    DrawWindow { end: usize, stock_len: usize },
    /// A column beyond `n_piles` holds cards.
    UnusedColumn { column: usize },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvariantViolation::DuplicateCard(c) => write!(f, "card {c} appears twice"),
            InvariantViolation::MissingCards { found } => {
                write!(f, "only {found} of {CARDS_PER_DECK} cards accounted for")
            }
            InvariantViolation::FoundationOverflow { suit, count } => {
                write!(f, "foundation {suit:?} holds {count} cards")
            }
            InvariantViolation::BrokenRun { column } => {
                write!(f, "column {column} visible pile is not a valid run")
            }
            InvariantViolation::HiddenUnderEmpty { column } => {
                write!(f, "column {column} has hidden cards but no visible card")
            }
            InvariantViolation::DrawWindow { end, stock_len } => {
                write!(f, "draw window ends at {end} but stock has {stock_len} cards")
            }
            InvariantViolation::UnusedColumn { column } => {
                write!(f, "column {column} is outside the configured piles but not empty")
            }
        }
    }
}

impl std::error::Error for InvariantViolation {}

/// Complete description of a single game's state at a point in time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GameState {
    pub(crate) config: GameConfig,
    pub(crate) tableau: Tableau,
    /// First stock index of the current draw window.
    pub(crate) draw_start: u8,
    /// One past the leading edge of the draw window; `stock[draw_end - 1]`
    /// is the drawable card. Drops below `draw_start` once more cards have
    /// been taken than the last draw exposed, walking back over cards seen
    /// on earlier draws.
    pub(crate) draw_end: u8,
    pub(crate) score: i32,
}

impl GameState {
    /// Deal a new game from `seed` with the default configuration
    /// (draw-3, seven piles).
    pub fn new(seed: u64) -> Self {
        let config = GameConfig::default();
        Self::deal(&DealScheme::Standard.deck(seed, &config), config)
    }

    /// Deal a new game from `seed` with an explicit configuration.
    pub fn with_config(seed: u64, config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_scheme(seed, DealScheme::Standard, config)
    }

    /// Deal the game `seed` names under `scheme`.
    pub fn with_scheme(
        seed: u64,
        scheme: DealScheme,
        config: GameConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::deal(&scheme.deck(seed, &config), config))
    }

    /// Deal a known card order instead of a seeded shuffle.
    pub fn from_deck(deck: &Deck, config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::deal(deck, config))
    }

    fn deal(deck: &Deck, config: GameConfig) -> Self {
        let tableau = deal_tableau(deck, &config);
        let window = (config.draw_step as usize).min(tableau.stock.len());
        GameState {
            config,
            tableau,
            draw_start: 0,
            draw_end: window as u8,
            score: 0,
        }
    }

    /// An independent copy for speculative play.
    #[inline]
    pub fn snapshot(&self) -> GameState {
        *self
    }

    // ----- Configuration -----

    #[inline]
    pub fn config(&self) -> GameConfig {
        self.config
    }

    #[inline]
    pub fn n_piles(&self) -> usize {
        self.config.n_piles as usize
    }

    #[inline]
    pub fn draw_step(&self) -> usize {
        self.config.draw_step as usize
    }

    /// Number of valid slot indices: stock, four foundations, the columns.
    #[inline]
    pub fn n_slots(&self) -> usize {
        FIRST_COLUMN_SLOT + self.n_piles()
    }

    // ----- Foundations -----

    /// Cards stacked on the foundation of `suit` (0 = empty, 13 = complete).
    #[inline]
    pub fn foundation(&self, suit: Suit) -> u8 {
        self.tableau.foundations[suit as usize]
    }

    #[inline]
    pub fn foundations(&self) -> [u8; NUM_SUITS as usize] {
        self.tableau.foundations
    }

    // ----- Columns -----

    /// The configured columns, in slot order.
    #[inline]
    pub fn columns(&self) -> &[Column] {
        &self.tableau.columns[..self.n_piles()]
    }

    /// Face-up cards of column `col`, bottom-to-top.
    ///
    /// # Panics
    ///
    /// Panics if `col >= n_piles()`.
    #[inline]
    pub fn visible(&self, col: usize) -> &[Card] {
        self.columns()[col].visible()
    }

    #[inline]
    pub fn visible_top(&self, col: usize) -> Option<Card> {
        self.columns()[col].top()
    }

    #[inline]
    pub fn hidden_count(&self, col: usize) -> usize {
        self.columns()[col].hidden_len()
    }

    /// Face-down cards of column `col`, bottom-to-top. Move rules never look
    /// at these; they are exposed for full-information consumers.
    #[inline]
    pub fn hidden(&self, col: usize) -> &[Card] {
        self.columns()[col].hidden()
    }

    // ----- Stock -----

    /// The whole remaining stock in deal order.
    #[inline]
    pub fn stock(&self) -> &[Card] {
        self.tableau.stock.as_slice()
    }

    #[inline]
    pub fn stock_len(&self) -> usize {
        self.tableau.stock.len()
    }

    /// Stock indices currently face-up in the draw window.
    ///
    /// After cards have been taken past the start of the window only the
    /// leading card is reported.
    pub fn draw_window(&self) -> Range<usize> {
        let start = self.draw_start as usize;
        let end = self.draw_end as usize;
        if end > start {
            start..end
        } else {
            end.saturating_sub(1)..end
        }
    }

    /// Stock index of the drawable card.
    #[inline]
    pub(crate) fn drawable_index(&self) -> Option<usize> {
        (self.draw_end as usize).checked_sub(1)
    }

    /// The card at the leading edge of the draw window, if any.
    #[inline]
    pub fn drawable_card(&self) -> Option<Card> {
        self.drawable_index().and_then(|i| self.tableau.stock.get(i))
    }

    // ----- Outcome -----

    /// True iff every foundation holds all thirteen ranks.
    #[inline]
    pub fn is_won(&self) -> bool {
        self.tableau.is_win()
    }

    /// Sum of all reward deltas returned by `apply` so far.
    #[inline]
    pub fn score(&self) -> i32 {
        self.score
    }

    /// 64-bit hash of the position (score excluded).
    ///
    /// Two states that differ in any pile, foundation, or the draw window
    /// hash differently except for astronomically unlikely collisions, so
    /// lookahead code can use this to detect transpositions.
    pub fn fingerprint(&self) -> u64 {
        let mut h = FNV_OFFSET_BASIS;

        h = fnv1a_mix_byte(h, 0xF0);
        for &f in &self.tableau.foundations {
            h = fnv1a_mix_byte(h, f);
        }

        h = fnv1a_mix_byte(h, b'S');
        h = fnv1a_mix_byte(h, self.draw_start);
        h = fnv1a_mix_byte(h, self.draw_end);
        for card in self.stock() {
            h = fnv1a_mix_byte(h, card.index());
        }

        h = fnv1a_mix_byte(h, 0xC0);
        for col in self.columns() {
            h = fnv1a_mix_byte(h, col.hidden_len() as u8);
            h = fnv1a_mix_byte(h, col.visible_len() as u8);
            for card in col.hidden().iter().chain(col.visible()) {
                h = fnv1a_mix_byte(h, card.index());
            }
        }

        h
    }

    /// Check every structural invariant of the position.
    ///
    /// This walks all 52 cards and is meant for tests and debug builds, not
    /// for the move loop.
    pub fn verify_invariants(&self) -> Result<(), InvariantViolation> {
        let mut seen = [false; CARDS_PER_DECK as usize];
        let mut found = 0usize;
        let mut mark = |card: Card| -> Result<(), InvariantViolation> {
            if std::mem::replace(&mut seen[card.index() as usize], true) {
                return Err(InvariantViolation::DuplicateCard(card));
            }
            found += 1;
            Ok(())
        };

        for (s, &count) in self.tableau.foundations.iter().enumerate() {
            let suit = Suit::ALL[s];
            if count > NUM_RANKS {
                return Err(InvariantViolation::FoundationOverflow { suit, count });
            }
            for rank in 0..count {
                // rank < 13 and s < 4, so the index is in range.
                if let Some(card) = Card::from_index(rank * NUM_SUITS + s as u8) {
                    mark(card)?;
                }
            }
        }

        for &card in self.stock() {
            mark(card)?;
        }

        for (i, col) in self.tableau.columns.iter().enumerate() {
            if i >= self.n_piles() {
                if !col.is_empty() {
                    return Err(InvariantViolation::UnusedColumn { column: i });
                }
                continue;
            }
            if col.visible_len() == 0 && col.hidden_len() > 0 {
                return Err(InvariantViolation::HiddenUnderEmpty { column: i });
            }
            if !is_valid_run(col.visible()) {
                return Err(InvariantViolation::BrokenRun { column: i });
            }
            for &card in col.hidden().iter().chain(col.visible()) {
                mark(card)?;
            }
        }

        if found != CARDS_PER_DECK as usize {
            return Err(InvariantViolation::MissingCards { found });
        }

        if self.draw_end as usize > self.stock_len() {
            return Err(InvariantViolation::DrawWindow {
                end: self.draw_end as usize,
                stock_len: self.stock_len(),
            });
        }

        Ok(())
    }
}
