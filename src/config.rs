//! Per-episode configuration: draw window width and number of tableau
//! columns. Both are fixed once a deal is made.

use core::fmt;

use crate::card::CARDS_PER_DECK;

/// Largest supported number of tableau columns.
///
/// Column `i` is dealt `i + 1` cards, so nine columns use 45 cards and ten
/// would need 55.
pub const MAX_PILES: usize = 9;

/// Default draw window width (classic draw-3).
pub const DEFAULT_DRAW_STEP: u8 = 3;
/// Default number of tableau columns.
pub const DEFAULT_PILES: u8 = 7;

/// Why a `GameConfig` was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `draw_step` must be in `1..=52`.
    DrawStep(u8),
    /// `n_piles` must be in `1..=MAX_PILES`.
    PileCount(u8),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::DrawStep(v) => {
                write!(f, "draw step {v} out of range 1..={CARDS_PER_DECK}")
            }
            ConfigError::PileCount(v) => {
                write!(f, "pile count {v} out of range 1..={MAX_PILES}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Rules parameters for one episode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GameConfig {
    /// How many stock cards each draw exposes.
    pub draw_step: u8,
    /// Number of tableau columns.
    pub n_piles: u8,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            draw_step: DEFAULT_DRAW_STEP,
            n_piles: DEFAULT_PILES,
        }
    }
}

impl GameConfig {
    /// Build and validate a configuration.
    pub fn new(draw_step: u8, n_piles: u8) -> Result<Self, ConfigError> {
        let cfg = GameConfig { draw_step, n_piles };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.draw_step == 0 || self.draw_step > CARDS_PER_DECK {
            return Err(ConfigError::DrawStep(self.draw_step));
        }
        if self.n_piles == 0 || self.n_piles as usize > MAX_PILES {
            return Err(ConfigError::PileCount(self.n_piles));
        }
        Ok(())
    }

    /// Cards dealt to the tableau: `n * (n + 1) / 2`.
    pub fn tableau_cards(&self) -> usize {
        let n = self.n_piles as usize;
        n * (n + 1) / 2
    }
}
