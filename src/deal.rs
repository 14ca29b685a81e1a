//! Turning a seed into a deal.
//!
//! A deal is a permutation of the 52 card indices. It is produced by an
//! explicitly seeded `StdRng`, so the same seed always gives the same deal
//! regardless of what else the process is doing, and it is laid out
//! column-major: column `i` takes `i` face-down cards and then one face-up
//! card, and whatever is left becomes the stock in deck order.
//!
//! Every permutation also has a deal number in `0..52!`, its lexicographic
//! rank, which identifies the deal without reference to any RNG.
//!
//! `DealScheme` picks how a seed becomes a deck. Besides the `StdRng`
//! shuffle there is the older hidden-first reading of that shuffle and
//! Klondike-Solver's numbering, so seeds quoted by other tools name the
//! same deal here.

use core::fmt;

use num_bigint::BigUint;
use num_traits::{One, ToPrimitive, Zero};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{RngCore, SeedableRng};

use crate::card::{CARDS_PER_DECK, Card, NUM_RANKS, Rank, Suit, standard_deck};
use crate::config::{ConfigError, GameConfig};
use crate::tableau::{Stock, Tableau};

const DECK_LEN: usize = CARDS_PER_DECK as usize;

/// A full deck in dealing order.
pub type Deck = [Card; DECK_LEN];

/// Why a deck or deal could not be built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DealError {
    /// A raw deck list did not have 52 entries.
    Length(usize),
    /// A raw deck list contained an index outside `0..52`.
    OutOfRange(u8),
    /// A raw deck list named the same card twice.
    Duplicate(u8),
    /// A deal number was not below `52!`.
    NumberTooLarge(BigUint),
    Config(ConfigError),
}

impl fmt::Display for DealError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DealError::Length(n) => {
                write!(f, "deck list must have {DECK_LEN} cards, got {n}")
            }
            DealError::OutOfRange(v) => write!(f, "card index {v} out of range 0..=51"),
            DealError::Duplicate(v) => write!(f, "duplicate card index {v}"),
            DealError::NumberTooLarge(n) => write!(f, "deal number {n} is not below 52!"),
            DealError::Config(e) => write!(f, "invalid configuration: {e}"),
        }
    }
}

impl std::error::Error for DealError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DealError::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for DealError {
    fn from(e: ConfigError) -> Self {
        DealError::Config(e)
    }
}

/// Shuffle a standard deck with an RNG seeded only from `seed`.
pub fn shuffled_deck(seed: u64) -> Deck {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut deck = standard_deck();
    deck.shuffle(&mut rng);
    deck
}

/// How a seed is turned into a deck.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DealScheme {
    /// [`shuffled_deck`], read column-major.
    #[default]
    Standard,
    /// The same shuffle read the older way: every face-down card first,
    /// then one face-up card per column.
    Legacy,
    /// Klondike-Solver's deals. Only the low 32 bits of the seed count.
    KlondikeSolver,
}

impl DealScheme {
    /// The deck `seed` names under this scheme, in the column-major order
    /// [`deal_tableau`] expects for `config`.
    ///
    /// # Panics
    ///
    /// Panics if `config` has not been validated and deals more than 52
    /// cards to the tableau.
    pub fn deck(self, seed: u64, config: &GameConfig) -> Deck {
        match self {
            DealScheme::Standard => shuffled_deck(seed),
            DealScheme::Legacy => from_hidden_first(&shuffled_deck(seed), config),
            DealScheme::KlondikeSolver => ks_shuffle(seed as u32, config),
        }
    }
}

/// Reorder a hidden-first deck into column-major order. The stock part is
/// left as it is.
fn from_hidden_first(cards: &Deck, config: &GameConfig) -> Deck {
    let n = config.n_piles as usize;
    let hidden_total = n * n.saturating_sub(1) / 2;
    let mut deck = *cards;
    for col in 0..n {
        let base = col * (col + 1) / 2;
        let old_base = col * col.saturating_sub(1) / 2;
        deck[base..base + col].copy_from_slice(&cards[old_base..old_base + col]);
        deck[base + col] = cards[hidden_total + col];
    }
    deck
}

/// Random swaps Klondike-Solver applies to its starting order.
const KS_SWAPS: usize = 269;

/// Klondike-Solver's deal number `seed`.
///
/// The cards start in suit blocks (clubs, diamonds, spades, hearts, each
/// Ace..King), get shuffled by [`KsRandom`], and are then dealt row by row:
/// the `row`-th card of every column from `row` onward, before the stock.
pub fn ks_shuffle(seed: u32, config: &GameConfig) -> Deck {
    const SUIT_BLOCKS: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Spades, Suit::Hearts];
    let per_suit = NUM_RANKS as usize;

    let mut rng = KsRandom::new(seed);
    let mut cards: Deck =
        core::array::from_fn(|i| Card::encode(Rank::ALL[i % per_suit], SUIT_BLOCKS[i / per_suit]));
    for _ in 0..KS_SWAPS {
        let a = rng.next_u32() as usize % DECK_LEN;
        let b = rng.next_u32() as usize % DECK_LEN;
        cards.swap(a, b);
    }

    let n = config.n_piles as usize;
    let mut deck = cards;
    let mut next = 0;
    for row in 0..n {
        for col in row..n {
            deck[col * (col + 1) / 2 + row] = cards[next];
            next += 1;
        }
    }
    deck
}

/// The 31-bit generator behind Klondike-Solver deal numbers.
#[derive(Clone, Debug)]
pub struct KsRandom {
    value: u32,
    mix: u32,
    twist: u32,
}

impl KsRandom {
    pub fn new(seed: u32) -> Self {
        let mut rng = KsRandom {
            value: seed,
            mix: 51_651_237,
            twist: 895_213_268,
        };
        for _ in 0..50 {
            rng.step();
        }
        rng.value = 0x9417_B3AF ^ seed ^ (((seed as i32) >> 15) as u32);
        for _ in 0..950 {
            rng.step();
        }
        rng
    }

    fn step(&mut self) -> u32 {
        let mut y = self.value ^ self.twist.wrapping_sub(self.mix) ^ self.value;
        y ^= self.twist ^ self.value ^ self.mix;
        self.mix ^= self.twist ^ self.value;
        self.value ^= self.twist.wrapping_sub(self.mix);
        self.twist ^= self.value ^ y;
        // Arithmetic shifts.
        self.value ^= (self.twist << 7) ^ (((self.mix as i32) >> 16) as u32) ^ (y << 8);
        self.value & 0x7fff_ffff
    }
}

impl RngCore for KsRandom {
    fn next_u32(&mut self) -> u32 {
        self.step()
    }

    fn next_u64(&mut self) -> u64 {
        let lo = self.step() as u64;
        let hi = self.step() as u64;
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.step().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Validate a raw list of card indices as a deck.
///
/// The list must contain exactly 52 integers, each in 0..=51, with no
/// duplicates.
pub fn deck_from_indices(indices: &[u8]) -> Result<Deck, DealError> {
    if indices.len() != DECK_LEN {
        return Err(DealError::Length(indices.len()));
    }
    let mut seen = [false; DECK_LEN];
    let mut deck = standard_deck();
    for (slot, &v) in deck.iter_mut().zip(indices) {
        let card = Card::from_index(v).ok_or(DealError::OutOfRange(v))?;
        if std::mem::replace(&mut seen[v as usize], true) {
            return Err(DealError::Duplicate(v));
        }
        *slot = card;
    }
    Ok(deck)
}

/// Lay out a deck into columns and stock for the given configuration.
///
/// Foundations start empty. The draw window is owned by `GameState` and is
/// not part of the layout.
pub fn deal_tableau(deck: &Deck, config: &GameConfig) -> Tableau {
    let mut tab = Tableau::new_empty();
    let mut cards = deck.iter().copied();

    for (i, col) in tab.columns[..config.n_piles as usize].iter_mut().enumerate() {
        for card in cards.by_ref().take(i) {
            col.push_hidden(card);
        }
        if let Some(card) = cards.next() {
            col.push_visible(card);
        }
    }

    let rest = &deck[config.tableau_cards()..];
    tab.stock = Stock::from_cards(rest);
    tab
}

fn factorial(n: u32) -> BigUint {
    (1..=n).fold(BigUint::one(), |acc, k| acc * BigUint::from(k))
}

/// Lexicographic rank of `deck` among all 52! orderings (Lehmer code).
///
/// The identity deck (`standard_deck()`) is deal number 0.
pub fn deal_number(deck: &Deck) -> BigUint {
    let mut used = [false; DECK_LEN];
    let mut number = BigUint::zero();
    for (i, card) in deck.iter().enumerate() {
        let idx = card.index() as usize;
        let smaller_unused = used[..idx].iter().filter(|&&u| !u).count();
        used[idx] = true;
        number = number * BigUint::from((DECK_LEN - i) as u32)
            + BigUint::from(smaller_unused as u32);
    }
    number
}

/// Inverse of [`deal_number`].
pub fn deck_from_deal_number(number: &BigUint) -> Result<Deck, DealError> {
    if *number >= factorial(DECK_LEN as u32) {
        return Err(DealError::NumberTooLarge(number.clone()));
    }

    // Peel off mixed-radix digits, least significant (radix 1) first.
    let mut digits = [0usize; DECK_LEN];
    let mut rest = number.clone();
    for i in (0..DECK_LEN).rev() {
        let radix = BigUint::from((DECK_LEN - i) as u32);
        digits[i] = (&rest % &radix)
            .to_usize()
            .ok_or_else(|| DealError::NumberTooLarge(number.clone()))?;
        rest = &rest / &radix;
    }

    let mut remaining: Vec<Card> = standard_deck().to_vec();
    let mut deck = standard_deck();
    for (slot, &d) in deck.iter_mut().zip(digits.iter()) {
        *slot = remaining.remove(d);
    }
    Ok(deck)
}
