//! Pure Klondike rules, independent of how piles are stored.
//!
//! Both the applier and the enumerator in `crate::moves` decide legality
//! only through these functions, which is what keeps the two in agreement.

use crate::card::{Card, NUM_RANKS, NUM_SUITS, fits_after};

/// Can `card` go onto its suit's foundation, given the per-suit counters?
#[inline]
pub fn foundation_accepts(foundations: &[u8; NUM_SUITS as usize], card: Card) -> bool {
    foundations[card.suit_index() as usize] == card.rank_index()
}

/// The card showing on foundation `suit`, if any.
#[inline]
pub fn foundation_top(foundations: &[u8; NUM_SUITS as usize], suit: usize) -> Option<Card> {
    let count = foundations[suit];
    if count == 0 {
        return None;
    }
    debug_assert!(count <= NUM_RANKS);
    Card::from_index((count - 1) * NUM_SUITS + suit as u8)
}

/// Where a face-up run must be split to land on `onto`.
///
/// `run` is a visible pile, bottom-to-top. Returns the index `p` such that
/// `run[p..]` can be moved as a unit onto a column whose playable card is
/// `onto` (`None` for an empty column). Because a run descends one rank per
/// card, at most one position can match.
///
/// Only the boundary card `run[p]` is checked; the cards above it are
/// trusted to form a valid run already.
pub fn split_point(run: &[Card], onto: Option<Card>) -> Option<usize> {
    let base = *run.first()?;
    let p = match onto {
        None => 0,
        Some(top) => {
            // run[p] has rank base - p and must be one below `top`.
            let wanted = top.rank_index().checked_sub(1)?;
            base.rank_index().checked_sub(wanted)? as usize
        }
    };
    let &card = run.get(p)?;
    fits_after(card, onto).then_some(p)
}

/// True if `cards` (bottom-to-top) is a descending, alternating-color run.
pub fn is_valid_run(cards: &[Card]) -> bool {
    cards
        .windows(2)
        .all(|pair| fits_after(pair[1], Some(pair[0])))
}
