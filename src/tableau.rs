//! Fixed-capacity pile storage.
//!
//! Every pile is a plain array plus an explicit length, so a whole position
//! is a `Copy` value with no heap allocation. Rule logic lives in
//! `crate::rules` and `crate::moves`; this module only stores cards and
//! keeps unused slots zeroed so that derived equality and hashing see only
//! live cards.

use crate::card::{CARDS_PER_DECK, Card, NUM_RANKS, NUM_SUITS, Rank, Suit};
use crate::config::MAX_PILES;

/// Maximum face-down cards in one column (the last column of a nine-column
/// deal).
pub const MAX_HIDDEN: usize = MAX_PILES - 1;
/// Maximum face-up cards in one column: a full King..Ace run.
pub const MAX_VISIBLE: usize = NUM_RANKS as usize;
/// Maximum stock size (a one-column deal leaves 51 cards).
pub const MAX_STOCK: usize = CARDS_PER_DECK as usize;

/// Value written into unused slots.
const FILLER: Card = Card::encode(Rank::Ace, Suit::Hearts);

/// One tableau column: a face-down pile with a face-up run on top of it.
///
/// Both piles are stored bottom-to-top; `hidden[n_hidden - 1]` is the next
/// card to be revealed and `visible[n_visible - 1]` the playable card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Column {
    hidden: [Card; MAX_HIDDEN],
    n_hidden: u8,
    visible: [Card; MAX_VISIBLE],
    n_visible: u8,
}

impl Column {
    pub const fn new_empty() -> Self {
        Column {
            hidden: [FILLER; MAX_HIDDEN],
            n_hidden: 0,
            visible: [FILLER; MAX_VISIBLE],
            n_visible: 0,
        }
    }

    #[inline]
    pub fn hidden(&self) -> &[Card] {
        &self.hidden[..self.n_hidden as usize]
    }

    #[inline]
    pub fn visible(&self) -> &[Card] {
        &self.visible[..self.n_visible as usize]
    }

    #[inline]
    pub fn hidden_len(&self) -> usize {
        self.n_hidden as usize
    }

    #[inline]
    pub fn visible_len(&self) -> usize {
        self.n_visible as usize
    }

    /// The playable (top face-up) card, if any.
    #[inline]
    pub fn top(&self) -> Option<Card> {
        self.visible().last().copied()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n_hidden == 0 && self.n_visible == 0
    }

    /// Put a card face-down on the hidden pile. Only used while dealing.
    pub fn push_hidden(&mut self, card: Card) {
        let n = self.n_hidden as usize;
        debug_assert!(n < MAX_HIDDEN, "hidden pile overflow");
        self.hidden[n] = card;
        self.n_hidden += 1;
    }

    pub fn push_visible(&mut self, card: Card) {
        let n = self.n_visible as usize;
        debug_assert!(n < MAX_VISIBLE, "visible pile overflow");
        self.visible[n] = card;
        self.n_visible += 1;
    }

    pub fn extend_visible(&mut self, cards: &[Card]) {
        let n = self.n_visible as usize;
        debug_assert!(n + cards.len() <= MAX_VISIBLE, "visible pile overflow");
        self.visible[n..n + cards.len()].copy_from_slice(cards);
        self.n_visible += cards.len() as u8;
    }

    /// Remove and return the playable card.
    pub fn pop_visible(&mut self) -> Option<Card> {
        let card = self.top()?;
        self.truncate_visible(self.visible_len() - 1);
        Some(card)
    }

    /// Drop every face-up card from position `len` upward.
    pub fn truncate_visible(&mut self, len: usize) {
        let n = self.n_visible as usize;
        if len < n {
            self.visible[len..n].fill(FILLER);
            self.n_visible = len as u8;
        }
    }

    /// Turn the top face-down card face-up if the visible pile is empty.
    ///
    /// Returns the revealed card.
    pub fn reveal_if_exposed(&mut self) -> Option<Card> {
        if self.n_visible != 0 || self.n_hidden == 0 {
            return None;
        }
        self.n_hidden -= 1;
        let idx = self.n_hidden as usize;
        let card = self.hidden[idx];
        self.hidden[idx] = FILLER;
        self.push_visible(card);
        Some(card)
    }
}

/// The undealt remainder, in deal order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Stock {
    cards: [Card; MAX_STOCK],
    len: u8,
}

impl Stock {
    pub const fn new_empty() -> Self {
        Stock {
            cards: [FILLER; MAX_STOCK],
            len: 0,
        }
    }

    pub fn from_cards(cards: &[Card]) -> Self {
        debug_assert!(cards.len() <= MAX_STOCK);
        let mut stock = Stock::new_empty();
        stock.cards[..cards.len()].copy_from_slice(cards);
        stock.len = cards.len() as u8;
        stock
    }

    #[inline]
    pub fn as_slice(&self) -> &[Card] {
        &self.cards[..self.len as usize]
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub fn get(&self, idx: usize) -> Option<Card> {
        self.as_slice().get(idx).copied()
    }

    /// Remove the card at `idx`, shifting later cards down by one.
    pub fn remove(&mut self, idx: usize) -> Card {
        let n = self.len as usize;
        assert!(idx < n, "stock index {idx} out of range (len {n})");
        let card = self.cards[idx];
        self.cards.copy_within(idx + 1..n, idx);
        self.cards[n - 1] = FILLER;
        self.len -= 1;
        card
    }
}

/// All piles of a position.
///
/// `foundations[s]` counts the cards stacked on suit `s`'s foundation:
/// 0 means empty, `n > 0` means the top card has rank index `n - 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Tableau {
    pub columns: [Column; MAX_PILES],
    pub foundations: [u8; NUM_SUITS as usize],
    pub stock: Stock,
}

impl Tableau {
    pub const fn new_empty() -> Self {
        Tableau {
            columns: [Column::new_empty(); MAX_PILES],
            foundations: [0; NUM_SUITS as usize],
            stock: Stock::new_empty(),
        }
    }

    /// Move `columns[src].visible[start..]` onto `columns[dst]`.
    pub fn move_run(&mut self, src: usize, dst: usize, start: usize) {
        debug_assert_ne!(src, dst);
        // Split the columns slice to obtain two distinct mutable references.
        let (from, to) = if src < dst {
            let (left, right) = self.columns.split_at_mut(dst);
            (&mut left[src], &mut right[0])
        } else {
            let (left, right) = self.columns.split_at_mut(src);
            (&mut right[0], &mut left[dst])
        };
        to.extend_visible(&from.visible()[start..]);
        from.truncate_visible(start);
    }

    pub fn is_win(&self) -> bool {
        self.foundations.iter().all(|&n| n == NUM_RANKS)
    }
}
