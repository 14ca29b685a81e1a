//! The card codec.
//!
//! A card is one byte, `rank * 4 + suit`. Everything else in the engine
//! talks about cards through this module, and `fits_after` is the only
//! tableau placement rule (an empty column takes only a King).

use core::fmt;

pub const NUM_SUITS: u8 = 4;
pub const NUM_RANKS: u8 = 13;
pub const CARDS_PER_DECK: u8 = NUM_RANKS * NUM_SUITS;

/// Card id in `0..52`.
///
/// Ids are rank-major:
/// ```text
/// index = rank as u8 * 4 + suit as u8
/// ```
/// where `rank` is 0=Ace, 1=Two, ..., 12=King, so indices 0..=3 are the
/// four aces and 48..=51 the four kings.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Card(u8);

/// The four suits. Foundation `i` holds suit `i`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[repr(u8)]
pub enum Suit {
    Hearts = 0,
    Diamonds = 1,
    Clubs = 2,
    Spades = 3,
}

/// Red or black.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Color {
    Red,
    Black,
}

/// The thirteen ranks, Ace low.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
#[repr(u8)]
pub enum Rank {
    Ace = 0,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King, // 12
}

impl Card {
    /// Create a card from its rank and suit.
    #[inline]
    pub const fn encode(rank: Rank, suit: Suit) -> Self {
        Card(rank as u8 * NUM_SUITS + suit as u8)
    }

    /// Split a card back into its rank and suit.
    #[inline]
    pub fn decode(self) -> (Rank, Suit) {
        (self.rank(), self.suit())
    }

    /// `None` unless `index < 52`.
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < CARDS_PER_DECK {
            Some(Card(index))
        } else {
            None
        }
    }

    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn suit(self) -> Suit {
        Suit::ALL[(self.0 % NUM_SUITS) as usize]
    }

    #[inline]
    pub fn rank(self) -> Rank {
        Rank::ALL[(self.0 / NUM_SUITS) as usize]
    }

    /// Rank as a plain 0..=12 number.
    #[inline]
    pub const fn rank_index(self) -> u8 {
        self.0 / NUM_SUITS
    }

    /// Suit as a plain 0..=3 number, which is also its foundation index.
    #[inline]
    pub const fn suit_index(self) -> u8 {
        self.0 % NUM_SUITS
    }

    #[inline]
    pub fn color(self) -> Color {
        self.suit().color()
    }

    #[inline]
    pub const fn is_king(self) -> bool {
        self.rank_index() == Rank::King as u8
    }

}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (rank, suit) = self.decode();
        write!(f, "{}{}", rank.letter(), suit.letter())
    }
}

impl Suit {
    /// All suits in foundation order.
    pub const ALL: [Suit; NUM_SUITS as usize] =
        [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    /// Inverse of `suit as u8`.
    #[inline]
    pub fn from_u8(v: u8) -> Option<Self> {
        Suit::ALL.get(v as usize).copied()
    }

    /// Suits 0 and 1 are red, 2 and 3 black.
    #[inline]
    pub fn color(self) -> Color {
        if (self as u8) < 2 { Color::Red } else { Color::Black }
    }

    /// True when the two suits have different colors.
    #[inline]
    pub const fn alternates(self, other: Suit) -> bool {
        (self as u8 ^ other as u8) >= 2
    }

    #[inline]
    pub fn letter(self) -> char {
        match self {
            Suit::Hearts => 'H',
            Suit::Diamonds => 'D',
            Suit::Clubs => 'C',
            Suit::Spades => 'S',
        }
    }
}

impl Rank {
    /// Ace first, King last.
    pub const ALL: [Rank; NUM_RANKS as usize] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Inverse of `rank as u8`.
    #[inline]
    pub fn from_u8(v: u8) -> Option<Self> {
        Rank::ALL.get(v as usize).copied()
    }

    #[inline]
    pub fn letter(self) -> char {
        match self {
            Rank::Ace => 'A',
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
        }
    }
}

/// Can `card` be placed after `onto` in a tableau column?
///
/// `onto == None` stands for an empty column, which accepts only a King.
/// Otherwise `card` must be exactly one rank lower than `onto` and of the
/// opposite color.
#[inline]
pub fn fits_after(card: Card, onto: Option<Card>) -> bool {
    match onto {
        None => card.is_king(),
        Some(top) => {
            card.rank_index() + 1 == top.rank_index() && card.suit().alternates(top.suit())
        }
    }
}

/// Every card, ordered by id. Deal number 0.
pub fn standard_deck() -> [Card; CARDS_PER_DECK as usize] {
    core::array::from_fn(|i| Card(i as u8))
}
