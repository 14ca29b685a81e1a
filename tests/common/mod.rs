//! Test-only helpers shared by the integration tests.
//!
//! `brute_force_legal_moves` is the slow reference the enumerator is
//! checked against: it tries every slot pair on a snapshot.
#![allow(dead_code)]

use klondike_engine::{GameState, Move};

/// Every `(src, dst)` pair that `apply` accepts on a copy of `game`, sorted.
pub fn brute_force_legal_moves(game: &GameState) -> Vec<Move> {
    let n = game.n_slots();
    let mut moves = Vec::new();
    for src in 0..n {
        for dst in 0..n {
            let mut copy = game.snapshot();
            if copy.apply(src, dst).success {
                moves.push(Move::new(src as u8, dst as u8));
            }
        }
    }
    moves
}

/// The enumerator's moves, sorted, with duplicates flagged.
pub fn sorted_legal_moves(game: &GameState) -> Vec<Move> {
    let mut moves = game.legal_moves();
    moves.sort();
    let before = moves.len();
    moves.dedup();
    assert_eq!(before, moves.len(), "enumerator produced duplicate moves");
    moves
}

pub fn assert_enumerator_matches_brute_force(game: &GameState) {
    assert_eq!(
        sorted_legal_moves(game),
        brute_force_legal_moves(game),
        "enumerator and applier disagree (fingerprint {:016x})",
        game.fingerprint()
    );
}

/// Count every card once: foundations by counter, then stock and columns.
pub fn card_census(game: &GameState) -> [u8; 52] {
    let mut counts = [0u8; 52];
    for (suit, &n) in game.foundations().iter().enumerate() {
        for rank in 0..n as usize {
            counts[rank * 4 + suit] += 1;
        }
    }
    for card in game.stock() {
        counts[card.index() as usize] += 1;
    }
    for col in 0..game.n_piles() {
        for card in game.hidden(col).iter().chain(game.visible(col)) {
            counts[card.index() as usize] += 1;
        }
    }
    counts
}

pub fn assert_conserved(game: &GameState) {
    let counts = card_census(game);
    for (idx, &n) in counts.iter().enumerate() {
        assert_eq!(n, 1, "card index {idx} appears {n} times");
    }
}

/// Small xorshift used to pick moves reproducibly inside a rollout.
pub struct Picker(u64);

impl Picker {
    pub fn new(seed: u64) -> Self {
        Picker(seed | 1)
    }

    pub fn pick(&mut self, len: usize) -> usize {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        (self.0 % len as u64) as usize
    }
}

/// Play `steps` legal moves chosen by `picker`, calling `check` on every
/// position reached (including the first).
pub fn rollout(
    game: &mut GameState,
    steps: usize,
    picker: &mut Picker,
    mut check: impl FnMut(&GameState),
) {
    check(&*game);
    let mut moves = Vec::new();
    for _ in 0..steps {
        if game.is_won() {
            break;
        }
        game.legal_moves_into(&mut moves);
        let mv = moves[picker.pick(moves.len())];
        let outcome = game.apply_move(mv);
        assert!(outcome.success, "listed move {mv} was rejected");
        check(&*game);
    }
}
