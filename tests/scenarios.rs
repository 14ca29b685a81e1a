//! Fixed scenarios: known deals with known reward sequences.

mod common;

use common::assert_conserved;
use klondike_engine::{
    Card, DealScheme, Deck, GameConfig, GameState, Move, Outcome, Rank, Suit, card::standard_deck,
    deal_number, deck_from_deal_number, deck_from_indices,
};

fn card(rank: Rank, suit: Suit) -> Card {
    Card::encode(rank, suit)
}

/// Standard deck order with the given cards moved to the given positions.
fn deck_with(placements: &[(usize, Card)]) -> Deck {
    let mut deck = standard_deck();
    for &(pos, c) in placements {
        let from = deck
            .iter()
            .position(|&d| d == c)
            .expect("every card is in the deck");
        deck.swap(pos, from);
    }
    deck
}

#[test]
fn scenario_a_foundation_then_column_move() {
    // Column 6 (slot 11): hidden deck[21..27], visible deck[27].
    // Column 5 (slot 10): hidden deck[15..20], visible deck[20].
    let ad = card(Rank::Ace, Suit::Diamonds);
    let nine_s = card(Rank::Nine, Suit::Spades);
    let eight_h = card(Rank::Eight, Suit::Hearts);
    let deck = deck_with(&[(27, ad), (26, nine_s), (20, eight_h)]);
    let mut game = GameState::from_deck(&deck, GameConfig::default()).expect("default config");

    // Tableau -> foundation (+15), revealing 9S (+5).
    assert_eq!(game.apply(11, 2), Outcome::accepted(15 + 5));
    assert_eq!(game.foundation(Suit::Diamonds), 1);
    assert_eq!(game.visible(6), &[nine_s]);
    assert_eq!(game.hidden_count(6), 5);

    // Tableau -> tableau (0), revealing column 5's top hidden card (+5).
    assert_eq!(game.apply(10, 11), Outcome::accepted(5));
    assert_eq!(game.visible(6), &[nine_s, eight_h]);
    assert_eq!(game.visible(5), &[deck[19]]);
    assert_eq!(game.hidden_count(5), 4);
    assert_eq!(game.score(), 25);
    assert_conserved(&game);
}

#[test]
fn scenario_b_draw_wraps_once_per_pass() {
    for n_piles in 1..=9u8 {
        for draw_step in 1..=4u8 {
            let config = GameConfig::new(draw_step, n_piles).expect("valid config");
            let mut game = GameState::with_config(99, config).expect("valid config");
            let len = game.stock_len();
            let per_pass = len.div_ceil(draw_step as usize);

            for call in 1..=2 * per_pass {
                let outcome = game.apply(0, 0);
                let expected = if call % per_pass == 0 { -2 } else { 0 };
                assert_eq!(
                    outcome,
                    Outcome::accepted(expected),
                    "piles {n_piles}, step {draw_step}, stock {len}, call {call}"
                );
            }
            assert_eq!(game.score(), -4);
            // Back at the start of the stock.
            assert_eq!(game.draw_window(), 0..(draw_step as usize).min(len));
        }
    }
}

#[test]
fn scenario_b_default_deal() {
    let mut game = GameState::new(3);
    assert_eq!(game.stock_len(), 24);
    let rewards: Vec<i32> = (0..8).map(|_| game.apply(0, 0).reward).collect();
    assert_eq!(rewards, vec![0, 0, 0, 0, 0, 0, 0, -2]);
    assert_eq!(game.draw_window(), 0..3);
}

#[test]
fn scenario_c_auto_reveal_after_foundation_move() {
    // Column 1 (slot 6): hidden deck[1], visible deck[2].
    let ac = card(Rank::Ace, Suit::Clubs);
    let hidden = card(Rank::Jack, Suit::Diamonds);
    let deck = deck_with(&[(2, ac), (1, hidden)]);
    let mut game = GameState::from_deck(&deck, GameConfig::default()).expect("default config");
    assert_eq!(game.hidden_count(1), 1);
    assert_eq!(game.visible(1), &[ac]);

    let outcome = game.apply(6, 3);
    assert_eq!(outcome, Outcome::accepted(15 + 5));
    assert_eq!(game.hidden_count(1), 0);
    assert_eq!(game.visible(1), &[hidden]);
    assert_eq!(game.foundation(Suit::Clubs), 1);
}

#[test]
fn same_seed_same_deal() {
    for seed in [0u64, 1, 12, 2025, u64::MAX] {
        assert_eq!(GameState::new(seed), GameState::new(seed));
        let cfg = GameConfig::new(1, 5).expect("valid config");
        assert_eq!(
            GameState::with_config(seed, cfg),
            GameState::with_config(seed, cfg)
        );
    }
    assert_ne!(GameState::new(1).fingerprint(), GameState::new(2).fingerprint());
}

/// One column holding KS; the stock is every other card in index order,
/// so with draw-1 each drawn card is the next one its foundation needs.
fn foundation_order_game() -> GameState {
    let ks = card(Rank::King, Suit::Spades);
    let order: Vec<u8> = std::iter::once(ks.index()).chain(0..ks.index()).collect();
    let deck = deck_from_indices(&order).expect("a permutation of 0..52");
    GameState::from_deck(&deck, GameConfig::new(1, 1).expect("valid config"))
        .expect("valid config")
}

/// Send a card home if any can go, otherwise draw.
fn play_home_or_draw(game: &mut GameState, moves: &mut Vec<Move>) {
    game.legal_moves_into(moves);
    let home = moves
        .iter()
        .copied()
        .find(|m| (1..=4).contains(&m.dst) && !(1..=4).contains(&m.src));
    let outcome = game.apply_move(home.unwrap_or(Move::DRAW));
    assert!(outcome.success);
}

#[test]
fn drawing_from_an_empty_stock_always_redeals() {
    let mut game = foundation_order_game();
    let mut moves = Vec::new();
    let mut guard = 0;
    while game.stock_len() > 0 {
        guard += 1;
        assert!(guard < 500, "greedy play should empty this stock");
        play_home_or_draw(&mut game, &mut moves);
    }

    let position = game.fingerprint();
    let score = game.score();
    for call in 1..=5 {
        assert_eq!(game.apply(0, 0), Outcome::accepted(-2), "call {call}");
        assert_eq!(game.draw_window(), 0..0);
        assert_eq!(game.drawable_card(), None);
        assert_eq!(game.fingerprint(), position);
    }
    assert_eq!(game.score(), score - 10);
    assert_eq!(game.apply(0, 1), Outcome::REJECTED, "nothing to take");
}

#[test]
fn win_is_detected_only_when_every_foundation_is_full() {
    let mut game = foundation_order_game();
    let mut moves = Vec::new();
    let mut guard = 0;
    while !game.is_won() {
        guard += 1;
        assert!(guard < 500, "greedy play should finish this deal");

        let f = game.foundations();
        assert!(f.iter().any(|&n| n < 13));
        play_home_or_draw(&mut game, &mut moves);
    }

    assert_eq!(game.foundations(), [13; 4]);
    assert_eq!(game.score(), 51 * 20 + 15);
    assert_eq!(game.stock_len(), 0);
    assert_eq!(game.visible(0), &[] as &[Card]);
    assert_conserved(&game);
}

#[test]
fn deal_numbers_name_deals() {
    let deck = klondike_engine::shuffled_deck(12);
    let number = deal_number(&deck);
    let again = deck_from_deal_number(&number).expect("number came from a deck");
    assert_eq!(again, deck);
    assert_eq!(
        GameState::from_deck(&again, GameConfig::default()).expect("default config"),
        GameState::new(12)
    );
}


#[test]
fn klondike_solver_numbers_pick_their_own_deal() {
    let game = GameState::with_scheme(0, DealScheme::KlondikeSolver, GameConfig::default())
        .expect("default config");
    let tops: Vec<String> = (0..7)
        .map(|col| game.visible(col)[0].to_string())
        .collect();
    assert_eq!(tops, ["3D", "8H", "8C", "AC", "4S", "8D", "4H"]);
    assert_eq!(game.hidden_count(6), 6);
    assert_eq!(game.stock_len(), 24);
    assert_conserved(&game);

    assert_eq!(
        GameState::with_scheme(12, DealScheme::Standard, GameConfig::default()),
        Ok(GameState::new(12))
    );
    assert_ne!(
        GameState::with_scheme(12, DealScheme::Legacy, GameConfig::default()),
        Ok(GameState::new(12))
    );
}
