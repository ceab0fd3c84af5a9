// Proptest generators for domain types.
// Values are valid by construction: entries always fit the deal size.

use proptest::prelude::*;

use crate::domain::round::RoundKind;
use crate::domain::rules::{MAX_PLAYERS, MIN_PLAYERS};

/// Supported table size.
pub fn player_count() -> impl Strategy<Value = usize> {
    MIN_PLAYERS..=MAX_PLAYERS
}

/// Any scoring regime.
pub fn round_kind() -> impl Strategy<Value = RoundKind> {
    prop_oneof![
        Just(RoundKind::Ordinary),
        Just(RoundKind::Bezkozyrka),
        Just(RoundKind::Dark),
        Just(RoundKind::Misere),
        Just(RoundKind::Golda),
    ]
}

/// Regimes that use the bid-based formula.
pub fn bidding_kind() -> impl Strategy<Value = RoundKind> {
    prop_oneof![
        Just(RoundKind::Ordinary),
        Just(RoundKind::Bezkozyrka),
        Just(RoundKind::Dark),
        Just(RoundKind::Golda),
    ]
}

/// (cards_dealt, bid, tricks) with bid and tricks within the deal.
pub fn deal_bid_tricks() -> impl Strategy<Value = (u8, u8, u8)> {
    (1u8..=9u8).prop_flat_map(|cards| (Just(cards), 0..=cards, 0..=cards))
}

/// Per-player entries for a table, each within `cards`.
pub fn entries(players: usize, cards: u8) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(0..=cards, players)
}

/// Sequence of bid edits for one player: `None` clears, `Some(v)` bids.
pub fn bid_edits(cards: u8, len: usize) -> impl Strategy<Value = Vec<Option<u8>>> {
    prop::collection::vec(prop::option::weighted(0.9, 0..=cards), 1..=len)
}
