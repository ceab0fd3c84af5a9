use std::ops::RangeInclusive;

use crate::errors::domain::{ConfigKind, DomainError};

pub const MIN_PLAYERS: usize = 3;
pub const MAX_PLAYERS: usize = 6;

/// A player may pass (bid 0) at most this many rounds in a row.
pub const MAX_CONSECUTIVE_PASSES: u8 = 2;

/// Number of standings shown on the podium.
pub const PODIUM_PLACES: usize = 3;

/// History entries kept per player in the recent-history view.
pub const RECENT_HISTORY_LEN: usize = 3;

// Ordinary deal schedules: the hand climbs to the largest deal the deck
// allows for the table size, holds there, then climbs back down to 1.
const DEALS_3_PLAYERS: [u8; 19] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 9, 9, 8, 7, 6, 5, 4, 3, 2, 1];
const DEALS_4_PLAYERS: [u8; 20] = [
    1, 2, 3, 4, 5, 6, 7, 8, 9, 9, 9, 9, 8, 7, 6, 5, 4, 3, 2, 1,
];
const DEALS_5_PLAYERS: [u8; 17] = [1, 2, 3, 4, 5, 6, 7, 7, 7, 7, 7, 6, 5, 4, 3, 2, 1];
const DEALS_6_PLAYERS: [u8; 16] = [1, 2, 3, 4, 5, 6, 6, 6, 6, 6, 6, 5, 4, 3, 2, 1];

/// Ordinary deal sizes for a table of `player_count` players.
pub fn ordinary_deals(player_count: usize) -> Result<&'static [u8], DomainError> {
    match player_count {
        3 => Ok(&DEALS_3_PLAYERS),
        4 => Ok(&DEALS_4_PLAYERS),
        5 => Ok(&DEALS_5_PLAYERS),
        6 => Ok(&DEALS_6_PLAYERS),
        n => Err(DomainError::config(
            ConfigKind::UnsupportedPlayerCount,
            format!("{n} players is not supported (expected {MIN_PLAYERS}..={MAX_PLAYERS})"),
        )),
    }
}

/// Deal size used by every special game: the largest ordinary deal.
pub fn special_deal_size(player_count: usize) -> Result<u8, DomainError> {
    let deals = ordinary_deals(player_count)?;
    Ok(deals.iter().copied().max().unwrap_or(1))
}

pub fn is_supported_player_count(player_count: usize) -> bool {
    (MIN_PLAYERS..=MAX_PLAYERS).contains(&player_count)
}

/// Legal bid and trick values for a deal of `cards_dealt` cards.
pub fn valid_value_range(cards_dealt: u8) -> RangeInclusive<u8> {
    0..=cards_dealt
}
