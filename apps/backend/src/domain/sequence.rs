//! Deterministic round list for a table.

use crate::domain::round::{Round, RoundKind};
use crate::domain::rules::{ordinary_deals, special_deal_size};
use crate::errors::domain::DomainError;

/// Build every round of a game for `player_count` players.
///
/// Ordinary deals come first, following the table's schedule. Then each
/// special game is played once per player, at the largest ordinary deal size.
pub fn generate_rounds(player_count: usize) -> Result<Vec<Round>, DomainError> {
    let deals = ordinary_deals(player_count)?;
    let special_cards = special_deal_size(player_count)?;

    let ordinary = deals
        .iter()
        .map(|&cards| Round::new(cards, RoundKind::Ordinary, player_count));

    let specials = RoundKind::SPECIALS.iter().flat_map(|&kind| {
        (0..player_count).map(move |_| Round::new(special_cards, kind, player_count))
    });

    Ok(ordinary.chain(specials).collect())
}
