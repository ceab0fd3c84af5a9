//! Bid and trick entry validation.

use crate::domain::round::{Round, RoundKind};
use crate::domain::rules::{valid_value_range, MAX_CONSECUTIVE_PASSES};
use crate::domain::state::PlayerId;
use crate::errors::domain::{DomainError, ValidationKind};

/// Check a proposed bid for `player` in `round`.
///
/// `None` clears the entry and is always allowed. `neighbouring_passes` is
/// the number of zero bids the player already has in the rounds directly
/// before and after this one; a zero bid that would make the run longer
/// than `MAX_CONSECUTIVE_PASSES` is rejected.
pub fn validate_bid_edit(
    round: &Round,
    player: PlayerId,
    proposed: Option<u8>,
    player_name: &str,
    neighbouring_passes: u8,
) -> Result<(), DomainError> {
    let Some(value) = proposed else {
        return Ok(());
    };

    if !valid_value_range(round.cards_dealt).contains(&value) {
        return Err(DomainError::validation(
            ValidationKind::OutOfRange,
            format!(
                "Bid {value} for player {player} must be between 0 and {}",
                round.cards_dealt
            ),
        ));
    }

    if value == 0 && neighbouring_passes >= MAX_CONSECUTIVE_PASSES {
        return Err(DomainError::validation(
            ValidationKind::PassLimitExceeded,
            format!("{player_name} cannot pass more than {MAX_CONSECUTIVE_PASSES} times in a row"),
        ));
    }

    Ok(())
}

/// Check a proposed tricks-taken entry.
pub fn validate_trick_edit(
    round: &Round,
    player: PlayerId,
    proposed: Option<u8>,
) -> Result<(), DomainError> {
    match proposed {
        Some(value) if !valid_value_range(round.cards_dealt).contains(&value) => {
            Err(DomainError::validation(
                ValidationKind::OutOfRange,
                format!(
                    "Tricks {value} for player {player} must be between 0 and {}",
                    round.cards_dealt
                ),
            ))
        }
        _ => Ok(()),
    }
}

/// Zero bids by `player` in the rounds right before `index`.
///
/// Misère rounds are skipped: their zero bids are forced, not chosen.
pub fn passes_before(rounds: &[Round], index: usize, player: PlayerId) -> u8 {
    let earlier = &rounds[..index.min(rounds.len())];
    count_passes(earlier.iter().rev(), player)
}

/// Zero bids by `player` in the rounds right after `index`.
pub fn passes_after(rounds: &[Round], index: usize, player: PlayerId) -> u8 {
    count_passes(rounds.iter().skip(index.saturating_add(1)), player)
}

/// Current pass streak for `player` at `index`: the passes before it plus
/// the round's own zero bid, if entered.
pub fn pass_streak(rounds: &[Round], index: usize, player: PlayerId) -> u8 {
    let own = rounds.get(index).is_some_and(|r| is_pass(r, player));
    passes_before(rounds, index, player).saturating_add(u8::from(own))
}

/// Longest run of zero bids `player` has anywhere in `rounds`.
pub fn longest_pass_run(rounds: &[Round], player: PlayerId) -> u8 {
    let mut longest = 0u8;
    let mut run = 0u8;
    for round in rounds.iter().filter(|r| r.kind != RoundKind::Misere) {
        run = if is_pass(round, player) {
            run.saturating_add(1)
        } else {
            0
        };
        longest = longest.max(run);
    }
    longest
}

fn count_passes<'a>(rounds: impl Iterator<Item = &'a Round>, player: PlayerId) -> u8 {
    let run = rounds
        .filter(|r| r.kind != RoundKind::Misere)
        .take_while(|r| is_pass(r, player))
        .count();
    u8::try_from(run).unwrap_or(u8::MAX)
}

fn is_pass(round: &Round, player: PlayerId) -> bool {
    round.kind != RoundKind::Misere && round.bids.get(player) == Some(&Some(0))
}

/// True when every bid is in and they add up to the cards dealt.
///
/// That total is never allowed: somebody must miss their contract.
pub fn total_bids_equals_cards(round: &Round) -> bool {
    round.all_bids_entered() && round.bid_total() == u32::from(round.cards_dealt)
}

/// Every bid and trick entry is filled in.
pub fn ensure_entries_complete(round: &Round) -> Result<(), DomainError> {
    if round.is_complete() {
        return Ok(());
    }
    let missing_bids = round.bids.iter().filter(|b| b.is_none()).count();
    let missing_tricks = round.tricks_taken.iter().filter(|t| t.is_none()).count();
    Err(DomainError::validation(
        ValidationKind::MissingEntries,
        format!("{missing_bids} bid(s) and {missing_tricks} trick count(s) still missing"),
    ))
}

/// The round's bids do not add up to the cards dealt.
///
/// Round-level failure: no individual player is blamed.
pub fn ensure_bid_total_legal(round: &Round) -> Result<(), DomainError> {
    if total_bids_equals_cards(round) {
        return Err(DomainError::validation(
            ValidationKind::IllegalBidTotal,
            format!(
                "Total bids ({}) cannot equal the number of cards dealt ({})",
                round.bid_total(),
                round.cards_dealt
            ),
        ));
    }
    Ok(())
}
