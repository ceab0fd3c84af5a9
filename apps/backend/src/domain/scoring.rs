use crate::domain::bidding::{ensure_bid_total_legal, ensure_entries_complete};
use crate::domain::round::{Round, RoundKind};
use crate::errors::domain::DomainError;

/// Points for a single player's result in a round of `kind`.
pub fn score_for(kind: RoundKind, bid: u8, tricks: u8) -> i32 {
    let bid = i32::from(bid);
    let tricks = i32::from(tricks);

    let base = match kind {
        RoundKind::Misere => return tricks * -10,
        RoundKind::Ordinary | RoundKind::Bezkozyrka | RoundKind::Dark | RoundKind::Golda => {
            if bid == 0 {
                if tricks == 0 {
                    5
                } else {
                    tricks
                }
            } else if tricks == bid {
                bid * 10
            } else if tricks > bid {
                tricks
            } else {
                (bid - tricks) * -10
            }
        }
    };

    match kind {
        RoundKind::Golda => base * 2,
        _ => base,
    }
}

/// Score every player's result and close the round.
///
/// Returns `Ok(None)` without touching anything when the round is already
/// closed. Entries must be complete and the bid total legal.
pub fn compute_round_scores(round: &mut Round) -> Result<Option<Vec<i32>>, DomainError> {
    if round.closed {
        return Ok(None);
    }
    ensure_entries_complete(round)?;
    ensure_bid_total_legal(round)?;

    let scores = round
        .bids
        .iter()
        .zip(&round.tricks_taken)
        .map(|(bid, tricks)| score_for(round.kind, bid.unwrap_or(0), tricks.unwrap_or(0)))
        .collect();

    round.closed = true;
    Ok(Some(scores))
}
