use serde::{Deserialize, Serialize};

use crate::domain::rules::PODIUM_PLACES;
use crate::domain::state::{PlayerId, PlayerState};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    /// 1-based position in the sorted list.
    pub place: usize,
    pub player: PlayerId,
    pub name: String,
    pub total_score: i32,
}

/// Standings split for the results screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Podium {
    pub podium: Vec<Standing>,
    pub others: Vec<Standing>,
}

/// Sort players by total score, highest first.
///
/// The sort is stable: tied players keep their roster order.
pub fn rank(players: &[PlayerState]) -> Vec<Standing> {
    let mut order: Vec<PlayerId> = (0..players.len()).collect();
    order.sort_by(|&a, &b| players[b].total_score.cmp(&players[a].total_score));

    order
        .into_iter()
        .enumerate()
        .map(|(i, player)| Standing {
            place: i + 1,
            player,
            name: players[player].name.clone(),
            total_score: players[player].total_score,
        })
        .collect()
}

pub fn podium(players: &[PlayerState]) -> Podium {
    let mut podium = rank(players);
    let others = podium.split_off(PODIUM_PLACES.min(podium.len()));
    Podium { podium, others }
}
