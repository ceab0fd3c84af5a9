use serde::{Deserialize, Serialize};

/// Scoring regime of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundKind {
    Ordinary,
    /// No-trump special game.
    Bezkozyrka,
    /// Bids are made before looking at the cards.
    Dark,
    /// Every trick taken costs points; bids are fixed at zero.
    Misere,
    /// Ordinary scoring, doubled.
    Golda,
}

impl RoundKind {
    /// Special games in the order they are played after the ordinary deals.
    pub const SPECIALS: [RoundKind; 4] = [
        RoundKind::Bezkozyrka,
        RoundKind::Dark,
        RoundKind::Misere,
        RoundKind::Golda,
    ];

    pub fn is_special(self) -> bool {
        !matches!(self, RoundKind::Ordinary)
    }

    pub fn name(self) -> &'static str {
        match self {
            RoundKind::Ordinary => "Ordinary",
            RoundKind::Bezkozyrka => "Bezkozyrka",
            RoundKind::Dark => "Dark",
            RoundKind::Misere => "Misère",
            RoundKind::Golda => "Golda",
        }
    }
}

/// One deal of the game and the entries recorded for it.
///
/// `bids` and `tricks_taken` are index-aligned with the player roster;
/// `None` means the value has not been entered yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub cards_dealt: u8,
    pub kind: RoundKind,
    pub bids: Vec<Option<u8>>,
    pub tricks_taken: Vec<Option<u8>>,
    /// Set once by scoring; never cleared.
    pub(crate) closed: bool,
}

impl Round {
    pub fn new(cards_dealt: u8, kind: RoundKind, player_count: usize) -> Self {
        Self {
            cards_dealt,
            kind,
            bids: vec![None; player_count],
            tricks_taken: vec![None; player_count],
            closed: false,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn player_count(&self) -> usize {
        self.bids.len()
    }

    /// Label shown in the round strip, e.g. `"3. 3 cards"` or `"21. Dark"`.
    pub fn display_label(&self, index: usize) -> String {
        let number = index + 1;
        match self.kind {
            RoundKind::Ordinary if self.cards_dealt == 1 => format!("{number}. 1 card"),
            RoundKind::Ordinary => format!("{number}. {} cards", self.cards_dealt),
            special => format!("{number}. {}", special.name()),
        }
    }

    /// Sum of the bids entered so far.
    pub fn bid_total(&self) -> u32 {
        self.bids.iter().flatten().map(|&b| u32::from(b)).sum()
    }

    pub fn all_bids_entered(&self) -> bool {
        self.bids.iter().all(Option::is_some)
    }

    pub fn all_tricks_entered(&self) -> bool {
        self.tricks_taken.iter().all(Option::is_some)
    }

    pub fn is_complete(&self) -> bool {
        self.all_bids_entered() && self.all_tricks_entered()
    }

    /// Misère rounds have no bidding: every bid is zero.
    pub(crate) fn force_misere_bids(&mut self) {
        if self.kind == RoundKind::Misere && !self.closed {
            self.bids.iter_mut().for_each(|b| *b = Some(0));
        }
    }
}
