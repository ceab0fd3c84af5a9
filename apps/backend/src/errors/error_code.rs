//! Error codes for the scorekeeping API.
//!
//! This module defines all error codes used throughout the application.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the scorekeeping API.
///
/// Each variant maps to a canonical SCREAMING_SNAKE_CASE string that appears
/// in HTTP responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request Validation
    /// Invalid game ID provided
    InvalidGameId,
    /// Bid or trick value outside the dealt range
    OutOfRange,
    /// Third consecutive pass
    PassLimitExceeded,
    /// Bids sum to the number of cards dealt
    IllegalBidTotal,
    /// Bid or trick entries still empty
    MissingEntries,
    /// Misère bids cannot be edited
    MisereBidFixed,
    /// Player index not in the roster
    UnknownPlayer,
    /// Unsupported number of players
    UnsupportedPlayerCount,
    /// Snapshot failed consistency checks
    InvalidSnapshot,
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,

    // Resource Not Found
    /// Game not found
    GameNotFound,
    /// Round not found
    RoundNotFound,
    /// General not found error
    NotFound,

    // Business Logic Conflicts
    /// Round scores are locked
    RoundClosed,
    /// Operation not valid in the current game phase
    PhaseMismatch,
    /// Generic conflict
    Conflict,

    // System Errors
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
    /// Snapshot (de)serialization failure
    SerializationError,
    /// Data corruption detected
    DataCorruption,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    ///
    /// This is the exact string that appears in HTTP responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            // Request Validation
            Self::InvalidGameId => "INVALID_GAME_ID",
            Self::OutOfRange => "OUT_OF_RANGE",
            Self::PassLimitExceeded => "PASS_LIMIT_EXCEEDED",
            Self::IllegalBidTotal => "ILLEGAL_BID_TOTAL",
            Self::MissingEntries => "MISSING_ENTRIES",
            Self::MisereBidFixed => "MISERE_BID_FIXED",
            Self::UnknownPlayer => "UNKNOWN_PLAYER",
            Self::UnsupportedPlayerCount => "UNSUPPORTED_PLAYER_COUNT",
            Self::InvalidSnapshot => "INVALID_SNAPSHOT",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            // Resource Not Found
            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::RoundNotFound => "ROUND_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            // Business Logic Conflicts
            Self::RoundClosed => "ROUND_CLOSED",
            Self::PhaseMismatch => "PHASE_MISMATCH",
            Self::Conflict => "CONFLICT",

            // System Errors
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
            Self::SerializationError => "SERIALIZATION_ERROR",
            Self::DataCorruption => "DATA_CORRUPTION",
        }
    }

    /// Every code, for uniqueness checks.
    pub const ALL: [ErrorCode; 21] = [
        Self::InvalidGameId,
        Self::OutOfRange,
        Self::PassLimitExceeded,
        Self::IllegalBidTotal,
        Self::MissingEntries,
        Self::MisereBidFixed,
        Self::UnknownPlayer,
        Self::UnsupportedPlayerCount,
        Self::InvalidSnapshot,
        Self::ValidationError,
        Self::BadRequest,
        Self::GameNotFound,
        Self::RoundNotFound,
        Self::NotFound,
        Self::RoundClosed,
        Self::PhaseMismatch,
        Self::Conflict,
        Self::Internal,
        Self::ConfigError,
        Self::SerializationError,
        Self::DataCorruption,
    ];
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
