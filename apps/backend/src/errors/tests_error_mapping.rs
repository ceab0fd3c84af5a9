// Unit tests for error mapping - pure domain logic without HTTP plumbing
use crate::errors::domain::{ConfigKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind};
use crate::{AppError, ErrorCode};

#[test]
fn maps_rule_violations_to_422() {
    for (kind, code) in [
        (ValidationKind::OutOfRange, ErrorCode::OutOfRange),
        (ValidationKind::PassLimitExceeded, ErrorCode::PassLimitExceeded),
        (ValidationKind::IllegalBidTotal, ErrorCode::IllegalBidTotal),
        (ValidationKind::MissingEntries, ErrorCode::MissingEntries),
        (ValidationKind::MisereBidFixed, ErrorCode::MisereBidFixed),
        (ValidationKind::UnknownPlayer, ErrorCode::UnknownPlayer),
        (ValidationKind::InvalidSnapshot, ErrorCode::InvalidSnapshot),
    ] {
        let app: AppError = DomainError::validation(kind, "bad input").into();
        assert_eq!(app.code(), code);
        assert_eq!(app.status().as_u16(), 422);
        assert_eq!(app.detail(), "bad input");
    }
}

#[test]
fn maps_state_conflicts_to_409() {
    let closed: AppError =
        DomainError::validation(ValidationKind::RoundClosed, "round 3 is closed").into();
    assert_eq!(closed.code(), ErrorCode::RoundClosed);
    assert_eq!(closed.status().as_u16(), 409);

    let phase: AppError =
        DomainError::validation(ValidationKind::PhaseMismatch, "game finished").into();
    assert_eq!(phase.code(), ErrorCode::PhaseMismatch);
    assert_eq!(phase.status().as_u16(), 409);
}

#[test]
fn maps_invalid_game_id_to_400() {
    let app: AppError = DomainError::validation(ValidationKind::InvalidGameId, "nope").into();
    assert_eq!(app.code(), ErrorCode::InvalidGameId);
    assert_eq!(app.status().as_u16(), 400);
}

#[test]
fn maps_unsupported_player_count_to_400() {
    let app: AppError =
        DomainError::config(ConfigKind::UnsupportedPlayerCount, "7 players").into();
    assert_eq!(app.code(), ErrorCode::UnsupportedPlayerCount);
    assert_eq!(app.status().as_u16(), 400);
}

#[test]
fn maps_not_found() {
    let app: AppError = DomainError::not_found(NotFoundKind::Game, "no game").into();
    assert_eq!(app.code().as_str(), "GAME_NOT_FOUND");
    assert_eq!(app.status().as_u16(), 404);

    let app: AppError = DomainError::not_found(NotFoundKind::Round, "no round").into();
    assert_eq!(app.code().as_str(), "ROUND_NOT_FOUND");
}

#[test]
fn maps_infra_to_500() {
    let app: AppError =
        DomainError::infra(InfraErrorKind::Serialization, "bad json").into();
    assert_eq!(app.code(), ErrorCode::SerializationError);
    assert_eq!(app.status().as_u16(), 500);

    let app: AppError =
        DomainError::infra(InfraErrorKind::DataCorruption, "garbled").into();
    assert_eq!(app.code(), ErrorCode::DataCorruption);
    assert_eq!(app.status().as_u16(), 500);
}

#[test]
fn domain_error_display_includes_kind_and_detail() {
    let e = DomainError::validation(ValidationKind::PassLimitExceeded, "third pass");
    let rendered = e.to_string();
    assert!(rendered.contains("PassLimitExceeded"));
    assert!(rendered.contains("third pass"));
    assert_eq!(e.validation_kind(), Some(&ValidationKind::PassLimitExceeded));
}
