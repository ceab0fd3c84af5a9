//! Game HTTP routes.
//!
//! Every endpoint that returns a game sends the stored snapshot together
//! with the presentation view, so a client never recomputes anything.
//! Mutating endpoints also list the transitions the request caused.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::game_transition::{GameEvent, GameTransition};
use crate::domain::player_view::{game_view, GameView};
use crate::domain::ranking::{podium, Podium, Standing};
use crate::domain::snapshot::GameSnapshot;
use crate::domain::state::{Phase, PlayerId};
use crate::error::AppError;
use crate::extractors::game_id::GameId;
use crate::extractors::validated_json::ValidatedJson;
use crate::services::games::{GameRecord, GameSummary};
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
pub struct GameResponse {
    pub game_id: Uuid,
    pub snapshot: GameSnapshot,
    pub view: GameView,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub transitions: Vec<GameTransition>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl GameResponse {
    fn new(game: GameRecord, transitions: Vec<GameTransition>) -> Self {
        Self {
            game_id: game.id,
            snapshot: GameSnapshot::capture(&game.state),
            view: game_view(&game.state),
            transitions,
            created_at: game.created_at,
            updated_at: game.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
struct GameList {
    games: Vec<GameSummary>,
}

#[derive(Debug, Serialize)]
struct StandingsResponse {
    game_id: Uuid,
    phase: Phase,
    standings: Vec<Standing>,
    podium: Podium,
}

#[derive(Debug, Deserialize)]
pub struct StartRequest {
    pub player_names: Vec<String>,
}

/// Bid or tricks entry; `value: null` (or omitted) clears it.
#[derive(Debug, Deserialize)]
pub struct EntryRequest {
    pub player: PlayerId,
    #[serde(default)]
    pub value: Option<u8>,
}

#[derive(Debug, Deserialize)]
pub struct GoToRequest {
    pub round_index: usize,
}

/// POST /api/games
async fn create_game(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let game = app_state.games.create().await?;
    Ok(HttpResponse::Created().json(GameResponse::new(game, Vec::new())))
}

/// GET /api/games
async fn list_games(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let games = app_state.games.list().await?;
    Ok(HttpResponse::Ok().json(GameList { games }))
}

/// GET /api/games/{game_id}
async fn get_game(
    game_id: GameId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let game = app_state.games.load(game_id.0).await?;
    Ok(HttpResponse::Ok().json(GameResponse::new(game, Vec::new())))
}

/// PUT /api/games/{game_id}
///
/// Replace the game with a client-held snapshot, creating it if needed.
async fn put_game(
    game_id: GameId,
    body: ValidatedJson<GameSnapshot>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let game = app_state
        .games
        .save_snapshot(game_id.0, body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(GameResponse::new(game, Vec::new())))
}

/// DELETE /api/games/{game_id}
async fn delete_game(
    game_id: GameId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    app_state.games.delete(game_id.0).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// POST /api/games/{game_id}/start
async fn start_game(
    game_id: GameId,
    body: ValidatedJson<StartRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let event = GameEvent::Start {
        player_names: body.into_inner().player_names,
    };
    apply_event(&app_state, game_id, event).await
}

/// POST /api/games/{game_id}/bids
async fn set_bid(
    game_id: GameId,
    body: ValidatedJson<EntryRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let EntryRequest { player, value } = body.into_inner();
    apply_event(&app_state, game_id, GameEvent::SetBid { player, value }).await
}

/// POST /api/games/{game_id}/tricks
async fn set_tricks(
    game_id: GameId,
    body: ValidatedJson<EntryRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let EntryRequest { player, value } = body.into_inner();
    apply_event(&app_state, game_id, GameEvent::SetTricks { player, value }).await
}

/// POST /api/games/{game_id}/goto
async fn go_to_round(
    game_id: GameId,
    body: ValidatedJson<GoToRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let round_index = body.round_index;
    apply_event(&app_state, game_id, GameEvent::GoToRound { round_index }).await
}

/// POST /api/games/{game_id}/previous
async fn previous_round(
    game_id: GameId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    apply_event(&app_state, game_id, GameEvent::PreviousRound).await
}

/// POST /api/games/{game_id}/advance
async fn advance_round(
    game_id: GameId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    apply_event(&app_state, game_id, GameEvent::AdvanceRound).await
}

/// POST /api/games/{game_id}/end
async fn end_game(
    game_id: GameId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    apply_event(&app_state, game_id, GameEvent::EndGameEarly).await
}

/// GET /api/games/{game_id}/standings
///
/// Current ranking; available at any point, not only after the game ends.
async fn standings(
    game_id: GameId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let game = app_state.games.load(game_id.0).await?;
    Ok(HttpResponse::Ok().json(StandingsResponse {
        game_id: game.id,
        phase: game.state.phase(),
        standings: game.state.standings(),
        podium: podium(game.state.players()),
    }))
}

async fn apply_event(
    app_state: &AppState,
    game_id: GameId,
    event: GameEvent,
) -> Result<HttpResponse, AppError> {
    let (game, transitions) = app_state.games.apply_event(game_id.0, event).await?;
    Ok(HttpResponse::Ok().json(GameResponse::new(game, transitions)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::post().to(create_game))
            .route(web::get().to(list_games)),
    )
    .service(
        web::resource("/{game_id}")
            .route(web::get().to(get_game))
            .route(web::put().to(put_game))
            .route(web::delete().to(delete_game)),
    )
    .route("/{game_id}/start", web::post().to(start_game))
    .route("/{game_id}/bids", web::post().to(set_bid))
    .route("/{game_id}/tricks", web::post().to(set_tricks))
    .route("/{game_id}/goto", web::post().to(go_to_round))
    .route("/{game_id}/previous", web::post().to(previous_round))
    .route("/{game_id}/advance", web::post().to(advance_round))
    .route("/{game_id}/end", web::post().to(end_game))
    .route("/{game_id}/standings", web::get().to(standings));
}
