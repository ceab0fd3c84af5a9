use actix_web::{web, App, HttpServer};
use backend::config::ServerConfig;
use backend::middleware::cors::cors_middleware;
use backend::middleware::request_trace::RequestTrace;
use backend::middleware::structured_logger::StructuredLogger;
use backend::middleware::trace_span::TraceSpan;
use backend::routes;
use backend::services::spawn_stale_sweeper;
use backend::state::app_state::AppState;
use tracing::info;

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment
    // (docker env_file, or sourced manually for local development).
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Invalid configuration: {}", e.detail());
            std::process::exit(1);
        }
    };

    let app_state = AppState::in_memory(config.clone());
    let sweeper = spawn_stale_sweeper(
        app_state.games.clone(),
        config.game_ttl(),
        config.sweep_interval(),
    );

    info!(
        host = %config.host,
        port = config.port,
        game_ttl_hours = config.game_ttl_hours,
        sweep_interval_secs = config.sweep_interval_secs,
        "starting scoring backend"
    );

    let data = web::Data::new(app_state);
    let origins = config.cors_allowed_origins.clone();

    let result = HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware(&origins))
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await;

    sweeper.abort();
    result
}
