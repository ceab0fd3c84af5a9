use actix_web::web;

pub mod games;
pub mod health;

/// Register every route. Shared by `main.rs` and the integration tests so
/// both serve the same paths.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check: /health
    cfg.configure(health::configure_routes);

    // Games: /api/games/**
    cfg.service(web::scope("/api/games").configure(games::configure_routes));
}
