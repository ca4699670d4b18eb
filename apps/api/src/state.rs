use sqlx::PgPool;

use crate::auth::tokens::TokenIssuer;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Signs and verifies bearer tokens; keys derive from `JWT_SECRET`.
    pub tokens: TokenIssuer,
}

impl AppState {
    pub fn new(db: PgPool, config: &Config) -> Self {
        Self {
            db,
            tokens: TokenIssuer::from_config(config),
        }
    }
}
