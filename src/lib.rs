pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::{
    config::Config,
    middleware::auth::JwtKeys,
    services::{
        admin_service::AdminService, auth_service::AuthService,
        candidate_service::CandidateService, import_service::ImportService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Arc<Config>,
    pub jwt_keys: JwtKeys,
    pub auth_service: AuthService,
    pub candidate_service: CandidateService,
    pub import_service: ImportService,
    pub admin_service: AdminService,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: Config) -> Self {
        let jwt_keys = JwtKeys::new(&config.jwt_secret, config.jwt_ttl_minutes);

        let auth_service = AuthService::new(pool.clone(), jwt_keys.clone());
        let candidate_service = CandidateService::new(pool.clone());
        let import_service = ImportService::new(pool.clone());
        let admin_service = AdminService::new(pool.clone());

        Self {
            pool,
            config: Arc::new(config),
            jwt_keys,
            auth_service,
            candidate_service,
            import_service,
            admin_service,
        }
    }
}
