// src/config.rs

use sqlx::{PgPool, postgres::PgPoolOptions};
use std::{env, time::Duration};

use crate::{
    db::{
        DashboardRepository, HotelRepository, PropertyRepository, RbacRepository, UserRepository,
    },
    services::{AuthService, HotelService, RbacService, TokenConfig, TokenService},
};

// O estado compartilhado da aplicação. Tudo que os handlers precisam
// (pool, repositórios, serviços) é montado uma única vez aqui e injetado —
// sem singletons de módulo.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub token_service: TokenService,
    pub auth_service: AuthService,
    pub rbac_service: RbacService,
    pub hotel_service: HotelService,
    pub user_repo: UserRepository,
    pub rbac_repo: RbacRepository,
    pub property_repo: PropertyRepository,
    pub hotel_repo: HotelRepository,
    pub dashboard_repo: DashboardRepository,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")?;
        let token_config = TokenConfig::from_env()?;

        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Database connection established");

        Ok(Self::assemble(db_pool, token_config))
    }

    // Monta o grafo de dependências. Separado de new() para os testes de
    // integração poderem usar uma pool lazy (sem banco de verdade).
    pub fn assemble(db_pool: PgPool, token_config: TokenConfig) -> Self {
        let token_service = TokenService::new(token_config);

        let user_repo = UserRepository::new(db_pool.clone());
        let rbac_repo = RbacRepository::new(db_pool.clone());
        let property_repo = PropertyRepository::new(db_pool.clone());
        let hotel_repo = HotelRepository::new(db_pool.clone());
        let dashboard_repo = DashboardRepository::new(db_pool.clone());

        let auth_service = AuthService::new(user_repo.clone(), token_service.clone());
        let rbac_service = RbacService::new(rbac_repo.clone(), db_pool.clone());
        let hotel_service = HotelService::new(hotel_repo.clone(), db_pool.clone());

        Self {
            db_pool,
            token_service,
            auth_service,
            rbac_service,
            hotel_service,
            user_repo,
            rbac_repo,
            property_repo,
            hotel_repo,
            dashboard_repo,
        }
    }
}
