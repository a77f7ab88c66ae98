// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{
        CatalogRepository, ClientRepository, HoursBankRepository, InventoryRepository,
        NotificationRepository, OrgRepository, UserRepository,
    },
    services::{
        auth::AuthService, catalog::CatalogService, hours_bank::HoursBankService,
        inventory::InventoryService, org::OrgService, permissions,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub user_repo: UserRepository,
    pub client_repo: ClientRepository,
    pub notification_repo: NotificationRepository,
    pub org_service: OrgService,
    pub hours_bank_service: HoursBankService,
    pub catalog_service: CatalogService,
    pub inventory_service: InventoryService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        // As tabelas de permissão são estáticas: qualquer alias apontando
        // para um token inexistente é erro de programação e derruba o boot.
        if let Err(problems) = permissions::validate_tables() {
            for problem in &problems {
                tracing::error!("Tabela de permissões inconsistente: {}", problem);
            }
            anyhow::bail!("tabelas de permissão inconsistentes ({} problema(s))", problems.len());
        }

        let database_url = env::var("DATABASE_URL")?;
        let jwt_secret = env::var("JWT_SECRET")?;

        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let client_repo = ClientRepository::new(db_pool.clone());
        let notification_repo = NotificationRepository::new(db_pool.clone());

        let auth_service = AuthService::new(user_repo.clone(), jwt_secret, db_pool.clone());
        let org_service = OrgService::new(OrgRepository::new(db_pool.clone()));
        let hours_bank_service = HoursBankService::new(
            HoursBankRepository::new(db_pool.clone()),
            client_repo.clone(),
            db_pool.clone(),
        );
        let catalog_service = CatalogService::new(CatalogRepository::new(db_pool.clone()));
        let inventory_service = InventoryService::new(InventoryRepository::new(db_pool.clone()));

        Ok(Self {
            db_pool,
            auth_service,
            user_repo,
            client_repo,
            notification_repo,
            org_service,
            hours_bank_service,
            catalog_service,
            inventory_service,
        })
    }
}
