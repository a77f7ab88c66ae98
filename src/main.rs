//src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::{auth_guard, tenant_guard};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas públicas de autenticação
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // Rotas do próprio usuário (exigem apenas o token)
    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .route("/me/permissions", get(handlers::auth::get_my_permissions))
        .route("/me/menu", get(handlers::auth::get_my_menu))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Rotas escopadas ao tenant (exigem token + cabeçalho x-tenant-id)
    let client_routes = Router::new()
        .route(
            "/directions",
            post(handlers::org::create_direction).get(handlers::org::list_directions),
        )
        .route(
            "/directions/{id}",
            put(handlers::org::update_direction).delete(handlers::org::delete_direction),
        )
        .route(
            "/departments",
            post(handlers::org::create_department).get(handlers::org::list_departments),
        )
        .route(
            "/departments/{id}",
            put(handlers::org::update_department).delete(handlers::org::delete_department),
        )
        .route(
            "/sections",
            post(handlers::org::create_section).get(handlers::org::list_sections),
        )
        .route(
            "/sections/{id}",
            put(handlers::org::update_section).delete(handlers::org::delete_section),
        )
        .route(
            "/users",
            post(handlers::users::create_user).get(handlers::users::list_users),
        )
        .route(
            "/users/{id}",
            put(handlers::users::update_user).delete(handlers::users::deactivate_user),
        )
        .route(
            "/companies",
            post(handlers::clients::create_client).get(handlers::clients::list_clients),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            tenant_guard,
        ));

    let hours_bank_routes = Router::new()
        .route(
            "/",
            post(handlers::hours_banks::create_bank).get(handlers::hours_banks::list_banks),
        )
        .route("/{id}", get(handlers::hours_banks::get_bank))
        .route("/{id}/add", post(handlers::hours_banks::add_hours))
        .route("/{id}/consume", post(handlers::hours_banks::consume_hours))
        .route(
            "/{id}/transactions",
            get(handlers::hours_banks::list_transactions),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            tenant_guard,
        ));

    let catalog_routes = Router::new()
        .route(
            "/categories",
            post(handlers::catalog::create_category).get(handlers::catalog::list_categories),
        )
        .route(
            "/categories/{id}",
            delete(handlers::catalog::delete_category),
        )
        .route(
            "/categories/{id}/items",
            get(handlers::catalog::list_items_by_category),
        )
        .route(
            "/items",
            post(handlers::catalog::create_item).get(handlers::catalog::list_items),
        )
        .route(
            "/items/{id}",
            put(handlers::catalog::update_item).delete(handlers::catalog::delete_item),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            tenant_guard,
        ));

    let asset_routes = Router::new()
        .route(
            "/",
            post(handlers::inventory::create_asset).get(handlers::inventory::list_assets),
        )
        .route(
            "/{id}",
            put(handlers::inventory::update_asset).delete(handlers::inventory::delete_asset),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            tenant_guard,
        ));

    let license_routes = Router::new()
        .route(
            "/",
            post(handlers::inventory::create_license).get(handlers::inventory::list_licenses),
        )
        .route(
            "/{id}",
            put(handlers::inventory::update_license).delete(handlers::inventory::delete_license),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            tenant_guard,
        ));

    let notification_routes = Router::new()
        .route("/", get(handlers::notifications::list_notifications))
        .route("/{id}/read", put(handlers::notifications::mark_read))
        .route("/read-all", put(handlers::notifications::mark_all_read))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api/users", user_routes)
        .nest("/api/client", client_routes)
        .nest("/api/hours-banks", hours_bank_routes)
        .nest("/api/catalog", catalog_routes)
        .nest("/api/assets", asset_routes)
        .nest("/api/licenses", license_routes)
        .nest("/api/notifications", notification_routes)
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", docs::ApiDoc::openapi()),
        )
        .with_state(app_state);

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
