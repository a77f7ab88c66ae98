// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;
use crate::services;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,

        // --- Users ---
        handlers::auth::get_me,
        handlers::auth::get_my_permissions,
        handlers::auth::get_my_menu,
        handlers::users::list_users,
        handlers::users::create_user,
        handlers::users::update_user,
        handlers::users::deactivate_user,

        // --- Organização ---
        handlers::org::create_direction,
        handlers::org::list_directions,
        handlers::org::update_direction,
        handlers::org::delete_direction,
        handlers::org::create_department,
        handlers::org::list_departments,
        handlers::org::update_department,
        handlers::org::delete_department,
        handlers::org::create_section,
        handlers::org::list_sections,
        handlers::org::update_section,
        handlers::org::delete_section,

        // --- Clientes ---
        handlers::clients::create_client,
        handlers::clients::list_clients,

        // --- Banco de Horas ---
        handlers::hours_banks::create_bank,
        handlers::hours_banks::list_banks,
        handlers::hours_banks::get_bank,
        handlers::hours_banks::add_hours,
        handlers::hours_banks::consume_hours,
        handlers::hours_banks::list_transactions,

        // --- Catálogo ---
        handlers::catalog::create_category,
        handlers::catalog::list_categories,
        handlers::catalog::delete_category,
        handlers::catalog::create_item,
        handlers::catalog::list_items,
        handlers::catalog::list_items_by_category,
        handlers::catalog::update_item,
        handlers::catalog::delete_item,

        // --- Inventário ---
        handlers::inventory::create_asset,
        handlers::inventory::list_assets,
        handlers::inventory::update_asset,
        handlers::inventory::delete_asset,
        handlers::inventory::create_license,
        handlers::inventory::list_licenses,
        handlers::inventory::update_license,
        handlers::inventory::delete_license,

        // --- Notificações ---
        handlers::notifications::list_notifications,
        handlers::notifications::mark_read,
        handlers::notifications::mark_all_read,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::Role,
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,
            services::permissions::MenuItem,

            // --- Organização ---
            models::org::Direction,
            models::org::Department,
            models::org::Section,
            models::org::SectionWithHierarchy,
            models::org::ClientCompany,
            handlers::org::CreateDirectionPayload,
            handlers::org::UpdateDirectionPayload,
            handlers::org::CreateDepartmentPayload,
            handlers::org::UpdateDepartmentPayload,
            handlers::org::CreateSectionPayload,
            handlers::org::UpdateSectionPayload,

            // --- Users ---
            handlers::users::CreateUserPayload,
            handlers::users::UpdateUserPayload,

            // --- Clientes ---
            handlers::clients::CreateClientPayload,

            // --- Banco de Horas ---
            models::hours_bank::TransactionKind,
            models::hours_bank::HoursBank,
            models::hours_bank::HoursBankTransaction,
            models::hours_bank::HoursBankDetail,
            handlers::hours_banks::CreateBankPayload,
            handlers::hours_banks::AddHoursPayload,
            handlers::hours_banks::ConsumeHoursPayload,

            // --- Catálogo ---
            models::catalog::CatalogItemType,
            models::catalog::CatalogCategory,
            models::catalog::CatalogItem,
            handlers::catalog::CreateCategoryPayload,
            handlers::catalog::CreateItemPayload,
            handlers::catalog::UpdateItemPayload,

            // --- Inventário ---
            models::inventory::AssetKind,
            models::inventory::AssetStatus,
            models::inventory::LicenseStatus,
            models::inventory::Asset,
            models::inventory::License,
            handlers::inventory::CreateAssetPayload,
            handlers::inventory::UpdateAssetPayload,
            handlers::inventory::CreateLicensePayload,
            handlers::inventory::UpdateLicensePayload,

            // --- Notificações ---
            models::notification::Notification,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e Registro"),
        (name = "Users", description = "Usuários, Permissões e Menu"),
        (name = "Organização", description = "Diretorias, Departamentos e Seções"),
        (name = "Clientes", description = "Empresas Clientes"),
        (name = "Banco de Horas", description = "Saldos Contratados e Trilha de Transações"),
        (name = "Catálogo", description = "Catálogo de Serviços"),
        (name = "Inventário", description = "Ativos e Licenças"),
        (name = "Notificações", description = "Notificações do Usuário")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
