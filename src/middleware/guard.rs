// src/middleware/guard.rs
//
// O Guard de Rota: uma máquina de decisão pura (testável sem servidor) e o
// extrator Axum que a aplica. Três estados de sessão: sem token (redireciona
// para o login), carregando (nada é liberado) e resolvido (avalia o requisito
// declarado; administradores curto-circuitam para Permitido).

use std::marker::PhantomData;

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::{
    common::error::AppError,
    services::permissions::{
        EffectivePermissions, DEFAULT_FALLBACK_ROUTE, LOGIN_ROUTE,
    },
};

// =========================================================================
//  MÁQUINA DE DECISÃO (pura)
// =========================================================================

/// Estado da sessão no momento da avaliação.
#[derive(Debug, Clone)]
pub enum SessionState<'a> {
    /// Sem token: qualquer rota protegida redireciona para /login.
    Unauthenticated,
    /// Token presente, permissões ainda não resolvidas: bloqueia, não libera.
    Loading,
    /// Permissões resolvidas.
    Ready(&'a EffectivePermissions),
}

/// Requisito declarado por uma rota. A avaliação segue a ordem:
/// `resource` primeiro, depois `permission` única, depois a lista
/// `permissions` com `require_all`, e por fim libera se nada foi declarado.
#[derive(Debug, Clone, Default)]
pub struct RouteRequirement {
    pub resource: Option<String>,
    pub permission: Option<String>,
    pub permissions: Vec<String>,
    pub require_all: bool,
    pub fallback: Option<String>,
}

impl RouteRequirement {
    /// Rota sem requisito: qualquer usuário autenticado passa.
    pub fn open() -> Self {
        Self::default()
    }

    pub fn resource(resource: &str) -> Self {
        Self {
            resource: Some(resource.to_string()),
            ..Self::default()
        }
    }

    pub fn permission(token: &str) -> Self {
        Self {
            permission: Some(token.to_string()),
            ..Self::default()
        }
    }

    pub fn any_of(tokens: &[&str]) -> Self {
        Self {
            permissions: tokens.iter().map(|t| t.to_string()).collect(),
            require_all: false,
            ..Self::default()
        }
    }

    pub fn all_of(tokens: &[&str]) -> Self {
        Self {
            permissions: tokens.iter().map(|t| t.to_string()).collect(),
            require_all: true,
            ..Self::default()
        }
    }

    pub fn with_fallback(mut self, route: &str) -> Self {
        self.fallback = Some(route.to_string());
        self
    }

    pub fn fallback_route(&self) -> &str {
        self.fallback.as_deref().unwrap_or(DEFAULT_FALLBACK_ROUTE)
    }

    /// Descrição curta do requisito, usada na mensagem de acesso negado.
    pub fn describe(&self) -> String {
        if let Some(resource) = &self.resource {
            return format!("{}.*", resource);
        }
        if let Some(token) = &self.permission {
            return token.clone();
        }
        if !self.permissions.is_empty() {
            let sep = if self.require_all { " + " } else { " | " };
            return self.permissions.join(sep);
        }
        "autenticação".to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    RedirectToLogin,
    Loading,
    Allow,
    Redirect(String),
}

/// Avalia o requisito contra o estado da sessão.
pub fn decide(state: &SessionState<'_>, requirement: &RouteRequirement) -> GuardDecision {
    let perms = match state {
        SessionState::Unauthenticated => return GuardDecision::RedirectToLogin,
        SessionState::Loading => return GuardDecision::Loading,
        SessionState::Ready(perms) => perms,
    };

    if perms.is_admin() {
        return GuardDecision::Allow;
    }

    let allowed = if let Some(resource) = &requirement.resource {
        perms.can_access_resource(resource)
    } else if let Some(token) = &requirement.permission {
        perms.has_permission(token)
    } else if !requirement.permissions.is_empty() {
        let tokens: Vec<&str> = requirement.permissions.iter().map(String::as_str).collect();
        if requirement.require_all {
            perms.has_all(&tokens)
        } else {
            perms.has_any(&tokens)
        }
    } else {
        true
    };

    if allowed {
        GuardDecision::Allow
    } else {
        GuardDecision::Redirect(requirement.fallback_route().to_string())
    }
}

/// Para onde o estado não autenticado aponta.
pub fn login_route() -> &'static str {
    LOGIN_ROUTE
}

// =========================================================================
//  EXTRATOR AXUM
// =========================================================================

/// O Trait que define o requisito de acesso de um grupo de rotas.
pub trait AccessRule: Send + Sync + 'static {
    fn requirement() -> RouteRequirement;
}

/// O Extrator (Guardião). O `auth_guard` já resolveu as permissões e as
/// inseriu nos extensions; aqui só aplicamos a decisão pura.
pub struct RequireAccess<T: AccessRule>(pub PhantomData<T>);

impl<T, S> FromRequestParts<S> for RequireAccess<T>
where
    T: AccessRule,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let requirement = T::requirement();

        let state = match parts.extensions.get::<EffectivePermissions>() {
            Some(perms) => SessionState::Ready(perms),
            None => SessionState::Unauthenticated,
        };

        match decide(&state, &requirement) {
            GuardDecision::Allow => Ok(RequireAccess(PhantomData)),
            GuardDecision::RedirectToLogin | GuardDecision::Loading => Err(AppError::InvalidToken),
            GuardDecision::Redirect(fallback) => Err(AppError::Forbidden {
                required: requirement.describe(),
                fallback,
            }),
        }
    }
}

// ---
// DEFINIÇÃO DOS REQUISITOS (TIPOS)
// ---

macro_rules! access_rule {
    ($name:ident, $req:expr) => {
        pub struct $name;
        impl AccessRule for $name {
            fn requirement() -> RouteRequirement {
                $req
            }
        }
    };
}

access_rule!(OrgView, RouteRequirement::permission("organization.view"));
access_rule!(OrgManage, RouteRequirement::permission("organization.manage"));
access_rule!(UsersView, RouteRequirement::permission("users.view"));
access_rule!(UsersManage, RouteRequirement::permission("users.manage"));
access_rule!(ClientsView, RouteRequirement::permission("clients.view"));
access_rule!(ClientsManage, RouteRequirement::permission("clients.manage"));
access_rule!(HoursView, RouteRequirement::permission("hours.view"));
access_rule!(HoursManage, RouteRequirement::permission("hours.manage"));
access_rule!(InventoryView, RouteRequirement::resource("assets"));
access_rule!(
    InventoryManage,
    RouteRequirement::permission("inventory.manage")
);
access_rule!(LicensesView, RouteRequirement::permission("licenses.view"));
access_rule!(
    LicensesManage,
    RouteRequirement::permission("licenses.manage")
);
access_rule!(CatalogView, RouteRequirement::resource("catalog"));
access_rule!(
    CatalogManage,
    RouteRequirement::permission("catalog.manage")
);

// =========================================================================
//  TESTES
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::Role;
    use crate::services::permissions::resolve;

    fn ready(role: Role) -> EffectivePermissions {
        resolve(Some(role), None, &[])
    }

    #[test]
    fn sem_token_redireciona_para_login_em_qualquer_rota_protegida() {
        for req in [
            RouteRequirement::open(),
            RouteRequirement::resource("catalog"),
            RouteRequirement::permission("users.manage"),
            RouteRequirement::any_of(&["a.b", "c.d"]),
        ] {
            assert_eq!(
                decide(&SessionState::Unauthenticated, &req),
                GuardDecision::RedirectToLogin
            );
        }
        assert_eq!(login_route(), "/login");
    }

    #[test]
    fn carregando_bloqueia_sem_liberar_nada() {
        let req = RouteRequirement::open();
        assert_eq!(decide(&SessionState::Loading, &req), GuardDecision::Loading);
    }

    #[test]
    fn sem_requisito_declarado_libera_autenticado() {
        let perms = ready(Role::ClientUser);
        assert_eq!(
            decide(&SessionState::Ready(&perms), &RouteRequirement::open()),
            GuardDecision::Allow
        );
    }

    #[test]
    fn admin_curto_circuita_para_permitido() {
        let perms = ready(Role::ProviderAdmin);
        let req = RouteRequirement::permission("hours.manage");
        assert_eq!(decide(&SessionState::Ready(&perms), &req), GuardDecision::Allow);
    }

    #[test]
    fn sem_permissao_redireciona_para_fallback_nunca_libera() {
        let perms = ready(Role::ClientUser);
        let req = RouteRequirement::permission("users.manage");
        assert_eq!(
            decide(&SessionState::Ready(&perms), &req),
            GuardDecision::Redirect("/".to_string())
        );

        let req = RouteRequirement::permission("users.manage").with_fallback("/dashboard");
        assert_eq!(
            decide(&SessionState::Ready(&perms), &req),
            GuardDecision::Redirect("/dashboard".to_string())
        );
    }

    #[test]
    fn requisito_de_recurso_e_avaliado_antes_da_lista() {
        let perms = ready(Role::ClientUser);
        // resource falha mesmo com a lista passando: resource tem precedência
        let req = RouteRequirement {
            resource: Some("assets".into()),
            permissions: vec!["catalog.view".into()],
            ..RouteRequirement::default()
        };
        assert_eq!(
            decide(&SessionState::Ready(&perms), &req),
            GuardDecision::Redirect("/".to_string())
        );
    }

    #[test]
    fn lista_com_require_all_exige_todas() {
        let perms = ready(Role::ClientUser);

        let any = RouteRequirement::any_of(&["users.manage", "catalog.view"]);
        assert_eq!(decide(&SessionState::Ready(&perms), &any), GuardDecision::Allow);

        let all = RouteRequirement::all_of(&["users.manage", "catalog.view"]);
        assert_eq!(
            decide(&SessionState::Ready(&perms), &all),
            GuardDecision::Redirect("/".to_string())
        );
    }
}
