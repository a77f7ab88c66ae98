// src/services/permissions.rs
//
// O Resolvedor de Permissões: núcleo puro, sem I/O.
//
// Um token de permissão tem a forma "<recurso>.<ação>", "<recurso>.*" ou "*".
// O frontend fala um vocabulário ("inventory.view"); o RBAC do backend fala
// outro ("assets.read"). A tabela de aliases abaixo reconcilia os dois lados
// e é validada na inicialização contra a lista única de tokens do backend,
// para que as duas tabelas não divirjam silenciosamente.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::auth::Role;

/// Todo usuário autenticado enxerga o dashboard, sem exceção.
pub const DASHBOARD_VIEW: &str = "dashboard.view";

/// Rota de login e fallback padrão do guard.
pub const LOGIN_ROUTE: &str = "/login";
pub const DEFAULT_FALLBACK_ROUTE: &str = "/";

// =========================================================================
//  VOCABULÁRIO (fonte única de verdade)
// =========================================================================

/// Tokens que o RBAC do backend emite. Todo alvo da tabela de aliases
/// precisa constar aqui: `validate_tables()` garante isso na subida.
const BACKEND_TOKENS: &[&str] = &[
    "assets.read",
    "assets.read_all",
    "assets.write",
    "licenses.read",
    "licenses.read_all",
    "licenses.write",
    "hours_banks.read",
    "hours_banks.write",
    "org_units.read",
    "org_units.write",
    "users.read",
    "users.read_all",
    "users.write",
    "catalog.read",
    "catalog.write",
    "catalog.approve",
    "clients.read",
    "clients.write",
    "notifications.read",
    "tickets.read",
    "tickets.write",
    "reports.read",
];

/// Tokens do frontend sem contraparte no RBAC do backend: fluxos que a API
/// resolve por outro caminho (a solicitação de item de catálogo vira um
/// chamado no colaborador de tickets). Os defaults de papel podem usá-los.
const FRONTEND_ONLY_TOKENS: &[&str] = &["catalog.request"];

/// Alias frontend -> backend (muitos-para-muitos).
/// Ex.: "inventory.view" é satisfeito por "assets.read" OU "assets.read_all".
static ALIASES: LazyLock<HashMap<&'static str, &'static [&'static str]>> = LazyLock::new(|| {
    let mut m: HashMap<&'static str, &'static [&'static str]> = HashMap::new();
    m.insert("inventory.view", &["assets.read", "assets.read_all"]);
    m.insert("inventory.manage", &["assets.write"]);
    m.insert("licenses.view", &["licenses.read", "licenses.read_all"]);
    m.insert("licenses.manage", &["licenses.write"]);
    m.insert("hours.view", &["hours_banks.read"]);
    m.insert("hours.manage", &["hours_banks.write"]);
    m.insert("organization.view", &["org_units.read"]);
    m.insert("organization.manage", &["org_units.write"]);
    m.insert("users.view", &["users.read", "users.read_all"]);
    m.insert("users.manage", &["users.write"]);
    m.insert("catalog.view", &["catalog.read"]);
    m.insert("catalog.manage", &["catalog.write"]);
    m.insert("catalog.approve", &["catalog.approve"]);
    m.insert("clients.view", &["clients.read"]);
    m.insert("clients.manage", &["clients.write"]);
    m.insert("notifications.view", &["notifications.read"]);
    m.insert("tickets.view", &["tickets.read"]);
    m.insert("tickets.manage", &["tickets.write"]);
    m.insert("reports.view", &["reports.read"]);
    m
});

/// Defaults por papel, no vocabulário do frontend.
/// Papéis administrativos nem consultam esta tabela (curto-circuito).
fn role_defaults(role: Role) -> Option<&'static [&'static str]> {
    match role {
        Role::OrgAdmin | Role::Admin | Role::SuperAdmin | Role::ProviderAdmin => Some(&["*"]),
        Role::OrgManager | Role::Gerente => Some(&[
            "dashboard.view",
            "organization.view",
            "organization.manage",
            "users.view",
            "users.manage",
            "clients.view",
            "catalog.view",
            "catalog.approve",
            "hours.view",
            "hours.manage",
            "inventory.view",
            "licenses.view",
            "reports.view",
            "notifications.view",
        ]),
        Role::Supervisor => Some(&[
            "dashboard.view",
            "tickets.view",
            "tickets.manage",
            "users.view",
            "catalog.view",
            "catalog.approve",
            "hours.view",
            "inventory.view",
            "notifications.view",
        ]),
        Role::Agent | Role::Agente | Role::Technician => Some(&[
            "dashboard.view",
            "tickets.view",
            "tickets.manage",
            "catalog.view",
            "inventory.view",
            "notifications.view",
        ]),
        Role::ClientAdmin => Some(&[
            "dashboard.view",
            "users.view",
            "users.manage",
            "catalog.view",
            "catalog.request",
            "catalog.approve",
            "hours.view",
            "inventory.view",
            "licenses.view",
            "notifications.view",
        ]),
        Role::ClientManager => Some(&[
            "dashboard.view",
            "users.view",
            "catalog.view",
            "catalog.request",
            "catalog.approve",
            "hours.view",
            "notifications.view",
        ]),
        Role::ClientUser => Some(&[
            "dashboard.view",
            "catalog.view",
            "catalog.request",
            "notifications.view",
        ]),
    }
}

/// Confere a consistência referencial das tabelas mantidas à mão:
/// todo alvo de alias precisa ser um token real do backend, todo token
/// precisa ser bem-formado e todo default de papel precisa usar vocabulário
/// conhecido (alias, token do backend ou token exclusivo do frontend).
/// Chamado uma vez na subida da aplicação; um typo em qualquer tabela
/// derruba o boot em vez de passar despercebido.
pub fn validate_tables() -> Result<(), Vec<String>> {
    let backend: HashSet<&str> = BACKEND_TOKENS.iter().copied().collect();
    let mut problems = Vec::new();

    for (front, targets) in ALIASES.iter() {
        if !is_well_formed(front) {
            problems.push(format!("alias malformado: '{}'", front));
        }
        for target in targets.iter() {
            if !backend.contains(target) {
                problems.push(format!(
                    "alias '{}' aponta para token inexistente no backend: '{}'",
                    front, target
                ));
            }
        }
    }

    for token in BACKEND_TOKENS {
        if !is_well_formed(token) {
            problems.push(format!("token de backend malformado: '{}'", token));
        }
    }

    // Defaults de papel passam pelo mesmo crivo das demais tabelas.
    for role in Role::ALL {
        let Some(defaults) = role_defaults(role) else {
            continue;
        };
        for token in defaults {
            if !is_well_formed(token) {
                problems.push(format!(
                    "default do papel {:?} malformado: '{}'",
                    role, token
                ));
            } else if !is_resolvable(token) {
                problems.push(format!(
                    "default do papel {:?} usa token desconhecido: '{}'",
                    role, token
                ));
            }
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(problems)
    }
}

/// Um token pertence ao vocabulário conhecido quando é o curinga global,
/// o dashboard incondicional, uma chave da tabela de aliases, um token do
/// backend ou um token exclusivo do frontend.
fn is_resolvable(token: &str) -> bool {
    token == "*"
        || token == DASHBOARD_VIEW
        || ALIASES.contains_key(token)
        || BACKEND_TOKENS.contains(&token)
        || FRONTEND_ONLY_TOKENS.contains(&token)
}

fn is_well_formed(token: &str) -> bool {
    if token == "*" {
        return true;
    }
    match token.split_once('.') {
        Some((resource, action)) => !resource.is_empty() && !action.is_empty(),
        None => false,
    }
}

// =========================================================================
//  NORMALIZAÇÃO
// =========================================================================

/// Ações legadas do backend ("read", "read_all") viram "view" antes de
/// qualquer comparação.
pub fn normalize(token: &str) -> String {
    match token.split_once('.') {
        Some((resource, "read")) | Some((resource, "read_all")) => {
            format!("{}.view", resource)
        }
        _ => token.to_string(),
    }
}

fn resource_of(token: &str) -> Option<&str> {
    token.split_once('.').map(|(resource, _)| resource)
}

// =========================================================================
//  RESOLUÇÃO
// =========================================================================

/// De onde veio o conjunto efetivo: a precedência fica testável isolada.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum PermissionSource {
    ServerSupplied,
    UserOverride,
    RoleDefault,
    Minimal,
}

impl PermissionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionSource::ServerSupplied => "server-supplied",
            PermissionSource::UserOverride => "user-override",
            PermissionSource::RoleDefault => "role-default",
            PermissionSource::Minimal => "minimal",
        }
    }
}

/// Conjunto efetivo de permissões do usuário corrente.
#[derive(Debug, Clone)]
pub struct EffectivePermissions {
    role: Option<Role>,
    tokens: HashSet<String>,
    source: PermissionSource,
}

/// Item de menu declarativo usado por `filter_menu`.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub label: String,
    pub path: String,
    // Itens sem permissão declarada são sempre exibidos.
    pub permission: Option<String>,
}

/// Cadeia de precedência explícita: lista do servidor > override do usuário
/// > defaults do papel > mínimo ({dashboard.view}).
/// `role = None` cobre papéis desconhecidos/ausentes e falha fechado.
pub fn resolve(
    role: Option<Role>,
    user_overrides: Option<&[String]>,
    server_list: &[String],
) -> EffectivePermissions {
    if !server_list.is_empty() {
        return EffectivePermissions {
            role,
            tokens: ingest(server_list.iter().map(String::as_str)),
            source: PermissionSource::ServerSupplied,
        };
    }

    if let Some(overrides) = user_overrides {
        if !overrides.is_empty() {
            return EffectivePermissions {
                role,
                tokens: ingest(overrides.iter().map(String::as_str)),
                source: PermissionSource::UserOverride,
            };
        }
    }

    if let Some(defaults) = role.and_then(role_defaults) {
        return EffectivePermissions {
            role,
            tokens: ingest(defaults.iter().copied()),
            source: PermissionSource::RoleDefault,
        };
    }

    EffectivePermissions {
        role,
        tokens: ingest(std::iter::once(DASHBOARD_VIEW)),
        source: PermissionSource::Minimal,
    }
}

/// Insere cada token junto com sua forma normalizada, para que as
/// comparações posteriores sejam um `contains` simples.
fn ingest<'a>(raw: impl Iterator<Item = &'a str>) -> HashSet<String> {
    let mut tokens = HashSet::new();
    for token in raw {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        tokens.insert(token.to_string());
        tokens.insert(normalize(token));
    }
    tokens
}

impl EffectivePermissions {
    pub fn source(&self) -> PermissionSource {
        self.source
    }

    /// Papel administrativo ou curinga global no conjunto.
    pub fn is_admin(&self) -> bool {
        self.role.map(|r| r.is_admin_role()).unwrap_or(false) || self.tokens.contains("*")
    }

    pub fn has_permission(&self, token: &str) -> bool {
        // Dashboard é incondicional para qualquer usuário autenticado.
        if token == DASHBOARD_VIEW {
            return true;
        }
        if self.is_admin() {
            return true;
        }

        let token = normalize(token);
        if self.tokens.contains(token.as_str()) {
            return true;
        }

        // Curinga de recurso: "assets.*" cobre "assets.view" etc.
        if let Some(resource) = resource_of(&token) {
            if self.tokens.contains(&format!("{}.*", resource)) {
                return true;
            }
        }

        // Aliases: o conjunto pode estar no vocabulário do backend.
        if let Some(targets) = ALIASES.get(token.as_str()) {
            for target in targets.iter() {
                if self.tokens.contains(*target) || self.tokens.contains(&normalize(target)) {
                    return true;
                }
                if let Some(resource) = resource_of(target) {
                    if self.tokens.contains(&format!("{}.*", resource)) {
                        return true;
                    }
                }
            }
        }

        false
    }

    /// OR sobre `has_permission`; vacuamente verdadeiro para lista vazia.
    pub fn has_any(&self, tokens: &[&str]) -> bool {
        tokens.is_empty() || tokens.iter().any(|t| self.has_permission(t))
    }

    /// AND sobre `has_permission`; vacuamente verdadeiro para lista vazia.
    pub fn has_all(&self, tokens: &[&str]) -> bool {
        tokens.iter().all(|t| self.has_permission(t))
    }

    /// Acesso a qualquer ação do recurso: basta um token "<recurso>.<algo>"
    /// ou "<recurso>.*" no conjunto (ou via alias).
    pub fn can_access_resource(&self, resource: &str) -> bool {
        if self.is_admin() {
            return true;
        }
        let prefix = format!("{}.", resource);
        let wildcard = format!("{}.*", resource);
        if self
            .tokens
            .iter()
            .any(|t| t.starts_with(&prefix) || *t == wildcard)
        {
            return true;
        }
        // Tokens do frontend cujo alias cai nesse recurso do backend
        ALIASES.iter().any(|(front, targets)| {
            targets
                .iter()
                .any(|t| t.starts_with(&prefix) || *t == wildcard)
                && self.has_permission(front)
        })
    }

    /// Mantém itens sem permissão declarada ou cuja permissão passa.
    pub fn filter_menu(&self, items: Vec<MenuItem>) -> Vec<MenuItem> {
        items
            .into_iter()
            .filter(|item| match &item.permission {
                None => true,
                Some(token) => self.has_permission(token),
            })
            .collect()
    }

    /// Lista ordenada para serialização (resposta de login e /me/permissions).
    pub fn to_sorted_list(&self) -> Vec<String> {
        let mut list: Vec<String> = self.tokens.iter().cloned().collect();
        list.sort();
        list
    }
}

// =========================================================================
//  TESTES
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved(role: Role) -> EffectivePermissions {
        resolve(Some(role), None, &[])
    }

    #[test]
    fn tabelas_sao_referencialmente_consistentes() {
        // Cobre aliases, tokens do backend E os defaults de todos os papéis.
        validate_tables().expect("tabelas de permissão inconsistentes");

        // Reforço: todo token concedido por default de algum papel precisa
        // pertencer ao vocabulário conhecido, senão um typo na tabela
        // concederia (ou negaria) acesso silenciosamente.
        for role in Role::ALL {
            for token in role_defaults(role).unwrap_or(&[]) {
                assert!(
                    is_resolvable(token),
                    "default do papel {:?} fora do vocabulário: '{}'",
                    role,
                    token
                );
            }
        }
    }

    #[test]
    fn token_fora_do_vocabulario_nao_e_resolvivel() {
        // Tokens legítimos de cada origem
        assert!(is_resolvable("*"));
        assert!(is_resolvable(DASHBOARD_VIEW));
        assert!(is_resolvable("inventory.view")); // chave de alias
        assert!(is_resolvable("assets.read")); // token do backend
        assert!(is_resolvable("catalog.request")); // exclusivo do frontend

        // Um typo em qualquer tabela cairia aqui e falharia o boot
        assert!(!is_resolvable("catalog.requst"));
        assert!(!is_resolvable("horas.manage"));
        assert!(!is_resolvable("dashboard.wiev"));
    }

    #[test]
    fn dashboard_e_incondicional_para_todos_os_papeis() {
        for role in Role::ALL {
            assert!(
                resolved(role).has_permission(DASHBOARD_VIEW),
                "papel {:?} deveria ver o dashboard",
                role
            );
        }
    }

    #[test]
    fn papel_desconhecido_recebe_apenas_o_minimo() {
        let perms = resolve(None, None, &[]);
        assert_eq!(perms.source(), PermissionSource::Minimal);
        assert!(perms.has_permission(DASHBOARD_VIEW));
        assert!(!perms.has_permission("inventory.view"));
        assert!(!perms.has_permission("users.manage"));
        assert!(!perms.is_admin());
    }

    #[test]
    fn lista_do_servidor_tem_precedencia_sobre_defaults() {
        let server = vec!["assets.read".to_string()];
        let overrides = vec!["catalog.view".to_string()];
        let perms = resolve(Some(Role::ClientUser), Some(&overrides), &server);

        assert_eq!(perms.source(), PermissionSource::ServerSupplied);
        // O alias traduz "inventory.view" para "assets.read"
        assert!(perms.has_permission("inventory.view"));
        // O default do papel (catalog.view) NÃO entra quando o servidor fala
        assert!(!perms.has_permission("catalog.view"));
    }

    #[test]
    fn override_do_usuario_vence_default_do_papel() {
        let overrides = vec!["licenses.view".to_string()];
        let perms = resolve(Some(Role::ClientUser), Some(&overrides), &[]);

        assert_eq!(perms.source(), PermissionSource::UserOverride);
        assert!(perms.has_permission("licenses.view"));
        assert!(!perms.has_permission("catalog.request"));
    }

    #[test]
    fn acoes_legadas_normalizam_para_view() {
        assert_eq!(normalize("assets.read"), "assets.view");
        assert_eq!(normalize("assets.read_all"), "assets.view");
        assert_eq!(normalize("assets.write"), "assets.write");
        assert_eq!(normalize("*"), "*");

        let server = vec!["users.read_all".to_string()];
        let perms = resolve(Some(Role::ClientUser), None, &server);
        assert!(perms.has_permission("users.view"));
    }

    #[test]
    fn nao_admin_nao_passa_em_token_fora_dos_defaults_e_aliases() {
        let perms = resolved(Role::ClientUser);
        assert!(!perms.has_permission("users.manage"));
        assert!(!perms.has_permission("hours.manage"));
        assert!(!perms.has_permission("organization.view"));
        assert!(!perms.has_permission("catalog.approve"));
    }

    #[test]
    fn admin_curto_circuita_qualquer_verificacao() {
        let perms = resolved(Role::SuperAdmin);
        assert!(perms.is_admin());
        assert!(perms.has_permission("qualquer.coisa"));
        assert!(perms.can_access_resource("inexistente"));
    }

    #[test]
    fn curinga_de_recurso_cobre_todas_as_acoes() {
        let overrides = vec!["catalog.*".to_string()];
        let perms = resolve(Some(Role::ClientUser), Some(&overrides), &[]);
        assert!(perms.has_permission("catalog.view"));
        assert!(perms.has_permission("catalog.approve"));
        assert!(!perms.has_permission("users.manage"));
    }

    #[test]
    fn cenario_client_user_no_catalogo() {
        let perms = resolved(Role::ClientUser);
        assert!(perms.can_access_resource("catalog"));
        assert!(!perms.has_permission("catalog.approve"));
    }

    #[test]
    fn has_any_e_has_all_compoem_corretamente() {
        let perms = resolved(Role::ClientUser);
        assert!(perms.has_any(&["users.manage", "catalog.view"]));
        assert!(!perms.has_any(&["users.manage", "hours.manage"]));
        assert!(perms.has_all(&["catalog.view", "catalog.request"]));
        assert!(!perms.has_all(&["catalog.view", "users.manage"]));
        // Vacuamente verdadeiros
        assert!(perms.has_any(&[]));
        assert!(perms.has_all(&[]));
    }

    #[test]
    fn can_access_resource_funciona_via_alias() {
        // "inventory.view" do gerente vira acesso ao recurso "assets" do backend
        let perms = resolved(Role::Gerente);
        assert!(perms.can_access_resource("assets"));

        let perms = resolved(Role::ClientUser);
        assert!(!perms.can_access_resource("assets"));
    }

    #[test]
    fn filter_menu_mantem_itens_sem_permissao_declarada() {
        let perms = resolved(Role::ClientUser);
        let menu = vec![
            MenuItem {
                label: "Início".into(),
                path: "/".into(),
                permission: None,
            },
            MenuItem {
                label: "Catálogo".into(),
                path: "/catalog".into(),
                permission: Some("catalog.view".into()),
            },
            MenuItem {
                label: "Usuários".into(),
                path: "/users".into(),
                permission: Some("users.manage".into()),
            },
        ];

        let visible = perms.filter_menu(menu);
        let labels: Vec<&str> = visible.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, vec!["Início", "Catálogo"]);
    }
}
