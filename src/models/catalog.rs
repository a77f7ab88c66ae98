// src/models/catalog.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// O tipo do item governa o roteamento do chamado e a etapa de aprovação:
// incidentes e suportes entram direto na fila, serviços e requisições
// passam pela aprovação do gestor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "catalog_item_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "lowercase")]
pub enum CatalogItemType {
    Incident,
    Service,
    Support,
    Request,
}

impl CatalogItemType {
    /// Incidente e suporte pulam a etapa de aprovação.
    pub fn skips_approval(&self) -> bool {
        matches!(self, CatalogItemType::Incident | CatalogItemType::Support)
    }
}

// Árvore de categorias auto-referente, com defaults de roteamento
// organizacional que os itens herdam quando não definem os próprios.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogCategory {
    pub id: Uuid,

    #[schema(ignore)]
    pub tenant_id: Uuid,

    pub parent_id: Option<Uuid>,

    #[schema(example = "Infraestrutura")]
    pub name: String,

    pub description: Option<String>,

    // Roteamento padrão
    pub direction_id: Option<Uuid>,
    pub department_id: Option<Uuid>,
    pub section_id: Option<Uuid>,

    pub is_active: bool,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub id: Uuid,

    #[schema(ignore)]
    pub tenant_id: Uuid,

    pub category_id: Uuid,

    #[schema(example = "Acesso VPN")]
    pub name: String,

    pub description: Option<String>,

    pub item_type: CatalogItemType,

    pub direction_id: Option<Uuid>,
    pub department_id: Option<Uuid>,
    pub section_id: Option<Uuid>,

    // Derivado de item_type; não é coluna. O frontend usa para decidir se
    // a solicitação pula a etapa de aprovação do gestor.
    #[sqlx(skip)]
    #[serde(default)]
    pub skips_approval: bool,

    pub is_active: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl CatalogItem {
    /// Preenche o campo derivado após a leitura do banco.
    pub fn with_approval_flag(mut self) -> Self {
        self.skips_approval = self.item_type.skips_approval();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incidente_e_suporte_pulam_aprovacao() {
        assert!(CatalogItemType::Incident.skips_approval());
        assert!(CatalogItemType::Support.skips_approval());
        assert!(!CatalogItemType::Service.skips_approval());
        assert!(!CatalogItemType::Request.skips_approval());
    }

    #[test]
    fn item_carrega_a_flag_de_aprovacao_derivada() {
        let item = CatalogItem {
            id: Uuid::new_v4(),
            tenant_id: Uuid::new_v4(),
            category_id: Uuid::new_v4(),
            name: "Estação travada".into(),
            description: None,
            item_type: CatalogItemType::Incident,
            direction_id: None,
            department_id: None,
            section_id: None,
            skips_approval: false,
            is_active: true,
            created_at: None,
            updated_at: None,
        };

        let incident = item.clone().with_approval_flag();
        assert!(incident.skips_approval);

        let request = CatalogItem {
            item_type: CatalogItemType::Request,
            ..item
        }
        .with_approval_flag();
        assert!(!request.skips_approval);
    }
}
