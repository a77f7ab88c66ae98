// src/services/catalog.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::CatalogRepository,
    models::catalog::{CatalogCategory, CatalogItem, CatalogItemType},
};

#[derive(Clone)]
pub struct CatalogService {
    repo: CatalogRepository,
}

impl CatalogService {
    pub fn new(repo: CatalogRepository) -> Self {
        Self { repo }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create_category(
        &self,
        tenant_id: Uuid,
        parent_id: Option<Uuid>,
        name: &str,
        description: Option<&str>,
        direction_id: Option<Uuid>,
        department_id: Option<Uuid>,
        section_id: Option<Uuid>,
    ) -> Result<CatalogCategory, AppError> {
        if let Some(parent) = parent_id {
            self.repo
                .find_category(tenant_id, parent)
                .await?
                .ok_or(AppError::NotFound("Categoria pai"))?;
        }

        self.repo
            .create_category(
                tenant_id,
                parent_id,
                name,
                description,
                direction_id,
                department_id,
                section_id,
            )
            .await
    }

    pub async fn list_categories(
        &self,
        tenant_id: Uuid,
    ) -> Result<Vec<CatalogCategory>, AppError> {
        self.repo.list_categories(tenant_id).await
    }

    pub async fn delete_category(&self, tenant_id: Uuid, id: Uuid) -> Result<(), AppError> {
        let children = self.repo.count_children(tenant_id, id).await?;
        if children > 0 {
            return Err(AppError::Conflict(format!(
                "A categoria possui {} subcategoria(s)/item(ns) vinculados.",
                children
            )));
        }

        if !self.repo.delete_category(tenant_id, id).await? {
            return Err(AppError::NotFound("Categoria"));
        }
        Ok(())
    }

    /// O item herda da categoria o roteamento organizacional que não
    /// definir explicitamente.
    #[allow(clippy::too_many_arguments)]
    pub async fn create_item(
        &self,
        tenant_id: Uuid,
        category_id: Uuid,
        name: &str,
        description: Option<&str>,
        item_type: CatalogItemType,
        direction_id: Option<Uuid>,
        department_id: Option<Uuid>,
        section_id: Option<Uuid>,
    ) -> Result<CatalogItem, AppError> {
        let category = self
            .repo
            .find_category(tenant_id, category_id)
            .await?
            .ok_or(AppError::NotFound("Categoria"))?;

        self.repo
            .create_item(
                tenant_id,
                category_id,
                name,
                description,
                item_type,
                direction_id.or(category.direction_id),
                department_id.or(category.department_id),
                section_id.or(category.section_id),
            )
            .await
    }

    pub async fn list_items(&self, tenant_id: Uuid) -> Result<Vec<CatalogItem>, AppError> {
        self.repo.list_items(tenant_id).await
    }

    pub async fn list_items_by_category(
        &self,
        tenant_id: Uuid,
        category_id: Uuid,
    ) -> Result<Vec<CatalogItem>, AppError> {
        self.repo
            .list_items_by_category(tenant_id, category_id)
            .await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update_item(
        &self,
        tenant_id: Uuid,
        item_id: Uuid,
        name: Option<&str>,
        description: Option<&str>,
        item_type: Option<CatalogItemType>,
        direction_id: Option<Uuid>,
        department_id: Option<Uuid>,
        section_id: Option<Uuid>,
    ) -> Result<CatalogItem, AppError> {
        self.repo
            .update_item(
                tenant_id,
                item_id,
                name,
                description,
                item_type,
                direction_id,
                department_id,
                section_id,
            )
            .await?
            .ok_or(AppError::NotFound("Item de catálogo"))
    }

    pub async fn delete_item(&self, tenant_id: Uuid, id: Uuid) -> Result<(), AppError> {
        if !self.repo.delete_item(tenant_id, id).await? {
            return Err(AppError::NotFound("Item de catálogo"));
        }
        Ok(())
    }
}
