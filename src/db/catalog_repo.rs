// src/db/catalog_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::catalog::{CatalogCategory, CatalogItem, CatalogItemType},
};

#[derive(Clone)]
pub struct CatalogRepository {
    pool: PgPool,
}

impl CatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  CATEGORIAS
    // =========================================================================

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
        let category = sqlx::query_as::<_, CatalogCategory>(
            r#"
            INSERT INTO catalog_categories (
                tenant_id, parent_id, name, description,
                direction_id, department_id, section_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(parent_id)
        .bind(name)
        .bind(description)
        .bind(direction_id)
        .bind(department_id)
        .bind(section_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(category)
    }

    pub async fn find_category(
        &self,
        tenant_id: Uuid,
        category_id: Uuid,
    ) -> Result<Option<CatalogCategory>, AppError> {
        let category = sqlx::query_as::<_, CatalogCategory>(
            "SELECT * FROM catalog_categories WHERE id = $2 AND tenant_id = $1",
        )
        .bind(tenant_id)
        .bind(category_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    pub async fn list_categories(
        &self,
        tenant_id: Uuid,
    ) -> Result<Vec<CatalogCategory>, AppError> {
        let categories = sqlx::query_as::<_, CatalogCategory>(
            "SELECT * FROM catalog_categories
             WHERE tenant_id = $1 AND is_active = TRUE
             ORDER BY name ASC",
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    pub async fn count_children(
        &self,
        tenant_id: Uuid,
        category_id: Uuid,
    ) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT (SELECT COUNT(*) FROM catalog_categories
                    WHERE tenant_id = $1 AND parent_id = $2)
                 + (SELECT COUNT(*) FROM catalog_items
                    WHERE tenant_id = $1 AND category_id = $2)
            "#,
        )
        .bind(tenant_id)
        .bind(category_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    pub async fn delete_category(
        &self,
        tenant_id: Uuid,
        category_id: Uuid,
    ) -> Result<bool, AppError> {
        let result =
            sqlx::query("DELETE FROM catalog_categories WHERE id = $2 AND tenant_id = $1")
                .bind(tenant_id)
                .bind(category_id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    // =========================================================================
    //  ITENS
    // =========================================================================

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
        let item = sqlx::query_as::<_, CatalogItem>(
            r#"
            INSERT INTO catalog_items (
                tenant_id, category_id, name, description, item_type,
                direction_id, department_id, section_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(category_id)
        .bind(name)
        .bind(description)
        .bind(item_type)
        .bind(direction_id)
        .bind(department_id)
        .bind(section_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(item.with_approval_flag())
    }

    pub async fn list_items(&self, tenant_id: Uuid) -> Result<Vec<CatalogItem>, AppError> {
        let items = sqlx::query_as::<_, CatalogItem>(
            "SELECT * FROM catalog_items
             WHERE tenant_id = $1 AND is_active = TRUE
             ORDER BY name ASC",
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items
            .into_iter()
            .map(CatalogItem::with_approval_flag)
            .collect())
    }

    pub async fn list_items_by_category(
        &self,
        tenant_id: Uuid,
        category_id: Uuid,
    ) -> Result<Vec<CatalogItem>, AppError> {
        let items = sqlx::query_as::<_, CatalogItem>(
            "SELECT * FROM catalog_items
             WHERE tenant_id = $1 AND category_id = $2 AND is_active = TRUE
             ORDER BY name ASC",
        )
        .bind(tenant_id)
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items
            .into_iter()
            .map(CatalogItem::with_approval_flag)
            .collect())
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
    ) -> Result<Option<CatalogItem>, AppError> {
        let item = sqlx::query_as::<_, CatalogItem>(
            r#"
            UPDATE catalog_items SET
                name          = COALESCE($3, name),
                description   = COALESCE($4, description),
                item_type     = COALESCE($5, item_type),
                direction_id  = COALESCE($6, direction_id),
                department_id = COALESCE($7, department_id),
                section_id    = COALESCE($8, section_id),
                updated_at    = now()
            WHERE id = $2 AND tenant_id = $1
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(item_id)
        .bind(name)
        .bind(description)
        .bind(item_type)
        .bind(direction_id)
        .bind(department_id)
        .bind(section_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item.map(CatalogItem::with_approval_flag))
    }

    pub async fn delete_item(&self, tenant_id: Uuid, item_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM catalog_items WHERE id = $2 AND tenant_id = $1")
            .bind(tenant_id)
            .bind(item_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
