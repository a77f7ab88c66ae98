// src/db/org_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::org::{Department, Direction, Section, SectionWithHierarchy},
};

#[derive(Clone)]
pub struct OrgRepository {
    pool: PgPool,
}

impl OrgRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  DIRETORIAS
    // =========================================================================

    pub async fn create_direction(
        &self,
        tenant_id: Uuid,
        name: &str,
        description: Option<&str>,
    ) -> Result<Direction, AppError> {
        let direction = sqlx::query_as::<_, Direction>(
            r#"
            INSERT INTO directions (tenant_id, name, description)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(name)
        .bind(description)
        .fetch_one(&self.pool)
        .await
        .map_err(unique_to_conflict("Já existe uma diretoria com esse nome."))?;

        Ok(direction)
    }

    pub async fn list_directions(&self, tenant_id: Uuid) -> Result<Vec<Direction>, AppError> {
        let directions = sqlx::query_as::<_, Direction>(
            "SELECT * FROM directions WHERE tenant_id = $1 ORDER BY name ASC",
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(directions)
    }

    pub async fn update_direction(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<Option<Direction>, AppError> {
        let direction = sqlx::query_as::<_, Direction>(
            r#"
            UPDATE directions SET
                name        = COALESCE($3, name),
                description = COALESCE($4, description),
                updated_at  = now()
            WHERE id = $2 AND tenant_id = $1
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(id)
        .bind(name)
        .bind(description)
        .fetch_optional(&self.pool)
        .await?;

        Ok(direction)
    }

    pub async fn count_departments_of_direction(
        &self,
        tenant_id: Uuid,
        direction_id: Uuid,
    ) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM departments WHERE tenant_id = $1 AND direction_id = $2",
        )
        .bind(tenant_id)
        .bind(direction_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    pub async fn delete_direction(&self, tenant_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM directions WHERE id = $2 AND tenant_id = $1")
            .bind(tenant_id)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // =========================================================================
    //  DEPARTAMENTOS
    // =========================================================================

    pub async fn create_department(
        &self,
        tenant_id: Uuid,
        direction_id: Option<Uuid>,
        name: &str,
        description: Option<&str>,
    ) -> Result<Department, AppError> {
        let department = sqlx::query_as::<_, Department>(
            r#"
            INSERT INTO departments (tenant_id, direction_id, name, description)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(direction_id)
        .bind(name)
        .bind(description)
        .fetch_one(&self.pool)
        .await
        .map_err(unique_to_conflict("Já existe um departamento com esse nome."))?;

        Ok(department)
    }

    pub async fn find_department(
        &self,
        tenant_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Department>, AppError> {
        let department = sqlx::query_as::<_, Department>(
            "SELECT * FROM departments WHERE id = $2 AND tenant_id = $1",
        )
        .bind(tenant_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(department)
    }

    pub async fn list_departments(&self, tenant_id: Uuid) -> Result<Vec<Department>, AppError> {
        let departments = sqlx::query_as::<_, Department>(
            "SELECT * FROM departments WHERE tenant_id = $1 ORDER BY name ASC",
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(departments)
    }

    pub async fn update_department(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        direction_id: Option<Uuid>,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<Option<Department>, AppError> {
        let department = sqlx::query_as::<_, Department>(
            r#"
            UPDATE departments SET
                direction_id = COALESCE($3, direction_id),
                name         = COALESCE($4, name),
                description  = COALESCE($5, description),
                updated_at   = now()
            WHERE id = $2 AND tenant_id = $1
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(id)
        .bind(direction_id)
        .bind(name)
        .bind(description)
        .fetch_optional(&self.pool)
        .await?;

        Ok(department)
    }

    pub async fn count_sections_of_department(
        &self,
        tenant_id: Uuid,
        department_id: Uuid,
    ) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM sections WHERE tenant_id = $1 AND department_id = $2",
        )
        .bind(tenant_id)
        .bind(department_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    pub async fn delete_department(&self, tenant_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM departments WHERE id = $2 AND tenant_id = $1")
            .bind(tenant_id)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // =========================================================================
    //  SEÇÕES
    // =========================================================================

    pub async fn create_section(
        &self,
        tenant_id: Uuid,
        department_id: Uuid,
        name: &str,
        description: Option<&str>,
    ) -> Result<Section, AppError> {
        let section = sqlx::query_as::<_, Section>(
            r#"
            INSERT INTO sections (tenant_id, department_id, name, description)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(department_id)
        .bind(name)
        .bind(description)
        .fetch_one(&self.pool)
        .await
        .map_err(unique_to_conflict("Já existe uma seção com esse nome."))?;

        Ok(section)
    }

    // A diretoria da seção é herdada transitivamente: sections -> departments
    // -> directions. Não existe ponteiro direto de seção para diretoria.
    pub async fn list_sections(
        &self,
        tenant_id: Uuid,
    ) -> Result<Vec<SectionWithHierarchy>, AppError> {
        let sections = sqlx::query_as::<_, SectionWithHierarchy>(
            r#"
            SELECT s.id, s.tenant_id, s.department_id, s.name, s.description,
                   dep.name AS department_name,
                   dir.name AS direction_name,
                   s.created_at, s.updated_at
            FROM sections s
            JOIN departments dep ON dep.id = s.department_id
            LEFT JOIN directions dir ON dir.id = dep.direction_id
            WHERE s.tenant_id = $1
            ORDER BY s.name ASC
            "#,
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(sections)
    }

    pub async fn update_section(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        department_id: Option<Uuid>,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<Option<Section>, AppError> {
        let section = sqlx::query_as::<_, Section>(
            r#"
            UPDATE sections SET
                department_id = COALESCE($3, department_id),
                name          = COALESCE($4, name),
                description   = COALESCE($5, description),
                updated_at    = now()
            WHERE id = $2 AND tenant_id = $1
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(id)
        .bind(department_id)
        .bind(name)
        .bind(description)
        .fetch_optional(&self.pool)
        .await?;

        Ok(section)
    }

    pub async fn delete_section(&self, tenant_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM sections WHERE id = $2 AND tenant_id = $1")
            .bind(tenant_id)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

// Converte violação de UNIQUE em erro de conflito com mensagem amigável.
fn unique_to_conflict(message: &'static str) -> impl Fn(sqlx::Error) -> AppError {
    move |e| {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_unique_violation() {
                return AppError::Conflict(message.to_string());
            }
        }
        e.into()
    }
}
