// src/services/org.rs
//
// Hierarquia organizacional: Diretoria -> Departamento -> Seção.
// As regras aqui são de integridade da hierarquia; o CRUD em si fica nos
// repositórios.

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::OrgRepository,
    models::org::{Department, Direction, Section, SectionWithHierarchy},
};

#[derive(Clone)]
pub struct OrgService {
    repo: OrgRepository,
}

impl OrgService {
    pub fn new(repo: OrgRepository) -> Self {
        Self { repo }
    }

    // --- Diretorias ---

    pub async fn create_direction(
        &self,
        tenant_id: Uuid,
        name: &str,
        description: Option<&str>,
    ) -> Result<Direction, AppError> {
        self.repo.create_direction(tenant_id, name, description).await
    }

    pub async fn list_directions(&self, tenant_id: Uuid) -> Result<Vec<Direction>, AppError> {
        self.repo.list_directions(tenant_id).await
    }

    pub async fn update_direction(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<Direction, AppError> {
        self.repo
            .update_direction(tenant_id, id, name, description)
            .await?
            .ok_or(AppError::NotFound("Diretoria"))
    }

    /// Remoção é recusada enquanto houver departamentos vinculados.
    pub async fn delete_direction(&self, tenant_id: Uuid, id: Uuid) -> Result<(), AppError> {
        let children = self
            .repo
            .count_departments_of_direction(tenant_id, id)
            .await?;
        if children > 0 {
            return Err(AppError::Conflict(format!(
                "A diretoria possui {} departamento(s) vinculado(s).",
                children
            )));
        }

        if !self.repo.delete_direction(tenant_id, id).await? {
            return Err(AppError::NotFound("Diretoria"));
        }
        Ok(())
    }

    // --- Departamentos ---

    pub async fn create_department(
        &self,
        tenant_id: Uuid,
        direction_id: Option<Uuid>,
        name: &str,
        description: Option<&str>,
    ) -> Result<Department, AppError> {
        self.repo
            .create_department(tenant_id, direction_id, name, description)
            .await
    }

    pub async fn list_departments(&self, tenant_id: Uuid) -> Result<Vec<Department>, AppError> {
        self.repo.list_departments(tenant_id).await
    }

    pub async fn update_department(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        direction_id: Option<Uuid>,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<Department, AppError> {
        self.repo
            .update_department(tenant_id, id, direction_id, name, description)
            .await?
            .ok_or(AppError::NotFound("Departamento"))
    }

    pub async fn delete_department(&self, tenant_id: Uuid, id: Uuid) -> Result<(), AppError> {
        let children = self.repo.count_sections_of_department(tenant_id, id).await?;
        if children > 0 {
            return Err(AppError::Conflict(format!(
                "O departamento possui {} seção(ões) vinculada(s).",
                children
            )));
        }

        if !self.repo.delete_department(tenant_id, id).await? {
            return Err(AppError::NotFound("Departamento"));
        }
        Ok(())
    }

    // --- Seções ---

    /// A seção exige um departamento existente. A diretoria exibida em
    /// listagens é sempre herdada do departamento, nunca gravada na seção.
    pub async fn create_section(
        &self,
        tenant_id: Uuid,
        department_id: Uuid,
        name: &str,
        description: Option<&str>,
    ) -> Result<Section, AppError> {
        self.repo
            .find_department(tenant_id, department_id)
            .await?
            .ok_or(AppError::NotFound("Departamento"))?;

        self.repo
            .create_section(tenant_id, department_id, name, description)
            .await
    }

    pub async fn list_sections(
        &self,
        tenant_id: Uuid,
    ) -> Result<Vec<SectionWithHierarchy>, AppError> {
        self.repo.list_sections(tenant_id).await
    }

    pub async fn update_section(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        department_id: Option<Uuid>,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<Section, AppError> {
        if let Some(dep_id) = department_id {
            self.repo
                .find_department(tenant_id, dep_id)
                .await?
                .ok_or(AppError::NotFound("Departamento"))?;
        }

        self.repo
            .update_section(tenant_id, id, department_id, name, description)
            .await?
            .ok_or(AppError::NotFound("Seção"))
    }

    pub async fn delete_section(&self, tenant_id: Uuid, id: Uuid) -> Result<(), AppError> {
        if !self.repo.delete_section(tenant_id, id).await? {
            return Err(AppError::NotFound("Seção"));
        }
        Ok(())
    }
}
