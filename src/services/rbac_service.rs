// src/services/rbac_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::common::error::AppError;
use crate::db::RbacRepository;
use crate::models::rbac::{AssignedRole, Permission, RoleResponse};

#[derive(Clone)]
pub struct RbacService {
    repo: RbacRepository,
    pool: PgPool,
}

impl RbacService {
    pub fn new(repo: RbacRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    pub async fn create_role_with_permissions(
        &self,
        name: String,
        description: Option<String>,
        permission_names: Vec<String>,
    ) -> Result<RoleResponse, AppError> {
        // 1. Inicia Transação
        let mut tx = self.pool.begin().await?;

        // 2. Cria o Cargo
        let role = self
            .repo
            .create_role(&mut *tx, &name, description.as_deref())
            .await?;

        // 3. Resolve nomes ("patients:read") para IDs (UUIDs)
        let permissions = self
            .repo
            .find_permissions_by_names(&mut *tx, &permission_names)
            .await?;

        let permission_ids: Vec<Uuid> = permissions.iter().map(|p| p.id).collect();
        let valid_names: Vec<String> = permissions.into_iter().map(|p| p.name).collect();

        // 4. Salva o Vínculo
        if !permission_ids.is_empty() {
            self.repo
                .assign_permissions(&mut *tx, role.id, &permission_ids)
                .await?;
        }

        // 5. Commit
        tx.commit().await?;

        Ok(RoleResponse {
            role,
            permissions: valid_names,
        })
    }

    pub async fn list_system_permissions(&self) -> Result<Vec<Permission>, AppError> {
        self.repo.list_all_permissions().await
    }

    // Vincula um cargo existente a um usuário, pelo nome do cargo.
    pub async fn assign_role_to_user(
        &self,
        user_id: Uuid,
        role_name: &str,
    ) -> Result<Vec<AssignedRole>, AppError> {
        let role = self
            .repo
            .find_role_by_name(role_name)
            .await?
            .ok_or_else(|| AppError::RecordNotFound(format!("Cargo '{}' não existe.", role_name)))?;

        self.repo
            .assign_role_to_user(&self.pool, user_id, role.id)
            .await?;

        tracing::info!("🔗 Cargo '{}' vinculado ao usuário {}.", role.name, user_id);

        self.repo.list_user_assigned_roles(user_id).await
    }
}
