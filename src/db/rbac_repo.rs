// src/db/rbac_repo.rs

use sqlx::{Executor, PgPool, Postgres, Row};
use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::rbac::{AssignedRole, Permission, Role};
use crate::services::authorizer::RoleGrants;

#[derive(Clone)]
pub struct RbacRepository {
    pool: PgPool,
}

impl RbacRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // 1. Criar o Cargo
    pub async fn create_role<'e, E>(
        &self,
        executor: E,
        name: &str,
        description: Option<&str>,
    ) -> Result<Role, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let role = sqlx::query_as::<Postgres, Role>(
            r#"
            INSERT INTO roles (name, description)
            VALUES ($1, $2)
            RETURNING id, name, description, grants_all, is_active, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(description)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::UniqueConstraintViolation(
                        "Já existe um cargo com esse nome.".into(),
                    );
                }
            }
            e.into()
        })?;

        Ok(role)
    }

    pub async fn find_role_by_name(&self, name: &str) -> Result<Option<Role>, AppError> {
        let role = sqlx::query_as::<Postgres, Role>(
            r#"
            SELECT id, name, description, grants_all, is_active, created_at, updated_at
            FROM roles
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(role)
    }

    // 2. Buscar IDs das permissões baseado nos nomes ("patients:read" -> UUID)
    pub async fn find_permissions_by_names<'e, E>(
        &self,
        executor: E,
        names: &[String],
    ) -> Result<Vec<Permission>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        // O SQLx lida bem com arrays usando ANY
        let permissions = sqlx::query_as::<Postgres, Permission>(
            r#"
            SELECT id, name, description, module
            FROM permissions
            WHERE name = ANY($1)
            "#,
        )
        .bind(names)
        .fetch_all(executor)
        .await?;

        Ok(permissions)
    }

    // 3. Vincular Cargo <-> Permissão
    pub async fn assign_permissions<'e, E>(
        &self,
        executor: E,
        role_id: Uuid,
        permission_ids: &[Uuid],
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        // Inserção em massa usando UNNEST para performance
        sqlx::query(
            r#"
            INSERT INTO role_permissions (role_id, permission_id)
            SELECT $1, unnest($2::uuid[])
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(role_id)
        .bind(permission_ids)
        .execute(executor)
        .await?;

        Ok(())
    }

    // 4. Listar todas as permissões disponíveis (para o frontend montar a tela)
    pub async fn list_all_permissions(&self) -> Result<Vec<Permission>, AppError> {
        let permissions = sqlx::query_as::<Postgres, Permission>(
            "SELECT id, name, description, module FROM permissions ORDER BY module, name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(permissions)
    }

    // 5. Vincular Cargo <-> Usuário
    pub async fn assign_role_to_user<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        role_id: Uuid,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO user_roles (user_id, role_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(role_id)
        .execute(executor)
        .await?;

        Ok(())
    }

    // Cargos ativos de um usuário, na ordem de atribuição. É essa coleção,
    // já carregada, que o autorizador recebe — ele nunca consulta o banco.
    pub async fn list_user_roles(&self, user_id: Uuid) -> Result<Vec<Role>, AppError> {
        let roles = sqlx::query_as::<Postgres, Role>(
            r#"
            SELECT r.id, r.name, r.description, r.grants_all, r.is_active,
                   r.created_at, r.updated_at
            FROM user_roles ur
            JOIN roles r ON ur.role_id = r.id
            WHERE ur.user_id = $1
              AND r.is_active = true
            ORDER BY ur.assigned_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(roles)
    }

    pub async fn list_user_assigned_roles(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<AssignedRole>, AppError> {
        let roles = sqlx::query_as::<Postgres, AssignedRole>(
            r#"
            SELECT r.id, r.name, r.description, r.grants_all, ur.assigned_at
            FROM user_roles ur
            JOIN roles r ON ur.role_id = r.id
            WHERE ur.user_id = $1
              AND r.is_active = true
            ORDER BY ur.assigned_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(roles)
    }

    // Cargos do usuário junto com as permissões de cada um. Uma query só
    // (LEFT JOIN) e o agrupamento acontece aqui, em memória.
    pub async fn list_user_role_grants(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<RoleGrants>, AppError> {
        let rows = sqlx::query(
            r#"
            SELECT r.id, r.name, r.description, r.grants_all, r.is_active,
                   r.created_at, r.updated_at,
                   p.name AS permission_name
            FROM user_roles ur
            JOIN roles r ON ur.role_id = r.id
            LEFT JOIN role_permissions rp ON rp.role_id = r.id
            LEFT JOIN permissions p ON p.id = rp.permission_id
            WHERE ur.user_id = $1
              AND r.is_active = true
            ORDER BY ur.assigned_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let mut grants: Vec<RoleGrants> = Vec::new();
        for row in rows {
            let role_id: Uuid = row.try_get("id")?;
            let permission: Option<String> = row.try_get("permission_name")?;

            match grants.iter_mut().find(|g| g.role.id == role_id) {
                Some(grant) => {
                    if let Some(p) = permission {
                        grant.permissions.push(p);
                    }
                }
                None => {
                    let role = Role {
                        id: role_id,
                        name: row.try_get("name")?,
                        description: row.try_get("description")?,
                        grants_all: row.try_get("grants_all")?,
                        is_active: row.try_get("is_active")?,
                        created_at: row.try_get("created_at")?,
                        updated_at: row.try_get("updated_at")?,
                    };
                    grants.push(RoleGrants {
                        role,
                        permissions: permission.into_iter().collect(),
                    });
                }
            }
        }

        Ok(grants)
    }

    // Permissões de um cargo (para montar a resposta de criação)
    pub async fn list_role_permissions<'e, E>(
        &self,
        executor: E,
        role_id: Uuid,
    ) -> Result<Vec<String>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let names = sqlx::query_scalar::<Postgres, String>(
            r#"
            SELECT p.name
            FROM role_permissions rp
            JOIN permissions p ON p.id = rp.permission_id
            WHERE rp.role_id = $1
            ORDER BY p.name
            "#,
        )
        .bind(role_id)
        .fetch_all(executor)
        .await?;

        Ok(names)
    }
}
