// src/models/rbac.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// O que sai do banco (Tabela Roles)
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,

    #[schema(example = "doctor")]
    pub name: String,

    #[schema(example = "Médico")]
    pub description: Option<String>,

    // Flag explícita de acesso total. Substitui a comparação com o nome
    // "admin": quem decide é a capacidade do cargo, não a string.
    pub grants_all: bool,

    pub is_active: bool,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

// O que sai do banco (Tabela Permissions)
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440001")]
    pub id: Uuid,

    #[schema(example = "patients:read")]
    pub name: String,

    #[schema(example = "Visualizar pacientes")]
    pub description: Option<String>,

    #[schema(example = "PATIENTS")]
    pub module: String,
}

// Cargo de um usuário com o momento da atribuição (tabela user_roles)
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignedRole {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub grants_all: bool,
    pub assigned_at: DateTime<Utc>,
}

// O Payload para criar um cargo
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRolePayload {
    #[validate(length(min = 1, message = "O nome do cargo é obrigatório."))]
    #[schema(example = "lab_technician")]
    pub name: String,

    #[schema(example = "Técnico de laboratório")]
    pub description: Option<String>,

    #[schema(example = json!(["patients:read", "appointments:read"]))]
    pub permissions: Vec<String>, // Nomes das permissões
}

// O Payload para vincular um cargo a um usuário
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignRolePayload {
    pub user_id: Uuid,

    #[validate(length(min = 1, message = "O nome do cargo é obrigatório."))]
    #[schema(example = "nurse")]
    pub role_name: String,
}

// Resposta completa (Cargo + Lista de Permissões)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoleResponse {
    #[serde(flatten)]
    pub role: Role,

    #[schema(example = json!(["patients:read", "appointments:read"]))]
    pub permissions: Vec<String>,
}
