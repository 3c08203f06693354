// src/handlers/rbac.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::rbac::{AdminRoles, RequireRoles},
    models::rbac::{AssignRolePayload, CreateRolePayload},
};

// POST /api/rbac/roles
#[utoipa::path(
    post,
    path = "/api/rbac/roles",
    request_body = CreateRolePayload,
    responses((status = 201, body = crate::models::rbac::RoleResponse), (status = 409)),
    tag = "rbac",
    security(("bearer_auth" = []))
)]
pub async fn create_role(
    State(app_state): State<AppState>,
    _guard: RequireRoles<AdminRoles>,
    Json(payload): Json<CreateRolePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let response = app_state
        .rbac_service
        .create_role_with_permissions(payload.name, payload.description, payload.permissions)
        .await?;

    Ok((StatusCode::CREATED, Json(response)))
}

// GET /api/rbac/permissions (Para o frontend saber o que mostrar na tela de criação)
#[utoipa::path(
    get,
    path = "/api/rbac/permissions",
    responses((status = 200, body = [crate::models::rbac::Permission])),
    tag = "rbac",
    security(("bearer_auth" = []))
)]
pub async fn list_permissions(
    State(app_state): State<AppState>,
    _guard: RequireRoles<AdminRoles>,
) -> Result<impl IntoResponse, AppError> {
    let permissions = app_state.rbac_service.list_system_permissions().await?;
    Ok(Json(permissions))
}

// POST /api/rbac/assignments
#[utoipa::path(
    post,
    path = "/api/rbac/assignments",
    request_body = AssignRolePayload,
    responses((status = 200, body = [crate::models::rbac::AssignedRole]), (status = 404)),
    tag = "rbac",
    security(("bearer_auth" = []))
)]
pub async fn assign_role(
    State(app_state): State<AppState>,
    _guard: RequireRoles<AdminRoles>,
    Json(payload): Json<AssignRolePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let roles = app_state
        .rbac_service
        .assign_role_to_user(payload.user_id, &payload.role_name)
        .await?;

    Ok(Json(roles))
}
