// src/middleware/rbac.rs

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use std::marker::PhantomData;

use crate::{
    common::error::AppError,
    config::AppState,
    models::auth::User,
    services::authorizer::{self, Decision},
};

/// 1. O Trait que define um conjunto de cargos exigidos
pub trait RoleRequirement: Send + Sync + 'static {
    fn roles() -> &'static [&'static str];
}

/// 2. O Trait que define o que é uma Permissão
pub trait PermissionDef: Send + Sync + 'static {
    fn name() -> &'static str;
}

/// 3. O Extractor (Guardião de cargos)
///
/// Carrega os cargos do usuário e delega a decisão ao autorizador puro.
/// Allow passa; DenyNoRole e DenyInsufficientRole viram 403 com corpos
/// distintos (o frontend trata "sem cargo" como tela de espera).
pub struct RequireRoles<T>(pub PhantomData<T>);

impl<T, S> FromRequestParts<S> for RequireRoles<T>
where
    T: RoleRequirement,
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        // A. Extrai Usuário (inserido pelo auth_guard)
        let user = parts.extensions.get::<User>().ok_or(AppError::InvalidToken)?;

        // B. Carrega os cargos ativos, já materializados
        let roles = app_state.rbac_repo.list_user_roles(user.id).await?;

        // C. Decide
        match authorizer::authorize(&roles, Some(T::roles())) {
            Decision::Allow => Ok(RequireRoles(PhantomData)),
            Decision::DenyNoRole => Err(AppError::RoleNotAssigned),
            Decision::DenyInsufficientRole => Err(AppError::InsufficientPermissions),
        }
    }
}

/// 4. O Extractor (Guardião de permissão específica)
pub struct RequirePermission<T>(pub PhantomData<T>);

impl<T, S> FromRequestParts<S> for RequirePermission<T>
where
    T: PermissionDef,
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let user = parts.extensions.get::<User>().ok_or(AppError::InvalidToken)?;

        let grants = app_state.rbac_repo.list_user_role_grants(user.id).await?;

        if grants.is_empty() {
            return Err(AppError::RoleNotAssigned);
        }

        // Cargo com grants_all dispensa a verificação pontual; fora isso,
        // vale a união das permissões de todos os cargos.
        let allowed = grants.iter().any(|g| g.role.grants_all)
            || authorizer::has_permission(&grants, T::name());

        if !allowed {
            return Err(AppError::InsufficientPermissions);
        }

        Ok(RequirePermission(PhantomData))
    }
}

// ---
// CONJUNTOS DE CARGOS EXIGIDOS POR ROTA
// ---

// O admin nem precisa constar nas listas (grants_all o libera), mas deixamos
// explícito para leitura.

pub struct StaffRoles;
impl RoleRequirement for StaffRoles {
    fn roles() -> &'static [&'static str] {
        &["admin", "doctor", "nurse", "receptionist"]
    }
}

pub struct MedicalRoles;
impl RoleRequirement for MedicalRoles {
    fn roles() -> &'static [&'static str] {
        &["admin", "doctor"]
    }
}

pub struct ReceptionRoles;
impl RoleRequirement for ReceptionRoles {
    fn roles() -> &'static [&'static str] {
        &["admin", "receptionist"]
    }
}

pub struct AdminRoles;
impl RoleRequirement for AdminRoles {
    fn roles() -> &'static [&'static str] {
        &["admin"]
    }
}

// ---
// DEFINIÇÃO DAS PERMISSÕES (TIPOS)
// ---

pub struct PermBillingWrite;
impl PermissionDef for PermBillingWrite {
    fn name() -> &'static str {
        "billing:write"
    }
}

pub struct PermSalariesManage;
impl PermissionDef for PermSalariesManage {
    fn name() -> &'static str {
        "salaries:manage"
    }
}

pub struct PermPrescriptionsWrite;
impl PermissionDef for PermPrescriptionsWrite {
    fn name() -> &'static str {
        "prescriptions:write"
    }
}
