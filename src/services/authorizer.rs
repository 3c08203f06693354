// src/services/authorizer.rs

// O autorizador é computação pura: recebe as coleções de cargos/permissões
// JÁ carregadas (quem consulta o banco é o chamador) e devolve uma decisão.

use crate::models::rbac::Role;

/// Um cargo do usuário com as permissões que ele concede.
#[derive(Debug, Clone)]
pub struct RoleGrants {
    pub role: Role,
    pub permissions: Vec<String>,
}

/// Resultado de uma verificação de acesso. Negar não é erro: o chamador
/// traduz cada variante para a resposta HTTP adequada.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    /// O usuário não tem cargo nenhum (cadastro recém-criado).
    DenyNoRole,
    /// O usuário tem cargos, mas nenhum dos exigidos.
    DenyInsufficientRole,
}

/// O usuário tem um cargo com exatamente esse nome?
pub fn has_role(roles: &[Role], name: &str) -> bool {
    roles.iter().any(|r| r.name == name)
}

/// O usuário tem algum dos cargos listados? Nomes desconhecidos apenas
/// não casam — nunca viram erro.
pub fn has_any_role(roles: &[Role], names: &[&str]) -> bool {
    roles.iter().any(|r| names.contains(&r.name.as_str()))
}

/// O usuário tem a permissão, considerando a UNIÃO das permissões de todos
/// os seus cargos? Sem cargo nenhum, a resposta é sempre false.
pub fn has_permission(grants: &[RoleGrants], permission: &str) -> bool {
    grants
        .iter()
        .flat_map(|g| g.permissions.iter())
        .any(|p| p == permission)
}

/// Decide o acesso a uma ação.
///
/// 1. Qualquer cargo com `grants_all` libera incondicionalmente.
/// 2. Sem exigência de cargo (`required` vazio/ausente): basta ter algum
///    cargo; sem nenhum, `DenyNoRole`.
/// 3. Com exigência: basta um cargo da lista; senão, `DenyInsufficientRole`.
pub fn authorize(roles: &[Role], required: Option<&[&str]>) -> Decision {
    if roles.iter().any(|r| r.grants_all) {
        return Decision::Allow;
    }

    match required {
        None | Some([]) => {
            if roles.is_empty() {
                Decision::DenyNoRole
            } else {
                Decision::Allow
            }
        }
        Some(names) => {
            if roles.is_empty() {
                Decision::DenyNoRole
            } else if has_any_role(roles, names) {
                Decision::Allow
            } else {
                Decision::DenyInsufficientRole
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn role(name: &str, grants_all: bool) -> Role {
        Role {
            id: Uuid::new_v4(),
            name: name.into(),
            description: None,
            grants_all,
            is_active: true,
            created_at: None,
            updated_at: None,
        }
    }

    fn grants(name: &str, permissions: &[&str]) -> RoleGrants {
        RoleGrants {
            role: role(name, false),
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
        }
    }

    #[test]
    fn user_without_roles_is_denied_with_no_role() {
        assert_eq!(authorize(&[], None), Decision::DenyNoRole);
        assert_eq!(authorize(&[], Some(&["doctor"])), Decision::DenyNoRole);
    }

    #[test]
    fn any_role_is_enough_when_nothing_specific_is_required() {
        let roles = vec![role("patient", false)];
        assert_eq!(authorize(&roles, None), Decision::Allow);
        assert_eq!(authorize(&roles, Some(&[])), Decision::Allow);
    }

    #[test]
    fn grants_all_bypasses_any_required_set() {
        let roles = vec![role("admin", true)];
        assert_eq!(authorize(&roles, Some(&["doctor"])), Decision::Allow);
        assert_eq!(
            authorize(&roles, Some(&["doctor", "receptionist"])),
            Decision::Allow
        );
        assert_eq!(authorize(&roles, None), Decision::Allow);
    }

    #[test]
    fn bypass_comes_from_the_flag_not_from_the_role_name() {
        // Um cargo chamado "admin" mas sem a flag não libera nada.
        let fake_admin = vec![role("admin", false)];
        assert_eq!(
            authorize(&fake_admin, Some(&["doctor"])),
            Decision::DenyInsufficientRole
        );

        // E a flag libera mesmo com outro nome.
        let super_user = vec![role("superintendent", true)];
        assert_eq!(authorize(&super_user, Some(&["doctor"])), Decision::Allow);
    }

    #[test]
    fn holding_none_of_the_required_roles_is_insufficient() {
        let roles = vec![role("nurse", false)];
        assert_eq!(
            authorize(&roles, Some(&["doctor", "receptionist"])),
            Decision::DenyInsufficientRole
        );
    }

    #[test]
    fn holding_one_of_the_required_roles_allows() {
        let roles = vec![role("nurse", false), role("receptionist", false)];
        assert_eq!(
            authorize(&roles, Some(&["doctor", "receptionist"])),
            Decision::Allow
        );
    }

    #[test]
    fn has_role_matches_exact_names_only() {
        let roles = vec![role("doctor", false)];
        assert!(has_role(&roles, "doctor"));
        assert!(!has_role(&roles, "Doctor"));
        assert!(!has_role(&roles, "doc"));
        assert!(!has_role(&roles, "cargo-inexistente"));
    }

    #[test]
    fn has_any_role_is_a_set_intersection() {
        let roles = vec![role("nurse", false), role("patient", false)];
        assert!(has_any_role(&roles, &["patient", "doctor"]));
        assert!(!has_any_role(&roles, &["doctor", "receptionist"]));
        assert!(!has_any_role(&roles, &[]));
    }

    #[test]
    fn permissions_are_unioned_across_all_roles() {
        // Usuário com dois cargos: a permissão pode vir de qualquer um,
        // não só do primeiro carregado.
        let user_grants = vec![
            grants("nurse", &["patients:read"]),
            grants("receptionist", &["billing:write"]),
        ];

        assert!(has_permission(&user_grants, "patients:read"));
        assert!(has_permission(&user_grants, "billing:write"));
        assert!(!has_permission(&user_grants, "salaries:manage"));
    }

    #[test]
    fn no_roles_means_no_permissions() {
        assert!(!has_permission(&[], "patients:read"));
    }
}
