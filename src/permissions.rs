//! The permission evaluator: pure, total functions over the in-memory session.
//!
//! Two distinct concerns live here and must not be conflated:
//!
//! - **Access control** (`has_role`, `has_any_role`, `has_all_roles`,
//!   `authorize`) is strict set membership. ADMIN does *not* implicitly pass
//!   an ORGANIZER-only gate.
//! - **Content selection** (`select_content`) walks a display-fallback
//!   hierarchy (ADMIN -> ORGANIZER -> ATTENDEE) so higher-privilege users
//!   never see a blank UI slot when no variant was authored for their exact
//!   role. It grants nothing and must never feed `authorize`.
//!
//! None of these functions perform I/O or fail; a missing session or role set
//! is simply unauthenticated/empty.

use std::collections::HashMap;

use crate::models::{Role, Session};

/// PermissionQuery
///
/// An ad-hoc authorization question: which roles are required, and whether all
/// of them are needed or any one suffices. An empty `required_roles` list is
/// the deliberate "public" marker — guards rely on it meaning "no roles
/// required, allow access".
#[derive(Debug, Clone, PartialEq)]
pub struct PermissionQuery {
    pub required_roles: Vec<Role>,
    pub require_all: bool,
}

impl PermissionQuery {
    /// Grants when the session holds *any* of `roles`.
    pub fn any(roles: &[Role]) -> Self {
        Self {
            required_roles: roles.to_vec(),
            require_all: false,
        }
    }

    /// Grants when the session holds *all* of `roles`.
    pub fn all(roles: &[Role]) -> Self {
        Self {
            required_roles: roles.to_vec(),
            require_all: true,
        }
    }

    /// The vacuous query: no roles required, everyone passes.
    pub fn public() -> Self {
        Self::any(&[])
    }
}

/// True iff authenticated and the session's role set contains `role`.
pub fn has_role(session: Option<&Session>, role: Role) -> bool {
    session.is_some_and(|s| s.roles.contains(&role))
}

/// True iff the session's role set intersects `roles`. An empty `roles` list
/// returns true regardless of authentication — vacuous permission.
pub fn has_any_role(session: Option<&Session>, roles: &[Role]) -> bool {
    if roles.is_empty() {
        return true;
    }
    session.is_some_and(|s| roles.iter().any(|r| s.roles.contains(r)))
}

/// True iff the session's role set is a superset of `roles`. An empty list
/// returns true.
pub fn has_all_roles(session: Option<&Session>, roles: &[Role]) -> bool {
    if roles.is_empty() {
        return true;
    }
    session.is_some_and(|s| roles.iter().all(|r| s.roles.contains(r)))
}

/// authorize
///
/// The single access-control decision point consumed by guards.
/// Empty `required_roles` allows access regardless of authentication state;
/// otherwise an unauthenticated session always fails closed, and an
/// authenticated one is checked by strict membership per `require_all`.
///
/// A false result is a normal boolean outcome, not an error.
pub fn authorize(session: Option<&Session>, query: &PermissionQuery) -> bool {
    if query.required_roles.is_empty() {
        return true;
    }
    if session.is_none() {
        return false;
    }
    if query.require_all {
        has_all_roles(session, &query.required_roles)
    } else {
        has_any_role(session, &query.required_roles)
    }
}

/// select_content
///
/// Picks the role-appropriate variant from `content_by_role`, iterating the
/// session's own roles in their stored order, then applying the display
/// fallback: ADMIN falls back to ORGANIZER then ATTENDEE content, ORGANIZER to
/// ATTENDEE content. Anything else (including unauthenticated) gets
/// `fallback`.
pub fn select_content<'a, T>(
    session: Option<&Session>,
    content_by_role: &'a HashMap<Role, T>,
    fallback: &'a T,
) -> &'a T {
    let Some(session) = session else {
        return fallback;
    };
    if session.roles.is_empty() {
        return fallback;
    }

    // Exact matches first, in stored role order.
    for role in &session.roles {
        if let Some(content) = content_by_role.get(role) {
            return content;
        }
    }

    // Display-fallback hierarchy. Content selection only — never authorization.
    if session.roles.contains(&Role::Admin) {
        for role in [Role::Organizer, Role::Attendee] {
            if let Some(content) = content_by_role.get(&role) {
                return content;
            }
        }
    } else if session.roles.contains(&Role::Organizer) {
        if let Some(content) = content_by_role.get(&Role::Attendee) {
            return content;
        }
    }

    fallback
}
