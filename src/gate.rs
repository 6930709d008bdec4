use std::future::Future;

use crate::{
    auth::{Principal, Role},
    error::CatalogError,
};

/// Roles allowed to read the catalog.
pub const CATALOG_READERS: &[Role] = &[Role::Visitor, Role::Member];

/// AuthorizationGate
///
/// Stateless role check placed in front of a catalog operation. The gate admits a
/// principal holding at least one of the required roles and otherwise stops the call
/// before the operation runs.
#[derive(Debug, Clone, Copy)]
pub struct AuthorizationGate {
    required: &'static [Role],
}

impl AuthorizationGate {
    pub const fn any_of(required: &'static [Role]) -> Self {
        Self { required }
    }

    /// The gate used by every read endpoint: VISITOR or MEMBER.
    pub const fn catalog_read() -> Self {
        Self::any_of(CATALOG_READERS)
    }

    pub fn required(&self) -> &'static [Role] {
        self.required
    }

    /// check
    ///
    /// `None` is `Unauthenticated`; a principal without any required role is `Forbidden`.
    pub fn check<'p>(
        &self,
        principal: Option<&'p Principal>,
    ) -> Result<&'p Principal, CatalogError> {
        let principal = principal.ok_or(CatalogError::Unauthenticated)?;

        if !principal.has_any_role(self.required) {
            tracing::info!(
                user_id = %principal.id,
                required = ?self.required,
                "principal lacks a required role"
            );
            return Err(CatalogError::Forbidden);
        }

        Ok(principal)
    }

    /// guard
    ///
    /// Runs `operation` only when `check` passes and returns its result unchanged.
    pub async fn guard<T, F, Fut>(
        &self,
        principal: Option<&Principal>,
        operation: F,
    ) -> Result<T, CatalogError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, CatalogError>>,
    {
        self.check(principal)?;
        operation().await
    }
}
