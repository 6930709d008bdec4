/// Router Module Index
///
/// Splits the routes by who may reach them. Role checks for the catalog happen inside
/// each handler through the `AuthorizationGate`, so no route here relies on a layer
/// for access control.

/// Routes accessible to anyone (health check).
pub mod public;

/// Catalog read routes. Every handler requires the VISITOR or MEMBER role.
pub mod catalog;
