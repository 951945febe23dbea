use axum::Router;

/// A service module that contributes HTTP routes.
///
/// The binary entry point collects every module and merges its routes into
/// a single Router. Routes are mounted at the root: the public API paths
/// (`/register/`, `/tweets/{id}/`, ...) carry no module prefix.
pub trait Module: Send + Sync {
    /// Module name, used for logging.
    fn name(&self) -> &str;

    /// Return the module's routes, already bound to their state.
    fn routes(&self) -> Router;
}
