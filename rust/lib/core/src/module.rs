use axum::Router;

/// A service module that contributes HTTP routes.
///
/// Each business module (auth, tweet) implements this trait to register
/// its pages. The binary entry point collects all modules and merges their
/// routes into a single Router; paths are absolute.
pub trait Module: Send + Sync {
    /// Module name, used for logging.
    fn name(&self) -> &str;

    /// Return the module's routes, with state already applied.
    fn routes(&self) -> Router;
}
