pub mod auth;
pub mod config;
pub mod error;
pub mod module;
pub mod types;
pub mod validation;
pub mod view;

pub use auth::{CurrentUser, Identity, RequireUser, SessionResolver, cookie_value, session_middleware};
pub use config::ServiceConfig;
pub use error::ServiceError;
pub use module::Module;
pub use types::{format_rfc3339, new_id, now_rfc3339};
pub use validation::{FieldError, ValidationErrors};
pub use view::Views;
