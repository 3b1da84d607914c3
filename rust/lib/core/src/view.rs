//! Server-rendered views.
//!
//! Every module owns its templates and registers them on top of the shared
//! layout. Templates ending in `.html` are auto-escaped by minijinja.

use axum::response::Html;
use minijinja::Environment;
use serde::Serialize;

use crate::ServiceError;

const LAYOUT: &str = include_str!("../templates/layout.html");

/// A compiled set of templates: the shared layout plus one module's pages.
pub struct Views {
    env: Environment<'static>,
}

impl Views {
    /// Build an environment from `(name, source)` pairs.
    ///
    /// Pages extend `layout.html` with `{% extends "layout.html" %}`.
    pub fn new(templates: &[(&'static str, &'static str)]) -> Result<Self, ServiceError> {
        let mut env = Environment::new();
        env.add_template("layout.html", LAYOUT)?;
        for (name, source) in templates {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    /// Render a template with the given context.
    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<Html<String>, ServiceError> {
        let tmpl = self.env.get_template(name)?;
        Ok(Html(tmpl.render(ctx)?))
    }
}

impl From<minijinja::Error> for ServiceError {
    fn from(e: minijinja::Error) -> Self {
        ServiceError::Internal(format!("template error: {}", e))
    }
}
