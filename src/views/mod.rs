//! Server-rendered views
//!
//! Templates are compiled into the binary and registered once. Values
//! coming from storage are already escaped when they were submitted, so
//! the registry does not escape a second time.

pub mod entities;

use axum::response::Html;
use handlebars::{Handlebars, TemplateError};
use once_cell::sync::Lazy;
use serde::Serialize;

use crate::error::{AppError, AppResult};

pub use entities::*;

const TEMPLATES: &[(&str, &str)] = &[
    ("layout", include_str!("../../templates/layout.hbs")),
    ("errors", include_str!("../../templates/errors.hbs")),
    ("index", include_str!("../../templates/index.hbs")),
    ("error", include_str!("../../templates/error.hbs")),
    ("author_list", include_str!("../../templates/author_list.hbs")),
    ("author_detail", include_str!("../../templates/author_detail.hbs")),
    ("author_form", include_str!("../../templates/author_form.hbs")),
    ("author_delete", include_str!("../../templates/author_delete.hbs")),
    ("book_list", include_str!("../../templates/book_list.hbs")),
    ("book_detail", include_str!("../../templates/book_detail.hbs")),
    ("book_form", include_str!("../../templates/book_form.hbs")),
    ("book_delete", include_str!("../../templates/book_delete.hbs")),
    ("genre_list", include_str!("../../templates/genre_list.hbs")),
    ("genre_detail", include_str!("../../templates/genre_detail.hbs")),
    ("genre_form", include_str!("../../templates/genre_form.hbs")),
    ("genre_delete", include_str!("../../templates/genre_delete.hbs")),
    ("bookinstance_list", include_str!("../../templates/bookinstance_list.hbs")),
    ("bookinstance_detail", include_str!("../../templates/bookinstance_detail.hbs")),
    ("bookinstance_form", include_str!("../../templates/bookinstance_form.hbs")),
    ("bookinstance_delete", include_str!("../../templates/bookinstance_delete.hbs")),
];

fn build_registry() -> Result<Handlebars<'static>, TemplateError> {
    let mut registry = Handlebars::new();
    registry.register_escape_fn(handlebars::no_escape);
    for (name, source) in TEMPLATES {
        registry.register_template_string(name, source)?;
    }
    Ok(registry)
}

static REGISTRY: Lazy<Result<Handlebars<'static>, TemplateError>> = Lazy::new(build_registry);

/// Render a view to a string
pub fn render_page<T: Serialize>(name: &str, context: &T) -> AppResult<String> {
    let registry = REGISTRY
        .as_ref()
        .map_err(|e| AppError::Template(e.to_string()))?;
    registry
        .render(name, context)
        .map_err(|e| AppError::Template(e.to_string()))
}

pub fn render<T: Serialize>(name: &str, context: &T) -> AppResult<Html<String>> {
    render_page(name, context).map(Html)
}
