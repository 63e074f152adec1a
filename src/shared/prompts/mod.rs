//! Prompt template management.
//!
//! Templates use Jinja2 syntax and are addressed by their path relative to
//! `templates/prompts/`, e.g. `recommendation/user.jinja`.

pub mod engine;

pub use engine::{render_template, TemplateError};

use crate::core::error::AppError;

impl From<TemplateError> for AppError {
    fn from(error: TemplateError) -> Self {
        tracing::error!("Prompt rendering failed: {}", error);
        AppError::Internal(error.to_string())
    }
}
