//! Template engine for prompt management using Jinja2 syntax.
//!
//! Built-in templates are compiled into the binary. Any `.jinja` file found
//! under `templates/prompts/` at startup replaces the built-in of the same name.

use minijinja::{Environment, Value};
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;
use thiserror::Error;

static TEMPLATE_ENV: OnceLock<Environment<'static>> = OnceLock::new();

/// Template directory relative to the working directory
const TEMPLATE_DIR: &str = "templates/prompts";

const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    (
        "recommendation/system.jinja",
        include_str!("../../../templates/prompts/recommendation/system.jinja"),
    ),
    (
        "recommendation/user.jinja",
        include_str!("../../../templates/prompts/recommendation/user.jinja"),
    ),
];

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template '{0}' not found")]
    NotFound(String),

    #[error("Failed to render template: {0}")]
    RenderError(String),
}

fn init_environment() -> Environment<'static> {
    let mut env = Environment::new();

    for &(name, source) in BUILTIN_TEMPLATES {
        if let Err(e) = env.add_template(name, source) {
            tracing::warn!("Failed to load built-in template {}: {}", name, e);
        }
    }

    let template_path = Path::new(TEMPLATE_DIR);
    if template_path.exists() {
        load_templates_recursive(&mut env, template_path, template_path);
    }

    env
}

/// Recursively load all .jinja templates from a directory
fn load_templates_recursive(env: &mut Environment<'static>, base_path: &Path, current_path: &Path) {
    let Ok(entries) = std::fs::read_dir(current_path) else {
        return;
    };

    for path in entries.flatten().map(|entry| entry.path()) {
        if path.is_dir() {
            load_templates_recursive(env, base_path, &path);
            continue;
        }

        if !path.extension().is_some_and(|ext| ext == "jinja") {
            continue;
        }

        let (Ok(relative), Ok(content)) = (path.strip_prefix(base_path), std::fs::read_to_string(&path))
        else {
            continue;
        };

        // Names use forward slashes on every platform
        let name = relative.to_string_lossy().replace('\\', "/");
        // Templates live for the whole process
        let static_name: &'static str = Box::leak(name.clone().into_boxed_str());
        let static_content: &'static str = Box::leak(content.into_boxed_str());
        if let Err(e) = env.add_template(static_name, static_content) {
            tracing::warn!("Failed to load template {}: {}", name, e);
        } else {
            tracing::debug!("Loaded template override: {}", name);
        }
    }
}

fn get_environment() -> &'static Environment<'static> {
    TEMPLATE_ENV.get_or_init(init_environment)
}

/// Render a template with the given context.
///
/// # Example
/// ```ignore
/// let mut ctx = HashMap::new();
/// ctx.insert("json_schema", Value::from(schema));
///
/// let prompt = render_template("recommendation/system.jinja", &ctx)?;
/// ```
pub fn render_template(
    template_name: &str,
    ctx: &HashMap<&str, Value>,
) -> Result<String, TemplateError> {
    let template = get_environment()
        .get_template(template_name)
        .map_err(|_| TemplateError::NotFound(template_name.to_string()))?;

    let render_ctx = Value::from_iter(ctx.iter().map(|(k, v)| (*k, v.clone())));

    template
        .render(render_ctx)
        .map_err(|e| TemplateError::RenderError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_template_is_not_found() {
        let ctx = HashMap::new();

        let result = render_template("nonexistent.jinja", &ctx);

        assert!(matches!(result, Err(TemplateError::NotFound(_))));
    }

    #[test]
    fn test_builtin_system_template_embeds_schema() {
        let mut ctx = HashMap::new();
        ctx.insert("json_schema", Value::from("{\"title\": \"Recommendation\"}"));

        let prompt = render_template("recommendation/system.jinja", &ctx).unwrap();

        assert!(prompt.contains("humanitarian aid"));
        assert!(prompt.contains("\"title\": \"Recommendation\""));
    }
}
