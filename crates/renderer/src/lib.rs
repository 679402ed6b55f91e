//! HVYC template rendering infrastructure adapter.
//!
//! Implements the [`generator::TemplateRenderer`] trait with
//! [`minijinja`], a Jinja2-compatible engine. The default Solidity template,
//! [`DEFAULT_TEMPLATE_NAME`], is embedded in the binary; a template directory
//! can be layered on top so teams can ship their own contract layouts without
//! rebuilding.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** Template lookup, parsing, whitespace control and engine
//! error translation all live here. The [`generator`] crate sees only
//! [`generator::TemplateRenderer`].
//!
//! ## Template contract
//!
//! Templates receive a single root variable, `data`, holding every field of
//! [`generator::ContractRenderData`]. Undefined variables are errors, so a
//! misspelled field fails loudly instead of rendering as an empty string.

use std::path::{Path, PathBuf};

use generator::{ContractRenderData, RenderError, TemplateName, TemplateRenderer};
use minijinja::{context, path_loader, AutoEscape, Environment, ErrorKind, UndefinedBehavior};
use tracing::debug;

/// Name under which the embedded contract template is registered.
pub const DEFAULT_TEMPLATE_NAME: &str = "hvy_template.sol.j2";

/// Source of the embedded contract template.
pub const DEFAULT_TEMPLATE: &str = include_str!("../templates/hvy_template.sol.j2");

/// A [`TemplateRenderer`] backed by a configured [`minijinja::Environment`].
pub struct MiniJinjaRenderer {
    env: Environment<'static>,
    template_dir: Option<PathBuf>,
}

impl MiniJinjaRenderer {
    /// Creates a renderer that knows only the embedded template.
    pub fn new() -> Self {
        let mut env = base_environment();
        env.set_loader(|name| {
            Ok((name == DEFAULT_TEMPLATE_NAME).then(|| DEFAULT_TEMPLATE.to_string()))
        });
        Self {
            env,
            template_dir: None,
        }
    }

    /// Creates a renderer that loads templates from `dir`.
    ///
    /// A file in `dir` takes precedence over the embedded template of the same
    /// name; the embedded template remains available when no such file exists.
    pub fn with_template_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref().to_path_buf();
        let disk = path_loader(dir.clone());
        let mut env = base_environment();
        env.set_loader(move |name| match disk(name)? {
            Some(source) => Ok(Some(source)),
            None if name == DEFAULT_TEMPLATE_NAME => Ok(Some(DEFAULT_TEMPLATE.to_string())),
            None => Ok(None),
        });
        Self {
            env,
            template_dir: Some(dir),
        }
    }

    /// Directory templates are loaded from, if any.
    pub fn template_dir(&self) -> Option<&Path> {
        self.template_dir.as_deref()
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    fn render(
        &self,
        template: &TemplateName,
        data: &ContractRenderData,
    ) -> Result<String, RenderError> {
        let tmpl = self
            .env
            .get_template(template.as_str())
            .map_err(|e| translate(template, &e))?;

        debug!(template = %template, "Rendering template");
        tmpl.render(context! { data => data })
            .map_err(|e| translate(template, &e))
    }
}

fn base_environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_keep_trailing_newline(true);
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    // Solidity, not HTML: string literals must keep their quotes.
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env
}

fn translate(template: &TemplateName, err: &minijinja::Error) -> RenderError {
    let name = template.clone();
    match err.kind() {
        ErrorKind::TemplateNotFound => RenderError::TemplateNotFound { name },
        ErrorKind::SyntaxError => RenderError::Syntax {
            name,
            message: err.to_string(),
        },
        _ => RenderError::Render {
            name,
            message: err.to_string(),
        },
    }
}
