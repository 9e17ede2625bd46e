//! Template engine abstraction.
//!
//! This module defines the [`TemplateEngine`] trait, the two operations the
//! dispatch pipeline needs from a template language. The default
//! implementation is [`MiniJinjaEngine`].

use std::sync::Arc;

use minijinja::{AutoEscape, Environment, ErrorKind, default_auto_escape_callback};
use tf_loader::TemplateLoader;

use crate::context::RenderContext;

/// Name under which inline text is compiled by [`TemplateEngine::substitute`].
const INLINE_TEMPLATE: &str = "<inline>";

/// Error type for template rendering.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Compilation or evaluation failed.
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),
}

/// A template engine that can render named templates and inline text.
pub trait TemplateEngine: Send + Sync {
    /// Render the template at logical path `name` with `context`.
    ///
    /// # Errors
    ///
    /// Returns an error if the template is missing, fails to parse, or fails
    /// to evaluate.
    fn render_template(&self, name: &str, context: &RenderContext) -> Result<String, EngineError>;

    /// Evaluate expressions and control structures embedded in `text`.
    ///
    /// # Errors
    ///
    /// Returns an error if `text` fails to parse or evaluate.
    fn substitute(&self, text: &str, context: &RenderContext) -> Result<String, EngineError>;
}

/// MiniJinja-based template engine.
///
/// Templates are read through the [`TemplateLoader`] on every call, so
/// `{% extends %}` and `{% include %}` see the current template root. Named
/// templates are auto-escaped by suffix (`.html` escapes); inline text is
/// always HTML-escaped.
pub struct MiniJinjaEngine {
    loader: Arc<dyn TemplateLoader>,
}

impl MiniJinjaEngine {
    /// Create an engine reading templates through `loader`.
    #[must_use]
    pub fn new(loader: Arc<dyn TemplateLoader>) -> Self {
        Self { loader }
    }

    /// Build a fresh environment backed by the loader.
    fn environment(&self) -> Environment<'static> {
        let mut env = Environment::new();
        let loader = Arc::clone(&self.loader);
        env.set_loader(move |name| match loader.get_source(name) {
            Ok(source) => Ok(Some(source)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(minijinja::Error::new(
                ErrorKind::InvalidOperation,
                format!("failed to load template {name}"),
            )
            .with_source(err)),
        });
        env.set_auto_escape_callback(|name| {
            if name == INLINE_TEMPLATE {
                AutoEscape::Html
            } else {
                default_auto_escape_callback(name)
            }
        });
        env
    }
}

impl TemplateEngine for MiniJinjaEngine {
    fn render_template(&self, name: &str, context: &RenderContext) -> Result<String, EngineError> {
        let env = self.environment();
        let template = env.get_template(name)?;
        Ok(template.render(context)?)
    }

    fn substitute(&self, text: &str, context: &RenderContext) -> Result<String, EngineError> {
        let env = self.environment();
        Ok(env.render_named_str(INLINE_TEMPLATE, text, context)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tf_loader::MockLoader;

    fn engine(loader: MockLoader) -> MiniJinjaEngine {
        MiniJinjaEngine::new(Arc::new(loader))
    }

    fn context(pairs: &[(&str, &str)]) -> RenderContext {
        let mut context = RenderContext::new();
        for (key, value) in pairs {
            context.insert(*key, *value);
        }
        context
    }

    #[test]
    fn test_render_template() {
        let engine = engine(MockLoader::new().with_template("hello.html", "Hello {{ level_1 }}!"));

        let output = engine
            .render_template("hello.html", &context(&[("level_1", "docs")]))
            .unwrap();

        assert_eq!(output, "Hello docs!");
    }

    #[test]
    fn test_render_template_extends_through_loader() {
        let engine = engine(
            MockLoader::new()
                .with_template("base.html", "<main>{% block body %}{% endblock %}</main>")
                .with_template(
                    "page.html",
                    "{% extends \"base.html\" %}{% block body %}Page{% endblock %}",
                ),
        );

        let output = engine
            .render_template("page.html", &RenderContext::new())
            .unwrap();

        assert_eq!(output, "<main>Page</main>");
    }

    #[test]
    fn test_html_templates_escape_unless_safe() {
        let engine = engine(
            MockLoader::new()
                .with_template("escaped.html", "{{ content }}")
                .with_template("raw.html", "{{ content | safe }}"),
        );
        let context = context(&[("content", "<br>")]);

        assert_eq!(
            engine.render_template("escaped.html", &context).unwrap(),
            "&lt;br&gt;"
        );
        assert_eq!(engine.render_template("raw.html", &context).unwrap(), "<br>");
    }

    #[test]
    fn test_substitute() {
        let engine = engine(MockLoader::new());

        let output = engine
            .substitute(
                "# {{ title }}{% if level_1 %} in {{ level_1 }}{% endif %}",
                &context(&[("title", "Guide"), ("level_1", "docs")]),
            )
            .unwrap();

        assert_eq!(output, "# Guide in docs");
    }

    #[test]
    fn test_substitute_escapes_html() {
        let engine = engine(MockLoader::new());

        let output = engine
            .substitute("{{ name }}", &context(&[("name", "<b>")]))
            .unwrap();

        assert_eq!(output, "&lt;b&gt;");
    }

    #[test]
    fn test_missing_template() {
        let engine = engine(MockLoader::new());

        let err = engine
            .render_template("missing.html", &RenderContext::new())
            .unwrap_err();

        let EngineError::Template(inner) = err;
        assert_eq!(inner.kind(), ErrorKind::TemplateNotFound);
    }

    #[test]
    fn test_loader_failure_is_an_error() {
        let engine = engine(
            MockLoader::new()
                .with_template("page.html", "{% include \"broken.html\" %}")
                .with_failure("broken.html"),
        );

        assert!(
            engine
                .render_template("page.html", &RenderContext::new())
                .is_err()
        );
    }

    #[test]
    fn test_syntax_error() {
        let engine = engine(MockLoader::new());

        assert!(engine.substitute("{% if %}", &RenderContext::new()).is_err());
    }
}
