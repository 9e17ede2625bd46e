//! Request dispatch: resolve, branch on template kind, render.

use std::sync::Arc;

use tf_loader::{LoaderError, TemplateLoader};
use tf_renderer::MarkdownRenderer;

use crate::context::RenderContext;
use crate::engine::{MiniJinjaEngine, TemplateEngine};
use crate::error::FinderError;
use crate::front_matter::{self, FrontMatter};
use crate::path::{TemplateKind, TemplateRef, UrlPath};
use crate::resolver::{PathResolver, template_exists};

/// Body of every 404 response for `path`.
#[must_use]
pub fn not_found_message(path: &UrlPath) -> String {
    format!("Can't find page for: {path}")
}

/// Outcome of dispatching a request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Rendered page body.
    Page(String),
    /// No renderable page at this path.
    NotFound,
}

impl Dispatch {
    /// HTTP status code for this outcome.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Page(_) => 200,
            Self::NotFound => 404,
        }
    }
}

/// Maps request paths to rendered pages.
///
/// Holds no per-request state; every call re-resolves and re-renders from the
/// template root. Safe to share across request handlers.
pub struct TemplateFinder<E: TemplateEngine = MiniJinjaEngine> {
    loader: Arc<dyn TemplateLoader>,
    resolver: PathResolver,
    engine: E,
    markdown: MarkdownRenderer,
}

impl TemplateFinder {
    /// Create a finder over `loader` with the default [`MiniJinjaEngine`].
    #[must_use]
    pub fn new(loader: Arc<dyn TemplateLoader>) -> Self {
        Self {
            resolver: PathResolver::new(Arc::clone(&loader)),
            engine: MiniJinjaEngine::new(Arc::clone(&loader)),
            markdown: MarkdownRenderer::new(),
            loader,
        }
    }
}

impl<E: TemplateEngine> TemplateFinder<E> {
    /// Replace the template engine.
    #[must_use]
    pub fn with_engine<G: TemplateEngine>(self, engine: G) -> TemplateFinder<G> {
        TemplateFinder {
            loader: self.loader,
            resolver: self.resolver,
            engine,
            markdown: self.markdown,
        }
    }

    /// Resolve `path` to its template without rendering.
    ///
    /// # Errors
    ///
    /// Returns the loader error if probing fails for a reason other than
    /// "not found".
    pub fn resolve(&self, path: &UrlPath) -> Result<Option<TemplateRef>, LoaderError> {
        self.resolver.resolve(path)
    }

    /// Resolve and render the page at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if template source cannot be read, front matter is
    /// malformed, or rendering fails. A missing page is [`Dispatch::NotFound`].
    pub fn dispatch(&self, path: &UrlPath) -> Result<Dispatch, FinderError> {
        let Some(template) = self.resolver.resolve(path)? else {
            return Ok(Dispatch::NotFound);
        };

        match template.kind() {
            Some(TemplateKind::Markdown) => self.render_markdown_page(path, &template),
            _ => {
                let context = RenderContext::for_path(path);
                let body = self.engine.render_template(template.name(), &context)?;
                tracing::info!(path = %path, template = %template, "Rendered page");
                Ok(Dispatch::Page(body))
            }
        }
    }

    /// Handle a raw request path, returning `(body, status)`.
    ///
    /// # Errors
    ///
    /// Same as [`dispatch`](Self::dispatch).
    pub fn handle(&self, raw_path: &str) -> Result<(String, u16), FinderError> {
        let path = UrlPath::new(raw_path);
        let dispatch = self.dispatch(&path)?;
        let status = dispatch.status_code();
        let body = match dispatch {
            Dispatch::Page(body) => body,
            Dispatch::NotFound => not_found_message(&path),
        };
        Ok((body, status))
    }

    fn render_markdown_page(
        &self,
        path: &UrlPath,
        template: &TemplateRef,
    ) -> Result<Dispatch, FinderError> {
        let source = self.loader.get_source(template.name())?;
        let document = front_matter::parse(&source).map_err(|source| FinderError::FrontMatter {
            template: template.clone(),
            source,
        })?;
        let FrontMatter {
            wrapper_template,
            context: page_context,
            markdown_includes,
            ..
        } = document.metadata;

        let Some(wrapper) = wrapper_template else {
            tracing::debug!(template = %template, "Markdown page has no wrapper_template");
            return Ok(Dispatch::NotFound);
        };
        if !template_exists(self.loader.as_ref(), wrapper.name())? {
            tracing::debug!(template = %template, wrapper = %wrapper, "Wrapper template missing");
            return Ok(Dispatch::NotFound);
        }

        let mut context = RenderContext::for_path(path);
        context.merge(page_context);

        // Includes are substituted against the context as it stood before
        // any of them were expanded.
        let snapshot = context.clone();
        for (key, include) in markdown_includes {
            let raw = self.loader.get_source(include.name())?;
            let html = self.render_markdown(&raw, &snapshot)?;
            context.insert(key, html);
        }

        let content = self.render_markdown(&document.body, &context)?;
        context.insert("content", content);

        let body = self.engine.render_template(wrapper.name(), &context)?;
        tracing::info!(path = %path, template = %template, wrapper = %wrapper, "Rendered markdown page");
        Ok(Dispatch::Page(body))
    }

    /// Substitute variables in `text`, then render it as markdown.
    fn render_markdown(&self, text: &str, context: &RenderContext) -> Result<String, FinderError> {
        let substituted = self.engine.substitute(text, context)?;
        Ok(self.markdown.render(&substituted))
    }
}
