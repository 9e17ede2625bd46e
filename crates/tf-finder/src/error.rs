//! Error types for page dispatch.

use tf_loader::LoaderError;

use crate::engine::EngineError;
use crate::front_matter::FrontMatterError;
use crate::path::TemplateRef;

/// Failure while dispatching a request.
///
/// "No such page" is not an error; see [`Dispatch::NotFound`](crate::Dispatch::NotFound).
#[derive(Debug, thiserror::Error)]
pub enum FinderError {
    /// Reading template source failed for a reason other than "not found".
    #[error(transparent)]
    Source(#[from] LoaderError),

    /// A markdown page carries front matter that does not parse.
    #[error("Malformed front matter in {template}")]
    FrontMatter {
        template: TemplateRef,
        #[source]
        source: FrontMatterError,
    },

    /// Rendering or variable substitution failed.
    #[error(transparent)]
    Engine(#[from] EngineError),
}
