//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! an unusable selection, out-of-range scatter parameters, and failures reported by the host scene.
use thiserror::Error;

use crate::scene::NodeId;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    /// The first selected element is not a transform node.
    #[error("please ensure the first object you select is a transform ('{node}' is not)")]
    InvalidSource { node: NodeId },

    /// Nothing was selected, or the selection holds no mesh vertices.
    #[error("nothing to scatter: select a transform followed by mesh vertices")]
    EmptySelection,

    /// Scale or rotation range, or density, out of bounds.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A host scene primitive failed.
    #[error("host error on '{node}': {message}")]
    Host { node: NodeId, message: String },

    /// A host failure stopped a run after `created` instances were already in the scene.
    #[error("stopped after creating {created} of {planned} instances: {source}")]
    Interrupted {
        created: usize,
        planned: usize,
        source: Box<Error>,
    },
}

impl Error {
    /// Number of instances a failed run left in the scene.
    pub fn instances_left(&self) -> usize {
        match self {
            Error::Interrupted { created, .. } => *created,
            _ => 0,
        }
    }

    pub(crate) fn host(node: impl Into<NodeId>, message: impl Into<String>) -> Self {
        Error::Host {
            node: node.into(),
            message: message.into(),
        }
    }
}
