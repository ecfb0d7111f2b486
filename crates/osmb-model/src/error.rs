// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for building model construction
//!
//! Structural invalidity aborts the whole building; everything else is
//! reported as a `log` diagnostic at the site that observes it and never
//! reaches this taxonomy.

use crate::{ElementId, NodeId};
use thiserror::Error;

/// Result type alias for model operations
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors that abort building construction
#[derive(Error, Debug)]
pub enum ModelError {
    /// Root way lacks a building tag
    #[error("way {0} is not tagged as a building")]
    NotABuilding(ElementId),

    /// A way reachable as a part is not a closed ring
    #[error("way {id} is not closed ({first} != {last})")]
    UnclosedWay {
        id: ElementId,
        first: NodeId,
        last: NodeId,
    },

    /// A way reachable as a part references no nodes
    #[error("way {0} has no nodes")]
    EmptyWay(ElementId),

    /// The root identifier resolves to neither a way nor a relation
    #[error("element {0} not found in document")]
    ElementNotFound(ElementId),

    /// A way references a node absent from the merged document
    #[error("node {node} referenced by way {way} not found")]
    NodeNotFound { way: ElementId, node: NodeId },

    /// A generic building relation carries no outline member
    #[error("relation {0} has no outline member")]
    MissingOutline(ElementId),

    /// A multipolygon part has no resolvable outer ring
    #[error("relation {0} has no resolvable outer ring")]
    NoOuterRing(ElementId),

    /// Extents accumulation never saw a point
    #[error("extents of element {0} are degenerate")]
    DegenerateExtents(ElementId),

    /// A length-valued tag failed to parse
    #[error("malformed length '{value}' in tag '{key}'")]
    MalformedLength { key: String, value: String },

    /// A numeric tag failed to parse
    #[error("malformed number '{value}' in tag '{key}'")]
    MalformedNumber { key: String, value: String },

    /// Geometry derivation failure
    #[error("geometry error: {0}")]
    Geometry(String),

    /// XML text could not be parsed into a document
    #[error("xml parse error: {0}")]
    Xml(String),

    /// A document source call failed
    #[error("document fetch error: {0}")]
    Fetch(String),
}

impl ModelError {
    /// Create a malformed-length error
    pub fn malformed_length(key: impl Into<String>, value: impl Into<String>) -> Self {
        ModelError::MalformedLength {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Create a malformed-number error
    pub fn malformed_number(key: impl Into<String>, value: impl Into<String>) -> Self {
        ModelError::MalformedNumber {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Create a geometry error
    pub fn geometry(msg: impl Into<String>) -> Self {
        ModelError::Geometry(msg.into())
    }

    /// Create an XML parse error
    pub fn xml(msg: impl Into<String>) -> Self {
        ModelError::Xml(msg.into())
    }

    /// Create a document fetch error
    pub fn fetch(msg: impl Into<String>) -> Self {
        ModelError::Fetch(msg.into())
    }
}
