// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for geometry derivation

use thiserror::Error;

/// Geometry derivation result type
pub type Result<T> = std::result::Result<T, Error>;

/// Geometry derivation errors
#[derive(Error, Debug)]
pub enum Error {
    /// The resolved roof shape has no parameterization
    #[error("unsupported roof shape: {0}")]
    UnsupportedRoofShape(String),

    /// The footprint cannot support the requested derivation
    #[error("footprint error: {0}")]
    Footprint(String),

    /// Polygon triangulation failure
    #[error("triangulation error: {0}")]
    Triangulation(String),
}

impl Error {
    /// Create an unsupported-roof-shape error
    pub fn unsupported_roof_shape(shape: impl Into<String>) -> Self {
        Error::UnsupportedRoofShape(shape.into())
    }

    /// Create a footprint error
    pub fn footprint(msg: impl Into<String>) -> Self {
        Error::Footprint(msg.into())
    }

    /// Create a triangulation error
    pub fn triangulation(msg: impl Into<String>) -> Self {
        Error::Triangulation(msg.into())
    }
}

impl From<Error> for osmb_model::ModelError {
    fn from(e: Error) -> Self {
        osmb_model::ModelError::geometry(e.to_string())
    }
}
