// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # OSMB Geometry
//!
//! Geometry derivation for OSM buildings: the local tangent-plane
//! projection, footprint polygon queries, and roof parameterization.
//!
//! ## Overview
//!
//! - **Projection**: rotate (lon, lat) so the home point lands on the
//!   origin of a planar meter frame
//! - **Footprints**: closed point rings with holes, exposing the extent,
//!   width, centroid, and inscribed-radius queries attribute resolution
//!   depends on, plus earcutr triangulation
//! - **Roofs**: a shape-keyed rule table from resolved options to the
//!   parameter bundle handed to the renderer, including the pyramid fan
//!   mesh
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use osmb_geometry::{reposition, Footprint, roof_geometry};
//!
//! let p = reposition(node, home);
//! let footprint = Footprint::new(projected_ring)?;
//! let roof = roof_geometry(&resolved_options, &footprint)?;
//! ```

pub mod error;
pub mod footprint;
pub mod mesh;
pub mod projection;
pub mod roof;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, Vector2, Vector3};

// Re-export main types
pub use error::{Error, Result};
pub use footprint::Footprint;
pub use mesh::MeshData;
pub use projection::{reposition, EARTH_RADIUS};
pub use roof::{roof_geometry, wall_extrusion_depth, RoofGeometry, ONION_CAP_COLATITUDE};
