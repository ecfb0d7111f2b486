// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! OSMB Model - Shared types and attribute model for OSM building modeling
//!
//! This crate provides the core abstractions shared by the document, geometry,
//! and assembly crates: typed identifiers, bounding extents, the shared node
//! coordinate table, the three-tier building/roof attribute model, and the
//! collaborator traits that keep transport and document parsing external.
//!
//! # Architecture
//!
//! - [`NodeTable`] - the per-building coordinate arena, reprojected once in
//!   place and shared by reference across all parts
//! - [`OptionSet`] / [`SpecifiedOptions`] - the 17-field attribute model with
//!   specified → inherited → computed-default precedence
//! - [`DocumentSource`] - the narrow interface to whatever fetches raw XML
//! - [`TagQuery`] - tag lookup implemented by the document layer
//!
//! # Example
//!
//! ```ignore
//! use osmb_model::{OptionSet, ResolveContext, SpecifiedOptions, ElementId};
//!
//! let specified = SpecifiedOptions::from_tags(&tags)?;
//! let ctx = ResolveContext { id: ElementId(1), inscribed_radius: 4.0, part_role: None };
//! let resolved = OptionSet::resolve(&specified, Some(&outer_options), &ctx);
//! println!("height: {} m", resolved.building.height);
//! ```

pub mod error;
pub mod nodes;
pub mod options;
pub mod snapshot;
pub mod traits;
pub mod types;
pub mod units;

// Re-export all public types
pub use error::*;
pub use nodes::*;
pub use options::*;
pub use snapshot::*;
pub use traits::*;
pub use types::*;
pub use units::{normalize_length, parse_number};
