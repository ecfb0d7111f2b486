// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! OSMB Building - OSM building assembly engine
//!
//! Takes a merged OSM document and derives a self-consistent building
//! model: a home-centered planar frame, one outer element plus parts with
//! per-part footprints, resolved building/roof options with inheritance,
//! and per-part roof geometry parameters.
//!
//! # Pipeline
//!
//! 1. Classify the root (way / multipolygon / generic relation)
//! 2. Validate every way reachable as a part (closure, node count)
//! 3. Build the node table and pick the home point from the root extents
//! 4. Reproject the table in place onto the local planar frame
//! 5. Assemble the outer element and the parts, resolving options top-down
//!
//! # Example
//!
//! ```ignore
//! use osmb_building::Building;
//! use osmb_model::{ElementId, ElementKind};
//!
//! let building = Building::load(&source, ElementKind::Way, ElementId(121486088))?;
//! for unit in building.render_units() {
//!     renderer.extrude(unit.footprint, unit.wall_depth, unit.base_offset);
//! }
//! println!("{:?}", building.info());
//! ```

pub mod building;
pub mod classify;
pub mod extents;
pub mod part;
mod shape;

pub use building::Building;
pub use classify::{classify, is_valid, validate};
pub use extents::building_extents;
pub use part::{BuildingPart, RenderUnit};
pub use shape::{multipolygon_footprint, way_footprint};
