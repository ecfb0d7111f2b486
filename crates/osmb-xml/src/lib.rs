// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! OSMB XML - OSM XML document layer
//!
//! Parses raw OSM XML text into an id-indexed, queryable [`OsmDocument`]
//! and builds the OSM API URLs the document source needs. The modeling
//! core consumes documents through this crate and never touches XML text
//! itself.
//!
//! # Example
//!
//! ```ignore
//! use osmb_xml::OsmDocument;
//!
//! let doc = OsmDocument::parse(xml_text)?;
//! let way = doc.way(id).expect("way in payload");
//! println!("closed: {}", way.is_closed());
//! ```

mod de;

pub mod api;
pub mod document;

pub use api::ApiEndpoints;
pub use document::{
    ElementRef, MemberRole, MemberType, OsmDocument, OsmMember, OsmNode, OsmRelation, OsmWay,
    TagSet,
};

use osmb_model::Result;

/// Parse OSM XML text into an indexed document
pub fn parse(text: &str) -> Result<OsmDocument> {
    OsmDocument::parse(text)
}
