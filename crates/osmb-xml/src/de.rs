// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Raw serde shapes for OSM XML
//!
//! These mirror the wire format (`<osm><node/><way/><relation/></osm>`)
//! one to one; the indexed document in [`crate::document`] is built from
//! them. Unknown elements and attributes (`<bounds>`, generator info,
//! version markers) are ignored.

use osmb_model::{ModelError, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct OsmXml {
    #[serde(rename = "node", default)]
    pub nodes: Vec<NodeXml>,
    #[serde(rename = "way", default)]
    pub ways: Vec<WayXml>,
    #[serde(rename = "relation", default)]
    pub relations: Vec<RelationXml>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NodeXml {
    #[serde(rename = "@id")]
    pub id: u64,
    #[serde(rename = "@lat")]
    pub lat: f64,
    #[serde(rename = "@lon")]
    pub lon: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WayXml {
    #[serde(rename = "@id")]
    pub id: u64,
    #[serde(rename = "nd", default)]
    pub nds: Vec<NdXml>,
    #[serde(rename = "tag", default)]
    pub tags: Vec<TagXml>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NdXml {
    #[serde(rename = "@ref")]
    pub node_ref: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TagXml {
    #[serde(rename = "@k")]
    pub k: String,
    #[serde(rename = "@v")]
    pub v: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RelationXml {
    #[serde(rename = "@id")]
    pub id: u64,
    #[serde(rename = "member", default)]
    pub members: Vec<MemberXml>,
    #[serde(rename = "tag", default)]
    pub tags: Vec<TagXml>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MemberXml {
    #[serde(rename = "@type")]
    pub member_type: String,
    #[serde(rename = "@ref")]
    pub member_ref: u64,
    #[serde(rename = "@role", default)]
    pub role: String,
}

/// Deserialize raw OSM XML text
pub(crate) fn parse_osm(text: &str) -> Result<OsmXml> {
    quick_xml::de::from_str(text).map_err(|e| ModelError::xml(e.to_string()))
}
