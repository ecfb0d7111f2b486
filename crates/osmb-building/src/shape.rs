// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Footprint extraction from document elements
//!
//! Bridges the document layer and the geometry layer: an ordered node
//! reference list plus the shared coordinate table becomes a footprint
//! polygon. Works on raw (lon, lat) before the reprojection pass and on
//! planar (x, y) after it.

use log::warn;
use osmb_geometry::{Footprint, Point2};
use osmb_model::{ModelError, NodeTable, Result};
use osmb_xml::{MemberRole, OsmDocument, OsmRelation, OsmWay};

/// Build the footprint of a single way
///
/// Every node reference must resolve in the shared table; a way that
/// survived validation but references a node missing from the merged
/// document is structural breakage, not a skippable diagnostic.
pub fn way_footprint(way: &OsmWay, nodes: &NodeTable) -> Result<Footprint> {
    let mut points = Vec::with_capacity(way.nodes().len());
    for &node_id in way.nodes() {
        let coords = nodes.get(node_id).ok_or(ModelError::NodeNotFound {
            way: way.id(),
            node: node_id,
        })?;
        points.push(Point2::new(coords[0], coords[1]));
    }
    Footprint::new(points).map_err(ModelError::from)
}

/// Build the footprint of a multipolygon relation
///
/// The first resolvable role="outer" ring becomes the outer boundary;
/// every role="inner" ring whose box falls inside it is attached as a
/// hole. Additional outer rings and out-of-bounds inner rings are logged
/// and skipped.
pub fn multipolygon_footprint(
    relation: &OsmRelation,
    document: &OsmDocument,
    nodes: &NodeTable,
) -> Result<Footprint> {
    let mut outer: Option<Footprint> = None;
    for member in relation.members_with_role(MemberRole::Outer) {
        let Some(way) = document.way(member.element_id()) else {
            warn!(
                "relation {}: outer ring {} not found in document, skipping",
                relation.id(),
                member.element_id()
            );
            continue;
        };
        if outer.is_some() {
            warn!(
                "relation {}: multiple outer rings, keeping the first",
                relation.id()
            );
            continue;
        }
        outer = Some(way_footprint(way, nodes)?);
    }

    let mut footprint = outer.ok_or(ModelError::NoOuterRing(relation.id()))?;
    let bounds = footprint.extents();

    for member in relation.members_with_role(MemberRole::Inner) {
        let Some(way) = document.way(member.element_id()) else {
            warn!(
                "relation {}: inner ring {} not found in document, skipping",
                relation.id(),
                member.element_id()
            );
            continue;
        };
        let hole = way_footprint(way, nodes)?;
        if bounds.contains(&hole.extents()) {
            footprint.add_hole(hole.outer().to_vec());
        } else {
            warn!(
                "relation {}: inner ring {} lies outside the outer ring, skipping",
                relation.id(),
                way.id()
            );
        }
    }

    Ok(footprint)
}
