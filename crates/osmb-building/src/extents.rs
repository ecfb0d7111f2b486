// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bounding-extent computation over ways and relations
//!
//! Runs twice per building: once pre-projection on raw (lon, lat), to pick
//! the home point and the bounding box for the inner-data fetch, and again
//! implicitly post-projection through each part's footprint extents.

use crate::shape::way_footprint;
use log::warn;
use osmb_model::{ElementId, Extents, ModelError, NodeId, NodeTable, Result};
use osmb_xml::{ElementRef, MemberRole, MemberType, OsmDocument, OsmRelation};
use rustc_hash::FxHashSet;

/// Compute the extents of the root entity
///
/// - Way: the footprint's bounding box.
/// - Multipolygon relation: union of every resolvable role="outer" member,
///   seeded by the first so a single ring is never widened artificially.
/// - Other relations: every node reachable through the relation's own
///   members, recursively; an empty walk is degenerate and fatal.
pub fn building_extents(
    document: &OsmDocument,
    id: ElementId,
    nodes: &NodeTable,
) -> Result<Extents> {
    match document.element(id) {
        None => Err(ModelError::ElementNotFound(id)),
        Some(ElementRef::Way(way)) => Ok(way_footprint(way, nodes)?.extents()),
        Some(ElementRef::Relation(relation)) => {
            if relation.is_multipolygon() {
                multipolygon_extents(relation, document, nodes)
            } else {
                relation_extents(relation, document, nodes)
            }
        }
    }
}

/// Union of the outer members' boxes, seeded by the first resolvable one
fn multipolygon_extents(
    relation: &OsmRelation,
    document: &OsmDocument,
    nodes: &NodeTable,
) -> Result<Extents> {
    let mut extents: Option<Extents> = None;
    for member in relation.members_with_role(MemberRole::Outer) {
        let Some(way) = document.way(member.element_id()) else {
            warn!(
                "relation {}: outer member {} not found in document, skipping",
                relation.id(),
                member.element_id()
            );
            continue;
        };
        let ring = way_footprint(way, nodes)?.extents();
        extents = Some(match extents {
            Some(acc) => acc.union(&ring),
            None => ring,
        });
    }
    extents.ok_or(ModelError::DegenerateExtents(relation.id()))
}

/// In a generic relation the overall extents may exceed the outline;
/// fold in every node reachable under the relation.
fn relation_extents(
    relation: &OsmRelation,
    document: &OsmDocument,
    nodes: &NodeTable,
) -> Result<Extents> {
    let mut extents = Extents::EMPTY;
    let mut visited = FxHashSet::default();
    include_relation(relation, document, nodes, &mut extents, &mut visited);
    if extents.is_degenerate() {
        Err(ModelError::DegenerateExtents(relation.id()))
    } else {
        Ok(extents)
    }
}

fn include_relation(
    relation: &OsmRelation,
    document: &OsmDocument,
    nodes: &NodeTable,
    extents: &mut Extents,
    visited: &mut FxHashSet<ElementId>,
) {
    if !visited.insert(relation.id()) {
        return;
    }
    for member in relation.members() {
        match member.member_type {
            MemberType::Node => {
                if let Some(coords) = nodes.get(NodeId(member.member_ref)) {
                    extents.include(coords[0], coords[1]);
                }
            }
            MemberType::Way => match document.way(member.element_id()) {
                Some(way) => {
                    for &node_id in way.nodes() {
                        if let Some(coords) = nodes.get(node_id) {
                            extents.include(coords[0], coords[1]);
                        }
                    }
                }
                None => warn!(
                    "relation {}: way member {} not found in document, skipping",
                    relation.id(),
                    member.element_id()
                ),
            },
            MemberType::Relation => match document.relation(member.element_id()) {
                Some(child) => include_relation(child, document, nodes, extents, visited),
                None => warn!(
                    "relation {}: child relation {} not found in document, skipping",
                    relation.id(),
                    member.element_id()
                ),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE_WAY: &str = r#"<osm>
  <node id="1" lat="0.0" lon="0.0"/>
  <node id="2" lat="0.0" lon="1.0"/>
  <node id="3" lat="1.0" lon="1.0"/>
  <node id="4" lat="1.0" lon="0.0"/>
  <way id="10">
    <nd ref="1"/><nd ref="2"/><nd ref="3"/><nd ref="4"/><nd ref="1"/>
    <tag k="building" v="yes"/>
  </way>
</osm>"#;

    #[test]
    fn square_way_extents() {
        let doc = OsmDocument::parse(SQUARE_WAY).unwrap();
        let nodes = doc.node_table();
        let extents = building_extents(&doc, ElementId(10), &nodes).unwrap();
        assert_eq!(extents, Extents::new(0.0, 0.0, 1.0, 1.0));
    }

    const TWO_OUTERS: &str = r#"<osm>
  <node id="1" lat="0.0" lon="0.0"/>
  <node id="2" lat="0.0" lon="1.0"/>
  <node id="3" lat="1.0" lon="1.0"/>
  <node id="4" lat="1.0" lon="0.0"/>
  <node id="5" lat="2.0" lon="2.0"/>
  <node id="6" lat="2.0" lon="3.0"/>
  <node id="7" lat="3.0" lon="3.0"/>
  <way id="10">
    <nd ref="1"/><nd ref="2"/><nd ref="3"/><nd ref="4"/><nd ref="1"/>
  </way>
  <way id="11">
    <nd ref="5"/><nd ref="6"/><nd ref="7"/><nd ref="5"/>
  </way>
  <relation id="20">
    <member type="way" ref="10" role="outer"/>
    <member type="way" ref="11" role="outer"/>
    <tag k="type" v="multipolygon"/>
  </relation>
</osm>"#;

    #[test]
    fn multipolygon_union_is_never_smaller_than_either_ring() {
        let doc = OsmDocument::parse(TWO_OUTERS).unwrap();
        let nodes = doc.node_table();
        let union = building_extents(&doc, ElementId(20), &nodes).unwrap();
        let a = Extents::new(0.0, 0.0, 1.0, 1.0);
        let b = Extents::new(2.0, 2.0, 3.0, 3.0);
        assert!(union.contains(&a));
        assert!(union.contains(&b));
        assert_eq!(union, a.union(&b));
    }

    const GENERIC_RELATION: &str = r#"<osm>
  <node id="1" lat="0.0" lon="0.0"/>
  <node id="2" lat="0.0" lon="1.0"/>
  <node id="3" lat="5.0" lon="5.0"/>
  <way id="10">
    <nd ref="1"/><nd ref="2"/><nd ref="1"/>
  </way>
  <relation id="20">
    <member type="way" ref="10" role="outline"/>
    <member type="node" ref="3" role=""/>
    <tag k="type" v="building"/>
  </relation>
</osm>"#;

    #[test]
    fn generic_relation_covers_all_reachable_nodes() {
        let doc = OsmDocument::parse(GENERIC_RELATION).unwrap();
        let nodes = doc.node_table();
        let extents = building_extents(&doc, ElementId(20), &nodes).unwrap();
        assert_eq!(extents, Extents::new(0.0, 0.0, 5.0, 5.0));
    }

    #[test]
    fn empty_relation_is_degenerate() {
        let doc = OsmDocument::parse(
            r#"<osm><relation id="20"><tag k="type" v="building"/></relation></osm>"#,
        )
        .unwrap();
        let nodes = doc.node_table();
        assert!(matches!(
            building_extents(&doc, ElementId(20), &nodes),
            Err(ModelError::DegenerateExtents(_))
        ));
    }
}
