// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Root classification and structural validation
//!
//! Classification runs once and produces the closed [`BuildingKind`] union;
//! nothing downstream re-derives the kind from tags. Validation walks every
//! way reachable as a part and aborts the whole building on the first
//! closure or node-count violation. A part reference that does not resolve
//! is a diagnostic, not a failure.

use log::warn;
use osmb_model::{BuildingKind, ElementId, ModelError, Result, TagQuery};
use osmb_xml::{ElementRef, MemberRole, OsmDocument};
use rustc_hash::FxHashSet;
use std::collections::VecDeque;

/// Classify the root entity
///
/// A way is always kind=way regardless of its tags; a relation tagged
/// type=multipolygon is a multipolygon even when it also has part members;
/// any other relation is generic.
pub fn classify(document: &OsmDocument, id: ElementId) -> Result<BuildingKind> {
    match document.element(id) {
        Some(ElementRef::Way(_)) => Ok(BuildingKind::Way),
        Some(ElementRef::Relation(relation)) => {
            if relation.is_multipolygon() {
                Ok(BuildingKind::Multipolygon)
            } else {
                Ok(BuildingKind::Relation)
            }
        }
        None => Err(ModelError::ElementNotFound(id)),
    }
}

/// Validate the root entity and everything reachable as a part
///
/// A way root must carry a building tag, reference at least one node, and
/// close its ring. A relation root contributes its role="part" members to
/// a worklist; part relations recurse into their own part members.
pub fn validate(document: &OsmDocument, id: ElementId) -> Result<()> {
    let mut queue: VecDeque<ElementId> = VecDeque::new();

    match document.element(id) {
        None => return Err(ModelError::ElementNotFound(id)),
        Some(ElementRef::Way(way)) => {
            if !way.tags().has_tag("building") {
                return Err(ModelError::NotABuilding(id));
            }
            queue.push_back(id);
        }
        Some(ElementRef::Relation(relation)) => {
            for member in relation.members_with_role(MemberRole::Part) {
                queue.push_back(member.element_id());
            }
        }
    }

    let mut seen: FxHashSet<ElementId> = FxHashSet::default();
    while let Some(current) = queue.pop_front() {
        if !seen.insert(current) {
            continue;
        }
        match document.element(current) {
            None => warn!("part {current} is not present in the document, skipping"),
            Some(ElementRef::Way(way)) => {
                let nodes = way.nodes();
                if nodes.is_empty() {
                    return Err(ModelError::EmptyWay(current));
                }
                if !way.is_closed() {
                    return Err(ModelError::UnclosedWay {
                        id: current,
                        first: nodes[0],
                        last: nodes[nodes.len() - 1],
                    });
                }
            }
            Some(ElementRef::Relation(relation)) => {
                for member in relation.members_with_role(MemberRole::Part) {
                    queue.push_back(member.element_id());
                }
            }
        }
    }
    Ok(())
}

/// Boolean wrapper over [`validate`]
pub fn is_valid(document: &OsmDocument, id: ElementId) -> bool {
    validate(document, id).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLASSIFY_DOC: &str = r#"<osm>
  <node id="1" lat="0.0" lon="0.0"/>
  <node id="2" lat="0.0" lon="1.0"/>
  <node id="3" lat="1.0" lon="1.0"/>
  <way id="10">
    <nd ref="1"/><nd ref="2"/><nd ref="3"/><nd ref="1"/>
    <tag k="building" v="yes"/>
    <tag k="type" v="multipolygon"/>
  </way>
  <relation id="20">
    <member type="way" ref="10" role="outer"/>
    <member type="way" ref="10" role="part"/>
    <tag k="type" v="multipolygon"/>
  </relation>
  <relation id="21">
    <member type="way" ref="10" role="outline"/>
    <tag k="type" v="building"/>
  </relation>
</osm>"#;

    #[test]
    fn way_classifies_as_way_regardless_of_tags() {
        let doc = OsmDocument::parse(CLASSIFY_DOC).unwrap();
        assert_eq!(classify(&doc, ElementId(10)).unwrap(), BuildingKind::Way);
    }

    #[test]
    fn multipolygon_wins_even_with_part_members() {
        let doc = OsmDocument::parse(CLASSIFY_DOC).unwrap();
        assert_eq!(
            classify(&doc, ElementId(20)).unwrap(),
            BuildingKind::Multipolygon
        );
        assert_eq!(
            classify(&doc, ElementId(21)).unwrap(),
            BuildingKind::Relation
        );
    }

    #[test]
    fn missing_root_is_an_error() {
        let doc = OsmDocument::parse(CLASSIFY_DOC).unwrap();
        assert!(matches!(
            classify(&doc, ElementId(99)),
            Err(ModelError::ElementNotFound(_))
        ));
    }

    #[test]
    fn unclosed_way_is_rejected() {
        let doc = OsmDocument::parse(
            r#"<osm>
  <node id="1" lat="0.0" lon="0.0"/>
  <node id="2" lat="0.0" lon="1.0"/>
  <way id="10">
    <nd ref="1"/><nd ref="2"/>
    <tag k="building" v="yes"/>
  </way>
</osm>"#,
        )
        .unwrap();
        assert!(!is_valid(&doc, ElementId(10)));
        assert!(matches!(
            validate(&doc, ElementId(10)),
            Err(ModelError::UnclosedWay { .. })
        ));
    }

    #[test]
    fn empty_way_is_rejected() {
        let doc = OsmDocument::parse(
            r#"<osm><way id="10"><tag k="building" v="yes"/></way></osm>"#,
        )
        .unwrap();
        assert!(matches!(
            validate(&doc, ElementId(10)),
            Err(ModelError::EmptyWay(_))
        ));
    }

    #[test]
    fn way_without_building_tag_is_rejected() {
        let doc = OsmDocument::parse(
            r#"<osm>
  <node id="1" lat="0.0" lon="0.0"/>
  <way id="10"><nd ref="1"/><nd ref="1"/></way>
</osm>"#,
        )
        .unwrap();
        assert!(matches!(
            validate(&doc, ElementId(10)),
            Err(ModelError::NotABuilding(_))
        ));
    }

    #[test]
    fn relation_parts_validate_recursively() {
        let doc = OsmDocument::parse(
            r#"<osm>
  <node id="1" lat="0.0" lon="0.0"/>
  <node id="2" lat="0.0" lon="1.0"/>
  <relation id="20">
    <member type="relation" ref="21" role="part"/>
    <tag k="type" v="building"/>
  </relation>
  <relation id="21">
    <member type="way" ref="10" role="part"/>
  </relation>
  <way id="10">
    <nd ref="1"/><nd ref="2"/>
  </way>
</osm>"#,
        )
        .unwrap();
        // The nested part way is unclosed, which invalidates the whole building.
        assert!(matches!(
            validate(&doc, ElementId(20)),
            Err(ModelError::UnclosedWay { .. })
        ));
    }

    #[test]
    fn dangling_part_reference_is_skipped() {
        let doc = OsmDocument::parse(
            r#"<osm>
  <relation id="20">
    <member type="way" ref="99" role="part"/>
    <tag k="type" v="building"/>
  </relation>
</osm>"#,
        )
        .unwrap();
        assert!(is_valid(&doc, ElementId(20)));
    }
}
