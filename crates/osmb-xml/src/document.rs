// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Indexed OSM document
//!
//! The id-indexed, queryable view over one or more parsed OSM XML payloads.
//! Ways and relations live in separate id spaces; [`OsmDocument::element`]
//! resolves an identifier against both, ways first, for call sites that
//! follow untyped references.

use crate::de::{parse_osm, TagXml};
use log::warn;
use osmb_model::{ElementId, NodeId, NodeTable, Result, TagQuery};
use rustc_hash::FxHashMap;

/// Element kind of a relation member reference
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MemberType {
    Node,
    Way,
    Relation,
}

impl MemberType {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "node" => Some(MemberType::Node),
            "way" => Some(MemberType::Way),
            "relation" => Some(MemberType::Relation),
            _ => None,
        }
    }
}

/// Role string of a relation member, as a closed union
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum MemberRole {
    Outer,
    Inner,
    Part,
    Outline,
    Other(String),
}

impl MemberRole {
    fn parse(s: &str) -> Self {
        match s {
            "outer" => MemberRole::Outer,
            "inner" => MemberRole::Inner,
            "part" => MemberRole::Part,
            "outline" => MemberRole::Outline,
            _ => MemberRole::Other(s.to_string()),
        }
    }
}

/// One typed member reference inside a relation
#[derive(Clone, Debug)]
pub struct OsmMember {
    pub member_type: MemberType,
    pub member_ref: u64,
    pub role: MemberRole,
}

impl OsmMember {
    /// The reference as an element identifier (meaningful for way/relation members)
    pub fn element_id(&self) -> ElementId {
        ElementId(self.member_ref)
    }
}

/// Key/value tags of one element
#[derive(Clone, Debug, Default)]
pub struct TagSet {
    map: FxHashMap<String, String>,
}

impl TagSet {
    fn from_xml(tags: Vec<TagXml>) -> Self {
        Self {
            map: tags.into_iter().map(|t| (t.k, t.v)).collect(),
        }
    }

    /// Number of tags
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// True when the element carries no tags
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl TagQuery for TagSet {
    fn tag(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(String::as_str)
    }
}

/// A raw OSM node: identifier plus geographic position
#[derive(Clone, Copy, Debug)]
pub struct OsmNode {
    pub id: NodeId,
    pub lon: f64,
    pub lat: f64,
}

/// An ordered sequence of node references with tags
#[derive(Clone, Debug)]
pub struct OsmWay {
    id: ElementId,
    nodes: Vec<NodeId>,
    tags: TagSet,
}

impl OsmWay {
    /// The way's identifier
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// The ordered node references
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Tags on the way
    pub fn tags(&self) -> &TagSet {
        &self.tags
    }

    /// A tag value, if present
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.tag(key)
    }

    /// True when the first and last node references match
    ///
    /// An empty way is not closed.
    pub fn is_closed(&self) -> bool {
        match (self.nodes.first(), self.nodes.last()) {
            (Some(first), Some(last)) => first == last,
            _ => false,
        }
    }
}

/// A tagged collection of typed member references
#[derive(Clone, Debug)]
pub struct OsmRelation {
    id: ElementId,
    members: Vec<OsmMember>,
    tags: TagSet,
}

impl OsmRelation {
    /// The relation's identifier
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// All members in document order
    pub fn members(&self) -> &[OsmMember] {
        &self.members
    }

    /// Members carrying a specific role
    pub fn members_with_role(&self, role: MemberRole) -> impl Iterator<Item = &OsmMember> {
        self.members.iter().filter(move |m| m.role == role)
    }

    /// Tags on the relation
    pub fn tags(&self) -> &TagSet {
        &self.tags
    }

    /// A tag value, if present
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.tag(key)
    }

    /// True when this relation is tagged type=multipolygon
    pub fn is_multipolygon(&self) -> bool {
        self.tag("type") == Some("multipolygon")
    }
}

/// A way or relation, resolved from an untyped reference
#[derive(Clone, Copy, Debug)]
pub enum ElementRef<'a> {
    Way(&'a OsmWay),
    Relation(&'a OsmRelation),
}

impl ElementRef<'_> {
    /// The element's identifier
    pub fn id(&self) -> ElementId {
        match self {
            ElementRef::Way(w) => w.id(),
            ElementRef::Relation(r) => r.id(),
        }
    }

    /// A tag value, if present
    pub fn tag(&self, key: &str) -> Option<&str> {
        match self {
            ElementRef::Way(w) => w.tag(key),
            ElementRef::Relation(r) => r.tag(key),
        }
    }
}

/// Id-indexed view over one or more merged OSM XML payloads
#[derive(Clone, Debug, Default)]
pub struct OsmDocument {
    nodes: FxHashMap<NodeId, OsmNode>,
    ways: FxHashMap<ElementId, OsmWay>,
    relations: FxHashMap<ElementId, OsmRelation>,
}

impl OsmDocument {
    /// Parse OSM XML text into an indexed document
    pub fn parse(text: &str) -> Result<Self> {
        let raw = parse_osm(text)?;
        let mut doc = OsmDocument::default();

        for n in raw.nodes {
            doc.nodes.insert(
                NodeId(n.id),
                OsmNode {
                    id: NodeId(n.id),
                    lon: n.lon,
                    lat: n.lat,
                },
            );
        }
        for w in raw.ways {
            let id = ElementId(w.id);
            doc.ways.insert(
                id,
                OsmWay {
                    id,
                    nodes: w.nds.into_iter().map(|nd| NodeId(nd.node_ref)).collect(),
                    tags: TagSet::from_xml(w.tags),
                },
            );
        }
        for r in raw.relations {
            let id = ElementId(r.id);
            let members = r
                .members
                .into_iter()
                .filter_map(|m| match MemberType::parse(&m.member_type) {
                    Some(member_type) => Some(OsmMember {
                        member_type,
                        member_ref: m.member_ref,
                        role: MemberRole::parse(&m.role),
                    }),
                    None => {
                        warn!(
                            "relation {id}: skipping member with unknown type '{}'",
                            m.member_type
                        );
                        None
                    }
                })
                .collect();
            doc.relations.insert(
                id,
                OsmRelation {
                    id,
                    members,
                    tags: TagSet::from_xml(r.tags),
                },
            );
        }
        Ok(doc)
    }

    /// Fold another document into this one
    ///
    /// Existing entries win, so the payload parsed first keeps authority
    /// over elements appearing in both fetches.
    pub fn merge(&mut self, other: OsmDocument) {
        for (id, node) in other.nodes {
            self.nodes.entry(id).or_insert(node);
        }
        for (id, way) in other.ways {
            self.ways.entry(id).or_insert(way);
        }
        for (id, relation) in other.relations {
            self.relations.entry(id).or_insert(relation);
        }
    }

    /// Look up a node
    pub fn node(&self, id: NodeId) -> Option<&OsmNode> {
        self.nodes.get(&id)
    }

    /// Look up a way
    pub fn way(&self, id: ElementId) -> Option<&OsmWay> {
        self.ways.get(&id)
    }

    /// Look up a relation
    pub fn relation(&self, id: ElementId) -> Option<&OsmRelation> {
        self.relations.get(&id)
    }

    /// Resolve an untyped reference, ways first
    pub fn element(&self, id: ElementId) -> Option<ElementRef<'_>> {
        self.way(id)
            .map(ElementRef::Way)
            .or_else(|| self.relation(id).map(ElementRef::Relation))
    }

    /// Iterate over all ways
    pub fn ways(&self) -> impl Iterator<Item = &OsmWay> {
        self.ways.values()
    }

    /// Iterate over all relations
    pub fn relations(&self) -> impl Iterator<Item = &OsmRelation> {
        self.relations.values()
    }

    /// Number of nodes in the document
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Build the shared coordinate table from every node in the document
    pub fn node_table(&self) -> NodeTable {
        let mut table = NodeTable::new();
        for node in self.nodes.values() {
            table.insert(node.id, [node.lon, node.lat]);
        }
        table
    }
}
