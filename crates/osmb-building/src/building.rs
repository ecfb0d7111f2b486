// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Building assembly
//!
//! The root entity's document is classified, validated, and turned into a
//! hierarchy of one outer element plus zero or more parts, all sharing one
//! reprojected node table. Construction is all-or-nothing: structural
//! invalidity aborts and no partial model is returned.

use crate::classify::{classify, validate};
use crate::extents::building_extents;
use crate::part::{BuildingPart, RenderUnit};
use log::{debug, warn};
use osmb_geometry::reposition;
use osmb_model::{
    BuildingInfo, BuildingKind, DocumentSource, ElementId, ElementKind, LonLat, ModelError,
    NodeTable, OptionSet, Result, TagQuery,
};
use osmb_xml::{ElementRef, MemberRole, OsmDocument};
use std::sync::Arc;

/// An assembled OSM building
///
/// Owns the merged document, the home point, the shared projected node
/// table, the outer element, and the ordered parts. When the parts list is
/// empty the outer element is the sole renderable unit.
#[derive(Debug)]
pub struct Building {
    id: ElementId,
    kind: BuildingKind,
    home: LonLat,
    nodes: Arc<NodeTable>,
    document: OsmDocument,
    outer: BuildingPart,
    parts: Vec<BuildingPart>,
}

impl Building {
    /// Fetch and assemble a building through a document source
    ///
    /// Two-phase retrieval: the root entity's own XML first, then, from its
    /// extents, the bounding-box XML covering the neighborhood. The merged
    /// document feeds [`Building::from_document`].
    pub fn load(source: &dyn DocumentSource, kind: ElementKind, id: ElementId) -> Result<Self> {
        let text = match kind {
            ElementKind::Way => source.way_xml(id)?,
            ElementKind::Relation => source.relation_xml(id)?,
        };
        let seed = OsmDocument::parse(&text)?;
        let nodes = seed.node_table();
        let extents = building_extents(&seed, id, &nodes)?;

        let inner = source.bbox_xml(&extents)?;
        let mut document = OsmDocument::parse(&inner)?;
        document.merge(seed);
        Self::from_document(id, document)
    }

    /// Assemble a building from an already-merged document
    pub fn from_document(id: ElementId, document: OsmDocument) -> Result<Self> {
        let kind = classify(&document, id)?;
        validate(&document, id)?;

        let mut nodes = document.node_table();
        let extents = building_extents(&document, id, &nodes)?;
        let home = extents.center();
        nodes.map_in_place(|[lon, lat]| {
            let p = reposition(LonLat::new(lon, lat), home);
            [p.x, p.y]
        });
        let nodes = Arc::new(nodes);

        let outer = Self::outer_element(&document, id, kind, &nodes)?;
        let parts = Self::collect_parts(&document, id, kind, &nodes, &outer)?;

        Ok(Self {
            id,
            kind,
            home,
            nodes,
            document,
            outer,
            parts,
        })
    }

    /// Determine and build the outer element
    ///
    /// Way roots are their own outer element; multipolygon roots use the
    /// relation's own rings; generic relations follow the outline member,
    /// whose element kind selects the simple or multipolygon form.
    fn outer_element(
        document: &OsmDocument,
        id: ElementId,
        kind: BuildingKind,
        nodes: &Arc<NodeTable>,
    ) -> Result<BuildingPart> {
        match kind {
            BuildingKind::Way => {
                let way = document.way(id).ok_or(ModelError::ElementNotFound(id))?;
                BuildingPart::from_way(way, nodes, None)
            }
            BuildingKind::Multipolygon => {
                let relation = document
                    .relation(id)
                    .ok_or(ModelError::ElementNotFound(id))?;
                BuildingPart::from_relation(relation, document, nodes, None)
            }
            BuildingKind::Relation => {
                let relation = document
                    .relation(id)
                    .ok_or(ModelError::ElementNotFound(id))?;
                let outline = relation
                    .members_with_role(MemberRole::Outline)
                    .next()
                    .ok_or(ModelError::MissingOutline(id))?;
                let outline_id = outline.element_id();
                match document.element(outline_id) {
                    Some(ElementRef::Way(way)) => BuildingPart::from_way(way, nodes, None),
                    Some(ElementRef::Relation(outline_relation)) => {
                        BuildingPart::from_relation(outline_relation, document, nodes, None)
                    }
                    None => Err(ModelError::ElementNotFound(outline_id)),
                }
            }
        }
    }

    /// Collect the building's parts
    ///
    /// Relation kinds walk their role="part" members. Way roots scan the
    /// whole merged document for building:part elements, scoped to those
    /// whose extents intersect the outer element's; the bounding-box fetch
    /// can bring in unrelated neighbors.
    fn collect_parts(
        document: &OsmDocument,
        id: ElementId,
        kind: BuildingKind,
        nodes: &Arc<NodeTable>,
        outer: &BuildingPart,
    ) -> Result<Vec<BuildingPart>> {
        let inherited = Some(outer.options());
        let mut parts = Vec::new();

        match kind {
            BuildingKind::Multipolygon | BuildingKind::Relation => {
                let relation = document
                    .relation(id)
                    .ok_or(ModelError::ElementNotFound(id))?;
                for member in relation.members_with_role(MemberRole::Part) {
                    match document.element(member.element_id()) {
                        Some(ElementRef::Way(way)) => {
                            parts.push(BuildingPart::from_way(way, nodes, inherited)?);
                        }
                        Some(ElementRef::Relation(child)) => {
                            parts.push(BuildingPart::from_relation(
                                child, document, nodes, inherited,
                            )?);
                        }
                        None => warn!(
                            "part {} is not present in the document, skipping",
                            member.element_id()
                        ),
                    }
                }
            }
            BuildingKind::Way => {
                let bounds = outer.footprint().extents();

                let mut way_ids: Vec<ElementId> = document
                    .ways()
                    .filter(|w| w.id() != id && w.tags().has_tag("building:part"))
                    .map(|w| w.id())
                    .collect();
                way_ids.sort_unstable_by_key(|w| w.0);
                for way_id in way_ids {
                    let Some(way) = document.way(way_id) else {
                        continue;
                    };
                    match BuildingPart::from_way(way, nodes, inherited) {
                        Ok(part) => {
                            if part.footprint().extents().intersects(&bounds) {
                                parts.push(part);
                            } else {
                                debug!(
                                    "building:part way {way_id} lies outside the building extents, skipping"
                                );
                            }
                        }
                        Err(e) => warn!("skipping building:part way {way_id}: {e}"),
                    }
                }

                let mut relation_ids: Vec<ElementId> = document
                    .relations()
                    .filter(|r| r.id() != id && r.tags().has_tag("building:part"))
                    .map(|r| r.id())
                    .collect();
                relation_ids.sort_unstable_by_key(|r| r.0);
                for relation_id in relation_ids {
                    let Some(relation) = document.relation(relation_id) else {
                        continue;
                    };
                    match BuildingPart::from_relation(relation, document, nodes, inherited) {
                        Ok(part) => {
                            if part.footprint().extents().intersects(&bounds) {
                                parts.push(part);
                            } else {
                                debug!(
                                    "building:part relation {relation_id} lies outside the building extents, skipping"
                                );
                            }
                        }
                        Err(e) => warn!("skipping building:part relation {relation_id}: {e}"),
                    }
                }
            }
        }

        Ok(parts)
    }

    /// The root identifier
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// The root classification
    pub fn kind(&self) -> BuildingKind {
        self.kind
    }

    /// The geographic origin of the local planar frame
    pub fn home(&self) -> LonLat {
        self.home
    }

    /// The shared projected node table
    pub fn nodes(&self) -> &Arc<NodeTable> {
        &self.nodes
    }

    /// The merged document the building was assembled from
    pub fn document(&self) -> &OsmDocument {
        &self.document
    }

    /// The outer element
    pub fn outer(&self) -> &BuildingPart {
        &self.outer
    }

    /// The parts, in assembly order
    pub fn parts(&self) -> &[BuildingPart] {
        &self.parts
    }

    /// The outer element's resolved options
    pub fn options(&self) -> &OptionSet {
        self.outer.options()
    }

    /// Renderer handoff, one unit per renderable part
    ///
    /// With no parts, the outer element renders alone.
    pub fn render_units(&self) -> Vec<RenderUnit<'_>> {
        if self.parts.is_empty() {
            vec![self.outer.render_unit()]
        } else {
            self.parts.iter().map(BuildingPart::render_unit).collect()
        }
    }

    /// Serializable snapshot of the whole building
    pub fn info(&self) -> BuildingInfo {
        BuildingInfo {
            id: self.id,
            kind: self.kind,
            options: self.outer.options().clone(),
            parts: self.parts.iter().map(BuildingPart::info).collect(),
        }
    }
}
