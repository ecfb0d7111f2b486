// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shared node coordinate table
//!
//! One table per building, holding (lon, lat) degrees as parsed and then,
//! after a single in-place transform, local planar (x, y) meters. Parts
//! share the table by `Arc` reference; it is never copied per part.

use crate::NodeId;
use rustc_hash::FxHashMap;

/// Node identifier to coordinate pair arena
///
/// Coordinates are `[lon, lat]` until [`NodeTable::map_in_place`] runs, then
/// `[x, y]`. The table is written during document ingestion, transformed
/// once, and read-only afterwards.
#[derive(Clone, Debug, Default)]
pub struct NodeTable {
    coords: FxHashMap<NodeId, [f64; 2]>,
}

impl NodeTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert one node's coordinates
    ///
    /// Duplicate identifiers keep the first insertion, matching merged
    /// documents where the same node appears in both fetches.
    pub fn insert(&mut self, id: NodeId, coords: [f64; 2]) {
        self.coords.entry(id).or_insert(coords);
    }

    /// Look up a node's coordinates
    pub fn get(&self, id: NodeId) -> Option<[f64; 2]> {
        self.coords.get(&id).copied()
    }

    /// Number of nodes in the table
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    /// True when the table holds no nodes
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Iterate over all (id, coordinates) entries
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, [f64; 2])> + '_ {
        self.coords.iter().map(|(id, c)| (*id, *c))
    }

    /// Transform every coordinate pair in place
    ///
    /// Called exactly once per building, for the reprojection pass.
    pub fn map_in_place(&mut self, f: impl Fn([f64; 2]) -> [f64; 2]) {
        for coords in self.coords.values_mut() {
            *coords = f(*coords);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_keeps_first_entry() {
        let mut table = NodeTable::new();
        table.insert(NodeId(1), [10.0, 20.0]);
        table.insert(NodeId(1), [30.0, 40.0]);
        assert_eq!(table.get(NodeId(1)), Some([10.0, 20.0]));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn map_in_place_transforms_all_entries() {
        let mut table = NodeTable::new();
        table.insert(NodeId(1), [1.0, 2.0]);
        table.insert(NodeId(2), [3.0, 4.0]);
        table.map_in_place(|[x, y]| [x * 2.0, y * 2.0]);
        assert_eq!(table.get(NodeId(1)), Some([2.0, 4.0]));
        assert_eq!(table.get(NodeId(2)), Some([6.0, 8.0]));
    }
}
