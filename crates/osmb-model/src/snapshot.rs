// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Serializable snapshots of an assembled building
//!
//! The snapshot is the primary inspection surface: identifier, kind,
//! resolved options, and the ordered child parts, serializable both ways
//! for round-trip testing.

use crate::options::OptionSet;
use crate::types::{BuildingKind, ElementId, PartKind};
use serde::{Deserialize, Serialize};

/// Snapshot of one assembled building
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BuildingInfo {
    pub id: ElementId,
    pub kind: BuildingKind,
    /// The outer element's resolved options
    pub options: OptionSet,
    /// Parts in assembly order (empty when the outer element renders alone)
    pub parts: Vec<PartInfo>,
}

/// Snapshot of one building part
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PartInfo {
    pub id: ElementId,
    pub kind: PartKind,
    pub options: OptionSet,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{ResolveContext, SpecifiedOptions};
    use std::collections::HashMap;

    #[test]
    fn snapshot_round_trips_through_json() {
        let specified = SpecifiedOptions::from_tags(&HashMap::<String, String>::new()).unwrap();
        let options = OptionSet::resolve(
            &specified,
            None,
            &ResolveContext {
                id: ElementId(42),
                inscribed_radius: 2.0,
                part_role: None,
            },
        );
        let info = BuildingInfo {
            id: ElementId(42),
            kind: BuildingKind::Way,
            options: options.clone(),
            parts: vec![PartInfo {
                id: ElementId(43),
                kind: PartKind::Way,
                options,
            }],
        };

        let json = serde_json::to_string(&info).unwrap();
        let back: BuildingInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(back, info);
    }
}
