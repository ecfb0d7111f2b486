// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! OSM API endpoint configuration and URL construction
//!
//! URL templates for the three document fetches, deserializable from
//! configuration and defaulting to the public OSM 0.6 API. No transport
//! lives here; a `DocumentSource` implementation pairs these URLs with
//! whatever HTTP client the application brings.

use osmb_model::{ElementId, Extents};
use serde::{Deserialize, Serialize};

/// URL templates for the OSM API
///
/// Placeholders: `{id}` in `way` and `relation`; `{left}`, `{bottom}`,
/// `{right}`, `{top}` in `bbox`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiEndpoints {
    pub way: String,
    pub relation: String,
    pub bbox: String,
}

impl Default for ApiEndpoints {
    fn default() -> Self {
        Self {
            way: "https://api.openstreetmap.org/api/0.6/way/{id}/full".to_string(),
            relation: "https://api.openstreetmap.org/api/0.6/relation/{id}/full".to_string(),
            bbox: "https://api.openstreetmap.org/api/0.6/map?bbox={left},{bottom},{right},{top}"
                .to_string(),
        }
    }
}

impl ApiEndpoints {
    /// URL fetching one way with its nodes
    pub fn way_url(&self, id: ElementId) -> String {
        self.way.replace("{id}", &id.to_string())
    }

    /// URL fetching one relation with its members
    pub fn relation_url(&self, id: ElementId) -> String {
        self.relation.replace("{id}", &id.to_string())
    }

    /// URL fetching everything inside a bounding box
    pub fn bbox_url(&self, extents: &Extents) -> String {
        self.bbox
            .replace("{left}", &extents.left.to_string())
            .replace("{bottom}", &extents.bottom.to_string())
            .replace("{right}", &extents.right.to_string())
            .replace("{top}", &extents.top.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_urls() {
        let api = ApiEndpoints::default();
        assert_eq!(
            api.way_url(ElementId(121486088)),
            "https://api.openstreetmap.org/api/0.6/way/121486088/full"
        );
        assert!(api.relation_url(ElementId(7)).contains("/relation/7/full"));
        let url = api.bbox_url(&Extents::new(10.0, 51.0, 10.1, 51.1));
        assert_eq!(
            url,
            "https://api.openstreetmap.org/api/0.6/map?bbox=10,51,10.1,51.1"
        );
    }

    #[test]
    fn custom_templates_deserialize() {
        let api: ApiEndpoints = serde_json::from_str(
            r#"{"way":"http://localhost/w/{id}","relation":"http://localhost/r/{id}","bbox":"http://localhost/b/{left}/{bottom}/{right}/{top}"}"#,
        )
        .unwrap();
        assert_eq!(api.way_url(ElementId(5)), "http://localhost/w/5");
    }
}
