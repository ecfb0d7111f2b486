// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Collaborator traits
//!
//! The modeling core never fetches or parses anything itself: raw XML text
//! comes from a [`DocumentSource`] and tag lookup goes through [`TagQuery`],
//! keeping the engine independent of any transport or document backend.

use crate::{ElementId, Extents, Result};

/// Raw OSM XML provider
///
/// Mirrors the three fetches a building needs: the root entity by kind and
/// id, and everything inside a bounding box. Implementations may sit on a
/// network API, a file cache, or in-memory fixtures; the core calls them
/// sequentially and treats any failure as fatal.
pub trait DocumentSource {
    /// Fetch a way's XML (typically the `full` representation with nodes)
    fn way_xml(&self, id: ElementId) -> Result<String>;

    /// Fetch a relation's XML
    fn relation_xml(&self, id: ElementId) -> Result<String>;

    /// Fetch everything inside a bounding box
    fn bbox_xml(&self, extents: &Extents) -> Result<String>;
}

/// Key/value tag lookup on an OSM element
pub trait TagQuery {
    /// The value of a tag, if present
    fn tag(&self, key: &str) -> Option<&str>;

    /// True when the tag is present with any value
    fn has_tag(&self, key: &str) -> bool {
        self.tag(key).is_some()
    }
}

impl TagQuery for std::collections::HashMap<String, String> {
    fn tag(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}
