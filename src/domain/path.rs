//! Breadcrumb paths for categories.
//!
//! A [`CategoryPath`] is the ordered root-to-leaf list of category names,
//! used by presentation code for breadcrumbs and by exports for a stable
//! textual form. The string form is lossy: identifiers survive serialization
//! but not parsing.

use serde::{Deserialize, Serialize};

use crate::domain::category::Category;
use crate::domain::tree;
use crate::domain::types::CategoryId;

/// Separator used by the storage round-trip form.
const PATH_SEPARATOR: &str = "/";
/// Separator used by the human-readable display form.
const DISPLAY_SEPARATOR: &str = " > ";

/// Ordered root-to-leaf name path through the taxonomy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPath {
    pub segments: Vec<String>,
    pub ids: Vec<CategoryId>,
}

impl CategoryPath {
    /// Build the full path for a category from a snapshot of the flat list.
    ///
    /// Returns `None` when `id` is not present in the snapshot.
    pub fn for_category(id: CategoryId, flat: &[Category]) -> Option<Self> {
        let node = flat.iter().find(|c| c.id == id)?;
        let mut segments = Vec::new();
        let mut ids = Vec::new();
        for ancestor in tree::ancestors(id, flat) {
            segments.push(ancestor.name.as_str().to_string());
            ids.push(ancestor.id);
        }
        segments.push(node.name.as_str().to_string());
        ids.push(node.id);
        Some(Self { segments, ids })
    }

    /// Join the segments with `/` for storage; an empty path yields `""`.
    pub fn serialize(&self) -> String {
        self.segments.join(PATH_SEPARATOR)
    }

    /// Split a serialized path back into segments.
    ///
    /// Identifiers cannot be recovered from the string form, so `ids` is
    /// always empty after parsing; the round trip is for display
    /// reconstruction only.
    pub fn parse(value: &str) -> Self {
        if value.is_empty() {
            return Self::default();
        }
        Self {
            segments: value.split(PATH_SEPARATOR).map(str::to_string).collect(),
            ids: Vec::new(),
        }
    }

    /// Join the segments with `" > "` for breadcrumbs.
    pub fn format_for_display(&self) -> String {
        self.segments.join(DISPLAY_SEPARATOR)
    }
}
