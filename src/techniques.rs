//! Taxonomy tree data model.
//!
//! The server delivers the whole technique tree in one payload. Nodes are
//! uniform records whose role in the rendering comes from their depth and
//! contents, captured here as [`NodeKind`].

use serde::{Deserialize, Serialize};

/// External link attached to a technique node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Resource {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Link text; the node's own title is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed_title: Option<String>,
}

/// A media item already filed under a technique node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MediaItem {
    pub friendly_token: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    pub url: String,
}

/// One node of the taxonomy tree.
///
/// `status` marks a node as an actual technique; nodes without it are purely
/// structural. All collections default to empty so sparse server payloads
/// deserialize cleanly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct TechniqueNode {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<Resource>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub media: Vec<MediaItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TechniqueNode>,
}

/// The full tree payload as returned by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct TechniqueTreeData {
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub tree: Vec<TechniqueNode>,
}

/// The media record used to pre-fill the assignment title.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MediaInfo {
    pub friendly_token: String,
    pub title: String,
}

/// Rendering role of a node, decided by depth and contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Category,
    Subcategory,
    Group,
    Leaf,
}

impl NodeKind {
    /// Depth 0 is a category, depth 1 a subcategory. At depth 2 a node with
    /// children and no status is a grouping heading; everything else is a
    /// leaf, including status-bearing depth-2 nodes that still have children.
    pub fn classify(depth: usize, has_children: bool, has_status: bool) -> Self {
        match depth {
            0 => NodeKind::Category,
            1 => NodeKind::Subcategory,
            2 if has_children && !has_status => NodeKind::Group,
            _ => NodeKind::Leaf,
        }
    }

    pub fn of(node: &TechniqueNode, depth: usize) -> Self {
        Self::classify(depth, !node.children.is_empty(), node.status.is_some())
    }
}

impl TechniqueNode {
    /// Number of actual techniques in this subtree: the node itself when it
    /// carries a status, plus everything below it.
    pub fn technique_count(&self) -> usize {
        usize::from(self.status.is_some())
            + self.children.iter().map(TechniqueNode::technique_count).sum::<usize>()
    }
}

impl TechniqueTreeData {
    pub fn technique_count(&self) -> usize {
        self.tree.iter().map(TechniqueNode::technique_count).sum()
    }

    /// Top-level category by id.
    pub fn category(&self, id: &str) -> Option<&TechniqueNode> {
        self.tree.iter().find(|node| node.id == id)
    }

    /// Direct children of a top-level category, empty if the id is unknown.
    pub fn subcategories(&self, category_id: &str) -> &[TechniqueNode] {
        self.category(category_id)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }
}
