//! Preview trees.
//!
//! [`build_tree`] lays items out exactly as the assembler will, without reading
//! or writing any bytes. Folder items are shown collapsed: one node for the
//! whole folder, no children.

use crate::plan::plan_item;
use crate::{OrganizationItem, folder_name};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Folder,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileTreeNode {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Relative to the archive root; empty for the root itself.
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<FileTreeNode>>,
}

impl FileTreeNode {
    fn folder(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self { name: name.into(), kind: NodeKind::Folder, path: path.into(), size: None, children: Some(Vec::new()) }
    }

    fn file(name: impl Into<String>, path: impl Into<String>, size: u64) -> Self {
        Self { name: name.into(), kind: NodeKind::File, path: path.into(), size: Some(size), children: None }
    }

    pub fn is_folder(&self) -> bool {
        self.kind == NodeKind::Folder
    }

    pub fn children(&self) -> &[FileTreeNode] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Depth-first search for the node at `path`.
    pub fn find(&self, path: &str) -> Option<&FileTreeNode> {
        if self.path == path {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find(path))
    }

    /// Paths of every node below this one, depth first, in display order.
    pub fn descendant_paths(&self) -> Vec<&str> {
        let mut paths = Vec::new();
        for child in self.children() {
            paths.push(child.path.as_str());
            paths.extend(child.descendant_paths());
        }
        paths
    }
}

const ROOT: usize = 0;

/// Flat node storage; parents always precede their children.
struct TreeBuilder {
    nodes: Vec<FileTreeNode>,
    parents: Vec<usize>,
    folders: HashMap<String, usize>,
}

impl TreeBuilder {
    fn new(root_name: &str) -> Self {
        Self {
            nodes: vec![FileTreeNode::folder(root_name, "")],
            parents: vec![ROOT],
            folders: HashMap::from([(String::new(), ROOT)]),
        }
    }

    fn push(&mut self, parent: usize, node: FileTreeNode) -> usize {
        self.nodes.push(node);
        self.parents.push(parent);
        self.nodes.len() - 1
    }

    /// Returns the folder at `path`, creating it under `parent` if missing.
    fn folder(&mut self, parent: usize, name: &str, path: &str) -> usize {
        if let Some(&index) = self.folders.get(path) {
            return index;
        }
        let index = self.push(parent, FileTreeNode::folder(name, path));
        self.folders.insert(path.to_string(), index);
        index
    }

    fn finish(self) -> FileTreeNode {
        let Self { mut nodes, parents, .. } = self;
        let mut pending: Vec<Vec<FileTreeNode>> = vec![Vec::new(); nodes.len()];
        // Children always sit after their parent, so popping from the back
        // completes every subtree before its parent is reached.
        while nodes.len() > 1 {
            let index = nodes.len() - 1;
            let Some(mut node) = nodes.pop() else { break };
            attach(&mut node, std::mem::take(&mut pending[index]));
            pending[parents[index]].push(node);
        }
        let mut root = nodes.swap_remove(ROOT);
        attach(&mut root, std::mem::take(&mut pending[ROOT]));
        root
    }
}

fn attach(node: &mut FileTreeNode, mut children: Vec<FileTreeNode>) {
    children.reverse();
    if let Some(existing) = node.children.as_mut() {
        *existing = children;
    }
}

/// Builds the preview tree of the archive `items` would produce.
///
/// The root is a folder named after `primary` with an empty path. Items are
/// visited shallowest location first (stable for equal depths), so parent
/// folders always exist before anything is placed inside them. Within a
/// folder, nodes keep item order, then file order.
pub fn build_tree(items: &[OrganizationItem], primary: &str) -> FileTreeNode {
    let mut items: Vec<&OrganizationItem> = items.iter().filter(|item| !item.is_inert()).collect();
    items.sort_by_key(|item| item.location.matches('/').count());

    let mut tree = TreeBuilder::new(primary);
    for item in items {
        let entries: Vec<_> = plan_item(item, primary).filter(|entry| !entry.is_placeholder()).collect();
        if entries.is_empty() {
            continue;
        }

        let mut parent = ROOT;
        let mut location = String::new();
        for segment in item.location_segments() {
            if !location.is_empty() {
                location.push('/');
            }
            location.push_str(segment);
            parent = tree.folder(parent, segment, &location);
        }

        if let Some(folder) = folder_name(item) {
            // A label such as `Back/glass` nests, exactly as it does in the archive.
            for segment in folder.split('/').filter(|segment| !segment.is_empty()) {
                if !location.is_empty() {
                    location.push('/');
                }
                location.push_str(segment);
                parent = tree.folder(parent, segment, &location);
            }
            continue;
        }
        for entry in entries {
            let size = entry.file.size();
            tree.push(parent, FileTreeNode::file(entry.name, entry.path, size));
        }
    }
    tree.finish()
}
