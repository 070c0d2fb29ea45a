//! Composes the sidebar tree from the flat stores.
//!
//! Nothing is cached: every call walks the current collections.

use courier_domain::{Folder, TreeNode};

use crate::store::{FolderStore, RequestStore, compare_names};

/// Read-only view that derives display nodes on demand.
#[derive(Clone, Copy)]
pub struct TreeComposer<'a> {
    folders: &'a FolderStore,
    requests: &'a RequestStore,
}

impl<'a> TreeComposer<'a> {
    /// Creates a composer over both stores.
    #[must_use]
    pub const fn new(folders: &'a FolderStore, requests: &'a RequestStore) -> Self {
        Self { folders, requests }
    }

    /// Root folders sorted by name.
    #[must_use]
    pub fn roots(&self) -> Vec<TreeNode> {
        self.folders.roots().into_iter().map(TreeNode::folder).collect()
    }

    /// Child folders of `folder_id` sorted by name, then its requests in store order.
    ///
    /// Requests whose folder no longer exists are never listed anywhere.
    #[must_use]
    pub fn children(&self, folder_id: &str) -> Vec<TreeNode> {
        let mut folders: Vec<&Folder> = self.folders.children(folder_id).collect();
        folders.sort_by(|a, b| compare_names(&a.name, &b.name));

        folders
            .into_iter()
            .map(TreeNode::folder)
            .chain(self.requests.by_folder(folder_id).map(TreeNode::request))
            .collect()
    }

    /// The first folder a depth-first walk of the tree would show.
    #[must_use]
    pub fn first_folder(&self) -> Option<&'a Folder> {
        self.folders.roots().into_iter().next()
    }

    /// Depth-first walk yielding `(depth, node)` for every reachable node.
    #[must_use]
    pub fn walk(&self) -> Vec<(usize, TreeNode)> {
        let mut out = Vec::new();
        let mut stack: Vec<(usize, TreeNode)> =
            self.roots().into_iter().rev().map(|node| (0, node)).collect();
        let mut visited = std::collections::HashSet::new();
        while let Some((depth, node)) = stack.pop() {
            if node.is_expandable() {
                if !visited.insert(node.id.clone()) {
                    continue;
                }
                stack.extend(
                    self.children(&node.id)
                        .into_iter()
                        .rev()
                        .map(|child| (depth + 1, child)),
                );
            }
            out.push((depth, node));
        }
        out
    }
}
