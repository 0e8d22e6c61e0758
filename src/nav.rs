//! Navigation tree resolution.
//!
//! Turns the declared sidebar into an ordered tree. Declaration order is
//! semantically meaningful: it is the reading order presented to end users.

use crate::config::section::{SidebarEntry, ThemeSectionConfig};

/// Ordered navigation tree resolved from the sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavTree {
    pub roots: Vec<NavNode>,
}

/// One node of the navigation tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavNode {
    /// A single page, in reading order.
    Leaf { path: String },
    /// A titled group with its own ordered children.
    Group {
        title: String,
        children: Vec<NavNode>,
    },
}

impl NavTree {
    /// Build the tree from theme sidebar entries, preserving declared order.
    ///
    /// Flat string entries become leaves; nested groups become internal
    /// nodes. The source is a list, so the result is cycle-free by
    /// construction and resolution is idempotent.
    pub fn resolve(theme: &ThemeSectionConfig) -> Self {
        Self {
            roots: theme.sidebar.iter().map(resolve_entry).collect(),
        }
    }

    /// Leaf page paths in reading order (depth-first).
    pub fn leaf_paths(&self) -> Vec<&str> {
        let mut paths = Vec::new();
        for node in &self.roots {
            collect_leaves(node, &mut paths);
        }
        paths
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

fn resolve_entry(entry: &SidebarEntry) -> NavNode {
    match entry {
        SidebarEntry::Page(path) => NavNode::Leaf { path: path.clone() },
        SidebarEntry::Group { title, children } => NavNode::Group {
            title: title.clone(),
            children: children.iter().map(resolve_entry).collect(),
        },
    }
}

fn collect_leaves<'a>(node: &'a NavNode, out: &mut Vec<&'a str>) {
    match node {
        NavNode::Leaf { path } => out.push(path),
        NavNode::Group { children, .. } => {
            for child in children {
                collect_leaves(child, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::section::SidebarEntry;

    fn theme_with(sidebar: Vec<SidebarEntry>) -> ThemeSectionConfig {
        ThemeSectionConfig {
            sidebar,
            ..Default::default()
        }
    }

    #[test]
    fn test_flat_order_preserved() {
        let sidebar = [
            "/",
            "introduction",
            "simple-feature-for-r",
            "spatial-data-handling",
            "spatial-data-mapping",
            "raster",
            "statistical-learning",
        ];
        let theme = theme_with(
            sidebar
                .iter()
                .map(|p| SidebarEntry::Page((*p).to_string()))
                .collect(),
        );

        let tree = NavTree::resolve(&theme);
        assert_eq!(tree.leaf_paths(), sidebar);
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let theme = theme_with(vec![
            SidebarEntry::Page("/".into()),
            SidebarEntry::Page("raster".into()),
        ]);
        assert_eq!(NavTree::resolve(&theme), NavTree::resolve(&theme));
    }

    #[test]
    fn test_groups_become_internal_nodes() {
        let theme = theme_with(vec![
            SidebarEntry::Page("/".into()),
            SidebarEntry::Group {
                title: "Analysis".into(),
                children: vec![
                    SidebarEntry::Page("raster".into()),
                    SidebarEntry::Page("statistical-learning".into()),
                ],
            },
        ]);

        let tree = NavTree::resolve(&theme);
        assert_eq!(tree.roots.len(), 2);
        match &tree.roots[1] {
            NavNode::Group { title, children } => {
                assert_eq!(title, "Analysis");
                assert_eq!(children.len(), 2);
            }
            NavNode::Leaf { .. } => panic!("expected group"),
        }
        assert_eq!(
            tree.leaf_paths(),
            vec!["/", "raster", "statistical-learning"]
        );
    }

    #[test]
    fn test_empty_sidebar() {
        let tree = NavTree::resolve(&ThemeSectionConfig::default());
        assert!(tree.is_empty());
        assert!(tree.leaf_paths().is_empty());
    }
}
