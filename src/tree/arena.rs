use compact_str::CompactString;

/// Index into the arena `Vec<ResourceNode>`. Uses u32 to save memory
/// (supports up to ~4 billion nodes). Assigned at construction and stable
/// for the lifetime of the tree; used only for identity, never for ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Taxonomy level of a node. Display concern only (coloring, labels);
/// the layout engine distinguishes nothing beyond leaf vs. non-leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Cluster,
    Namespace,
    Workload,
    Pod,
}

/// A single node in the resource tree, stored in a flat arena.
/// Uses sibling-list representation: each node has `first_child` and `next_sibling`.
#[derive(Debug, Clone)]
pub struct ResourceNode {
    /// Display name (namespace, workload, or pod name). Non-unique.
    pub name: CompactString,
    /// Sizing weight under the tree's metric. For pods: the pod's own
    /// weight. For groups: aggregated sum of children.
    pub value: f64,
    /// Taxonomy level
    pub kind: NodeKind,
    /// Parent node index (None for root)
    pub parent: Option<NodeId>,
    /// First child node index (None for leaves)
    pub first_child: Option<NodeId>,
    /// Next sibling node index (None if last child)
    pub next_sibling: Option<NodeId>,
    /// Depth in the tree (root = 0)
    pub depth: u16,
}

impl ResourceNode {
    /// A node with no children is a leaf.
    pub fn is_leaf(&self) -> bool {
        self.first_child.is_none()
    }
}

/// Which numeric quantity sizes each node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeMetric {
    /// 1.0 per pod
    Count,
    /// Summed container CPU requests, in millicores
    Cpu,
    /// Summed container memory requests, in bytes
    Memory,
}

/// The resource tree stored as a flat arena of nodes.
/// Immutable once built; one tree per data refresh.
pub struct ResourceTree {
    /// All nodes in contiguous memory
    pub nodes: Vec<ResourceNode>,
    /// Root node index
    pub root: NodeId,
    /// Metric the node values were computed under
    pub metric: SizeMetric,
}

impl ResourceTree {
    /// Create an empty tree with a cluster root node.
    pub fn new(root_name: &str, metric: SizeMetric) -> Self {
        let root_node = ResourceNode {
            name: CompactString::new(root_name),
            value: 0.0,
            kind: NodeKind::Cluster,
            parent: None,
            first_child: None,
            next_sibling: None,
            depth: 0,
        };

        ResourceTree {
            nodes: vec![root_node],
            root: NodeId(0),
            metric,
        }
    }

    /// Add a child node under the given parent. Returns the new node's ID.
    pub fn add_child(&mut self, parent: NodeId, mut node: ResourceNode) -> NodeId {
        let new_id = NodeId(self.nodes.len() as u32);
        node.parent = Some(parent);
        node.depth = self.nodes[parent.index()].depth + 1;

        // Prepend to parent's child list (O(1))
        node.next_sibling = self.nodes[parent.index()].first_child;
        self.nodes[parent.index()].first_child = Some(new_id);

        self.nodes.push(node);
        new_id
    }

    /// Get a node by ID.
    pub fn get(&self, id: NodeId) -> &ResourceNode {
        &self.nodes[id.index()]
    }

    /// Get a mutable node by ID.
    pub fn get_mut(&mut self, id: NodeId) -> &mut ResourceNode {
        &mut self.nodes[id.index()]
    }

    /// Total number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree is empty (only root).
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Iterate over children of a node.
    pub fn children(&self, parent: NodeId) -> ChildIter<'_> {
        ChildIter {
            tree: self,
            current: self.nodes[parent.index()].first_child,
        }
    }

    /// Path from the root to `id`, inclusive on both ends. Recomputed on
    /// demand during traversal; never stored on the node.
    pub fn path_to(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = Vec::with_capacity(self.get(id).depth as usize + 1);
        let mut current = Some(id);
        while let Some(node_id) = current {
            path.push(node_id);
            current = self.get(node_id).parent;
        }
        path.reverse();
        path
    }
}

/// Iterator over the children of a node.
pub struct ChildIter<'a> {
    tree: &'a ResourceTree,
    current: Option<NodeId>,
}

impl<'a> Iterator for ChildIter<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.current?;
        self.current = self.tree.nodes[id.index()].next_sibling;
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(name: &str, value: f64, kind: NodeKind) -> ResourceNode {
        ResourceNode {
            name: CompactString::new(name),
            value,
            kind,
            parent: None,
            first_child: None,
            next_sibling: None,
            depth: 0,
        }
    }

    #[test]
    fn add_child_links_and_depths() {
        let mut tree = ResourceTree::new("cluster", SizeMetric::Count);
        let ns = tree.add_child(tree.root, node("default", 0.0, NodeKind::Namespace));
        let pod = tree.add_child(ns, node("web-1", 1.0, NodeKind::Pod));

        assert_eq!(tree.get(ns).depth, 1);
        assert_eq!(tree.get(pod).depth, 2);
        assert_eq!(tree.get(pod).parent, Some(ns));
        assert!(tree.get(pod).is_leaf());
        assert!(!tree.get(ns).is_leaf());
    }

    #[test]
    fn children_iterates_all_siblings() {
        let mut tree = ResourceTree::new("cluster", SizeMetric::Count);
        let a = tree.add_child(tree.root, node("a", 1.0, NodeKind::Namespace));
        let b = tree.add_child(tree.root, node("b", 1.0, NodeKind::Namespace));
        let kids: Vec<NodeId> = tree.children(tree.root).collect();
        // add_child prepends, so iteration order is reverse insertion order
        assert_eq!(kids, vec![b, a]);
    }

    #[test]
    fn path_to_walks_from_root() {
        let mut tree = ResourceTree::new("cluster", SizeMetric::Count);
        let ns = tree.add_child(tree.root, node("default", 0.0, NodeKind::Namespace));
        let wl = tree.add_child(ns, node("web", 0.0, NodeKind::Workload));
        let pod = tree.add_child(wl, node("web-1", 1.0, NodeKind::Pod));

        assert_eq!(tree.path_to(pod), vec![tree.root, ns, wl, pod]);
        assert_eq!(tree.path_to(tree.root), vec![tree.root]);
    }
}
