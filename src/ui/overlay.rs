use crate::tree::arena::{NodeId, NodeKind, ResourceTree};

/// Aggregate statistics for the focused subtree, shown in the summary
/// panel and by the diagnostic tool.
#[derive(Debug, Default)]
pub struct Summary {
    /// Aggregated value of the subtree root
    pub total_value: f64,
    /// Number of pods in the subtree
    pub pod_count: usize,
    /// Workloads in the subtree with their values, sorted descending
    pub workloads: Vec<(NodeId, f64)>,
}

/// Compute summary statistics for the subtree under `root`.
pub fn summarize(tree: &ResourceTree, root: NodeId) -> Summary {
    let mut pod_count = 0;
    let mut workloads = Vec::new();

    let mut stack = vec![root];
    while let Some(node_id) = stack.pop() {
        let node = tree.get(node_id);
        match node.kind {
            NodeKind::Pod => pod_count += 1,
            NodeKind::Workload => workloads.push((node_id, node.value)),
            _ => {}
        }
        for child_id in tree.children(node_id) {
            stack.push(child_id);
        }
    }

    workloads.sort_by(|a, b| b.1.total_cmp(&a.1));

    Summary {
        total_value: tree.get(root).value,
        pod_count,
        workloads,
    }
}
