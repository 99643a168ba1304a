use super::arena::{NodeId, ResourceTree};

/// Compute aggregated values for all group nodes (bottom-up).
/// After this, each non-leaf's `value` equals the sum of its children's
/// values. Children always have higher indices than their parents (the
/// builder creates parents first), so a reverse scan visits children
/// before parents.
pub fn aggregate_values(tree: &mut ResourceTree) {
    let len = tree.nodes.len();
    for i in (0..len).rev() {
        if tree.nodes[i].first_child.is_none() {
            continue;
        }

        // Sum up all direct children
        let mut total = 0.0f64;
        let mut child = tree.nodes[i].first_child;
        while let Some(child_id) = child {
            total += tree.nodes[child_id.index()].value;
            child = tree.nodes[child_id.index()].next_sibling;
        }
        tree.nodes[i].value = total;
    }
}

/// Sort children of each group node by value (descending).
/// The squarified layout re-sorts its own input; sorting here keeps
/// traversal order deterministic for every other consumer.
/// This re-links the sibling list without moving nodes in the arena.
pub fn sort_children_by_value(tree: &mut ResourceTree) {
    let len = tree.nodes.len();
    for i in 0..len {
        if tree.nodes[i].first_child.is_none() {
            continue;
        }

        // Collect children into a vec
        let mut children: Vec<NodeId> = Vec::new();
        let mut child = tree.nodes[i].first_child;
        while let Some(child_id) = child {
            children.push(child_id);
            child = tree.nodes[child_id.index()].next_sibling;
        }

        // Sort by value descending; stable, so ties keep list order
        children.sort_by(|a, b| {
            tree.nodes[b.index()]
                .value
                .total_cmp(&tree.nodes[a.index()].value)
        });

        // Re-link the sibling list
        tree.nodes[i].first_child = Some(children[0]);
        for w in children.windows(2) {
            tree.nodes[w[0].index()].next_sibling = Some(w[1]);
        }
        tree.nodes[children.last().unwrap().index()].next_sibling = None;
    }
}
