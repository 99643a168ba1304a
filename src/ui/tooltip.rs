use crate::tree::arena::{NodeId, NodeKind, ResourceTree, SizeMetric};

/// Information to display in the tooltip when hovering over a node.
#[derive(Debug)]
pub struct TooltipInfo {
    pub name: String,
    pub full_path: String,
    pub value_display: String,
    pub kind: &'static str,
    pub child_count: Option<usize>,
}

/// Build tooltip info for a node.
pub fn build_tooltip(tree: &ResourceTree, node_id: NodeId) -> TooltipInfo {
    let node = tree.get(node_id);

    let child_count = if node.is_leaf() {
        None
    } else {
        Some(tree.children(node_id).count())
    };

    TooltipInfo {
        name: node.name.to_string(),
        full_path: build_path(tree, node_id),
        value_display: format_value(tree.metric, node.value),
        kind: kind_name(node.kind),
        child_count,
    }
}

pub fn kind_name(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Cluster => "Cluster",
        NodeKind::Namespace => "Namespace",
        NodeKind::Workload => "Workload",
        NodeKind::Pod => "Pod",
    }
}

/// Format a node value under the tree's metric.
pub fn format_value(metric: SizeMetric, value: f64) -> String {
    match metric {
        SizeMetric::Count => format!("{} pods", value.round() as u64),
        SizeMetric::Cpu => format_millicores(value),
        SizeMetric::Memory => format_bytes(value),
    }
}

/// Format millicores: whole millicores below one core, cores above.
pub fn format_millicores(millicores: f64) -> String {
    if millicores >= 1000.0 {
        format!("{:.2} cores", millicores / 1000.0)
    } else {
        format!("{}m", millicores.round() as u64)
    }
}

/// Format bytes into a human-readable binary size string.
pub fn format_bytes(bytes: f64) -> String {
    const KIB: f64 = 1024.0;
    const MIB: f64 = 1024.0 * KIB;
    const GIB: f64 = 1024.0 * MIB;
    const TIB: f64 = 1024.0 * GIB;

    if bytes >= TIB {
        format!("{:.2} TiB", bytes / TIB)
    } else if bytes >= GIB {
        format!("{:.2} GiB", bytes / GIB)
    } else if bytes >= MIB {
        format!("{:.2} MiB", bytes / MIB)
    } else if bytes >= KIB {
        format!("{:.1} KiB", bytes / KIB)
    } else {
        format!("{} B", bytes.round() as u64)
    }
}

/// Build the full path of a node by walking up the tree.
pub fn build_path(tree: &ResourceTree, node_id: NodeId) -> String {
    let mut parts = Vec::new();
    let mut current = Some(node_id);

    while let Some(id) = current {
        let node = tree.get(id);
        parts.push(node.name.to_string());
        current = node.parent;
    }

    parts.reverse();
    parts.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::arena::ResourceNode;
    use compact_str::CompactString;

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
    fn formats_by_metric() {
        assert_eq!(format_value(SizeMetric::Count, 12.0), "12 pods");
        assert_eq!(format_value(SizeMetric::Cpu, 500.0), "500m");
        assert_eq!(format_value(SizeMetric::Cpu, 2500.0), "2.50 cores");
        assert_eq!(format_value(SizeMetric::Memory, 64.0 * 1024.0 * 1024.0), "64.00 MiB");
        assert_eq!(format_value(SizeMetric::Memory, 512.0), "512 B");
    }

    #[test]
    fn path_joins_from_root() {
        let mut tree = ResourceTree::new("prod", SizeMetric::Cpu);
        let ns = tree.add_child(tree.root, node("default", 0.0, NodeKind::Namespace));
        let pod = tree.add_child(ns, node("web-1", 250.0, NodeKind::Pod));

        assert_eq!(build_path(&tree, pod), "prod/default/web-1");

        let info = build_tooltip(&tree, pod);
        assert_eq!(info.name, "web-1");
        assert_eq!(info.kind, "Pod");
        assert_eq!(info.value_display, "250m");
        assert_eq!(info.child_count, None);

        let info = build_tooltip(&tree, ns);
        assert_eq!(info.child_count, Some(1));
    }
}
