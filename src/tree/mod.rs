pub mod aggregate;
pub mod arena;
pub mod quantity;

use std::collections::HashMap;

use compact_str::CompactString;

use self::arena::{NodeId, NodeKind, ResourceNode, ResourceTree, SizeMetric};
use crate::inventory::PodEntry;

/// Weight of one pod under the given metric. Unparseable requests count
/// as zero contribution; negative or non-finite results clamp to zero so
/// nothing downstream ever sees them.
fn pod_value(entry: &PodEntry, metric: SizeMetric) -> f64 {
    let raw = match metric {
        SizeMetric::Count => 1.0,
        SizeMetric::Cpu => entry
            .containers
            .iter()
            .filter_map(|c| c.cpu_request.as_deref())
            .map(|s| match quantity::parse_cpu(s) {
                Ok(v) => v,
                Err(e) => {
                    tracing::warn!("Pod '{}': ignoring CPU request: {}", entry.name, e);
                    0.0
                }
            })
            .sum(),
        SizeMetric::Memory => entry
            .containers
            .iter()
            .filter_map(|c| c.memory_request.as_deref())
            .map(|s| match quantity::parse_memory(s) {
                Ok(v) => v,
                Err(e) => {
                    tracing::warn!("Pod '{}': ignoring memory request: {}", entry.name, e);
                    0.0
                }
            })
            .sum(),
    };

    if raw.is_finite() && raw > 0.0 {
        raw
    } else {
        0.0
    }
}

/// Build a ResourceTree from a flat pod inventory: cluster root → one
/// child per namespace → one child per workload → one leaf per pod.
/// Pods without a workload owner attach directly to their namespace.
pub fn build_tree(cluster_name: &str, entries: &[PodEntry], metric: SizeMetric) -> ResourceTree {
    let mut tree = ResourceTree::new(cluster_name, metric);
    if entries.is_empty() {
        return tree;
    }

    tracing::info!(
        "Building {:?} tree '{}' from {} pods",
        metric,
        cluster_name,
        entries.len()
    );

    // Group lookups so repeated namespaces/workloads reuse their node
    let mut namespaces: HashMap<&str, NodeId> = HashMap::new();
    let mut workloads: HashMap<(&str, &str), NodeId> = HashMap::new();

    for entry in entries {
        let ns_id = *namespaces.entry(entry.namespace.as_str()).or_insert_with(|| {
            tree.add_child(
                tree.root,
                ResourceNode {
                    name: CompactString::new(&entry.namespace),
                    value: 0.0,
                    kind: NodeKind::Namespace,
                    parent: None,
                    first_child: None,
                    next_sibling: None,
                    depth: 0,
                },
            )
        });

        let parent_id = match entry.workload.as_deref() {
            Some(workload) => *workloads
                .entry((entry.namespace.as_str(), workload))
                .or_insert_with(|| {
                    tree.add_child(
                        ns_id,
                        ResourceNode {
                            name: CompactString::new(workload),
                            value: 0.0,
                            kind: NodeKind::Workload,
                            parent: None,
                            first_child: None,
                            next_sibling: None,
                            depth: 0,
                        },
                    )
                }),
            None => ns_id,
        };

        let value = pod_value(entry, metric);
        tree.add_child(
            parent_id,
            ResourceNode {
                name: CompactString::new(&entry.name),
                value,
                kind: NodeKind::Pod,
                parent: None,
                first_child: None,
                next_sibling: None,
                depth: 0,
            },
        );
    }

    // Roll pod weights up through workloads and namespaces
    aggregate::aggregate_values(&mut tree);
    // Sort children by value for deterministic traversal order
    aggregate::sort_children_by_value(&mut tree);

    tracing::info!(
        "Tree built: {} nodes, {} namespaces, total value {:.1}",
        tree.len(),
        tree.children(tree.root).count(),
        tree.get(tree.root).value
    );

    tree
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::ContainerResources;

    fn pod(namespace: &str, workload: Option<&str>, name: &str, cpu: Option<&str>) -> PodEntry {
        PodEntry {
            namespace: namespace.to_string(),
            workload: workload.map(str::to_string),
            name: name.to_string(),
            containers: vec![ContainerResources {
                cpu_request: cpu.map(str::to_string),
                memory_request: None,
            }],
        }
    }

    #[test]
    fn groups_pods_by_namespace_and_workload() {
        let entries = vec![
            pod("default", Some("web"), "web-1", Some("100m")),
            pod("default", Some("web"), "web-2", Some("100m")),
            pod("kube-system", Some("dns"), "dns-1", Some("50m")),
        ];
        let tree = build_tree("test", &entries, SizeMetric::Count);

        let ns_names: Vec<_> = tree
            .children(tree.root)
            .map(|id| tree.get(id).name.to_string())
            .collect();
        assert_eq!(ns_names.len(), 2);

        // Both web pods hang off one workload node
        let default_ns = tree
            .children(tree.root)
            .find(|&id| tree.get(id).name == "default")
            .unwrap();
        let workloads: Vec<_> = tree.children(default_ns).collect();
        assert_eq!(workloads.len(), 1);
        assert_eq!(tree.children(workloads[0]).count(), 2);
    }

    #[test]
    fn ownerless_pod_attaches_to_namespace() {
        let entries = vec![pod("default", None, "standalone", Some("100m"))];
        let tree = build_tree("test", &entries, SizeMetric::Count);

        let ns = tree.children(tree.root).next().unwrap();
        let child = tree.children(ns).next().unwrap();
        assert_eq!(tree.get(child).kind, NodeKind::Pod);
        assert_eq!(tree.get(child).name, "standalone");
    }

    #[test]
    fn cpu_metric_sums_container_requests() {
        let entries = vec![PodEntry {
            namespace: "default".to_string(),
            workload: None,
            name: "multi".to_string(),
            containers: vec![
                ContainerResources {
                    cpu_request: Some("500m".to_string()),
                    memory_request: None,
                },
                ContainerResources {
                    cpu_request: Some("0.5".to_string()),
                    memory_request: None,
                },
            ],
        }];
        let tree = build_tree("test", &entries, SizeMetric::Cpu);

        let ns = tree.children(tree.root).next().unwrap();
        let pod_node = tree.children(ns).next().unwrap();
        assert_eq!(tree.get(pod_node).value, 1000.0);
    }

    #[test]
    fn non_leaf_values_equal_child_sums() {
        let entries = vec![
            pod("a", Some("w"), "p1", Some("100m")),
            pod("a", Some("w"), "p2", Some("300m")),
            pod("b", None, "p3", Some("600m")),
        ];
        let tree = build_tree("test", &entries, SizeMetric::Cpu);

        for (i, node) in tree.nodes.iter().enumerate() {
            if node.first_child.is_none() {
                continue;
            }
            let sum: f64 = tree.children(arena::NodeId(i as u32)).map(|c| tree.get(c).value).sum();
            assert!((node.value - sum).abs() < 1e-9);
        }
        assert_eq!(tree.get(tree.root).value, 1000.0);
    }

    #[test]
    fn malformed_requests_count_as_zero() {
        let entries = vec![
            pod("default", None, "bad", Some("not-a-number")),
            pod("default", None, "good", Some("200m")),
        ];
        let tree = build_tree("test", &entries, SizeMetric::Cpu);
        assert_eq!(tree.get(tree.root).value, 200.0);
    }

    #[test]
    fn empty_inventory_yields_bare_root() {
        let tree = build_tree("test", &[], SizeMetric::Count);
        assert!(tree.is_empty());
        assert_eq!(tree.get(tree.root).value, 0.0);
    }
}
