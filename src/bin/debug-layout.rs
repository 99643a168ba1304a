/// Diagnostic tool to verify inventory → tree → layout → zoom pipeline
use clustermap_rs::inventory::{ContainerResources, PodEntry};
use clustermap_rs::layout::{compute_layout, LayoutConfig};
use clustermap_rs::tree::arena::SizeMetric;
use clustermap_rs::tree::build_tree;
use clustermap_rs::ui::overlay;
use clustermap_rs::ui::tooltip::{build_path, format_value};
use clustermap_rs::ui::zoom::ZoomState;

/// A synthetic but plausible cluster inventory.
fn synthetic_inventory() -> Vec<PodEntry> {
    let mut entries = Vec::new();

    let workloads: &[(&str, &str, usize, &str, &str)] = &[
        ("default", "web-frontend", 6, "250m", "256Mi"),
        ("default", "api-gateway", 4, "500m", "512Mi"),
        ("default", "worker", 8, "1", "1Gi"),
        ("kube-system", "coredns", 2, "100m", "70Mi"),
        ("kube-system", "kube-proxy", 3, "100m", "128Mi"),
        ("monitoring", "prometheus", 1, "2", "4Gi"),
        ("monitoring", "grafana", 1, "250m", "512Mi"),
    ];

    for &(namespace, workload, replicas, cpu, memory) in workloads {
        for i in 0..replicas {
            entries.push(PodEntry {
                namespace: namespace.to_string(),
                workload: Some(workload.to_string()),
                name: format!("{}-{}", workload, i),
                containers: vec![ContainerResources {
                    cpu_request: Some(cpu.to_string()),
                    memory_request: Some(memory.to_string()),
                }],
            });
        }
    }

    // A bare pod with no owner, attached straight to its namespace
    entries.push(PodEntry {
        namespace: "default".to_string(),
        workload: None,
        name: "debug-shell".to_string(),
        containers: vec![ContainerResources {
            cpu_request: Some("50m".to_string()),
            memory_request: Some("64Mi".to_string()),
        }],
    });

    entries
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("clustermap_rs=debug".parse().unwrap()),
        )
        .init();

    let metric = match std::env::args().nth(1).as_deref() {
        Some("count") => SizeMetric::Count,
        Some("memory") => SizeMetric::Memory,
        _ => SizeMetric::Cpu,
    };

    println!("=== DIAGNOSTIC: Inventory → Tree → Layout Pipeline ===");
    println!("Metric: {:?}", metric);

    let entries = synthetic_inventory();
    println!("\n[1] Inventory: {} pods", entries.len());

    let tree = build_tree("demo-cluster", &entries, metric);
    println!("\n[2] Tree built: {} nodes", tree.len());

    let root_node = tree.get(tree.root);
    println!(
        "    Root: '{}' ({})",
        root_node.name,
        format_value(metric, root_node.value)
    );

    println!("\n[3] Namespaces by value:");
    for (i, ns_id) in tree.children(tree.root).enumerate() {
        let ns = tree.get(ns_id);
        println!(
            "    [{}] '{}' - {} ({} children)",
            i,
            ns.name,
            format_value(metric, ns.value),
            tree.children(ns_id).count()
        );
    }

    let config = LayoutConfig::default();
    let zoom = ZoomState::new();
    let layout = compute_layout(&tree, &zoom, 1920.0, 1080.0, &config);

    println!("\n[4] Layout computed: {} rectangles", layout.rects.len());

    println!("\n[5] Top 10 largest rectangles by area:");
    let mut sorted_rects = layout.rects.clone();
    sorted_rects.sort_by(|a, b| b.area().total_cmp(&a.area()));

    for (i, rect) in sorted_rects.iter().take(10).enumerate() {
        println!(
            "    [{}] '{}' - {:.1}x{:.1} ({:.0}px²) at ({:.1}, {:.1}) depth {}",
            i,
            build_path(&tree, rect.node),
            rect.w,
            rect.h,
            rect.area(),
            rect.x,
            rect.y,
            rect.depth
        );
    }

    println!("\n[6] Checking area conservation:");
    let viewport_area = 1920.0 * 1080.0;
    let namespace_area: f64 = tree
        .children(tree.root)
        .filter_map(|id| layout.rect_of(id))
        .map(|r| r.area())
        .sum();
    println!("    Namespace rect area: {:.0}px²", namespace_area);
    println!("    Viewport area:       {:.0}px²", viewport_area);
    println!("    Coverage: {:.2}%", (namespace_area / viewport_area) * 100.0);

    // Zoom into the largest namespace and lay out again
    let focus = tree.children(tree.root).next().expect("tree has namespaces");
    let mut zoom = ZoomState::new();
    zoom.handle_tap(&tree.path_to(focus), false);
    let zoomed = compute_layout(&tree, &zoom, 1920.0, 1080.0, &config);

    println!(
        "\n[7] Zoomed into '{}': {} rectangles (was {})",
        tree.get(focus).name,
        zoomed.rects.len(),
        layout.rects.len()
    );
    let focus_rect = zoomed.rect_of(focus).expect("focused node is laid out");
    println!(
        "    Focus rect: {:.0}x{:.0} at ({:.0}, {:.0})",
        focus_rect.w, focus_rect.h, focus_rect.x, focus_rect.y
    );

    let summary = overlay::summarize(&tree, focus);
    println!("\n[8] Summary of focused subtree:");
    println!("    Pods: {}", summary.pod_count);
    println!("    Total: {}", format_value(metric, summary.total_value));
    for (i, &(id, value)) in summary.workloads.iter().take(5).enumerate() {
        println!(
            "    [{}] '{}' - {}",
            i,
            tree.get(id).name,
            format_value(metric, value)
        );
    }

    Ok(())
}
