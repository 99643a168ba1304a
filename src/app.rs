use crate::layout::{self, Layout, LayoutConfig};
use crate::tree::arena::{NodeId, ResourceTree};
use crate::ui::input;
use crate::ui::zoom::ZoomState;

/// Top-level view state: owns the current tree, zoom selection, and the
/// rectangle map the renderer draws from.
///
/// There is no implicit reactivity. The host event loop calls `set_tree`,
/// `resize`, `tap_at`/`tap_node` or `select_breadcrumb` as events arrive,
/// then `relayout` once before the next frame when `needs_relayout` is set.
pub struct ClustermapApp {
    pub tree: Option<ResourceTree>,
    pub zoom: ZoomState,
    pub layout: Option<Layout>,
    pub layout_config: LayoutConfig,

    pub viewport_width: f64,
    pub viewport_height: f64,
    pub needs_relayout: bool,
}

impl ClustermapApp {
    pub fn new() -> Self {
        Self {
            tree: None,
            zoom: ZoomState::new(),
            layout: None,
            layout_config: LayoutConfig::default(),
            viewport_width: 800.0,
            viewport_height: 600.0,
            needs_relayout: true,
        }
    }

    /// Install a freshly built tree. The old selection path's ids no
    /// longer resolve, so the zoom resets to fully-out.
    pub fn set_tree(&mut self, tree: ResourceTree) {
        tracing::info!("New tree installed: {} nodes", tree.len());
        self.zoom.clear();
        self.tree = Some(tree);
        self.layout = None;
        self.needs_relayout = true;
    }

    /// Handle viewport resize. Non-finite or negative dimensions clamp to
    /// zero rather than reaching the layout algorithm.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.viewport_width = if width.is_finite() { width.max(0.0) } else { 0.0 };
        self.viewport_height = if height.is_finite() { height.max(0.0) } else { 0.0 };
        self.needs_relayout = true;
    }

    /// Recompute the rectangle map for the current tree, zoom and
    /// viewport. The previous map is replaced wholesale.
    pub fn relayout(&mut self) {
        if let Some(tree) = &self.tree {
            let computed = layout::compute_layout(
                tree,
                &self.zoom,
                self.viewport_width,
                self.viewport_height,
                &self.layout_config,
            );
            tracing::debug!("Relayout: {} rectangles", computed.rects.len());
            self.layout = Some(computed);
        }
        self.needs_relayout = false;
    }

    /// Handle a tap on a specific node (the renderer knows which drawable
    /// view was tapped). Applies the toggle policy; leaf taps do nothing.
    /// Returns true if the selection changed.
    pub fn tap_node(&mut self, node: NodeId) -> bool {
        let Some(tree) = &self.tree else {
            return false;
        };
        // A stale id (from a layout predating a tree swap) is ignored
        if node.index() >= tree.len() {
            return false;
        }
        let path = tree.path_to(node);
        let changed = self.zoom.handle_tap(&path, tree.get(node).is_leaf());
        if changed {
            self.needs_relayout = true;
        }
        changed
    }

    /// Handle a tap at viewport coordinates: hit-test the current
    /// rectangle map and forward to `tap_node`.
    pub fn tap_at(&mut self, x: f64, y: f64) -> bool {
        let Some(node) = self.hover(x, y) else {
            return false;
        };
        self.tap_node(node)
    }

    /// Which node is under the cursor, if any.
    pub fn hover(&self, x: f64, y: f64) -> Option<NodeId> {
        let layout = self.layout.as_ref()?;
        input::hit_test(&layout.rects, x, y)
    }

    /// Breadcrumb click: keep the first `len` steps of the selection.
    /// Returns true if the selection changed.
    pub fn select_breadcrumb(&mut self, len: usize) -> bool {
        let changed = self.zoom.truncate_to(len);
        if changed {
            self.needs_relayout = true;
        }
        changed
    }

    /// Whether a node's label renders at full opacity under the current
    /// zoom. Nodes outside the current tree read as unzoomed (highlighted).
    pub fn label_emphasis(&self, node: NodeId) -> bool {
        match &self.tree {
            Some(tree) if node.index() < tree.len() => {
                self.zoom.should_highlight_label(&tree.path_to(node))
            }
            _ => true,
        }
    }
}

impl Default for ClustermapApp {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::{ContainerResources, PodEntry};
    use crate::tree::arena::SizeMetric;
    use crate::tree::build_tree;

    fn pod(namespace: &str, workload: &str, name: &str, cpu: &str) -> PodEntry {
        PodEntry {
            namespace: namespace.to_string(),
            workload: Some(workload.to_string()),
            name: name.to_string(),
            containers: vec![ContainerResources {
                cpu_request: Some(cpu.to_string()),
                memory_request: None,
            }],
        }
    }

    fn ready_app() -> ClustermapApp {
        let entries = vec![
            pod("default", "web", "web-1", "600m"),
            pod("default", "web", "web-2", "600m"),
            pod("kube-system", "dns", "dns-1", "400m"),
            pod("kube-system", "dns", "dns-2", "400m"),
        ];
        let mut app = ClustermapApp::new();
        app.set_tree(build_tree("test", &entries, SizeMetric::Cpu));
        app.resize(100.0, 100.0);
        app.relayout();
        app
    }

    fn namespace(app: &ClustermapApp, name: &str) -> NodeId {
        let tree = app.tree.as_ref().unwrap();
        tree.children(tree.root)
            .find(|&id| tree.get(id).name == name)
            .unwrap()
    }

    #[test]
    fn tap_zooms_in_and_out() {
        let mut app = ready_app();
        let ns = namespace(&app, "default");
        let other = namespace(&app, "kube-system");

        assert!(app.tap_node(ns));
        app.relayout();

        // Focused namespace takes the whole viewport; sibling is pruned
        let layout = app.layout.as_ref().unwrap();
        let rect = layout.rect_of(ns).unwrap();
        assert!((rect.w - 100.0).abs() < 1e-9 && (rect.h - 100.0).abs() < 1e-9);
        assert!(layout.rect_of(other).is_none());
        assert!(!app.label_emphasis(other));
        assert!(app.label_emphasis(ns));

        // Tapping the focus again zooms back out
        assert!(app.tap_node(ns));
        app.relayout();
        assert!(app.layout.as_ref().unwrap().rect_of(other).is_some());
        assert!(app.label_emphasis(other));
    }

    #[test]
    fn tap_at_resolves_through_hit_test() {
        let mut app = ready_app();
        // Deepest rect under any interior point is a pod leaf: no zoom
        let node = app.hover(50.0, 50.0).unwrap();
        assert!(app.tree.as_ref().unwrap().get(node).is_leaf());
        assert!(!app.tap_at(50.0, 50.0));
    }

    #[test]
    fn new_tree_resets_selection() {
        let mut app = ready_app();
        let ns = namespace(&app, "default");
        app.tap_node(ns);
        assert!(app.zoom.is_zoomed());

        let entries = vec![pod("fresh", "api", "api-1", "100m")];
        app.set_tree(build_tree("test", &entries, SizeMetric::Cpu));
        assert!(!app.zoom.is_zoomed());
        assert!(app.needs_relayout);
    }

    #[test]
    fn breadcrumb_truncates_selection() {
        let mut app = ready_app();
        let ns = namespace(&app, "default");
        let tree = app.tree.as_ref().unwrap();
        let workload = tree.children(ns).next().unwrap();

        app.tap_node(workload);
        assert_eq!(app.zoom.selected().len(), 3);

        assert!(app.select_breadcrumb(2));
        assert_eq!(app.zoom.selected().len(), 2);
        assert_eq!(app.zoom.selected().last(), Some(&ns));

        assert!(app.select_breadcrumb(0));
        assert!(!app.zoom.is_zoomed());
    }

    #[test]
    fn resize_clamps_bad_dimensions() {
        let mut app = ready_app();
        app.resize(-5.0, f64::NAN);
        assert_eq!(app.viewport_width, 0.0);
        assert_eq!(app.viewport_height, 0.0);
        app.relayout(); // must not panic
        assert_eq!(app.layout.as_ref().unwrap().rects.len(), 1);
    }
}
