pub mod squarify;

use std::collections::HashMap;

use crate::tree::arena::{NodeId, ResourceTree};
use crate::ui::zoom::ZoomState;

pub use squarify::Rect;

/// A positioned rectangle in the treemap layout.
#[derive(Debug, Clone, Copy)]
pub struct LayoutRect {
    pub node: NodeId,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub depth: u16,
}

impl LayoutRect {
    pub fn area(&self) -> f64 {
        self.w * self.h
    }
}

/// The full layout result (rects + fast lookup).
#[derive(Debug)]
pub struct Layout {
    /// All visible rectangles (pods + groups for interaction)
    pub rects: Vec<LayoutRect>,
    /// node → index into `rects` (O(1) hover, tooltip, highlighting)
    pub node_to_rect: HashMap<NodeId, usize>,
}

impl Layout {
    pub fn rect_of(&self, node: NodeId) -> Option<&LayoutRect> {
        self.node_to_rect.get(&node).map(|&i| &self.rects[i])
    }
}

/// Configuration for treemap layout.
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Skip recursing into rectangles smaller than this (px²).
    /// 0.0 disables the cutoff; every executed level stays exact either way.
    pub min_area: f64,
    /// Maximum recursion depth (safety + performance)
    pub max_depth: u16,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            min_area: 0.0,
            max_depth: 64,
        }
    }
}

/// Compute the layout for the whole visible subtree in one pass.
///
/// The zoom state decides which children each node expands; the squarify
/// step sizes them. Negative or non-finite viewport dimensions clamp to
/// zero before the algorithm runs.
pub fn compute_layout(
    tree: &ResourceTree,
    zoom: &ZoomState,
    viewport_w: f64,
    viewport_h: f64,
    config: &LayoutConfig,
) -> Layout {
    let viewport_w = if viewport_w.is_finite() { viewport_w.max(0.0) } else { 0.0 };
    let viewport_h = if viewport_h.is_finite() { viewport_h.max(0.0) } else { 0.0 };

    let mut rects = Vec::with_capacity(tree.len());
    let mut node_to_rect = HashMap::with_capacity(tree.len());

    rects.push(LayoutRect {
        node: tree.root,
        x: 0.0,
        y: 0.0,
        w: viewport_w,
        h: viewport_h,
        depth: 0,
    });
    node_to_rect.insert(tree.root, 0);

    let mut current_path = vec![tree.root];
    layout_children(
        tree,
        zoom,
        tree.root,
        &mut current_path,
        Rect::new(0.0, 0.0, viewport_w, viewport_h),
        0,
        config,
        &mut rects,
        &mut node_to_rect,
    );

    tracing::debug!(
        "Layout computed: {} rectangles in {:.0}x{:.0}",
        rects.len(),
        viewport_w,
        viewport_h
    );

    Layout { rects, node_to_rect }
}

/// Recursively lay out the visible children of `parent` inside `bounds`.
#[allow(clippy::too_many_arguments)]
fn layout_children(
    tree: &ResourceTree,
    zoom: &ZoomState,
    parent: NodeId,
    current_path: &mut Vec<NodeId>,
    bounds: Rect,
    depth: u16,
    config: &LayoutConfig,
    rects: &mut Vec<LayoutRect>,
    node_to_rect: &mut HashMap<NodeId, usize>,
) {
    if depth >= config.max_depth {
        return;
    }
    if bounds.w <= 0.0 || bounds.h <= 0.0 {
        return;
    }
    if config.min_area > 0.0 && bounds.area() < config.min_area {
        return;
    }

    let all_children: Vec<NodeId> = tree.children(parent).collect();
    let visible = zoom.visible_children(current_path, &all_children);

    // Drop non-positive weights, then sort descending for the squarify
    // heuristic (stable, so equal weights keep sibling order).
    let mut items: Vec<(NodeId, f64)> = visible
        .into_iter()
        .map(|id| (id, tree.get(id).value))
        .filter(|&(_, v)| v.is_finite() && v > 0.0)
        .collect();
    items.sort_by(|a, b| b.1.total_cmp(&a.1));

    if items.is_empty() {
        return;
    }

    // The tree's aggregated parent value is not trusted here; only the
    // children actually being laid out count.
    let total: f64 = items.iter().map(|&(_, v)| v).sum();
    if total <= 0.0 {
        return;
    }

    let bounds_area = bounds.area();
    let areas: Vec<f64> = items.iter().map(|&(_, v)| v / total * bounds_area).collect();
    let positioned = squarify::squarify(&areas, bounds);

    for ((child_id, _), pos) in items.iter().zip(&positioned) {
        let child_depth = depth + 1;
        let idx = rects.len();
        rects.push(LayoutRect {
            node: *child_id,
            x: pos.x,
            y: pos.y,
            w: pos.w,
            h: pos.h,
            depth: child_depth,
        });
        node_to_rect.insert(*child_id, idx);

        if !tree.get(*child_id).is_leaf() {
            current_path.push(*child_id);
            layout_children(
                tree,
                zoom,
                *child_id,
                current_path,
                *pos,
                child_depth,
                config,
                rects,
                node_to_rect,
            );
            current_path.pop();
        }
    }
}
