use crate::layout::LayoutRect;
use crate::tree::arena::NodeId;

/// Hit-test: find which layout rectangle contains the given point.
/// Returns the topmost (deepest) rectangle at that point. Deeper nodes
/// are appended later during layout, so the first reverse hit wins.
/// Zero-area rectangles can never be hit.
pub fn hit_test(layout_rects: &[LayoutRect], x: f64, y: f64) -> Option<NodeId> {
    for rect in layout_rects.iter().rev() {
        if x >= rect.x && x < rect.x + rect.w && y >= rect.y && y < rect.y + rect.h {
            return Some(rect.node);
        }
    }
    None
}
