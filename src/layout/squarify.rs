/// An axis-aligned rectangle in layout space. Double precision throughout;
/// coordinates are never rounded here (presentation rounds for display).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn area(&self) -> f64 {
        self.w * self.h
    }
}

/// Squarified treemap row layout (Bruls/Huizing/van Wijk), greedy
/// incremental variant.
///
/// `areas` must be sorted descending and sum to the area of `bounds`;
/// returns one rectangle per entry, in order. Rows are laid along the
/// shorter side of the remaining rectangle and grow while the next entry
/// does not strictly worsen the row's worst aspect ratio; on a tie the
/// row keeps growing.
pub fn squarify(areas: &[f64], bounds: Rect) -> Vec<Rect> {
    let mut result = Vec::with_capacity(areas.len());
    if areas.is_empty() || bounds.w <= 0.0 || bounds.h <= 0.0 {
        return result;
    }

    let Rect {
        mut x,
        mut y,
        mut w,
        mut h,
    } = bounds;

    let mut i = 0;
    while i < areas.len() {
        let short = w.min(h);
        if short <= 0.0 {
            // Remaining space has collapsed to a line; whatever is left
            // gets degenerate rectangles the caller must not render.
            for _ in i..areas.len() {
                result.push(Rect::new(x, y, 0.0, 0.0));
            }
            break;
        }

        // Grow the row while the worst aspect ratio does not strictly worsen
        let mut end = i + 1;
        let mut row_sum = areas[i];
        let mut worst = worst_aspect_ratio(&areas[i..end], row_sum, short);
        while end < areas.len() {
            let candidate_sum = row_sum + areas[end];
            let candidate = worst_aspect_ratio(&areas[i..=end], candidate_sum, short);
            if candidate > worst {
                break;
            }
            row_sum = candidate_sum;
            worst = candidate;
            end += 1;
        }

        // The row spans the short side; its thickness consumes the long one
        let thickness = row_sum / short;
        let mut offset = 0.0;
        for &area in &areas[i..end] {
            let length = area / thickness;
            if w >= h {
                result.push(Rect::new(x, y + offset, thickness, length));
            } else {
                result.push(Rect::new(x + offset, y, length, thickness));
            }
            offset += length;
        }

        if w >= h {
            x += thickness;
            w = (w - thickness).max(0.0);
        } else {
            y += thickness;
            h = (h - thickness).max(0.0);
        }

        i = end;
    }

    result
}

/// Worst (largest) aspect ratio any element of the row would get if the
/// row were laid along a side of length `side` with total area `sum`.
/// Only the extremes matter: the largest element ends up flattest and the
/// smallest thinnest.
fn worst_aspect_ratio(row: &[f64], sum: f64, side: f64) -> f64 {
    if row.is_empty() || sum <= 0.0 || side <= 0.0 {
        return f64::MAX;
    }
    let side_sq = side * side;
    let sum_sq = sum * sum;
    let max_a = row.iter().copied().fold(0.0, f64::max);
    let min_a = row.iter().copied().fold(f64::INFINITY, f64::min);
    ((side_sq * max_a) / sum_sq).max(sum_sq / (side_sq * min_a))
}
