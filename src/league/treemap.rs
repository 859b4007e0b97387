//! Slice-and-halve treemap layout.
//!
//! Each level is laid out by giving the largest weight its share of the
//! rectangle along the longer side, then recursing into what is left.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl Rect {
    pub fn unit() -> Self {
        Self {
            x_min: 0.0,
            y_min: 0.0,
            x_max: 1.0,
            y_max: 1.0,
        }
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    fn is_wide(&self) -> bool {
        self.width() >= self.height()
    }
}

/// Split `rect` into pieces proportional to `weights`.
///
/// Weights are sorted largest first and normalised; the returned rectangles
/// follow that sorted order. Non-positive totals yield nothing.
pub fn rect_divide(rect: Rect, weights: &[f64]) -> Vec<Rect> {
    let mut fractions: Vec<f64> = weights.to_vec();
    fractions.sort_by(|a, b| b.total_cmp(a));
    let total: f64 = fractions.iter().sum();
    if fractions.is_empty() || total <= 0.0 {
        return Vec::new();
    }
    fractions.iter_mut().for_each(|f| *f /= total);

    let mut rects = Vec::with_capacity(fractions.len());
    let mut rest = rect;
    let mut remaining = 1.0;

    for (i, frac) in fractions.iter().enumerate() {
        if i == fractions.len() - 1 {
            rects.push(rest);
            break;
        }
        // Share of what is left, not of the whole
        let share = if remaining > 0.0 { frac / remaining } else { 0.0 };
        let mut first = rest;
        if rest.is_wide() {
            let split = rest.x_min + rest.width() * share;
            first.x_max = split;
            rest.x_min = split;
        } else {
            let split = rest.y_min + rest.height() * share;
            first.y_max = split;
            rest.y_min = split;
        }
        rects.push(first);
        remaining -= frac;
    }

    rects
}

/// A weighted tree: leaves carry values, branches weigh their leaf sum.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeNode {
    Leaf(f64),
    Branch(Vec<(String, TreeNode)>),
}

impl TreeNode {
    pub fn weight(&self) -> f64 {
        match self {
            TreeNode::Leaf(v) => v.max(0.0),
            TreeNode::Branch(children) => children.iter().map(|(_, c)| c.weight()).sum(),
        }
    }
}

/// A laid out node: its label path from the root and its rectangle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeRect {
    pub path: Vec<String>,
    pub rect: Rect,
    pub is_leaf: bool,
}

impl TreeRect {
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    pub fn label(&self) -> &str {
        self.path.last().map_or("", String::as_str)
    }
}

/// Lay out `children` inside `base`, parents before their children.
/// Zero-weight nodes are dropped.
pub fn layout(children: &[(String, TreeNode)], base: Rect) -> Vec<TreeRect> {
    let mut out = Vec::new();
    layout_level(children, base, &[], &mut out);
    out
}

fn layout_level(children: &[(String, TreeNode)], base: Rect, prefix: &[String], out: &mut Vec<TreeRect>) {
    let mut nodes: Vec<&(String, TreeNode)> = children.iter().filter(|(_, n)| n.weight() > 0.0).collect();
    nodes.sort_by(|a, b| b.1.weight().total_cmp(&a.1.weight()));

    let weights: Vec<f64> = nodes.iter().map(|(_, n)| n.weight()).collect();
    for ((label, node), rect) in nodes.into_iter().zip(rect_divide(base, &weights)) {
        let mut path = prefix.to_vec();
        path.push(label.clone());

        match node {
            TreeNode::Leaf(_) => out.push(TreeRect {
                path,
                rect,
                is_leaf: true,
            }),
            TreeNode::Branch(grandchildren) => {
                out.push(TreeRect {
                    path: path.clone(),
                    rect,
                    is_leaf: false,
                });
                layout_level(grandchildren, rect, &path, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_rect_divide_halves_longest_side() {
        let rects = rect_divide(Rect::unit(), &[1.0, 3.0]);
        assert_eq!(rects.len(), 2);
        // Largest first, taking 3/4 of the width
        assert!(close(rects[0].x_max, 0.75));
        assert!(close(rects[0].area(), 0.75));
        assert!(close(rects[1].x_min, 0.75));
        assert!(close(rects[1].area(), 0.25));
    }

    #[test]
    fn test_rect_divide_areas_match_weights() {
        let weights = [5.0, 1.0, 2.0, 2.0];
        let rects = rect_divide(Rect::unit(), &weights);
        let areas: Vec<f64> = rects.iter().map(Rect::area).collect();
        let expected = [0.5, 0.2, 0.2, 0.1];
        for (a, e) in areas.iter().zip(expected) {
            assert!(close(*a, e), "{} != {}", a, e);
        }
        // Second cut runs along the now longer y side
        assert!(close(rects[1].x_min, 0.5));
        assert!(close(rects[1].y_max, 0.4));
    }

    #[test]
    fn test_rect_divide_edge_cases() {
        assert!(rect_divide(Rect::unit(), &[]).is_empty());
        assert!(rect_divide(Rect::unit(), &[0.0, 0.0]).is_empty());
        assert_eq!(rect_divide(Rect::unit(), &[7.0]), vec![Rect::unit()]);
    }

    #[test]
    fn test_layout_nested_tree() {
        let tree = vec![
            (
                "RB".to_string(),
                TreeNode::Branch(vec![
                    ("WEEK 1".to_string(), TreeNode::Leaf(20.0)),
                    ("WEEK 2".to_string(), TreeNode::Leaf(20.0)),
                ]),
            ),
            ("QB".to_string(), TreeNode::Leaf(60.0)),
            ("K".to_string(), TreeNode::Leaf(0.0)),
        ];
        let rects = layout(&tree, Rect::unit());

        let labels: Vec<String> = rects.iter().map(|r| r.path.join("/")).collect();
        assert_eq!(labels, vec!["QB", "RB", "RB/WEEK 1", "RB/WEEK 2"]);
        assert!(close(rects[0].rect.area(), 0.6));
        assert!(!rects[1].is_leaf);
        assert_eq!(rects[2].depth(), 2);
        assert_eq!(rects[2].label(), "WEEK 1");
        assert!(close(rects[2].rect.area() + rects[3].rect.area(), 0.4));
    }
}
