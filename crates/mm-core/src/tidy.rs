//! Tidy tree layout (Reingold–Tilford with the Buchheim–Jünger–Leipert
//! linear-time refinements).
//!
//! Runs over a petgraph hierarchy whose edges point parent → child and
//! produces a breadth coordinate `x` and a depth coordinate `y` per node,
//! fitted into a `breadth × height` box:
//!
//! - the leftmost and rightmost nodes sit half a separation inside the box,
//!   which for a radial layout keeps the first and last leaves from meeting
//!   at the seam;
//! - the deepest node lands on `y = height` and levels are evenly spaced.
//!
//! Node spacing comes from a separation function: `sibling` units between
//! nodes sharing a parent, `cousin` units otherwise.

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};

/// Separation in abstract breadth units before fitting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Separation {
    pub sibling: f64,
    pub cousin: f64,
}

impl Default for Separation {
    fn default() -> Self {
        Self {
            sibling: 1.0,
            cousin: 2.0,
        }
    }
}

/// Fitted position of one node.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TidyPoint {
    /// Breadth coordinate in `[0, breadth]`.
    pub x: f64,
    /// Depth coordinate in `[0, height]`.
    pub y: f64,
    pub depth: usize,
}

/// Per-node working state of the two walks.
#[derive(Debug, Clone)]
struct Walker {
    parent: Option<usize>,
    children: Vec<usize>,
    /// Position among siblings.
    number: usize,
    depth: usize,
    prelim: f64,
    modifier: f64,
    change: f64,
    shift: f64,
    thread: Option<usize>,
    ancestor: usize,
    /// Default ancestor for the next child's apportion step.
    default_ancestor: Option<usize>,
}

struct Tidy {
    nodes: Vec<Walker>,
    separation: Separation,
}

/// Lay out the tree rooted at `root`.
///
/// The result is indexed by `NodeIndex::index()`. Nodes not reachable from
/// `root` keep a zeroed point. Children are taken in ascending `NodeIndex`
/// order, so insert them in the order they should appear.
pub fn tidy_tree<N, E>(
    graph: &DiGraph<N, E>,
    root: NodeIndex,
    separation: Separation,
    breadth: f64,
    height: f64,
) -> Vec<TidyPoint> {
    let mut points = vec![TidyPoint::default(); graph.node_count()];
    if graph.node_weight(root).is_none() {
        return points;
    }

    let mut tidy = Tidy::build(graph, root, separation);
    let r = root.index();
    tidy.first_walk(r);

    let mut x = vec![0.0; graph.node_count()];
    // The root is anchored at 0: its virtual parent carries `-prelim`.
    let root_offset = -tidy.nodes[r].prelim;
    tidy.second_walk(r, root_offset, &mut x);

    // Extremes in pre-order, first hit wins on ties.
    let order = tidy.preorder(r);
    let (mut left, mut right, mut bottom) = (r, r, r);
    for &v in &order {
        if x[v] < x[left] {
            left = v;
        }
        if x[v] > x[right] {
            right = v;
        }
        if tidy.nodes[v].depth > tidy.nodes[bottom].depth {
            bottom = v;
        }
    }

    let s = if left == right {
        1.0
    } else {
        tidy.separate(left, right) / 2.0
    };
    let tx = s - x[left];
    let kx = breadth / (x[right] + s + tx);
    let ky = height / (tidy.nodes[bottom].depth.max(1) as f64);

    for &v in &order {
        let depth = tidy.nodes[v].depth;
        points[v] = TidyPoint {
            x: (x[v] + tx) * kx,
            y: depth as f64 * ky,
            depth,
        };
    }
    points
}

impl Tidy {
    fn build<N, E>(graph: &DiGraph<N, E>, root: NodeIndex, separation: Separation) -> Self {
        let blank = |i: usize| Walker {
            parent: None,
            children: Vec::new(),
            number: 0,
            depth: 0,
            prelim: 0.0,
            modifier: 0.0,
            change: 0.0,
            shift: 0.0,
            thread: None,
            ancestor: i,
            default_ancestor: None,
        };
        let mut nodes: Vec<Walker> = (0..graph.node_count()).map(blank).collect();

        let mut stack = vec![root];
        while let Some(idx) = stack.pop() {
            let mut children: Vec<NodeIndex> = graph
                .neighbors_directed(idx, Direction::Outgoing)
                .collect();
            children.sort();

            let v = idx.index();
            for (number, child) in children.iter().enumerate() {
                let c = child.index();
                nodes[c].parent = Some(v);
                nodes[c].number = number;
                nodes[c].depth = nodes[v].depth + 1;
            }
            nodes[v].children = children.iter().map(|c| c.index()).collect();
            stack.extend(children);
        }

        Self { nodes, separation }
    }

    fn preorder(&self, root: usize) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![root];
        while let Some(v) = stack.pop() {
            order.push(v);
            stack.extend(self.nodes[v].children.iter().rev());
        }
        order
    }

    fn separate(&self, a: usize, b: usize) -> f64 {
        let pa = self.nodes[a].parent;
        if pa.is_some() && pa == self.nodes[b].parent {
            self.separation.sibling
        } else {
            self.separation.cousin
        }
    }

    fn next_left(&self, v: usize) -> Option<usize> {
        self.nodes[v].children.first().copied().or(self.nodes[v].thread)
    }

    fn next_right(&self, v: usize) -> Option<usize> {
        self.nodes[v].children.last().copied().or(self.nodes[v].thread)
    }

    fn left_sibling(&self, v: usize) -> Option<usize> {
        let number = self.nodes[v].number;
        let parent = self.nodes[v].parent?;
        number
            .checked_sub(1)
            .map(|i| self.nodes[parent].children[i])
    }

    /// Bottom-up pass: preliminary breadth and modifiers.
    fn first_walk(&mut self, v: usize) {
        for i in 0..self.nodes[v].children.len() {
            let child = self.nodes[v].children[i];
            self.first_walk(child);
        }

        let w = self.left_sibling(v);
        if let (Some(&first), Some(&last)) =
            (self.nodes[v].children.first(), self.nodes[v].children.last())
        {
            self.execute_shifts(v);
            let midpoint = (self.nodes[first].prelim + self.nodes[last].prelim) / 2.0;
            if let Some(w) = w {
                self.nodes[v].prelim = self.nodes[w].prelim + self.separate(v, w);
                self.nodes[v].modifier = self.nodes[v].prelim - midpoint;
            } else {
                self.nodes[v].prelim = midpoint;
            }
        } else if let Some(w) = w {
            self.nodes[v].prelim = self.nodes[w].prelim + self.separate(v, w);
        }

        if let Some(parent) = self.nodes[v].parent {
            let ancestor = self.nodes[parent]
                .default_ancestor
                .unwrap_or(self.nodes[parent].children[0]);
            let next = self.apportion(v, w, ancestor);
            self.nodes[parent].default_ancestor = Some(next);
        }
    }

    /// Push `v`'s subtree right until it clears every subtree to its left.
    fn apportion(&mut self, v: usize, w: Option<usize>, mut ancestor: usize) -> usize {
        let Some(w) = w else {
            return ancestor;
        };
        let Some(parent) = self.nodes[v].parent else {
            return ancestor;
        };

        let mut vip = v;
        let mut vop = v;
        let mut vim = w;
        let mut vom = self.nodes[parent].children[0];
        let mut sip = self.nodes[vip].modifier;
        let mut sop = self.nodes[vop].modifier;
        let mut sim = self.nodes[vim].modifier;
        let mut som = self.nodes[vom].modifier;

        let (next_im, next_ip) = loop {
            let next_im = self.next_right(vim);
            let next_ip = self.next_left(vip);
            let (Some(im), Some(ip)) = (next_im, next_ip) else {
                break (next_im, next_ip);
            };
            vim = im;
            vip = ip;
            vom = self.next_left(vom).unwrap_or(vom);
            vop = self.next_right(vop).unwrap_or(vop);
            self.nodes[vop].ancestor = v;

            let shift = self.nodes[vim].prelim + sim - self.nodes[vip].prelim - sip
                + self.separate(vim, vip);
            if shift > 0.0 {
                let wm = self.next_ancestor(vim, v, ancestor);
                self.move_subtree(wm, v, shift);
                sip += shift;
                sop += shift;
            }
            sim += self.nodes[vim].modifier;
            sip += self.nodes[vip].modifier;
            som += self.nodes[vom].modifier;
            sop += self.nodes[vop].modifier;
        };

        if let Some(im) = next_im
            && self.next_right(vop).is_none()
        {
            self.nodes[vop].thread = Some(im);
            self.nodes[vop].modifier += sim - sop;
        }
        if let Some(ip) = next_ip
            && self.next_left(vom).is_none()
        {
            self.nodes[vom].thread = Some(ip);
            self.nodes[vom].modifier += sip - som;
            ancestor = v;
        }
        ancestor
    }

    fn next_ancestor(&self, vim: usize, v: usize, ancestor: usize) -> usize {
        let candidate = self.nodes[vim].ancestor;
        if self.nodes[candidate].parent == self.nodes[v].parent {
            candidate
        } else {
            ancestor
        }
    }

    fn move_subtree(&mut self, wm: usize, wp: usize, shift: f64) {
        let subtrees = self.nodes[wp]
            .number
            .saturating_sub(self.nodes[wm].number)
            .max(1) as f64;
        let change = shift / subtrees;
        self.nodes[wp].change -= change;
        self.nodes[wp].shift += shift;
        self.nodes[wm].change += change;
        self.nodes[wp].prelim += shift;
        self.nodes[wp].modifier += shift;
    }

    fn execute_shifts(&mut self, v: usize) {
        let mut shift = 0.0;
        let mut change = 0.0;
        for i in (0..self.nodes[v].children.len()).rev() {
            let w = self.nodes[v].children[i];
            self.nodes[w].prelim += shift;
            self.nodes[w].modifier += shift;
            change += self.nodes[w].change;
            shift += self.nodes[w].shift + change;
        }
    }

    /// Top-down pass: fold accumulated modifiers into final breadth.
    fn second_walk(&mut self, v: usize, parent_modifier: f64, x: &mut [f64]) {
        x[v] = self.nodes[v].prelim + parent_modifier;
        self.nodes[v].modifier += parent_modifier;
        let modifier = self.nodes[v].modifier;
        for i in 0..self.nodes[v].children.len() {
            let child = self.nodes[v].children[i];
            self.second_walk(child, modifier, x);
        }
    }
}
