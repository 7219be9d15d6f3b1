//! The sample tree CAD lifting searches (§4.G): an arena of partial sample
//! points, root standing for the empty assignment, each node's depth equal to
//! the number of coordinates fixed along the path from the root to it. A leaf
//! at `depth == nvars` is a full sample point.

use ratcad_rings::RealAlgebraicNumber;

/// Where a node stands in the incremental DFS search (§4.G step 3: "nodes
/// are revisited rather than rebuilt" across repeated `check` calls and
/// after `add_polynomial`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    /// Children not yet built.
    Unvisited,
    /// Currently on the DFS stack; used to detect the arena never recurses
    /// into itself.
    Expanding,
    /// Children built, but not all of them have been fully explored.
    PartiallyExplored,
    /// Every child (and every descendant) has been explored and found
    /// unsatisfiable; this subtree can never again produce a witness.
    FullyExplored,
}

#[derive(Debug, Clone)]
pub struct Node {
    pub depth: usize,
    /// The coordinate this node fixes (`None` only for the root).
    pub assignment: Option<RealAlgebraicNumber>,
    pub state: NodeState,
    pub children: Vec<usize>,
    pub children_built: bool,
    pub parent: Option<usize>,
}

impl Node {
    fn root() -> Self {
        Node {
            depth: 0,
            assignment: None,
            state: NodeState::Unvisited,
            children: Vec::new(),
            children_built: false,
            parent: None,
        }
    }
}

/// An arena-backed tree of partial sample points, reused across `check` calls
/// so that prior exploration is never redone (§4.G step 3).
#[derive(Debug, Clone)]
pub struct SampleTree {
    nodes: Vec<Node>,
}

pub const ROOT: usize = 0;

impl SampleTree {
    pub fn new() -> Self {
        SampleTree {
            nodes: vec![Node::root()],
        }
    }

    pub fn node(&self, idx: usize) -> &Node {
        &self.nodes[idx]
    }

    /// Every full-depth sample point the arena currently holds (`§6`'s
    /// `samples()` accessor), whether or not it satisfies any constraint:
    /// the points this engine instance has materialized so far, in arena
    /// order.
    pub fn leaf_points(&self, nvars: usize) -> Vec<Vec<RealAlgebraicNumber>> {
        (0..self.nodes.len())
            .filter(|&idx| self.nodes[idx].depth == nvars)
            .map(|idx| self.path_assignment(idx))
            .collect()
    }

    pub fn node_mut(&mut self, idx: usize) -> &mut Node {
        &mut self.nodes[idx]
    }

    pub fn set_state(&mut self, idx: usize, state: NodeState) {
        self.nodes[idx].state = state;
    }

    /// Add a freshly built set of children under `parent`, each carrying one
    /// candidate assignment, returning their arena indices in order.
    pub fn add_children(
        &mut self,
        parent: usize,
        assignments: Vec<RealAlgebraicNumber>,
    ) -> Vec<usize> {
        let depth = self.nodes[parent].depth + 1;
        let mut indices = Vec::with_capacity(assignments.len());
        for assignment in assignments {
            let idx = self.nodes.len();
            self.nodes.push(Node {
                depth,
                assignment: Some(assignment),
                state: NodeState::Unvisited,
                children: Vec::new(),
                children_built: false,
                parent: Some(parent),
            });
            indices.push(idx);
        }
        self.nodes[parent].children = indices.clone();
        self.nodes[parent].children_built = true;
        indices
    }

    /// Walk from `idx` up to (but excluding) the root, collecting the
    /// assignment at every ancestor, root-to-node order: the partial sample
    /// point that node represents.
    pub fn path_assignment(&self, idx: usize) -> Vec<RealAlgebraicNumber> {
        let mut chain = Vec::new();
        let mut cur = idx;
        while let Some(parent) = self.nodes[cur].parent {
            chain.push(self.nodes[cur].assignment.clone().expect("non-root node"));
            cur = parent;
        }
        chain.reverse();
        chain
    }

    /// Reset the node at `idx` to `Unvisited` and drop its children,
    /// orphaning their subtrees in the arena (§4.G step 3's documented
    /// simplification: stale descendants are never reclaimed, only made
    /// unreachable, trading a bounded amount of dead arena space for a much
    /// simpler invalidation rule).
    pub fn invalidate(&mut self, idx: usize) {
        self.nodes[idx].state = NodeState::Unvisited;
        self.nodes[idx].children.clear();
        self.nodes[idx].children_built = false;
    }

    /// Relax every `FullyExplored` ancestor of `idx` back to
    /// `PartiallyExplored`, since an invalidated descendant means the
    /// ancestor's subtree is no longer known to be exhausted.
    pub fn relax_ancestors(&mut self, idx: usize) {
        let mut cur = self.nodes[idx].parent;
        while let Some(node_idx) = cur {
            if self.nodes[node_idx].state == NodeState::FullyExplored {
                self.nodes[node_idx].state = NodeState::PartiallyExplored;
            }
            cur = self.nodes[node_idx].parent;
        }
    }
}

impl Default for SampleTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratcad_nzq::Rational;

    #[test]
    fn fresh_tree_has_only_an_unvisited_root() {
        let tree = SampleTree::new();
        assert_eq!(tree.node(ROOT).depth, 0);
        assert_eq!(tree.node(ROOT).state, NodeState::Unvisited);
        assert!(tree.node(ROOT).assignment.is_none());
    }

    #[test]
    fn add_children_records_depth_and_parent() {
        let mut tree = SampleTree::new();
        let a = RealAlgebraicNumber::from_rational(Rational::from(1));
        let b = RealAlgebraicNumber::from_rational(Rational::from(2));
        let children = tree.add_children(ROOT, vec![a, b]);
        assert_eq!(children.len(), 2);
        for &c in &children {
            assert_eq!(tree.node(c).depth, 1);
            assert_eq!(tree.node(c).parent, Some(ROOT));
        }
        assert!(tree.node(ROOT).children_built);
    }

    #[test]
    fn path_assignment_reconstructs_the_sample_point() {
        let mut tree = SampleTree::new();
        let a = RealAlgebraicNumber::from_rational(Rational::from(7));
        let children = tree.add_children(ROOT, vec![a.clone()]);
        let grandchildren =
            tree.add_children(children[0], vec![RealAlgebraicNumber::from_rational(Rational::from(9))]);
        let point = tree.path_assignment(grandchildren[0]);
        assert_eq!(point.len(), 2);
        assert_eq!(point[0].approximate(), Rational::from(7));
        assert_eq!(point[1].approximate(), Rational::from(9));
    }

    #[test]
    fn invalidate_clears_children_and_resets_state() {
        let mut tree = SampleTree::new();
        let a = RealAlgebraicNumber::from_rational(Rational::from(1));
        let children = tree.add_children(ROOT, vec![a]);
        tree.set_state(children[0], NodeState::FullyExplored);
        tree.invalidate(ROOT);
        assert_eq!(tree.node(ROOT).state, NodeState::Unvisited);
        assert!(tree.node(ROOT).children.is_empty());
        assert!(!tree.node(ROOT).children_built);
    }

    #[test]
    fn relax_ancestors_downgrades_fully_explored_parents() {
        let mut tree = SampleTree::new();
        let a = RealAlgebraicNumber::from_rational(Rational::from(1));
        let children = tree.add_children(ROOT, vec![a]);
        let grandchildren = tree.add_children(
            children[0],
            vec![RealAlgebraicNumber::from_rational(Rational::from(2))],
        );
        tree.set_state(ROOT, NodeState::FullyExplored);
        tree.set_state(children[0], NodeState::FullyExplored);
        tree.relax_ancestors(grandchildren[0]);
        assert_eq!(tree.node(ROOT).state, NodeState::PartiallyExplored);
        assert_eq!(tree.node(children[0]).state, NodeState::PartiallyExplored);
    }
}
