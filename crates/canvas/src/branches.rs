//! Branch numbering used to colour roadmap paths.
//!
//! Roots (nodes without incoming edges) each start a branch, in input order.
//! A breadth-first walk then hands every node the branch it first arrives
//! with. The first outgoing edge of a node continues its branch and every
//! other outgoing edge starts a new one, so each spine of the roadmap keeps a
//! single colour and side paths get their own.

use std::collections::VecDeque;
use tracing::debug;

/// Branch of every node, indexed like the nodes given to [`assign_branches`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branches {
    assigned: Vec<Option<usize>>,
    count: usize,
}

impl Branches {
    /// Branch of a node, 0 for nodes no root reaches
    pub fn branch_of(&self, node: usize) -> usize {
        self.assigned.get(node).copied().flatten().unwrap_or(0)
    }

    /// Whether the walk reached the node
    pub fn is_reached(&self, node: usize) -> bool {
        matches!(self.assigned.get(node), Some(Some(_)))
    }

    /// Number of branch ids handed out, including forks into nodes that were
    /// already claimed
    pub fn count(&self) -> usize {
        self.count
    }
}

/// Number the branches of a graph of `node_count` nodes.
///
/// `edges` are `(source, target)` node indices in edge-list order. Edges
/// naming an index outside the graph are ignored.
pub fn assign_branches(node_count: usize, edges: &[(usize, usize)]) -> Branches {
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); node_count];
    let mut in_degree = vec![0usize; node_count];
    for &(source, target) in edges {
        if source >= node_count || target >= node_count {
            continue;
        }
        children[source].push(target);
        in_degree[target] += 1;
    }

    let mut next_branch = 0;
    let mut queue = VecDeque::new();
    for node in (0..node_count).filter(|&node| in_degree[node] == 0) {
        queue.push_back((node, next_branch));
        next_branch += 1;
    }

    let mut assigned = vec![None; node_count];
    while let Some((node, branch)) = queue.pop_front() {
        if assigned[node].is_some() {
            continue;
        }
        assigned[node] = Some(branch);

        for (index, &child) in children[node].iter().enumerate() {
            let child_branch = if index == 0 {
                branch
            } else {
                next_branch += 1;
                next_branch - 1
            };
            queue.push_back((child, child_branch));
        }
    }

    let unreached = assigned.iter().filter(|b| b.is_none()).count();
    if unreached > 0 {
        debug!("{unreached} node(s) unreachable from any root, using branch 0");
    }

    Branches {
        assigned,
        count: next_branch,
    }
}
