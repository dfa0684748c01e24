use petgraph::graphmap::DiGraphMap;
use std::collections::HashSet;
use std::hash::Hash;

struct Frame<N> {
    node: N,
    successors: Vec<N>,
    next: usize,
}

impl<N: Copy + Ord + Hash> Frame<N> {
    fn new(graph: &DiGraphMap<N, ()>, node: N) -> Self {
        Self {
            node,
            successors: graph.neighbors(node).collect(),
            next: 0,
        }
    }
}

/// Make the graph acyclic by reversing every back edge found by a depth-first
/// search
///
/// Nodes and successors are visited in insertion order so the same graph
/// always loses the same edges. Returns the reversed edges in their original
/// direction.
pub(crate) fn reverse_back_edges<N>(graph: &mut DiGraphMap<N, ()>) -> Vec<(N, N)>
where
    N: Copy + Ord + Hash,
{
    let mut visited = HashSet::new();
    let mut on_stack = HashSet::new();
    let mut back_edges = Vec::new();

    let roots: Vec<N> = graph.nodes().collect();
    for root in roots {
        if !visited.insert(root) {
            continue;
        }
        on_stack.insert(root);
        let mut stack = vec![Frame::new(graph, root)];

        while let Some(frame) = stack.last_mut() {
            let Some(&succ) = frame.successors.get(frame.next) else {
                on_stack.remove(&frame.node);
                stack.pop();
                continue;
            };
            frame.next += 1;
            let node = frame.node;

            if on_stack.contains(&succ) {
                back_edges.push((node, succ));
            } else if visited.insert(succ) {
                on_stack.insert(succ);
                stack.push(Frame::new(graph, succ));
            }
        }
    }

    for &(from, to) in &back_edges {
        graph.remove_edge(from, to);
        graph.add_edge(to, from, ());
    }

    back_edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use petgraph::algo::is_cyclic_directed;

    #[test]
    fn dag_is_untouched() {
        let mut graph = DiGraphMap::<u32, ()>::from_edges([(1, 2), (1, 3), (2, 3)]);
        assert!(reverse_back_edges(&mut graph).is_empty());
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn closing_edge_is_reversed() {
        let mut graph = DiGraphMap::<u32, ()>::from_edges([(1, 2), (2, 3), (3, 1)]);
        assert_eq!(reverse_back_edges(&mut graph), vec![(3, 1)]);
        assert!(graph.contains_edge(1, 3));
        assert!(!is_cyclic_directed(&graph));
    }

    #[test]
    fn two_cycle_collapses_into_one_edge() {
        let mut graph = DiGraphMap::<u32, ()>::from_edges([(1, 2), (2, 1)]);
        assert_eq!(reverse_back_edges(&mut graph), vec![(2, 1)]);
        assert_eq!(graph.edge_count(), 1);
        assert!(!is_cyclic_directed(&graph));
    }
}
