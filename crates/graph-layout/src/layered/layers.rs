use super::LayeredLayoutError;
use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;
use petgraph::Direction;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// Assign layers to nodes based on topological order
///
/// Uses a two-pass approach to minimize edge lengths:
/// - First pass: assign each node to the layer after its predecessors
/// - Second pass: move nodes closer to their successors when possible
///
/// Nodes inside a layer are sorted by their identifier.
pub(crate) fn assign_layers<N>(
    graph: &DiGraphMap<N, ()>,
) -> Result<Vec<Vec<N>>, LayeredLayoutError<N>>
where
    N: Copy + Ord + Hash + fmt::Debug,
{
    if graph.node_count() == 0 {
        return Ok(Vec::new());
    }

    let topo_order = toposort(graph, None)
        .map_err(|cycle| LayeredLayoutError::GraphHasCycle(cycle.node_id()))?;
    let mut layer_map: HashMap<N, usize> = HashMap::new();

    // First pass: forward, assign each node to layer after its predecessors
    for &node in &topo_order {
        let max_pred_layer = graph
            .neighbors_directed(node, Direction::Incoming)
            .map(|pred| layer_map.get(&pred).copied().unwrap_or(0) + 1)
            .max()
            .unwrap_or(0);
        layer_map.insert(node, max_pred_layer);
    }

    // Second pass: backward, move nodes closer to their successors
    for &node in topo_order.iter().rev() {
        let layer = layer_map.get(&node).copied().unwrap_or(0);
        let Some(min_succ_layer) = graph
            .neighbors_directed(node, Direction::Outgoing)
            .filter_map(|succ| layer_map.get(&succ).copied())
            .min()
        else {
            continue;
        };

        if min_succ_layer > layer + 1 {
            layer_map.insert(node, min_succ_layer - 1);
        }
    }

    // Group nodes by layer
    let max_layer = layer_map.values().copied().max().unwrap_or(0);
    let mut layers = vec![Vec::new(); max_layer + 1];
    for &node in &topo_order {
        if let Some(&layer) = layer_map.get(&node) {
            layers[layer].push(node);
        }
    }
    for layer in &mut layers {
        layer.sort();
    }

    Ok(layers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn longest_path_ranking() {
        let graph = DiGraphMap::<u32, ()>::from_edges([(1, 2), (2, 3), (1, 3)]);
        assert_eq!(assign_layers(&graph).unwrap(), vec![vec![1], vec![2], vec![3]]);
    }

    #[test]
    fn late_source_is_pulled_towards_its_successor() {
        // 4 only feeds 3, which sits two layers down
        let graph = DiGraphMap::<u32, ()>::from_edges([(1, 2), (2, 3), (4, 3)]);
        assert_eq!(
            assign_layers(&graph).unwrap(),
            vec![vec![1], vec![2, 4], vec![3]]
        );
    }

    #[test]
    fn isolated_nodes_land_in_the_first_layer() {
        let mut graph = DiGraphMap::<u32, ()>::from_edges([(1, 2)]);
        graph.add_node(7);
        assert_eq!(assign_layers(&graph).unwrap(), vec![vec![1, 7], vec![2]]);
    }
}
