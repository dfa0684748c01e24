use petgraph::graphmap::DiGraphMap;
use std::collections::HashMap;
use std::hash::Hash;

/// Minimize edge crossings by swapping adjacent nodes in layers
///
/// Uses a greedy local search approach with multiple iterations. Swaps that
/// leave the crossing count unchanged only stick when they restore the
/// identifier order, which keeps the result deterministic.
pub(crate) fn minimize_crossings<N>(
    graph: &DiGraphMap<N, ()>,
    mut layers: Vec<Vec<N>>,
    max_iterations: usize,
) -> (Vec<Vec<N>>, usize)
where
    N: Copy + Ord + Hash,
{
    for _ in 0..max_iterations {
        let mut improved = false;

        for layer_index in 0..layers.len() {
            let layer_len = layers[layer_index].len();
            for i in 0..layer_len.saturating_sub(1) {
                let crossings_before = count_crossings(graph, &layers);
                layers[layer_index].swap(i, i + 1);
                let crossings_after = count_crossings(graph, &layers);

                if crossings_after > crossings_before
                    || (crossings_after == crossings_before
                        && layers[layer_index][i] > layers[layer_index][i + 1])
                {
                    // Swap back if no improvement
                    layers[layer_index].swap(i, i + 1);
                } else {
                    improved = true;
                }
            }
        }

        if !improved {
            break;
        }
    }

    let crossings = count_crossings(graph, &layers);
    (layers, crossings)
}

/// Count the number of crossings between edges joining adjacent layers
pub(crate) fn count_crossings<N>(graph: &DiGraphMap<N, ()>, layers: &[Vec<N>]) -> usize
where
    N: Copy + Ord + Hash,
{
    let mut crossings = 0;

    for pair in layers.windows(2) {
        let (upper_layer, lower_layer) = (&pair[0], &pair[1]);
        let lower_index: HashMap<N, usize> = lower_layer
            .iter()
            .enumerate()
            .map(|(index, &node)| (node, index))
            .collect();

        // (upper position, lower position) of every edge between the layers
        let segments: Vec<(usize, usize)> = upper_layer
            .iter()
            .enumerate()
            .flat_map(|(upper, &node)| {
                graph
                    .neighbors(node)
                    .filter_map(|target| lower_index.get(&target).map(|&lower| (upper, lower)))
                    .collect::<Vec<_>>()
            })
            .collect();

        for (i, &(upper1, lower1)) in segments.iter().enumerate() {
            for &(upper2, lower2) in &segments[i + 1..] {
                if upper1 != upper2 && lower1 != lower2 && (upper1 < upper2) != (lower1 < lower2) {
                    crossings += 1;
                }
            }
        }
    }

    crossings
}
