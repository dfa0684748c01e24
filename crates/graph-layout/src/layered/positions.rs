use super::LayeredLayout;
use crate::{NodeSizes, Point, Vec2};
use petgraph::graphmap::DiGraphMap;
use std::collections::HashMap;
use std::hash::Hash;

/// Assign node centres based on the layer structure and node sizes
///
/// Coordinates are first computed in layer space, where x runs across layers
/// and y runs along a layer, then mapped to the configured rank direction.
pub(crate) fn assign_coordinates<N, S>(
    layers: &[Vec<N>],
    graph: &DiGraphMap<N, ()>,
    sizes: &S,
    config: &LayeredLayout,
) -> HashMap<N, Point>
where
    N: Copy + Ord + Hash,
    S: NodeSizes<N>,
{
    let rank_dir = config.rank_dir;
    // Node extents in layer space: (across layers, along a layer)
    let extents = |node: N| {
        let size = sizes.size(node);
        if rank_dir.is_horizontal() {
            size
        } else {
            size.transpose()
        }
    };

    let mut positions = HashMap::new();

    // First pass: position of each layer
    assign_rank_positions(layers, &extents, &mut positions, config.rank_sep);

    // Second pass: position inside each layer
    assign_order_positions(
        layers,
        graph,
        &mut positions,
        &extents,
        config.node_sep,
        config.max_position_iterations,
    );

    let rank_span = positions
        .iter()
        .map(|(&node, pos)| pos.x + extents.size(node).x)
        .fold(0.0, f32::max);

    positions
        .into_iter()
        .map(|(node, pos)| {
            let extent = extents.size(node);
            let rank = if rank_dir.is_reversed() {
                rank_span - (pos.x + extent.x)
            } else {
                pos.x
            };
            let center = Point::new(rank, pos.y).offset(extent.half());
            if rank_dir.is_horizontal() {
                (node, center)
            } else {
                (node, Point::new(center.y, center.x))
            }
        })
        .collect()
}

/// Place layers one after the other, centring nodes inside their layer
fn assign_rank_positions<N, S>(
    layers: &[Vec<N>],
    sizes: &S,
    positions: &mut HashMap<N, Point>,
    rank_sep: f32,
) where
    N: Copy + Ord + Hash,
    S: NodeSizes<N>,
{
    // Calculate the maximum extent of each layer
    let layer_dimensions: Vec<Vec2> = layers
        .iter()
        .map(|layer| {
            layer
                .iter()
                .map(|&node| sizes.size(node))
                .fold(Vec2::zero(), Vec2::max)
        })
        .collect();

    let mut x = 0.0;
    for (layer, layer_size) in layers.iter().zip(&layer_dimensions) {
        for &node in layer {
            let node_size = sizes.size(node);
            positions.insert(
                node,
                Point::new(x + (layer_size.x - node_size.x) / 2.0, 0.0),
            );
        }
        x += layer_size.x + rank_sep;
    }
}

/// Assign in-layer positions with barycenter optimization
fn assign_order_positions<N, S>(
    layers: &[Vec<N>],
    graph: &DiGraphMap<N, ()>,
    positions: &mut HashMap<N, Point>,
    sizes: &S,
    node_sep: f32,
    max_iterations: usize,
) where
    N: Copy + Ord + Hash,
    S: NodeSizes<N>,
{
    // Initial positioning
    initial_order_positioning(layers, positions, sizes, node_sep);

    // Iterative optimization, from the last layer back to the roots
    for _ in 0..max_iterations {
        let mut changed = false;

        for layer_idx in (0..layers.len().saturating_sub(1)).rev() {
            let layer = &layers[layer_idx];
            for &node in layer {
                let Some(new_y) =
                    calculate_barycenter(node, &layers[layer_idx + 1], graph, positions, sizes)
                else {
                    continue;
                };

                let Some(pos) = positions.get_mut(&node) else {
                    continue;
                };

                if (new_y - pos.y).abs() > 0.1 {
                    pos.y = new_y;
                    changed = true;
                }
            }

            if enforce_separation(layer, positions, sizes, node_sep) {
                changed = true;
            }
        }

        if !changed {
            break;
        }
    }

    // Final adjustments
    normalize_order_positions(positions);
}

/// Push overlapping nodes of a layer apart, keeping their current order.
/// Returns whether a node moved.
fn enforce_separation<N, S>(
    layer: &[N],
    positions: &mut HashMap<N, Point>,
    sizes: &S,
    node_sep: f32,
) -> bool
where
    N: Copy + Ord + Hash,
    S: NodeSizes<N>,
{
    let mut sorted_nodes: Vec<(N, f32)> = layer
        .iter()
        .filter_map(|&node| positions.get(&node).map(|pos| (node, pos.y)))
        .collect();
    sorted_nodes.sort_by(|a, b| a.1.total_cmp(&b.1));

    let mut moved = false;
    let mut prev_bottom: Option<f32> = None;
    for (node, _) in sorted_nodes {
        let Some(pos) = positions.get_mut(&node) else {
            continue;
        };
        if let Some(prev_bottom) = prev_bottom {
            if pos.y < prev_bottom + node_sep {
                pos.y = prev_bottom + node_sep;
                moved = true;
            }
        }
        prev_bottom = Some(pos.y + sizes.size(node).y);
    }

    moved
}

/// Calculate the barycenter (average position) of connected nodes
fn calculate_barycenter<N, S>(
    node: N,
    next_layer: &[N],
    graph: &DiGraphMap<N, ()>,
    positions: &HashMap<N, Point>,
    sizes: &S,
) -> Option<f32>
where
    N: Copy + Ord + Hash,
    S: NodeSizes<N>,
{
    let mut sum_y = 0.0;
    let mut count = 0;

    for &next_node in next_layer {
        if graph.contains_edge(node, next_node) {
            if let Some(pos) = positions.get(&next_node) {
                let next_height = sizes.size(next_node).y;
                sum_y += pos.y + next_height / 2.0;
                count += 1;
            }
        }
    }

    let node_height = sizes.size(node).y;

    if count > 0 {
        Some((sum_y / count as f32) - node_height / 2.0)
    } else {
        None
    }
}

/// Initial in-layer positioning with uniform spacing
fn initial_order_positioning<N, S>(
    layers: &[Vec<N>],
    positions: &mut HashMap<N, Point>,
    sizes: &S,
    node_sep: f32,
) where
    N: Copy + Ord + Hash,
    S: NodeSizes<N>,
{
    for layer in layers {
        let mut y = 0.0;
        for &node in layer {
            if let Some(pos) = positions.get_mut(&node) {
                pos.y = y;
                y += node_sep + sizes.size(node).y;
            }
        }
    }
}

/// Normalize in-layer positions to start from 0
fn normalize_order_positions<N>(positions: &mut HashMap<N, Point>)
where
    N: Copy + Ord + Hash,
{
    let min_y = positions
        .values()
        .map(|pos| pos.y)
        .min_by(f32::total_cmp)
        .unwrap_or(0.0);

    for pos in positions.values_mut() {
        pos.y -= min_y;
    }
}
