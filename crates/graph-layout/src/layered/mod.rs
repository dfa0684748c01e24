mod acyclic;
mod crossings;
mod layers;
mod positions;

use crate::{LayoutEngine, NodeSizes, Point};
use petgraph::graphmap::DiGraphMap;
use petgraph::visit::{IntoNeighborsDirected, IntoNodeIdentifiers};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use thiserror::Error;
use tracing::debug;

use crossings::minimize_crossings;
use layers::assign_layers;
use positions::assign_coordinates;

/// Errors that can occur during layered layout computation
#[derive(Debug, Error)]
pub enum LayeredLayoutError<N>
where
    N: fmt::Debug,
{
    /// The graph contains a cycle at the given node and cycle breaking is
    /// disabled
    #[error("graph contains a cycle at node {0:?}")]
    GraphHasCycle(N),
}

/// Direction in which successive layers are placed
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RankDir {
    /// Roots on the left, layers grow to the right
    #[default]
    #[serde(rename = "LR", alias = "lr")]
    LeftRight,
    #[serde(rename = "RL", alias = "rl")]
    RightLeft,
    #[serde(rename = "TB", alias = "tb")]
    TopBottom,
    #[serde(rename = "BT", alias = "bt")]
    BottomTop,
}

impl RankDir {
    /// Whether layers are stacked along the x axis
    pub fn is_horizontal(self) -> bool {
        matches!(self, RankDir::LeftRight | RankDir::RightLeft)
    }

    /// Whether layers are placed in decreasing coordinate order
    pub fn is_reversed(self) -> bool {
        matches!(self, RankDir::RightLeft | RankDir::BottomTop)
    }
}

/// Configuration for the layered (Sugiyama-style) layout
#[derive(Debug, Clone)]
pub struct LayeredLayout {
    /// Gap between two consecutive layers
    pub rank_sep: f32,

    /// Gap between two nodes of the same layer
    pub node_sep: f32,

    /// Direction in which layers are placed
    pub rank_dir: RankDir,

    /// Reverse back edges instead of failing on cycles
    pub break_cycles: bool,

    /// Maximum iterations for crossing minimization
    pub max_crossing_iterations: usize,

    /// Maximum iterations for in-layer position optimization
    pub max_position_iterations: usize,
}

impl Default for LayeredLayout {
    fn default() -> Self {
        Self {
            rank_sep: 120.0,
            node_sep: 60.0,
            rank_dir: RankDir::default(),
            break_cycles: true,
            max_crossing_iterations: 10,
            max_position_iterations: 50,
        }
    }
}

impl LayeredLayout {
    /// Create a new layered layout with the given layer and node gaps
    pub fn new(rank_sep: f32, node_sep: f32) -> Self {
        Self {
            rank_sep,
            node_sep,
            ..Default::default()
        }
    }

    pub fn with_rank_dir(self, rank_dir: RankDir) -> Self {
        Self { rank_dir, ..self }
    }

    pub fn with_break_cycles(self, break_cycles: bool) -> Self {
        Self {
            break_cycles,
            ..self
        }
    }
}

/// Layer structure that can be cached and reused
#[derive(Debug, Clone)]
pub struct Layers<N>
where
    N: Copy + Ord + Hash + fmt::Debug,
{
    /// Acyclic copy of the input graph used for ranking and positioning
    pub(crate) graph: DiGraphMap<N, ()>,

    /// Nodes organized into topological layers
    pub nodes: Vec<Vec<N>>,

    /// Edges that were reversed to break cycles, in their original direction
    pub reversed: Vec<(N, N)>,

    /// Number of edge crossings (quality metric)
    pub crossings: usize,
}

impl<N> Layers<N>
where
    N: Copy + Ord + Hash + fmt::Debug,
{
    /// Layer index of a node
    pub fn rank_of(&self, node: N) -> Option<usize> {
        self.nodes.iter().position(|layer| layer.contains(&node))
    }
}

impl LayeredLayout {
    /// Compute layer structure (expensive, cache this)
    ///
    /// This phase breaks cycles, assigns nodes to layers and minimizes edge
    /// crossings. It only depends on the graph structure, not on node sizes.
    ///
    /// # Errors
    /// Returns an error if the graph contains a cycle and `break_cycles` is
    /// disabled
    pub fn compute_layers<G>(
        &self,
        graph: G,
    ) -> Result<Layers<G::NodeId>, LayeredLayoutError<G::NodeId>>
    where
        G: IntoNodeIdentifiers + IntoNeighborsDirected,
        G::NodeId: Copy + Ord + Hash + fmt::Debug,
    {
        // Copy into a DiGraphMap, which keeps insertion order and gives
        // cheap edge lookups for the later phases
        let mut dag = DiGraphMap::new();
        for node in graph.node_identifiers() {
            dag.add_node(node);
        }
        for node in graph.node_identifiers() {
            for succ in graph.neighbors_directed(node, petgraph::Direction::Outgoing) {
                // Self loops carry no ranking information
                if succ != node {
                    dag.add_edge(node, succ, ());
                }
            }
        }

        let reversed = if self.break_cycles {
            acyclic::reverse_back_edges(&mut dag)
        } else {
            Vec::new()
        };
        if !reversed.is_empty() {
            debug!("Reversed {} edge(s) to break cycles: {reversed:?}", reversed.len());
        }

        let layers = assign_layers(&dag)?;
        let (layers, crossings) = minimize_crossings(&dag, layers, self.max_crossing_iterations);

        Ok(Layers {
            graph: dag,
            nodes: layers,
            reversed,
            crossings,
        })
    }

    /// Compute node centres from cached layers (cheap, rerun when sizes change)
    ///
    /// This phase assigns coordinates to nodes based on their layer structure
    /// and current sizes. It can be called repeatedly as node sizes change.
    pub fn compute_positions<N, S>(&self, layers: &Layers<N>, sizes: &S) -> HashMap<N, Point>
    where
        N: Copy + Ord + Hash + fmt::Debug,
        S: NodeSizes<N>,
    {
        assign_coordinates(&layers.nodes, &layers.graph, sizes, self)
    }
}

// Implement LayoutEngine for any graph with the required capabilities
impl<G> LayoutEngine<G> for LayeredLayout
where
    G: IntoNodeIdentifiers + IntoNeighborsDirected,
    G::NodeId: Copy + Ord + Hash + fmt::Debug,
{
    type NodeId = G::NodeId;
    type Error = LayeredLayoutError<G::NodeId>;

    fn layout<S>(&self, graph: G, sizes: &S) -> Result<HashMap<Self::NodeId, Point>, Self::Error>
    where
        S: NodeSizes<Self::NodeId>,
    {
        let layers = self.compute_layers(graph)?;
        Ok(self.compute_positions(&layers, sizes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Vec2;
    use test_log::test;

    const BOX: Vec2 = Vec2 { x: 240.0, y: 60.0 };

    #[test]
    fn chain_is_laid_out_left_to_right() {
        let graph = DiGraphMap::<u32, ()>::from_edges([(1, 2), (2, 3)]);
        let layout = LayeredLayout::default();
        let centers = layout.layout(&graph, &BOX).unwrap();

        assert_eq!(centers[&1], Point::new(120.0, 30.0));
        assert_eq!(centers[&2], Point::new(480.0, 30.0));
        assert_eq!(centers[&3], Point::new(840.0, 30.0));
    }

    #[test]
    fn fork_shares_a_rank() {
        let graph = DiGraphMap::<u32, ()>::from_edges([(1, 2), (1, 3)]);
        let layout = LayeredLayout::default();
        let layers = layout.compute_layers(&graph).unwrap();
        assert_eq!(layers.nodes, vec![vec![1], vec![2, 3]]);
        assert_eq!(layers.crossings, 0);

        let centers = layout.compute_positions(&layers, &BOX);
        assert!(centers[&1].x < centers[&2].x);
        assert_eq!(centers[&2].x, centers[&3].x);
        // Children are separated by node_sep, the parent sits between them
        assert_eq!(centers[&3].y - centers[&2].y, 120.0);
        assert_eq!(centers[&1].y, (centers[&2].y + centers[&3].y) / 2.0);
    }

    #[test]
    fn top_bottom_swaps_axes() {
        let graph = DiGraphMap::<u32, ()>::from_edges([(1, 2)]);
        let layout = LayeredLayout::default().with_rank_dir(RankDir::TopBottom);
        let centers = layout.layout(&graph, &BOX).unwrap();

        assert_eq!(centers[&1], Point::new(120.0, 30.0));
        assert_eq!(centers[&2], Point::new(120.0, 30.0 + 60.0 + 120.0));
    }

    #[test]
    fn right_left_mirrors_layers() {
        let graph = DiGraphMap::<u32, ()>::from_edges([(1, 2)]);
        let layout = LayeredLayout::default().with_rank_dir(RankDir::RightLeft);
        let centers = layout.layout(&graph, &BOX).unwrap();

        assert!(centers[&1].x > centers[&2].x);
        assert_eq!(centers[&2].x, 120.0);
    }

    #[test]
    fn cycles_are_broken() {
        let graph = DiGraphMap::<u32, ()>::from_edges([(1, 2), (2, 3), (3, 1)]);
        let layout = LayeredLayout::default();
        let layers = layout.compute_layers(&graph).unwrap();

        assert_eq!(layers.reversed.len(), 1);
        assert_eq!(layers.nodes.iter().map(Vec::len).sum::<usize>(), 3);
        assert_eq!(layout.compute_positions(&layers, &BOX).len(), 3);
    }

    #[test]
    fn cycles_fail_when_breaking_is_disabled() {
        let graph = DiGraphMap::<u32, ()>::from_edges([(1, 2), (2, 1)]);
        let layout = LayeredLayout::default().with_break_cycles(false);
        assert!(matches!(
            layout.compute_layers(&graph),
            Err(LayeredLayoutError::GraphHasCycle(_))
        ));
    }

    #[test]
    fn self_loops_are_ignored() {
        let graph = DiGraphMap::<u32, ()>::from_edges([(1, 1), (1, 2)]);
        let layers = LayeredLayout::default().compute_layers(&graph).unwrap();
        assert!(layers.reversed.is_empty());
        assert_eq!(layers.rank_of(1), Some(0));
        assert_eq!(layers.rank_of(2), Some(1));
    }

    #[test]
    fn empty_graph_has_no_positions() {
        let graph = DiGraphMap::<u32, ()>::new();
        let centers = LayeredLayout::default().layout(&graph, &BOX).unwrap();
        assert!(centers.is_empty());
    }

    #[test]
    fn layout_is_deterministic() {
        let edges = [(0, 1), (0, 2), (1, 3), (2, 3), (4, 3), (3, 5), (2, 6)];
        let graph = DiGraphMap::<u32, ()>::from_edges(edges);
        let layout = LayeredLayout::default();

        let first = layout.compute_layers(&graph).unwrap();
        let second = layout.compute_layers(&graph).unwrap();
        assert_eq!(first.nodes, second.nodes);
        assert_eq!(
            layout.compute_positions(&first, &BOX),
            layout.compute_positions(&second, &BOX)
        );
    }
}
