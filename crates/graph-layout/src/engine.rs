use crate::{NodeSizes, Point};
use std::collections::HashMap;
use std::hash::Hash;

/// A layout engine that can compute positions for graph nodes
///
/// This trait is generic over the graph type `G`, allowing different layout
/// engines to work with different graph types. The layered layout implements
/// it for any graph exposing node identifiers and directed neighbours.
pub trait LayoutEngine<G> {
    /// The type used to identify nodes in the graph
    type NodeId: Copy + Ord + Hash;

    /// The error returned when the layout cannot be computed
    type Error: std::error::Error;

    /// Compute the centre of every node of the given graph
    ///
    /// # Errors
    /// Returns an error if a layout-specific constraint is violated
    fn layout<S>(&self, graph: G, sizes: &S) -> Result<HashMap<Self::NodeId, Point>, Self::Error>
    where
        S: NodeSizes<Self::NodeId>;
}
