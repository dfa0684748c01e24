//! Generic graph layout algorithms
//!
//! This crate provides layout algorithms for directed graphs that work with
//! any graph data structure implementing petgraph's visitor traits.
//!
//! # Layout Engines
//!
//! - [`LayeredLayout`]: Sugiyama-style layered layout. Cycles are broken by
//!   reversing back edges before ranking, so any directed graph can be laid
//!   out.
//!
//! Positions returned by the engines are node centres.
//!
//! # Example
//!
//! ```
//! use roadweave_graph_layout::{LayeredLayout, LayoutEngine, RankDir, Vec2};
//! use petgraph::graphmap::DiGraphMap;
//!
//! // Create a graph
//! let mut graph = DiGraphMap::new();
//! graph.add_edge(1, 2, ());
//! graph.add_edge(2, 3, ());
//!
//! // Create a left-to-right layout engine
//! let engine = LayeredLayout::new(120.0, 60.0).with_rank_dir(RankDir::LeftRight);
//!
//! // Every node gets the same box
//! let sizes = Vec2::new(240.0, 60.0);
//!
//! // Use the LayoutEngine trait (simple, single-phase):
//! let centers = engine.layout(&graph, &sizes).unwrap();
//! assert!(centers[&1].x < centers[&2].x);
//!
//! // Or directly by calling each step for better control
//! let layers = engine.compute_layers(&graph).unwrap();
//! let centers = engine.compute_positions(&layers, &sizes);
//! ```

mod engine;
mod geometry;
mod sizes;

pub mod layered;

// Re-export core types and traits
pub use engine::LayoutEngine;
pub use geometry::{Point, Vec2};
pub use sizes::NodeSizes;

// Re-export petgraph visitor traits for graph abstraction
pub use petgraph::visit::{GraphBase, IntoNeighborsDirected, IntoNodeIdentifiers};
pub use petgraph::Direction;

// Re-export layered layout types
pub use layered::{LayeredLayout, LayeredLayoutError, Layers, RankDir};
