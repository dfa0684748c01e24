//! Roadmap layout: positions from a layered layout, colours from the branch
//! each node belongs to.
//!
//! ```
//! use roadweave_canvas::RoadmapLayout;
//! use roadweave_common::{GraphEdge, GraphNode, Roadmap};
//!
//! let roadmap = Roadmap::new(
//!     vec![GraphNode::new("1", "Basics"), GraphNode::new("2", "Ownership")],
//!     vec![GraphEdge::new("1", "2")],
//! );
//! let result = RoadmapLayout::default().layout(&roadmap);
//! assert!(result.node("1").unwrap().x < result.node("2").unwrap().x);
//! ```

pub mod branches;
pub mod color;
pub mod config;
pub mod palette;
pub mod style;

mod engine;

pub use branches::{assign_branches, Branches};
pub use config::{ConfigError, LayoutConfig};
pub use engine::RoadmapLayout;
pub use palette::{ColorPair, Palette};
