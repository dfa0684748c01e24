use crate::model::GraphNode;
use serde::{Deserialize, Serialize};

/// Everything a renderer needs to paint a roadmap.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutResult {
    pub nodes: Vec<NodeLayout>,
    pub edges: Vec<EdgeLayout>,
}

impl LayoutResult {
    pub fn node(&self, id: &str) -> Option<&NodeLayout> {
        self.nodes.iter().find(|node| node.id == id)
    }
}

/// Side of a node box where edges attach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandlePosition {
    Left,
    Right,
    Top,
    Bottom,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeLayout {
    pub id: String,
    /// Left edge of the node box
    pub x: f32,
    /// Top edge of the node box
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub branch: usize,
    pub source_position: HandlePosition,
    pub target_position: HandlePosition,
    /// The source node, for the detail panel
    pub data: GraphNode,
    pub style: NodeStyle,
}

/// Colours derived from a node's branch, as CSS values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeStyle {
    pub base_color: String,
    pub background: String,
    pub border: String,
    pub border_color: String,
    pub box_shadow: String,
    pub glow_color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeLayout {
    pub id: String,
    pub source: String,
    pub target: String,
    pub style: EdgeStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    Default,
    Straight,
    Step,
    SmoothStep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerKind {
    Arrow,
    ArrowClosed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub kind: MarkerKind,
    pub color: String,
}

/// Edge styling. Edges stay neutral so they don't clash with the branch
/// colours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeStyle {
    pub kind: EdgeKind,
    pub animated: bool,
    pub stroke: String,
    pub stroke_width: f32,
    pub opacity: f32,
    pub marker_end: Marker,
}

impl Default for EdgeStyle {
    fn default() -> Self {
        const ZINC: &str = "#71717a";
        Self {
            kind: EdgeKind::SmoothStep,
            animated: true,
            stroke: ZINC.to_owned(),
            stroke_width: 2.0,
            opacity: 0.4,
            marker_end: Marker {
                kind: MarkerKind::ArrowClosed,
                color: ZINC.to_owned(),
            },
        }
    }
}
