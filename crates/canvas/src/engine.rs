use crate::branches::assign_branches;
use crate::config::LayoutConfig;
use crate::style::{handle_positions, node_style};
use petgraph::graphmap::DiGraphMap;
use roadweave_common::{
    EdgeLayout, EdgeStyle, GraphEdge, GraphNode, LayoutResult, NodeLayout, Roadmap,
};
use roadweave_graph_layout::Point;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Lays out roadmaps and colours their branches.
///
/// A layout is a pure function of the roadmap and the configuration: every
/// call recomputes everything and identical input gives identical output.
#[derive(Debug, Clone, Default)]
pub struct RoadmapLayout {
    config: LayoutConfig,
}

/// Nodes after dropping duplicate ids, with the edges that join two of them
struct ResolvedGraph<'a> {
    nodes: Vec<&'a GraphNode>,
    edges: Vec<(usize, usize)>,
}

impl<'a> ResolvedGraph<'a> {
    fn new(roadmap: &'a Roadmap) -> Self {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut nodes = Vec::with_capacity(roadmap.nodes.len());
        for node in &roadmap.nodes {
            if index.contains_key(node.id.as_str()) {
                warn!("Duplicate node id {:?}, keeping the first one", node.id);
                continue;
            }
            index.insert(node.id.as_str(), nodes.len());
            nodes.push(node);
        }

        let edges = roadmap
            .edges
            .iter()
            .filter_map(|edge| {
                let source = index.get(edge.source.as_str());
                let target = index.get(edge.target.as_str());
                match (source, target) {
                    (Some(&source), Some(&target)) => Some((source, target)),
                    _ => {
                        warn!(
                            "Edge {} references an unknown node, ignoring it for the layout",
                            edge.edge_id()
                        );
                        None
                    }
                }
            })
            .collect();

        Self { nodes, edges }
    }

    fn graph(&self) -> DiGraphMap<usize, ()> {
        let mut graph = DiGraphMap::new();
        for node in 0..self.nodes.len() {
            graph.add_node(node);
        }
        for &(source, target) in &self.edges {
            graph.add_edge(source, target, ());
        }
        graph
    }
}

impl RoadmapLayout {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Position and style every node of the roadmap
    pub fn layout(&self, roadmap: &Roadmap) -> LayoutResult {
        let resolved = ResolvedGraph::new(roadmap);
        let size = self.config.node_size();

        let centers = self.node_centers(&resolved);
        let branches = assign_branches(resolved.nodes.len(), &resolved.edges);

        // Horizontal extent of the layout, used for the gradient along a branch
        let (min_x, max_x) = centers
            .values()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(min, max), center| {
                (min.min(center.x), max.max(center.x))
            });
        let range = if max_x - min_x > 0.0 { max_x - min_x } else { 1.0 };

        let (target_position, source_position) = handle_positions(self.config.rank_dir);

        let nodes = resolved
            .nodes
            .iter()
            .enumerate()
            .map(|(index, &node)| {
                let (top_left, rank_factor) = match centers.get(&index) {
                    Some(center) => (center.top_left(size), (center.x - min_x) / range),
                    None => {
                        warn!(
                            "Node {:?} missing from the layout, placing it at the origin",
                            node.id
                        );
                        (Point::origin(), 0.0)
                    }
                };
                let branch = branches.branch_of(index);

                NodeLayout {
                    id: node.id.clone(),
                    x: top_left.x,
                    y: top_left.y,
                    width: size.x,
                    height: size.y,
                    branch,
                    source_position,
                    target_position,
                    data: node.clone(),
                    style: node_style(self.config.palette.for_branch(branch), rank_factor),
                }
            })
            .collect();

        let edges = roadmap.edges.iter().map(edge_layout).collect();

        debug!(
            "Laid out {} nodes on {} branches",
            resolved.nodes.len(),
            branches.count()
        );

        LayoutResult { nodes, edges }
    }

    fn node_centers(&self, resolved: &ResolvedGraph<'_>) -> HashMap<usize, Point> {
        let engine = self.config.layered();
        let graph = resolved.graph();

        match engine.compute_layers(&graph) {
            Ok(layers) => {
                debug!(
                    "{} ranks, {} crossings, {} reversed edges",
                    layers.nodes.len(),
                    layers.crossings,
                    layers.reversed.len()
                );
                engine.compute_positions(&layers, &self.config.node_size())
            }
            Err(e) => {
                warn!("Layered layout failed: {e}");
                HashMap::new()
            }
        }
    }
}

fn edge_layout(edge: &GraphEdge) -> EdgeLayout {
    EdgeLayout {
        id: edge.edge_id(),
        source: edge.source.clone(),
        target: edge.target.clone(),
        style: EdgeStyle::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Palette;
    use roadweave_common::{Reference, RoadmapDocument};
    use roadweave_graph_layout::RankDir;
    use serde_json::json;
    use test_log::test;

    fn roadmap(ids: &[&str], edges: &[(&str, &str)]) -> Roadmap {
        Roadmap::new(
            ids.iter().map(|id| GraphNode::new(*id, id.to_uppercase())).collect(),
            edges
                .iter()
                .map(|(source, target)| GraphEdge::new(*source, *target))
                .collect(),
        )
    }

    fn branch(result: &LayoutResult, id: &str) -> usize {
        result.node(id).unwrap().branch
    }

    #[test]
    fn fork_scenario() {
        let doc: RoadmapDocument = serde_json::from_value(json!({
            "nodes": [{"id": "1"}, {"id": "2"}, {"id": "3"}],
            "edges": [{"source": "1", "target": "2"}, {"source": "1", "target": "3"}],
        }))
        .unwrap();
        let result = RoadmapLayout::default().layout(&doc.into_roadmap());

        assert_eq!(branch(&result, "1"), 0);
        assert_eq!(branch(&result, "2"), 0);
        assert_eq!(branch(&result, "3"), 1);

        let (n1, n2, n3) = (
            result.node("1").unwrap(),
            result.node("2").unwrap(),
            result.node("3").unwrap(),
        );
        // 2 and 3 share the second rank
        assert!(n1.x < n2.x);
        assert_eq!(n2.x, n3.x);
        assert_ne!(n2.y, n3.y);
        // top-left of the first rank
        assert_eq!(n1.x, 0.0);
        assert_eq!(n2.x, 240.0 + 120.0);
    }

    #[test]
    fn chain_shares_a_branch_and_blends_along_it() {
        let result =
            RoadmapLayout::default().layout(&roadmap(&["a", "b", "c"], &[("a", "b"), ("b", "c")]));
        assert!(result.nodes.iter().all(|node| node.branch == 0));

        // Red palette, blended from start to halfway to its end
        assert_eq!(result.node("a").unwrap().style.base_color, "#ef4444");
        assert_eq!(result.node("c").unwrap().style.base_color, "#d43030");
    }

    #[test]
    fn merge_keeps_the_first_root() {
        let result =
            RoadmapLayout::default().layout(&roadmap(&["a", "x", "m"], &[("a", "m"), ("x", "m")]));
        assert_eq!(branch(&result, "a"), 0);
        assert_eq!(branch(&result, "x"), 1);
        assert_eq!(branch(&result, "m"), 0);
    }

    #[test]
    fn branches_pick_palette_entries() {
        let result =
            RoadmapLayout::default().layout(&roadmap(&["a", "b", "c"], &[("a", "b"), ("a", "c")]));
        // c sits on branch 1 (blue), at the right edge of the layout
        let palette = Palette::default();
        let blue = palette.for_branch(1);
        assert_eq!(result.node("c").unwrap().style, node_style(blue, 1.0));
    }

    #[test]
    fn single_node_uses_start_colour() {
        let result = RoadmapLayout::default().layout(&roadmap(&["solo"], &[]));
        let node = result.node("solo").unwrap();
        assert_eq!((node.x, node.y), (0.0, 0.0));
        assert_eq!(node.style.base_color, "#ef4444");
    }

    #[test]
    fn empty_roadmap() {
        let result = RoadmapLayout::default().layout(&Roadmap::default());
        assert!(result.nodes.is_empty());
        assert!(result.edges.is_empty());
    }

    #[test]
    fn dangling_edges_are_passed_through_but_ignored() {
        let mut map = roadmap(&["a", "b"], &[("a", "ghost"), ("a", "b")]);
        map.edges.push(GraphEdge::new("ghost", "b"));
        let result = RoadmapLayout::default().layout(&map);

        assert_eq!(result.edges.len(), 3);
        assert_eq!(result.edges[0].id, "ea-ghost");
        // a -> b is the only edge left, so b continues a's branch
        assert_eq!(branch(&result, "b"), 0);
        assert!(result.node("a").unwrap().x < result.node("b").unwrap().x);
    }

    #[test]
    fn dangling_edge_does_not_hide_a_root() {
        let result = RoadmapLayout::default().layout(&roadmap(&["a", "b"], &[("ghost", "b")]));
        assert_eq!(branch(&result, "a"), 0);
        assert_eq!(branch(&result, "b"), 1);
    }

    #[test]
    fn rootless_cycle_is_still_laid_out() {
        let result = RoadmapLayout::default().layout(&roadmap(
            &["a", "b", "c"],
            &[("a", "b"), ("b", "c"), ("c", "a")],
        ));
        assert_eq!(result.nodes.len(), 3);
        assert!(result.nodes.iter().all(|node| node.branch == 0));

        let mut xs: Vec<f32> = result.nodes.iter().map(|node| node.x).collect();
        xs.dedup();
        assert_eq!(xs.len(), 3);
    }

    #[test]
    fn duplicate_ids_keep_the_first_node() {
        let mut map = roadmap(&["a", "b"], &[("a", "b")]);
        map.nodes.push(GraphNode::new("a", "again"));
        let result = RoadmapLayout::default().layout(&map);

        assert_eq!(result.nodes.len(), 2);
        assert_eq!(result.node("a").unwrap().data.label, "A");
    }

    #[test]
    fn node_data_is_carried_to_the_renderer() {
        let mut map = roadmap(&["a"], &[]);
        map.nodes[0] = GraphNode::new("a", "Ownership")
            .with_description("Moves and borrows")
            .with_reference(Reference::new("https://doc.rust-lang.org/book/"));
        let result = RoadmapLayout::default().layout(&map);

        let data = &result.node("a").unwrap().data;
        assert_eq!(data.description.as_deref(), Some("Moves and borrows"));
        assert_eq!(data.references[0].display_title(), "doc.rust-lang.org");
    }

    #[test]
    fn top_bottom_layout() {
        let config = LayoutConfig {
            rank_dir: RankDir::TopBottom,
            ..Default::default()
        };
        let result = RoadmapLayout::new(config).layout(&roadmap(&["a", "b"], &[("a", "b")]));
        let (a, b) = (result.node("a").unwrap(), result.node("b").unwrap());

        assert_eq!(a.x, b.x);
        assert!(a.y < b.y);
        assert_eq!(a.source_position, roadweave_common::HandlePosition::Bottom);
        // No horizontal spread, so the whole roadmap uses the start colour
        assert_eq!(a.style.base_color, b.style.base_color);
    }

    #[test]
    fn layout_is_deterministic() {
        let map = roadmap(
            &["intro", "syntax", "types", "traits", "async", "unsafe", "ffi"],
            &[
                ("intro", "syntax"),
                ("intro", "types"),
                ("syntax", "traits"),
                ("types", "traits"),
                ("traits", "async"),
                ("traits", "unsafe"),
                ("unsafe", "ffi"),
                ("types", "ffi"),
            ],
        );
        let engine = RoadmapLayout::default();
        assert_eq!(engine.layout(&map), engine.layout(&map));
    }

    #[test]
    fn every_node_is_styled_once() {
        let map = roadmap(
            &["a", "b", "c", "d", "e"],
            &[("a", "b"), ("a", "c"), ("a", "d"), ("d", "e"), ("c", "e")],
        );
        let result = RoadmapLayout::default().layout(&map);
        assert_eq!(result.nodes.len(), 5);
        for node in &result.nodes {
            assert!(node.style.base_color.starts_with('#'));
            assert_eq!(node.width, 240.0);
            assert_eq!(node.height, 60.0);
        }
    }
}
