use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use url::Url;

/// A roadmap as produced by a generator: topics and the prerequisite edges
/// between them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roadmap {
    #[serde(default)]
    pub nodes: Vec<GraphNode>,
    #[serde(default)]
    pub edges: Vec<GraphEdge>,
}

impl Roadmap {
    pub fn new(nodes: Vec<GraphNode>, edges: Vec<GraphEdge>) -> Self {
        Self { nodes, edges }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// One step of a roadmap.
///
/// Only `id` matters to the layout. Everything else is carried through to the
/// renderer, including fields this type does not know about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    #[serde(deserialize_with = "opaque_id")]
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<Reference>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GraphNode {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            description: None,
            references: Vec::new(),
            extra: Map::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_reference(mut self, reference: Reference) -> Self {
        self.references.push(reference);
        self
    }
}

/// External resource attached to a roadmap step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub url: String,
}

impl Reference {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            title: None,
            url: url.into(),
        }
    }

    pub fn titled(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            url: url.into(),
        }
    }

    /// Text to show for the link: the title, else the URL's host, else the
    /// URL itself.
    pub fn display_title(&self) -> String {
        if let Some(title) = self.title.as_deref().filter(|t| !t.trim().is_empty()) {
            return title.to_owned();
        }

        Url::parse(&self.url)
            .ok()
            .and_then(|url| url.host_str().map(str::to_owned))
            .unwrap_or_else(|| self.url.clone())
    }
}

/// A "prerequisite of" edge: `source` comes before `target`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(deserialize_with = "opaque_id")]
    pub source: String,
    #[serde(deserialize_with = "opaque_id")]
    pub target: String,
}

impl GraphEdge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: None,
            source: source.into(),
            target: target.into(),
        }
    }

    /// The explicit id, or `e{source}-{target}` when the source gave none
    pub fn edge_id(&self) -> String {
        match &self.id {
            Some(id) => id.clone(),
            None => format!("e{}-{}", self.source, self.target),
        }
    }
}

// Generators sometimes emit numeric ids. They are kept as opaque strings.
fn opaque_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Integer(i64),
        Float(f64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(id) => id,
        Id::Integer(id) => id.to_string(),
        Id::Float(id) => id.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn node_keeps_unknown_fields() {
        let node: GraphNode = serde_json::from_value(json!({
            "id": "rust",
            "label": "Rust",
            "estimatedHours": 12,
        }))
        .unwrap();

        assert_eq!(node.extra["estimatedHours"], json!(12));
        assert_eq!(serde_json::to_value(&node).unwrap()["estimatedHours"], json!(12));
    }

    #[test]
    fn numeric_ids_become_strings() {
        let edge: GraphEdge = serde_json::from_value(json!({"source": 1, "target": 2})).unwrap();
        assert_eq!(edge.source, "1");
        assert_eq!(edge.target, "2");
        assert_eq!(edge.edge_id(), "e1-2");
    }

    #[test]
    fn explicit_edge_id_wins() {
        let edge: GraphEdge =
            serde_json::from_value(json!({"id": "dep", "source": "a", "target": "b"})).unwrap();
        assert_eq!(edge.edge_id(), "dep");
    }

    #[test]
    fn missing_label_and_references_default() {
        let node: GraphNode = serde_json::from_value(json!({"id": "a"})).unwrap();
        assert_eq!(node, GraphNode::new("a", ""));
    }

    #[test]
    fn reference_title_falls_back_to_host() {
        let titled = Reference::titled("The Book", "https://doc.rust-lang.org/book/");
        assert_eq!(titled.display_title(), "The Book");

        let untitled = Reference::new("https://doc.rust-lang.org/book/");
        assert_eq!(untitled.display_title(), "doc.rust-lang.org");

        let blank = Reference {
            title: Some("  ".into()),
            url: "https://example.com/x".into(),
        };
        assert_eq!(blank.display_title(), "example.com");

        assert_eq!(Reference::new("not a url").display_title(), "not a url");
    }
}
