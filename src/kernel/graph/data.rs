use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub important: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeData {
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub weight: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    #[serde(default)]
    pub nodes: Vec<NodeData>,
    #[serde(default)]
    pub edges: Vec<EdgeData>,
}

impl GraphData {
    /// Parses graph document content. Anything that is not a node/edge object becomes the empty
    /// graph.
    pub fn parse(content: &str) -> Self {
        match serde_json::from_str::<GraphData>(content) {
            Ok(data) => data,
            Err(e) => {
                tracing::debug!(error = %e, "graph content did not parse, rendering empty graph");
                GraphData::default()
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&NodeData> {
        self.nodes.iter().find(|n| n.id == id)
    }
}
