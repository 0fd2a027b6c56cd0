//! Static document registry plus the reserved names served by the file endpoint.

use super::document::{Document, DocumentKind};

pub const BUBBLE_MAP: &str = "bubble-map.json";
pub const OUTLINE: &str = "outline.txt";

/// Wire format of a reserved document's fetch response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyFormat {
    Json,
    Text,
}

/// A document that is not in the registry but can be fetched by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservedName {
    pub name: &'static str,
    pub path: &'static str,
    pub kind: DocumentKind,
    pub format: BodyFormat,
    /// Edits are written back to the file endpoint.
    pub persist: bool,
}

impl ReservedName {
    /// Builds the document from a fetch response body.
    ///
    /// JSON bodies are re-serialized with two-space indentation; a body that does not parse is
    /// rejected the same way a failed request is.
    pub fn synthesize(&self, body: &str) -> Option<Document> {
        let content = match self.format {
            BodyFormat::Text => body.to_string(),
            BodyFormat::Json => {
                let value: serde_json::Value = match serde_json::from_str(body) {
                    Ok(value) => value,
                    Err(e) => {
                        tracing::warn!(name = self.name, error = %e, "reserved document is not json");
                        return None;
                    }
                };
                serde_json::to_string_pretty(&value).ok()?
            }
        };
        Some(Document::new(self.name, self.path, content, self.kind))
    }
}

const RESERVED: &[ReservedName] = &[
    ReservedName {
        name: BUBBLE_MAP,
        path: "backend/files/bubble-map.json",
        kind: DocumentKind::Graph,
        format: BodyFormat::Json,
        persist: false,
    },
    ReservedName {
        name: OUTLINE,
        path: "outline.txt",
        kind: DocumentKind::Text,
        format: BodyFormat::Text,
        persist: true,
    },
];

#[derive(Debug, Clone)]
pub struct FileRegistry {
    documents: Vec<Document>,
}

impl FileRegistry {
    pub fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn get(&self, name: &str) -> Option<&Document> {
        self.documents.iter().find(|d| d.name == name)
    }

    pub fn reserved(&self, name: &str) -> Option<&'static ReservedName> {
        if self.get(name).is_some() {
            return None;
        }
        RESERVED.iter().find(|r| r.name == name)
    }

    pub fn reserved_names(&self) -> impl Iterator<Item = &'static ReservedName> {
        RESERVED.iter()
    }

    pub fn persists(&self, name: &str) -> bool {
        self.reserved(name).is_some_and(|r| r.persist)
    }
}

impl Default for FileRegistry {
    fn default() -> Self {
        Self::new(vec![
            Document::text(
                "Left.tsx",
                "frontend/src/components/Left.tsx",
                "// Content of Left.tsx...",
            ),
            Document::text(
                "Right.tsx",
                "frontend/src/components/Right.tsx",
                "// Content of Right.tsx...",
            ),
            Document::text(
                "Center.tsx",
                "frontend/src/components/Center.tsx",
                "// Content of Center.tsx...",
            ),
            Document::text(
                "ThreePanel.tsx",
                "frontend/src/components/ThreePanel.tsx",
                "// Content of ThreePanel.tsx...",
            ),
            Document::graph(
                "KnowledgeGraph.graph",
                "knowledge-map/KnowledgeGraph.graph",
                KNOWLEDGE_GRAPH,
            ),
        ])
    }
}

const KNOWLEDGE_GRAPH: &str = r#"{
  "nodes": [
    { "id": "1", "label": "What is AI?", "important": true },
    { "id": "2", "label": "Machine Learning", "important": true },
    { "id": "3", "label": "Deep Learning", "important": true },
    { "id": "4", "label": "Neural Networks", "important": true },
    { "id": "5", "label": "Natural Language Processing", "important": true },
    { "id": "6", "label": "Computer Vision", "important": false },
    { "id": "7", "label": "Reinforcement Learning", "important": false },
    { "id": "8", "label": "Supervised Learning", "important": false },
    { "id": "9", "label": "Unsupervised Learning", "important": false },
    { "id": "10", "label": "Transformers", "important": false },
    { "id": "11", "label": "GPT Models", "important": false },
    { "id": "12", "label": "BERT", "important": false },
    { "id": "13", "label": "CNN", "important": false },
    { "id": "14", "label": "RNN", "important": false },
    { "id": "15", "label": "LSTM", "important": false },
    { "id": "16", "label": "Attention Mechanism", "important": false },
    { "id": "17", "label": "Backpropagation", "important": false },
    { "id": "18", "label": "Gradient Descent", "important": false },
    { "id": "19", "label": "Overfitting", "important": false },
    { "id": "20", "label": "Transfer Learning", "important": false }
  ],
  "edges": [
    { "source": "1", "target": "2", "weight": 0.9 },
    { "source": "2", "target": "3", "weight": 0.8 },
    { "source": "2", "target": "8", "weight": 0.7 },
    { "source": "2", "target": "9", "weight": 0.7 },
    { "source": "3", "target": "4", "weight": 0.9 },
    { "source": "1", "target": "5", "weight": 0.6 },
    { "source": "1", "target": "6", "weight": 0.6 },
    { "source": "2", "target": "7", "weight": 0.6 },
    { "source": "4", "target": "13", "weight": 0.8 },
    { "source": "4", "target": "14", "weight": 0.8 },
    { "source": "14", "target": "15", "weight": 0.9 },
    { "source": "5", "target": "10", "weight": 0.8 },
    { "source": "10", "target": "11", "weight": 0.9 },
    { "source": "10", "target": "12", "weight": 0.8 },
    { "source": "10", "target": "16", "weight": 0.9 },
    { "source": "6", "target": "13", "weight": 0.8 },
    { "source": "4", "target": "17", "weight": 0.7 },
    { "source": "17", "target": "18", "weight": 0.8 },
    { "source": "2", "target": "19", "weight": 0.5 },
    { "source": "3", "target": "20", "weight": 0.7 },
    { "source": "8", "target": "18", "weight": 0.6 },
    { "source": "16", "target": "11", "weight": 0.8 },
    { "source": "16", "target": "12", "weight": 0.7 }
  ]
}"#;

#[cfg(test)]
#[path = "../../tests/unit/kernel/registry.rs"]
mod tests;
