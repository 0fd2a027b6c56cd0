use serde::{Deserialize, Serialize};

/// How a document is presented in the content panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Text,
    Graph,
    Pdf,
}

impl DocumentKind {
    pub fn label(self) -> &'static str {
        match self {
            DocumentKind::Text => "text",
            DocumentKind::Graph => "graph",
            DocumentKind::Pdf => "pdf",
        }
    }
}

/// A named unit of content. The name is the identity key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub name: String,
    pub path: String,
    pub content: String,
    pub kind: DocumentKind,
}

impl Document {
    pub fn new(
        name: impl Into<String>,
        path: impl Into<String>,
        content: impl Into<String>,
        kind: DocumentKind,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            content: content.into(),
            kind,
        }
    }

    pub fn text(name: impl Into<String>, path: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(name, path, content, DocumentKind::Text)
    }

    pub fn graph(name: impl Into<String>, path: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(name, path, content, DocumentKind::Graph)
    }
}
