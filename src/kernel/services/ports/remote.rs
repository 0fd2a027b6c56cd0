use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RemoteError>;

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("{url} returned status {code}")]
    Status { code: u16, url: String },
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Operation half of a request identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RequestOp {
    Fetch,
    Save,
    Upload,
    List,
}

/// Identity of an external call: one live task per key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestKey {
    pub name: String,
    pub op: RequestOp,
}

impl RequestKey {
    pub fn new(name: impl Into<String>, op: RequestOp) -> Self {
        Self {
            name: name.into(),
            op,
        }
    }

    pub fn fetch(name: impl Into<String>) -> Self {
        Self::new(name, RequestOp::Fetch)
    }

    pub fn save(name: impl Into<String>) -> Self {
        Self::new(name, RequestOp::Save)
    }

    pub fn list() -> Self {
        Self::new("", RequestOp::List)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveBody {
    pub content: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadList {
    #[serde(default)]
    pub files: Vec<String>,
}

/// Blocking contract for the document service. Adapters run calls off the UI thread.
pub trait DocumentRemote: Send + Sync {
    /// `GET files/{name}`; the raw body.
    fn fetch(&self, name: &str) -> Result<String>;

    /// `POST files/{name}` with `{"content": ...}`.
    fn save(&self, name: &str, content: &str) -> Result<()>;

    /// `POST api/upload` with multipart field `file`.
    fn upload(&self, file_name: &str, bytes: &[u8]) -> Result<()>;

    /// `GET api/files`.
    fn list_uploads(&self) -> Result<Vec<String>>;
}
