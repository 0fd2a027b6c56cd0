use std::path::PathBuf;

/// Side effects requested by the store; executed by the async runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchDocument { name: String },
    SaveDocument { name: String, content: String },
    UploadFile { path: PathBuf },
    ListUploads,
}
