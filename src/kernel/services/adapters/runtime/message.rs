#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppMessage {
    DocumentFetched {
        name: String,
        content: String,
    },
    DocumentFetchFailed {
        name: String,
        error: String,
    },
    DocumentSaved {
        name: String,
        success: bool,
    },
    UploadFinished {
        file_name: String,
        success: bool,
    },
    UploadsListed {
        files: Vec<String>,
    },
    UploadsListFailed {
        error: String,
    },
}
