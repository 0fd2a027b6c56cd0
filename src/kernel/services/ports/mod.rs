//! Service ports: traits + data contracts.

pub mod remote;
pub mod settings;

pub use remote::{
    DocumentRemote, RemoteError, RequestKey, RequestOp, Result as RemoteResult, SaveBody,
    UploadList,
};
pub use settings::{GraphSettings, ServiceSettings, Settings, ThemeSettings, DEFAULT_SERVICE_URL};
