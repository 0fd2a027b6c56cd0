//! Service adapters: network/runtime specific implementations (IO/async).

pub mod http;
pub mod paths;
pub mod runtime;
pub mod settings;

pub use http::HttpDocumentRemote;
pub use paths::{ensure_log_dir, get_log_dir};
pub use runtime::{AppMessage, AsyncRuntime};
pub use settings::{
    apply_service_overrides, ensure_settings_file, get_settings_path, load_settings,
    load_settings_from, SERVICE_URL_ENV,
};
