//! HTTP implementation of [`DocumentRemote`] on a blocking `ureq` agent.

use crate::kernel::services::ports::remote::{
    DocumentRemote, RemoteError, Result, SaveBody, UploadList,
};
use crate::kernel::services::ports::ServiceSettings;
use std::time::Duration;

const USER_AGENT: &str = "tripane";
const BOUNDARY: &str = "----tripane-upload-boundary-7MA4YWxkTrZu0gW";

pub struct HttpDocumentRemote {
    agent: ureq::Agent,
    base_url: String,
}

impl HttpDocumentRemote {
    pub fn new(settings: &ServiceSettings) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(settings.timeout_secs.max(1)))
            .build();
        Self {
            agent,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn file_url(&self, name: &str) -> String {
        format!("{}/files/{}", self.base_url, name)
    }

    fn upload_url(&self) -> String {
        format!("{}/api/upload", self.base_url)
    }

    fn list_url(&self) -> String {
        format!("{}/api/files", self.base_url)
    }
}

fn map_error(url: &str, err: ureq::Error) -> RemoteError {
    match err {
        ureq::Error::Status(code, _) => RemoteError::Status {
            code,
            url: url.to_string(),
        },
        ureq::Error::Transport(t) => RemoteError::Transport(t.to_string()),
    }
}

/// `multipart/form-data` body with a single `file` field.
pub(crate) fn multipart_body(file_name: &str, bytes: &[u8]) -> Vec<u8> {
    let mut body = Vec::with_capacity(bytes.len() + 256);
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/pdf\r\n\r\n");
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

impl DocumentRemote for HttpDocumentRemote {
    fn fetch(&self, name: &str) -> Result<String> {
        let url = self.file_url(name);
        let resp = self
            .agent
            .get(&url)
            .set("User-Agent", USER_AGENT)
            .call()
            .map_err(|e| map_error(&url, e))?;
        Ok(resp.into_string()?)
    }

    fn save(&self, name: &str, content: &str) -> Result<()> {
        let url = self.file_url(name);
        let body = serde_json::to_string(&SaveBody {
            content: content.to_string(),
        })?;
        self.agent
            .post(&url)
            .set("User-Agent", USER_AGENT)
            .set("Content-Type", "application/json")
            .send_string(&body)
            .map_err(|e| map_error(&url, e))?;
        Ok(())
    }

    fn upload(&self, file_name: &str, bytes: &[u8]) -> Result<()> {
        let url = self.upload_url();
        let body = multipart_body(file_name, bytes);
        let resp = self
            .agent
            .post(&url)
            .set("User-Agent", USER_AGENT)
            .set(
                "Content-Type",
                &format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .send_bytes(&body)
            .map_err(|e| map_error(&url, e))?;
        // A 2xx without a JSON body still counts as a failed upload.
        let text = resp.into_string()?;
        serde_json::from_str::<serde_json::Value>(&text)?;
        Ok(())
    }

    fn list_uploads(&self) -> Result<Vec<String>> {
        let url = self.list_url();
        let resp = self
            .agent
            .get(&url)
            .set("User-Agent", USER_AGENT)
            .call()
            .map_err(|e| map_error(&url, e))?;
        let text = resp.into_string()?;
        let list: UploadList = serde_json::from_str(&text)?;
        Ok(list.files)
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/http.rs"]
mod tests;
