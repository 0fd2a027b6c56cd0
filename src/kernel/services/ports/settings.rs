use serde::{Deserialize, Serialize};

use crate::kernel::graph::{GraphOptions, LABEL_ZOOM_THRESHOLD};

pub const DEFAULT_SERVICE_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub service: ServiceSettings,
    #[serde(default)]
    pub graph: GraphSettings,
    #[serde(default)]
    pub theme: ThemeSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_SERVICE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSettings {
    #[serde(default = "default_label_zoom_threshold")]
    pub label_zoom_threshold: f64,
    #[serde(default = "default_layout_iterations")]
    pub layout_iterations: usize,
}

fn default_label_zoom_threshold() -> f64 {
    LABEL_ZOOM_THRESHOLD
}

fn default_layout_iterations() -> usize {
    GraphOptions::default().layout_iterations
}

impl Default for GraphSettings {
    fn default() -> Self {
        Self {
            label_zoom_threshold: default_label_zoom_threshold(),
            layout_iterations: default_layout_iterations(),
        }
    }
}

impl GraphSettings {
    pub fn options(&self) -> GraphOptions {
        GraphOptions {
            label_zoom_threshold: self.label_zoom_threshold,
            layout_iterations: self.layout_iterations,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus_border: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inactive_border: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub muted_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_bg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub important_node_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regular_node_fg: Option<String>,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            focus_border: Some("cyan".to_string()),
            inactive_border: Some("dark_gray".to_string()),
            accent_fg: Some("yellow".to_string()),
            header_fg: Some("cyan".to_string()),
            muted_fg: Some("dark_gray".to_string()),
            selected_bg: Some("dark_gray".to_string()),
            important_node_fg: Some("white".to_string()),
            regular_node_fg: Some("gray".to_string()),
        }
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/settings.rs"]
mod tests;
