use std::collections::HashMap;

use serde::Deserialize;

pub const PAGE_DATA_ID: &str = "page-data";

const PREVIEW_PAGE_TYPES: &[&str] = &["post", "about"];

/// Page-level data embedded by the site generator as JSON in `#page-data`.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageData {
    #[serde(default)]
    pub page_type: Option<String>,
    #[serde(default)]
    pub labels: HashMap<String, serde_json::Value>,
}

impl PageData {
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(raw)
    }

    /// Reads `#page-data` from the current document. Missing or malformed
    /// data yields the defaults, which disable page-type gated features.
    pub fn load() -> Self {
        let Some(document) = web_sys::window().and_then(|window| window.document()) else {
            return Self::default();
        };
        let Some(element) = document.get_element_by_id(PAGE_DATA_ID) else {
            return Self::default();
        };
        let raw = element.text_content().unwrap_or_default();
        match Self::parse(&raw) {
            Ok(data) => data,
            Err(err) => {
                gloo::console::warn!("page data: parse failed", err.to_string());
                Self::default()
            }
        }
    }

    pub fn is_page_type(&self, page_type: &str) -> bool {
        self.page_type.as_deref() == Some(page_type)
    }

    pub fn preview_enabled(&self) -> bool {
        self.page_type
            .as_deref()
            .is_some_and(|page_type| PREVIEW_PAGE_TYPES.contains(&page_type))
    }

    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels
            .get(key)
            .and_then(|value| value.as_str())
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}

/// Accessible names for the preview controls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreviewLabels {
    pub dialog: String,
    pub open: String,
    pub close: String,
    pub previous: String,
    pub next: String,
}

impl Default for PreviewLabels {
    fn default() -> Self {
        Self {
            dialog: "Image preview".to_string(),
            open: "Open image preview".to_string(),
            close: "Close image preview".to_string(),
            previous: "Previous image".to_string(),
            next: "Next image".to_string(),
        }
    }
}

impl PreviewLabels {
    pub fn from_page(page: &PageData) -> Self {
        let defaults = Self::default();
        let pick = |key: &str, fallback: String| {
            page.label(key).map(str::to_string).unwrap_or(fallback)
        };
        Self {
            dialog: pick("imagePreview", defaults.dialog),
            open: pick("imagePreviewOpen", defaults.open),
            close: pick("imagePreviewClose", defaults.close),
            previous: pick("imagePreviewPrev", defaults.previous),
            next: pick("imagePreviewNext", defaults.next),
        }
    }
}
