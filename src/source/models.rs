// src/source/models.rs
#![allow(dead_code)]
use serde::{Deserialize, Serialize};

/// Describes a remotely hosted, pre-paginated document.
///
/// The manifest is a small JSON file; the heavy per-page payloads are
/// fetched on demand through `page_url_template`.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentManifest {
    /// Human-readable document title, used to label output files.
    pub title: Option<String>,
    /// Total number of pages available through the template.
    pub page_count: usize,
    /// URL template for page payloads; `{page}` is replaced with the
    /// 1-based page number.
    pub page_url_template: String,
}

/// Payload of a single page: its text fragments in extraction order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageContent {
    pub fragments: Vec<String>,
}
