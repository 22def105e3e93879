// src/source/client.rs
use crate::source::models::{DocumentManifest, PageContent};
use crate::source::FragmentSource;
use crate::utils::error::SourceError;
use async_trait::async_trait;
use reqwest::header;
use std::time::Duration;

const USER_AGENT: &str = concat!("statute_extractor/", env!("CARGO_PKG_VERSION"));
// Public statute mirrors tend to throttle aggressive clients; pause
// between page fetches.
const PAGE_REQUEST_DELAY_MS: u64 = 150;

/// Creates a reqwest client configured for document fetching.
fn build_http_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(30))
        .build()
}

/// Fragment source backed by a remote manifest plus per-page JSON
/// payloads. Pages are fetched lazily, one request per
/// [`page_fragments`] call, never ahead of the scanner.
///
/// [`page_fragments`]: FragmentSource::page_fragments
pub struct RemoteDocumentSource {
    client: reqwest::Client,
    manifest: DocumentManifest,
}

impl RemoteDocumentSource {
    /// Fetches the manifest at `manifest_url` and returns a source bound
    /// to it. The manifest is validated once here so later page pulls
    /// only deal with transport errors.
    pub async fn connect(manifest_url: &str) -> Result<Self, SourceError> {
        let client = build_http_client()?;

        tracing::info!("Fetching document manifest from: {}", manifest_url);
        let response = client
            .get(manifest_url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("HTTP error status: {} for manifest: {}", status, manifest_url);
            return Err(SourceError::Http(status));
        }

        let manifest: DocumentManifest = response
            .json()
            .await
            .map_err(|e| SourceError::ManifestInvalid(e.to_string()))?;

        if !manifest.page_url_template.contains("{page}") {
            return Err(SourceError::ManifestInvalid(
                "page_url_template is missing the {page} placeholder".to_string(),
            ));
        }

        tracing::info!(
            "Manifest loaded: {:?}, {} pages",
            manifest.title,
            manifest.page_count
        );
        Ok(Self { client, manifest })
    }

    /// Document title from the manifest, if the publisher set one.
    pub fn title(&self) -> Option<&str> {
        self.manifest.title.as_deref()
    }

    fn page_url(&self, page: usize) -> String {
        self.manifest
            .page_url_template
            .replace("{page}", &page.to_string())
    }
}

#[async_trait]
impl FragmentSource for RemoteDocumentSource {
    async fn page_count(&self) -> Result<usize, SourceError> {
        Ok(self.manifest.page_count)
    }

    async fn page_fragments(&self, page: usize) -> Result<Vec<String>, SourceError> {
        if page == 0 || page > self.manifest.page_count {
            return Err(SourceError::PageOutOfRange {
                page,
                page_count: self.manifest.page_count,
            });
        }

        let url = self.page_url(page);
        tracing::debug!("Fetching page {} from: {}", page, url);

        tokio::time::sleep(Duration::from_millis(PAGE_REQUEST_DELAY_MS)).await;

        let response = self
            .client
            .get(&url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("HTTP error status: {} for page URL: {}", status, url);
            return Err(SourceError::Http(status));
        }

        let content: PageContent = response
            .json()
            .await
            .map_err(|e| SourceError::Decode(e.to_string()))?;

        tracing::debug!("Page {} yielded {} fragments", page, content.fragments.len());
        Ok(content.fragments)
    }
}
