// src/source/mod.rs
pub mod client;
pub mod models;

use crate::utils::error::SourceError;
use async_trait::async_trait;

#[allow(unused_imports)]
pub use client::RemoteDocumentSource;

/// A paginated document, exposed as ordered text fragments per page.
///
/// Pages are 1-based and pulled one at a time; implementations may fetch
/// lazily (network, disk) and are expected to be immutable for the
/// lifetime of an extraction, so repeated reads of the same page return
/// the same fragments.
#[async_trait]
pub trait FragmentSource: Send + Sync {
    /// Number of pages in the document. Zero is a valid (empty) document.
    async fn page_count(&self) -> Result<usize, SourceError>;

    /// The text fragments of `page`, in extraction order.
    async fn page_fragments(&self, page: usize) -> Result<Vec<String>, SourceError>;
}

/// In-memory fragment source, for tests and embedded callers that
/// already hold the document text.
#[derive(Debug, Clone)]
pub struct StaticSource {
    pages: Vec<Vec<String>>,
}

impl StaticSource {
    pub fn new(pages: Vec<Vec<String>>) -> Self {
        Self { pages }
    }
}

#[async_trait]
impl FragmentSource for StaticSource {
    async fn page_count(&self) -> Result<usize, SourceError> {
        Ok(self.pages.len())
    }

    async fn page_fragments(&self, page: usize) -> Result<Vec<String>, SourceError> {
        self.pages
            .get(page.wrapping_sub(1))
            .cloned()
            .ok_or(SourceError::PageOutOfRange {
                page,
                page_count: self.pages.len(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_source_serves_pages_in_order() {
        let source = StaticSource::new(vec![
            vec!["first".to_string()],
            vec!["second".to_string(), "third".to_string()],
        ]);
        assert_eq!(source.page_count().await.unwrap(), 2);
        assert_eq!(source.page_fragments(1).await.unwrap(), vec!["first"]);
        assert_eq!(
            source.page_fragments(2).await.unwrap(),
            vec!["second", "third"]
        );
    }

    #[tokio::test]
    async fn static_source_rejects_out_of_range_pages() {
        let source = StaticSource::new(vec![vec!["only".to_string()]]);
        assert!(matches!(
            source.page_fragments(0).await,
            Err(SourceError::PageOutOfRange { .. })
        ));
        assert!(matches!(
            source.page_fragments(2).await,
            Err(SourceError::PageOutOfRange { .. })
        ));
    }
}
