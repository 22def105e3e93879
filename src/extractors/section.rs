// src/extractors/section.rs

// --- Imports ---
use crate::extractors::anchors::{self, StartAnchor};
use crate::source::FragmentSource;
use crate::utils::error::ExtractError;
use serde::Serialize;

// --- Constants ---
// Accumulation stops once the buffer passes this many bytes. A missed
// boundary on a consolidated statute would otherwise swallow the rest of
// the document.
pub const DEFAULT_SAFETY_CEILING: usize = 50_000;

// --- Data Structures ---
/// Where the extracted text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SourceClassification {
    /// A source already scoped to a single section.
    SectionSpecific,
    /// Carved out of a consolidated multi-section document.
    Consolidated,
}

/// How much the caller should trust the boundary decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Confidence {
    /// Reserved for section-specific sources; never produced by this scanner.
    High,
    /// Heuristic carve-out from a consolidated document.
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionResult {
    pub text: String,
    pub source_classification: SourceClassification,
    pub confidence: Confidence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Searching,
    Accumulating,
}

// --- Main Extractor Structure ---
/// Scans a paged fragment stream for one numbered section.
///
/// Holds only configuration; every call to [`extract_section`] owns its
/// own scan state and buffer, so one extractor may serve concurrent
/// extractions.
///
/// [`extract_section`]: SectionExtractor::extract_section
pub struct SectionExtractor {
    safety_ceiling: usize,
}

impl SectionExtractor {
    pub fn new() -> Self {
        Self {
            safety_ceiling: DEFAULT_SAFETY_CEILING,
        }
    }

    pub fn with_safety_ceiling(safety_ceiling: usize) -> Self {
        Self { safety_ceiling }
    }

    /// Extracts the text of section `identifier` from `source`.
    ///
    /// Walks pages strictly in order and never requests page N+1 before
    /// page N is fully consumed. Accumulation starts at the first
    /// fragment opening with "<identifier>. " and stops at the first
    /// fragment that looks like the next section heading, at the safety
    /// ceiling, or at end of document.
    pub async fn extract_section<S>(
        &self,
        identifier: &str,
        source: &S,
    ) -> Result<ExtractionResult, ExtractError>
    where
        S: FragmentSource + ?Sized,
    {
        let start_anchor = StartAnchor::for_identifier(identifier)?;
        let page_count = source.page_count().await?;
        tracing::info!(
            "Scanning for section {} across {} pages",
            identifier,
            page_count
        );

        let mut state = ScanState::Searching;
        let mut buffer = String::new();
        let mut truncated = false;

        'pages: for page in 1..=page_count {
            let fragments = source.page_fragments(page).await?;

            for raw in &fragments {
                let fragment = raw.trim();
                if fragment.is_empty() {
                    continue;
                }

                match state {
                    ScanState::Searching => {
                        if start_anchor.matches(fragment) {
                            tracing::info!(
                                "Found section {} start on page {}",
                                identifier,
                                page
                            );
                            state = ScanState::Accumulating;
                            buffer.push_str(fragment);
                            buffer.push('\n');
                        }
                        // Anything before the start anchor is discarded.
                    }
                    ScanState::Accumulating => {
                        // A fragment re-matching the start anchor is a
                        // repeated header (running heads repeat the
                        // current section number), not a restart.
                        if start_anchor.matches(fragment) {
                            tracing::debug!(
                                "Ignoring repeated section {} header on page {}",
                                identifier,
                                page
                            );
                            continue;
                        }

                        if anchors::is_boundary_candidate(fragment) {
                            tracing::debug!(
                                "Next-section candidate {:?} on page {}, stopping",
                                fragment,
                                page
                            );
                            return Ok(build_consolidated_result(buffer, identifier, false));
                        }

                        buffer.push_str(fragment);
                        buffer.push(' ');
                    }
                }

                if state == ScanState::Accumulating && buffer.len() > self.safety_ceiling {
                    truncated = true;
                    break 'pages;
                }
            }
        }

        if state == ScanState::Accumulating && !buffer.is_empty() {
            // Either the target was the last section in the document, or
            // the ceiling fired before a boundary candidate appeared.
            return Ok(build_consolidated_result(buffer, identifier, truncated));
        }

        tracing::warn!(
            "Start anchor for section {} never matched in {} pages",
            identifier,
            page_count
        );
        Err(ExtractError::NotFound(format!(
            "section {} not found in document",
            identifier
        )))
    }
}

impl Default for SectionExtractor {
    fn default() -> Self {
        Self::new()
    }
}

// --- Result Builder ---
/// Normalizes a raw scan buffer into the public result contract.
///
/// Keeps the scanner's internal representation out of the caller-facing
/// shape: trims the accumulated text and fixes the provenance tags.
fn build_consolidated_result(
    buffer: String,
    identifier: &str,
    truncated: bool,
) -> ExtractionResult {
    if truncated {
        tracing::warn!(
            "Buffer for section {} exceeded safety ceiling; result may run past the section end",
            identifier
        );
    }

    ExtractionResult {
        text: buffer.trim().to_string(),
        source_classification: SourceClassification::Consolidated,
        confidence: Confidence::Low,
    }
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StaticSource;
    use crate::utils::error::SourceError;
    use async_trait::async_trait;

    fn levy_document() -> StaticSource {
        StaticSource::new(vec![
            vec!["8. Prior section text.".to_string()],
            vec![
                "9. Levy and Collection".to_string(),
                "Tax shall be levied...".to_string(),
                "10. Next section text.".to_string(),
            ],
        ])
    }

    #[tokio::test]
    async fn extracts_section_bounded_by_next_heading() {
        let extractor = SectionExtractor::new();
        let result = extractor
            .extract_section("9", &levy_document())
            .await
            .expect("extraction should succeed");

        assert_eq!(result.text, "9. Levy and Collection\nTax shall be levied...");
        assert_eq!(
            result.source_classification,
            SourceClassification::Consolidated
        );
        assert_eq!(result.confidence, Confidence::Low);
        assert!(!result.text.contains("10. Next section text."));
        assert!(!result.text.contains("8. Prior section text."));
    }

    #[tokio::test]
    async fn missing_section_is_not_found() {
        let extractor = SectionExtractor::new();
        let err = extractor
            .extract_section("99", &levy_document())
            .await
            .expect_err("section 99 is absent");
        assert!(matches!(err, ExtractError::NotFound(_)));
    }

    #[tokio::test]
    async fn empty_document_is_not_found() {
        let extractor = SectionExtractor::new();
        let err = extractor
            .extract_section("9", &StaticSource::new(vec![]))
            .await
            .expect_err("no pages at all");
        assert!(matches!(err, ExtractError::NotFound(_)));
    }

    #[tokio::test]
    async fn last_section_runs_to_end_of_document() {
        let source = StaticSource::new(vec![
            vec!["298. Power to remove difficulties".to_string()],
            vec!["The Central Government may make provision.".to_string()],
        ]);
        let extractor = SectionExtractor::new();
        let result = extractor.extract_section("298", &source).await.unwrap();
        assert!(result.text.starts_with("298. Power to remove difficulties"));
        assert!(result.text.ends_with("The Central Government may make provision."));
    }

    #[tokio::test]
    async fn repeated_header_does_not_duplicate_body() {
        let source = StaticSource::new(vec![vec![
            "9. Levy and Collection".to_string(),
            "9. Levy and Collection".to_string(),
            "Tax shall be levied.".to_string(),
            "10. Next section.".to_string(),
        ]]);
        let extractor = SectionExtractor::new();
        let result = extractor.extract_section("9", &source).await.unwrap();
        assert_eq!(result.text.matches("Levy and Collection").count(), 1);
        assert_eq!(result.text, "9. Levy and Collection\nTax shall be levied.");
    }

    #[tokio::test]
    async fn header_repeated_on_later_page_is_ignored() {
        let source = StaticSource::new(vec![
            vec![
                "9. Levy and Collection".to_string(),
                "Body on first page.".to_string(),
            ],
            vec![
                // Running head on the continuation page
                "9. Levy and Collection".to_string(),
                "Body on second page.".to_string(),
                "10. Next section.".to_string(),
            ],
        ]);
        let extractor = SectionExtractor::new();
        let result = extractor.extract_section("9", &source).await.unwrap();
        assert_eq!(
            result.text,
            "9. Levy and Collection\nBody on first page. Body on second page."
        );
    }

    #[tokio::test]
    async fn safety_ceiling_bounds_accumulation() {
        // No boundary candidate anywhere; body far exceeds the ceiling.
        let body: Vec<String> = (0..200)
            .map(|i| format!("clause {} lorem ipsum dolor sit amet", i))
            .collect();
        let mut fragments = vec!["42. Endless section".to_string()];
        fragments.extend(body);
        let source = StaticSource::new(vec![fragments]);

        let extractor = SectionExtractor::with_safety_ceiling(500);
        let result = extractor.extract_section("42", &source).await.unwrap();

        assert!(result.text.len() <= 500 + 64, "result should stop near the ceiling");
        assert_eq!(result.confidence, Confidence::Low);
        assert!(result.text.starts_with("42. Endless section"));
    }

    #[tokio::test]
    async fn extraction_is_idempotent() {
        let extractor = SectionExtractor::new();
        let source = levy_document();
        let first = extractor.extract_section("9", &source).await.unwrap();
        let second = extractor.extract_section("9", &source).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn whitespace_fragments_are_skipped() {
        let source = StaticSource::new(vec![vec![
            "   ".to_string(),
            "9. Levy and Collection".to_string(),
            "".to_string(),
            "Tax shall be levied.".to_string(),
            "10. Next section.".to_string(),
        ]]);
        let extractor = SectionExtractor::new();
        let result = extractor.extract_section("9", &source).await.unwrap();
        assert_eq!(result.text, "9. Levy and Collection\nTax shall be levied.");
    }

    struct FailingSource;

    #[async_trait]
    impl FragmentSource for FailingSource {
        async fn page_count(&self) -> Result<usize, SourceError> {
            Ok(1)
        }

        async fn page_fragments(&self, page: usize) -> Result<Vec<String>, SourceError> {
            Err(SourceError::Decode(format!("page {} corrupted", page)))
        }
    }

    #[tokio::test]
    async fn source_failures_propagate_unchanged() {
        let extractor = SectionExtractor::new();
        let err = extractor
            .extract_section("9", &FailingSource)
            .await
            .expect_err("fetch failure must surface");
        assert!(matches!(err, ExtractError::Source(SourceError::Decode(_))));
    }
}
