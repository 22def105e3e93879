// src/storage/mod.rs
use crate::extractors::section::ExtractionResult;
use crate::utils::error::StorageError;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(StorageError::IoError)?;
        }

        Ok(Self {
            base_dir: base_path,
        })
    }

    fn section_dir(&self, document_label: &str) -> Result<PathBuf, StorageError> {
        let target_dir = self.base_dir.join(sanitize_label(document_label));
        if !target_dir.exists() {
            fs::create_dir_all(&target_dir).map_err(StorageError::IoError)?;
        }
        Ok(target_dir)
    }

    /// Saves the extracted section text to `<base>/<label>/section_<id>.txt`
    pub fn save_section(
        &self,
        document_label: &str,
        identifier: &str,
        result: &ExtractionResult,
    ) -> Result<PathBuf, StorageError> {
        let target_dir = self.section_dir(document_label)?;
        let file_path = target_dir.join(format!("section_{}.txt", sanitize_label(identifier)));

        let mut file = fs::File::create(&file_path).map_err(StorageError::IoError)?;
        file.write_all(result.text.as_bytes())
            .map_err(StorageError::IoError)?;

        tracing::info!("Saved section text to {}", file_path.display());
        Ok(file_path)
    }

    /// Saves extraction provenance next to the section text, in JSON
    pub fn save_section_metadata(
        &self,
        document_label: &str,
        identifier: &str,
        result: &ExtractionResult,
    ) -> Result<PathBuf, StorageError> {
        let target_dir = self.section_dir(document_label)?;
        let file_path =
            target_dir.join(format!("section_{}_meta.json", sanitize_label(identifier)));

        let metadata = serde_json::json!({
            "document": document_label,
            "section": identifier,
            "source_classification": result.source_classification,
            "confidence": result.confidence,
            "text_length": result.text.len(),
            "extraction_timestamp": chrono::Utc::now().to_rfc3339(),
        });

        let metadata_str = serde_json::to_string_pretty(&metadata)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, metadata_str).map_err(StorageError::IoError)?;

        tracing::info!("Saved metadata to {}", file_path.display());
        Ok(file_path)
    }
}

/// Keeps labels filesystem-safe: alphanumerics, dash, underscore.
fn sanitize_label(label: &str) -> String {
    label
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::section::{Confidence, SourceClassification};

    #[test]
    fn sanitize_replaces_path_hostile_characters() {
        assert_eq!(sanitize_label("Income-tax Act, 1961"), "Income-tax_Act__1961");
        assert_eq!(sanitize_label("10(a)"), "10_a_");
        assert_eq!(sanitize_label("115BAC"), "115BAC");
    }

    #[test]
    fn saves_text_and_metadata_side_by_side() {
        let tmp = std::env::temp_dir().join(format!(
            "statute_extractor_test_{}",
            std::process::id()
        ));
        let storage = StorageManager::new(&tmp).unwrap();

        let result = ExtractionResult {
            text: "9. Levy and Collection\nTax shall be levied...".to_string(),
            source_classification: SourceClassification::Consolidated,
            confidence: Confidence::Low,
        };

        let text_path = storage.save_section("it-act", "9", &result).unwrap();
        let meta_path = storage.save_section_metadata("it-act", "9", &result).unwrap();

        assert_eq!(fs::read_to_string(&text_path).unwrap(), result.text);
        let meta: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&meta_path).unwrap()).unwrap();
        assert_eq!(meta["section"], "9");
        assert_eq!(meta["confidence"], "Low");
        assert_eq!(meta["text_length"], result.text.len());

        fs::remove_dir_all(&tmp).ok();
    }
}
