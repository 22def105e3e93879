// src/utils/scan_debug.rs
use crate::extractors::anchors::{self, StartAnchor};
use crate::source::FragmentSource;
use crate::utils::error::AppError;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes an annotated dump of the fragment stream for offline
/// inspection of anchor behavior.
///
/// Every fragment is listed page by page; fragments matching the target
/// section's start anchor are prefixed with `[START]`, generic
/// next-section candidates with `[BOUNDARY]`. Useful when the stopping
/// heuristic fires early or never fires.
pub async fn dump_fragment_stream<S>(
    source: &S,
    identifier: &str,
    filename: &str,
) -> Result<(), AppError>
where
    S: FragmentSource + ?Sized,
{
    let start_anchor = StartAnchor::for_identifier(identifier)?;
    let page_count = source.page_count().await?;

    let path = Path::new(filename);
    let mut file = File::create(path)?;

    writeln!(file, "# Fragment stream dump, target section {}", identifier)?;
    writeln!(file, "# Pages: {}", page_count)?;

    for page in 1..=page_count {
        let fragments = source.page_fragments(page).await?;
        writeln!(file, "\n--- page {} ({} fragments) ---", page, fragments.len())?;

        for raw in &fragments {
            let fragment = raw.trim();
            let marker = if start_anchor.matches(fragment) {
                "[START]    "
            } else if anchors::is_boundary_candidate(fragment) {
                "[BOUNDARY] "
            } else {
                "           "
            };
            writeln!(file, "{}{}", marker, fragment)?;
        }
    }

    tracing::info!("Saved fragment stream dump to {}", path.display());
    Ok(())
}
