// src/extractors/anchors.rs

// --- Imports ---
use crate::utils::error::ExtractError;
use once_cell::sync::Lazy;
use regex::Regex;

// --- Regex Patterns (Lazy Static) ---
// Generic next-section heuristic. Statute sections are rendered as
// "<number><optional uppercase suffix>. <title>" (e.g. "10.", "115BAC."),
// so any fragment opening that way is treated as the start of *some*
// subsequent section. The exact next identifier is unknown in advance;
// this over-approximates and may fire early on look-alike fragments.
static NEXT_SECTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*[0-9]+[A-Z]*\.\s").expect("Failed to compile NEXT_SECTION_RE")
});

/// Start-of-section test for one target identifier.
///
/// Compiled once per extraction call from the escaped identifier, then
/// applied to every fragment. Holds no mutable state, so a single
/// instance is safe to share across fragments.
#[derive(Debug)]
pub struct StartAnchor {
    pattern: Regex,
}

impl StartAnchor {
    /// Builds the start anchor for `identifier`.
    ///
    /// The pattern is "<identifier>. " anchored at fragment start,
    /// case-insensitive, with the identifier escaped so metacharacters
    /// in odd section names match literally. Anchoring at the start
    /// keeps cross-references like "see section 10" from matching.
    pub fn for_identifier(identifier: &str) -> Result<Self, ExtractError> {
        let escaped = regex::escape(identifier);
        let pattern = Regex::new(&format!(r"(?i)^\s*{}\.\s", escaped))
            .map_err(|e| ExtractError::Pattern(e.to_string()))?;
        Ok(Self { pattern })
    }

    /// True when the trimmed fragment opens the target section.
    pub fn matches(&self, fragment: &str) -> bool {
        self.pattern.is_match(fragment)
    }
}

/// True when the fragment looks like the first line of some next section.
pub fn is_boundary_candidate(fragment: &str) -> bool {
    NEXT_SECTION_RE.is_match(fragment)
}
