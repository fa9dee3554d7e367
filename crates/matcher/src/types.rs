use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Strategy that produced a match.
///
/// Variants are ordered by priority: when spans compete, an `Exact` match
/// always wins over `Fuzzy`, which wins over `Partial`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    /// Case-insensitive literal occurrence of the full business name.
    Exact,
    /// Occurrence of a generated name variation (suffix stripped, joined words, ...).
    Fuzzy,
    /// Word-bounded occurrence of a single meaningful word from the name.
    Partial,
}

impl MatchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchType::Exact => "exact",
            MatchType::Fuzzy => "fuzzy",
            MatchType::Partial => "partial",
        }
    }
}

impl std::fmt::Display for MatchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single detected reference to the business inside the analyzed text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Match {
    /// Literal substring found in the source text (original casing).
    pub matched_text: String,
    /// 1-based line on which the match starts.
    pub line_number: usize,
    /// 0-based character offset of the match start in the original text.
    pub character_position: usize,
    /// Confidence in [0, 100]; exact matches are always 100.
    pub confidence: u8,
    pub match_type: MatchType,
    /// Up to `context_chars` characters preceding the match.
    pub context_before: String,
    /// Up to `context_chars` characters following the match.
    pub context_after: String,
}

impl Match {
    /// Length of `matched_text` in characters.
    pub fn char_len(&self) -> usize {
        self.matched_text.chars().count()
    }

    /// Character span `[character_position, character_position + char_len)`.
    pub fn char_span(&self) -> std::ops::Range<usize> {
        self.character_position..self.character_position + self.char_len()
    }
}

/// Per-strategy match counts.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchTypeCounts {
    pub exact: usize,
    pub fuzzy: usize,
    pub partial: usize,
}

impl MatchTypeCounts {
    pub fn get(&self, match_type: MatchType) -> usize {
        match match_type {
            MatchType::Exact => self.exact,
            MatchType::Fuzzy => self.fuzzy,
            MatchType::Partial => self.partial,
        }
    }

    pub(crate) fn bump(&mut self, match_type: MatchType) {
        match match_type {
            MatchType::Exact => self.exact += 1,
            MatchType::Fuzzy => self.fuzzy += 1,
            MatchType::Partial => self.partial += 1,
        }
    }
}

/// Outcome of analyzing one text against one business name.
///
/// Created fresh per call and fully owned by the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalysisResult {
    /// The business name exactly as the caller passed it.
    pub business_name: String,
    /// Non-overlapping matches, ascending by `character_position`.
    pub matches: Vec<Match>,
    pub total_matches: usize,
    /// Highest-confidence match; the earliest one wins ties.
    pub highest_confidence_match: Option<Match>,
    /// Rounded mean confidence, 0 when there are no matches.
    pub average_confidence: u8,
    pub match_type_counts: MatchTypeCounts,
}

impl AnalysisResult {
    /// Result with no matches.
    pub fn empty(business_name: &str) -> Self {
        Self {
            business_name: business_name.to_string(),
            matches: Vec::new(),
            total_matches: 0,
            highest_confidence_match: None,
            average_confidence: 0,
            match_type_counts: MatchTypeCounts::default(),
        }
    }

    /// Whether the business is mentioned at all.
    pub fn is_mentioned(&self) -> bool {
        self.total_matches > 0
    }

    pub fn matches_of(&self, match_type: MatchType) -> impl Iterator<Item = &Match> {
        self.matches
            .iter()
            .filter(move |m| m.match_type == match_type)
    }
}

/// Tuning knobs for the matcher.
///
/// The defaults reproduce the calibrated behavior downstream scoring
/// depends on; change them only together with that scoring.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchConfig {
    /// Characters of context captured on each side of a match.
    #[serde(default = "MatchConfig::default_context_chars")]
    pub context_chars: usize,
    /// Floor of the similarity-based fuzzy score and the fuzzy acceptance threshold.
    #[serde(default = "MatchConfig::default_fuzzy_min_confidence")]
    pub fuzzy_min_confidence: u8,
    /// Lower clamp and acceptance threshold for partial matches.
    #[serde(default = "MatchConfig::default_partial_min_confidence")]
    pub partial_min_confidence: u8,
    /// Upper clamp for partial matches.
    #[serde(default = "MatchConfig::default_partial_max_confidence")]
    pub partial_max_confidence: u8,
    /// Name variations shorter than this many characters are discarded.
    #[serde(default = "MatchConfig::default_min_variation_len")]
    pub min_variation_len: usize,
    /// Texts longer than this many bytes are truncated before scanning.
    #[serde(default = "MatchConfig::default_max_text_bytes")]
    pub max_text_bytes: Option<usize>,
}

impl MatchConfig {
    pub(crate) fn default_context_chars() -> usize {
        20
    }

    pub(crate) fn default_fuzzy_min_confidence() -> u8 {
        70
    }

    pub(crate) fn default_partial_min_confidence() -> u8 {
        60
    }

    pub(crate) fn default_partial_max_confidence() -> u8 {
        95
    }

    pub(crate) fn default_min_variation_len() -> usize {
        3
    }

    pub(crate) fn default_max_text_bytes() -> Option<usize> {
        Some(1024 * 1024)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), MatchError> {
        for (field, value) in [
            ("fuzzy_min_confidence", self.fuzzy_min_confidence),
            ("partial_min_confidence", self.partial_min_confidence),
            ("partial_max_confidence", self.partial_max_confidence),
        ] {
            if value > 100 {
                return Err(MatchError::InvalidConfig(format!(
                    "{field} must be within 0..=100"
                )));
            }
        }
        if self.partial_min_confidence > self.partial_max_confidence {
            return Err(MatchError::InvalidConfig(
                "partial_min_confidence must not exceed partial_max_confidence".into(),
            ));
        }
        if self.min_variation_len == 0 {
            return Err(MatchError::InvalidConfig(
                "min_variation_len must be greater than zero".into(),
            ));
        }
        if self.max_text_bytes == Some(0) {
            return Err(MatchError::InvalidConfig(
                "max_text_bytes must be greater than zero when set".into(),
            ));
        }
        Ok(())
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            context_chars: Self::default_context_chars(),
            fuzzy_min_confidence: Self::default_fuzzy_min_confidence(),
            partial_min_confidence: Self::default_partial_min_confidence(),
            partial_max_confidence: Self::default_partial_max_confidence(),
            min_variation_len: Self::default_min_variation_len(),
            max_text_bytes: Self::default_max_text_bytes(),
        }
    }
}

/// Errors produced by the matching layer.
///
/// None of these escape [`crate::PresenceMatcher::analyze`]; they surface
/// only when building a matcher or a search pattern.
#[derive(Debug, Error)]
pub enum MatchError {
    /// Invalid matcher configuration.
    #[error("invalid match config: {0}")]
    InvalidConfig(String),
    /// A search pattern could not be compiled.
    #[error("pattern error: {0}")]
    Pattern(#[from] regex::Error),
}
