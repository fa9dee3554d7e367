//! Workspace umbrella crate for business-presence matching.
//!
//! Re-exports the matcher and its text helpers behind one dependency and
//! adds YAML configuration loading for services and the `presence` binary.
//!
//! ```
//! let result = presence::analyze(
//!     "McDonald's is the world's largest restaurant chain.",
//!     "McDonald's Corporation",
//! );
//! assert_eq!(result.total_matches, 1);
//! assert_eq!(result.matches[0].confidence, 90);
//! ```

pub mod config;

pub use canonical::{
    char_offset, collapse_whitespace, context_window, fold_case, line_number_at, tokenize,
    LineIndex, Token,
};
pub use matcher::{
    analyze, meaningful_words, name_variations, similarity, strip_corporate_suffix,
    AnalysisResult, Match, MatchConfig, MatchError, MatchMetrics, MatchType, MatchTypeCounts,
    PresenceMatcher,
};

pub use crate::config::{ConfigLoadError, MatchYamlConfig, PresenceConfig};

/// Build a matcher from a loaded configuration file.
pub fn build_matcher(config: &PresenceConfig) -> Result<PresenceMatcher, MatchError> {
    PresenceMatcher::new(config.match_config())
}
