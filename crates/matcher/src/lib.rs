//! # Presence Matcher (`matcher`)
//!
//! ## Purpose
//!
//! `matcher` decides whether, where, and with what confidence a business is
//! mentioned in a block of free-form text, typically an AI chatbot's answer.
//! It copes with suffix variations ("McDonald's" for "McDonald's
//! Corporation"), joined or hyphenated spellings, and brand-only references
//! ("Chase" for "JPMorgan Chase").
//!
//! The scoring pipeline that turns results into visibility, rank and
//! relevance numbers lives elsewhere; this crate only ever sees a text and a
//! name.
//!
//! ## Passes
//!
//! Every call runs three passes over one shared set of claimed spans:
//!
//! - **Exact**: case-insensitive literal occurrences of the name, confidence 100.
//! - **Fuzzy**: occurrences of [`name_variations`]; 95 for the full name, 90
//!   for the suffix-stripped name, otherwise edit-distance [`similarity`]
//!   floored at 70.
//! - **Partial**: word-bounded occurrences of [`meaningful_words`], scored from
//!   word length, brand shape and whether the word is the whole brand,
//!   clamped to 60..=95.
//!
//! A later pass skips any span that intersects an earlier claim, so results
//! never overlap and stricter passes win.
//!
//! ## Core Types
//!
//! - [`PresenceMatcher`]: configured matcher; `analyze` and `analyze_batch`.
//! - [`MatchConfig`]: thresholds, context width and the input-length guard.
//! - [`AnalysisResult`]: sorted [`Match`]es plus aggregate statistics.
//! - [`MatchType`]: `Exact`, `Fuzzy` or `Partial`.
//!
//! ## Example Usage
//!
//! ```
//! use matcher::{analyze, MatchType};
//!
//! let text = "JPMorgan Chase is a bank. Chase Bank offers mobile banking.";
//! let result = analyze(text, "JPMorgan Chase");
//!
//! assert!(result.is_mentioned());
//! assert_eq!(result.matches[0].match_type, MatchType::Exact);
//! assert_eq!(result.matches[1].matched_text, "Chase");
//! assert_eq!(result.matches[1].match_type, MatchType::Partial);
//! ```
//!
//! ## Observability
//!
//! Passes emit `tracing` events under a `presence.analyze` span. Attach a
//! [`MatchMetrics`] implementation with [`PresenceMatcher::with_metrics`] to
//! record per-call latency and outcomes.

pub mod engine;
pub mod metrics;
pub mod similarity;
pub mod spans;
pub mod types;
pub mod variations;

pub use crate::engine::{analyze, PresenceMatcher};
pub use crate::metrics::MatchMetrics;
pub use crate::similarity::{similarity, similarity_score};
pub use crate::spans::ClaimedSpans;
pub use crate::types::{AnalysisResult, Match, MatchConfig, MatchError, MatchType, MatchTypeCounts};
pub use crate::variations::{
    looks_like_brand, meaningful_words, name_variations, strip_corporate_suffix, STOPWORDS,
};
