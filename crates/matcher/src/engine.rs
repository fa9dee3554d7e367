use std::ops::Range;
use std::sync::Arc;
use std::time::Instant;

use canonical::{collapse_whitespace, context_window, eq_folded, LineIndex};
use rayon::prelude::*;
use regex::{Regex, RegexBuilder};
use tracing::{debug, warn, Level};

use crate::metrics::MatchMetrics;
use crate::similarity::{similarity, similarity_score};
use crate::spans::ClaimedSpans;
use crate::types::{AnalysisResult, Match, MatchConfig, MatchError, MatchType, MatchTypeCounts};
use crate::variations::{
    looks_like_brand, meaningful_words, name_variations, strip_corporate_suffix,
};

#[cfg(test)]
mod tests;

const EXACT_CONFIDENCE: u8 = 100;
/// Fuzzy candidate equal to the full business name.
const FUZZY_FULL_NAME_CONFIDENCE: u8 = 95;
/// Fuzzy candidate equal to the name without its corporate suffix.
const FUZZY_STRIPPED_NAME_CONFIDENCE: u8 = 90;

const PARTIAL_BASE: u32 = 60;
const PARTIAL_LONG_WORD_BOOST: u32 = 15;
const PARTIAL_MEDIUM_WORD_BOOST: u32 = 10;
const PARTIAL_SOLE_WORD_BOOST: u32 = 20;
const PARTIAL_BRAND_SHAPE_BOOST: u32 = 15;

/// A span accepted by one of the passes, before position bookkeeping.
#[derive(Debug, Clone)]
struct Candidate {
    span: Range<usize>,
    confidence: u8,
    match_type: MatchType,
}

/// Detects mentions of a business name in free-form text.
///
/// Each call runs three passes over the text in priority order: exact,
/// fuzzy, partial. A later pass never reports a span that intersects one
/// already claimed by an earlier pass (or earlier in the same pass).
///
/// The matcher holds only its configuration and an optional metrics
/// observer, so one instance can serve any number of threads.
pub struct PresenceMatcher {
    cfg: MatchConfig,
    metrics: Option<Arc<dyn MatchMetrics>>,
}

impl Default for PresenceMatcher {
    fn default() -> Self {
        Self {
            cfg: MatchConfig::default(),
            metrics: None,
        }
    }
}

impl std::fmt::Debug for PresenceMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresenceMatcher")
            .field("cfg", &self.cfg)
            .field("metrics", &self.metrics.is_some())
            .finish()
    }
}

impl PresenceMatcher {
    /// Construct a matcher from an explicit, validated config.
    pub fn new(cfg: MatchConfig) -> Result<Self, MatchError> {
        cfg.validate()?;
        Ok(Self { cfg, metrics: None })
    }

    /// Attach a metrics observer that sees every analysis.
    pub fn with_metrics(mut self, recorder: Arc<dyn MatchMetrics>) -> Self {
        self.metrics = Some(recorder);
        self
    }

    pub fn config(&self) -> &MatchConfig {
        &self.cfg
    }

    /// Analyze `text` for mentions of `business_name`.
    ///
    /// Never fails: an empty name or text, or a text that mentions nothing,
    /// yields an empty result.
    pub fn analyze(&self, text: &str, business_name: &str) -> AnalysisResult {
        let start = Instant::now();
        let span = tracing::span!(
            Level::DEBUG,
            "presence.analyze",
            business_name = %business_name,
            text_bytes = text.len()
        );
        let _guard = span.enter();

        let name = collapse_whitespace(business_name);
        let result = if name.is_empty() || text.is_empty() {
            AnalysisResult::empty(business_name)
        } else {
            let text = self.bounded(text);
            let mut claimed = ClaimedSpans::new();
            let mut found = Vec::new();

            self.exact_pass(text, &name, &mut claimed, &mut found);
            let exact = found.len();
            self.fuzzy_pass(text, &name, &mut claimed, &mut found);
            let fuzzy = found.len() - exact;
            self.partial_pass(text, &name, &mut claimed, &mut found);
            let partial = found.len() - exact - fuzzy;
            debug!(exact, fuzzy, partial, "passes_complete");

            self.aggregate(business_name, text, found)
        };

        let latency = start.elapsed();
        debug!(
            total_matches = result.total_matches,
            average_confidence = result.average_confidence,
            elapsed_micros = latency.as_micros() as u64,
            "analyze_complete"
        );
        if let Some(recorder) = &self.metrics {
            recorder.record_analysis(business_name, latency, &result);
        }
        result
    }

    /// Analyze many `(text, business_name)` pairs in parallel.
    ///
    /// Results come back in input order and are identical to calling
    /// [`analyze`](Self::analyze) on each pair in turn.
    pub fn analyze_batch<T, N>(&self, pairs: &[(T, N)]) -> Vec<AnalysisResult>
    where
        T: AsRef<str> + Sync,
        N: AsRef<str> + Sync,
    {
        pairs
            .par_iter()
            .map(|(text, name)| self.analyze(text.as_ref(), name.as_ref()))
            .collect()
    }

    /// Apply the input-length guard, cutting on a char boundary.
    fn bounded<'t>(&self, text: &'t str) -> &'t str {
        match self.cfg.max_text_bytes {
            Some(limit) if text.len() > limit => {
                let mut cut = limit;
                while !text.is_char_boundary(cut) {
                    cut -= 1;
                }
                warn!(text_bytes = text.len(), limit, "text_truncated");
                &text[..cut]
            }
            _ => text,
        }
    }

    fn exact_pass(
        &self,
        text: &str,
        name: &str,
        claimed: &mut ClaimedSpans,
        found: &mut Vec<Candidate>,
    ) {
        let Some(pattern) = compiled(name_pattern(name), name) else {
            return;
        };
        for m in pattern.find_iter(text) {
            if claimed.try_claim(m.range()) {
                found.push(Candidate {
                    span: m.range(),
                    confidence: EXACT_CONFIDENCE,
                    match_type: MatchType::Exact,
                });
            }
        }
    }

    fn fuzzy_pass(
        &self,
        text: &str,
        name: &str,
        claimed: &mut ClaimedSpans,
        found: &mut Vec<Candidate>,
    ) {
        let stripped = strip_corporate_suffix(name);

        for variation in name_variations(name, self.cfg.min_variation_len) {
            let Some(pattern) = compiled(literal_pattern(&variation), &variation) else {
                continue;
            };
            for m in pattern.find_iter(text) {
                let confidence = self.fuzzy_confidence(name, stripped.as_deref(), m.as_str());
                if confidence < self.cfg.fuzzy_min_confidence || !claimed.try_claim(m.range()) {
                    continue;
                }
                found.push(Candidate {
                    span: m.range(),
                    confidence,
                    match_type: MatchType::Fuzzy,
                });
            }
        }
    }

    fn fuzzy_confidence(&self, name: &str, stripped: Option<&str>, candidate: &str) -> u8 {
        if eq_folded(candidate, name) {
            return FUZZY_FULL_NAME_CONFIDENCE;
        }
        if stripped.is_some_and(|s| eq_folded(candidate, s)) {
            return FUZZY_STRIPPED_NAME_CONFIDENCE;
        }
        similarity_score(name, candidate).max(self.cfg.fuzzy_min_confidence)
    }

    fn partial_pass(
        &self,
        text: &str,
        name: &str,
        claimed: &mut ClaimedSpans,
        found: &mut Vec<Candidate>,
    ) {
        let words = meaningful_words(name);
        let sole_word = words.len() == 1;

        for word in &words {
            let Some(pattern) = compiled(word_pattern(word), word) else {
                continue;
            };
            let base = partial_base(word, sole_word);
            for m in pattern.find_iter(text) {
                let confidence = self.partial_confidence(base, word, m.as_str());
                if confidence < self.cfg.partial_min_confidence || !claimed.try_claim(m.range()) {
                    continue;
                }
                found.push(Candidate {
                    span: m.range(),
                    confidence,
                    match_type: MatchType::Partial,
                });
            }
        }
    }

    fn partial_confidence(&self, base: u32, word: &str, matched: &str) -> u8 {
        let scaled = (f64::from(base) * similarity(word, matched)).round();
        scaled.clamp(
            f64::from(self.cfg.partial_min_confidence),
            f64::from(self.cfg.partial_max_confidence),
        ) as u8
    }

    fn aggregate(&self, business_name: &str, text: &str, mut found: Vec<Candidate>) -> AnalysisResult {
        found.sort_by_key(|c| c.span.start);

        let lines = LineIndex::new(text);
        let mut matches = Vec::with_capacity(found.len());
        let mut counts = MatchTypeCounts::default();
        // Candidates are sorted, so char offsets accumulate left to right.
        let mut byte_cursor = 0;
        let mut char_cursor = 0;

        for candidate in found {
            let Range { start, end } = candidate.span;
            char_cursor += text[byte_cursor..start].chars().count();
            byte_cursor = start;

            let (context_before, context_after) =
                context_window(text, start, end, self.cfg.context_chars);
            counts.bump(candidate.match_type);
            matches.push(Match {
                matched_text: text[start..end].to_string(),
                line_number: lines.line_of(start),
                character_position: char_cursor,
                confidence: candidate.confidence,
                match_type: candidate.match_type,
                context_before,
                context_after,
            });
        }

        let highest_confidence_match = matches
            .iter()
            .fold(None::<&Match>, |best, m| match best {
                Some(b) if b.confidence >= m.confidence => Some(b),
                _ => Some(m),
            })
            .cloned();

        let average_confidence = if matches.is_empty() {
            0
        } else {
            let total: u32 = matches.iter().map(|m| u32::from(m.confidence)).sum();
            (f64::from(total) / matches.len() as f64).round() as u8
        };

        AnalysisResult {
            business_name: business_name.to_string(),
            total_matches: matches.len(),
            matches,
            highest_confidence_match,
            average_confidence,
            match_type_counts: counts,
        }
    }
}

/// Analyze `text` for `business_name` with the default configuration.
pub fn analyze(text: &str, business_name: &str) -> AnalysisResult {
    PresenceMatcher::default().analyze(text, business_name)
}

fn partial_base(word: &str, sole_word: bool) -> u32 {
    let len = word.chars().count();
    let mut base = PARTIAL_BASE;
    if len >= 6 {
        base += PARTIAL_LONG_WORD_BOOST;
    } else if len >= 4 {
        base += PARTIAL_MEDIUM_WORD_BOOST;
    }
    if sole_word {
        base += PARTIAL_SOLE_WORD_BOOST;
    }
    if looks_like_brand(word) {
        base += PARTIAL_BRAND_SHAPE_BOOST;
    }
    base
}

/// Case-insensitive search for `literal`, metacharacters escaped.
pub(crate) fn literal_pattern(literal: &str) -> Result<Regex, MatchError> {
    Ok(RegexBuilder::new(&regex::escape(literal))
        .case_insensitive(true)
        .build()?)
}

/// Case-insensitive search for `name` as written, any run of whitespace
/// between its segments matching any other.
pub(crate) fn name_pattern(name: &str) -> Result<Regex, MatchError> {
    let segments: Vec<String> = name.split_whitespace().map(regex::escape).collect();
    Ok(RegexBuilder::new(&segments.join(r"\s+"))
        .case_insensitive(true)
        .build()?)
}

/// Case-insensitive, word-bounded search for `word`, metacharacters escaped.
pub(crate) fn word_pattern(word: &str) -> Result<Regex, MatchError> {
    Ok(RegexBuilder::new(&format!(r"\b{}\b", regex::escape(word)))
        .case_insensitive(true)
        .build()?)
}

fn compiled(pattern: Result<Regex, MatchError>, source: &str) -> Option<Regex> {
    match pattern {
        Ok(regex) => Some(regex),
        Err(err) => {
            warn!(pattern_source = %source, error = %err, "pattern_skipped");
            None
        }
    }
}
