use super::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

const JPM_TEXT: &str = "JPMorgan Chase is a bank. Chase Bank offers mobile banking. \
                        JPMORGAN CHASE & CO. is the legal name.";

fn assert_no_overlaps(result: &AnalysisResult) {
    for pair in result.matches.windows(2) {
        assert!(
            pair[0].char_span().end <= pair[1].char_span().start,
            "overlapping matches: {:?} and {:?}",
            pair[0],
            pair[1]
        );
    }
}

#[test]
fn exact_and_brand_fragment_scenario() {
    let result = analyze(JPM_TEXT, "JPMorgan Chase");

    assert_eq!(result.total_matches, 3);
    assert_no_overlaps(&result);

    let positions: Vec<(usize, MatchType, u8)> = result
        .matches
        .iter()
        .map(|m| (m.character_position, m.match_type, m.confidence))
        .collect();
    assert_eq!(
        positions,
        vec![
            (0, MatchType::Exact, 100),
            (26, MatchType::Partial, 85),
            (60, MatchType::Exact, 100),
        ]
    );
    assert_eq!(result.matches[1].matched_text, "Chase");
    assert_eq!(result.matches[2].matched_text, "JPMORGAN CHASE");

    assert_eq!(result.match_type_counts.exact, 2);
    assert_eq!(result.match_type_counts.fuzzy, 0);
    assert_eq!(result.match_type_counts.partial, 1);
    assert_eq!(result.average_confidence, 95);

    let best = result.highest_confidence_match.as_ref().expect("best match");
    assert_eq!(best.character_position, 0);
}

#[test]
fn suffix_stripped_name_is_fuzzy_90() {
    let text = "McDonald's is the world's largest restaurant chain.";
    let result = analyze(text, "McDonald's Corporation");

    assert_eq!(result.total_matches, 1);
    let m = &result.matches[0];
    assert_eq!(m.match_type, MatchType::Fuzzy);
    assert_eq!(m.matched_text, "McDonald's");
    assert_eq!(m.confidence, 90);
    assert_eq!(m.context_before, "");
    assert_eq!(m.context_after, " is the world's larg");
}

#[test]
fn single_brand_word_scores_high() {
    let result = analyze("Tesla leads in electric vehicles.", "Tesla Inc");

    assert_eq!(result.total_matches, 1);
    let m = &result.matches[0];
    assert_eq!(m.matched_text, "Tesla");
    assert!(m.confidence >= 80);
    assert!(matches!(m.match_type, MatchType::Fuzzy | MatchType::Partial));
}

#[test]
fn sole_meaningful_word_gets_partial_boost() {
    // "The" is generic, so "Globex" is the whole brand: 60 + 15 + 20 + 15, clamped.
    let result = analyze("I bought it at Globex yesterday.", "The Globex");

    assert_eq!(result.total_matches, 1);
    let m = &result.matches[0];
    assert_eq!(m.match_type, MatchType::Partial);
    assert_eq!(m.confidence, 95);
    assert_eq!(m.character_position, 15);
}

#[test]
fn short_plain_word_gets_minimal_partial_score() {
    // "Acme" is four letters and not brand-shaped: 60 + 10.
    let result = analyze("Call Acme today.", "Acme Rocket Co");

    assert_eq!(result.total_matches, 1);
    assert_eq!(result.matches[0].match_type, MatchType::Partial);
    assert_eq!(result.matches[0].confidence, 70);
}

#[test]
fn joined_variation_scored_by_similarity() {
    // "AcmeRocketCo" is two deletions away from the 14-character name.
    let result = analyze("Shares of AcmeRocketCo rose.", "Acme Rocket Co");

    assert_eq!(result.total_matches, 1);
    let m = &result.matches[0];
    assert_eq!(m.match_type, MatchType::Fuzzy);
    assert_eq!(m.matched_text, "AcmeRocketCo");
    assert_eq!(m.confidence, 86);
}

#[test]
fn no_mention_yields_empty_result() {
    let result = analyze(
        "We recommend checking several vendors before deciding.",
        "Acme Rocket Co",
    );
    assert_eq!(result.total_matches, 0);
    assert!(result.matches.is_empty());
    assert_eq!(result.average_confidence, 0);
    assert!(result.highest_confidence_match.is_none());
    assert!(!result.is_mentioned());
}

#[test]
fn empty_inputs_are_not_errors() {
    for (text, name) in [("", "Acme"), ("some text", ""), ("some text", "   "), ("", "")] {
        let result = analyze(text, name);
        assert_eq!(result.total_matches, 0, "text={text:?} name={name:?}");
        assert_eq!(result.average_confidence, 0);
        assert!(result.highest_confidence_match.is_none());
        assert_eq!(result.business_name, name);
    }
}

#[test]
fn regex_metacharacters_in_name_are_literal() {
    let text = "We use C++ (Labs) daily and also Cxx Labs.";
    let result = analyze(text, "C++ (Labs)");

    assert_eq!(result.match_type_counts.exact, 1);
    let exact = result.matches_of(MatchType::Exact).next().expect("exact match");
    assert_eq!(exact.character_position, 7);
    assert_eq!(exact.matched_text, "C++ (Labs)");

    // a name that is nothing but metacharacters must not panic
    let result = analyze("a.*b [x] (y) ^$ |", ".*[(^$|");
    assert_eq!(result.total_matches, 0);
}

#[test]
fn exact_matches_are_always_100() {
    let texts = [
        JPM_TEXT,
        "jpmorgan chase, JPMorgan Chase and JpMoRgAn ChAsE",
        "JPMorgan\nChase and JPMorgan Chase",
    ];
    for text in texts {
        let result = analyze(text, "JPMorgan Chase");
        for m in result.matches_of(MatchType::Exact) {
            assert_eq!(m.confidence, 100);
        }
        for m in &result.matches {
            assert!(m.confidence <= 100);
        }
        assert_no_overlaps(&result);
    }
}

#[test]
fn exact_pass_tolerates_spacing_differences_in_name() {
    for (text, name) in [
        ("Visit Acme  Rocket today.", "Acme  Rocket"),
        ("Visit Acme Rocket today.", "Acme  Rocket"),
        ("Visit Acme\tRocket today.", "Acme Rocket"),
    ] {
        let result = analyze(text, name);
        assert_eq!(result.match_type_counts.exact, 1, "{text:?} / {name:?}");
        assert_eq!(result.total_matches, 1, "{text:?} / {name:?}");
        assert_eq!(result.matches[0].character_position, 6);
        assert_eq!(result.matches[0].confidence, 100);
    }

    let result = analyze("Visit Acme  Rocket today.", "Acme  Rocket");
    assert_eq!(result.matches[0].matched_text, "Acme  Rocket");
}

#[test]
fn exact_span_blocks_overlapping_fuzzy_variation() {
    let result = analyze("Tesla Inc and Tesla", "Tesla Inc");

    let summary: Vec<_> = result
        .matches
        .iter()
        .map(|m| (m.character_position, m.match_type, m.confidence))
        .collect();
    assert_eq!(
        summary,
        vec![(0, MatchType::Exact, 100), (14, MatchType::Fuzzy, 90)]
    );
    assert_eq!(result.matches[0].matched_text, "Tesla Inc");
    assert_eq!(result.matches[1].matched_text, "Tesla");
    assert_no_overlaps(&result);
}

#[test]
fn matches_sorted_by_position_across_passes() {
    // partial hit first, exact hit last
    let text = "Chase Bank, then Acme mentions JPMorgan Chase.";
    let result = analyze(text, "JPMorgan Chase");

    let positions: Vec<usize> = result.matches.iter().map(|m| m.character_position).collect();
    let mut sorted = positions.clone();
    sorted.sort_unstable();
    assert_eq!(positions, sorted);
    assert_eq!(result.matches[0].match_type, MatchType::Partial);
    assert_eq!(result.matches.last().map(|m| m.match_type), Some(MatchType::Exact));
}

#[test]
fn line_numbers_and_char_positions() {
    let text = "First line\nSecond mentions Acme here\nCafé Acme";
    let result = analyze(text, "Acme");

    assert_eq!(result.total_matches, 2);
    assert_eq!(result.matches[0].line_number, 2);
    assert_eq!(result.matches[0].character_position, 27);
    // context is a plain character window and may cross line breaks
    assert_eq!(result.matches[0].context_before, "ine\nSecond mentions ");
    assert_eq!(result.matches[0].context_after, " here\nCafé Acme");
    assert_eq!(result.matches[1].line_number, 3);
    assert_eq!(
        result.matches[1].character_position,
        text.chars().count() - "Acme".len()
    );
}

#[test]
fn average_rounds_to_nearest() {
    // 100 + 85 = 92.5 -> 93
    let result = analyze("JPMorgan Chase and Chase", "JPMorgan Chase");
    assert_eq!(result.total_matches, 2);
    assert_eq!(result.average_confidence, 93);
}

#[test]
fn highest_confidence_prefers_earliest_on_tie() {
    let result = analyze("Acme here, Acme there", "Acme");
    assert_eq!(result.total_matches, 2);
    let best = result.highest_confidence_match.expect("best match");
    assert_eq!(best.character_position, 0);
}

#[test]
fn identical_inputs_give_identical_results() {
    let matcher = PresenceMatcher::default();
    let first = matcher.analyze(JPM_TEXT, "JPMorgan Chase");
    let second = matcher.analyze(JPM_TEXT, "JPMorgan Chase");
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).expect("serializes"),
        serde_json::to_string(&second).expect("serializes")
    );
}

#[test]
fn length_guard_truncates_on_char_boundary() {
    let cfg = MatchConfig {
        max_text_bytes: Some(12),
        ..MatchConfig::default()
    };
    let matcher = PresenceMatcher::new(cfg).expect("valid config");

    assert_eq!(matcher.analyze("0123456789 Acme", "Acme").total_matches, 0);
    assert_eq!(matcher.analyze("Acme 56789 Acme", "Acme").total_matches, 1);
    // 'é' occupies bytes 11..13; the cut moves back instead of panicking
    assert_eq!(matcher.analyze("Acme 567890é Acme", "Acme").total_matches, 1);
}

#[test]
fn context_width_follows_config() {
    let cfg = MatchConfig {
        context_chars: 4,
        ..MatchConfig::default()
    };
    let matcher = PresenceMatcher::new(cfg).expect("valid config");
    let result = matcher.analyze("Try the Acme widget today", "Acme");
    assert_eq!(result.matches[0].context_before, "the ");
    assert_eq!(result.matches[0].context_after, " wid");
}

#[test]
fn invalid_config_rejected_at_construction() {
    let cfg = MatchConfig {
        partial_min_confidence: 99,
        partial_max_confidence: 10,
        ..MatchConfig::default()
    };
    assert!(matches!(
        PresenceMatcher::new(cfg),
        Err(MatchError::InvalidConfig(_))
    ));
}

#[test]
fn batch_matches_sequential_results() {
    let pairs = vec![
        (JPM_TEXT.to_string(), "JPMorgan Chase".to_string()),
        ("Tesla leads in electric vehicles.".to_string(), "Tesla Inc".to_string()),
        (String::new(), "Acme".to_string()),
        ("Call Acme today.".to_string(), "Acme Rocket Co".to_string()),
    ];
    let matcher = PresenceMatcher::default();

    let batch = matcher.analyze_batch(&pairs);
    let sequential: Vec<AnalysisResult> = pairs
        .iter()
        .map(|(text, name)| matcher.analyze(text, name))
        .collect();

    assert_eq!(batch, sequential);
}

#[derive(Default)]
struct RecordingMetrics {
    calls: AtomicUsize,
    seen: Mutex<Vec<(String, usize)>>,
}

impl MatchMetrics for RecordingMetrics {
    fn record_analysis(&self, business_name: &str, _latency: Duration, result: &AnalysisResult) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen
            .lock()
            .unwrap()
            .push((business_name.to_string(), result.total_matches));
    }
}

#[test]
fn metrics_observer_sees_every_call() {
    let recorder = Arc::new(RecordingMetrics::default());
    let matcher = PresenceMatcher::default().with_metrics(recorder.clone());

    matcher.analyze(JPM_TEXT, "JPMorgan Chase");
    matcher.analyze("", "Acme");

    assert_eq!(recorder.calls.load(Ordering::SeqCst), 2);
    let seen = recorder.seen.lock().unwrap();
    assert_eq!(seen[0], ("JPMorgan Chase".to_string(), 3));
    assert_eq!(seen[1], ("Acme".to_string(), 0));
}

#[test]
fn pattern_builders_escape_input() {
    let pattern = literal_pattern("a.b").expect("compiles");
    assert!(pattern.is_match("A.B"));
    assert!(!pattern.is_match("axb"));

    let pattern = name_pattern("JPMorgan  Chase").expect("compiles");
    assert!(pattern.is_match("jpmorgan chase"));
    assert!(pattern.is_match("JPMorgan\n  Chase"));
    assert!(!pattern.is_match("JPMorganChase"));

    let pattern = word_pattern("Chase").expect("compiles");
    assert!(pattern.is_match("chase bank"));
    assert!(!pattern.is_match("purchased"));
}
