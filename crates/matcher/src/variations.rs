//! Derived forms of a business name: fuzzy variations and meaningful words.
//!
//! Variations feed the fuzzy pass ("McDonald's Corporation" → "McDonald's",
//! "Acme Rocket" → "AcmeRocket", ...). Meaningful words feed the partial
//! pass: the distinctive, brand-bearing tokens left after generic words are
//! removed.

use canonical::{collapse_whitespace, fold_case, join_segments, tokenize};
use once_cell::sync::Lazy;
use regex::Regex;

/// Generic words that never identify a business on their own.
pub const STOPWORDS: [&str; 35] = [
    "the", "and", "a", "an", "of", "in", "on", "at", "to", "for", "with", "by", "from", "bank",
    "company", "corporation", "inc", "llc", "group", "services", "systems", "solutions",
    "business", "enterprise", "enterprises", "international", "global", "co", "corp", "ltd",
    "limited", "usa", "america", "united", "states",
];

/// Tokens shorter than this are never meaningful.
const MIN_WORD_CHARS: usize = 3;

static CORPORATE_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)[\s,]+(?:inc|llc|corp|corporation|company|co|ltd|limited|group|services|systems|solutions)\.?$",
    )
    .expect("corporate suffix pattern is valid")
});

static CAMEL_CASE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Z][a-z]+[A-Z]").expect("camel case pattern is valid"));

static ACRONYM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{2,}$").expect("acronym pattern is valid"));

/// The name with one trailing corporate suffix removed, or `None` when the
/// name carries no suffix (or is nothing but one).
///
/// ```
/// use matcher::strip_corporate_suffix;
///
/// assert_eq!(strip_corporate_suffix("Tesla Inc").as_deref(), Some("Tesla"));
/// assert_eq!(strip_corporate_suffix("Acme, Co.").as_deref(), Some("Acme"));
/// assert_eq!(strip_corporate_suffix("JPMorgan Chase"), None);
/// ```
pub fn strip_corporate_suffix(name: &str) -> Option<String> {
    let name = name.trim();
    let stripped = CORPORATE_SUFFIX.replace(name, "");
    let stripped = stripped.trim();
    if stripped.is_empty() || stripped == name {
        None
    } else {
        Some(stripped.to_string())
    }
}

fn is_stopword(token: &str) -> bool {
    let bare = token.trim_end_matches(['.', ',']);
    STOPWORDS.contains(&bare)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Distinctive words of a business name, first letter capitalized.
///
/// Lowercases the name, splits on whitespace, then drops tokens shorter than
/// three characters, generic stopwords and pure numbers. Duplicates keep
/// their first occurrence.
pub fn meaningful_words(name: &str) -> Vec<String> {
    let folded = fold_case(name);
    let mut words: Vec<String> = Vec::new();

    for token in tokenize(&folded) {
        let text = token.text.as_str();
        if token.char_len() < MIN_WORD_CHARS
            || is_stopword(text)
            || text.chars().all(char::is_numeric)
        {
            continue;
        }
        let word = capitalize(text);
        if !words.contains(&word) {
            words.push(word);
        }
    }

    words
}

/// Name variations scanned by the fuzzy pass, in scan order.
///
/// - the name with its corporate suffix stripped
/// - the name with whitespace removed, replaced by `-`, replaced by `_`
/// - for two-word names, each word that is neither a meaningful word nor a
///   generic stopword (meaningful words are left to the partial pass, which
///   scores them as brand fragments)
///
/// Single words that are meaningful are never fuzzy variations: the partial
/// pass claims them, so "Chase" in "JPMorgan Chase" scores as a brand
/// fragment rather than a near-name.
///
/// Variations shorter than `min_len` characters, duplicates and forms equal
/// to the name itself are dropped.
pub fn name_variations(name: &str, min_len: usize) -> Vec<String> {
    let name = collapse_whitespace(name);
    let folded_name = fold_case(&name);
    let mut raw: Vec<String> = Vec::with_capacity(6);

    if let Some(stripped) = strip_corporate_suffix(&name) {
        raw.push(stripped);
    }
    for separator in ["", "-", "_"] {
        raw.push(join_segments(&name, separator));
    }

    let words: Vec<&str> = name.split(' ').collect();
    if words.len() == 2 {
        let meaningful: Vec<String> = meaningful_words(&name)
            .iter()
            .map(|w| fold_case(w))
            .collect();
        for word in words {
            let folded = fold_case(word);
            if !meaningful.contains(&folded) && !is_stopword(&folded) {
                raw.push(word.to_string());
            }
        }
    }

    let mut seen: Vec<String> = vec![folded_name];
    let mut variations = Vec::with_capacity(raw.len());
    for variation in raw {
        if variation.chars().count() < min_len {
            continue;
        }
        let folded = fold_case(&variation);
        if seen.contains(&folded) {
            continue;
        }
        seen.push(folded);
        variations.push(variation);
    }
    variations
}

/// Whether a word reads like a brand rather than a dictionary word:
/// at least five characters, CamelCase, an apostrophe, or an all-caps acronym.
pub fn looks_like_brand(word: &str) -> bool {
    word.chars().count() >= 5
        || CAMEL_CASE.is_match(word)
        || word.contains('\'')
        || word.contains('\u{2019}')
        || ACRONYM.is_match(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_stripping() {
        assert_eq!(
            strip_corporate_suffix("McDonald's Corporation").as_deref(),
            Some("McDonald's")
        );
        assert_eq!(strip_corporate_suffix("Acme LLC.").as_deref(), Some("Acme"));
        assert_eq!(
            strip_corporate_suffix("Acme Rocket Co").as_deref(),
            Some("Acme Rocket")
        );
        assert_eq!(
            strip_corporate_suffix("Bluewave SOLUTIONS").as_deref(),
            Some("Bluewave")
        );
        // suffix must be a separate trailing word
        assert_eq!(strip_corporate_suffix("Costco"), None);
        assert_eq!(strip_corporate_suffix("Inc"), None);
    }

    #[test]
    fn meaningful_words_drop_generic_tokens() {
        assert_eq!(meaningful_words("JPMorgan Chase"), vec!["Jpmorgan", "Chase"]);
        assert_eq!(meaningful_words("Tesla Inc"), vec!["Tesla"]);
        assert_eq!(
            meaningful_words("The Bank of America Corp."),
            Vec::<String>::new()
        );
        assert_eq!(meaningful_words("Studio 54 NYC"), vec!["Studio", "Nyc"]);
        assert_eq!(meaningful_words("Acme Acme Rocket Co"), vec!["Acme", "Rocket"]);
        assert_eq!(meaningful_words("McDonald's Corporation"), vec!["Mcdonald's"]);
    }

    #[test]
    fn variations_for_multi_word_name() {
        let variations = name_variations("Acme Rocket Co", 3);
        assert_eq!(
            variations,
            vec!["Acme Rocket", "AcmeRocketCo", "Acme-Rocket-Co", "Acme_Rocket_Co"]
        );
    }

    #[test]
    fn two_word_names_leave_brand_words_to_partial_pass() {
        let variations = name_variations("McDonald's Corporation", 3);
        assert_eq!(
            variations,
            vec![
                "McDonald's",
                "McDonald'sCorporation",
                "McDonald's-Corporation",
                "McDonald's_Corporation",
            ]
        );

        let variations = name_variations("Studio 545", 3);
        assert!(variations.contains(&"545".to_string()));
        assert!(!variations.contains(&"Studio".to_string()));

        let variations = name_variations("JPMorgan Chase", 3);
        assert_eq!(
            variations,
            vec!["JPMorganChase", "JPMorgan-Chase", "JPMorgan_Chase"]
        );
    }

    #[test]
    fn short_and_duplicate_variations_dropped() {
        assert_eq!(name_variations("Tesla", 3), Vec::<String>::new());
        assert_eq!(
            name_variations("Tesla Inc", 3),
            vec!["Tesla", "TeslaInc", "Tesla-Inc", "Tesla_Inc"]
        );
        let variations = name_variations("AB Co", 3);
        assert!(variations.iter().all(|v| v.chars().count() >= 3));
        assert!(!variations.contains(&"AB".to_string()));
    }

    #[test]
    fn brand_shape_detection() {
        assert!(looks_like_brand("Chase"));
        assert!(looks_like_brand("eBay's"));
        assert!(looks_like_brand("IBM"));
        assert!(looks_like_brand("HubSpot"));
        assert!(!looks_like_brand("Acme"));
        assert!(!looks_like_brand("Ibm"));
    }
}
