//! Edit-distance similarity used by the fuzzy and partial scores.

use canonical::fold_case;

/// `1 - levenshtein(a, b) / max(len(a), len(b))`, case-insensitive, in [0, 1].
///
/// Lengths are counted in characters. Two empty strings are identical.
/// The distance table only ever spans a name against a candidate, never the
/// whole analyzed text.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = fold_case(a);
    let b = fold_case(b);
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 1.0;
    }
    let distance = strsim::levenshtein(&a, &b);
    1.0 - distance as f64 / longest as f64
}

/// [`similarity`] scaled to a rounded 0..=100 score.
pub fn similarity_score(a: &str, b: &str) -> u8 {
    (similarity(a, b) * 100.0).round().clamp(0.0, 100.0) as u8
}
