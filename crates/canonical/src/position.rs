//! Position bookkeeping for matches found in a source text.
//!
//! Scanners work in UTF-8 byte offsets because that is what `regex` hands
//! back. Callers see character offsets, 1-based line numbers and short
//! context snippets, all derived here from the same byte span.

/// Number of characters (Unicode scalar values) before `byte` in `text`.
///
/// `byte` must sit on a char boundary; offsets past the end clamp to the
/// character length of `text`.
pub fn char_offset(text: &str, byte: usize) -> usize {
    let byte = byte.min(text.len());
    text[..byte].chars().count()
}

/// 1-based line number of the line containing `byte`.
///
/// Lines are `\n`-delimited; a `\r\n` pair counts once.
pub fn line_number_at(text: &str, byte: usize) -> usize {
    LineIndex::new(text).line_of(byte)
}

/// Precomputed newline positions for repeated line lookups over one text.
#[derive(Debug, Clone)]
pub struct LineIndex {
    newlines: Vec<usize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let newlines = text
            .bytes()
            .enumerate()
            .filter_map(|(idx, b)| (b == b'\n').then_some(idx))
            .collect();
        Self { newlines }
    }

    /// 1-based line number for a byte offset.
    pub fn line_of(&self, byte: usize) -> usize {
        // Count of newlines strictly before `byte`.
        self.newlines.partition_point(|&nl| nl < byte) + 1
    }

    pub fn line_count(&self) -> usize {
        self.newlines.len() + 1
    }
}

/// Up to `chars` characters on each side of the byte span `start..end`,
/// clipped at the text boundaries.
pub fn context_window(text: &str, start: usize, end: usize, chars: usize) -> (String, String) {
    let start = start.min(text.len());
    let end = end.clamp(start, text.len());

    let head = &text[..start];
    let before_start = head
        .char_indices()
        .rev()
        .nth(chars.saturating_sub(1))
        .map(|(idx, _)| idx)
        .unwrap_or(0);
    let before = if chars == 0 {
        String::new()
    } else {
        head[before_start..].to_string()
    };

    let after: String = text[end..].chars().take(chars).collect();
    (before, after)
}
