//! Text helpers for the presence matcher.
//!
//! Everything the matcher needs to know about a string that is not matching
//! logic lives here: whitespace collapsing, whitespace tokenization with byte
//! offsets, locale-free case folding, and mapping byte spans back to the
//! character offsets, line numbers and context snippets reported to callers.
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock calls, no OS/locale dependence. Same input, same output.
//!
//! ## Invariants worth knowing
//!
//! - Input is trusted UTF-8; callers reject malformed bytes before we see them
//! - Byte offsets handed in must sit on char boundaries
//! - No Unicode normalization beyond lowercasing

mod position;
mod token;
mod whitespace;

pub use crate::position::{char_offset, context_window, line_number_at, LineIndex};
pub use crate::token::{tokenize, Token};
pub use crate::whitespace::{collapse_whitespace, eq_folded, fold_case, join_segments};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_of_collapsed_name_line_up() {
        let name = collapse_whitespace("  JPMorgan   Chase ");
        let tokens = tokenize(&name);
        assert_eq!(name, "JPMorgan Chase");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].start, "JPMorgan ".len());
    }

    #[test]
    fn span_bookkeeping_agrees() {
        let text = "Intro line.\nWe like Café Acme here.";
        let start = text.find("Acme").unwrap();
        let end = start + "Acme".len();

        assert_eq!(line_number_at(text, start), 2);
        assert_eq!(char_offset(text, start), text[..start].chars().count());
        let (before, after) = context_window(text, start, end, 5);
        assert_eq!(before, "Café ");
        assert_eq!(after, " here");
    }
}
