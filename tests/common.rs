//! Common test utilities and constants
//!
//! Shared sample paragraphs and helpers used across all test modules.

use roudoku::prelude::*;

#[allow(dead_code)]
pub const TWO_SENTENCES: &str = "Hello world. How are you?";
#[allow(dead_code)]
pub const PUNCTUATION_ONLY: &str = "...!!!";
#[allow(dead_code)]
pub const CJK_TWO_SENTENCES: &str = "今日はいい天気です。散歩に行きましょう。";
#[allow(dead_code)]
pub const MIXED_PARAGRAPH: &str =
    "The rain had stopped by morning. Outside, the street was still wet; \
     a cat picked its way between puddles. Nobody else was awake.";

/// Builds a sentence that is `words` words long, optionally with a comma
/// boundary at the halfway point, ending with a period.
#[allow(dead_code)]
pub fn long_sentence(words: usize, with_comma: bool) -> String {
    let half = words / 2;
    let mut out = String::new();
    for i in 0..words {
        if i > 0 {
            out.push(' ');
        }
        out.push_str("lorem");
        if with_comma && i + 1 == half {
            out.push(',');
        }
    }
    out.push('.');
    out
}

/// A paragraph of `count` copies of the same short sentence.
#[allow(dead_code)]
pub fn uniform_sentences(count: usize, text: &str) -> Vec<Sentence> {
    (0..count).map(|_| Sentence::new(text)).collect()
}
