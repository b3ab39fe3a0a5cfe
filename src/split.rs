//! Sentence splitting and word counting for spoken paragraph text.
//!
//! A paragraph handed to a TTS engine is spoken as one unit, but highlighted
//! one sentence at a time. This module breaks a paragraph into speakable
//! sentence-sized chunks and counts the words the engine will actually
//! pronounce, which is what the duration estimates in [`crate::timing`] are
//! based on.
//!
//! Splitting is intentionally coarse: it only cuts after sentence-ending
//! punctuation (Latin and CJK), and only falls back to comma boundaries for
//! very long sentences, so the highlighted chunks stay large enough to read
//! naturally.
//!
//! # Examples
//!
//! ```rust
//! use roudoku::split::split_sentences;
//!
//! let sentences = split_sentences("Hello world. How are you?");
//! assert_eq!(sentences.len(), 2);
//! assert_eq!(sentences[0].text, "Hello world.");
//! assert_eq!(sentences[1].text, "How are you?");
//! assert_eq!(sentences[0].words, 2);
//! ```

/// Punctuation that ends a sentence; splitting happens immediately after
/// these characters.
pub(crate) const SENTENCE_ENDINGS: &[char] = &['.', '!', '?', '。', '！', '？', ';', '；'];

/// Punctuation that ends a clause; used to re-split overly long sentences.
pub(crate) const CLAUSE_ENDINGS: &[char] = &[',', '，'];

/// Mid-sentence punctuation, recognized when classifying trailing pauses.
pub(crate) const MID_SENTENCE_PUNCTUATION: &[char] = &[',', '，', ';', '；', ':', '：'];

/// Maximum words per sentence before splitting on clause boundaries.
const MAX_WORDS_PER_SENTENCE: usize = 50;

/// A speakable fragment of a paragraph with its derived word count.
///
/// Sentences are immutable once produced by [`split_sentences`]; the word
/// count is computed at construction with the same counting rule used by
/// the duration estimator.
///
/// # Examples
///
/// ```rust
/// use roudoku::split::Sentence;
///
/// let sentence = Sentence::new("Hello world.");
/// assert_eq!(sentence.text, "Hello world.");
/// assert_eq!(sentence.words, 2);
///
/// // Pure punctuation carries no words
/// let silent = Sentence::new("...!!!");
/// assert_eq!(silent.words, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    /// The trimmed fragment text, trailing punctuation included.
    pub text: String,

    /// Number of speakable words in the fragment.
    pub words: usize,
}

impl Sentence {
    /// Creates a sentence from a text fragment, deriving its word count.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let words = word_count(&text);
        Self { text, words }
    }
}

/// An ordered sequence of sentences plus the raw paragraph text it came from.
///
/// This is the unit a TTS engine is asked to speak in one call. Paragraphs
/// are derived on demand from the current paragraph text and never persisted.
///
/// # Examples
///
/// ```rust
/// use roudoku::split::Paragraph;
///
/// let paragraph = Paragraph::parse("Hello world. How are you?");
/// assert_eq!(paragraph.sentences.len(), 2);
/// assert_eq!(paragraph.words(), 5);
/// assert!(!paragraph.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    /// The raw source text as handed to the TTS engine.
    pub raw: String,

    /// The sentences derived from the raw text.
    pub sentences: Vec<Sentence>,
}

impl Paragraph {
    /// Splits paragraph text into its sentence sequence.
    pub fn parse(text: &str) -> Self {
        Self {
            raw: text.to_string(),
            sentences: split_sentences(text),
        }
    }

    /// Total speakable words across all sentences.
    pub fn words(&self) -> usize {
        self.sentences.iter().map(|s| s.words).sum()
    }

    /// Returns `true` when there is nothing to highlight (blank source text).
    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Index of the final sentence, or 0 for an empty paragraph.
    pub fn last_index(&self) -> usize {
        self.sentences.len().saturating_sub(1)
    }
}

/// Returns `true` for characters a TTS engine would pronounce.
///
/// Covers Unicode letters plus the CJK unified ideograph range
/// (U+4E00..U+9FFF) and the hiragana/katakana range (U+3040..U+30FF).
fn is_speakable_char(c: char) -> bool {
    c.is_alphabetic() || matches!(c, '\u{4E00}'..='\u{9FFF}' | '\u{3040}'..='\u{30FF}')
}

/// Returns `true` if the fragment contains at least one speakable character.
///
/// Punctuation-only fragments are presumed skipped by TTS engines and are
/// dropped from splitter output.
fn is_speakable(text: &str) -> bool {
    text.chars().any(is_speakable_char)
}

/// Counts the words a TTS engine would speak in the given text.
///
/// A whitespace-delimited run counts as a word only if it contains at least
/// one speakable character, so runs of bare punctuation contribute nothing.
///
/// # Examples
///
/// ```rust
/// use roudoku::split::word_count;
///
/// assert_eq!(word_count("Hello world."), 2);
/// assert_eq!(word_count("... --- !!!"), 0);
/// assert_eq!(word_count("今日は いい天気"), 2);
/// assert_eq!(word_count(""), 0);
/// ```
pub fn word_count(text: &str) -> usize {
    text.split_whitespace()
        .filter(|run| is_speakable(run))
        .count()
}

/// Splits text into pieces that each end right after a boundary character.
///
/// The final piece keeps any trailing text that has no boundary after it.
fn split_after(text: &str, boundaries: &[char]) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        current.push(ch);
        if boundaries.contains(&ch) {
            pieces.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        pieces.push(current);
    }

    pieces
}

/// Trims pieces and drops the ones a TTS engine would skip.
fn speakable_pieces(pieces: Vec<String>) -> Vec<Sentence> {
    pieces
        .iter()
        .map(|piece| piece.trim())
        .filter(|piece| !piece.is_empty() && is_speakable(piece))
        .map(Sentence::new)
        .collect()
}

/// Splits a paragraph into speakable sentence-sized chunks.
///
/// Text is cut after sentence-ending punctuation (`. ! ? 。 ！ ？ ; ；`);
/// pieces that are blank or contain no speakable character are discarded.
/// Pieces longer than 50 words are re-split on clause boundaries (`, ，`),
/// keeping the original piece whole if no clause survives the same filter.
///
/// Non-blank input never produces an empty result: when every piece is
/// filtered out (a paragraph of pure punctuation), the whole trimmed text is
/// kept as a single sentence so the caller still has something to highlight.
/// Blank input yields an empty vector, which the caller must treat as
/// "nothing to highlight" rather than an error.
///
/// # Examples
///
/// ```rust
/// use roudoku::split::split_sentences;
///
/// let sentences = split_sentences("Hello world. How are you?");
/// assert_eq!(sentences.len(), 2);
///
/// // Pure punctuation falls back to one chunk
/// let fallback = split_sentences("...!!!");
/// assert_eq!(fallback.len(), 1);
/// assert_eq!(fallback[0].text, "...!!!");
///
/// // Blank input means nothing to highlight
/// assert!(split_sentences("   ").is_empty());
/// ```
pub fn split_sentences(text: &str) -> Vec<Sentence> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let pieces = speakable_pieces(split_after(trimmed, SENTENCE_ENDINGS));

    let mut result = Vec::with_capacity(pieces.len());
    for sentence in pieces {
        if sentence.words > MAX_WORDS_PER_SENTENCE {
            let clauses = speakable_pieces(split_after(&sentence.text, CLAUSE_ENDINGS));
            if clauses.len() > 1 {
                result.extend(clauses);
            } else {
                result.push(sentence);
            }
        } else {
            result.push(sentence);
        }
    }

    if result.is_empty() {
        // Whole-text fallback keeps non-blank input highlightable even when
        // no letter-bearing piece survived the punctuation filter.
        return vec![Sentence::new(trimmed)];
    }

    result
}
