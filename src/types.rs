//! Core data types exchanged with the host TTS player and rendering layer.
//!
//! This module defines the data structures crossing the session boundary:
//!
//! - [`ParagraphContent`] - Inbound paragraph text with its optional translation
//! - [`HighlightFrame`] - Outbound sentence position for the rendering layer
//! - [`SessionStats`] - Calibration/boost snapshot for debugging overlays
//!
//! # Examples
//!
//! ```rust
//! use roudoku::types::ParagraphContent;
//!
//! let content = ParagraphContent::new("Hello world. How are you?")
//!     .with_translation("こんにちは世界。お元気ですか？");
//!
//! // The spoken text follows the show-translation flag
//! assert_eq!(content.active_text(), "Hello world. How are you?");
//! ```

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Paragraph text as supplied by the host, with its optional translated
/// variant.
///
/// In bilingual display modes the host renders both variants, but the TTS
/// engine only speaks one of them; [`active_text`](ParagraphContent::active_text)
/// picks the variant that timing estimates must be based on.
///
/// # Builder Usage
///
/// The `derive_builder` crate generates a [`ParagraphContentBuilder`] for
/// hosts that assemble content from several settings:
///
/// ```rust
/// use roudoku::types::ParagraphContentBuilder;
///
/// let content = ParagraphContentBuilder::default()
///     .text("Hello world.".to_string())
///     .translated(Some("こんにちは世界。".to_string()))
///     .show_translation(true)
///     .build()
///     .unwrap();
///
/// assert_eq!(content.active_text(), "こんにちは世界。");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Builder, Serialize, Deserialize)]
#[builder(setter(into), default)]
pub struct ParagraphContent {
    /// Original paragraph text.
    pub text: String,

    /// Translated variant, when a translation is available.
    pub translated: Option<String>,

    /// Whether the TTS engine is reading the translated variant.
    pub show_translation: bool,
}

impl ParagraphContent {
    /// Creates paragraph content from original text only.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use roudoku::types::ParagraphContent;
    ///
    /// let content = ParagraphContent::new("Hello world.");
    /// assert_eq!(content.active_text(), "Hello world.");
    /// ```
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            translated: None,
            show_translation: false,
        }
    }

    /// Attaches a translated variant.
    pub fn with_translation(mut self, translated: impl Into<String>) -> Self {
        self.translated = Some(translated.into());
        self
    }

    /// Marks the translated variant as the one being spoken.
    pub fn showing_translation(mut self, show: bool) -> Self {
        self.show_translation = show;
        self
    }

    /// The text variant the TTS engine actually speaks.
    ///
    /// Falls back to the original text when the translation is requested but
    /// missing.
    pub fn active_text(&self) -> &str {
        match (&self.translated, self.show_translation) {
            (Some(translated), true) => translated,
            _ => &self.text,
        }
    }
}

impl From<String> for ParagraphContent {
    fn from(text: String) -> Self {
        ParagraphContent::new(text)
    }
}

impl From<&str> for ParagraphContent {
    fn from(text: &str) -> Self {
        ParagraphContent::new(text)
    }
}

/// The estimated playback position published to the rendering layer.
///
/// A frame names the paragraph the host is reading and the sentence within
/// it that should carry visual emphasis. The sentence index is always within
/// the bounds of the paragraph's sentence list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightFrame {
    /// The host's authoritative paragraph index.
    pub paragraph: usize,

    /// Estimated index of the sentence currently being spoken.
    pub sentence: usize,

    /// Sentence count of the current paragraph; 0 when there is nothing to
    /// highlight.
    pub total_sentences: usize,
}

/// Snapshot of the session's adaptive state.
///
/// Written only by the session task after paragraph boundaries; read by
/// hosts for settings screens and debugging overlays.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    /// Words-per-minute rate learned from observed paragraph timing,
    /// normalized to 1.0x speed. `None` until the first usable measurement.
    pub calibrated_wpm: Option<f32>,

    /// Current dynamic speed-boost multiplier, within `[1.0, 1.3]`.
    pub speed_boost: f32,

    /// Whether at least one calibration measurement has been accepted.
    pub is_calibrated: bool,
}

impl Default for SessionStats {
    fn default() -> Self {
        Self {
            calibrated_wpm: None,
            speed_boost: 1.0,
            is_calibrated: false,
        }
    }
}
