//! # Roudoku - Sentence-level TTS highlight timing for reader clients
//!
//! Roudoku estimates which sentence a text-to-speech engine is currently
//! speaking, so a manga/novel reader can highlight it without any
//! per-sentence TTS API calls. It splits paragraphs into speakable chunks,
//! predicts per-chunk durations from a words-per-minute rate, calibrates that
//! rate from observed paragraph timing, and corrects drift at paragraph
//! boundaries with a dynamic speed boost.
//!
//! The estimates are heuristic by design: there is no hard correctness
//! contract, no error state, and the worst case is visibly offset
//! highlighting that self-corrects at the next paragraph boundary.
//!
//! ## Features
//!
//! - **Sentence Splitting**: Coarse, CJK-aware splitting that keeps chunks
//!   readable and skips punctuation-only fragments
//! - **Duration Estimation**: Per-sentence estimates from WPM, speed, and
//!   trailing-punctuation pauses
//! - **Speed Calibration**: A rolling average over observed paragraph
//!   durations replaces the default WPM assumption
//! - **Drift Correction**: Paragraph-boundary signals adjust a bounded
//!   dynamic speed boost for subsequent paragraphs
//! - **Async Session Loop**: One cancellable tokio task per playback session,
//!   polling cooperatively and publishing positions over a watch channel
//! - **Tunable Profile**: Every heuristic constant exposed through
//!   [`TimingConfig`], serializable with serde
//!
//! ## Quick Start
//!
//! ### Pure estimation
//!
//! ```rust
//! use roudoku::prelude::*;
//!
//! let config = TimingConfig::default();
//!
//! let sentences = split_sentences("Hello world. How are you?");
//! assert_eq!(sentences.len(), 2);
//!
//! let timings = config.sentence_timings(&sentences, 1.0, None);
//! let index = sentence_index_at(800, &timings);
//! assert!(index <= 1);
//! ```
//!
//! ### Driving a session from a TTS player
//!
//! ```rust,no_run
//! use roudoku::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> roudoku::Result<()> {
//!     let session = HighlightSession::spawn(TimingConfig::default());
//!     let mut frames = session.frames();
//!
//!     // Wire the host's TTS callbacks to the session:
//!     session.set_paragraph(ParagraphContent::new("Hello world. How are you?"))?;
//!     session.set_playing(true)?;
//!     session.paragraph_started()?; // engine's "started speaking" callback
//!
//!     // Render layer: re-draw whenever the estimate moves
//!     while frames.changed().await.is_ok() {
//!         let frame = *frames.borrow();
//!         println!("highlight sentence {} of {}", frame.sentence, frame.total_sentences);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//!
//! - [`split`]: Sentence splitting and word counting
//! - [`timing`]: Duration estimation and the [`TimingConfig`] tuning profile
//! - [`calibrate`]: WPM calibration from observed paragraph timing
//! - [`tracker`]: The drift-correcting state machine (clock-agnostic, for
//!   hosts with their own timer)
//! - [`session`]: The tokio polling loop and host-facing handle
//! - [`error`]: Error handling at the session boundary
//!
//! ## Synchronous hosts
//!
//! UI frameworks with their own frame clock can skip the session task and
//! drive a [`Tracker`] directly:
//!
//! ```rust
//! use roudoku::prelude::*;
//!
//! let mut tracker = Tracker::new(TimingConfig::default());
//! tracker.set_content(&ParagraphContent::new("Hello world. How are you?"));
//! tracker.set_playing(true, 0);
//! tracker.paragraph_started(0);
//!
//! if let Some(index) = tracker.poll(100) {
//!     assert_eq!(index, 0);
//! }
//! ```

pub mod calibrate;
pub mod error;
pub mod session;
pub mod split;
pub mod timing;
pub mod tracker;
pub mod types;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions,
/// allowing you to import everything you need with a single
/// `use roudoku::prelude::*;` statement.
///
/// # Example
///
/// ```rust
/// use roudoku::prelude::*;
///
/// // Now you have access to:
/// // - split_sentences, word_count, Sentence, Paragraph
/// // - TimingConfig, TimingConfigBuilder, sentence_index_at
/// // - Calibration, calibrated_wpm
/// // - Tracker, HighlightSession
/// // - ParagraphContent, HighlightFrame, SessionStats
/// ```
pub mod prelude {
    pub use crate::{
        calibrate::{Calibration, calibrated_wpm},
        session::HighlightSession,
        split::{Paragraph, Sentence, split_sentences, word_count},
        timing::{TimingConfig, TimingConfigBuilder, sentence_index_at},
        tracker::Tracker,
        types::{HighlightFrame, ParagraphContent, SessionStats},
    };
}

// Re-export main types at crate root for direct access
pub use calibrate::{Calibration, calibrated_wpm};
pub use error::{Error, Result};
pub use session::HighlightSession;
pub use split::{Paragraph, Sentence, split_sentences, word_count};
pub use timing::{TimingConfig, TimingConfigBuilder, sentence_index_at};
pub use tracker::Tracker;
pub use types::{HighlightFrame, ParagraphContent, SessionStats};
