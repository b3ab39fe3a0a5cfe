//! Duration estimation and the timing configuration profile.
//!
//! Highlighting is driven entirely by wall-clock estimates: given a sentence,
//! a speech-speed multiplier, and a words-per-minute rate, this module
//! predicts how long the TTS engine will take to speak it. The predictions
//! are heuristic; they are corrected at paragraph boundaries by
//! [`crate::calibrate`] and [`crate::tracker`], never trusted as ground
//! truth.
//!
//! All the tuning knobs live in [`TimingConfig`]. The defaults match the
//! values the estimator ships with; hosts that want to tune for a specific
//! TTS engine can build a custom profile with [`TimingConfigBuilder`] and
//! persist it with serde.
//!
//! # Examples
//!
//! ```rust
//! use roudoku::prelude::*;
//!
//! let config = TimingConfig::default();
//! let sentences = split_sentences("Hello world. How are you?");
//!
//! // Per-sentence estimate at 1.0x speed, no calibration yet
//! let ms = config.estimate_duration(&sentences[0], 1.0, None);
//! assert!(ms > 0);
//!
//! // Cumulative end-times map elapsed time to a sentence index
//! let timings = config.sentence_timings(&sentences, 1.0, None);
//! assert_eq!(timings.len(), 2);
//! assert!(timings[0] < timings[1]);
//! ```

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::split::{MID_SENTENCE_PUNCTUATION, SENTENCE_ENDINGS, Sentence};

/// Tuning profile for the sentence timing estimator.
///
/// Every constant the estimator relies on is exposed here so hosts can adapt
/// to a specific TTS engine. The defaults are the values the estimator was
/// tuned with; [`Default`] and `#[serde(default)]` both produce them, so a
/// partially specified config file fills the gaps with defaults.
///
/// # Builder Usage
///
/// ```rust
/// use roudoku::timing::TimingConfigBuilder;
///
/// let config = TimingConfigBuilder::default()
///     .default_wpm(180.0f32)
///     .poll_interval_ms(50u64)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.default_wpm, 180.0);
/// // Unset fields keep their defaults
/// assert_eq!(config.lead_factor, 1.08);
/// ```
///
/// # Validation
///
/// [`TimingConfigBuilder::build`] rejects values the estimator cannot work
/// with (non-positive WPM or speed lead, a zero poll interval, a boost cap
/// below 1.0).
#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
#[builder(setter(into), default, build_fn(validate = "Self::validate"))]
#[serde(default)]
pub struct TimingConfig {
    /// Assumed words-per-minute rate at 1.0x speed before calibration.
    pub default_wpm: f32,

    /// Fixed multiplier keeping the highlighter slightly ahead of the audio,
    /// compensating for systematic underestimation.
    pub lead_factor: f32,

    /// Upper bound for the dynamic speed-boost multiplier.
    pub max_speed_boost: f32,

    /// Boost multiplier applied when the estimator lagged a paragraph.
    pub boost_raise: f32,

    /// Boost multiplier applied when the estimator kept pace or led.
    pub boost_decay: f32,

    /// Polling cadence of the highlight loop.
    pub poll_interval_ms: u64,

    /// Paragraph progress above which the catch-up correction may fire.
    pub catchup_progress_threshold: f32,

    /// Shown-sentence fraction below which the catch-up correction fires.
    pub catchup_shown_threshold: f32,

    /// Progress gain applied by the catch-up correction.
    pub catchup_gain: f32,

    /// Pause after sentence-ending punctuation, in milliseconds at 1.0x.
    pub sentence_pause_ms: f32,

    /// Pause after mid-sentence punctuation, in milliseconds at 1.0x.
    pub clause_pause_ms: f32,

    /// Pause after anything else, in milliseconds at 1.0x.
    pub word_pause_ms: f32,

    /// Minimum expected paragraph duration for short paragraphs.
    pub min_duration_short_ms: u64,

    /// Minimum expected paragraph duration for regular paragraphs.
    pub min_duration_ms: u64,

    /// Maximum expected paragraph duration.
    pub max_duration_ms: u64,

    /// Word count below which a paragraph counts as short.
    pub short_paragraph_words: usize,

    /// Number of recent measurements the calibration average keeps.
    pub calibration_window: usize,

    /// Observed paragraph durations at or below this are rejected as noise.
    pub calibration_min_duration_ms: u64,

    /// Observed paragraph durations at or above this are rejected as stalls.
    pub calibration_max_duration_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            default_wpm: 200.0,
            lead_factor: 1.08,
            max_speed_boost: 1.3,
            boost_raise: 1.1,
            boost_decay: 0.95,
            poll_interval_ms: 60,
            catchup_progress_threshold: 0.7,
            catchup_shown_threshold: 0.6,
            catchup_gain: 1.15,
            sentence_pause_ms: 12.0,
            clause_pause_ms: 5.0,
            word_pause_ms: 2.0,
            min_duration_short_ms: 400,
            min_duration_ms: 600,
            max_duration_ms: 120_000,
            short_paragraph_words: 10,
            calibration_window: 3,
            calibration_min_duration_ms: 300,
            calibration_max_duration_ms: 60_000,
        }
    }
}

impl TimingConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(wpm) = self.default_wpm {
            if !(wpm > 0.0) {
                return Err(format!("default_wpm must be positive, got {}", wpm));
            }
        }
        if let Some(lead) = self.lead_factor {
            if !(lead > 0.0) {
                return Err(format!("lead_factor must be positive, got {}", lead));
            }
        }
        if let Some(boost) = self.max_speed_boost {
            if boost < 1.0 {
                return Err(format!("max_speed_boost must be at least 1.0, got {}", boost));
            }
        }
        if let Some(0) = self.poll_interval_ms {
            return Err("poll_interval_ms must be non-zero".to_string());
        }
        Ok(())
    }
}

impl TimingConfig {
    /// The words-per-minute rate the estimator works with after applying the
    /// speed multiplier, the fixed lead factor, and the dynamic boost.
    ///
    /// Falls back to [`default_wpm`](TimingConfig::default_wpm) when no
    /// calibrated rate is available yet. Never returns a rate below 1.0, so
    /// durations stay finite for any input.
    pub fn effective_wpm(&self, speed: f32, calibrated: Option<f32>, boost: f32) -> f32 {
        let base = calibrated.unwrap_or(self.default_wpm);
        (base * speed.max(0.01) * self.lead_factor * boost).max(1.0)
    }

    /// Estimates how long the TTS engine takes to speak one sentence, in
    /// milliseconds.
    ///
    /// The estimate is `(words / effective_wpm) * 60000` with the word count
    /// floored at 1, plus a trailing pause classified by the sentence's final
    /// character (full stops > mid-sentence punctuation > anything else;
    /// semicolons pause like clause breaks even though they split sentences),
    /// scaled by `1/speed` and floored at 1ms.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use roudoku::prelude::*;
    ///
    /// let config = TimingConfig::default();
    /// let sentence = Sentence::new("Hello world");
    ///
    /// // 2 words at 200 WPM * 1.08 lead ≈ 555.6ms, plus a 2ms default pause
    /// let ms = config.estimate_duration(&sentence, 1.0, None);
    /// assert!((556..=558).contains(&ms));
    /// ```
    pub fn estimate_duration(&self, sentence: &Sentence, speed: f32, calibrated: Option<f32>) -> u64 {
        self.duration_ms(sentence, speed, calibrated, 1.0) as u64
    }

    /// Cumulative end-times for a sentence sequence, in milliseconds.
    ///
    /// The returned vector has one entry per sentence: the running sum of
    /// [`estimate_duration`](TimingConfig::estimate_duration) in order. An
    /// elapsed-time value maps to a sentence index with [`sentence_index_at`].
    pub fn sentence_timings(
        &self,
        sentences: &[Sentence],
        speed: f32,
        calibrated: Option<f32>,
    ) -> Vec<u64> {
        self.timings_with_boost(sentences, speed, calibrated, 1.0)
    }

    /// Expected duration of a whole paragraph, clamped to sane bounds.
    ///
    /// The raw estimate is the sum of per-sentence durations; the result is
    /// clamped to `[min, max_duration_ms]` where the minimum is
    /// [`min_duration_short_ms`](TimingConfig::min_duration_short_ms) for
    /// paragraphs shorter than
    /// [`short_paragraph_words`](TimingConfig::short_paragraph_words) words
    /// and [`min_duration_ms`](TimingConfig::min_duration_ms) otherwise.
    pub fn expected_paragraph_duration(
        &self,
        sentences: &[Sentence],
        speed: f32,
        calibrated: Option<f32>,
        boost: f32,
    ) -> u64 {
        let total = self
            .timings_with_boost(sentences, speed, calibrated, boost)
            .last()
            .copied()
            .unwrap_or(0);
        let words: usize = sentences.iter().map(|s| s.words).sum();
        self.clamp_expected(total, words)
    }

    /// Maps elapsed playback time to the sentence that should be highlighted.
    ///
    /// This is the polling math of the highlight loop: progress through the
    /// paragraph's expected duration is clamped to `[0, 0.999]`, the
    /// catch-up correction bumps it by
    /// [`catchup_gain`](TimingConfig::catchup_gain) when the estimator is
    /// far behind the clock but has shown few sentences, and the corrected
    /// progress is mapped through the cumulative timings with a
    /// first-exceeds lookup.
    ///
    /// `shown_index` is the sentence currently highlighted; it only feeds the
    /// catch-up heuristic. The result is always within
    /// `[0, sentences.len() - 1]`, even when the elapsed time exceeds every
    /// cumulative value. Empty input yields 0.
    pub fn position_at(
        &self,
        elapsed_ms: u64,
        sentences: &[Sentence],
        speed: f32,
        calibrated: Option<f32>,
        boost: f32,
        shown_index: usize,
    ) -> usize {
        if sentences.is_empty() {
            return 0;
        }

        let timings = self.timings_with_boost(sentences, speed, calibrated, boost);
        let total = timings.last().copied().unwrap_or(0).max(1);
        let words: usize = sentences.iter().map(|s| s.words).sum();
        let expected = self.clamp_expected(total, words).max(1);

        let mut progress = (elapsed_ms as f32 / expected as f32).clamp(0.0, 0.999);

        let shown_fraction = (shown_index + 1) as f32 / sentences.len() as f32;
        if progress > self.catchup_progress_threshold && shown_fraction < self.catchup_shown_threshold
        {
            progress = (progress * self.catchup_gain).min(0.999);
        }

        sentence_index_at((progress * total as f32) as u64, &timings)
    }

    fn duration_ms(&self, sentence: &Sentence, speed: f32, calibrated: Option<f32>, boost: f32) -> f32 {
        let wpm = self.effective_wpm(speed, calibrated, boost);
        let words = sentence.words.max(1) as f32;
        let base = (words / wpm) * 60_000.0;
        base + self.trailing_pause_ms(&sentence.text, speed)
    }

    fn timings_with_boost(
        &self,
        sentences: &[Sentence],
        speed: f32,
        calibrated: Option<f32>,
        boost: f32,
    ) -> Vec<u64> {
        let mut cumulative = 0.0f32;
        sentences
            .iter()
            .map(|sentence| {
                cumulative += self.duration_ms(sentence, speed, calibrated, boost);
                cumulative as u64
            })
            .collect()
    }

    /// Pause attributed to a sentence's trailing character, scaled by speed.
    ///
    /// Semicolons and colons split sentences but pause like clause breaks,
    /// so the mid-sentence class is checked first.
    fn trailing_pause_ms(&self, text: &str, speed: f32) -> f32 {
        let base = match text.chars().last() {
            Some(c) if MID_SENTENCE_PUNCTUATION.contains(&c) => self.clause_pause_ms,
            Some(c) if SENTENCE_ENDINGS.contains(&c) => self.sentence_pause_ms,
            _ => self.word_pause_ms,
        };
        (base / speed.max(0.01)).max(1.0)
    }

    fn clamp_expected(&self, total_ms: u64, words: usize) -> u64 {
        let min = if words < self.short_paragraph_words {
            self.min_duration_short_ms
        } else {
            self.min_duration_ms
        };
        total_ms.clamp(min, self.max_duration_ms)
    }
}

/// First-exceeds lookup of an elapsed time in a cumulative timing sequence.
///
/// Returns the index of the first cumulative end-time greater than
/// `elapsed_ms`, the last index when the elapsed time exceeds every value,
/// and 0 for an empty sequence.
///
/// # Examples
///
/// ```rust
/// use roudoku::timing::sentence_index_at;
///
/// let timings = vec![500, 1200, 2000];
/// assert_eq!(sentence_index_at(0, &timings), 0);
/// assert_eq!(sentence_index_at(600, &timings), 1);
/// assert_eq!(sentence_index_at(9999, &timings), 2);
/// assert_eq!(sentence_index_at(100, &[]), 0);
/// ```
pub fn sentence_index_at(elapsed_ms: u64, timings: &[u64]) -> usize {
    if timings.is_empty() {
        return 0;
    }

    for (index, end_time) in timings.iter().enumerate() {
        if elapsed_ms < *end_time {
            return index;
        }
    }

    timings.len() - 1
}
