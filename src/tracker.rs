//! The drift-correcting playback tracker.
//!
//! [`Tracker`] is the state machine at the heart of the estimator: it owns
//! the whole timing profile of one playback session (current paragraph,
//! sentence index, local clock, dynamic speed boost, calibration) and turns
//! the host's two trustworthy signals ("paragraph playback started" and
//! "current paragraph index changed") plus periodic polls into a sentence
//! index for the rendering layer.
//!
//! The tracker is clock-agnostic: every method takes a caller-supplied
//! monotonic timestamp in milliseconds, so it can be driven by a tokio timer
//! (see [`crate::session`]), a UI frame callback, or a test harness. It is
//! single-writer by design; if shared across threads it must sit behind one
//! mutex.
//!
//! There is no error state. Malformed or empty paragraph text degrades to
//! the splitter's whole-text fallback, and the worst possible outcome is
//! visibly wrong highlighting that self-corrects at the next paragraph
//! boundary.

use log::{debug, trace};

use crate::{
    calibrate::Calibration,
    split::Paragraph,
    timing::TimingConfig,
    types::{ParagraphContent, SessionStats},
};

/// Whether the tracker is following active playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TrackerState {
    /// No playback run in progress; polls yield nothing.
    Idle,
    /// A playback run is in progress and the local clock is meaningful.
    Tracking,
}

/// Drift-correcting sentence position tracker for one playback session.
///
/// # Examples
///
/// ```rust
/// use roudoku::prelude::*;
///
/// let mut tracker = Tracker::new(TimingConfig::default());
/// tracker.set_content(&ParagraphContent::new("Hello world. How are you?"));
/// tracker.set_playing(true, 0);
/// tracker.paragraph_started(0);
///
/// // Polls report the estimated sentence for the elapsed time
/// assert_eq!(tracker.poll(100), Some(0));
/// assert_eq!(tracker.poll(1_000), Some(1));
///
/// // The host advancing its paragraph pointer is ground truth
/// tracker.paragraph_changed(1, 1_500);
/// assert_eq!(tracker.sentence_index(), 0);
/// ```
#[derive(Debug)]
pub struct Tracker {
    config: TimingConfig,
    calibration: Calibration,
    paragraph: Paragraph,
    paragraph_index: usize,
    sentence_index: usize,
    start_ms: Option<u64>,
    speed: f32,
    boost: f32,
    playing: bool,
    enabled: bool,
    state: TrackerState,
}

impl Tracker {
    /// Creates an idle tracker with the given tuning profile.
    pub fn new(config: TimingConfig) -> Self {
        Self {
            config,
            calibration: Calibration::new(),
            paragraph: Paragraph::default(),
            paragraph_index: 0,
            sentence_index: 0,
            start_ms: None,
            speed: 1.0,
            boost: 1.0,
            playing: false,
            enabled: true,
            state: TrackerState::Idle,
        }
    }

    /// Replaces the current paragraph text.
    ///
    /// The tracker splits the spoken variant
    /// ([`ParagraphContent::active_text`]) and restarts highlighting from the
    /// first sentence.
    pub fn set_content(&mut self, content: &ParagraphContent) {
        self.paragraph = Paragraph::parse(content.active_text());
        self.sentence_index = 0;
        trace!(
            "tracker: new paragraph text, {} sentences / {} words",
            self.paragraph.sentences.len(),
            self.paragraph.words()
        );
    }

    /// Updates the playback speed multiplier. Non-positive values are floored
    /// to keep duration math finite.
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed.max(0.05);
    }

    /// Enables or disables highlighting; disabled trackers still follow
    /// signals but report no position.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Starts or pauses playback at the given timestamp.
    ///
    /// The idle-to-tracking transition begins a fresh run: the dynamic boost
    /// resets to 1.0 and the local clock restarts. Pausing keeps the run's
    /// state so resuming does not forget corrections.
    pub fn set_playing(&mut self, playing: bool, now_ms: u64) {
        if playing && self.state == TrackerState::Idle {
            self.boost = 1.0;
            self.sentence_index = 0;
            self.start_ms = Some(now_ms);
            self.state = TrackerState::Tracking;
            debug!("tracker: playback run started");
        }
        self.playing = playing;
    }

    /// Handles the host's "paragraph playback started" signal.
    ///
    /// Always resets the sentence index to 0 and restarts the local clock,
    /// regardless of what the estimator believed before.
    pub fn paragraph_started(&mut self, now_ms: u64) {
        self.sentence_index = 0;
        self.start_ms = Some(now_ms);
        self.state = TrackerState::Tracking;
        trace!("tracker: paragraph started at {}ms", now_ms);
    }

    /// Handles the host advancing its paragraph pointer.
    ///
    /// The change is the only trustworthy completion signal, so it drives
    /// both corrections: the finished paragraph's lag or lead adjusts the
    /// dynamic speed boost for subsequent paragraphs, and its observed
    /// duration feeds the WPM calibration. The sentence index resets for the
    /// new paragraph.
    pub fn paragraph_changed(&mut self, new_index: usize, now_ms: u64) {
        if self.state == TrackerState::Tracking
            && new_index != self.paragraph_index
            && !self.paragraph.is_empty()
        {
            let last = self.paragraph.last_index();
            if self.sentence_index < last {
                self.boost = (self.boost * self.config.boost_raise).min(self.config.max_speed_boost);
                debug!(
                    "tracker: lagged paragraph {} at sentence {}/{}, boost -> {:.3}",
                    self.paragraph_index, self.sentence_index, last, self.boost
                );
            } else {
                self.boost = (self.boost * self.config.boost_decay).max(1.0);
                trace!("tracker: kept pace, boost -> {:.3}", self.boost);
            }

            if let Some(start) = self.start_ms {
                let observed = now_ms.saturating_sub(start);
                self.calibration
                    .record(self.paragraph.words(), observed, self.speed, &self.config);
            }
        }

        self.paragraph_index = new_index;
        self.sentence_index = 0;
        self.start_ms = Some(now_ms);
    }

    /// Advances the estimate against the clock.
    ///
    /// Returns the sentence index to highlight, or `None` when there is
    /// nothing to report (paused, highlighting disabled, no sentences, or no
    /// playback run in progress). The returned index is always within the
    /// current paragraph's bounds.
    pub fn poll(&mut self, now_ms: u64) -> Option<usize> {
        if !self.playing || !self.enabled || self.state != TrackerState::Tracking {
            return None;
        }
        if self.paragraph.is_empty() {
            return None;
        }
        let start = self.start_ms?;

        let elapsed = now_ms.saturating_sub(start);
        let index = self.config.position_at(
            elapsed,
            &self.paragraph.sentences,
            self.speed,
            self.calibration.wpm(),
            self.boost,
            self.sentence_index,
        );
        self.sentence_index = index;
        Some(index)
    }

    /// Ends the playback run and clears per-run state.
    ///
    /// Calibration survives a stop: the engine did not change, only the
    /// user's position did. The boost and clock do not, so the next run
    /// starts clean and nothing stale leaks into its measurements.
    pub fn stop(&mut self) {
        self.playing = false;
        self.state = TrackerState::Idle;
        self.sentence_index = 0;
        self.start_ms = None;
        self.boost = 1.0;
        debug!("tracker: playback run stopped");
    }

    /// Discards calibration measurements, e.g. after an engine or voice
    /// change.
    pub fn reset_calibration(&mut self) {
        self.calibration.reset();
    }

    /// Whether the host reports active playback.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// The host's paragraph index as last reported.
    pub fn paragraph_index(&self) -> usize {
        self.paragraph_index
    }

    /// The sentence index last produced by [`poll`](Tracker::poll).
    pub fn sentence_index(&self) -> usize {
        self.sentence_index
    }

    /// Sentence count of the current paragraph.
    pub fn sentence_count(&self) -> usize {
        self.paragraph.sentences.len()
    }

    /// Current dynamic speed-boost multiplier, within `[1.0, max]`.
    pub fn boost(&self) -> f32 {
        self.boost
    }

    /// Calibrated WPM, if any measurement has been accepted.
    pub fn calibrated_wpm(&self) -> Option<f32> {
        self.calibration.wpm()
    }

    /// Snapshot of the adaptive state for the session stats channel.
    pub fn stats(&self) -> SessionStats {
        SessionStats {
            calibrated_wpm: self.calibration.wpm(),
            speed_boost: self.boost,
            is_calibrated: self.calibration.is_calibrated(),
        }
    }
}
