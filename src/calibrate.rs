//! Words-per-minute calibration from observed paragraph timing.
//!
//! The default WPM assumption is wrong for most TTS voices. Once real
//! paragraphs have been spoken, the host's paragraph-boundary signals give us
//! observed durations, and dividing words by time yields the engine's actual
//! rate. Calibration keeps a short rolling window of measurements and feeds
//! their average back into the duration estimates for the rest of the
//! session.
//!
//! Measurements are only trusted inside a sanity window: durations at or
//! below 300ms are usually signal jitter, durations at or above 60s usually
//! mean playback stalled. Both bounds are tunable via
//! [`TimingConfig`](crate::TimingConfig).
//!
//! # Examples
//!
//! ```rust
//! use roudoku::prelude::*;
//!
//! let config = TimingConfig::default();
//!
//! // 100 words in 30 seconds at 1.0x speed is exactly 200 WPM
//! assert_eq!(calibrated_wpm(100, 30_000, 1.0, &config), 200.0);
//!
//! let mut calibration = Calibration::new();
//! calibration.record(100, 30_000, 1.0, &config);
//! assert_eq!(calibration.wpm(), Some(200.0));
//! ```

use log::debug;

use crate::timing::TimingConfig;

/// Converts one observed paragraph timing into a WPM rate at 1.0x speed.
///
/// `raw = (words / observed_ms) * 60000`, normalized by dividing out the
/// speed multiplier that was active while the paragraph played. Guard: a
/// zero word count or zero duration returns the configured default rate
/// instead of dividing by zero.
///
/// # Examples
///
/// ```rust
/// use roudoku::prelude::*;
///
/// let config = TimingConfig::default();
///
/// assert_eq!(calibrated_wpm(100, 30_000, 1.0, &config), 200.0);
/// // At 2.0x speed the same timing normalizes to half the rate
/// assert_eq!(calibrated_wpm(100, 30_000, 2.0, &config), 100.0);
/// // Degenerate inputs fall back to the default
/// assert_eq!(calibrated_wpm(0, 30_000, 1.0, &config), config.default_wpm);
/// assert_eq!(calibrated_wpm(100, 0, 1.0, &config), config.default_wpm);
/// ```
pub fn calibrated_wpm(words: usize, observed_ms: u64, speed: f32, config: &TimingConfig) -> f32 {
    if observed_ms == 0 || words == 0 {
        return config.default_wpm;
    }
    let raw = (words as f32 / observed_ms as f32) * 60_000.0;
    raw / speed.max(0.01)
}

/// Rolling calibration state for one playback session.
///
/// Keeps the last few accepted measurements (window size from
/// [`TimingConfig::calibration_window`]) and exposes their average as the
/// session's calibrated rate. Created once per session and discarded with
/// it.
#[derive(Debug, Clone, Default)]
pub struct Calibration {
    history: Vec<f32>,
}

impl Calibration {
    /// Creates an empty calibration with no measurements.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one observed paragraph timing.
    ///
    /// The measurement is rejected when the observed duration falls outside
    /// the sanity window or the paragraph had no countable words; rejection
    /// leaves the current rate untouched. Returns the calibrated rate after
    /// the update, if any measurement has been accepted so far.
    pub fn record(
        &mut self,
        words: usize,
        observed_ms: u64,
        speed: f32,
        config: &TimingConfig,
    ) -> Option<f32> {
        if words == 0
            || observed_ms <= config.calibration_min_duration_ms
            || observed_ms >= config.calibration_max_duration_ms
        {
            return self.wpm();
        }

        let measured = calibrated_wpm(words, observed_ms, speed, config);
        self.history.push(measured);

        let window = config.calibration_window.max(1);
        let excess = self.history.len().saturating_sub(window);
        if excess > 0 {
            self.history.drain(..excess);
        }

        debug!(
            "calibration: {} words in {}ms at {:.2}x -> {:.1} WPM (avg {:.1})",
            words,
            observed_ms,
            speed,
            measured,
            self.wpm().unwrap_or(config.default_wpm)
        );

        self.wpm()
    }

    /// Average of the retained measurements, or `None` before the first one.
    pub fn wpm(&self) -> Option<f32> {
        if self.history.is_empty() {
            return None;
        }
        Some(self.history.iter().sum::<f32>() / self.history.len() as f32)
    }

    /// Whether at least one measurement has been accepted.
    pub fn is_calibrated(&self) -> bool {
        !self.history.is_empty()
    }

    /// Discards all measurements, e.g. when the TTS engine or voice changes.
    pub fn reset(&mut self) {
        self.history.clear();
    }
}
