//! The cooperative highlight session around a [`Tracker`].
//!
//! A [`HighlightSession`] owns one background tokio task per playback
//! session. The task is the single writer of the timing profile: it receives
//! the host's signals over a channel, polls the tracker on a fixed cadence
//! while playback is active, and publishes the estimated position through a
//! watch channel the rendering layer subscribes to. Between polls the task
//! suspends; it never busy-waits and it ends promptly when the handle is
//! dropped or [`shutdown`](HighlightSession::shutdown) is awaited.
//!
//! # Examples
//!
//! ```rust
//! use roudoku::prelude::*;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> roudoku::Result<()> {
//! let session = HighlightSession::spawn(TimingConfig::default());
//!
//! session.set_paragraph(ParagraphContent::new("Hello world. How are you?"))?;
//! session.set_playing(true)?;
//! session.paragraph_started()?;
//!
//! let frames = session.frames();
//! assert_eq!(frames.borrow().paragraph, 0);
//!
//! session.shutdown().await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;

use log::debug;
use parking_lot::Mutex;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::{
    error::{Error, Result},
    timing::TimingConfig,
    tracker::Tracker,
    types::{HighlightFrame, ParagraphContent, SessionStats},
};

/// Inbound signals from the host TTS player.
#[derive(Debug)]
enum Signal {
    Content(ParagraphContent),
    ParagraphStarted,
    ParagraphChanged(usize),
    Speed(f32),
    Playing(bool),
    Enabled(bool),
    Stop,
    Shutdown,
}

/// Handle to a running highlight session.
///
/// Cloneable signal senders are intentionally not exposed: the handle is the
/// session's single point of control, mirroring the single TTS player it
/// shadows. Dropping the handle closes the signal channel and the background
/// task exits on its next wakeup.
///
/// # Examples
///
/// ```rust
/// use roudoku::prelude::*;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> roudoku::Result<()> {
/// let session = HighlightSession::spawn(TimingConfig::default());
///
/// session.set_paragraph("Hello world. How are you?".into())?;
/// session.set_speed(1.5)?;
/// session.set_playing(true)?;
/// session.paragraph_started()?;
///
/// // ... the TTS engine speaks; frames() updates every poll ...
///
/// session.paragraph_changed(1)?;
/// let stats = session.stats();
/// assert!(stats.speed_boost >= 1.0 && stats.speed_boost <= 1.3);
///
/// session.shutdown().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct HighlightSession {
    signals: mpsc::UnboundedSender<Signal>,
    frames: watch::Receiver<HighlightFrame>,
    stats: Arc<Mutex<SessionStats>>,
    task: Option<JoinHandle<()>>,
}

impl HighlightSession {
    /// Spawns the session task on the current tokio runtime.
    ///
    /// The task starts idle; nothing is polled until the host reports
    /// content and active playback.
    pub fn spawn(config: TimingConfig) -> Self {
        let (signal_tx, signal_rx) = mpsc::unbounded_channel();
        let (frame_tx, frame_rx) = watch::channel(HighlightFrame::default());
        let stats = Arc::new(Mutex::new(SessionStats::default()));

        let task = tokio::spawn(run_session(config, signal_rx, frame_tx, Arc::clone(&stats)));

        Self {
            signals: signal_tx,
            frames: frame_rx,
            stats,
            task: Some(task),
        }
    }

    /// Supplies the paragraph text the TTS engine is about to speak,
    /// including its optional translated variant.
    pub fn set_paragraph(&self, content: ParagraphContent) -> Result<()> {
        self.send(Signal::Content(content))
    }

    /// Reports that audio output began for the current paragraph.
    ///
    /// Wire this to the TTS engine's start callback; the session captures
    /// its local clock at receipt.
    pub fn paragraph_started(&self) -> Result<()> {
        self.send(Signal::ParagraphStarted)
    }

    /// Reports the host's authoritative paragraph pointer.
    ///
    /// Changes to this value are the only trustworthy completion signal and
    /// drive both drift correction and WPM calibration.
    pub fn paragraph_changed(&self, index: usize) -> Result<()> {
        self.send(Signal::ParagraphChanged(index))
    }

    /// Updates the playback speed multiplier.
    pub fn set_speed(&self, speed: f32) -> Result<()> {
        self.send(Signal::Speed(speed))
    }

    /// Starts or pauses playback.
    pub fn set_playing(&self, playing: bool) -> Result<()> {
        self.send(Signal::Playing(playing))
    }

    /// Enables or disables sentence highlighting.
    pub fn set_enabled(&self, enabled: bool) -> Result<()> {
        self.send(Signal::Enabled(enabled))
    }

    /// Ends the playback run, clearing per-run state while keeping
    /// calibration.
    pub fn stop(&self) -> Result<()> {
        self.send(Signal::Stop)
    }

    /// Subscribes to estimated positions for the rendering layer.
    ///
    /// The watch channel always holds the most recent frame; slow consumers
    /// only ever see the latest estimate, never a backlog.
    pub fn frames(&self) -> watch::Receiver<HighlightFrame> {
        self.frames.clone()
    }

    /// The most recent estimated position.
    pub fn current_frame(&self) -> HighlightFrame {
        *self.frames.borrow()
    }

    /// Snapshot of the session's adaptive state (calibrated WPM, boost).
    pub fn stats(&self) -> SessionStats {
        *self.stats.lock()
    }

    /// Stops the session task and waits for it to finish.
    pub async fn shutdown(mut self) -> Result<()> {
        let _ = self.signals.send(Signal::Shutdown);
        if let Some(task) = self.task.take() {
            task.await?;
        }
        Ok(())
    }

    fn send(&self, signal: Signal) -> Result<()> {
        self.signals.send(signal).map_err(|_| Error::SessionClosed)
    }
}

/// The session task: single writer of the timing profile.
///
/// Signals and polls are handled on the same task, so the tracker needs no
/// lock. The ticker only matters while playback is active; when idle the
/// polls return `None` and nothing is published.
async fn run_session(
    config: TimingConfig,
    mut signals: mpsc::UnboundedReceiver<Signal>,
    frames: watch::Sender<HighlightFrame>,
    stats: Arc<Mutex<SessionStats>>,
) {
    let poll_interval = Duration::from_millis(config.poll_interval_ms.max(1));
    let mut tracker = Tracker::new(config);
    let epoch = Instant::now();

    let mut ticker = tokio::time::interval(poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    debug!("highlight session started, polling every {:?}", poll_interval);

    loop {
        tokio::select! {
            signal = signals.recv() => {
                let now = epoch.elapsed().as_millis() as u64;
                match signal {
                    None | Some(Signal::Shutdown) => break,
                    Some(Signal::Content(content)) => tracker.set_content(&content),
                    Some(Signal::ParagraphStarted) => tracker.paragraph_started(now),
                    Some(Signal::ParagraphChanged(index)) => {
                        tracker.paragraph_changed(index, now);
                        *stats.lock() = tracker.stats();
                        publish(&frames, &tracker);
                    }
                    Some(Signal::Speed(speed)) => tracker.set_speed(speed),
                    Some(Signal::Playing(playing)) => {
                        tracker.set_playing(playing, now);
                        *stats.lock() = tracker.stats();
                    }
                    Some(Signal::Enabled(enabled)) => tracker.set_enabled(enabled),
                    Some(Signal::Stop) => {
                        tracker.stop();
                        *stats.lock() = tracker.stats();
                        publish(&frames, &tracker);
                    }
                }
            }
            _ = ticker.tick(), if tracker.is_playing() => {
                let now = epoch.elapsed().as_millis() as u64;
                if tracker.poll(now).is_some() {
                    publish(&frames, &tracker);
                }
            }
        }
    }

    debug!("highlight session ended");
}

/// Publishes the tracker's position, waking watchers only on change.
fn publish(frames: &watch::Sender<HighlightFrame>, tracker: &Tracker) {
    let frame = HighlightFrame {
        paragraph: tracker.paragraph_index(),
        sentence: tracker.sentence_index(),
        total_sentences: tracker.sentence_count(),
    };
    frames.send_if_modified(|current| {
        if *current != frame {
            *current = frame;
            true
        } else {
            false
        }
    });
}
