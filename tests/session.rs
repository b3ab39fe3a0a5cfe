mod common;

use std::time::Duration;

use common::*;
use roudoku::prelude::*;

async fn advance(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

#[tokio::test(start_paused = true)]
async fn test_frames_advance_with_playback_time() -> roudoku::Result<()> {
    let session = HighlightSession::spawn(TimingConfig::default());

    session.set_paragraph(ParagraphContent::new(TWO_SENTENCES))?;
    session.set_playing(true)?;
    session.paragraph_started()?;

    // Early in the paragraph the first sentence is highlighted
    advance(200).await;
    let frame = session.current_frame();
    assert_eq!(frame.paragraph, 0);
    assert_eq!(frame.sentence, 0);
    assert_eq!(frame.total_sentences, 2);

    // Past the first sentence's estimated end the highlight moves on
    advance(900).await;
    assert_eq!(session.current_frame().sentence, 1);

    session.shutdown().await
}

#[tokio::test(start_paused = true)]
async fn test_paragraph_boundary_resets_frame_and_calibrates() -> roudoku::Result<()> {
    let session = HighlightSession::spawn(TimingConfig::default());

    session.set_paragraph(ParagraphContent::new(TWO_SENTENCES))?;
    session.set_playing(true)?;
    session.paragraph_started()?;

    advance(1_000).await;
    assert_eq!(session.current_frame().sentence, 1);

    session.paragraph_changed(1)?;
    advance(10).await;

    let frame = session.current_frame();
    assert_eq!(frame.paragraph, 1);
    assert_eq!(frame.sentence, 0);

    // The boundary finished on the last sentence, so the boost decays to its
    // floor, and 5 words over the observed second calibrate to 300 WPM
    let stats = session.stats();
    assert!(stats.is_calibrated);
    assert_eq!(stats.speed_boost, 1.0);
    let wpm = stats.calibrated_wpm.unwrap();
    assert!((wpm - 300.0).abs() < 0.5, "got {}", wpm);

    session.shutdown().await
}

#[tokio::test(start_paused = true)]
async fn test_lagging_boundaries_raise_boost_to_cap() -> roudoku::Result<()> {
    let session = HighlightSession::spawn(TimingConfig::default());

    session.set_paragraph(ParagraphContent::new(TWO_SENTENCES))?;
    // Highlighting disabled: the estimate never advances, so every boundary
    // sees a lagging estimator
    session.set_enabled(false)?;
    session.set_playing(true)?;
    session.paragraph_started()?;

    for index in 1..=3 {
        advance(400).await;
        session.paragraph_changed(index)?;
    }
    advance(10).await;

    let stats = session.stats();
    assert!((stats.speed_boost - 1.3).abs() < 1e-4, "got {}", stats.speed_boost);

    session.shutdown().await
}

#[tokio::test(start_paused = true)]
async fn test_stop_halts_frame_updates() -> roudoku::Result<()> {
    let session = HighlightSession::spawn(TimingConfig::default());

    session.set_paragraph(ParagraphContent::new(MIXED_PARAGRAPH))?;
    session.set_playing(true)?;
    session.paragraph_started()?;

    advance(500).await;
    session.stop()?;
    advance(10).await;

    let frozen = session.current_frame();
    assert_eq!(frozen.sentence, 0);
    assert_eq!(session.stats().speed_boost, 1.0);

    // With the run stopped, time passing changes nothing
    advance(5_000).await;
    assert_eq!(session.current_frame(), frozen);

    session.shutdown().await
}

#[tokio::test(start_paused = true)]
async fn test_frames_receiver_observes_changes() -> roudoku::Result<()> {
    let session = HighlightSession::spawn(TimingConfig::default());
    let mut frames = session.frames();

    session.set_paragraph(ParagraphContent::new(TWO_SENTENCES))?;
    session.set_playing(true)?;
    session.paragraph_started()?;

    advance(100).await;
    assert!(frames.has_changed().unwrap());
    assert_eq!(frames.borrow_and_update().sentence, 0);

    advance(1_000).await;
    assert!(frames.has_changed().unwrap());
    assert_eq!(frames.borrow_and_update().sentence, 1);

    session.shutdown().await
}

#[tokio::test(start_paused = true)]
async fn test_speed_change_stretches_the_schedule() -> roudoku::Result<()> {
    let session = HighlightSession::spawn(TimingConfig::default());

    session.set_paragraph(ParagraphContent::new(TWO_SENTENCES))?;
    session.set_speed(0.5)?;
    session.set_playing(true)?;
    session.paragraph_started()?;

    // At half speed the first sentence spans roughly 1.1s, so the
    // highlight is still on it where 1.0x would have moved on
    advance(900).await;
    assert_eq!(session.current_frame().sentence, 0);
    advance(900).await;
    assert_eq!(session.current_frame().sentence, 1);

    session.shutdown().await
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_completes() -> roudoku::Result<()> {
    let session = HighlightSession::spawn(TimingConfig::default());
    session.set_paragraph(ParagraphContent::new(TWO_SENTENCES))?;
    session.shutdown().await
}
