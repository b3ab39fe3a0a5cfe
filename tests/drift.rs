mod common;

use common::*;
use roudoku::prelude::*;

fn tracking_tracker(text: &str) -> Tracker {
    let mut tracker = Tracker::new(TimingConfig::default());
    tracker.set_content(&ParagraphContent::new(text));
    tracker.set_playing(true, 0);
    tracker.paragraph_started(0);
    tracker
}

#[test]
fn test_boost_stays_bounded_under_arbitrary_events() {
    let mut tracker = tracking_tracker(MIXED_PARAGRAPH);
    let mut now = 0u64;

    // A messy but realistic event stream: polls, speed changes, pauses,
    // boundary signals in varying rhythm
    for round in 1..50u64 {
        now += 350 + (round % 7) * 450;
        tracker.poll(now);
        if round % 5 == 0 {
            tracker.set_speed(0.5 + (round % 4) as f32 * 0.5);
        }
        if round % 11 == 0 {
            tracker.set_playing(false, now);
            now += 2_000;
            tracker.set_playing(true, now);
        }
        tracker.paragraph_changed(round as usize, now);

        let boost = tracker.boost();
        assert!(boost >= 1.0, "boost {} below floor at round {}", boost, round);
        assert!(boost <= 1.3 + f32::EPSILON, "boost {} above cap at round {}", boost, round);
    }
}

#[test]
fn test_poll_index_never_leaves_paragraph_bounds() {
    let mut tracker = tracking_tracker(MIXED_PARAGRAPH);
    let last = tracker.sentence_count() - 1;

    for elapsed in (0..600_000u64).step_by(777) {
        let index = tracker.poll(elapsed).unwrap();
        assert!(index <= last, "index {} past last sentence at {}ms", index, elapsed);
    }
    // Far beyond the paragraph's expected duration the estimate pins to the
    // last sentence rather than running off the end
    assert_eq!(tracker.poll(u64::MAX / 2), Some(last));
}

#[test]
fn test_catchup_advances_a_stale_highlight() {
    let config = TimingConfig::default();
    let sentences = uniform_sentences(10, "Hi.");

    // Deep into the paragraph (75% of expected time) with the highlight
    // still on the first sentence, the catch-up gain skips ahead
    let stale = config.position_at(2_173, &sentences, 1.0, None, 1.0, 0);
    let current = config.position_at(2_173, &sentences, 1.0, None, 1.0, 9);

    assert_eq!(current, 7);
    assert_eq!(stale, 8);
    assert!(stale > current);
}

#[test]
fn test_catchup_does_not_fire_early() {
    let config = TimingConfig::default();
    let sentences = uniform_sentences(10, "Hi.");

    // Below the 70% progress threshold a stale highlight gets no bump
    let stale = config.position_at(1_500, &sentences, 1.0, None, 1.0, 0);
    let current = config.position_at(1_500, &sentences, 1.0, None, 1.0, 9);
    assert_eq!(stale, current);
}

#[test]
fn test_paragraph_change_restarts_position_and_clock() {
    let mut tracker = tracking_tracker(TWO_SENTENCES);
    assert_eq!(tracker.poll(1_000), Some(1));

    tracker.paragraph_changed(1, 5_000);
    assert_eq!(tracker.paragraph_index(), 1);
    assert_eq!(tracker.sentence_index(), 0);

    // Elapsed time is measured from the boundary, not from the old start.
    // The boundary also calibrated the rate down (5 words over 5s is 60 WPM),
    // so the first sentence now spans roughly 1.9s
    assert_eq!(tracker.poll(5_100), Some(0));
    assert_eq!(tracker.poll(7_200), Some(1));
}

#[test]
fn test_pause_and_resume_keeps_corrections() {
    let mut tracker = tracking_tracker(TWO_SENTENCES);

    // Two lagging boundaries raise the boost
    tracker.paragraph_changed(1, 1_000);
    tracker.paragraph_changed(2, 2_000);
    let raised = tracker.boost();
    assert!(raised > 1.0);

    // Pausing mid-run must not forget what was learned
    tracker.set_playing(false, 2_500);
    assert_eq!(tracker.poll(3_000), None);
    tracker.set_playing(true, 3_000);
    assert_eq!(tracker.boost(), raised);
    assert!(tracker.calibrated_wpm().is_some());
}

#[test]
fn test_stop_then_restart_begins_clean_run() {
    let mut tracker = tracking_tracker(TWO_SENTENCES);
    tracker.paragraph_changed(1, 1_000);
    tracker.paragraph_changed(2, 2_000);
    assert!(tracker.boost() > 1.0);

    tracker.stop();
    tracker.set_playing(true, 10_000);
    tracker.paragraph_started(10_000);

    // The boost starts fresh, the calibration carries over
    assert_eq!(tracker.boost(), 1.0);
    assert!(tracker.calibrated_wpm().is_some());
    assert_eq!(tracker.poll(10_100), Some(0));
}

#[test]
fn test_boost_shortens_expected_duration() {
    let config = TimingConfig::default();
    let sentences = split_sentences(MIXED_PARAGRAPH);

    let plain = config.expected_paragraph_duration(&sentences, 1.0, None, 1.0);
    let boosted = config.expected_paragraph_duration(&sentences, 1.0, None, 1.3);
    assert!(boosted < plain);
}

#[test]
fn test_calibrated_engine_advances_the_highlight_sooner() {
    let fast = TimingConfig::default();
    let sentences = split_sentences(TWO_SENTENCES);

    // At 400 WPM the first sentence ends roughly twice as early
    let default_index = fast.position_at(400, &sentences, 1.0, None, 1.0, 0);
    let calibrated_index = fast.position_at(400, &sentences, 1.0, Some(400.0), 1.0, 0);
    assert_eq!(default_index, 0);
    assert_eq!(calibrated_index, 1);
}

#[test]
fn test_degenerate_speed_does_not_break_polling() {
    let mut tracker = tracking_tracker(TWO_SENTENCES);

    tracker.set_speed(0.0);
    assert!(tracker.poll(1_000).is_some());
    tracker.set_speed(-3.0);
    assert!(tracker.poll(2_000).is_some());
}

#[test]
fn test_stats_snapshot_reflects_tracker_state() {
    let mut tracker = tracking_tracker(TWO_SENTENCES);

    let initial = tracker.stats();
    assert_eq!(initial.speed_boost, 1.0);
    assert!(!initial.is_calibrated);
    assert_eq!(initial.calibrated_wpm, None);

    tracker.paragraph_changed(1, 1_000);
    let after = tracker.stats();
    assert!(after.is_calibrated);
    assert!(after.calibrated_wpm.is_some());
    assert!(after.speed_boost > 1.0);
}
