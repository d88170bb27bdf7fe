use taiko_player::chart::{Chart, ChartEvent, HitKind, NoteKind};
use taiko_player::config::PlayConfig;
use taiko_player::game::{GameEvent, GameSession, Judgement};

fn session(events: Vec<ChartEvent>) -> GameSession {
    let chart = Chart::new(events).unwrap();
    GameSession::new(chart, &PlayConfig::default())
}

fn three_don_chart() -> Vec<ChartEvent> {
    vec![
        ChartEvent::new(1.0, NoteKind::Don),
        ChartEvent::new(2.0, NoteKind::Don),
        ChartEvent::new(3.0, NoteKind::Don),
    ]
}

#[test]
fn test_end_to_end_three_notes() {
    let mut s = session(three_don_chart());

    // Exact hit on the first note.
    let events = s.tick(1.0, &[HitKind::Don]);
    assert!(events.contains(&GameEvent::NoteJudged {
        index: 0,
        judgement: Judgement::Good
    }));
    assert_eq!(s.score().score, 100);
    assert_eq!(s.score().combo, 1);

    // 90 ms late on the second: inside the okay window.
    let events = s.tick(2.09, &[HitKind::Don]);
    assert!(events.contains(&GameEvent::NoteJudged {
        index: 1,
        judgement: Judgement::Okay
    }));
    assert_eq!(s.score().score, 150);
    assert_eq!(s.score().combo, 2);

    // Never touch the third; the sweep misses it once its window elapses.
    let events = s.tick(3.2, &[]);
    assert!(events.contains(&GameEvent::NoteJudged {
        index: 2,
        judgement: Judgement::Miss
    }));
    assert_eq!(s.score().combo, 0);
    assert!(s.is_finished());

    // accuracy = (good + 0.5 * okay) / judged * 100 = (1 + 0.5) / 3 * 100
    assert!((s.score().accuracy() - 50.0).abs() < 1e-9);
}

#[test]
fn test_type_mismatch_does_not_advance_cursor() {
    let mut s = session(three_don_chart());

    let events = s.tick(1.0, &[HitKind::Ka]);
    assert!(events.is_empty());
    assert_eq!(s.judge_cursor(), 0);
    assert!(s.note_state(0).unwrap().is_pending());

    // The correct side still lands within the window afterwards.
    let events = s.tick(1.05, &[HitKind::Don]);
    assert!(events.contains(&GameEvent::NoteJudged {
        index: 0,
        judgement: Judgement::Okay
    }));
}

#[test]
fn test_too_early_input_is_not_consumed_against_future_note() {
    let mut s = session(three_don_chart());

    let events = s.tick(0.5, &[HitKind::Don]);
    assert!(events.is_empty());
    assert_eq!(s.judge_cursor(), 0);
    assert!(s.note_state(0).unwrap().is_pending());
}

#[test]
fn test_consecutive_misses_keep_combo_at_zero() {
    let mut s = session(three_don_chart());

    s.tick(1.0, &[HitKind::Don]);
    assert_eq!(s.score().combo, 1);

    // Let notes two and three both expire.
    let events = s.tick(3.5, &[]);
    let misses = events
        .iter()
        .filter(|e| matches!(e, GameEvent::NoteJudged { judgement: Judgement::Miss, .. }))
        .count();
    assert_eq!(misses, 2);
    assert_eq!(s.score().combo, 0);
    assert_eq!(s.score().miss_count, 2);
}

#[test]
fn test_accuracy_formula_exactness() {
    let events: Vec<ChartEvent> = (0..10)
        .map(|i| ChartEvent::new(1.0 + i as f64, NoteKind::Don))
        .collect();
    let mut s = session(events);

    // Eight goods, then two okays (hit 0.09 s late).
    for i in 0..8 {
        s.tick(1.0 + i as f64, &[HitKind::Don]);
    }
    for i in 8..10 {
        s.tick(1.09 + i as f64, &[HitKind::Don]);
    }

    assert_eq!(s.score().good_count, 8);
    assert_eq!(s.score().okay_count, 2);
    assert!((s.score().accuracy() - 90.0).abs() < 1e-9);
}

#[test]
fn test_drumroll_bonus_scoring() {
    let mut s = session(vec![
        ChartEvent::new(5.0, NoteKind::DrumrollStart),
        ChartEvent::new(7.0, NoteKind::DrumrollEnd),
    ]);

    // Open the window with a clean hit on the head.
    let events = s.tick(5.0, &[HitKind::Don]);
    assert!(events.contains(&GameEvent::DrumrollStarted { index: 0 }));
    assert!(s.is_drumroll_active());
    assert_eq!(s.score().score, 100);

    // Ten matching inputs while active, either side counts.
    for i in 0..10 {
        let t = 5.1 + i as f64 * 0.15;
        let hit = if i % 2 == 0 { HitKind::Don } else { HitKind::Ka };
        s.tick(t, &[hit]);
    }
    assert_eq!(s.score().score, 200);

    // Closing pays the proportional bonus on top of the per-hit score.
    let events = s.tick(7.1, &[]);
    assert!(events.contains(&GameEvent::DrumrollFinished { hits: 10, bonus: 50 }));
    assert_eq!(s.score().score, 250);
    assert!(!s.is_drumroll_active());
    assert!(s.is_finished());
}

#[test]
fn test_overlapping_drumroll_heads_close_the_open_roll() {
    // Malformed but loadable chart: the second head lands inside the first
    // roll's window. The open roll pays out and closes, then the new one
    // opens against the remaining end marker.
    let mut s = session(vec![
        ChartEvent::new(1.0, NoteKind::DrumrollStart),
        ChartEvent::new(1.5, NoteKind::DrumrollStart),
        ChartEvent::new(2.0, NoteKind::DrumrollEnd),
        ChartEvent::new(2.5, NoteKind::DrumrollEnd),
    ]);

    s.tick(1.0, &[HitKind::Don]);
    s.tick(1.2, &[HitKind::Don]);
    assert_eq!(s.score().score, 110);

    // Input counts one more roll hit, judges the second head, closes the
    // first roll with its bonus and opens the second.
    let events = s.tick(1.5, &[HitKind::Don]);
    assert!(events.contains(&GameEvent::DrumrollFinished { hits: 2, bonus: 10 }));
    assert!(events.contains(&GameEvent::DrumrollStarted { index: 1 }));
    assert!(s.is_drumroll_active());
    assert_eq!(s.score().score, 230);

    let events = s.tick(2.6, &[]);
    assert!(events.contains(&GameEvent::DrumrollFinished { hits: 0, bonus: 0 }));
    assert!(!s.is_drumroll_active());
    assert!(s.is_finished());
}

#[test]
fn test_drumroll_input_also_reaches_regular_judgement() {
    // A note sits right after the drumroll; input inside the window counts a
    // roll hit and still judges the next note once the roll has closed.
    let mut s = session(vec![
        ChartEvent::new(1.0, NoteKind::DrumrollStart),
        ChartEvent::new(2.0, NoteKind::DrumrollEnd),
        ChartEvent::new(2.5, NoteKind::Don),
    ]);

    s.tick(1.0, &[HitKind::Don]);
    s.tick(1.5, &[HitKind::Don]);
    assert_eq!(s.score().score, 110);

    // Window closes, then the trailing note is judged normally.
    let events = s.tick(2.5, &[HitKind::Don]);
    assert!(events.contains(&GameEvent::NoteJudged {
        index: 2,
        judgement: Judgement::Good
    }));
    assert_eq!(s.score().good_count, 2);
}

#[test]
fn test_events_fire_at_mutation_points() {
    let mut s = session(vec![ChartEvent::new(1.0, NoteKind::Don)]);

    let events = s.tick(1.0, &[HitKind::Don]);
    assert!(events.contains(&GameEvent::ScoreChanged(100)));
    assert!(events.contains(&GameEvent::ComboChanged(1)));
    assert!(events.contains(&GameEvent::AccuracyChanged(100.0)));
    assert!(events.contains(&GameEvent::GaugeChanged(0.25)));
}

#[test]
fn test_miss_does_not_emit_score_change() {
    let mut s = session(vec![ChartEvent::new(1.0, NoteKind::Don)]);

    let events = s.tick(2.0, &[]);
    assert!(events.contains(&GameEvent::NoteJudged {
        index: 0,
        judgement: Judgement::Miss
    }));
    assert!(!events
        .iter()
        .any(|e| matches!(e, GameEvent::ScoreChanged(_))));
}

#[test]
fn test_large_notes_follow_small_note_rules() {
    let mut s = session(vec![
        ChartEvent::new(1.0, NoteKind::DonLarge),
        ChartEvent::new(2.0, NoteKind::KaLarge),
    ]);

    let events = s.tick(1.0, &[HitKind::Ka]);
    assert!(events.is_empty());

    s.tick(1.0, &[HitKind::Don]);
    s.tick(2.0, &[HitKind::Ka]);
    assert_eq!(s.score().good_count, 2);
}
