use log::warn;

use crate::chart::{Chart, HitKind};
use crate::config::PlayConfig;

use super::drumroll::{DrumrollState, FALLBACK_DURATION_SECS};
use super::events::GameEvent;
use super::judge::{Judgement, JudgeWindows};
use super::notes::{ActiveNote, NoteField};
use super::result::PlayResult;
use super::score::ScoreState;
use super::state::{NoteState, PlayState};

/// One play session: owns all judgement state for a single chart run.
///
/// The host drives it with one [`GameSession::tick`] per rendered frame,
/// passing the current song time (from the song clock) and the inputs that
/// arrived since the previous frame. All work completes synchronously inside
/// the call; the returned events are the only outward surface.
///
/// Both cursors only ever move forward, so per-frame cost is bounded by the
/// notes that became eligible this frame, not by chart size.
pub struct GameSession {
    chart: Chart,
    windows: JudgeWindows,
    field: NoteField,
    state: PlayState,
    score: ScoreState,
    drumroll: DrumrollState,
    judge_cursor: usize,
}

impl GameSession {
    pub fn new(chart: Chart, config: &PlayConfig) -> Self {
        let note_count = chart.len();
        Self {
            windows: config.windows.clone(),
            field: NoteField::new(config.preempt_secs),
            state: PlayState::new(note_count),
            score: ScoreState::new(),
            drumroll: DrumrollState::new(),
            judge_cursor: 0,
            chart,
        }
    }

    /// Discard all per-session state so the same chart can be replayed.
    /// Nothing from an aborted run leaks into the next.
    pub fn reset(&mut self) {
        self.field.reset();
        self.state.reset();
        self.score.reset();
        self.drumroll = DrumrollState::new();
        self.judge_cursor = 0;
    }

    /// One frame of engine work.
    ///
    /// Fixed order every frame: spawn, miss sweep, drumroll timeout, note
    /// retirement, then inputs in arrival order. The sweep runs before input
    /// processing so a borderline note can never be resolved twice.
    pub fn tick(&mut self, song_time: f64, inputs: &[HitKind]) -> Vec<GameEvent> {
        let mut out = Vec::new();

        self.field.spawn(self.chart.events(), song_time);
        self.sweep_missed(song_time, &mut out);
        self.update_drumroll(song_time, &mut out);

        for index in self.field.retire(self.chart.events(), &self.state, song_time) {
            self.apply_judgement(index, Judgement::Miss, &mut out);
        }

        for &hit in inputs {
            self.handle_input(song_time, hit, &mut out);
        }

        debug_assert!(
            self.judge_cursor <= self.chart.len() && self.field.spawn_cursor() <= self.chart.len(),
            "cursor ran past the chart"
        );

        out
    }

    /// Walk forward from the judge cursor and miss every note whose whole
    /// window has elapsed. Stops at the first note still in (or before) its
    /// window: notes are time-ordered, so nothing later can be eligible yet.
    fn sweep_missed(&mut self, t: f64, out: &mut Vec<GameEvent>) {
        while self.judge_cursor < self.chart.len() {
            let index = self.judge_cursor;
            if !self.state.is_pending(index) {
                self.judge_cursor += 1;
                continue;
            }

            let ev = &self.chart.events()[index];
            let (time, kind) = (ev.time_secs, ev.kind);

            if kind.is_drumroll_end() {
                // End markers are resolved by their drumroll window, never
                // swept as misses.
                if t > time {
                    self.state.set_resolved(index);
                    if self.drumroll.is_active() && self.drumroll.end_event() == Some(index) {
                        self.close_drumroll(out);
                    }
                    self.judge_cursor += 1;
                    continue;
                }
                break;
            }

            if self.windows.is_elapsed(time - t) {
                self.judge_cursor += 1;
                self.apply_judgement(index, Judgement::Miss, out);
                continue;
            }

            break;
        }
    }

    fn update_drumroll(&mut self, t: f64, out: &mut Vec<GameEvent>) {
        if self.drumroll.is_active() && t > self.drumroll.end_time() {
            self.close_drumroll(out);
        }
    }

    fn handle_input(&mut self, t: f64, hit: HitKind, out: &mut Vec<GameEvent>) {
        // An open drumroll window takes the input first, but never consumes
        // it: the paired end is a distinct judgement-eligible event.
        if self.drumroll.is_active() {
            let points = self.drumroll.record_hit();
            self.score.add_bonus(points);
            out.push(GameEvent::ScoreChanged(self.score.score));
        }

        let Some(ev) = self.chart.events().get(self.judge_cursor) else {
            return;
        };
        let (time, kind) = (ev.time_secs, ev.kind);

        if kind.is_drumroll_end() {
            return;
        }

        let diff = time - t;

        if self.windows.is_too_early(diff) {
            // Too early for any note; never consumed against a future one.
            return;
        }

        if self.windows.is_elapsed(diff) {
            // Input after the window closed still consumes the expired note
            // rather than leaving it for the next sweep.
            let index = self.judge_cursor;
            self.judge_cursor += 1;
            self.apply_judgement(index, Judgement::Miss, out);
            return;
        }

        if !kind.accepts(hit) {
            // Wrong side within the window: the player gets another chance,
            // the cursor stays put.
            return;
        }

        let Some(judgement) = self.windows.classify(diff) else {
            debug_assert!(false, "in-window input failed to classify");
            return;
        };

        let index = self.judge_cursor;
        self.judge_cursor += 1;
        self.apply_judgement(index, judgement, out);

        if kind.is_drumroll_start() {
            self.open_drumroll(index, out);
        }
    }

    /// Resolve the end time by scanning forward from the judge cursor for
    /// the next unresolved end marker, then open the drumroll window.
    ///
    /// A head landing while another window is still open is malformed chart
    /// data; the open roll pays out and closes first.
    fn open_drumroll(&mut self, head: usize, out: &mut Vec<GameEvent>) {
        if self.drumroll.is_active() {
            warn!(
                "drumroll head at event {} while a window is already open, closing the open roll",
                head
            );
            self.close_drumroll(out);
        }

        let events = self.chart.events();
        let head_time = events[head].time_secs;
        let end = (self.judge_cursor..events.len())
            .find(|&i| events[i].kind.is_drumroll_end() && self.state.is_pending(i));

        let end_time = match end {
            Some(index) => events[index].time_secs,
            None => {
                warn!(
                    "drumroll head at {:.3}s has no end marker, using a {:.1}s window",
                    head_time, FALLBACK_DURATION_SECS
                );
                head_time + FALLBACK_DURATION_SECS
            }
        };

        self.drumroll.open(head, end_time, end);
        out.push(GameEvent::DrumrollStarted { index: head });
    }

    fn close_drumroll(&mut self, out: &mut Vec<GameEvent>) {
        let end_event = self.drumroll.end_event();
        let (hits, bonus) = self.drumroll.close();

        if bonus > 0 {
            self.score.add_bonus(bonus);
            out.push(GameEvent::ScoreChanged(self.score.score));
        }
        out.push(GameEvent::DrumrollFinished { hits, bonus });

        if let Some(end) = end_event {
            self.state.set_resolved(end);
        }
    }

    /// Apply a terminal judgement to a note and emit the resulting changes.
    fn apply_judgement(&mut self, index: usize, judgement: Judgement, out: &mut Vec<GameEvent>) {
        let marked = match judgement {
            Judgement::Miss => self.state.set_missed(index),
            hit => self.state.set_hit(index, hit),
        };
        if !marked {
            debug_assert!(false, "double judgement on note {index}");
            return;
        }

        let prev_score = self.score.score;
        let prev_combo = self.score.combo;
        let prev_gauge = self.score.gauge;
        self.score.apply(judgement);

        out.push(GameEvent::NoteJudged { index, judgement });
        if self.score.score != prev_score {
            out.push(GameEvent::ScoreChanged(self.score.score));
        }
        if self.score.combo != prev_combo {
            out.push(GameEvent::ComboChanged(self.score.combo));
        }
        out.push(GameEvent::AccuracyChanged(self.score.accuracy()));
        if self.score.gauge != prev_gauge {
            out.push(GameEvent::GaugeChanged(self.score.gauge));
        }
    }

    pub fn chart(&self) -> &Chart {
        &self.chart
    }

    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    pub fn judge_cursor(&self) -> usize {
        self.judge_cursor
    }

    pub fn spawn_cursor(&self) -> usize {
        self.field.spawn_cursor()
    }

    /// Currently visible notes, for the rendering collaborator.
    pub fn active_notes(&self) -> &[ActiveNote] {
        self.field.active()
    }

    /// Travel progress of an active note at the given song time.
    pub fn note_progress(&self, note: &ActiveNote, song_time: f64) -> f64 {
        self.field.progress(self.chart.events(), note, song_time)
    }

    pub fn note_state(&self, index: usize) -> Option<NoteState> {
        self.state.get(index)
    }

    pub fn is_drumroll_active(&self) -> bool {
        self.drumroll.is_active()
    }

    /// Every note resolved one way or another.
    pub fn is_finished(&self) -> bool {
        self.state.all_processed()
    }

    pub fn result(&self) -> PlayResult {
        PlayResult::from_score(&self.score, self.chart.note_count() as u32)
    }
}
