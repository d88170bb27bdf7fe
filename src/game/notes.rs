use log::warn;

use crate::chart::ChartEvent;

use super::state::PlayState;

/// Normalized progress at which a judged note has scrolled far enough past
/// the hit line to be invisible and safe to destroy.
const RETIRE_PROGRESS: f64 = 1.3;

/// Emergency threshold. A note still unjudged this far past the hit line is
/// force-missed and destroyed so a judgement fault cannot pin it forever.
const FORCE_MISS_PROGRESS: f64 = 3.0;

/// A spawned, on-screen note instance. Visual state only; judgement reads
/// the chart event and [`PlayState`] directly.
#[derive(Debug, Clone)]
pub struct ActiveNote {
    /// Index of the originating event in the chart.
    pub event: usize,
    /// Song time at which the note entered the preempt window.
    pub spawn_time: f64,
    /// For drumroll heads: chart index of the paired end marker, linked at
    /// spawn time by nearest-time matching.
    pub paired_end: Option<usize>,
}

/// Visual connector between a drumroll head and its end marker.
#[derive(Debug, Clone)]
struct Bridge {
    head_event: usize,
    head_time: f64,
    end_event: Option<usize>,
}

/// Maintains the set of currently visible notes, independent of judgement
/// outcome. A single monotonic spawn cursor walks the time-ordered chart;
/// already-spawned events are never re-scanned.
#[derive(Debug)]
pub struct NoteField {
    preempt_secs: f64,
    spawn_cursor: usize,
    active: Vec<ActiveNote>,
    bridges: Vec<Bridge>,
}

impl NoteField {
    pub fn new(preempt_secs: f64) -> Self {
        Self {
            preempt_secs,
            spawn_cursor: 0,
            active: Vec::new(),
            bridges: Vec::new(),
        }
    }

    pub fn spawn_cursor(&self) -> usize {
        self.spawn_cursor
    }

    pub fn active(&self) -> &[ActiveNote] {
        &self.active
    }

    pub fn reset(&mut self) {
        self.spawn_cursor = 0;
        self.active.clear();
        self.bridges.clear();
    }

    /// Spawn every event whose preempt window song time `t` has entered.
    pub fn spawn(&mut self, events: &[ChartEvent], t: f64) {
        while self.spawn_cursor < events.len() {
            let ev = &events[self.spawn_cursor];
            if ev.time_secs - t > self.preempt_secs {
                break;
            }

            let index = self.spawn_cursor;
            let mut paired_end = None;

            if ev.kind.is_drumroll_start() {
                self.bridges.push(Bridge {
                    head_event: index,
                    head_time: ev.time_secs,
                    end_event: None,
                });
            } else if ev.kind.is_drumroll_end() {
                paired_end = self.link_end(index, ev.time_secs);
            }

            self.active.push(ActiveNote {
                event: index,
                spawn_time: t,
                paired_end,
            });
            self.spawn_cursor += 1;
        }
    }

    /// Link an end marker to the nearest-by-time unlinked bridge and record
    /// the pairing on the head's active note. Overlapping preempt windows can
    /// spawn drumrolls slightly out of strict pairing order, so this is a
    /// nearest-time search rather than first-unlinked.
    fn link_end(&mut self, end_event: usize, end_time: f64) -> Option<usize> {
        let head_event = {
            let bridge = self
                .bridges
                .iter_mut()
                .filter(|b| b.end_event.is_none())
                .min_by(|a, b| {
                    let da = (end_time - a.head_time).abs();
                    let db = (end_time - b.head_time).abs();
                    da.total_cmp(&db)
                })?;
            bridge.end_event = Some(end_event);
            bridge.head_event
        };

        if let Some(head) = self.active.iter_mut().find(|n| n.event == head_event) {
            head.paired_end = Some(end_event);
        }
        Some(head_event)
    }

    /// Chart index of the paired head for an end marker, if linked.
    pub fn head_for_end(&self, end_event: usize) -> Option<usize> {
        self.bridges
            .iter()
            .find(|b| b.end_event == Some(end_event))
            .map(|b| b.head_event)
    }

    /// Normalized travel progress of a note at song time `t`: 0 at spawn
    /// position, 1 at the hit line. Scroll speed shortens the effective
    /// preempt window, not the travel distance.
    pub fn progress(&self, events: &[ChartEvent], note: &ActiveNote, t: f64) -> f64 {
        let ev = &events[note.event];
        let effective_preempt = self.preempt_secs / ev.scroll_speed;
        1.0 - (ev.time_secs - t) / effective_preempt
    }

    /// Destroy notes that are done. Returns chart indices of notes that blew
    /// past the emergency threshold while still unjudged; the caller applies
    /// miss effects for them.
    ///
    /// Judged drumroll heads are exempt until their paired end resolves, then
    /// head and bridge go together.
    pub fn retire(&mut self, events: &[ChartEvent], play_state: &PlayState, t: f64) -> Vec<usize> {
        let mut force_missed = Vec::new();
        let mut removed_heads: Vec<usize> = Vec::new();

        let mut i = 0;
        while i < self.active.len() {
            let note = &self.active[i];
            let ev = &events[note.event];
            let pending = play_state.is_pending(note.event);

            if ev.kind.is_drumroll_start() && !pending {
                // A judged head waits for its end marker. Unlinked means the
                // end has not even spawned yet; only once the chart is fully
                // spawned with no end in sight does the head retire normally.
                let waiting_for_end = match note.paired_end {
                    Some(end) => play_state.is_pending(end),
                    None => self.spawn_cursor < events.len(),
                };
                if waiting_for_end {
                    i += 1;
                    continue;
                }
            }

            let progress = self.progress(events, note, t);

            if !pending && progress >= RETIRE_PROGRESS {
                removed_heads.push(note.event);
                self.active.swap_remove(i);
                continue;
            }

            if pending && progress >= FORCE_MISS_PROGRESS {
                warn!(
                    "note {} at {:.3}s stuck unjudged past emergency threshold, force-missing",
                    note.event, ev.time_secs
                );
                force_missed.push(note.event);
                self.active.swap_remove(i);
                continue;
            }

            i += 1;
        }

        self.bridges
            .retain(|b| !removed_heads.contains(&b.head_event));

        force_missed
    }
}
