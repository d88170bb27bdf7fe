//! Normalized chart model.
//!
//! Chart file parsing lives outside this crate; loaders hand over a flat,
//! time-sorted list of [`ChartEvent`]s which [`Chart::new`] validates once.
//! During play the chart is immutable.

mod event;

pub use event::{ChartEvent, HitKind, NoteKind};

use log::warn;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("chart events out of order: event {index} at {time:.3}s is earlier than {prev:.3}s")]
    OutOfOrder { index: usize, time: f64, prev: f64 },
}

/// A validated, play-ready chart: note events in non-decreasing time order.
/// The spawn cursor in the note field depends on this ordering.
#[derive(Debug, Clone)]
pub struct Chart {
    events: Vec<ChartEvent>,
}

impl Chart {
    /// Validate and build a chart from loader output.
    ///
    /// `Empty` placeholder events are dropped here so the play loop never
    /// sees them; out-of-order input is rejected rather than repaired.
    pub fn new(events: Vec<ChartEvent>) -> Result<Self, ChartError> {
        let raw_len = events.len();
        let events: Vec<ChartEvent> = events
            .into_iter()
            .filter(|e| e.kind != NoteKind::Empty)
            .collect();
        if events.len() < raw_len {
            warn!("chart contained {} empty slots, dropped", raw_len - events.len());
        }

        for i in 1..events.len() {
            if events[i].time_secs < events[i - 1].time_secs {
                return Err(ChartError::OutOfOrder {
                    index: i,
                    time: events[i].time_secs,
                    prev: events[i - 1].time_secs,
                });
            }
        }

        Ok(Self { events })
    }

    pub fn events(&self) -> &[ChartEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of notes that are directly judgeable (end markers excluded).
    pub fn note_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| !e.kind.is_drumroll_end())
            .count()
    }
}
