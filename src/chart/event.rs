use serde::{Deserialize, Serialize};

/// Physical drum input category, as delivered by the input collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HitKind {
    /// Face hit ("don").
    Don,
    /// Rim hit ("ka").
    Ka,
}

/// Note type as it appears in a normalized chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoteKind {
    Don,
    Ka,
    DonLarge,
    KaLarge,
    DrumrollStart,
    DrumrollStartLarge,
    DrumrollEnd,
    Balloon,
    BalloonLarge,
    /// Placeholder slot in the source chart; never spawned or judged.
    Empty,
}

impl NoteKind {
    /// Which input category judges this note.
    /// Drumroll heads accept either side; end markers are resolved by the
    /// drumroll window and never by input.
    pub fn accepts(self, hit: HitKind) -> bool {
        match self {
            NoteKind::Don | NoteKind::DonLarge | NoteKind::Balloon | NoteKind::BalloonLarge => {
                hit == HitKind::Don
            }
            NoteKind::Ka | NoteKind::KaLarge => hit == HitKind::Ka,
            NoteKind::DrumrollStart | NoteKind::DrumrollStartLarge => true,
            NoteKind::DrumrollEnd | NoteKind::Empty => false,
        }
    }

    pub fn is_drumroll_start(self) -> bool {
        matches!(self, NoteKind::DrumrollStart | NoteKind::DrumrollStartLarge)
    }

    pub fn is_drumroll_end(self) -> bool {
        matches!(self, NoteKind::DrumrollEnd)
    }

    /// Large notes share judgement rules with their small variants and only
    /// differ in display size.
    pub fn is_large(self) -> bool {
        matches!(
            self,
            NoteKind::DonLarge
                | NoteKind::KaLarge
                | NoteKind::DrumrollStartLarge
                | NoteKind::BalloonLarge
        )
    }
}

/// A single time-stamped note event. Immutable once the chart is loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartEvent {
    /// Hit time in seconds from audio start.
    /// Negative values are valid pre-roll positions.
    pub time_secs: f64,
    /// Visual travel-time multiplier. Affects the effective preempt window
    /// only, never judgement timing.
    pub scroll_speed: f64,
    pub kind: NoteKind,
}

impl ChartEvent {
    pub fn new(time_secs: f64, kind: NoteKind) -> Self {
        Self {
            time_secs,
            scroll_speed: 1.0,
            kind,
        }
    }

    pub fn with_scroll(time_secs: f64, scroll_speed: f64, kind: NoteKind) -> Self {
        Self {
            time_secs,
            scroll_speed,
            kind,
        }
    }
}
