//! Timing-synchronization and judgement core.
//!
//! [`SongClock`] reconciles the audio clock with the frame loop,
//! [`GameSession`] runs spawn/judgement/drumroll state for one chart, and
//! everything downstream of a frame is reported through [`GameEvent`]s.

mod clock;
mod drumroll;
mod events;
mod judge;
mod notes;
mod result;
mod score;
mod session;
mod state;

pub use clock::{ClockState, SongClock};
pub use drumroll::{DrumrollState, FALLBACK_DURATION_SECS, ROLL_BONUS_PER_HIT, ROLL_HIT_SCORE};
pub use events::GameEvent;
pub use judge::{JudgeWindows, Judgement};
pub use notes::{ActiveNote, NoteField};
pub use result::PlayResult;
pub use score::{ScoreState, GAUGE_MAX};
pub use session::GameSession;
pub use state::{NoteState, PlayState};
