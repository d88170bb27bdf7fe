use super::judge::Judgement;

/// Outcome events emitted synchronously at the point of mutation.
///
/// The engine has no subscriber list of its own; each call into
/// [`super::GameSession`] returns the events it produced and display
/// collaborators consume them from there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    ScoreChanged(u32),
    ComboChanged(u32),
    AccuracyChanged(f64),
    GaugeChanged(f64),
    NoteJudged {
        /// Chart event index of the judged note.
        index: usize,
        judgement: Judgement,
    },
    DrumrollStarted {
        /// Chart event index of the drumroll head.
        index: usize,
    },
    DrumrollFinished {
        hits: u32,
        bonus: u32,
    },
}
